//! `SQLite` implementation of [`DeviceRepository`].

use std::future::Future;
use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use smarthome_app::ports::DeviceRepository;
use smarthome_domain::device::{Device, DeviceStatus};
use smarthome_domain::error::SmartHomeError;
use smarthome_domain::id::{DeviceId, DeviceTypeName, RoomId};

use crate::error::{StorageError, decode};

/// Wrapper for converting database rows into domain [`Device`].
struct Wrapper(Device);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Device> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let device_type: String = row.try_get("device_type")?;
        let room_id: String = row.try_get("room_id")?;
        let status: String = row.try_get("status")?;

        Ok(Self(Device {
            id: DeviceId::from_str(&id).map_err(decode)?,
            name,
            device_type: DeviceTypeName::from_str(&device_type).map_err(decode)?,
            room_id: RoomId::from_str(&room_id).map_err(decode)?,
            status: DeviceStatus::from_str(&status).map_err(decode)?,
        }))
    }
}

const INSERT: &str =
    "INSERT INTO devices (id, name, device_type, room_id, status) VALUES (?, ?, ?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM devices WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM devices ORDER BY rowid";
const SELECT_BY_ROOM: &str = "SELECT * FROM devices WHERE room_id = ? ORDER BY rowid";
const SELECT_BY_TYPE: &str = "SELECT * FROM devices WHERE device_type = ? ORDER BY rowid";
const UPDATE: &str =
    "UPDATE devices SET name = ?, device_type = ?, room_id = ?, status = ? WHERE id = ?";

/// `SQLite`-backed device repository.
#[derive(Clone)]
pub struct SqliteDeviceRepository {
    pool: SqlitePool,
}

impl SqliteDeviceRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl DeviceRepository for SqliteDeviceRepository {
    fn create(&self, device: Device) -> impl Future<Output = Result<Device, SmartHomeError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT)
                .bind(device.id.as_str())
                .bind(&device.name)
                .bind(device.device_type.as_str())
                .bind(device.room_id.as_str())
                .bind(device.status.as_str())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(device)
        }
    }

    fn get_by_id(
        &self,
        id: DeviceId,
    ) -> impl Future<Output = Result<Option<Device>, SmartHomeError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.as_str())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Device>, SmartHomeError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn update(&self, device: Device) -> impl Future<Output = Result<Device, SmartHomeError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(UPDATE)
                .bind(&device.name)
                .bind(device.device_type.as_str())
                .bind(device.room_id.as_str())
                .bind(device.status.as_str())
                .bind(device.id.as_str())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(device)
        }
    }

    fn find_by_room(
        &self,
        room_id: RoomId,
    ) -> impl Future<Output = Result<Vec<Device>, SmartHomeError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_BY_ROOM)
                .bind(room_id.as_str())
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn find_by_type(
        &self,
        device_type: DeviceTypeName,
    ) -> impl Future<Output = Result<Vec<Device>, SmartHomeError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_BY_TYPE)
                .bind(device_type.as_str())
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Config;

    async fn setup() -> SqliteDeviceRepository {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap();
        SqliteDeviceRepository::new(db.pool().clone())
    }

    fn test_device(room_id: &RoomId, device_type: &str) -> Device {
        Device::builder()
            .name("Heater")
            .device_type(DeviceTypeName::parse(device_type).unwrap())
            .room_id(room_id.clone())
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn should_create_and_retrieve_device_when_valid() {
        let repo = setup().await;
        let device = test_device(&RoomId::new(), "Thermostat");
        let id = device.id.clone();

        repo.create(device.clone()).await.unwrap();

        let fetched = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(fetched, device);
    }

    #[tokio::test]
    async fn should_return_none_when_device_not_found() {
        let repo = setup().await;
        let result = repo.get_by_id(DeviceId::new()).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn should_persist_status_when_updated() {
        let repo = setup().await;
        let mut device = test_device(&RoomId::new(), "Thermostat");
        repo.create(device.clone()).await.unwrap();

        device.deactivate().unwrap();
        repo.update(device.clone()).await.unwrap();

        let fetched = repo.get_by_id(device.id).await.unwrap().unwrap();
        assert_eq!(fetched.status, DeviceStatus::Inactive);
    }

    #[tokio::test]
    async fn should_find_devices_by_room_and_type() {
        let repo = setup().await;
        let kitchen = RoomId::new();
        let hall = RoomId::new();
        repo.create(test_device(&kitchen, "Thermostat")).await.unwrap();
        repo.create(test_device(&kitchen, "GridPowerMeter")).await.unwrap();
        repo.create(test_device(&hall, "GridPowerMeter")).await.unwrap();

        assert_eq!(repo.find_by_room(kitchen).await.unwrap().len(), 2);
        assert_eq!(
            repo.find_by_type(DeviceTypeName::parse("GridPowerMeter").unwrap())
                .await
                .unwrap()
                .len(),
            2
        );
        assert_eq!(repo.get_all().await.unwrap().len(), 3);
    }
}
