//! `SQLite` implementation of [`SensorRepository`].

use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use smarthome_app::ports::SensorRepository;
use smarthome_domain::error::SmartHomeError;
use smarthome_domain::id::{DeviceId, SensorId, SensorModelName};
use smarthome_domain::sensor::Sensor;

use crate::error::{StorageError, decode};

struct Wrapper(Sensor);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let model: String = row.try_get("model")?;
        let device_id: String = row.try_get("device_id")?;

        Ok(Self(Sensor {
            id: SensorId::from_str(&id).map_err(decode)?,
            model: SensorModelName::from_str(&model).map_err(decode)?,
            device_id: DeviceId::from_str(&device_id).map_err(decode)?,
        }))
    }
}

const INSERT: &str = "INSERT INTO sensors (id, model, device_id) VALUES (?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM sensors WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM sensors ORDER BY rowid";
const SELECT_BY_DEVICE: &str = "SELECT * FROM sensors WHERE device_id = ? ORDER BY rowid";
const SELECT_BY_DEVICE_AND_MODEL: &str =
    "SELECT * FROM sensors WHERE device_id = ? AND model = ? ORDER BY rowid";

/// `SQLite`-backed sensor repository.
#[derive(Clone)]
pub struct SqliteSensorRepository {
    pool: SqlitePool,
}

impl SqliteSensorRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl SensorRepository for SqliteSensorRepository {
    async fn create(&self, sensor: Sensor) -> Result<Sensor, SmartHomeError> {
        sqlx::query(INSERT)
            .bind(sensor.id.as_str())
            .bind(sensor.model.as_str())
            .bind(sensor.device_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(sensor)
    }

    async fn get_by_id(&self, id: SensorId) -> Result<Option<Sensor>, SmartHomeError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(row.map(|w| w.0))
    }

    async fn get_all(&self) -> Result<Vec<Sensor>, SmartHomeError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn find_by_device(&self, device_id: DeviceId) -> Result<Vec<Sensor>, SmartHomeError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_BY_DEVICE)
            .bind(device_id.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn find_by_device_and_model(
        &self,
        device_id: DeviceId,
        model: SensorModelName,
    ) -> Result<Vec<Sensor>, SmartHomeError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_BY_DEVICE_AND_MODEL)
            .bind(device_id.as_str())
            .bind(model.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }
}
