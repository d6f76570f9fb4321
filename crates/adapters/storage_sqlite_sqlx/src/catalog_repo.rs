//! `SQLite` implementation of [`CatalogRepository`].

use std::str::FromStr;

use sqlx::SqlitePool;

use smarthome_app::ports::CatalogRepository;
use smarthome_domain::catalog::{
    ActuatorModel, ActuatorType, Catalog, DeviceType, SensorModel, SensorType,
};
use smarthome_domain::error::SmartHomeError;
use smarthome_domain::id::{
    ActuatorModelName, ActuatorTypeName, DeviceTypeName, SensorModelName, SensorTypeId,
};

use crate::error::{StorageError, decode};

const UPSERT_DEVICE_TYPE: &str = "INSERT OR REPLACE INTO device_types (name) VALUES (?)";
const UPSERT_SENSOR_TYPE: &str =
    "INSERT OR REPLACE INTO sensor_types (id, name, unit) VALUES (?, ?, ?)";
const UPSERT_SENSOR_MODEL: &str =
    "INSERT OR REPLACE INTO sensor_models (name, sensor_type) VALUES (?, ?)";
const UPSERT_ACTUATOR_TYPE: &str = "INSERT OR REPLACE INTO actuator_types (name) VALUES (?)";
const UPSERT_ACTUATOR_MODEL: &str =
    "INSERT OR REPLACE INTO actuator_models (name, actuator_type) VALUES (?, ?)";

const SELECT_DEVICE_TYPES: &str = "SELECT name FROM device_types ORDER BY rowid";
const SELECT_SENSOR_TYPES: &str = "SELECT name, unit FROM sensor_types ORDER BY rowid";
const SELECT_SENSOR_MODELS: &str = "SELECT name, sensor_type FROM sensor_models ORDER BY rowid";
const SELECT_ACTUATOR_TYPES: &str = "SELECT name FROM actuator_types ORDER BY rowid";
const SELECT_ACTUATOR_MODELS: &str =
    "SELECT name, actuator_type FROM actuator_models ORDER BY rowid";

fn decoded<T, E>(value: Result<T, E>) -> Result<T, SmartHomeError>
where
    E: std::error::Error + Send + Sync + 'static,
{
    value.map_err(|err| StorageError::from(decode(err)).into())
}

/// `SQLite`-backed catalog repository.
#[derive(Clone)]
pub struct SqliteCatalogRepository {
    pool: SqlitePool,
}

impl SqliteCatalogRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl CatalogRepository for SqliteCatalogRepository {
    async fn save(&self, catalog: Catalog) -> Result<(), SmartHomeError> {
        let mut tx = self.pool.begin().await.map_err(StorageError::from)?;

        for entry in &catalog.device_types {
            sqlx::query(UPSERT_DEVICE_TYPE)
                .bind(entry.name.as_str())
                .execute(&mut *tx)
                .await
                .map_err(StorageError::from)?;
        }
        for entry in &catalog.sensor_types {
            sqlx::query(UPSERT_SENSOR_TYPE)
                .bind(entry.id.as_str())
                .bind(&entry.name)
                .bind(&entry.unit)
                .execute(&mut *tx)
                .await
                .map_err(StorageError::from)?;
        }
        for entry in &catalog.sensor_models {
            sqlx::query(UPSERT_SENSOR_MODEL)
                .bind(entry.name.as_str())
                .bind(entry.sensor_type.as_str())
                .execute(&mut *tx)
                .await
                .map_err(StorageError::from)?;
        }
        for entry in &catalog.actuator_types {
            sqlx::query(UPSERT_ACTUATOR_TYPE)
                .bind(entry.name.as_str())
                .execute(&mut *tx)
                .await
                .map_err(StorageError::from)?;
        }
        for entry in &catalog.actuator_models {
            sqlx::query(UPSERT_ACTUATOR_MODEL)
                .bind(entry.name.as_str())
                .bind(entry.actuator_type.as_str())
                .execute(&mut *tx)
                .await
                .map_err(StorageError::from)?;
        }

        tx.commit().await.map_err(StorageError::from)?;
        Ok(())
    }

    async fn device_types(&self) -> Result<Vec<DeviceType>, SmartHomeError> {
        let rows: Vec<(String,)> = sqlx::query_as(SELECT_DEVICE_TYPES)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        rows.into_iter()
            .map(|(name,)| {
                Ok(DeviceType {
                    name: decoded(DeviceTypeName::from_str(&name))?,
                })
            })
            .collect()
    }

    async fn sensor_types(&self) -> Result<Vec<SensorType>, SmartHomeError> {
        let rows: Vec<(String, String)> = sqlx::query_as(SELECT_SENSOR_TYPES)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        rows.into_iter()
            .map(|(name, unit)| decoded(SensorType::new(name, unit)))
            .collect()
    }

    async fn sensor_models(&self) -> Result<Vec<SensorModel>, SmartHomeError> {
        let rows: Vec<(String, String)> = sqlx::query_as(SELECT_SENSOR_MODELS)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        rows.into_iter()
            .map(|(name, sensor_type)| {
                Ok(SensorModel {
                    name: decoded(SensorModelName::from_str(&name))?,
                    sensor_type: decoded(SensorTypeId::from_str(&sensor_type))?,
                })
            })
            .collect()
    }

    async fn actuator_types(&self) -> Result<Vec<ActuatorType>, SmartHomeError> {
        let rows: Vec<(String,)> = sqlx::query_as(SELECT_ACTUATOR_TYPES)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        rows.into_iter()
            .map(|(name,)| {
                Ok(ActuatorType {
                    name: decoded(ActuatorTypeName::from_str(&name))?,
                })
            })
            .collect()
    }

    async fn actuator_models(&self) -> Result<Vec<ActuatorModel>, SmartHomeError> {
        let rows: Vec<(String, String)> = sqlx::query_as(SELECT_ACTUATOR_MODELS)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        rows.into_iter()
            .map(|(name, actuator_type)| {
                Ok(ActuatorModel {
                    name: decoded(ActuatorModelName::from_str(&name))?,
                    actuator_type: decoded(ActuatorTypeName::from_str(&actuator_type))?,
                })
            })
            .collect()
    }
}
