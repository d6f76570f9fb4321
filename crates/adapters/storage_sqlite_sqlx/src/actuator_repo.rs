//! `SQLite` implementation of [`ActuatorRepository`].
//!
//! The actuator configuration is stored as a JSON document.

use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use smarthome_app::ports::ActuatorRepository;
use smarthome_domain::actuator::{Actuator, ActuatorConfig};
use smarthome_domain::error::SmartHomeError;
use smarthome_domain::id::{ActuatorId, ActuatorModelName, DeviceId};

use crate::error::{StorageError, decode};

struct Wrapper(Actuator);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let model: String = row.try_get("model")?;
        let device_id: String = row.try_get("device_id")?;
        let config_json: String = row.try_get("config")?;

        let config: ActuatorConfig = serde_json::from_str(&config_json).map_err(decode)?;

        Ok(Self(Actuator {
            id: ActuatorId::from_str(&id).map_err(decode)?,
            model: ActuatorModelName::from_str(&model).map_err(decode)?,
            device_id: DeviceId::from_str(&device_id).map_err(decode)?,
            config,
        }))
    }
}

const INSERT: &str = "INSERT INTO actuators (id, model, device_id, config) VALUES (?, ?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM actuators WHERE id = ?";
const SELECT_BY_DEVICE: &str = "SELECT * FROM actuators WHERE device_id = ? ORDER BY rowid";

/// `SQLite`-backed actuator repository.
#[derive(Clone)]
pub struct SqliteActuatorRepository {
    pool: SqlitePool,
}

impl SqliteActuatorRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl ActuatorRepository for SqliteActuatorRepository {
    async fn create(&self, actuator: Actuator) -> Result<Actuator, SmartHomeError> {
        let config_json = serde_json::to_string(&actuator.config).map_err(StorageError::from)?;

        sqlx::query(INSERT)
            .bind(actuator.id.as_str())
            .bind(actuator.model.as_str())
            .bind(actuator.device_id.as_str())
            .bind(&config_json)
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(actuator)
    }

    async fn get_by_id(&self, id: ActuatorId) -> Result<Option<Actuator>, SmartHomeError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(row.map(|w| w.0))
    }

    async fn find_by_device(&self, device_id: DeviceId) -> Result<Vec<Actuator>, SmartHomeError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_BY_DEVICE)
            .bind(device_id.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }
}
