//! `SQLite` implementation of [`ReadingRepository`].

use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use smarthome_app::ports::ReadingRepository;
use smarthome_domain::error::SmartHomeError;
use smarthome_domain::id::{ReadingId, SensorId};
use smarthome_domain::period::Period;
use smarthome_domain::reading::Reading;
use smarthome_domain::time::Timestamp;

use crate::error::{StorageError, decode};

/// Fixed-width RFC 3339 so that text ordering matches time ordering.
fn encode_timestamp(at: Timestamp) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

struct Wrapper(Reading);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let sensor_id: String = row.try_get("sensor_id")?;
        let value: f64 = row.try_get("value")?;
        let recorded_at: String = row.try_get("recorded_at")?;

        Ok(Self(Reading {
            id: ReadingId::from_str(&id).map_err(decode)?,
            value,
            sensor_id: SensorId::from_str(&sensor_id).map_err(decode)?,
            recorded_at: DateTime::parse_from_rfc3339(&recorded_at)
                .map_err(decode)?
                .with_timezone(&Utc),
        }))
    }
}

const INSERT: &str =
    "INSERT INTO readings (id, sensor_id, value, recorded_at) VALUES (?, ?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM readings WHERE id = ?";
const SELECT_BY_SENSOR_IN_RANGE: &str = r"
    SELECT * FROM readings
    WHERE sensor_id = ? AND recorded_at >= ? AND recorded_at <= ?
    ORDER BY recorded_at ASC
";
const SELECT_IDS_BY_SENSOR_IN_RANGE: &str = r"
    SELECT id FROM readings
    WHERE sensor_id = ? AND recorded_at >= ? AND recorded_at <= ?
    ORDER BY recorded_at ASC
";
const SELECT_LATEST_BY_SENSOR: &str = r"
    SELECT * FROM readings
    WHERE sensor_id = ?
    ORDER BY recorded_at DESC, rowid DESC
    LIMIT 1
";

/// `SQLite`-backed reading repository.
#[derive(Clone)]
pub struct SqliteReadingRepository {
    pool: SqlitePool,
}

impl SqliteReadingRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl ReadingRepository for SqliteReadingRepository {
    async fn create(&self, reading: Reading) -> Result<Reading, SmartHomeError> {
        sqlx::query(INSERT)
            .bind(reading.id.as_str())
            .bind(reading.sensor_id.as_str())
            .bind(reading.value)
            .bind(encode_timestamp(reading.recorded_at))
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(reading)
    }

    async fn get_by_id(&self, id: ReadingId) -> Result<Option<Reading>, SmartHomeError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(row.map(|w| w.0))
    }

    async fn find_ids_by_sensor_in_period(
        &self,
        sensor_id: SensorId,
        period: Period,
    ) -> Result<Vec<ReadingId>, SmartHomeError> {
        let rows: Vec<(String,)> = sqlx::query_as(SELECT_IDS_BY_SENSOR_IN_RANGE)
            .bind(sensor_id.as_str())
            .bind(encode_timestamp(period.start()))
            .bind(encode_timestamp(period.end()))
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        rows.into_iter()
            .map(|(id,)| {
                ReadingId::from_str(&id)
                    .map_err(|err| StorageError::from(decode(err)).into())
            })
            .collect()
    }

    async fn find_by_sensor_in_period(
        &self,
        sensor_id: SensorId,
        period: Period,
    ) -> Result<Vec<Reading>, SmartHomeError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_BY_SENSOR_IN_RANGE)
            .bind(sensor_id.as_str())
            .bind(encode_timestamp(period.start()))
            .bind(encode_timestamp(period.end()))
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn find_latest_by_sensor(
        &self,
        sensor_id: SensorId,
    ) -> Result<Option<Reading>, SmartHomeError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_LATEST_BY_SENSOR)
            .bind(sensor_id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(row.map(|w| w.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Config;
    use chrono::TimeZone;

    async fn setup() -> SqliteReadingRepository {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap();
        SqliteReadingRepository::new(db.pool().clone())
    }

    fn at(h: u32, m: u32, s: u32) -> Timestamp {
        Utc.with_ymd_and_hms(2024, 4, 15, h, m, s).unwrap()
    }

    fn period(from: Timestamp, to: Timestamp) -> Period {
        Period::new(from, to, Utc::now()).unwrap()
    }

    #[tokio::test]
    async fn should_create_and_retrieve_reading() {
        let repo = setup().await;
        let reading = repo
            .create(Reading::new(21.25, SensorId::new(), at(7, 20, 50)))
            .await
            .unwrap();

        let fetched = repo.get_by_id(reading.id.clone()).await.unwrap().unwrap();
        assert_eq!(fetched, reading);
    }

    #[tokio::test]
    async fn should_read_back_nanosecond_timestamp_as_created() {
        let repo = setup().await;
        let recorded_at = at(7, 20, 50) + chrono::TimeDelta::nanoseconds(987_654_321);
        let reading = repo
            .create(Reading::new(19.5, SensorId::new(), recorded_at))
            .await
            .unwrap();

        let fetched = repo.get_by_id(reading.id.clone()).await.unwrap().unwrap();
        assert_eq!(fetched.recorded_at, reading.recorded_at);
    }

    #[tokio::test]
    async fn should_include_period_bounds_and_order_by_time() {
        let repo = setup().await;
        let sensor = SensorId::new();
        let late = repo
            .create(Reading::new(2.0, sensor.clone(), at(8, 0, 0)))
            .await
            .unwrap();
        let early = repo
            .create(Reading::new(1.0, sensor.clone(), at(7, 0, 0)))
            .await
            .unwrap();
        repo.create(Reading::new(3.0, sensor.clone(), at(8, 0, 1)))
            .await
            .unwrap();
        repo.create(Reading::new(4.0, SensorId::new(), at(7, 30, 0)))
            .await
            .unwrap();

        let window = period(at(7, 0, 0), at(8, 0, 0));
        let ids = repo
            .find_ids_by_sensor_in_period(sensor.clone(), window)
            .await
            .unwrap();
        assert_eq!(ids, vec![early.id.clone(), late.id.clone()]);

        let readings = repo.find_by_sensor_in_period(sensor, window).await.unwrap();
        assert_eq!(readings, vec![early, late]);
    }

    #[tokio::test]
    async fn should_compare_sub_second_timestamps_in_order() {
        let repo = setup().await;
        let sensor = SensorId::new();
        let base = at(7, 0, 0);
        repo.create(Reading::new(1.0, sensor.clone(), base + chrono::TimeDelta::milliseconds(500)))
            .await
            .unwrap();

        let window = period(base, base + chrono::TimeDelta::milliseconds(400));
        assert!(repo
            .find_ids_by_sensor_in_period(sensor, window)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn should_return_latest_reading_of_sensor() {
        let repo = setup().await;
        let sensor = SensorId::new();
        repo.create(Reading::new(10.0, sensor.clone(), at(7, 0, 0)))
            .await
            .unwrap();
        let latest = repo
            .create(Reading::new(60.0, sensor.clone(), at(9, 0, 0)))
            .await
            .unwrap();
        repo.create(Reading::new(30.0, sensor.clone(), at(8, 0, 0)))
            .await
            .unwrap();

        assert_eq!(repo.find_latest_by_sensor(sensor).await.unwrap(), Some(latest));
        assert!(repo
            .find_latest_by_sensor(SensorId::new())
            .await
            .unwrap()
            .is_none());
    }
}
