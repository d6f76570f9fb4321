//! `SQLite` implementation of [`RoomRepository`].

use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use smarthome_app::ports::RoomRepository;
use smarthome_domain::error::SmartHomeError;
use smarthome_domain::id::{HouseId, RoomId};
use smarthome_domain::room::{Dimensions, Room};

use crate::error::{StorageError, decode};

struct Wrapper(Room);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let house_id: String = row.try_get("house_id")?;
        let floor: i32 = row.try_get("floor")?;
        let width: f64 = row.try_get("width")?;
        let length: f64 = row.try_get("length")?;
        let height: f64 = row.try_get("height")?;

        Ok(Self(Room {
            id: RoomId::from_str(&id).map_err(decode)?,
            name,
            house_id: HouseId::from_str(&house_id).map_err(decode)?,
            floor,
            dimensions: Dimensions::new(width, length, height).map_err(decode)?,
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO rooms (id, name, house_id, floor, width, length, height)
    VALUES (?, ?, ?, ?, ?, ?, ?)
";
const SELECT_BY_ID: &str = "SELECT * FROM rooms WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM rooms ORDER BY rowid";
const SELECT_BY_HOUSE: &str = "SELECT * FROM rooms WHERE house_id = ? ORDER BY rowid";

/// `SQLite`-backed room repository.
#[derive(Clone)]
pub struct SqliteRoomRepository {
    pool: SqlitePool,
}

impl SqliteRoomRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl RoomRepository for SqliteRoomRepository {
    async fn create(&self, room: Room) -> Result<Room, SmartHomeError> {
        sqlx::query(INSERT)
            .bind(room.id.as_str())
            .bind(&room.name)
            .bind(room.house_id.as_str())
            .bind(room.floor)
            .bind(room.dimensions.width())
            .bind(room.dimensions.length())
            .bind(room.dimensions.height())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(room)
    }

    async fn get_by_id(&self, id: RoomId) -> Result<Option<Room>, SmartHomeError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(row.map(|w| w.0))
    }

    async fn get_all(&self) -> Result<Vec<Room>, SmartHomeError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn find_by_house(&self, house_id: HouseId) -> Result<Vec<Room>, SmartHomeError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_BY_HOUSE)
            .bind(house_id.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }
}
