//! `SQLite` implementation of [`HouseRepository`].

use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use smarthome_app::ports::HouseRepository;
use smarthome_domain::error::SmartHomeError;
use smarthome_domain::house::{Address, Gps, House, Location};
use smarthome_domain::id::HouseId;

use crate::error::{StorageError, decode};

/// Wrapper for converting database rows into domain [`House`].
///
/// Location columns go back through the domain constructors so stored rows
/// obey the same invariants as fresh input.
struct Wrapper(House);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let street_name: String = row.try_get("street_name")?;
        let street_number: String = row.try_get("street_number")?;
        let zip_code: String = row.try_get("zip_code")?;
        let city: String = row.try_get("city")?;
        let country: String = row.try_get("country")?;
        let latitude: f64 = row.try_get("latitude")?;
        let longitude: f64 = row.try_get("longitude")?;

        let address =
            Address::new(street_name, street_number, zip_code, city, &country).map_err(decode)?;
        let gps = Gps::new(latitude, longitude).map_err(decode)?;

        Ok(Self(House::new(
            HouseId::from_str(&id).map_err(decode)?,
            Location { address, gps },
        )))
    }
}

const INSERT: &str = r"
    INSERT INTO houses (id, street_name, street_number, zip_code, city, country, latitude, longitude)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?)
";
const SELECT_BY_ID: &str = "SELECT * FROM houses WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM houses ORDER BY rowid";
const UPDATE: &str = r"
    UPDATE houses
    SET street_name = ?, street_number = ?, zip_code = ?, city = ?, country = ?, latitude = ?, longitude = ?
    WHERE id = ?
";

/// `SQLite`-backed house repository.
#[derive(Clone)]
pub struct SqliteHouseRepository {
    pool: SqlitePool,
}

impl SqliteHouseRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl HouseRepository for SqliteHouseRepository {
    async fn create(&self, house: House) -> Result<House, SmartHomeError> {
        let Location { address, gps } = &house.location;
        sqlx::query(INSERT)
            .bind(house.id.as_str())
            .bind(address.street_name())
            .bind(address.street_number())
            .bind(address.zip_code())
            .bind(address.city())
            .bind(address.country().name())
            .bind(gps.latitude.value())
            .bind(gps.longitude.value())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(house)
    }

    async fn get_by_id(&self, id: HouseId) -> Result<Option<House>, SmartHomeError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(row.map(|w| w.0))
    }

    async fn get_all(&self) -> Result<Vec<House>, SmartHomeError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn update(&self, house: House) -> Result<House, SmartHomeError> {
        let Location { address, gps } = &house.location;
        sqlx::query(UPDATE)
            .bind(address.street_name())
            .bind(address.street_number())
            .bind(address.zip_code())
            .bind(address.city())
            .bind(address.country().name())
            .bind(gps.latitude.value())
            .bind(gps.longitude.value())
            .bind(house.id.as_str())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(house)
    }
}
