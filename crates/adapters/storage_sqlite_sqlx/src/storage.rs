//! [`Storage`] bundle over a single `SQLite` pool.

use sqlx::SqlitePool;

use smarthome_app::ports::Storage;

use crate::actuator_repo::SqliteActuatorRepository;
use crate::catalog_repo::SqliteCatalogRepository;
use crate::device_repo::SqliteDeviceRepository;
use crate::house_repo::SqliteHouseRepository;
use crate::reading_repo::SqliteReadingRepository;
use crate::room_repo::SqliteRoomRepository;
use crate::sensor_repo::SqliteSensorRepository;

/// Hands out repositories sharing one connection pool.
#[derive(Clone)]
pub struct SqliteStorage {
    pool: SqlitePool,
}

impl SqliteStorage {
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl Storage for SqliteStorage {
    type Houses = SqliteHouseRepository;
    type Rooms = SqliteRoomRepository;
    type Devices = SqliteDeviceRepository;
    type Sensors = SqliteSensorRepository;
    type Actuators = SqliteActuatorRepository;
    type Readings = SqliteReadingRepository;
    type Catalog = SqliteCatalogRepository;

    fn houses(&self) -> Self::Houses {
        SqliteHouseRepository::new(self.pool.clone())
    }

    fn rooms(&self) -> Self::Rooms {
        SqliteRoomRepository::new(self.pool.clone())
    }

    fn devices(&self) -> Self::Devices {
        SqliteDeviceRepository::new(self.pool.clone())
    }

    fn sensors(&self) -> Self::Sensors {
        SqliteSensorRepository::new(self.pool.clone())
    }

    fn actuators(&self) -> Self::Actuators {
        SqliteActuatorRepository::new(self.pool.clone())
    }

    fn readings(&self) -> Self::Readings {
        SqliteReadingRepository::new(self.pool.clone())
    }

    fn catalog(&self) -> Self::Catalog {
        SqliteCatalogRepository::new(self.pool.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Config;
    use smarthome_app::ports::{DeviceRepository, HouseRepository, RoomRepository};
    use smarthome_domain::device::Device;
    use smarthome_domain::house::{Address, Gps, House, Location};
    use smarthome_domain::id::{DeviceTypeName, HouseId};
    use smarthome_domain::room::{Dimensions, Room};

    #[tokio::test]
    async fn should_share_one_database_between_repositories() {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap();
        let storage = SqliteStorage::new(db.pool().clone());

        let house = storage
            .houses()
            .create(House::new(
                HouseId::parse("Casa").unwrap(),
                Location {
                    address: Address::new("Rua Augusta", "1", "1100-048", "Lisboa", "Portugal")
                        .unwrap(),
                    gps: Gps::new(38.71, -9.13).unwrap(),
                },
            ))
            .await
            .unwrap();
        let room = storage
            .rooms()
            .create(
                Room::builder()
                    .name("Kitchen")
                    .house_id(house.id.clone())
                    .floor(0)
                    .dimensions(Dimensions::new(4.0, 3.0, 2.5).unwrap())
                    .build()
                    .unwrap(),
            )
            .await
            .unwrap();
        let device = storage
            .devices()
            .create(
                Device::builder()
                    .name("Heater")
                    .device_type(DeviceTypeName::parse("Thermostat").unwrap())
                    .room_id(room.id.clone())
                    .build()
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(storage.houses().get_all().await.unwrap().len(), 1);
        assert_eq!(
            storage.rooms().find_by_house(house.id).await.unwrap(),
            vec![room.clone()]
        );
        assert_eq!(
            storage.devices().find_by_room(room.id).await.unwrap(),
            vec![device]
        );
    }
}
