//! Storage port: repository traits for persistence.
//!
//! Aggregates are created, looked up by identity and updated in place;
//! nothing is ever deleted.

use std::future::Future;

use smarthome_domain::actuator::Actuator;
use smarthome_domain::catalog::{ActuatorModel, ActuatorType, Catalog, DeviceType, SensorModel, SensorType};
use smarthome_domain::device::Device;
use smarthome_domain::error::SmartHomeError;
use smarthome_domain::house::House;
use smarthome_domain::id::{
    ActuatorId, DeviceId, DeviceTypeName, HouseId, ReadingId, RoomId, SensorId, SensorModelName,
};
use smarthome_domain::period::Period;
use smarthome_domain::reading::Reading;
use smarthome_domain::room::Room;
use smarthome_domain::sensor::Sensor;

/// Repository for [`House`]s.
pub trait HouseRepository {
    /// Persist a new house.
    fn create(&self, house: House) -> impl Future<Output = Result<House, SmartHomeError>> + Send;

    /// Get a house by its name.
    fn get_by_id(
        &self,
        id: HouseId,
    ) -> impl Future<Output = Result<Option<House>, SmartHomeError>> + Send;

    /// Get every house.
    fn get_all(&self) -> impl Future<Output = Result<Vec<House>, SmartHomeError>> + Send;

    /// Overwrite an existing house.
    fn update(&self, house: House) -> impl Future<Output = Result<House, SmartHomeError>> + Send;
}

/// Repository for [`Room`]s.
pub trait RoomRepository {
    fn create(&self, room: Room) -> impl Future<Output = Result<Room, SmartHomeError>> + Send;

    fn get_by_id(&self, id: RoomId)
    -> impl Future<Output = Result<Option<Room>, SmartHomeError>> + Send;

    fn get_all(&self) -> impl Future<Output = Result<Vec<Room>, SmartHomeError>> + Send;

    /// Rooms belonging to `house_id`.
    fn find_by_house(
        &self,
        house_id: HouseId,
    ) -> impl Future<Output = Result<Vec<Room>, SmartHomeError>> + Send;
}

/// Repository for [`Device`]s.
pub trait DeviceRepository {
    fn create(&self, device: Device)
    -> impl Future<Output = Result<Device, SmartHomeError>> + Send;

    fn get_by_id(
        &self,
        id: DeviceId,
    ) -> impl Future<Output = Result<Option<Device>, SmartHomeError>> + Send;

    fn get_all(&self) -> impl Future<Output = Result<Vec<Device>, SmartHomeError>> + Send;

    /// Overwrite an existing device.
    fn update(&self, device: Device)
    -> impl Future<Output = Result<Device, SmartHomeError>> + Send;

    /// Devices installed in `room_id`.
    fn find_by_room(
        &self,
        room_id: RoomId,
    ) -> impl Future<Output = Result<Vec<Device>, SmartHomeError>> + Send;

    /// Devices of the given catalog type.
    fn find_by_type(
        &self,
        device_type: DeviceTypeName,
    ) -> impl Future<Output = Result<Vec<Device>, SmartHomeError>> + Send;
}

/// Repository for [`Sensor`]s.
pub trait SensorRepository {
    fn create(&self, sensor: Sensor)
    -> impl Future<Output = Result<Sensor, SmartHomeError>> + Send;

    fn get_by_id(
        &self,
        id: SensorId,
    ) -> impl Future<Output = Result<Option<Sensor>, SmartHomeError>> + Send;

    fn get_all(&self) -> impl Future<Output = Result<Vec<Sensor>, SmartHomeError>> + Send;

    /// Sensors attached to `device_id`.
    fn find_by_device(
        &self,
        device_id: DeviceId,
    ) -> impl Future<Output = Result<Vec<Sensor>, SmartHomeError>> + Send;

    /// Sensors of `model` attached to `device_id`.
    fn find_by_device_and_model(
        &self,
        device_id: DeviceId,
        model: SensorModelName,
    ) -> impl Future<Output = Result<Vec<Sensor>, SmartHomeError>> + Send;
}

/// Repository for [`Actuator`]s.
pub trait ActuatorRepository {
    fn create(
        &self,
        actuator: Actuator,
    ) -> impl Future<Output = Result<Actuator, SmartHomeError>> + Send;

    fn get_by_id(
        &self,
        id: ActuatorId,
    ) -> impl Future<Output = Result<Option<Actuator>, SmartHomeError>> + Send;

    /// Actuators attached to `device_id`.
    fn find_by_device(
        &self,
        device_id: DeviceId,
    ) -> impl Future<Output = Result<Vec<Actuator>, SmartHomeError>> + Send;
}

/// Repository for [`Reading`]s.
pub trait ReadingRepository {
    fn create(&self, reading: Reading)
    -> impl Future<Output = Result<Reading, SmartHomeError>> + Send;

    fn get_by_id(
        &self,
        id: ReadingId,
    ) -> impl Future<Output = Result<Option<Reading>, SmartHomeError>> + Send;

    /// Ids of the readings of `sensor_id` recorded within `period`, bounds
    /// included, oldest first.
    fn find_ids_by_sensor_in_period(
        &self,
        sensor_id: SensorId,
        period: Period,
    ) -> impl Future<Output = Result<Vec<ReadingId>, SmartHomeError>> + Send;

    /// Readings of `sensor_id` recorded within `period`, bounds included,
    /// oldest first.
    fn find_by_sensor_in_period(
        &self,
        sensor_id: SensorId,
        period: Period,
    ) -> impl Future<Output = Result<Vec<Reading>, SmartHomeError>> + Send;

    /// Most recent reading of `sensor_id`.
    fn find_latest_by_sensor(
        &self,
        sensor_id: SensorId,
    ) -> impl Future<Output = Result<Option<Reading>, SmartHomeError>> + Send;
}

/// Repository for the read-only [`Catalog`].
pub trait CatalogRepository {
    /// Store every entry of `catalog`, replacing entries with the same key.
    fn save(&self, catalog: Catalog) -> impl Future<Output = Result<(), SmartHomeError>> + Send;

    fn device_types(&self) -> impl Future<Output = Result<Vec<DeviceType>, SmartHomeError>> + Send;

    fn sensor_types(&self) -> impl Future<Output = Result<Vec<SensorType>, SmartHomeError>> + Send;

    fn sensor_models(
        &self,
    ) -> impl Future<Output = Result<Vec<SensorModel>, SmartHomeError>> + Send;

    fn actuator_types(
        &self,
    ) -> impl Future<Output = Result<Vec<ActuatorType>, SmartHomeError>> + Send;

    fn actuator_models(
        &self,
    ) -> impl Future<Output = Result<Vec<ActuatorModel>, SmartHomeError>> + Send;
}

/// A storage backend providing every repository.
///
/// Repositories are cheap handles over shared state, cloned into each
/// service that needs them.
pub trait Storage: Send + Sync + 'static {
    type Houses: HouseRepository + Clone + Send + Sync + 'static;
    type Rooms: RoomRepository + Clone + Send + Sync + 'static;
    type Devices: DeviceRepository + Clone + Send + Sync + 'static;
    type Sensors: SensorRepository + Clone + Send + Sync + 'static;
    type Actuators: ActuatorRepository + Clone + Send + Sync + 'static;
    type Readings: ReadingRepository + Clone + Send + Sync + 'static;
    type Catalog: CatalogRepository + Clone + Send + Sync + 'static;

    fn houses(&self) -> Self::Houses;
    fn rooms(&self) -> Self::Rooms;
    fn devices(&self) -> Self::Devices;
    fn sensors(&self) -> Self::Sensors;
    fn actuators(&self) -> Self::Actuators;
    fn readings(&self) -> Self::Readings;
    fn catalog(&self) -> Self::Catalog;
}
