//! Shared application state for axum handlers.

use std::sync::Arc;

use smarthome_app::ports::Storage;
use smarthome_app::services::actuator_service::ActuatorService;
use smarthome_app::services::catalog_service::CatalogService;
use smarthome_app::services::device_service::DeviceService;
use smarthome_app::services::house_service::HouseService;
use smarthome_app::services::reading_service::{ReadingService, ReadingSettings};
use smarthome_app::services::room_service::RoomService;
use smarthome_app::services::sensor_service::SensorService;
use smarthome_domain::id::SensorModelName;

type Devices<S> = DeviceService<
    <S as Storage>::Devices,
    <S as Storage>::Rooms,
    <S as Storage>::Sensors,
    <S as Storage>::Catalog,
>;
type Sensors<S> =
    SensorService<<S as Storage>::Sensors, <S as Storage>::Devices, <S as Storage>::Catalog>;
type Actuators<S> = ActuatorService<
    <S as Storage>::Actuators,
    <S as Storage>::Devices,
    <S as Storage>::Sensors,
    <S as Storage>::Readings,
    <S as Storage>::Catalog,
>;
type Readings<S> =
    ReadingService<<S as Storage>::Readings, <S as Storage>::Sensors, <S as Storage>::Devices>;

/// Application state shared across all axum handlers.
///
/// Generic over the storage backend to avoid dynamic dispatch.
/// `Clone` is implemented manually so the backend itself does not need to
/// be `Clone`; only the `Arc` wrappers are cloned.
pub struct AppState<S: Storage> {
    pub house_service: Arc<HouseService<S::Houses>>,
    pub room_service: Arc<RoomService<S::Rooms, S::Houses>>,
    pub device_service: Arc<Devices<S>>,
    pub sensor_service: Arc<Sensors<S>>,
    pub actuator_service: Arc<Actuators<S>>,
    pub reading_service: Arc<Readings<S>>,
    pub catalog_service: Arc<CatalogService<S::Catalog>>,
}

impl<S: Storage> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            house_service: Arc::clone(&self.house_service),
            room_service: Arc::clone(&self.room_service),
            device_service: Arc::clone(&self.device_service),
            sensor_service: Arc::clone(&self.sensor_service),
            actuator_service: Arc::clone(&self.actuator_service),
            reading_service: Arc::clone(&self.reading_service),
            catalog_service: Arc::clone(&self.catalog_service),
        }
    }
}

impl<S: Storage> AppState<S> {
    /// Wire every service onto repositories handed out by `storage`.
    pub fn new(
        storage: &S,
        reading_settings: ReadingSettings,
        blind_position_model: SensorModelName,
    ) -> Self {
        Self {
            house_service: Arc::new(HouseService::new(storage.houses())),
            room_service: Arc::new(RoomService::new(storage.rooms(), storage.houses())),
            device_service: Arc::new(DeviceService::new(
                storage.devices(),
                storage.rooms(),
                storage.sensors(),
                storage.catalog(),
            )),
            sensor_service: Arc::new(SensorService::new(
                storage.sensors(),
                storage.devices(),
                storage.catalog(),
            )),
            actuator_service: Arc::new(ActuatorService::new(
                storage.actuators(),
                storage.devices(),
                storage.sensors(),
                storage.readings(),
                storage.catalog(),
                blind_position_model,
            )),
            reading_service: Arc::new(ReadingService::new(
                storage.readings(),
                storage.sensors(),
                storage.devices(),
                reading_settings,
            )),
            catalog_service: Arc::new(CatalogService::new(storage.catalog())),
        }
    }
}
