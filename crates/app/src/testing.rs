//! In-memory repositories shared by the service tests.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

use smarthome_domain::actuator::Actuator;
use smarthome_domain::catalog::{ActuatorModel, ActuatorType, Catalog, DeviceType, SensorModel, SensorType};
use smarthome_domain::device::Device;
use smarthome_domain::error::SmartHomeError;
use smarthome_domain::house::House;
use smarthome_domain::id::{
    ActuatorId, ActuatorModelName, ActuatorTypeName, DeviceId, DeviceTypeName, HouseId, ReadingId,
    RoomId, SensorId, SensorModelName,
};
use smarthome_domain::period::Period;
use smarthome_domain::reading::Reading;
use smarthome_domain::room::Room;
use smarthome_domain::sensor::Sensor;

use crate::ports::{
    ActuatorRepository, CatalogRepository, DeviceRepository, HouseRepository, ReadingRepository,
    RoomRepository, SensorRepository,
};

#[derive(Default)]
struct Tables {
    houses: HashMap<HouseId, House>,
    rooms: HashMap<RoomId, Room>,
    devices: HashMap<DeviceId, Device>,
    sensors: HashMap<SensorId, Sensor>,
    actuators: HashMap<ActuatorId, Actuator>,
    readings: HashMap<ReadingId, Reading>,
    catalog: Catalog,
}

/// One store implementing every repository port; clones share the tables.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<Mutex<Tables>>,
}

fn sorted_by_time(mut readings: Vec<Reading>) -> Vec<Reading> {
    readings.sort_by_key(|r| r.recorded_at);
    readings
}

impl HouseRepository for InMemoryStore {
    fn create(&self, house: House) -> impl Future<Output = Result<House, SmartHomeError>> + Send {
        let mut tables = self.tables.lock().unwrap();
        tables.houses.insert(house.id.clone(), house.clone());
        async { Ok(house) }
    }

    fn get_by_id(
        &self,
        id: HouseId,
    ) -> impl Future<Output = Result<Option<House>, SmartHomeError>> + Send {
        let tables = self.tables.lock().unwrap();
        let result = tables.houses.get(&id).cloned();
        async { Ok(result) }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<House>, SmartHomeError>> + Send {
        let tables = self.tables.lock().unwrap();
        let result: Vec<House> = tables.houses.values().cloned().collect();
        async { Ok(result) }
    }

    fn update(&self, house: House) -> impl Future<Output = Result<House, SmartHomeError>> + Send {
        let mut tables = self.tables.lock().unwrap();
        tables.houses.insert(house.id.clone(), house.clone());
        async { Ok(house) }
    }
}

impl RoomRepository for InMemoryStore {
    fn create(&self, room: Room) -> impl Future<Output = Result<Room, SmartHomeError>> + Send {
        let mut tables = self.tables.lock().unwrap();
        tables.rooms.insert(room.id.clone(), room.clone());
        async { Ok(room) }
    }

    fn get_by_id(
        &self,
        id: RoomId,
    ) -> impl Future<Output = Result<Option<Room>, SmartHomeError>> + Send {
        let tables = self.tables.lock().unwrap();
        let result = tables.rooms.get(&id).cloned();
        async { Ok(result) }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Room>, SmartHomeError>> + Send {
        let tables = self.tables.lock().unwrap();
        let result: Vec<Room> = tables.rooms.values().cloned().collect();
        async { Ok(result) }
    }

    fn find_by_house(
        &self,
        house_id: HouseId,
    ) -> impl Future<Output = Result<Vec<Room>, SmartHomeError>> + Send {
        let tables = self.tables.lock().unwrap();
        let result: Vec<Room> = tables
            .rooms
            .values()
            .filter(|r| r.house_id == house_id)
            .cloned()
            .collect();
        async { Ok(result) }
    }
}

impl DeviceRepository for InMemoryStore {
    fn create(&self, device: Device) -> impl Future<Output = Result<Device, SmartHomeError>> + Send {
        let mut tables = self.tables.lock().unwrap();
        tables.devices.insert(device.id.clone(), device.clone());
        async { Ok(device) }
    }

    fn get_by_id(
        &self,
        id: DeviceId,
    ) -> impl Future<Output = Result<Option<Device>, SmartHomeError>> + Send {
        let tables = self.tables.lock().unwrap();
        let result = tables.devices.get(&id).cloned();
        async { Ok(result) }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Device>, SmartHomeError>> + Send {
        let tables = self.tables.lock().unwrap();
        let result: Vec<Device> = tables.devices.values().cloned().collect();
        async { Ok(result) }
    }

    fn update(&self, device: Device) -> impl Future<Output = Result<Device, SmartHomeError>> + Send {
        let mut tables = self.tables.lock().unwrap();
        tables.devices.insert(device.id.clone(), device.clone());
        async { Ok(device) }
    }

    fn find_by_room(
        &self,
        room_id: RoomId,
    ) -> impl Future<Output = Result<Vec<Device>, SmartHomeError>> + Send {
        let tables = self.tables.lock().unwrap();
        let result: Vec<Device> = tables
            .devices
            .values()
            .filter(|d| d.room_id == room_id)
            .cloned()
            .collect();
        async { Ok(result) }
    }

    fn find_by_type(
        &self,
        device_type: DeviceTypeName,
    ) -> impl Future<Output = Result<Vec<Device>, SmartHomeError>> + Send {
        let tables = self.tables.lock().unwrap();
        let result: Vec<Device> = tables
            .devices
            .values()
            .filter(|d| d.device_type == device_type)
            .cloned()
            .collect();
        async { Ok(result) }
    }
}

impl SensorRepository for InMemoryStore {
    fn create(&self, sensor: Sensor) -> impl Future<Output = Result<Sensor, SmartHomeError>> + Send {
        let mut tables = self.tables.lock().unwrap();
        tables.sensors.insert(sensor.id.clone(), sensor.clone());
        async { Ok(sensor) }
    }

    fn get_by_id(
        &self,
        id: SensorId,
    ) -> impl Future<Output = Result<Option<Sensor>, SmartHomeError>> + Send {
        let tables = self.tables.lock().unwrap();
        let result = tables.sensors.get(&id).cloned();
        async { Ok(result) }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Sensor>, SmartHomeError>> + Send {
        let tables = self.tables.lock().unwrap();
        let result: Vec<Sensor> = tables.sensors.values().cloned().collect();
        async { Ok(result) }
    }

    fn find_by_device(
        &self,
        device_id: DeviceId,
    ) -> impl Future<Output = Result<Vec<Sensor>, SmartHomeError>> + Send {
        let tables = self.tables.lock().unwrap();
        let result: Vec<Sensor> = tables
            .sensors
            .values()
            .filter(|s| s.device_id == device_id)
            .cloned()
            .collect();
        async { Ok(result) }
    }

    fn find_by_device_and_model(
        &self,
        device_id: DeviceId,
        model: SensorModelName,
    ) -> impl Future<Output = Result<Vec<Sensor>, SmartHomeError>> + Send {
        let tables = self.tables.lock().unwrap();
        let result: Vec<Sensor> = tables
            .sensors
            .values()
            .filter(|s| s.device_id == device_id && s.model == model)
            .cloned()
            .collect();
        async { Ok(result) }
    }
}

impl ActuatorRepository for InMemoryStore {
    fn create(
        &self,
        actuator: Actuator,
    ) -> impl Future<Output = Result<Actuator, SmartHomeError>> + Send {
        let mut tables = self.tables.lock().unwrap();
        tables.actuators.insert(actuator.id.clone(), actuator.clone());
        async { Ok(actuator) }
    }

    fn get_by_id(
        &self,
        id: ActuatorId,
    ) -> impl Future<Output = Result<Option<Actuator>, SmartHomeError>> + Send {
        let tables = self.tables.lock().unwrap();
        let result = tables.actuators.get(&id).cloned();
        async { Ok(result) }
    }

    fn find_by_device(
        &self,
        device_id: DeviceId,
    ) -> impl Future<Output = Result<Vec<Actuator>, SmartHomeError>> + Send {
        let tables = self.tables.lock().unwrap();
        let result: Vec<Actuator> = tables
            .actuators
            .values()
            .filter(|a| a.device_id == device_id)
            .cloned()
            .collect();
        async { Ok(result) }
    }
}

impl ReadingRepository for InMemoryStore {
    fn create(&self, reading: Reading) -> impl Future<Output = Result<Reading, SmartHomeError>> + Send {
        let mut tables = self.tables.lock().unwrap();
        tables.readings.insert(reading.id.clone(), reading.clone());
        async { Ok(reading) }
    }

    fn get_by_id(
        &self,
        id: ReadingId,
    ) -> impl Future<Output = Result<Option<Reading>, SmartHomeError>> + Send {
        let tables = self.tables.lock().unwrap();
        let result = tables.readings.get(&id).cloned();
        async { Ok(result) }
    }

    fn find_ids_by_sensor_in_period(
        &self,
        sensor_id: SensorId,
        period: Period,
    ) -> impl Future<Output = Result<Vec<ReadingId>, SmartHomeError>> + Send {
        let tables = self.tables.lock().unwrap();
        let matching: Vec<Reading> = tables
            .readings
            .values()
            .filter(|r| r.sensor_id == sensor_id && period.contains(r.recorded_at))
            .cloned()
            .collect();
        let result: Vec<ReadingId> = sorted_by_time(matching).into_iter().map(|r| r.id).collect();
        async { Ok(result) }
    }

    fn find_by_sensor_in_period(
        &self,
        sensor_id: SensorId,
        period: Period,
    ) -> impl Future<Output = Result<Vec<Reading>, SmartHomeError>> + Send {
        let tables = self.tables.lock().unwrap();
        let matching: Vec<Reading> = tables
            .readings
            .values()
            .filter(|r| r.sensor_id == sensor_id && period.contains(r.recorded_at))
            .cloned()
            .collect();
        let result = sorted_by_time(matching);
        async { Ok(result) }
    }

    fn find_latest_by_sensor(
        &self,
        sensor_id: SensorId,
    ) -> impl Future<Output = Result<Option<Reading>, SmartHomeError>> + Send {
        let tables = self.tables.lock().unwrap();
        let result = tables
            .readings
            .values()
            .filter(|r| r.sensor_id == sensor_id)
            .max_by_key(|r| r.recorded_at)
            .cloned();
        async { Ok(result) }
    }
}

impl CatalogRepository for InMemoryStore {
    fn save(&self, catalog: Catalog) -> impl Future<Output = Result<(), SmartHomeError>> + Send {
        let mut tables = self.tables.lock().unwrap();
        tables.catalog = catalog;
        async { Ok(()) }
    }

    fn device_types(&self) -> impl Future<Output = Result<Vec<DeviceType>, SmartHomeError>> + Send {
        let tables = self.tables.lock().unwrap();
        let result = tables.catalog.device_types.clone();
        async { Ok(result) }
    }

    fn sensor_types(&self) -> impl Future<Output = Result<Vec<SensorType>, SmartHomeError>> + Send {
        let tables = self.tables.lock().unwrap();
        let result = tables.catalog.sensor_types.clone();
        async { Ok(result) }
    }

    fn sensor_models(
        &self,
    ) -> impl Future<Output = Result<Vec<SensorModel>, SmartHomeError>> + Send {
        let tables = self.tables.lock().unwrap();
        let result = tables.catalog.sensor_models.clone();
        async { Ok(result) }
    }

    fn actuator_types(
        &self,
    ) -> impl Future<Output = Result<Vec<ActuatorType>, SmartHomeError>> + Send {
        let tables = self.tables.lock().unwrap();
        let result = tables.catalog.actuator_types.clone();
        async { Ok(result) }
    }

    fn actuator_models(
        &self,
    ) -> impl Future<Output = Result<Vec<ActuatorModel>, SmartHomeError>> + Send {
        let tables = self.tables.lock().unwrap();
        let result = tables.catalog.actuator_models.clone();
        async { Ok(result) }
    }
}

/// Catalog used across service tests.
pub fn sample_catalog() -> Catalog {
    let temperature = SensorType::new("Temperature", "Celsius").unwrap();
    let power = SensorType::new("PowerConsumption", "Watt").unwrap();
    let position = SensorType::new("Position", "Percent").unwrap();
    Catalog {
        device_types: ["Thermostat", "GridPowerMeter", "PowerSourcePowerMeter", "BlindRoller"]
            .into_iter()
            .map(|name| DeviceType {
                name: DeviceTypeName::parse(name).unwrap(),
            })
            .collect(),
        sensor_models: vec![
            SensorModel {
                name: SensorModelName::parse("SensorOfTemperature").unwrap(),
                sensor_type: temperature.id.clone(),
            },
            SensorModel {
                name: SensorModelName::parse("SensorOfPowerConsumption").unwrap(),
                sensor_type: power.id.clone(),
            },
            SensorModel {
                name: SensorModelName::parse("SensorOfScalePercentage").unwrap(),
                sensor_type: position.id.clone(),
            },
        ],
        sensor_types: vec![temperature, power, position],
        actuator_types: ["BlindRoller", "OnOffSwitch", "DecimalLimiter"]
            .into_iter()
            .map(|name| ActuatorType {
                name: ActuatorTypeName::parse(name).unwrap(),
            })
            .collect(),
        actuator_models: [
            ("BlindRollerActuator", "BlindRoller"),
            ("SwitchActuator", "OnOffSwitch"),
            ("DecimalLimiterActuator", "DecimalLimiter"),
        ]
        .into_iter()
        .map(|(name, actuator_type)| ActuatorModel {
            name: ActuatorModelName::parse(name).unwrap(),
            actuator_type: ActuatorTypeName::parse(actuator_type).unwrap(),
        })
        .collect(),
    }
}

/// Store preloaded with [`sample_catalog`].
pub fn store_with_catalog() -> InMemoryStore {
    let store = InMemoryStore::default();
    store.tables.lock().unwrap().catalog = sample_catalog();
    store
}
