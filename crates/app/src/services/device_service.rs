//! Device service: use-cases for installing and retiring devices.

use std::collections::{BTreeMap, HashMap};

use smarthome_domain::device::Device;
use smarthome_domain::error::{NotFoundError, SmartHomeError, ValidationError};
use smarthome_domain::id::{DeviceId, DeviceTypeName, RoomId, SensorModelName};

use crate::ports::{CatalogRepository, DeviceRepository, RoomRepository, SensorRepository};

/// Application service for device operations.
pub struct DeviceService<DR, RR, SR, CR> {
    devices: DR,
    rooms: RR,
    sensors: SR,
    catalog: CR,
}

impl<DR, RR, SR, CR> DeviceService<DR, RR, SR, CR>
where
    DR: DeviceRepository,
    RR: RoomRepository,
    SR: SensorRepository,
    CR: CatalogRepository,
{
    /// Create a new service backed by the given repositories.
    pub fn new(devices: DR, rooms: RR, sensors: SR, catalog: CR) -> Self {
        Self {
            devices,
            rooms,
            sensors,
            catalog,
        }
    }

    /// Install a new, active device in an existing room.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] when the room does not exist,
    /// [`SmartHomeError::Validation`] for a blank name or a device type
    /// missing from the catalog, or a storage error.
    #[tracing::instrument(skip(self, name))]
    pub async fn add_device(
        &self,
        room_id: RoomId,
        name: String,
        device_type: DeviceTypeName,
    ) -> Result<Device, SmartHomeError> {
        if self.rooms.get_by_id(room_id.clone()).await?.is_none() {
            return Err(NotFoundError::new("Room", room_id).into());
        }
        let known = self
            .catalog
            .device_types()
            .await?
            .iter()
            .any(|t| t.name == device_type);
        if !known {
            return Err(ValidationError::UnknownReference {
                kind: "device type",
                name: device_type.to_string(),
            }
            .into());
        }

        let device = Device::builder()
            .name(name)
            .device_type(device_type)
            .room_id(room_id)
            .build()?;
        let device = self.devices.create(device).await?;
        tracing::info!(device_id = %device.id, "device added");
        Ok(device)
    }

    /// Look up a device by id.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] when no device with `id` exists,
    /// or a storage error from the repository.
    pub async fn get_device(&self, id: DeviceId) -> Result<Device, SmartHomeError> {
        self.devices
            .get_by_id(id.clone())
            .await?
            .ok_or_else(|| NotFoundError::new("Device", id).into())
    }

    /// List all devices.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_devices(&self) -> Result<Vec<Device>, SmartHomeError> {
        self.devices.get_all().await
    }

    /// List the devices of an existing room.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] when the room does not exist,
    /// or a storage error from the repository.
    pub async fn list_devices_of_room(&self, room_id: RoomId) -> Result<Vec<Device>, SmartHomeError> {
        if self.rooms.get_by_id(room_id.clone()).await?.is_none() {
            return Err(NotFoundError::new("Room", room_id).into());
        }
        self.devices.find_by_room(room_id).await
    }

    /// Take a device out of service.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] when the device does not exist,
    /// [`SmartHomeError::Constraint`] when it is already inactive, or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn deactivate_device(&self, id: DeviceId) -> Result<Device, SmartHomeError> {
        let mut device = self.get_device(id).await?;
        device.deactivate()?;
        let device = self.devices.update(device).await?;
        tracing::info!(device_id = %device.id, "device deactivated");
        Ok(device)
    }

    /// Group devices by the name of the sensor types they measure.
    ///
    /// A device appears once per group however many sensors of that type it
    /// carries. Types without devices do not appear.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repositories.
    pub async fn devices_by_functionality(
        &self,
    ) -> Result<BTreeMap<String, Vec<DeviceId>>, SmartHomeError> {
        let type_names: HashMap<_, _> = self
            .catalog
            .sensor_types()
            .await?
            .into_iter()
            .map(|t| (t.id, t.name))
            .collect();
        let model_types: HashMap<SensorModelName, String> = self
            .catalog
            .sensor_models()
            .await?
            .into_iter()
            .filter_map(|m| type_names.get(&m.sensor_type).map(|name| (m.name, name.clone())))
            .collect();

        let mut groups: BTreeMap<String, Vec<DeviceId>> = BTreeMap::new();
        for sensor in self.sensors.get_all().await? {
            let Some(type_name) = model_types.get(&sensor.model) else {
                continue;
            };
            let devices = groups.entry(type_name.clone()).or_default();
            if !devices.contains(&sensor.device_id) {
                devices.push(sensor.device_id);
            }
        }
        Ok(groups)
    }
}
