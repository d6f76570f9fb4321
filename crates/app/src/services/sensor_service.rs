//! Sensor service: use-cases for attaching sensors to devices.

use smarthome_domain::error::{NotFoundError, SmartHomeError, ValidationError};
use smarthome_domain::id::{DeviceId, SensorId, SensorModelName};
use smarthome_domain::sensor::Sensor;

use crate::ports::{CatalogRepository, DeviceRepository, SensorRepository};

/// Application service for sensor operations.
pub struct SensorService<SR, DR, CR> {
    sensors: SR,
    devices: DR,
    catalog: CR,
}

impl<SR, DR, CR> SensorService<SR, DR, CR>
where
    SR: SensorRepository,
    DR: DeviceRepository,
    CR: CatalogRepository,
{
    /// Create a new service backed by the given repositories.
    pub fn new(sensors: SR, devices: DR, catalog: CR) -> Self {
        Self {
            sensors,
            devices,
            catalog,
        }
    }

    /// Attach a sensor of a catalog model to an existing device.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] when the device does not exist,
    /// [`SmartHomeError::Validation`] when the model is not in the catalog,
    /// or a storage error.
    #[tracing::instrument(skip(self))]
    pub async fn add_sensor(
        &self,
        device_id: DeviceId,
        model: SensorModelName,
    ) -> Result<Sensor, SmartHomeError> {
        if self.devices.get_by_id(device_id.clone()).await?.is_none() {
            return Err(NotFoundError::new("Device", device_id).into());
        }
        let known = self
            .catalog
            .sensor_models()
            .await?
            .iter()
            .any(|m| m.name == model);
        if !known {
            return Err(ValidationError::UnknownReference {
                kind: "sensor model",
                name: model.to_string(),
            }
            .into());
        }

        let sensor = self.sensors.create(Sensor::new(model, device_id)).await?;
        tracing::info!(sensor_id = %sensor.id, "sensor added");
        Ok(sensor)
    }

    /// Look up a sensor by id.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] when no sensor with `id` exists,
    /// or a storage error from the repository.
    pub async fn get_sensor(&self, id: SensorId) -> Result<Sensor, SmartHomeError> {
        self.sensors
            .get_by_id(id.clone())
            .await?
            .ok_or_else(|| NotFoundError::new("Sensor", id).into())
    }

    /// List the sensors of an existing device.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] when the device does not exist,
    /// or a storage error from the repositories.
    pub async fn list_sensors_of_device(
        &self,
        device_id: DeviceId,
    ) -> Result<Vec<Sensor>, SmartHomeError> {
        if self.devices.get_by_id(device_id.clone()).await?.is_none() {
            return Err(NotFoundError::new("Device", device_id).into());
        }
        self.sensors.find_by_device(device_id).await
    }
}
