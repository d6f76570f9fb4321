//! Actuator service: use-cases for attaching and operating actuators.
//!
//! Blind rollers have no state of their own: their position is recorded as
//! a reading on the device's blind-position sensor, and the current
//! position is the latest such reading.

use smarthome_domain::actuator::{Actuator, ActuatorConfig};
use smarthome_domain::error::{ConstraintError, NotFoundError, SmartHomeError, ValidationError};
use smarthome_domain::id::{ActuatorId, ActuatorModelName, DeviceId, SensorModelName};
use smarthome_domain::reading::Reading;
use smarthome_domain::sensor::Sensor;
use smarthome_domain::time;

use crate::ports::{
    ActuatorRepository, CatalogRepository, DeviceRepository, ReadingRepository, SensorRepository,
};

/// Application service for actuator operations.
pub struct ActuatorService<AR, DR, SR, RR, CR> {
    actuators: AR,
    devices: DR,
    sensors: SR,
    readings: RR,
    catalog: CR,
    blind_position_model: SensorModelName,
}

impl<AR, DR, SR, RR, CR> ActuatorService<AR, DR, SR, RR, CR>
where
    AR: ActuatorRepository,
    DR: DeviceRepository,
    SR: SensorRepository,
    RR: ReadingRepository,
    CR: CatalogRepository,
{
    /// Create a new service backed by the given repositories.
    ///
    /// `blind_position_model` is the sensor model that records blind
    /// roller positions.
    pub fn new(
        actuators: AR,
        devices: DR,
        sensors: SR,
        readings: RR,
        catalog: CR,
        blind_position_model: SensorModelName,
    ) -> Self {
        Self {
            actuators,
            devices,
            sensors,
            readings,
            catalog,
            blind_position_model,
        }
    }

    /// Attach an actuator of a catalog model to an existing device.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] when the device does not exist,
    /// [`SmartHomeError::Validation`] when the model is not in the catalog,
    /// the configuration is of another actuator type than the model, or the
    /// limits are inconsistent, or a storage error.
    #[tracing::instrument(skip(self))]
    pub async fn add_actuator(
        &self,
        device_id: DeviceId,
        model: ActuatorModelName,
        config: ActuatorConfig,
    ) -> Result<Actuator, SmartHomeError> {
        if self.devices.get_by_id(device_id.clone()).await?.is_none() {
            return Err(NotFoundError::new("Device", device_id).into());
        }
        let Some(entry) = self
            .catalog
            .actuator_models()
            .await?
            .into_iter()
            .find(|m| m.name == model)
        else {
            return Err(ValidationError::UnknownReference {
                kind: "actuator model",
                name: model.to_string(),
            }
            .into());
        };
        if entry.actuator_type.as_str() != config.actuator_type() {
            return Err(ValidationError::ActuatorTypeMismatch {
                model: model.to_string(),
                expected: entry.actuator_type.to_string(),
                given: config.actuator_type(),
            }
            .into());
        }

        let actuator = self
            .actuators
            .create(Actuator::new(model, device_id, config)?)
            .await?;
        tracing::info!(actuator_id = %actuator.id, kind = actuator.config.kind(), "actuator added");
        Ok(actuator)
    }

    /// Look up an actuator by id.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] when no actuator with `id`
    /// exists, or a storage error from the repository.
    pub async fn get_actuator(&self, id: ActuatorId) -> Result<Actuator, SmartHomeError> {
        self.actuators
            .get_by_id(id.clone())
            .await?
            .ok_or_else(|| NotFoundError::new("Actuator", id).into())
    }

    /// List the actuators of an existing device.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] when the device does not exist,
    /// or a storage error from the repositories.
    pub async fn list_actuators_of_device(
        &self,
        device_id: DeviceId,
    ) -> Result<Vec<Actuator>, SmartHomeError> {
        if self.devices.get_by_id(device_id.clone()).await?.is_none() {
            return Err(NotFoundError::new("Device", device_id).into());
        }
        self.actuators.find_by_device(device_id).await
    }

    /// Move a blind roller to `value` percent and record the new position.
    ///
    /// # Errors
    ///
    /// - [`SmartHomeError::NotFound`] when the actuator or its device does
    ///   not exist.
    /// - [`SmartHomeError::Constraint`] when the actuator is not a blind
    ///   roller, its device is inactive, or the device has no
    ///   blind-position sensor.
    /// - [`SmartHomeError::Validation`] when `value` is outside `[0, 100]`.
    #[tracing::instrument(skip(self))]
    pub async fn operate_blind_roller(
        &self,
        id: ActuatorId,
        value: f64,
    ) -> Result<Reading, SmartHomeError> {
        let actuator = self.blind_roller(id).await?;
        self.ensure_device_active(&actuator).await?;
        let value = actuator.config.accept(value)?;
        let sensor = self.position_sensor(&actuator).await?;

        let reading = self
            .readings
            .create(Reading::new(value, sensor.id, time::now()))
            .await?;
        tracing::info!(actuator_id = %actuator.id, value, "blind roller moved");
        Ok(reading)
    }

    /// Send `value` to any actuator and return the value it applies.
    ///
    /// Switches take `0` or `1`, limiters a value within their limits
    /// (decimal limiters round it to their precision). Blind rollers are
    /// moved as by [`ActuatorService::operate_blind_roller`].
    ///
    /// # Errors
    ///
    /// - [`SmartHomeError::NotFound`] when the actuator or its device does
    ///   not exist.
    /// - [`SmartHomeError::Constraint`] when its device is inactive.
    /// - [`SmartHomeError::Validation`] when the configuration rejects
    ///   `value`.
    #[tracing::instrument(skip(self))]
    pub async fn operate(&self, id: ActuatorId, value: f64) -> Result<f64, SmartHomeError> {
        let actuator = self.get_actuator(id).await?;
        if actuator.is_blind_roller() {
            return Ok(self.operate_blind_roller(actuator.id, value).await?.value);
        }
        self.ensure_device_active(&actuator).await?;
        let applied = actuator.config.accept(value)?;
        tracing::info!(actuator_id = %actuator.id, kind = actuator.config.kind(), applied, "actuator operated");
        Ok(applied)
    }

    /// Latest recorded position of a blind roller.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] when the actuator does not exist
    /// or no position has been recorded yet, and
    /// [`SmartHomeError::Constraint`] when the actuator is not a blind
    /// roller or its device has no blind-position sensor.
    pub async fn current_percentage(&self, id: ActuatorId) -> Result<Reading, SmartHomeError> {
        let actuator = self.blind_roller(id).await?;
        let sensor = self.position_sensor(&actuator).await?;
        self.readings
            .find_latest_by_sensor(sensor.id.clone())
            .await?
            .ok_or_else(|| NotFoundError::new("Reading of sensor", sensor.id).into())
    }

    async fn blind_roller(&self, id: ActuatorId) -> Result<Actuator, SmartHomeError> {
        let actuator = self.get_actuator(id).await?;
        if !actuator.is_blind_roller() {
            return Err(ConstraintError::WrongActuatorKind {
                id: actuator.id.to_string(),
                expected: "blind roller",
            }
            .into());
        }
        Ok(actuator)
    }

    async fn ensure_device_active(&self, actuator: &Actuator) -> Result<(), SmartHomeError> {
        let device = self
            .devices
            .get_by_id(actuator.device_id.clone())
            .await?
            .ok_or_else(|| NotFoundError::new("Device", &actuator.device_id))?;
        if !device.is_active() {
            return Err(ConstraintError::DeviceInactive(device.id.to_string()).into());
        }
        Ok(())
    }

    async fn position_sensor(&self, actuator: &Actuator) -> Result<Sensor, SmartHomeError> {
        self.sensors
            .find_by_device_and_model(actuator.device_id.clone(), self.blind_position_model.clone())
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| {
                ConstraintError::MissingSensor {
                    device_id: actuator.device_id.to_string(),
                    model: self.blind_position_model.to_string(),
                }
                .into()
            })
    }
}
