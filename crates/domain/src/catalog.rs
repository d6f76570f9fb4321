//! Catalog: reference data for device, sensor and actuator kinds.
//!
//! Entries are loaded once at start-up and only read afterwards. Sensor
//! models point at a sensor type and actuator models at an actuator type;
//! [`Catalog::validate`] checks those references.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::{ActuatorModelName, ActuatorTypeName, DeviceTypeName, SensorModelName, SensorTypeId};

/// Kind of device, e.g. `Thermostat` or `GridPowerMeter`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceType {
    pub name: DeviceTypeName,
}

/// Quantity measured by sensors, with its unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SensorType {
    pub id: SensorTypeId,
    pub name: String,
    pub unit: String,
}

impl SensorType {
    /// Build a sensor type; its identity is the name followed by the unit.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Blank`] when the name or unit is blank.
    pub fn new(name: impl Into<String>, unit: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        let unit = unit.into();
        if name.trim().is_empty() {
            return Err(ValidationError::Blank("sensor type name"));
        }
        if unit.trim().is_empty() {
            return Err(ValidationError::Blank("sensor type unit"));
        }
        Ok(Self {
            id: SensorTypeId::parse(format!("{name}{unit}"))?,
            name,
            unit,
        })
    }
}

/// Concrete sensor model measuring one sensor type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorModel {
    pub name: SensorModelName,
    pub sensor_type: SensorTypeId,
}

/// Kind of actuator, e.g. `BlindRoller`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActuatorType {
    pub name: ActuatorTypeName,
}

/// Concrete actuator model of one actuator type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActuatorModel {
    pub name: ActuatorModelName,
    pub actuator_type: ActuatorTypeName,
}

/// The whole catalog, as loaded at start-up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pub device_types: Vec<DeviceType>,
    pub sensor_types: Vec<SensorType>,
    pub sensor_models: Vec<SensorModel>,
    pub actuator_types: Vec<ActuatorType>,
    pub actuator_models: Vec<ActuatorModel>,
}

impl Catalog {
    /// Check that every model references a known type.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownReference`] for the first dangling
    /// reference.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let sensor_types: HashSet<&SensorTypeId> = self.sensor_types.iter().map(|t| &t.id).collect();
        if let Some(model) = self
            .sensor_models
            .iter()
            .find(|m| !sensor_types.contains(&m.sensor_type))
        {
            return Err(ValidationError::UnknownReference {
                kind: "sensor type",
                name: model.sensor_type.to_string(),
            });
        }

        let actuator_types: HashSet<&ActuatorTypeName> =
            self.actuator_types.iter().map(|t| &t.name).collect();
        if let Some(model) = self
            .actuator_models
            .iter()
            .find(|m| !actuator_types.contains(&m.actuator_type))
        {
            return Err(ValidationError::UnknownReference {
                kind: "actuator type",
                name: model.actuator_type.to_string(),
            });
        }

        Ok(())
    }
}
