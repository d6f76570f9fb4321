//! Sensor: a measuring element of a device, of a given catalog model.

use crate::id::{DeviceId, SensorId, SensorModelName};

/// A sensor attached to a device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sensor {
    pub id: SensorId,
    pub model: SensorModelName,
    pub device_id: DeviceId,
}

impl Sensor {
    /// Create a sensor with a freshly generated id.
    #[must_use]
    pub fn new(model: SensorModelName, device_id: DeviceId) -> Self {
        Self {
            id: SensorId::new(),
            model,
            device_id,
        }
    }
}
