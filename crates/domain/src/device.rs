//! Device: something installed in a room that carries sensors and actuators.

use std::fmt;

use crate::error::{ConstraintError, SmartHomeError, ValidationError};
use crate::id::{DeviceId, DeviceTypeName, RoomId};

/// Whether a device is in service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceStatus {
    #[default]
    Active,
    Inactive,
}

impl DeviceStatus {
    #[must_use]
    pub fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DeviceStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            other => Err(ValidationError::UnknownReference {
                kind: "device status",
                name: other.to_owned(),
            }),
        }
    }
}

/// A device placed in a room.
#[derive(Debug, Clone, PartialEq)]
pub struct Device {
    pub id: DeviceId,
    pub name: String,
    pub device_type: DeviceTypeName,
    pub room_id: RoomId,
    pub status: DeviceStatus,
}

impl Device {
    /// Create a builder for constructing a [`Device`].
    #[must_use]
    pub fn builder() -> DeviceBuilder {
        DeviceBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::Validation`] when `name` is blank.
    pub fn validate(&self) -> Result<(), SmartHomeError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::Blank("device name").into());
        }
        Ok(())
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Take the device out of service.
    ///
    /// # Errors
    ///
    /// Returns [`ConstraintError::AlreadyDeactivated`] if the device is
    /// already inactive.
    pub fn deactivate(&mut self) -> Result<(), ConstraintError> {
        if !self.is_active() {
            return Err(ConstraintError::AlreadyDeactivated(self.id.to_string()));
        }
        self.status = DeviceStatus::Inactive;
        Ok(())
    }
}

/// Step-by-step builder for [`Device`].
#[derive(Debug, Default)]
pub struct DeviceBuilder {
    id: Option<DeviceId>,
    name: Option<String>,
    device_type: Option<DeviceTypeName>,
    room_id: Option<RoomId>,
    status: DeviceStatus,
}

impl DeviceBuilder {
    #[must_use]
    pub fn id(mut self, id: DeviceId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn device_type(mut self, device_type: DeviceTypeName) -> Self {
        self.device_type = Some(device_type);
        self
    }

    #[must_use]
    pub fn room_id(mut self, room_id: RoomId) -> Self {
        self.room_id = Some(room_id);
        self
    }

    #[must_use]
    pub fn status(mut self, status: DeviceStatus) -> Self {
        self.status = status;
        self
    }

    /// Consume the builder, validate, and return a [`Device`].
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::Validation`] if the name is blank or the
    /// device type or room is missing.
    pub fn build(self) -> Result<Device, SmartHomeError> {
        let device_type = self
            .device_type
            .ok_or(ValidationError::Blank("device type"))?;
        let room_id = self.room_id.ok_or(ValidationError::Blank("room id"))?;
        let device = Device {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            device_type,
            room_id,
            status: self.status,
        };
        device.validate()?;
        Ok(device)
    }
}
