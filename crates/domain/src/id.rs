//! Typed identifier newtypes.
//!
//! Every identifier is a non-blank string. Aggregates whose identity is
//! generated by the system ([`RoomId`], [`DeviceId`], …) use UUID v4 text;
//! catalog entries and houses are identified by their name.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

macro_rules! define_name {
    ($(#[doc = $doc:expr])* $name:ident, $label:literal) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Validate and wrap `value`.
            ///
            /// # Errors
            ///
            /// Returns [`ValidationError::Blank`] when `value` is empty or whitespace.
            pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
                let value = value.into();
                if value.trim().is_empty() {
                    return Err(ValidationError::Blank($label));
                }
                Ok(Self(value))
            }

            /// Borrow the inner string.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::parse(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

macro_rules! define_id {
    ($(#[doc = $doc:expr])* $name:ident, $label:literal) => {
        define_name!($(#[doc = $doc])* $name, $label);

        impl Default for $name {
            fn default() -> Self {
                Self(uuid::Uuid::new_v4().to_string())
            }
        }

        impl $name {
            /// Generate a new random identifier.
            #[must_use]
            pub fn new() -> Self {
                Self::default()
            }
        }
    };
}

define_name!(
    /// Identity of a [`House`](crate::house::House): its name.
    HouseId,
    "house id"
);

define_id!(
    /// Unique identifier for a [`Room`](crate::room::Room).
    RoomId,
    "room id"
);

define_id!(
    /// Unique identifier for a [`Device`](crate::device::Device).
    DeviceId,
    "device id"
);

define_id!(
    /// Unique identifier for a [`Sensor`](crate::sensor::Sensor).
    SensorId,
    "sensor id"
);

define_id!(
    /// Unique identifier for an [`Actuator`](crate::actuator::Actuator).
    ActuatorId,
    "actuator id"
);

define_id!(
    /// Unique identifier for a [`Reading`](crate::reading::Reading).
    ReadingId,
    "reading id"
);

define_name!(
    /// Name of a [`DeviceType`](crate::catalog::DeviceType).
    DeviceTypeName,
    "device type name"
);

define_name!(
    /// Identity of a [`SensorType`](crate::catalog::SensorType): name followed by unit.
    SensorTypeId,
    "sensor type id"
);

define_name!(
    /// Name of a [`SensorModel`](crate::catalog::SensorModel).
    SensorModelName,
    "sensor model name"
);

define_name!(
    /// Name of an [`ActuatorType`](crate::catalog::ActuatorType).
    ActuatorTypeName,
    "actuator type name"
);

define_name!(
    /// Name of an [`ActuatorModel`](crate::catalog::ActuatorModel).
    ActuatorModelName,
    "actuator model name"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_generate_unique_ids_when_called_twice() {
        let a = DeviceId::new();
        let b = DeviceId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn should_roundtrip_through_display_and_from_str() {
        let id = RoomId::new();
        let parsed: RoomId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn should_reject_blank_identifier() {
        assert_eq!(
            DeviceId::parse("   "),
            Err(ValidationError::Blank("device id"))
        );
        assert_eq!(HouseId::parse(""), Err(ValidationError::Blank("house id")));
    }

    #[test]
    fn should_accept_non_uuid_text() {
        let id = SensorId::parse("sensor-1").unwrap();
        assert_eq!(id.as_str(), "sensor-1");
    }

    #[test]
    fn should_serialize_transparently() {
        let id = SensorModelName::parse("SensorOfTemperature").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"SensorOfTemperature\"");
    }

    #[test]
    fn should_reject_blank_identifier_when_deserializing() {
        let result: Result<ReadingId, _> = serde_json::from_str("\"  \"");
        assert!(result.is_err());
    }
}
