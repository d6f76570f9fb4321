//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`SmartHomeError`] via `#[from]`.

use std::fmt;

/// Top-level error returned by domain constructors, services and ports.
#[derive(Debug, thiserror::Error)]
pub enum SmartHomeError {
    /// A value failed its format or range invariant.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// Well-formed input that cannot be honoured in the current state.
    #[error("constraint violated")]
    Constraint(#[from] ConstraintError),

    /// The referenced aggregate does not exist.
    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// The persistence layer failed.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Format and range violations raised when building value objects.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} must not be blank")]
    Blank(&'static str),

    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),

    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),

    #[error("{0} must be strictly positive, got {1}")]
    NotPositive(&'static str, f64),

    #[error("unsupported country {0:?}")]
    UnknownCountry(String),

    #[error("zip code {zip_code:?} does not match the format of {country}")]
    InvalidZipCode { zip_code: String, country: String },

    #[error("invalid timestamp {0:?}")]
    InvalidTimestamp(String),

    #[error("lower limit must be strictly below upper limit")]
    InvalidLimits,

    #[error("value {value} is outside [{lower}, {upper}]")]
    ValueOutOfRange { value: f64, lower: f64, upper: f64 },

    #[error("value {0} must be an integer")]
    NotAnInteger(f64),

    #[error("unknown {kind} {name:?}")]
    UnknownReference { kind: &'static str, name: String },

    #[error("actuator model {model} is a {expected}, not a {given}")]
    ActuatorTypeMismatch {
        model: String,
        expected: String,
        given: &'static str,
    },
}

/// State or cross-field violations on otherwise well-formed input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConstraintError {
    #[error("period start must be before its end and the end must not be in the future")]
    InvalidPeriod,

    #[error("{entity} {id} already exists")]
    AlreadyExists { entity: &'static str, id: String },

    #[error("device {0} is already deactivated")]
    AlreadyDeactivated(String),

    #[error("device {0} is not active")]
    DeviceInactive(String),

    #[error("actuator {id} is not a {expected}")]
    WrongActuatorKind { id: String, expected: &'static str },

    #[error("device {device_id} has no sensor of model {model}")]
    MissingSensor { device_id: String, model: String },
}

/// Lookup miss for an aggregate identified by `id`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

impl NotFoundError {
    #[must_use]
    pub fn new(entity: &'static str, id: impl fmt::Display) -> Self {
        Self {
            entity,
            id: id.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_convert_validation_error_via_from() {
        let err: SmartHomeError = ValidationError::Blank("name").into();
        assert!(matches!(
            err,
            SmartHomeError::Validation(ValidationError::Blank("name"))
        ));
    }

    #[test]
    fn should_render_not_found_message() {
        let err = NotFoundError::new("Device", "abc");
        assert_eq!(err.to_string(), "Device abc not found");
    }

    #[test]
    fn should_render_constraint_message_with_identifier() {
        let err = ConstraintError::AlreadyDeactivated("dev-1".to_string());
        assert_eq!(err.to_string(), "device dev-1 is already deactivated");
    }
}
