//! Actuator: an element of a device that accepts commands.
//!
//! What an actuator accepts depends on its [`ActuatorConfig`]: switches take
//! `0` or `1`, blind rollers a percentage, limiters a value within limits.

use serde::{Deserialize, Serialize};

use crate::error::{SmartHomeError, ValidationError};
use crate::id::{ActuatorId, ActuatorModelName, DeviceId};

/// Behaviour of an actuator and the limits it enforces.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActuatorConfig {
    OnOffSwitch,
    BlindRoller,
    Limiter { lower: i64, upper: i64 },
    DecimalLimiter { lower: f64, upper: f64, precision: u32 },
}

impl ActuatorConfig {
    /// Short name of the configuration kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::OnOffSwitch => "on_off_switch",
            Self::BlindRoller => "blind_roller",
            Self::Limiter { .. } => "limiter",
            Self::DecimalLimiter { .. } => "decimal_limiter",
        }
    }

    /// Catalog actuator type an actuator with this configuration belongs to.
    #[must_use]
    pub fn actuator_type(&self) -> &'static str {
        match self {
            Self::OnOffSwitch => "OnOffSwitch",
            Self::BlindRoller => "BlindRoller",
            Self::Limiter { .. } => "Limiter",
            Self::DecimalLimiter { .. } => "DecimalLimiter",
        }
    }

    /// Check that the limits are consistent.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidLimits`] unless `lower < upper`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let ordered = match *self {
            Self::OnOffSwitch | Self::BlindRoller => true,
            Self::Limiter { lower, upper } => lower < upper,
            Self::DecimalLimiter { lower, upper, .. } => lower < upper,
        };
        if ordered {
            Ok(())
        } else {
            Err(ValidationError::InvalidLimits)
        }
    }

    /// Check `value` against this configuration and return the value the
    /// actuator will apply.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::ValueOutOfRange`] when the value is outside
    /// the accepted range and [`ValidationError::NotAnInteger`] when an
    /// integer is required.
    #[allow(clippy::cast_precision_loss)]
    pub fn accept(&self, value: f64) -> Result<f64, ValidationError> {
        match *self {
            Self::OnOffSwitch => {
                if value == 0.0 || value == 1.0 {
                    Ok(value)
                } else {
                    Err(ValidationError::ValueOutOfRange {
                        value,
                        lower: 0.0,
                        upper: 1.0,
                    })
                }
            }
            Self::BlindRoller => within(value, 0.0, 100.0),
            Self::Limiter { lower, upper } => {
                if value.fract() != 0.0 {
                    return Err(ValidationError::NotAnInteger(value));
                }
                within(value, lower as f64, upper as f64)
            }
            Self::DecimalLimiter {
                lower,
                upper,
                precision,
            } => {
                let value = within(value, lower, upper)?;
                let digits = i32::try_from(precision)
                    .map_or(MAX_DECIMAL_PRECISION, |p| p.min(MAX_DECIMAL_PRECISION));
                let scale = 10_f64.powi(digits);
                Ok((value * scale).round() / scale)
            }
        }
    }
}

/// Decimal digits an `f64` carries reliably; finer precisions are capped.
const MAX_DECIMAL_PRECISION: i32 = 15;

fn within(value: f64, lower: f64, upper: f64) -> Result<f64, ValidationError> {
    if (lower..=upper).contains(&value) {
        Ok(value)
    } else {
        Err(ValidationError::ValueOutOfRange {
            value,
            lower,
            upper,
        })
    }
}

/// An actuator attached to a device.
#[derive(Debug, Clone, PartialEq)]
pub struct Actuator {
    pub id: ActuatorId,
    pub model: ActuatorModelName,
    pub device_id: DeviceId,
    pub config: ActuatorConfig,
}

impl Actuator {
    /// Create an actuator with a freshly generated id.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::Validation`] when the configuration limits
    /// are inconsistent.
    pub fn new(
        model: ActuatorModelName,
        device_id: DeviceId,
        config: ActuatorConfig,
    ) -> Result<Self, SmartHomeError> {
        config.validate()?;
        Ok(Self {
            id: ActuatorId::new(),
            model,
            device_id,
            config,
        })
    }

    #[must_use]
    pub fn is_blind_roller(&self) -> bool {
        matches!(self.config, ActuatorConfig::BlindRoller)
    }
}
