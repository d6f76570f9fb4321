//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `smarthome.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use chrono::TimeDelta;
use serde::Deserialize;

use smarthome_app::services::reading_service::ReadingSettings;
use smarthome_domain::catalog::{
    ActuatorModel, ActuatorType, Catalog, DeviceType, SensorModel, SensorType,
};
use smarthome_domain::error::ValidationError;
use smarthome_domain::id::{
    ActuatorModelName, ActuatorTypeName, DeviceTypeName, SensorModelName, SensorTypeId,
};

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Database settings.
    pub database: DatabaseConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Reading analysis settings.
    pub readings: ReadingsConfig,
    /// Actuator settings.
    pub actuators: ActuatorsConfig,
    /// Catalog seeded at start-up.
    pub catalog: CatalogConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// `SQLite` database configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `SQLite` connection URL or file path.
    pub url: String,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Reading analysis configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ReadingsConfig {
    /// Largest gap, in seconds, between two comparable readings.
    pub delta_seconds: u32,
    pub temperature_model: String,
    pub power_consumption_model: String,
    pub grid_meter_type: String,
    pub power_source_meter_type: String,
}

/// Actuator configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ActuatorsConfig {
    /// Sensor model recording blind roller positions.
    pub blind_position_model: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SensorTypeEntry {
    pub name: String,
    pub unit: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SensorModelEntry {
    pub name: String,
    /// Sensor type id, i.e. name followed by unit.
    pub sensor_type: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ActuatorModelEntry {
    pub name: String,
    pub actuator_type: String,
}

/// Catalog entries as written in the configuration file.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub device_types: Vec<String>,
    pub sensor_types: Vec<SensorTypeEntry>,
    pub sensor_models: Vec<SensorModelEntry>,
    pub actuator_types: Vec<String>,
    pub actuator_models: Vec<ActuatorModelEntry>,
}

impl Config {
    /// Load configuration from `smarthome.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is inconsistent.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("smarthome.toml")?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides(
        &mut self,
        var: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(val) = var("SMARTHOME_HOST") {
            self.server.host = val;
        }
        if let Some(val) = var("SMARTHOME_PORT") {
            self.server.port = parse_override("SMARTHOME_PORT", &val)?;
        }
        if let Some(val) = var("SMARTHOME_BIND") {
            if let Some((host, port)) = val.rsplit_once(':') {
                self.server.host = host.to_string();
                self.server.port = parse_override("SMARTHOME_BIND", port)?;
            }
        }
        if let Some(val) = var("SMARTHOME_DATABASE_URL") {
            self.database.url = val;
        }
        if let Some(val) = var("SMARTHOME_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("SMARTHOME_DELTA_SECONDS") {
            self.readings.delta_seconds = parse_override("SMARTHOME_DELTA_SECONDS", &val)?;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.readings.delta_seconds == 0 {
            return Err(ConfigError::Validation(
                "readings delta must be non-zero".to_string(),
            ));
        }
        self.reading_settings()?;
        self.blind_position_model()?;
        self.catalog()?.validate()?;
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Return the database URL in `sqlx`-compatible format.
    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database.url
    }

    /// Settings of the reading service.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Value`] when a model or type name is blank.
    pub fn reading_settings(&self) -> Result<ReadingSettings, ConfigError> {
        let readings = &self.readings;
        Ok(ReadingSettings {
            delta: TimeDelta::seconds(i64::from(readings.delta_seconds)),
            temperature_model: SensorModelName::parse(readings.temperature_model.as_str())?,
            power_consumption_model: SensorModelName::parse(
                readings.power_consumption_model.as_str(),
            )?,
            grid_meter_type: DeviceTypeName::parse(readings.grid_meter_type.as_str())?,
            power_source_meter_type: DeviceTypeName::parse(
                readings.power_source_meter_type.as_str(),
            )?,
        })
    }

    /// Sensor model recording blind roller positions.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Value`] when the name is blank.
    pub fn blind_position_model(&self) -> Result<SensorModelName, ConfigError> {
        Ok(SensorModelName::parse(
            self.actuators.blind_position_model.as_str(),
        )?)
    }

    /// Build the domain catalog from the configured entries.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Value`] when an entry is blank.
    pub fn catalog(&self) -> Result<Catalog, ConfigError> {
        let entries = &self.catalog;
        Ok(Catalog {
            device_types: entries
                .device_types
                .iter()
                .map(|name| {
                    Ok(DeviceType {
                        name: DeviceTypeName::parse(name.as_str())?,
                    })
                })
                .collect::<Result<_, ValidationError>>()?,
            sensor_types: entries
                .sensor_types
                .iter()
                .map(|entry| SensorType::new(entry.name.as_str(), entry.unit.as_str()))
                .collect::<Result<_, _>>()?,
            sensor_models: entries
                .sensor_models
                .iter()
                .map(|entry| {
                    Ok(SensorModel {
                        name: SensorModelName::parse(entry.name.as_str())?,
                        sensor_type: SensorTypeId::parse(entry.sensor_type.as_str())?,
                    })
                })
                .collect::<Result<_, ValidationError>>()?,
            actuator_types: entries
                .actuator_types
                .iter()
                .map(|name| {
                    Ok(ActuatorType {
                        name: ActuatorTypeName::parse(name.as_str())?,
                    })
                })
                .collect::<Result<_, ValidationError>>()?,
            actuator_models: entries
                .actuator_models
                .iter()
                .map(|entry| {
                    Ok(ActuatorModel {
                        name: ActuatorModelName::parse(entry.name.as_str())?,
                        actuator_type: ActuatorTypeName::parse(entry.actuator_type.as_str())?,
                    })
                })
                .collect::<Result<_, ValidationError>>()?,
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:smarthome.db?mode=rwc".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "smarthomed=info,smarthome=info,tower_http=debug".to_string(),
        }
    }
}

impl Default for ReadingsConfig {
    fn default() -> Self {
        Self {
            delta_seconds: 300,
            temperature_model: "SensorOfTemperature".to_string(),
            power_consumption_model: "SensorOfPowerConsumption".to_string(),
            grid_meter_type: "GridPowerMeter".to_string(),
            power_source_meter_type: "PowerSourcePowerMeter".to_string(),
        }
    }
}

impl Default for ActuatorsConfig {
    fn default() -> Self {
        Self {
            blind_position_model: "SensorOfScalePercentage".to_string(),
        }
    }
}

fn names(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        let sensor_type = |name: &str, unit: &str| SensorTypeEntry {
            name: name.to_string(),
            unit: unit.to_string(),
        };
        let sensor_model = |name: &str, sensor_type: &str| SensorModelEntry {
            name: name.to_string(),
            sensor_type: sensor_type.to_string(),
        };
        let actuator_model = |name: &str, actuator_type: &str| ActuatorModelEntry {
            name: name.to_string(),
            actuator_type: actuator_type.to_string(),
        };
        Self {
            device_types: names(&[
                "Thermostat",
                "Heater",
                "Fan",
                "GridPowerMeter",
                "PowerSourcePowerMeter",
                "BlindRoller",
            ]),
            sensor_types: vec![
                sensor_type("Temperature", "Celsius"),
                sensor_type("Humidity", "Percent"),
                sensor_type("PowerConsumption", "Watt"),
                sensor_type("Position", "Percent"),
            ],
            sensor_models: vec![
                sensor_model("SensorOfTemperature", "TemperatureCelsius"),
                sensor_model("SensorOfHumidity", "HumidityPercent"),
                sensor_model("SensorOfPowerConsumption", "PowerConsumptionWatt"),
                sensor_model("SensorOfScalePercentage", "PositionPercent"),
            ],
            actuator_types: names(&["OnOffSwitch", "BlindRoller", "Limiter", "DecimalLimiter"]),
            actuator_models: vec![
                actuator_model("ActuatorOfOnOffSwitch", "OnOffSwitch"),
                actuator_model("ActuatorOfBlindRoller", "BlindRoller"),
                actuator_model("ActuatorOfLimiter", "Limiter"),
                actuator_model("ActuatorOfDecimalLimiter", "DecimalLimiter"),
            ],
        }
    }
}

fn parse_override<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Validation(format!("{key} has an invalid value {value:?}")))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// A configured name or catalog entry is invalid.
    #[error("invalid configuration value")]
    Value(#[from] ValidationError),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
