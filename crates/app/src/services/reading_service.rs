//! Reading service: record readings and analyse them over periods.

use chrono::TimeDelta;

use smarthome_domain::analysis;
use smarthome_domain::error::{NotFoundError, SmartHomeError};
use smarthome_domain::id::{DeviceId, DeviceTypeName, ReadingId, SensorId, SensorModelName};
use smarthome_domain::period::Period;
use smarthome_domain::reading::Reading;
use smarthome_domain::sensor::Sensor;
use smarthome_domain::time::{self, Timestamp};

use crate::ports::{DeviceRepository, ReadingRepository, SensorRepository};

/// Tunables for reading analysis.
#[derive(Debug, Clone)]
pub struct ReadingSettings {
    /// Largest gap between two comparable readings, and the slice length
    /// used for peak power consumption.
    pub delta: TimeDelta,
    /// Sensor model measuring temperature.
    pub temperature_model: SensorModelName,
    /// Sensor model measuring power consumption.
    pub power_consumption_model: SensorModelName,
    /// Device type of the grid power meter.
    pub grid_meter_type: DeviceTypeName,
    /// Device type of power source meters.
    pub power_source_meter_type: DeviceTypeName,
}

/// Application service for reading operations.
pub struct ReadingService<RR, SR, DR> {
    readings: RR,
    sensors: SR,
    devices: DR,
    settings: ReadingSettings,
}

impl<RR, SR, DR> ReadingService<RR, SR, DR>
where
    RR: ReadingRepository,
    SR: SensorRepository,
    DR: DeviceRepository,
{
    /// Create a new service backed by the given repositories.
    pub fn new(readings: RR, sensors: SR, devices: DR, settings: ReadingSettings) -> Self {
        Self {
            readings,
            sensors,
            devices,
            settings,
        }
    }

    /// Record a value for an existing sensor, timestamped now unless
    /// `recorded_at` is given.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] when the sensor does not exist,
    /// or a storage error from the repositories.
    #[tracing::instrument(skip(self))]
    pub async fn add_reading(
        &self,
        sensor_id: SensorId,
        value: f64,
        recorded_at: Option<Timestamp>,
    ) -> Result<Reading, SmartHomeError> {
        if self.sensors.get_by_id(sensor_id.clone()).await?.is_none() {
            return Err(NotFoundError::new("Sensor", sensor_id).into());
        }
        let reading = Reading::new(value, sensor_id, recorded_at.unwrap_or_else(time::now));
        let reading = self.readings.create(reading).await?;
        tracing::debug!(reading_id = %reading.id, "reading recorded");
        Ok(reading)
    }

    /// Look up a reading by id.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] when no reading with `id`
    /// exists, or a storage error from the repository.
    pub async fn get_reading(&self, id: ReadingId) -> Result<Reading, SmartHomeError> {
        self.readings
            .get_by_id(id.clone())
            .await?
            .ok_or_else(|| NotFoundError::new("Reading", id).into())
    }

    /// Ids of the readings taken by any sensor of a device within `period`.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] when the device does not exist,
    /// or a storage error from the repositories.
    pub async fn readings_of_device(
        &self,
        device_id: DeviceId,
        period: Period,
    ) -> Result<Vec<ReadingId>, SmartHomeError> {
        if self.devices.get_by_id(device_id.clone()).await?.is_none() {
            return Err(NotFoundError::new("Device", device_id).into());
        }
        let mut ids = Vec::new();
        for sensor in self.sensors.find_by_device(device_id).await? {
            ids.extend(
                self.readings
                    .find_ids_by_sensor_in_period(sensor.id, period)
                    .await?,
            );
        }
        Ok(ids)
    }

    /// Largest temperature difference between two devices within `period`,
    /// considering only reading pairs taken at most the configured delta
    /// apart.
    ///
    /// Returns `None` when either device has no temperature readings in the
    /// period or no pair is close enough in time.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repositories.
    #[tracing::instrument(skip(self))]
    pub async fn max_temperature_difference(
        &self,
        left: DeviceId,
        right: DeviceId,
        period: Period,
    ) -> Result<Option<f64>, SmartHomeError> {
        let model = self.settings.temperature_model.clone();
        let left = self.device_readings(left, model.clone(), period).await?;
        let right = self.device_readings(right, model, period).await?;
        let result = analysis::max_instant_difference(&left, &right, self.settings.delta);
        tracing::debug!(
            left = left.len(),
            right = right.len(),
            ?result,
            "compared temperatures"
        );
        Ok(result)
    }

    /// Highest total power consumption over `period`, cut into slices of
    /// the configured delta.
    ///
    /// The grid power meter (the first device of that type) and every power
    /// source meter contribute. Returns `None` without a grid power meter or
    /// when nothing was consumed.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repositories.
    #[tracing::instrument(skip(self))]
    pub async fn peak_power_consumption(
        &self,
        period: Period,
    ) -> Result<Option<f64>, SmartHomeError> {
        let Some(grid) = self
            .devices
            .find_by_type(self.settings.grid_meter_type.clone())
            .await?
            .into_iter()
            .next()
        else {
            tracing::debug!("no grid power meter installed");
            return Ok(None);
        };
        let sources = self
            .devices
            .find_by_type(self.settings.power_source_meter_type.clone())
            .await?;

        let mut per_sensor = Vec::new();
        for device in std::iter::once(grid).chain(sources) {
            for sensor in self.power_sensors(device.id).await? {
                per_sensor.push(
                    self.readings
                        .find_by_sensor_in_period(sensor.id, period)
                        .await?,
                );
            }
        }

        Ok(analysis::peak_consumption(
            &period,
            self.settings.delta,
            &per_sensor,
        ))
    }

    async fn power_sensors(&self, device_id: DeviceId) -> Result<Vec<Sensor>, SmartHomeError> {
        self.sensors
            .find_by_device_and_model(device_id, self.settings.power_consumption_model.clone())
            .await
    }

    /// Readings of every sensor of `model` on the device within `period`,
    /// resolved one id at a time.
    async fn device_readings(
        &self,
        device_id: DeviceId,
        model: SensorModelName,
        period: Period,
    ) -> Result<Vec<Reading>, SmartHomeError> {
        let mut readings = Vec::new();
        for sensor in self.sensors.find_by_device_and_model(device_id, model).await? {
            for id in self
                .readings
                .find_ids_by_sensor_in_period(sensor.id, period)
                .await?
            {
                if let Some(reading) = self.readings.get_by_id(id).await? {
                    readings.push(reading);
                }
            }
        }
        Ok(readings)
    }
}
