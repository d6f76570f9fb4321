//! Reading: a value recorded by a sensor at a point in time.

use chrono::SubsecRound;

use crate::id::{ReadingId, SensorId};
use crate::time::Timestamp;

/// A single sensor measurement.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub id: ReadingId,
    pub value: f64,
    pub sensor_id: SensorId,
    pub recorded_at: Timestamp,
}

impl Reading {
    /// Create a reading with a freshly generated id.
    ///
    /// `recorded_at` is truncated to whole microseconds, the finest
    /// resolution readings are stored with.
    #[must_use]
    pub fn new(value: f64, sensor_id: SensorId, recorded_at: Timestamp) -> Self {
        Self {
            id: ReadingId::new(),
            value,
            sensor_id,
            recorded_at: recorded_at.trunc_subsecs(6),
        }
    }
}
