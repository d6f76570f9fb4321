//! Period: a closed time interval used to query readings.

use chrono::TimeDelta;

use crate::error::{ConstraintError, SmartHomeError};
use crate::time::{Timestamp, parse_timestamp};

/// Closed interval `[start, end]` with `start < end` and `end` not in the
/// future at the time it was built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    start: Timestamp,
    end: Timestamp,
}

impl Period {
    /// # Errors
    ///
    /// Returns [`ConstraintError::InvalidPeriod`] when `start` is not before
    /// `end` or `end` is after `now`.
    pub fn new(start: Timestamp, end: Timestamp, now: Timestamp) -> Result<Self, ConstraintError> {
        if start >= end || end > now {
            return Err(ConstraintError::InvalidPeriod);
        }
        Ok(Self { start, end })
    }

    /// Parse both bounds, then check them as [`Period::new`] does.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::Validation`] for unparsable bounds and
    /// [`SmartHomeError::Constraint`] for an invalid interval.
    pub fn parse(start: &str, end: &str, now: Timestamp) -> Result<Self, SmartHomeError> {
        let start = parse_timestamp(start)?;
        let end = parse_timestamp(end)?;
        Ok(Self::new(start, end, now)?)
    }

    #[must_use]
    pub fn start(&self) -> Timestamp {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> Timestamp {
        self.end
    }

    /// Whether `at` lies within the interval, bounds included.
    #[must_use]
    pub fn contains(&self, at: Timestamp) -> bool {
        self.start <= at && at <= self.end
    }

    /// Number of `step`-long slices the interval is cut into, the last one
    /// clipped to the end. A non-positive `step` means a single slice.
    #[must_use]
    pub fn slice_count(&self, step: TimeDelta) -> i64 {
        match positive_micros(step) {
            None => 1,
            Some(step) => div_ceil(micros(self.end - self.start), step),
        }
    }

    /// Indices of the slices (see [`Period::slice_count`]) containing `at`.
    ///
    /// Adjacent slices share their boundary, so an instant on a boundary
    /// belongs to both. Instants outside the interval belong to none.
    pub fn slice_indices(&self, step: TimeDelta, at: Timestamp) -> impl Iterator<Item = i64> {
        let mut found = [None, None];
        if self.contains(at) {
            match positive_micros(step) {
                None => found[0] = Some(0),
                Some(step_micros) => {
                    let offset = micros(at - self.start);
                    let index = offset / step_micros;
                    if index < self.slice_count(step) {
                        found[0] = Some(index);
                    }
                    if offset % step_micros == 0 && index > 0 {
                        found[1] = Some(index - 1);
                    }
                }
            }
        }
        found.into_iter().flatten()
    }
}

fn micros(delta: TimeDelta) -> i64 {
    delta.num_microseconds().unwrap_or(i64::MAX)
}

fn div_ceil(span: i64, step: i64) -> i64 {
    span / step + i64::from(span % step != 0)
}

fn positive_micros(step: TimeDelta) -> Option<i64> {
    step.num_microseconds().filter(|micros| *micros > 0)
}
