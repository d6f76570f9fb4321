//! Reading analysis: temperature comparison and peak power consumption.

use std::collections::HashMap;

use chrono::TimeDelta;

use crate::period::Period;
use crate::reading::Reading;

/// Largest absolute value difference between a reading of `left` and a
/// reading of `right` taken at most `delta` apart.
///
/// Timestamps are compared in whole seconds and the `delta` bound is
/// inclusive. Returns `None` when no pair qualifies, which is distinct from
/// a difference of `0.0`.
#[must_use]
pub fn max_instant_difference(left: &[Reading], right: &[Reading], delta: TimeDelta) -> Option<f64> {
    let delta = delta.num_seconds().abs();
    let mut max: Option<f64> = None;
    for a in left {
        for b in right {
            let gap = (a.recorded_at - b.recorded_at).num_seconds().abs();
            if gap > delta {
                continue;
            }
            let difference = (a.value - b.value).abs();
            max = Some(max.map_or(difference, |m| m.max(difference)));
        }
    }
    max
}

/// Mean value of the readings, `0.0` when there are none.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn average<'a>(readings: impl IntoIterator<Item = &'a Reading>) -> f64 {
    let (sum, count) = readings
        .into_iter()
        .fold((0.0, 0_usize), |(sum, count), r| (sum + r.value, count + 1));
    if count == 0 { 0.0 } else { sum / count as f64 }
}

/// Highest total consumption over the slices of `period`.
///
/// `per_sensor` holds the readings of each power meter sensor over the whole
/// period. For every slice of length `step`, each sensor contributes the
/// average of its readings in that slice (zero when it has none); the slice
/// total is the sum of those averages. Returns `None` when the peak is zero.
///
/// Only slices holding at least one reading are visited, so the cost grows
/// with the number of readings, not with the length of the period.
#[must_use]
pub fn peak_consumption(period: &Period, step: TimeDelta, per_sensor: &[Vec<Reading>]) -> Option<f64> {
    let mut totals: HashMap<i64, f64> = HashMap::new();
    for readings in per_sensor {
        let mut slices: HashMap<i64, Vec<&Reading>> = HashMap::new();
        for reading in readings {
            for index in period.slice_indices(step, reading.recorded_at) {
                slices.entry(index).or_default().push(reading);
            }
        }
        for (index, in_slice) in slices {
            *totals.entry(index).or_default() += average(in_slice);
        }
    }
    let peak = totals.into_values().fold(0.0_f64, f64::max);
    (peak != 0.0).then_some(peak)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::SensorId;
    use crate::time::Timestamp;
    use chrono::{TimeZone, Utc};

    fn at(h: u32, m: u32, s: u32) -> Timestamp {
        Utc.with_ymd_and_hms(2024, 4, 15, h, m, s).unwrap()
    }

    fn reading(value: f64, recorded_at: Timestamp) -> Reading {
        Reading::new(value, SensorId::parse("sensor").unwrap(), recorded_at)
    }

    #[test]
    fn should_return_difference_when_readings_are_within_delta() {
        let left = [reading(20.0, at(7, 20, 50))];
        let right = [reading(10.0, at(7, 20, 54))];
        assert_eq!(
            max_instant_difference(&left, &right, TimeDelta::seconds(60)),
            Some(10.0)
        );
    }

    #[test]
    fn should_return_none_when_readings_are_beyond_delta() {
        let left = [reading(20.0, at(7, 20, 50))];
        let right = [reading(10.0, at(7, 21, 51))];
        assert_eq!(
            max_instant_difference(&left, &right, TimeDelta::seconds(60)),
            None
        );
    }

    #[test]
    fn should_include_delta_boundary() {
        let left = [reading(20.0, at(7, 20, 50))];
        let right = [reading(10.0, at(7, 21, 50))];
        assert_eq!(
            max_instant_difference(&left, &right, TimeDelta::seconds(60)),
            Some(10.0)
        );
    }

    #[test]
    fn should_use_absolute_difference_for_negative_values() {
        let left = [reading(-20.0, at(7, 20, 50))];
        let right = [reading(-10.0, at(7, 20, 54))];
        assert_eq!(
            max_instant_difference(&left, &right, TimeDelta::seconds(60)),
            Some(10.0)
        );
    }

    #[test]
    fn should_return_zero_when_values_are_equal() {
        let left = [reading(15.0, at(7, 20, 50))];
        let right = [reading(15.0, at(7, 20, 54))];
        assert_eq!(
            max_instant_difference(&left, &right, TimeDelta::seconds(60)),
            Some(0.0)
        );
    }

    #[test]
    fn should_return_none_when_a_side_is_empty() {
        let left = [reading(15.0, at(7, 20, 50))];
        assert_eq!(max_instant_difference(&left, &[], TimeDelta::seconds(60)), None);
    }

    #[test]
    fn should_keep_maximum_over_every_eligible_pair() {
        let left = [reading(21.0, at(7, 0, 0)), reading(30.0, at(8, 0, 0))];
        let right = [
            reading(20.0, at(7, 0, 30)),
            reading(5.0, at(7, 30, 0)),
            reading(26.0, at(8, 0, 10)),
        ];
        assert_eq!(
            max_instant_difference(&left, &right, TimeDelta::seconds(60)),
            Some(4.0)
        );
    }

    #[test]
    fn should_average_to_zero_without_readings() {
        assert!(average(&Vec::<Reading>::new()).abs() < f64::EPSILON);
    }

    #[test]
    fn should_sum_sensor_averages_and_keep_the_peak_slice() {
        let period = Period::new(at(7, 0, 0), at(7, 10, 0), at(9, 0, 0)).unwrap();
        let grid = vec![
            reading(100.0, at(7, 1, 0)),
            reading(200.0, at(7, 2, 0)),
            reading(400.0, at(7, 7, 0)),
        ];
        let solar = vec![reading(50.0, at(7, 8, 0))];

        let peak = peak_consumption(&period, TimeDelta::minutes(5), &[grid, solar]);

        assert_eq!(peak, Some(450.0));
    }

    #[test]
    fn should_return_none_when_nothing_was_consumed() {
        let period = Period::new(at(7, 0, 0), at(7, 10, 0), at(9, 0, 0)).unwrap();
        assert_eq!(
            peak_consumption(&period, TimeDelta::minutes(5), &[Vec::new()]),
            None
        );
    }

    #[test]
    fn should_share_boundary_reading_between_adjacent_slices() {
        let period = Period::new(at(7, 0, 0), at(7, 10, 0), at(9, 0, 0)).unwrap();
        let grid = vec![reading(100.0, at(7, 2, 0)), reading(300.0, at(7, 5, 0))];

        let peak = peak_consumption(&period, TimeDelta::minutes(5), &[grid]);

        assert_eq!(peak, Some(300.0));
    }

    #[test]
    fn should_handle_centuries_long_period_with_tiny_step() {
        let start = Utc.with_ymd_and_hms(1, 1, 1, 0, 0, 0).unwrap();
        let period = Period::new(start, at(8, 0, 0), at(9, 0, 0)).unwrap();
        let grid = vec![reading(120.0, at(7, 0, 0)), reading(80.0, start)];
        let solar = vec![reading(30.0, at(7, 0, 0))];

        let peak = peak_consumption(&period, TimeDelta::seconds(1), &[grid, solar]);

        assert_eq!(peak, Some(150.0));
    }
}
