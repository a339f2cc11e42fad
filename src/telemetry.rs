//! # Telemetry Window Module
//!
//! Bounded, deduplicated recent-history buffer backing the dashboard charts
//! and the latest-readings table. Generic time series concerns stay here;
//! polling lives in `monitor` and rendering in `charts`.
//!
//! ## Merge Algorithm
//! Readings are keyed on the server-assigned identifier. A reading whose id
//! is already present is discarded (idempotent merge); a new reading is
//! appended at the tail, and the head is evicted once the window exceeds its
//! fixed capacity. Strict FIFO by arrival, whatever the timestamps say.

use std::collections::VecDeque;

use crate::model::VitalsReading;

/// Ordered window of up to `capacity` most-recent readings for one patient,
/// oldest first. Capacity is fixed at construction.
pub struct TelemetryWindow {
    capacity: usize,
    readings: VecDeque<VitalsReading>,
}

impl TelemetryWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            readings: VecDeque::with_capacity(capacity.max(1)),
        }
    }

    /// Merge one reading. Returns `true` if the window changed; a reading
    /// whose id is already present leaves it untouched.
    pub fn insert(&mut self, reading: VitalsReading) -> bool {
        if self.readings.iter().any(|r| r.id == reading.id) {
            return false;
        }
        self.readings.push_back(reading);
        while self.readings.len() > self.capacity {
            self.readings.pop_front();
        }
        true
    }

    /// Seed from a history fetch. The API returns newest first; the window
    /// stores oldest first, so the tail of the history fills in reverse.
    pub fn seed(&mut self, newest_first: Vec<VitalsReading>) {
        for reading in newest_first.into_iter().rev() {
            self.insert(reading);
        }
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Oldest to newest, chart order
    pub fn iter(&self) -> impl Iterator<Item = &VitalsReading> {
        self.readings.iter()
    }

    /// Newest to oldest, table order; the head is the most recent reading
    pub fn newest_first(&self) -> impl Iterator<Item = &VitalsReading> {
        self.readings.iter().rev()
    }

    pub fn latest(&self) -> Option<&VitalsReading> {
        self.readings.back()
    }

    /// Extract one measurement as chart samples, oldest first
    pub fn samples<F>(&self, field: F) -> Vec<Sample>
    where
        F: Fn(&VitalsReading) -> f64,
    {
        self.readings
            .iter()
            .map(|r| Sample {
                time: r.timestamp.timestamp_millis(),
                value: field(r),
            })
            .collect()
    }
}

/// One chart point: timestamp in epoch milliseconds and a measurement value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub time: i64,
    pub value: f64,
}

pub trait SampleSliceExt {
    fn min_max_time(&self) -> Option<(i64, i64)>;
    fn min_max_value(&self) -> Option<(f64, f64)>;
}

// Implement the trait for a slice of `Sample`
impl SampleSliceExt for &[Sample] {
    fn min_max_time(&self) -> Option<(i64, i64)> {
        self.iter().fold(None, |acc, sample| match acc {
            None => Some((sample.time, sample.time)),
            Some((min, max)) => Some((min.min(sample.time), max.max(sample.time))),
        })
    }

    fn min_max_value(&self) -> Option<(f64, f64)> {
        self.iter().fold(None, |acc, sample| match acc {
            None => Some((sample.value, sample.value)),
            Some((min, max)) => Some((min.min(sample.value), max.max(sample.value))),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn reading(id: &str, heart_rate: i32) -> VitalsReading {
        VitalsReading {
            id: id.to_string(),
            heart_rate,
            spo2: 98.0,
            temperature: 36.7,
            accel_x: 0.0,
            accel_y: 0.0,
            accel_z: 0.0,
            gyro_x: 0.0,
            gyro_y: 0.0,
            gyro_z: 0.0,
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 10, 30, 0).unwrap(),
            prediction: None,
        }
    }

    fn ids(window: &TelemetryWindow) -> Vec<&str> {
        window.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_never_exceeds_capacity() {
        let mut window = TelemetryWindow::new(3);
        for i in 0..20 {
            window.insert(reading(&format!("r{}", i), 70 + i));
        }
        assert_eq!(window.len(), 3);
    }

    #[test]
    fn test_oldest_evicted_first() {
        let mut window = TelemetryWindow::new(3);
        for id in ["A", "B", "C", "D"] {
            window.insert(reading(id, 75));
        }
        assert_eq!(ids(&window), vec!["B", "C", "D"]);
    }

    #[test]
    fn test_duplicate_id_is_discarded() {
        let mut window = TelemetryWindow::new(5);
        assert!(window.insert(reading("A", 75)));
        assert!(!window.insert(reading("A", 75)));
        assert_eq!(window.len(), 1);
    }

    #[test]
    fn test_redelivery_leaves_window_unchanged() {
        let mut window = TelemetryWindow::new(5);
        window.insert(reading("A", 75));
        window.insert(reading("B", 80));
        let before = ids(&window).join(",");

        // same id, different measurements: still a duplicate
        window.insert(reading("A", 140));

        assert_eq!(ids(&window).join(","), before);
        assert_eq!(window.iter().next().map(|r| r.heart_rate), Some(75));
    }

    #[test]
    fn test_no_two_entries_share_an_id() {
        let mut window = TelemetryWindow::new(4);
        for id in ["A", "B", "A", "C", "B", "A"] {
            window.insert(reading(id, 75));
        }
        let mut seen = ids(&window);
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), window.len());
    }

    #[test]
    fn test_seed_preserves_history_order() {
        let mut window = TelemetryWindow::new(10);
        // API returns newest first
        window.seed(vec![reading("C", 90), reading("B", 80), reading("A", 70)]);
        assert_eq!(ids(&window), vec!["A", "B", "C"]);
        assert_eq!(window.latest().map(|r| r.id.as_str()), Some("C"));
    }

    #[test]
    fn test_seed_truncates_to_capacity() {
        let mut window = TelemetryWindow::new(2);
        window.seed(vec![reading("C", 90), reading("B", 80), reading("A", 70)]);
        // the two most recent survive
        assert_eq!(ids(&window), vec!["B", "C"]);
        assert_eq!(window.len(), window.capacity());
    }

    #[test]
    fn test_newest_first_puts_latest_at_head() {
        let mut window = TelemetryWindow::new(5);
        window.insert(reading("A", 70));
        window.insert(reading("B", 80));
        let head: Vec<&str> = window.newest_first().map(|r| r.id.as_str()).collect();
        assert_eq!(head, vec!["B", "A"]);
    }

    #[test]
    fn test_samples_extract_field_in_chart_order() {
        let mut window = TelemetryWindow::new(5);
        window.insert(reading("A", 70));
        window.insert(reading("B", 80));
        let samples = window.samples(|r| r.heart_rate as f64);
        let values: Vec<f64> = samples.iter().map(|s| s.value).collect();
        assert_eq!(values, vec![70.0, 80.0]);
    }

    #[test]
    fn test_sample_slice_min_max() {
        let samples = [
            Sample { time: 10, value: 36.5 },
            Sample { time: 30, value: 38.7 },
            Sample { time: 20, value: 35.9 },
        ];
        assert_eq!((&samples[..]).min_max_time(), Some((10, 30)));
        assert_eq!((&samples[..]).min_max_value(), Some((35.9, 38.7)));
    }

    #[test]
    fn test_empty_slice_has_no_bounds() {
        let samples: [Sample; 0] = [];
        assert_eq!((&samples[..]).min_max_time(), None);
        assert_eq!((&samples[..]).min_max_value(), None);
    }
}
