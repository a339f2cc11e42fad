//! # Alert Hook Module
//!
//! Extension point invoked when a merged reading breaches vitals thresholds.
//! Threshold evaluation happens client-side only to drive this hook; the
//! authoritative alerting rules run behind the remote API.

use crate::model::VitalsReading;

// Between the canned normal payload (75 bpm / 98% / 36.7C) and the panic one
// (132 bpm / 92% / 37.9C).
const HEART_RATE_MAX_BPM: i32 = 120;
const SPO2_MIN_PERCENT: f64 = 90.0;
const TEMPERATURE_MAX_C: f64 = 38.5;

/// Receives readings that exceeded a vitals threshold.
///
/// The default wiring is a no-op; implement this to add local notifications,
/// sounds, or forwarding without touching the dashboard.
pub trait AlertSink: Send {
    fn threshold_exceeded(&self, reading: &VitalsReading);
}

/// Discards alerts
#[derive(Debug, Default)]
pub struct NullAlertSink;

impl AlertSink for NullAlertSink {
    fn threshold_exceeded(&self, _reading: &VitalsReading) {}
}

/// Logs alerts at warn level
#[derive(Debug, Default)]
pub struct LogAlertSink;

impl AlertSink for LogAlertSink {
    fn threshold_exceeded(&self, reading: &VitalsReading) {
        log::warn!(
            "vitals threshold exceeded: hr={} bpm, spo2={}%, temp={}C (reading {})",
            reading.heart_rate,
            reading.spo2,
            reading.temperature,
            reading.id
        );
    }
}

/// Whether a reading should be handed to the alert sink
pub fn breaches_thresholds(reading: &VitalsReading) -> bool {
    reading.heart_rate > HEART_RATE_MAX_BPM
        || reading.spo2 < SPO2_MIN_PERCENT
        || reading.temperature > TEMPERATURE_MAX_C
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TriggerKind;
    use chrono::Utc;

    fn reading_from(kind: TriggerKind) -> VitalsReading {
        let p = kind.payload();
        VitalsReading {
            id: "t".to_string(),
            heart_rate: p.heart_rate,
            spo2: p.spo2,
            temperature: p.temperature,
            accel_x: p.accel_x,
            accel_y: p.accel_y,
            accel_z: p.accel_z,
            gyro_x: p.gyro_x,
            gyro_y: p.gyro_y,
            gyro_z: p.gyro_z,
            timestamp: Utc::now(),
            prediction: None,
        }
    }

    #[test]
    fn test_normal_payload_does_not_alert() {
        assert!(!breaches_thresholds(&reading_from(TriggerKind::Normal)));
    }

    #[test]
    fn test_panic_and_seizure_payloads_alert() {
        assert!(breaches_thresholds(&reading_from(TriggerKind::Panic)));
        assert!(breaches_thresholds(&reading_from(TriggerKind::Seizure)));
    }

    #[test]
    fn test_null_sink_accepts_any_reading() {
        let sink: Box<dyn AlertSink> = Box::new(NullAlertSink);
        sink.threshold_exceeded(&reading_from(TriggerKind::Seizure));
    }

    #[test]
    fn test_low_spo2_alone_alerts() {
        let mut reading = reading_from(TriggerKind::Normal);
        reading.spo2 = 85.0;
        assert!(breaches_thresholds(&reading));
    }
}
