//! # API Data Model Module
//!
//! Wire types exchanged with the NeuroGuard remote API. The service speaks
//! camelCase JSON (`heartRate`, `accelX`, `homeAddress`), mapped onto snake_case
//! fields with serde. Readings are immutable once received; everything here is
//! plain data with no behavior beyond convenience accessors.
//!
//! ## Key Types
//! - `VitalsReading`: one timestamped vitals/motion sample
//! - `TriggerKind`: the canned demonstration payloads (normal/panic/seizure)
//! - `Summary`: aggregate profile + history + alert history for a patient
//! - `Profile` / `PatientRef` / `Identity`: account-facing records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::geo::GeoPoint;

/// A point-in-time set of physiological and motion measurements.
///
/// `id` is the server-assigned opaque identifier used for deduplication in
/// the telemetry window; `timestamp` is server-assigned and monotonically
/// non-decreasing per patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VitalsReading {
    #[serde(alias = "_id")]
    pub id: String,
    pub heart_rate: i32,
    pub spo2: f64,
    pub temperature: f64,
    pub accel_x: f64,
    pub accel_y: f64,
    pub accel_z: f64,
    pub gyro_x: f64,
    pub gyro_y: f64,
    pub gyro_z: f64,
    pub timestamp: DateTime<Utc>,
    /// Classification assigned by the remote prediction model, when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prediction: Option<String>,
}

/// Account role; selects both auth endpoints and post-login navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Patient,
    Caregiver,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Patient => "patient",
            Role::Caregiver => "caregiver",
        }
    }
}

/// Who is logged in, derived from the login response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub role: Role,
    pub id: String,
    pub name: Option<String>,
}

/// Raw login response. The API is not consistent about which field carries
/// the subject id, so all observed variants are accepted.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub patient_id: Option<String>,
    #[serde(default)]
    pub caregiver_id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl LoginResponse {
    /// First available subject identifier, falling back to the email
    pub fn subject_id(&self) -> Option<String> {
        self.id
            .clone()
            .or_else(|| self.patient_id.clone())
            .or_else(|| self.caregiver_id.clone())
            .or_else(|| self.email.clone())
    }
}

/// One linked patient as listed for a caregiver
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientRef {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Profile record for either role. Patient-only fields are null for
/// caregivers; the profile view renders only what is present.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub age: Option<String>,
    #[serde(default)]
    pub sex: Option<String>,
    #[serde(default)]
    pub home_address: Option<String>,
    /// Link code a caregiver uses to associate with this patient
    #[serde(default)]
    pub code: Option<String>,
}

/// One alert recorded by the remote alerting rules
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertRecord {
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

/// Read-mostly aggregate fetched on demand, never updated by the live stream
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    #[serde(default)]
    pub patient_details: Option<Profile>,
    #[serde(default)]
    pub all_vitals: Vec<VitalsReading>,
    #[serde(default)]
    pub all_alerts: Vec<AlertRecord>,
}

impl Summary {
    /// Mean heart rate over the full history, if any
    pub fn average_heart_rate(&self) -> Option<f64> {
        if self.all_vitals.is_empty() {
            return None;
        }
        let sum: i64 = self.all_vitals.iter().map(|v| v.heart_rate as i64).sum();
        Some(sum as f64 / self.all_vitals.len() as f64)
    }

    /// Most recent reading in the history (server returns newest first)
    pub fn last_reading(&self) -> Option<&VitalsReading> {
        self.all_vitals.first()
    }
}

/// Manually issued canned vitals payloads used for demonstration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerKind {
    Normal,
    Panic,
    Seizure,
}

impl TriggerKind {
    pub fn label(&self) -> &'static str {
        match self {
            TriggerKind::Normal => "Normal",
            TriggerKind::Panic => "Panic",
            TriggerKind::Seizure => "Seizure",
        }
    }

    /// The fixed measurement set uploaded for this trigger
    pub fn payload(&self) -> TriggerPayload {
        match self {
            TriggerKind::Normal => TriggerPayload {
                heart_rate: 75,
                spo2: 98.0,
                accel_x: 0.0,
                accel_y: 0.0,
                accel_z: 0.0,
                gyro_x: 0.0,
                gyro_y: 0.0,
                gyro_z: 0.0,
                temperature: 36.7,
            },
            TriggerKind::Panic => TriggerPayload {
                heart_rate: 132,
                spo2: 92.0,
                accel_x: 0.35,
                accel_y: 0.22,
                accel_z: 0.25,
                gyro_x: 0.98,
                gyro_y: 0.63,
                gyro_z: 0.75,
                temperature: 37.9,
            },
            TriggerKind::Seizure => TriggerPayload {
                heart_rate: 150,
                spo2: 88.0,
                accel_x: 2.6,
                accel_y: 2.3,
                accel_z: 2.8,
                gyro_x: 4.3,
                gyro_y: 5.2,
                gyro_z: 4.2,
                temperature: 38.7,
            },
        }
    }
}

/// Measurement fields of a manual upload, without identity or location
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerPayload {
    pub heart_rate: i32,
    pub spo2: f64,
    pub accel_x: f64,
    pub accel_y: f64,
    pub accel_z: f64,
    pub gyro_x: f64,
    pub gyro_y: f64,
    pub gyro_z: f64,
    pub temperature: f64,
}

/// Body for POST /vitals/upload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    pub patient_id: String,
    #[serde(flatten)]
    pub vitals: TriggerPayload,
    pub latitude: f64,
    pub longitude: f64,
}

impl UploadRequest {
    pub fn new(patient_id: impl Into<String>, kind: TriggerKind, location: GeoPoint) -> Self {
        Self {
            patient_id: patient_id.into(),
            vitals: kind.payload(),
            latitude: location.latitude,
            longitude: location.longitude,
        }
    }
}

/// Response for POST /vitals/upload; `vitals` is the stored reading with its
/// server-assigned id and timestamp
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub vitals: VitalsReading,
}

/// Body for POST /vitals/monitor/init
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorInitRequest {
    pub patient_id: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Body for the signup endpoints. Location and role accompany patient
/// signups only.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sex: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

/// Body for the login endpoints; the API authenticates by email alone and
/// sets a session cookie on the response
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
}

/// Generic `{ "message": ... }` acknowledgment used by link, signup and
/// monitor-init responses
#[derive(Debug, Clone, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// Accepts a JSON string or number and yields it as a string. The API stores
/// signup form fields verbatim, so numeric-looking fields come back in either
/// shape depending on how the account was created.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        Str(String),
        Int(i64),
        Float(f64),
    }

    let value = Option::<StringOrNumber>::deserialize(deserializer)?;
    Ok(value.map(|v| match v {
        StringOrNumber::Str(s) => s,
        StringOrNumber::Int(n) => n.to_string(),
        StringOrNumber::Float(n) => n.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reading_deserializes_camel_case_with_mongo_id() {
        let json = r#"{
            "_id": "abc123",
            "heartRate": 91,
            "spo2": 97.0,
            "temperature": 36.9,
            "accelX": 0.1, "accelY": 0.2, "accelZ": 0.3,
            "gyroX": 0.0, "gyroY": 0.0, "gyroZ": 0.0,
            "timestamp": "2024-05-01T10:30:00Z",
            "prediction": "normal"
        }"#;
        let reading: VitalsReading = serde_json::from_str(json).expect("valid reading");
        assert_eq!(reading.id, "abc123");
        assert_eq!(reading.heart_rate, 91);
        assert_eq!(reading.prediction.as_deref(), Some("normal"));
    }

    #[test]
    fn test_upload_request_flattens_payload() {
        let req = UploadRequest::new(
            "p1",
            TriggerKind::Panic,
            GeoPoint {
                latitude: 40.0,
                longitude: -3.7,
            },
        );
        let json = serde_json::to_value(&req).expect("serialize");
        assert_eq!(json["patientId"], "p1");
        assert_eq!(json["heartRate"], 132);
        assert_eq!(json["latitude"], 40.0);
        // no nested "vitals" object on the wire
        assert!(json.get("vitals").is_none());
    }

    #[test]
    fn test_login_response_subject_id_precedence() {
        let resp: LoginResponse =
            serde_json::from_str(r#"{"patientId": "p9", "email": "a@b.c"}"#).expect("parse");
        assert_eq!(resp.subject_id().as_deref(), Some("p9"));

        let resp: LoginResponse = serde_json::from_str(r#"{"email": "a@b.c"}"#).expect("parse");
        assert_eq!(resp.subject_id().as_deref(), Some("a@b.c"));
    }

    #[test]
    fn test_profile_accepts_numeric_age() {
        let profile: Profile =
            serde_json::from_str(r#"{"name": "Ana", "age": 42}"#).expect("parse");
        assert_eq!(profile.age.as_deref(), Some("42"));

        let profile: Profile =
            serde_json::from_str(r#"{"name": "Ana", "age": "42"}"#).expect("parse");
        assert_eq!(profile.age.as_deref(), Some("42"));
    }

    #[test]
    fn test_summary_average_heart_rate() {
        let summary: Summary = serde_json::from_str(
            r#"{
            "allVitals": [
                {"id": "a", "heartRate": 80, "spo2": 98, "temperature": 36.5,
                 "accelX": 0, "accelY": 0, "accelZ": 0,
                 "gyroX": 0, "gyroY": 0, "gyroZ": 0,
                 "timestamp": "2024-05-01T10:30:00Z"},
                {"id": "b", "heartRate": 100, "spo2": 97, "temperature": 36.6,
                 "accelX": 0, "accelY": 0, "accelZ": 0,
                 "gyroX": 0, "gyroY": 0, "gyroZ": 0,
                 "timestamp": "2024-05-01T10:31:00Z"}
            ]
        }"#,
        )
        .expect("parse");
        assert_eq!(summary.average_heart_rate(), Some(90.0));
        assert_eq!(summary.last_reading().map(|r| r.id.as_str()), Some("a"));
    }

    #[test]
    fn test_trigger_payloads_are_distinct() {
        assert_eq!(TriggerKind::Normal.payload().heart_rate, 75);
        assert_eq!(TriggerKind::Panic.payload().heart_rate, 132);
        assert_eq!(TriggerKind::Seizure.payload().heart_rate, 150);
    }
}
