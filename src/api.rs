//! # API Transport Client Module
//!
//! HTTP client for the NeuroGuard remote service. All business logic
//! (authentication, vitals storage, alerting, prediction) lives behind this
//! API; the client only moves JSON and normalizes failures.
//!
//! ## Contract
//! - Every request carries the session cookie jar and a JSON content type.
//! - Non-2xx responses become `ApiError::Status` with the body text verbatim,
//!   because the service reports its reasons there.
//! - Failures below HTTP (DNS, refused, timeout) become `ApiError::Network`.
//! - No retries and no timeout policy; failures propagate to the caller,
//!   which owns user-facing reporting.

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::model::{
    LoginRequest, LoginResponse, MessageResponse, MonitorInitRequest, PatientRef, Profile, Role,
    SignupRequest, Summary, UploadRequest, UploadResponse, VitalsReading,
};

/// Stateless (aside from the base URL and cookie jar) client for the
/// NeuroGuard API. Cheap to clone; clones share the underlying connection
/// pool and session cookies.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .cookie_store(true)
            .default_headers(headers)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self
            .http
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::decode(response).await
    }

    async fn post_json<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self
            .http
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::decode(response).await
    }

    /// POST with no body; the link endpoint takes its parameters in the
    /// query string
    async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self
            .http
            .post(self.url(path))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    // --- auth ---

    pub async fn signup(&self, role: Role, req: &SignupRequest) -> Result<MessageResponse, ApiError> {
        self.post_json(&format!("/auth/signup/{}", role.as_str()), req)
            .await
    }

    /// Starts a session; the server authenticates by email and sets the
    /// session cookie consumed by every later call
    pub async fn login(&self, role: Role, email: &str) -> Result<LoginResponse, ApiError> {
        let body = LoginRequest {
            email: email.to_string(),
        };
        self.post_json(&format!("/auth/login/{}", role.as_str()), &body)
            .await
    }

    pub async fn link_patient(
        &self,
        caregiver_id: &str,
        code: &str,
    ) -> Result<MessageResponse, ApiError> {
        let path = format!(
            "/auth/caregiver/link?caregiverId={}&code={}",
            urlencoding::encode(caregiver_id),
            urlencoding::encode(code)
        );
        self.post_empty(&path).await
    }

    // --- patient data ---

    pub async fn caregiver_patients(&self, caregiver_id: &str) -> Result<Vec<PatientRef>, ApiError> {
        self.get_json(&format!("/caregiver/{}/patients", caregiver_id))
            .await
    }

    pub async fn patient_summary(&self, patient_id: &str) -> Result<Summary, ApiError> {
        self.get_json(&format!("/patient/{}/summary", patient_id))
            .await
    }

    pub async fn patient_vitals(&self, patient_id: &str) -> Result<Vec<VitalsReading>, ApiError> {
        self.get_json(&format!("/patient/{}/vitals", patient_id))
            .await
    }

    pub async fn profile(&self, role: Role, id: &str) -> Result<Profile, ApiError> {
        self.get_json(&format!("/{}/{}", role.as_str(), id)).await
    }

    // --- vitals ingestion ---

    pub async fn upload_vitals(&self, req: &UploadRequest) -> Result<UploadResponse, ApiError> {
        self.post_json("/vitals/upload", req).await
    }

    /// Arms hardware ingestion for a patient. Must succeed before live
    /// polling starts; the poll loop itself performs no handshake.
    pub async fn monitor_init(&self, req: &MonitorInitRequest) -> Result<MessageResponse, ApiError> {
        self.post_json("/vitals/monitor/init", req).await
    }

    /// Fetches the most recent reading posted by the hardware ingestion path
    pub async fn monitor_latest(&self) -> Result<VitalsReading, ApiError> {
        self.get_json("/vitals/monitor/latest").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_normalized() {
        let client = ApiClient::new("http://localhost:3000/").expect("client");
        assert_eq!(
            client.url("/patient/p1/summary"),
            "http://localhost:3000/patient/p1/summary"
        );
    }

    #[test]
    fn test_link_code_is_query_encoded() {
        let encoded = urlencoding::encode("c o&de");
        assert_eq!(encoded, "c%20o%26de");
    }
}
