//! # Error Types Module
//!
//! Centralized error handling for the NeuroGuard desktop client.
//! Provides custom error types for each module with proper context and error chaining.
//!
//! ## Error Types
//! - `ApiError`: HTTP transport and remote API failures
//! - `GeoError`: geolocation acquisition failures
//! - `ConfigError`: Configuration file I/O and parsing errors
//!
//! ## Why Custom Errors
//! - Better error messages for users and developers
//! - Type-safe error handling with match expressions
//! - Errors carried through iced messages must be `Clone`, which rules out
//!   holding `reqwest::Error` directly

use std::fmt;

/// Errors raised by the remote API transport.
///
/// `Network` covers everything below HTTP (DNS, refused connections,
/// timeouts). `Status` is a response the server did send but with a non-2xx
/// status; the body text is kept verbatim because the API reports its reasons
/// there. `Decode` is a 2xx body that did not parse as the expected JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Transport unreachable (DNS, connect, timeout)
    Network(String),
    /// Non-success HTTP status; message is the response body text
    Status { status: u16, body: String },
    /// Response body was not the expected JSON shape
    Decode(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => {
                write!(f, "Could not reach the NeuroGuard service: {}", msg)
            }
            ApiError::Status { status, body } => {
                if body.is_empty() {
                    write!(f, "Request failed with status {}", status)
                } else {
                    write!(f, "Request failed ({}): {}", status, body)
                }
            }
            ApiError::Decode(msg) => {
                write!(f, "Unexpected response from the service: {}", msg)
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Errors that can occur while acquiring a device location
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeoError {
    /// No location is configured for this device
    Unavailable,
}

impl fmt::Display for GeoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeoError::Unavailable => {
                write!(
                    f,
                    "No device location set. Add latitude/longitude to the config file to send vitals."
                )
            }
        }
    }
}

impl std::error::Error for GeoError {}

/// Errors that can occur during configuration operations
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read config file
    ReadFailed(std::io::Error),
    /// Failed to write config file
    WriteFailed(std::io::Error),
    /// Failed to parse config file
    ParseFailed(toml::de::Error),
    /// Failed to serialize config
    SerializeFailed(toml::ser::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ReadFailed(e) => {
                write!(f, "Failed to read config file: {}", e)
            }
            ConfigError::WriteFailed(e) => {
                write!(f, "Failed to write config file: {}", e)
            }
            ConfigError::ParseFailed(e) => {
                write!(f, "Failed to parse config file: {}", e)
            }
            ConfigError::SerializeFailed(e) => {
                write!(f, "Failed to serialize config: {}", e)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::ReadFailed(e) => Some(e),
            ConfigError::WriteFailed(e) => Some(e),
            ConfigError::ParseFailed(e) => Some(e),
            ConfigError::SerializeFailed(e) => Some(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_status_display_carries_body() {
        let err = ApiError::Status {
            status: 401,
            body: "Invalid credentials".to_string(),
        };
        let rendered = err.to_string();
        assert!(rendered.contains("401"));
        assert!(rendered.contains("Invalid credentials"));
    }

    #[test]
    fn test_api_error_status_display_without_body() {
        let err = ApiError::Status {
            status: 500,
            body: String::new(),
        };
        assert_eq!(err.to_string(), "Request failed with status 500");
    }

    #[test]
    fn test_geo_error_display() {
        let err = GeoError::Unavailable;
        assert!(err.to_string().contains("location"));
    }

    #[test]
    fn test_config_error_chain() {
        use std::error::Error;
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = ConfigError::ReadFailed(io_err);
        assert!(err.source().is_some());
    }
}
