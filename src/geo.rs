//! # Geolocation Module
//!
//! One-shot location acquisition gating every upload and monitor-start
//! action. The remote API tags readings with the position they were sent
//! from, and refuses ingestion setup without one.
//!
//! Desktops have no geolocation permission prompt, so the location is a fixed
//! device position taken from the config file. The seam is a trait so a
//! platform positioning backend can slot in without touching the callers;
//! failure surfaces to the user as a notice, never a retry.

use crate::config::Config;
use crate::error::GeoError;

/// A WGS84 position attached to uploads and monitor initialization
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Source of the device's current position
pub trait LocationSource {
    fn current_location(&self) -> Result<GeoPoint, GeoError>;
}

/// Location pinned in the config file
#[derive(Debug, Clone)]
pub struct ConfigLocation {
    location: Option<GeoPoint>,
}

impl ConfigLocation {
    pub fn from_config(config: &Config) -> Self {
        let location = match (config.latitude, config.longitude) {
            (Some(latitude), Some(longitude)) => Some(GeoPoint {
                latitude,
                longitude,
            }),
            _ => None,
        };
        Self { location }
    }
}

impl LocationSource for ConfigLocation {
    fn current_location(&self) -> Result<GeoPoint, GeoError> {
        self.location.ok_or(GeoError::Unavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_location_resolves() {
        let mut config = Config::default();
        config.latitude = Some(41.39);
        config.longitude = Some(2.17);

        let source = ConfigLocation::from_config(&config);
        let point = source.current_location().expect("location set");
        assert_eq!(point.latitude, 41.39);
        assert_eq!(point.longitude, 2.17);
    }

    #[test]
    fn test_missing_location_is_unavailable() {
        let source = ConfigLocation::from_config(&Config::default());
        assert_eq!(source.current_location(), Err(GeoError::Unavailable));
    }

    #[test]
    fn test_partial_location_is_unavailable() {
        let mut config = Config::default();
        config.latitude = Some(41.39);
        let source = ConfigLocation::from_config(&config);
        assert_eq!(source.current_location(), Err(GeoError::Unavailable));
    }
}
