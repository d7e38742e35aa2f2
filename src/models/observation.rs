use serde::Serialize;

use crate::utils::constants::KELVIN_OFFSET;

/// One parsed TDV record. The geohash column is not retained.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observation {
    pub region_code: String,
    /// Seconds since the Unix epoch
    pub timestamp: i64,
    pub humidity: f64,
    pub snow: f64,
    pub cloud_cover: f64,
    pub lightning: f64,
    /// Pascals
    pub pressure: f64,
    /// Degrees Fahrenheit
    pub temperature: f64,
}

impl Observation {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        region_code: impl Into<String>,
        timestamp: i64,
        humidity: f64,
        snow: f64,
        cloud_cover: f64,
        lightning: f64,
        pressure: f64,
        temperature: f64,
    ) -> Self {
        Self {
            region_code: region_code.into(),
            timestamp,
            humidity,
            snow,
            cloud_cover,
            lightning,
            pressure,
            temperature,
        }
    }
}

pub fn kelvin_to_fahrenheit(kelvin: f64) -> f64 {
    (kelvin - KELVIN_OFFSET) * 9.0 / 5.0 + 32.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_freezing_point_conversion() {
        assert_eq!(kelvin_to_fahrenheit(273.15), 32.0);
    }

    #[test]
    fn test_boiling_point_conversion() {
        let fahrenheit = kelvin_to_fahrenheit(373.15);
        assert!((fahrenheit - 212.0).abs() < 1e-9);
        assert_eq!(format!("{:.1}", fahrenheit), "212.0");
    }

    #[test]
    fn test_absolute_zero_conversion() {
        let fahrenheit = kelvin_to_fahrenheit(0.0);
        assert_eq!(format!("{:.2}", fahrenheit), "-459.67");
    }
}
