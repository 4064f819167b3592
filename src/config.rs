//! Runtime configuration for the weather pipeline
//!
//! Holds the endpoint URLs, the display name of the location and the knobs
//! that tests and the command line can override (random seed, timeout).

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::data::{Endpoint, Metric};

/// Base URL of the data.gov.sg environment APIs
pub const DEFAULT_API_BASE: &str = "https://api.data.gov.sg/v1/environment";

/// Location name shown when none is configured
pub const DEFAULT_LOCATION_NAME: &str = "Singapore";

/// URLs of the six weather endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoints {
    pub temperature: String,
    pub humidity: String,
    pub wind_speed: String,
    pub wind_direction: String,
    pub rainfall: String,
    pub forecast: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::with_base_url(DEFAULT_API_BASE)
    }
}

impl Endpoints {
    /// Builds all six URLs under `base`, e.g. a local mirror
    pub fn with_base_url(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        let url = |path: &str| format!("{}/{}", base, path);
        Self {
            temperature: url("air-temperature"),
            humidity: url("relative-humidity"),
            wind_speed: url("wind-speed"),
            wind_direction: url("wind-direction"),
            rainfall: url("rainfall"),
            forecast: url("24-hour-weather-forecast"),
        }
    }

    /// Returns the URL serving `endpoint`
    pub fn url(&self, endpoint: Endpoint) -> &str {
        match endpoint {
            Endpoint::Metric(Metric::Temperature) => &self.temperature,
            Endpoint::Metric(Metric::Humidity) => &self.humidity,
            Endpoint::Metric(Metric::WindSpeed) => &self.wind_speed,
            Endpoint::Metric(Metric::WindDirection) => &self.wind_direction,
            Endpoint::Metric(Metric::Rainfall) => &self.rainfall,
            Endpoint::Forecast => &self.forecast,
        }
    }
}

/// Configuration consumed by [`crate::pipeline::WeatherPipeline::from_config`]
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherConfig {
    /// Where each measurement and the forecast are fetched from
    pub endpoints: Endpoints,
    /// Display name put on every report
    pub location_name: String,
    /// Seed for the fallback-value generator; entropy when `None`
    pub seed: Option<u64>,
    /// Per-request timeout of the HTTP client; none by default
    pub timeout: Option<Duration>,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            endpoints: Endpoints::default(),
            location_name: DEFAULT_LOCATION_NAME.to_string(),
            seed: None,
            timeout: None,
        }
    }
}
