//! Core data models for ShoreSquad
//!
//! This module contains the types produced by the weather pipeline: the
//! normalized current conditions, the 7-day forecast and the combined report
//! handed to the presentation layer. The submodules hold the pipeline stages.

pub mod fallback;
pub mod forecast;
pub mod measurements;
pub mod normalize;
pub mod source;

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub use fallback::FallbackGenerator;
pub use forecast::{ForecastBuilder, RawForecastResponse};
pub use measurements::{MeasurementFetcher, PartialMeasurementSet};
pub use normalize::{Reading, WeatherNormalizer};
pub use source::{HttpWeatherSource, WeatherError, WeatherSource};

/// Number of days in every forecast
pub const FORECAST_DAYS: usize = 7;

/// A geographic position supplied by the caller
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lng: f64,
}

/// One measured quantity served by its own endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Temperature,
    Humidity,
    WindSpeed,
    WindDirection,
    Rainfall,
}

impl Metric {
    /// All metrics, in request order
    pub const ALL: [Metric; 5] = [
        Metric::Temperature,
        Metric::Humidity,
        Metric::WindSpeed,
        Metric::WindDirection,
        Metric::Rainfall,
    ];

    /// Value substituted when a reading is absent or malformed
    pub fn default_value(self) -> f64 {
        match self {
            Metric::Temperature => 28.0,
            Metric::Humidity => 75.0,
            Metric::WindSpeed => 2.5,
            Metric::WindDirection => 180.0,
            Metric::Rainfall => 0.0,
        }
    }

    /// Short lowercase name used in logs
    pub fn label(self) -> &'static str {
        match self {
            Metric::Temperature => "temperature",
            Metric::Humidity => "humidity",
            Metric::WindSpeed => "wind speed",
            Metric::WindDirection => "wind direction",
            Metric::Rainfall => "rainfall",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A remote resource the pipeline reads from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Single-metric current readings
    Metric(Metric),
    /// Multi-day forecast
    Forecast,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Metric(metric) => metric.fmt(f),
            Endpoint::Forecast => f.write_str("forecast"),
        }
    }
}

/// Weather icon, serialized as its OpenWeatherMap icon code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeatherIcon {
    #[serde(rename = "01d")]
    Clear,
    #[serde(rename = "02d")]
    PartlyCloudy,
    #[serde(rename = "04d")]
    Cloudy,
    #[serde(rename = "09d")]
    HeavyRain,
    #[serde(rename = "10d")]
    LightRain,
    #[serde(rename = "11d")]
    Thunderstorm,
}

impl WeatherIcon {
    /// OpenWeatherMap icon code
    pub fn code(&self) -> &'static str {
        match self {
            WeatherIcon::Clear => "01d",
            WeatherIcon::PartlyCloudy => "02d",
            WeatherIcon::Cloudy => "04d",
            WeatherIcon::HeavyRain => "09d",
            WeatherIcon::LightRain => "10d",
            WeatherIcon::Thunderstorm => "11d",
        }
    }

    /// Terminal glyph for the icon
    pub fn symbol(&self) -> &'static str {
        match self {
            WeatherIcon::Clear => "☀",
            WeatherIcon::PartlyCloudy => "⛅",
            WeatherIcon::Cloudy => "☁",
            WeatherIcon::HeavyRain => "🌧",
            WeatherIcon::LightRain => "🌦",
            WeatherIcon::Thunderstorm => "⛈",
        }
    }
}

/// Classified current conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    HeavyRain,
    LightShowers,
    VeryHumid,
    VeryWarm,
    Cool,
    PartlyCloudy,
}

impl Condition {
    /// Human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Condition::HeavyRain => "Heavy rain",
            Condition::LightShowers => "Light showers",
            Condition::VeryHumid => "Very humid",
            Condition::VeryWarm => "Very warm",
            Condition::Cool => "Cool",
            Condition::PartlyCloudy => "Partly cloudy",
        }
    }
}

/// Normalized current weather
///
/// Invariants: `visibility` is 10 km below 1 mm of rain and
/// `max(5, 10 - rainfall)` otherwise; `suitable` holds exactly when
/// `20 < temperature < 35`, `wind_speed < 8` and `rainfall < 2`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentWeather {
    /// Temperature in Celsius, rounded
    pub temperature: i32,
    /// Human-readable description of the conditions
    pub description: String,
    /// Icon for the conditions
    pub icon: WeatherIcon,
    /// Relative humidity percentage, rounded
    pub humidity: u8,
    /// Wind speed in m/s
    pub wind_speed: f64,
    /// Wind direction in degrees
    pub wind_direction: f64,
    /// Visibility in km
    pub visibility: f64,
    /// Display name of the location
    pub location: String,
    /// Rainfall in mm
    pub rainfall: f64,
    /// Whether conditions suit an outdoor cleanup
    pub suitable: bool,
}

/// One day of the forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastDay {
    /// Calendar date of the forecast
    pub date: NaiveDate,
    /// Short weekday name, e.g. "Mon"
    pub day_name: String,
    /// Month and day, e.g. "Oct 16"
    pub date_label: String,
    /// Forecast phrase, e.g. "Thundery Showers"
    pub forecast_text: String,
    /// High temperature in Celsius
    pub temp_high: f64,
    /// Low temperature in Celsius
    pub temp_low: f64,
    /// High relative humidity percentage
    pub humidity_high: f64,
    /// Low relative humidity percentage
    pub humidity_low: f64,
    /// Wind summary
    pub wind: String,
    /// Icon matched from the forecast phrase
    pub icon: WeatherIcon,
}

/// Current weather together with its 7-day forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    #[serde(flatten)]
    pub current: CurrentWeather,
    pub forecast: [ForecastDay; FORECAST_DAYS],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_defaults() {
        assert_eq!(Metric::Temperature.default_value(), 28.0);
        assert_eq!(Metric::Humidity.default_value(), 75.0);
        assert_eq!(Metric::WindSpeed.default_value(), 2.5);
        assert_eq!(Metric::WindDirection.default_value(), 180.0);
        assert_eq!(Metric::Rainfall.default_value(), 0.0);
    }

    #[test]
    fn test_endpoint_display() {
        assert_eq!(Endpoint::Metric(Metric::WindSpeed).to_string(), "wind speed");
        assert_eq!(Endpoint::Forecast.to_string(), "forecast");
    }

    #[test]
    fn test_icon_serializes_as_code() {
        let json = serde_json::to_string(&WeatherIcon::Thunderstorm).unwrap();
        assert_eq!(json, "\"11d\"");

        let icon: WeatherIcon = serde_json::from_str("\"09d\"").unwrap();
        assert_eq!(icon, WeatherIcon::HeavyRain);
        assert_eq!(icon.code(), "09d");
    }

    #[test]
    fn test_current_weather_uses_camel_case_fields() {
        let current = CurrentWeather {
            temperature: 28,
            description: "Partly cloudy".to_string(),
            icon: WeatherIcon::PartlyCloudy,
            humidity: 75,
            wind_speed: 2.5,
            wind_direction: 180.0,
            visibility: 10.0,
            location: "Singapore".to_string(),
            rainfall: 0.0,
            suitable: true,
        };

        let value = serde_json::to_value(&current).unwrap();
        assert_eq!(value["windSpeed"], 2.5);
        assert_eq!(value["windDirection"], 180.0);
        assert_eq!(value["icon"], "02d");
        assert!(value.get("wind_speed").is_none());
    }
}
