//! Normalization of raw measurements into [`CurrentWeather`]
//!
//! The latest reading of each metric is taken from the first item's first
//! reading. Anything absent or of the wrong shape becomes
//! [`Reading::Missing`] and the metric default is used instead; this stage
//! never fails.

use serde_json::Value;
use tracing::debug;

use super::{Condition, CurrentWeather, Metric, PartialMeasurementSet, WeatherIcon};

/// JSON pointer to the latest reading of a measurement payload
const LATEST_READING: &str = "/items/0/readings/0/value";

/// Outcome of extracting one metric from its payload
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reading {
    /// A numeric reading was found
    Parsed(f64),
    /// Payload absent, empty or malformed
    Missing,
}

impl Reading {
    /// Extracts the latest reading from a measurement payload
    pub fn latest(payload: Option<&Value>) -> Self {
        payload
            .and_then(|body| body.pointer(LATEST_READING))
            .and_then(Value::as_f64)
            .filter(|value| value.is_finite())
            .map_or(Reading::Missing, Reading::Parsed)
    }

    /// Returns the reading, or the default for `metric` when missing
    pub fn or_default(self, metric: Metric) -> f64 {
        match self {
            Reading::Parsed(value) => value,
            Reading::Missing => metric.default_value(),
        }
    }
}

/// Turns a [`PartialMeasurementSet`] into a [`CurrentWeather`]
#[derive(Debug, Clone)]
pub struct WeatherNormalizer {
    location: String,
}

impl WeatherNormalizer {
    /// Create a normalizer labelling records with `location`
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
        }
    }

    pub fn normalize(&self, measurements: &PartialMeasurementSet) -> CurrentWeather {
        let value = |metric: Metric| {
            let reading = Reading::latest(measurements.get(metric));
            if reading == Reading::Missing {
                debug!(%metric, default = metric.default_value(), "no reading, using default");
            }
            reading.or_default(metric)
        };

        let temperature = value(Metric::Temperature);
        let humidity = value(Metric::Humidity);
        let wind_speed = value(Metric::WindSpeed);
        let wind_direction = value(Metric::WindDirection);
        let rainfall = value(Metric::Rainfall);

        let rounded_temperature = temperature.round() as i32;

        CurrentWeather {
            temperature: rounded_temperature,
            description: classify_condition(temperature, humidity, rainfall)
                .description()
                .to_string(),
            icon: classify_icon(temperature, humidity, rainfall),
            humidity: humidity_percent(humidity),
            wind_speed,
            wind_direction,
            visibility: visibility_km(rainfall),
            location: self.location.clone(),
            rainfall,
            suitable: is_suitable(f64::from(rounded_temperature), wind_speed, rainfall),
        }
    }
}

/// Rounds a humidity reading to a whole percentage
///
/// Readings outside 0..=100 are clamped and logged.
fn humidity_percent(humidity: f64) -> u8 {
    let rounded = humidity.round();
    let clamped = rounded.clamp(0.0, 100.0);
    if clamped != rounded {
        debug!(humidity, clamped, "humidity reading out of range");
    }
    clamped as u8
}

/// Classifies conditions; the first matching rule wins
pub fn classify_condition(temperature: f64, humidity: f64, rainfall: f64) -> Condition {
    if rainfall > 5.0 {
        Condition::HeavyRain
    } else if rainfall > 1.0 {
        Condition::LightShowers
    } else if humidity > 85.0 {
        Condition::VeryHumid
    } else if temperature > 32.0 {
        Condition::VeryWarm
    } else if temperature < 22.0 {
        Condition::Cool
    } else {
        Condition::PartlyCloudy
    }
}

/// Picks the icon for current conditions
///
/// Shares the first four rules of [`classify_condition`]; cool weather has
/// no icon of its own and shows partly cloudy.
pub fn classify_icon(temperature: f64, humidity: f64, rainfall: f64) -> WeatherIcon {
    if rainfall > 5.0 {
        WeatherIcon::HeavyRain
    } else if rainfall > 1.0 {
        WeatherIcon::LightRain
    } else if humidity > 85.0 {
        WeatherIcon::Cloudy
    } else if temperature > 32.0 {
        WeatherIcon::Clear
    } else {
        WeatherIcon::PartlyCloudy
    }
}

/// Visibility in km for the given rainfall in mm
pub fn visibility_km(rainfall: f64) -> f64 {
    if rainfall < 1.0 {
        10.0
    } else {
        (10.0 - rainfall).max(5.0)
    }
}

/// Whether conditions suit an outdoor cleanup. Humidity plays no part.
pub fn is_suitable(temperature: f64, wind_speed: f64, rainfall: f64) -> bool {
    temperature > 20.0 && temperature < 35.0 && wind_speed < 8.0 && rainfall < 2.0
}
