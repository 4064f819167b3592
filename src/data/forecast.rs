//! 7-day forecast construction
//!
//! The forecast endpoint may return fewer than seven days. Days it does
//! return are parsed leniently (missing fields get bounded random values);
//! days beyond it are synthesized from a fixed phrase cycle.

use std::ops::Range;

use chrono::{Duration, NaiveDate};
use rand::Rng;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

use super::{ForecastDay, WeatherIcon, FORECAST_DAYS};

/// Forecast text used when a day has none
const DEFAULT_FORECAST_TEXT: &str = "Partly Cloudy";

/// Wind summary used when a day has none
const DEFAULT_WIND: &str = "Light";

/// Phrases cycled through for days the API did not return
const EXTENDED_PHRASES: [&str; 5] = [
    "Partly Cloudy",
    "Cloudy",
    "Light Showers",
    "Thundery Showers",
    "Fair",
];

/// Forecast phrase to icon, checked in order; first substring match wins
const PHRASE_ICONS: [(&str, WeatherIcon); 6] = [
    ("Fair", WeatherIcon::Clear),
    ("Partly Cloudy", WeatherIcon::PartlyCloudy),
    ("Cloudy", WeatherIcon::Cloudy),
    ("Light Showers", WeatherIcon::LightRain),
    ("Thundery Showers", WeatherIcon::Thunderstorm),
    ("Heavy Rain", WeatherIcon::HeavyRain),
];

pub(crate) const TEMP_HIGH_RANGE: Range<i32> = 28..32;
pub(crate) const TEMP_LOW_RANGE: Range<i32> = 24..26;
pub(crate) const HUMIDITY_HIGH_RANGE: Range<i32> = 85..95;
pub(crate) const HUMIDITY_LOW_RANGE: Range<i32> = 65..75;

/// Per-day entries of the forecast endpoint, `items[0].forecasts`
#[derive(Debug, Clone, Default)]
pub struct RawForecastResponse {
    days: Vec<RawForecastDay>,
}

/// One day as returned by the API; every field may be absent or malformed
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawForecastDay {
    #[serde(default, deserialize_with = "lenient")]
    pub forecast: Option<String>,
    /// Temperatures as text, e.g. "31°C"
    #[serde(default, deserialize_with = "lenient")]
    pub temperature: Option<RawRange<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub relative_humidity: Option<RawRange<f64>>,
    #[serde(default, deserialize_with = "lenient")]
    pub wind: Option<RawWind>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
pub struct RawRange<T> {
    #[serde(default, deserialize_with = "lenient")]
    pub high: Option<T>,
    #[serde(default, deserialize_with = "lenient")]
    pub low: Option<T>,
}

/// Wind as either plain text or `{ speed: { low, high }, direction }`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawWind {
    Text(String),
    Detailed {
        #[serde(default, deserialize_with = "lenient")]
        speed: Option<RawRange<f64>>,
        #[serde(default, deserialize_with = "lenient")]
        direction: Option<String>,
    },
}

/// Decodes a field, turning a value of the wrong type into `None`
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

impl RawWind {
    /// Summary text, or `None` when the structure carries nothing usable
    pub fn summary(&self) -> Option<String> {
        match self {
            RawWind::Text(text) if !text.trim().is_empty() => Some(text.clone()),
            RawWind::Text(_) => None,
            RawWind::Detailed { speed, direction } => {
                let speed = speed
                    .as_ref()
                    .and_then(|s| Some(format!("{}-{} km/h", s.low?, s.high?)));
                match (direction.as_deref(), speed) {
                    (Some(direction), Some(speed)) => Some(format!("{} {}", direction, speed)),
                    (Some(direction), None) => Some(direction.to_string()),
                    (None, speed) => speed,
                }
            }
        }
    }
}

impl RawForecastDay {
    /// Decodes one entry; anything that is not an object yields an empty day
    pub fn from_json(entry: &Value) -> Self {
        serde_json::from_value(entry.clone()).unwrap_or_default()
    }
}

impl RawForecastResponse {
    /// Decodes a forecast body without ever failing
    ///
    /// A body without an array at `items[0].forecasts` has no days. Each
    /// entry is decoded on its own, so one malformed day cannot hide the
    /// others.
    pub fn from_json(body: &Value) -> Self {
        let days = body
            .pointer("/items/0/forecasts")
            .and_then(Value::as_array)
            .map(|entries| entries.iter().map(RawForecastDay::from_json).collect())
            .unwrap_or_default();
        Self { days }
    }

    pub fn days(&self) -> &[RawForecastDay] {
        &self.days
    }
}

/// Expands a forecast response into exactly [`FORECAST_DAYS`] days
#[derive(Debug, Clone, Copy, Default)]
pub struct ForecastBuilder;

impl ForecastBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Builds the forecast starting at `today`
    ///
    /// Day `i` uses the `i`-th raw entry when present and a synthesized entry
    /// otherwise. Random fallbacks are drawn from `rng`.
    pub fn build<R: Rng>(
        &self,
        raw: &RawForecastResponse,
        today: NaiveDate,
        rng: &mut R,
    ) -> [ForecastDay; FORECAST_DAYS] {
        let entries = raw.days();
        if entries.len() < FORECAST_DAYS {
            debug!(
                received = entries.len(),
                synthesized = FORECAST_DAYS - entries.len(),
                "extending short forecast"
            );
        }

        std::array::from_fn(|i| {
            let date = day_offset(today, i);
            match entries.get(i) {
                Some(entry) => from_raw(entry, date, rng),
                None => synthesize(i, date, rng),
            }
        })
    }
}

/// Converts one raw entry, filling gaps with bounded random values
fn from_raw<R: Rng>(entry: &RawForecastDay, date: NaiveDate, rng: &mut R) -> ForecastDay {
    let text = entry
        .forecast
        .as_deref()
        .filter(|text| !text.trim().is_empty());
    let temperature = entry.temperature.as_ref();
    let humidity = entry.relative_humidity.as_ref();

    let temp_high = temperature
        .and_then(|t| t.high.as_deref())
        .and_then(extract_temperature)
        .unwrap_or_else(|| random_in(rng, TEMP_HIGH_RANGE));
    let temp_low = temperature
        .and_then(|t| t.low.as_deref())
        .and_then(extract_temperature)
        .unwrap_or_else(|| random_in(rng, TEMP_LOW_RANGE));
    let humidity_high = humidity
        .and_then(|h| h.high)
        .unwrap_or_else(|| random_in(rng, HUMIDITY_HIGH_RANGE));
    let humidity_low = humidity
        .and_then(|h| h.low)
        .unwrap_or_else(|| random_in(rng, HUMIDITY_LOW_RANGE));

    let (day_name, date_label) = day_labels(date);
    ForecastDay {
        date,
        day_name,
        date_label,
        forecast_text: text.unwrap_or(DEFAULT_FORECAST_TEXT).to_string(),
        temp_high,
        temp_low,
        humidity_high,
        humidity_low,
        wind: entry
            .wind
            .as_ref()
            .and_then(RawWind::summary)
            .unwrap_or_else(|| DEFAULT_WIND.to_string()),
        icon: forecast_icon(text),
    }
}

/// Generates a plausible day the API did not cover
fn synthesize<R: Rng>(index: usize, date: NaiveDate, rng: &mut R) -> ForecastDay {
    let text = EXTENDED_PHRASES[index % EXTENDED_PHRASES.len()];
    let (day_name, date_label) = day_labels(date);
    ForecastDay {
        date,
        day_name,
        date_label,
        forecast_text: text.to_string(),
        temp_high: random_in(rng, TEMP_HIGH_RANGE),
        temp_low: random_in(rng, TEMP_LOW_RANGE),
        humidity_high: random_in(rng, HUMIDITY_HIGH_RANGE),
        humidity_low: random_in(rng, HUMIDITY_LOW_RANGE),
        wind: DEFAULT_WIND.to_string(),
        icon: forecast_icon(Some(text)),
    }
}

/// Parses the first run of decimal digits, e.g. "31°C" -> 31
pub fn extract_temperature(text: &str) -> Option<f64> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let digits: String = text[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse::<f64>().ok()
}

/// Matches a forecast phrase against the icon table
pub fn forecast_icon(text: Option<&str>) -> WeatherIcon {
    text.and_then(|text| {
        PHRASE_ICONS
            .iter()
            .find(|(phrase, _)| text.contains(phrase))
            .map(|(_, icon)| *icon)
    })
    .unwrap_or(WeatherIcon::PartlyCloudy)
}

/// The date `index` days after `today`
pub(crate) fn day_offset(today: NaiveDate, index: usize) -> NaiveDate {
    today + Duration::days(index as i64)
}

/// Short weekday name and "Mon D" label for a date
pub(crate) fn day_labels(date: NaiveDate) -> (String, String) {
    (
        date.format("%a").to_string(),
        date.format("%b %-d").to_string(),
    )
}

/// Uniform whole number in `range`, as f64
pub(crate) fn random_in<R: Rng>(rng: &mut R, range: Range<i32>) -> f64 {
    f64::from(rng.gen_range(range))
}
