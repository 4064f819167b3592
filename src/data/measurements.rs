//! Concurrent fetching of the current-weather measurements
//!
//! Each metric lives on its own endpoint. The five requests are issued
//! together and joined; temperature is mandatory, the other four degrade
//! independently to "missing".

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use super::forecast::RawForecastResponse;
use super::{Endpoint, Metric, WeatherError, WeatherSource};

/// Raw bodies of the five measurement endpoints
///
/// Temperature is always present; a `None` slot means that endpoint failed
/// and normalization substitutes the metric default.
#[derive(Debug, Clone, PartialEq)]
pub struct PartialMeasurementSet {
    pub temperature: Value,
    pub humidity: Option<Value>,
    pub wind_speed: Option<Value>,
    pub wind_direction: Option<Value>,
    pub rainfall: Option<Value>,
}

impl PartialMeasurementSet {
    /// Returns the raw body for `metric`, if it was fetched
    pub fn get(&self, metric: Metric) -> Option<&Value> {
        match metric {
            Metric::Temperature => Some(&self.temperature),
            Metric::Humidity => self.humidity.as_ref(),
            Metric::WindSpeed => self.wind_speed.as_ref(),
            Metric::WindDirection => self.wind_direction.as_ref(),
            Metric::Rainfall => self.rainfall.as_ref(),
        }
    }
}

/// Fetches measurement and forecast payloads from a [`WeatherSource`]
///
/// No retries: a failed request is reported once and the caller decides
/// which fallback applies.
#[derive(Clone)]
pub struct MeasurementFetcher {
    source: Arc<dyn WeatherSource>,
}

impl MeasurementFetcher {
    /// Create a fetcher reading from `source`
    pub fn new(source: Arc<dyn WeatherSource>) -> Self {
        Self { source }
    }

    /// Fetches all five metrics concurrently
    ///
    /// # Returns
    /// * `Ok(PartialMeasurementSet)` - temperature succeeded; other slots may be empty
    /// * `Err(WeatherError)` - the temperature request failed
    pub async fn fetch_current_measurements(&self) -> Result<PartialMeasurementSet, WeatherError> {
        let (temperature, humidity, wind_speed, wind_direction, rainfall) = futures::join!(
            self.fetch_metric(Metric::Temperature),
            self.fetch_metric(Metric::Humidity),
            self.fetch_metric(Metric::WindSpeed),
            self.fetch_metric(Metric::WindDirection),
            self.fetch_metric(Metric::Rainfall),
        );

        Ok(PartialMeasurementSet {
            temperature: temperature?,
            humidity: optional(Metric::Humidity, humidity),
            wind_speed: optional(Metric::WindSpeed, wind_speed),
            wind_direction: optional(Metric::WindDirection, wind_direction),
            rainfall: optional(Metric::Rainfall, rainfall),
        })
    }

    /// Fetches and decodes the forecast endpoint
    ///
    /// Only a failed request is an error; an unexpected body shape decodes to
    /// fewer (possibly zero) days.
    pub async fn fetch_forecast_raw(&self) -> Result<RawForecastResponse, WeatherError> {
        let body = self.source.fetch_json(Endpoint::Forecast).await?;
        let raw = RawForecastResponse::from_json(&body);
        debug!(days = raw.days().len(), "forecast received");
        Ok(raw)
    }

    async fn fetch_metric(&self, metric: Metric) -> Result<Value, WeatherError> {
        self.source.fetch_json(Endpoint::Metric(metric)).await
    }
}

/// Keeps an optional metric's body, logging the failure otherwise
fn optional(metric: Metric, result: Result<Value, WeatherError>) -> Option<Value> {
    match result {
        Ok(body) => Some(body),
        Err(error) => {
            warn!(%metric, %error, "measurement unavailable, default will be used");
            None
        }
    }
}
