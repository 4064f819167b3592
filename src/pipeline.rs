//! Weather report assembly
//!
//! `WeatherPipeline` is the single entry point for consumers: it always
//! yields a complete [`WeatherReport`]. Current weather and the forecast are
//! fetched concurrently and fall back independently; an unexpected panic
//! anywhere below yields a fully mocked report.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use futures::FutureExt;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, info, warn};

use crate::config::WeatherConfig;
use crate::data::{
    Coordinate, CurrentWeather, FallbackGenerator, ForecastBuilder, ForecastDay,
    HttpWeatherSource, MeasurementFetcher, WeatherError, WeatherNormalizer, WeatherReport,
    WeatherSource, FORECAST_DAYS,
};

/// Fetches, normalizes and, where needed, substitutes weather data
#[derive(Clone)]
pub struct WeatherPipeline {
    fetcher: MeasurementFetcher,
    normalizer: WeatherNormalizer,
    forecast_builder: ForecastBuilder,
    fallback: FallbackGenerator,
    seed: Option<u64>,
}

impl WeatherPipeline {
    /// Create a pipeline reading from `source`, labelling reports with `location`
    pub fn new(source: Arc<dyn WeatherSource>, location: impl Into<String>) -> Self {
        let location = location.into();
        Self {
            fetcher: MeasurementFetcher::new(source),
            normalizer: WeatherNormalizer::new(location.clone()),
            forecast_builder: ForecastBuilder::new(),
            fallback: FallbackGenerator::new(location),
            seed: None,
        }
    }

    /// Create an HTTP-backed pipeline from configuration
    pub fn from_config(config: &WeatherConfig) -> Result<Self, WeatherError> {
        let source = HttpWeatherSource::from_config(config)?;
        Ok(Self::new(Arc::new(source), config.location_name.clone()).with_seed(config.seed))
    }

    /// Makes random fallback values reproducible
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Produces the report for `coordinates`, dated from the local calendar day
    ///
    /// Never fails. The data source is city-wide, so coordinates only appear
    /// in the log.
    pub async fn fetch_weather(&self, coordinates: Coordinate) -> WeatherReport {
        self.fetch_weather_on(coordinates, Local::now().date_naive())
            .await
    }

    /// Same as [`fetch_weather`](Self::fetch_weather) with an explicit first day
    pub async fn fetch_weather_on(&self, coordinates: Coordinate, today: NaiveDate) -> WeatherReport {
        info!(lat = coordinates.lat, lng = coordinates.lng, %today, "fetching weather report");

        let assembled = AssertUnwindSafe(async {
            futures::join!(self.current_weather(), self.forecast(today))
        })
        .catch_unwind()
        .await;

        match assembled {
            Ok((current, forecast)) => WeatherReport { current, forecast },
            Err(panic) => {
                error!(
                    reason = panic_message(panic.as_ref()),
                    "weather assembly panicked, using fully mocked report"
                );
                self.fallback.mock_report(today, &mut self.rng())
            }
        }
    }

    async fn current_weather(&self) -> CurrentWeather {
        match self.fetcher.fetch_current_measurements().await {
            Ok(measurements) => self.normalizer.normalize(&measurements),
            Err(error) => {
                warn!(%error, "temperature unavailable, using mock current weather");
                self.fallback.mock_current()
            }
        }
    }

    async fn forecast(&self, today: NaiveDate) -> [ForecastDay; FORECAST_DAYS] {
        let raw = self.fetcher.fetch_forecast_raw().await;
        let mut rng = self.rng();
        match raw {
            Ok(raw) => self.forecast_builder.build(&raw, today, &mut rng),
            Err(error) => {
                warn!(%error, "forecast unavailable, using mock forecast");
                self.fallback.mock_forecast(today, &mut rng)
            }
        }
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "unknown panic"
    }
}
