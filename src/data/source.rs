//! Weather data source
//!
//! A `WeatherSource` returns the JSON body of one endpoint. The HTTP
//! implementation talks to the data.gov.sg APIs; tests substitute canned
//! responses through the same trait.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use super::Endpoint;
use crate::config::{Endpoints, WeatherConfig};

/// Errors that can occur when fetching weather data
#[derive(Debug, Error)]
pub enum WeatherError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Endpoint answered with a non-success status
    #[error("{endpoint} endpoint returned status {status}")]
    Status { endpoint: Endpoint, status: u16 },

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Source could not produce a response for another reason
    #[error("Weather source unavailable: {0}")]
    Unavailable(String),
}

/// Anything that can return the JSON body of a weather endpoint
#[async_trait]
pub trait WeatherSource: Send + Sync {
    /// Fetches `endpoint` and returns its parsed JSON body
    ///
    /// A non-success status is an error; the body is not inspected beyond
    /// being valid JSON.
    async fn fetch_json(&self, endpoint: Endpoint) -> Result<Value, WeatherError>;
}

/// Weather source backed by HTTP GET requests
#[derive(Debug, Clone)]
pub struct HttpWeatherSource {
    client: Client,
    endpoints: Endpoints,
}

impl HttpWeatherSource {
    /// Create a new source with a default HTTP client
    pub fn new(endpoints: Endpoints) -> Self {
        Self {
            client: Client::new(),
            endpoints,
        }
    }

    /// Create a new source with a custom HTTP client
    pub fn with_client(client: Client, endpoints: Endpoints) -> Self {
        Self { client, endpoints }
    }

    /// Create a source from configuration, applying the request timeout if set
    pub fn from_config(config: &WeatherConfig) -> Result<Self, WeatherError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self::with_client(builder.build()?, config.endpoints.clone()))
    }
}

#[async_trait]
impl WeatherSource for HttpWeatherSource {
    async fn fetch_json(&self, endpoint: Endpoint) -> Result<Value, WeatherError> {
        let url = self.endpoints.url(endpoint);
        debug!(%endpoint, url, "requesting weather endpoint");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::Status {
                endpoint,
                status: status.as_u16(),
            });
        }

        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}
