//! Command-line interface parsing for ShoreSquad
//!
//! Flags map onto [`WeatherConfig`], an optional explicit coordinate and the
//! output format. Most flags can also come from the environment.

use std::time::Duration;

use clap::{Parser, ValueEnum};
use thiserror::Error;

use crate::config::{Endpoints, WeatherConfig};
use crate::data::Coordinate;

/// Error types for CLI argument validation
#[derive(Debug, Error, PartialEq)]
pub enum CliError {
    #[error("Invalid latitude: {0}. Must be between -90 and 90")]
    InvalidLatitude(f64),

    #[error("Invalid longitude: {0}. Must be between -180 and 180")]
    InvalidLongitude(f64),
}

/// How the report is presented
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain-text summary on stdout
    #[default]
    Text,
    /// The report as JSON on stdout
    Json,
    /// Full-screen terminal view
    Tui,
}

/// ShoreSquad - beach cleanup weather for Singapore
#[derive(Parser, Debug)]
#[command(name = "shoresquad")]
#[command(about = "Current weather and 7-day forecast for beach cleanups")]
#[command(version)]
#[command(allow_negative_numbers = true)]
pub struct Cli {
    /// Latitude of the cleanup site (remembered for next time)
    #[arg(long, requires = "lng", env = "SHORESQUAD_LAT")]
    pub lat: Option<f64>,

    /// Longitude of the cleanup site
    #[arg(long, requires = "lat", env = "SHORESQUAD_LNG")]
    pub lng: Option<f64>,

    /// Base URL of the environment APIs
    #[arg(long, value_name = "URL", env = "SHORESQUAD_API_BASE")]
    pub api_base: Option<String>,

    /// Location label shown in the report
    #[arg(long, value_name = "NAME", env = "SHORESQUAD_LOCATION_NAME")]
    pub location_name: Option<String>,

    /// Seed for randomised fallback values
    #[arg(long, env = "SHORESQUAD_SEED")]
    pub seed: Option<u64>,

    /// Per-request timeout in seconds (no timeout by default)
    #[arg(long, value_name = "SECS", env = "SHORESQUAD_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, env = "SHORESQUAD_FORMAT")]
    pub format: OutputFormat,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "warn", env = "SHORESQUAD_LOG_LEVEL")]
    pub log_level: String,

    /// Forget the remembered location before resolving
    #[arg(long)]
    pub forget_location: bool,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone, PartialEq)]
pub struct StartupConfig {
    pub weather: WeatherConfig,
    /// Coordinate given on the command line, if any
    pub coordinate: Option<Coordinate>,
    pub format: OutputFormat,
    pub log_level: String,
    pub forget_location: bool,
}

impl StartupConfig {
    /// Validates parsed arguments and builds the startup configuration
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with defaults filled in
    /// * `Err(CliError)` if a coordinate is out of range
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let coordinate = match (cli.lat, cli.lng) {
            (Some(lat), Some(lng)) => Some(validate_coordinate(lat, lng)?),
            _ => None,
        };

        let mut weather = WeatherConfig::default();
        if let Some(base) = &cli.api_base {
            weather.endpoints = Endpoints::with_base_url(base);
        }
        if let Some(name) = &cli.location_name {
            weather.location_name = name.clone();
        }
        weather.seed = cli.seed;
        weather.timeout = cli.timeout_secs.map(Duration::from_secs);

        Ok(StartupConfig {
            weather,
            coordinate,
            format: cli.format,
            log_level: cli.log_level.clone(),
            forget_location: cli.forget_location,
        })
    }
}

/// Checks that a coordinate lies on the globe
pub fn validate_coordinate(lat: f64, lng: f64) -> Result<Coordinate, CliError> {
    if !(-90.0..=90.0).contains(&lat) {
        return Err(CliError::InvalidLatitude(lat));
    }
    if !(-180.0..=180.0).contains(&lng) {
        return Err(CliError::InvalidLongitude(lng));
    }
    Ok(Coordinate { lat, lng })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_LOCATION_NAME;

    #[test]
    fn test_validate_coordinate_accepts_bounds() {
        assert!(validate_coordinate(90.0, 180.0).is_ok());
        assert!(validate_coordinate(-90.0, -180.0).is_ok());
        assert!(validate_coordinate(1.3521, 103.8198).is_ok());
    }

    #[test]
    fn test_validate_coordinate_rejects_latitude() {
        assert_eq!(
            validate_coordinate(91.0, 0.0),
            Err(CliError::InvalidLatitude(91.0))
        );
    }

    #[test]
    fn test_validate_coordinate_rejects_longitude() {
        let err = validate_coordinate(0.0, -181.5).unwrap_err();
        assert_eq!(err, CliError::InvalidLongitude(-181.5));
        assert!(err.to_string().contains("Invalid longitude"));
    }

    #[test]
    fn test_validate_coordinate_rejects_nan() {
        assert!(validate_coordinate(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::parse_from(["shoresquad"]);
        assert!(cli.lat.is_none());
        assert_eq!(cli.format, OutputFormat::Text);
        assert_eq!(cli.log_level, "warn");
        assert!(!cli.forget_location);
    }

    #[test]
    fn test_cli_parse_negative_coordinates() {
        let cli = Cli::parse_from(["shoresquad", "--lat", "-33.86", "--lng", "151.2"]);
        assert_eq!(cli.lat, Some(-33.86));
        assert_eq!(cli.lng, Some(151.2));
    }

    #[test]
    fn test_cli_lat_requires_lng() {
        let result = Cli::try_parse_from(["shoresquad", "--lat", "1.3"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parse_format() {
        let cli = Cli::parse_from(["shoresquad", "--format", "json"]);
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(Cli::try_parse_from(["shoresquad", "--format", "xml"]).is_err());
    }

    #[test]
    fn test_startup_config_defaults() {
        let cli = Cli::parse_from(["shoresquad"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(config.weather, WeatherConfig::default());
        assert_eq!(config.weather.location_name, DEFAULT_LOCATION_NAME);
        assert!(config.coordinate.is_none());
    }

    #[test]
    fn test_startup_config_applies_overrides() {
        let cli = Cli::parse_from([
            "shoresquad",
            "--lat",
            "1.30",
            "--lng",
            "103.9",
            "--api-base",
            "http://localhost:8080/",
            "--location-name",
            "East Coast",
            "--seed",
            "99",
            "--timeout-secs",
            "5",
            "--forget-location",
        ]);
        let config = StartupConfig::from_cli(&cli).unwrap();

        assert_eq!(
            config.coordinate,
            Some(Coordinate {
                lat: 1.30,
                lng: 103.9
            })
        );
        assert_eq!(
            config.weather.endpoints.temperature,
            "http://localhost:8080/air-temperature"
        );
        assert_eq!(config.weather.location_name, "East Coast");
        assert_eq!(config.weather.seed, Some(99));
        assert_eq!(config.weather.timeout, Some(Duration::from_secs(5)));
        assert!(config.forget_location);
    }

    #[test]
    fn test_startup_config_invalid_latitude() {
        let cli = Cli::parse_from(["shoresquad", "--lat", "120", "--lng", "0"]);
        assert_eq!(
            StartupConfig::from_cli(&cli),
            Err(CliError::InvalidLatitude(120.0))
        );
    }
}
