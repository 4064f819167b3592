//! Integration tests for CLI argument handling
//!
//! Runs the binary against an unreachable API base so every request fails
//! fast and the fallback report is printed.

use std::process::Command;

use tempfile::TempDir;

/// Helper to run the CLI with given args and capture output
///
/// HOME and the XDG directories point into `home` so nothing touches the
/// real data directory.
fn run_cli(home: &TempDir, args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_shoresquad"))
        .args(args)
        .env("HOME", home.path())
        .env("XDG_DATA_HOME", home.path().join("data"))
        .env("XDG_CACHE_HOME", home.path().join("cache"))
        .env_remove("RUST_LOG")
        .env_remove("SHORESQUAD_API_BASE")
        .env_remove("SHORESQUAD_SEED")
        .output()
        .expect("Failed to execute shoresquad")
}

fn home() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

const OFFLINE: [&str; 4] = ["--api-base", "http://127.0.0.1:9", "--timeout-secs", "2"];

#[test]
fn test_help_flag_exits_successfully() {
    let output = run_cli(&home(), &["--help"]);
    assert!(
        output.status.success(),
        "Expected --help to exit successfully"
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("shoresquad"), "Help should mention shoresquad");
    assert!(stdout.contains("--lat"), "Help should mention --lat flag");
    assert!(stdout.contains("--format"), "Help should mention --format flag");
}

#[test]
fn test_invalid_latitude_prints_error_and_exits() {
    let output = run_cli(&home(), &["--lat", "95", "--lng", "103.8"]);
    assert!(!output.status.success(), "Expected invalid latitude to fail");
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid latitude"),
        "Should print error message about latitude: {}",
        stderr
    );
}

#[test]
fn test_lat_without_lng_is_rejected() {
    let output = run_cli(&home(), &["--lat", "1.35"]);
    assert!(!output.status.success());
}

#[test]
fn test_unknown_format_is_rejected() {
    let output = run_cli(&home(), &["--format", "yaml"]);
    assert!(!output.status.success());
}

#[test]
fn test_offline_text_output_is_fallback_report() {
    let mut args = OFFLINE.to_vec();
    args.extend(["--seed", "4"]);
    let output = run_cli(&home(), &args);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Singapore"));
    assert!(stdout.contains("28°C  Partly cloudy"));
    assert!(stdout.contains("Great for cleanup!"));
    assert!(stdout.contains("Today"));

    // Degradation is only visible in the log
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("using mock current weather"));
    assert!(stderr.contains("using mock forecast"));
}

#[test]
fn test_offline_json_output_has_camel_case_fields() {
    let mut args = OFFLINE.to_vec();
    args.extend(["--format", "json", "--location-name", "Changi Beach"]);
    let output = run_cli(&home(), &args);

    assert!(output.status.success());
    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(report["temperature"], 28);
    assert_eq!(report["location"], "Changi Beach");
    assert_eq!(report["windSpeed"], 2.5);
    assert_eq!(report["icon"], "02d");
    assert_eq!(report["forecast"].as_array().map(Vec::len), Some(7));
}

#[test]
fn test_explicit_location_is_remembered_and_forgotten() {
    let home = home();
    let stored = home
        .path()
        .join("data")
        .join("shoresquad")
        .join("shoresquad_lastLocation.json");

    let mut args = OFFLINE.to_vec();
    args.extend(["--lat", "1.3644", "--lng", "103.9915"]);
    assert!(run_cli(&home, &args).status.success());

    // Only assert on platforms where the XDG override applies
    if cfg!(target_os = "linux") {
        assert!(stored.exists(), "lastLocation should be stored");

        let mut args = OFFLINE.to_vec();
        args.push("--forget-location");
        assert!(run_cli(&home, &args).status.success());
        assert!(!stored.exists(), "lastLocation should be removed");
    }
}

#[cfg(test)]
mod unit_tests {
    //! Unit tests for CLI parsing that don't require running the binary

    use clap::Parser;
    use shoresquad::cli::{Cli, CliError, OutputFormat, StartupConfig};
    use shoresquad::data::Coordinate;

    #[test]
    fn test_cli_no_args_has_no_coordinate() {
        let cli = Cli::parse_from(["shoresquad"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert!(config.coordinate.is_none());
        assert_eq!(config.format, OutputFormat::Text);
    }

    #[test]
    fn test_cli_coordinate_pair() {
        let cli = Cli::parse_from(["shoresquad", "--lat", "1.29", "--lng", "103.85"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(
            config.coordinate,
            Some(Coordinate {
                lat: 1.29,
                lng: 103.85
            })
        );
    }

    #[test]
    fn test_cli_tui_format() {
        let cli = Cli::parse_from(["shoresquad", "--format", "tui"]);
        assert_eq!(cli.format, OutputFormat::Tui);
    }

    #[test]
    fn test_startup_config_rejects_longitude() {
        let cli = Cli::parse_from(["shoresquad", "--lat", "0", "--lng", "200"]);
        assert_eq!(
            StartupConfig::from_cli(&cli),
            Err(CliError::InvalidLongitude(200.0))
        );
    }
}
