//! Plain-text rendering of a report for non-interactive output

use std::fmt::Write;

use crate::data::{ForecastDay, WeatherReport};

/// Suitability verdict shown under the current conditions
pub fn suitability_text(suitable: bool) -> &'static str {
    if suitable {
        "Great for cleanup!"
    } else {
        "Check conditions"
    }
}

/// Heading for a forecast row; the first day is always "Today"
pub fn day_title(index: usize, day: &ForecastDay) -> &str {
    if index == 0 {
        "Today"
    } else {
        &day.day_name
    }
}

/// Formats the whole report as lines of text
pub fn format_report(report: &WeatherReport) -> String {
    let current = &report.current;
    let mut out = String::new();

    // Writing into a String cannot fail
    let _ = writeln!(out, "{}", current.location);
    let _ = writeln!(
        out,
        "{} {}°C  {}",
        current.icon.symbol(),
        current.temperature,
        current.description
    );
    let _ = writeln!(out, "  Humidity    {}%", current.humidity);
    let _ = writeln!(
        out,
        "  Wind        {} m/s from {}°",
        current.wind_speed, current.wind_direction
    );
    let _ = writeln!(out, "  Visibility  {} km", current.visibility);
    let _ = writeln!(out, "  Rainfall    {} mm", current.rainfall);
    let _ = writeln!(out, "{}", suitability_text(current.suitable));
    let _ = writeln!(out);
    let _ = writeln!(out, "7-Day Forecast");

    for (i, day) in report.forecast.iter().enumerate() {
        let _ = writeln!(out, "{}", forecast_line(i, day));
    }
    out
}

fn forecast_line(index: usize, day: &ForecastDay) -> String {
    format!(
        "  {:<6}{:<8}{} {:>3}°/{:<3}° {:<18} humidity {}-{}%  wind {}",
        day_title(index, day),
        day.date_label,
        day.icon.symbol(),
        day.temp_high,
        day.temp_low,
        day.forecast_text,
        day.humidity_low,
        day.humidity_high,
        day.wind
    )
}
