//! Full-screen report view
//!
//! Current conditions on top, the 7-day forecast below and a help line at
//! the bottom.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::summary::{day_title, suitability_text};
use super::widgets::TrendSparkline;
use crate::app::{App, AppState};
use crate::data::{CurrentWeather, ForecastDay, WeatherReport};

/// Draws whatever the app state calls for
pub fn render(frame: &mut Frame, app: &App) {
    match (&app.state, &app.report) {
        (AppState::Report, Some(report)) => render_report(frame, app, report),
        _ => render_loading(frame),
    }
}

/// Centered loading message shown before the first report arrives
pub fn render_loading(frame: &mut Frame) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(3),
            Constraint::Percentage(45),
        ])
        .split(area);

    let loading = Paragraph::new("Fetching weather...")
        .style(Style::default().fg(Color::Cyan))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(" ShoreSquad "));

    frame.render_widget(loading, chunks[1]);
}

fn render_report(frame: &mut Frame, app: &App, report: &WeatherReport) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(9), // Current conditions
            Constraint::Min(10),   // Forecast
            Constraint::Length(1), // Help
        ])
        .split(frame.area());

    render_current(frame, &report.current, chunks[0]);
    render_forecast(frame, &report.forecast, chunks[1]);
    render_help(frame, app, chunks[2]);
}

/// Color for temperature (warmer = more red)
fn temperature_color(temp: f64) -> Color {
    if temp >= 32.0 {
        Color::Red
    } else if temp >= 28.0 {
        Color::LightRed
    } else if temp >= 22.0 {
        Color::Yellow
    } else {
        Color::Cyan
    }
}

fn render_current(frame: &mut Frame, current: &CurrentWeather, area: Rect) {
    let label = Style::default().fg(Color::DarkGray);
    let verdict_style = if current.suitable {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::LightRed).add_modifier(Modifier::BOLD)
    };

    let lines = vec![
        Line::from(vec![
            Span::styled(
                format!("{}°C", current.temperature),
                Style::default()
                    .fg(temperature_color(f64::from(current.temperature)))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("  {} {}", current.icon.symbol(), current.description)),
        ]),
        Line::from(Span::styled(suitability_text(current.suitable), verdict_style)),
        Line::from(""),
        Line::from(vec![
            Span::styled("Humidity    ", label),
            Span::raw(format!("{}%", current.humidity)),
        ]),
        Line::from(vec![
            Span::styled("Wind        ", label),
            Span::raw(format!(
                "{} m/s from {}°",
                current.wind_speed, current.wind_direction
            )),
        ]),
        Line::from(vec![
            Span::styled("Visibility  ", label),
            Span::raw(format!("{} km", current.visibility)),
        ]),
        Line::from(vec![
            Span::styled("Rainfall    ", label),
            Span::raw(format!("{} mm", current.rainfall)),
        ]),
    ];

    let block = Block::default()
        .title(format!(" {} ", current.location))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_forecast(frame: &mut Frame, forecast: &[ForecastDay], area: Rect) {
    let block = Block::default()
        .title(" 7-Day Forecast ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    let trend_row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(7), Constraint::Min(0)])
        .split(rows[0]);
    frame.render_widget(
        Paragraph::new("Highs").style(Style::default().fg(Color::DarkGray)),
        trend_row[0],
    );
    let highs: Vec<f64> = forecast.iter().map(|day| day.temp_high).collect();
    frame.render_widget(TrendSparkline::new(&highs).marker(0), trend_row[1]);

    let lines: Vec<Line> = forecast
        .iter()
        .enumerate()
        .map(|(i, day)| forecast_row(i, day))
        .collect();
    frame.render_widget(Paragraph::new(lines), rows[1]);
}

fn forecast_row(index: usize, day: &ForecastDay) -> Line<'_> {
    let title_style = if index == 0 {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };

    Line::from(vec![
        Span::styled(format!("{:<6}", day_title(index, day)), title_style),
        Span::styled(
            format!("{:<8}", day.date_label),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw(format!("{} ", day.icon.symbol())),
        Span::styled(
            format!("{:>3}°", day.temp_high),
            Style::default().fg(temperature_color(day.temp_high)),
        ),
        Span::raw(format!("/{:<3}° ", day.temp_low)),
        Span::raw(format!("{:<18}", day.forecast_text)),
        Span::styled(
            format!("{}-{}%  {}", day.humidity_low, day.humidity_high, day.wind),
            Style::default().fg(Color::DarkGray),
        ),
    ])
}

fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let freshness = app
        .last_refresh
        .map(|at| format!("Updated {}", at.format("%H:%M")))
        .unwrap_or_default();

    let help = Line::from(vec![
        Span::styled(" r", Style::default().fg(Color::Yellow)),
        Span::raw(" refresh  "),
        Span::styled("q", Style::default().fg(Color::Yellow)),
        Span::raw(" quit  "),
        Span::styled(freshness, Style::default().fg(Color::DarkGray)),
    ]);

    frame.render_widget(Paragraph::new(help), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::source::stub::StubSource;
    use crate::data::{Coordinate, FallbackGenerator};
    use crate::pipeline::WeatherPipeline;
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;

    fn test_app() -> App {
        let pipeline = WeatherPipeline::new(Arc::new(StubSource::new()), "Singapore");
        App::new(
            pipeline,
            Coordinate {
                lat: 1.3521,
                lng: 103.8198,
            },
        )
    }

    fn rendered(app: &App) -> String {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_loading_state_renders_loading_message() {
        let content = rendered(&test_app());
        assert!(content.contains("Fetching"));
        assert!(content.contains("ShoreSquad"));
    }

    #[test]
    fn test_report_renders_current_and_forecast() {
        let mut app = test_app();
        let today = NaiveDate::from_ymd_opt(2024, 7, 15).unwrap();
        app.apply_report(
            FallbackGenerator::new("Singapore").mock_report(today, &mut StdRng::seed_from_u64(5)),
        );

        let content = rendered(&app);
        assert!(content.contains("Singapore"));
        assert!(content.contains("28°C"));
        assert!(content.contains("Great for cleanup!"));
        assert!(content.contains("7-Day Forecast"));
        assert!(content.contains("Today"));
        assert!(content.contains("Thundery Showers"));
        assert!(content.contains("refresh"));
    }

    #[test]
    fn test_forecast_panel_draws_highs_trend() {
        let mut app = test_app();
        let today = NaiveDate::from_ymd_opt(2024, 7, 15).unwrap();
        app.apply_report(
            FallbackGenerator::new("Singapore").mock_report(today, &mut StdRng::seed_from_u64(5)),
        );

        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, &app)).unwrap();
        let buffer = terminal.backend().buffer();

        let (label_x, label_y) = (0..buffer.area.height)
            .flat_map(|y| (0..buffer.area.width).map(move |x| (x, y)))
            .find(|&(x, y)| {
                buffer.cell((x, y)).map(|cell| cell.symbol()) == Some("H")
                    && buffer.cell((x + 1, y)).map(|cell| cell.symbol()) == Some("i")
            })
            .expect("highs label should be drawn");

        let blocks: Vec<(String, Color)> = (0..7)
            .filter_map(|i| buffer.cell((label_x + 7 + i, label_y)))
            .map(|cell| (cell.symbol().to_string(), cell.fg))
            .collect();
        assert_eq!(blocks.len(), 7);
        assert!(blocks
            .iter()
            .all(|(symbol, _)| "▁▂▃▄▅▆▇█".contains(symbol.as_str())));
        assert_eq!(blocks[0].1, Color::Yellow);
        assert_eq!(blocks[1].1, Color::LightRed);
    }

    #[test]
    fn test_temperature_color_scale() {
        assert_eq!(temperature_color(33.0), Color::Red);
        assert_eq!(temperature_color(28.0), Color::LightRed);
        assert_eq!(temperature_color(25.0), Color::Yellow);
        assert_eq!(temperature_color(18.0), Color::Cyan);
    }
}
