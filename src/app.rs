//! Application state for the full-screen view
//!
//! Holds the latest report, keyboard handling and the refresh cycle. Drawing
//! lives in [`crate::ui`] and only reads from `App`.

use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent};

use crate::data::{Coordinate, WeatherReport};
use crate::pipeline::WeatherPipeline;

/// Which screen is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    /// A fetch is in progress and nothing has been shown yet
    Loading,
    /// A report is available
    Report,
}

/// Main application struct
pub struct App {
    pub state: AppState,
    /// Latest report; `None` until the first load finishes
    pub report: Option<WeatherReport>,
    /// Coordinate the report is fetched for
    pub coordinate: Coordinate,
    pub should_quit: bool,
    /// Set by `r`; the event loop reloads and clears it
    pub refresh_requested: bool,
    pub last_refresh: Option<DateTime<Local>>,
    pipeline: WeatherPipeline,
}

impl App {
    pub fn new(pipeline: WeatherPipeline, coordinate: Coordinate) -> Self {
        Self {
            state: AppState::Loading,
            report: None,
            coordinate,
            should_quit: false,
            refresh_requested: false,
            last_refresh: None,
            pipeline,
        }
    }

    /// Runs the pipeline and shows its report
    ///
    /// The pipeline never fails, so this always ends in [`AppState::Report`].
    pub async fn load(&mut self) {
        let report = self.pipeline.fetch_weather(self.coordinate).await;
        self.apply_report(report);
    }

    /// Replaces the shown report and records the refresh time
    pub fn apply_report(&mut self, report: WeatherReport) {
        self.report = Some(report);
        self.last_refresh = Some(Local::now());
        self.refresh_requested = false;
        self.state = AppState::Report;
    }

    /// Handles keyboard input
    ///
    /// # Key Bindings
    /// - `q` or `Esc`: Quit
    /// - `r`: Refresh (ignored while loading)
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('r') if self.state == AppState::Report => {
                self.refresh_requested = true;
            }
            _ => {}
        }
    }
}
