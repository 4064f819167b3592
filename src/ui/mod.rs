//! Rendering of weather reports
//!
//! `report` draws the full-screen view with ratatui; `summary` produces the
//! plain-text form used by `--format text`.

pub mod report;
pub mod summary;
pub mod widgets;

pub use report::{render, render_loading};
pub use summary::format_report;
