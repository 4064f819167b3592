//! Custom widgets

mod sparkline;

pub use sparkline::TrendSparkline;
