//! ShoreSquad Library
//!
//! Weather pipeline for beach cleanup planning, plus the CLI, storage and
//! presentation pieces the binary is built from.

pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod location;
pub mod logging;
pub mod pipeline;
pub mod store;
pub mod ui;
