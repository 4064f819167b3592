//! Tracing subscriber setup for the binary

use std::fs::{self, File};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use directories::ProjectDirs;
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// File name of the log written while the full-screen UI owns the terminal
pub const LOG_FILE_NAME: &str = "shoresquad.log";

/// Where log lines go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

/// Log file location in the platform cache directory
pub fn log_file_path() -> Option<PathBuf> {
    let project_dirs = ProjectDirs::from("", "", "shoresquad")?;
    Some(project_dirs.cache_dir().join(LOG_FILE_NAME))
}

/// Builds the filter: `RUST_LOG` wins, otherwise `default_level`
pub fn filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Installs the global subscriber
///
/// A second call is a no-op.
pub fn init(default_level: &str, target: LogTarget) -> io::Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter(default_level))
        .with_target(false);

    let _ = match target {
        LogTarget::Stderr => builder.with_writer(io::stderr).try_init(),
        LogTarget::File(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let file = File::options().create(true).append(true).open(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
    };
    Ok(())
}

/// Like [`init`], but logs to stderr when the log file can't be opened
///
/// Returns the target actually in use.
pub fn init_or_stderr(default_level: &str, target: LogTarget) -> LogTarget {
    match init(default_level, target.clone()) {
        Ok(()) => target,
        Err(e) => {
            let _ = init(default_level, LogTarget::Stderr);
            warn!(error = %e, "log file unavailable, logging to stderr");
            LogTarget::Stderr
        }
    }
}
