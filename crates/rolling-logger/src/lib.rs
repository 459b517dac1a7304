//! Rolling Logger
//!
//! Installs a global `tracing` subscriber writing to a bounded set of log
//! files in the application's log directory, plus stderr. `log` records are
//! bridged into the same subscriber. The last lines are also kept in memory
//! so the UI can show them without touching the filesystem.

mod ring;
mod writer;

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tracing_subscriber::fmt::{self, format::Writer, time::FormatTime};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use ring::RecentLines;
use writer::RollingFile;

pub use writer::RollingWriter;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    #[error("failed to open log file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid log filter: {0}")]
    Filter(String),

    #[error("logger already initialized")]
    AlreadyInitialized,

    #[error("logger not initialized")]
    NotInitialized,
}

/// Logger settings
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Number of files kept, live file included
    pub max_files: usize,
    /// Size in bytes after which the live file is rotated
    pub max_file_size: u64,
    /// Lines kept in memory for `recent_lines`
    pub recent_lines: usize,
    /// Filter directives; `None` reads `RUST_LOG`, falling back to `info`
    pub filter: Option<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            max_files: 5,
            max_file_size: 1024 * 1024,
            recent_lines: 500,
            filter: None,
        }
    }
}

struct Installed {
    log_dir: PathBuf,
    recent: RecentLines,
}

static INSTALLED: OnceLock<Installed> = OnceLock::new();

/// Local wall-clock timestamps, millisecond precision
struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

/// Initialize with default settings; logs go to `<log_dir>/<app_name>.log`
pub fn init_logger(log_dir: PathBuf, app_name: &str) -> Result<(), LoggerError> {
    init_with_config(log_dir, app_name, LoggerConfig::default())
}

pub fn init_with_config(log_dir: PathBuf, app_name: &str, config: LoggerConfig) -> Result<(), LoggerError> {
    if INSTALLED.get().is_some() {
        return Err(LoggerError::AlreadyInitialized);
    }

    let filter = match &config.filter {
        Some(directives) => EnvFilter::try_new(directives),
        None => EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info")),
    }
    .map_err(|e| LoggerError::Filter(e.to_string()))?;

    let recent = RecentLines::new(config.recent_lines);
    let file = RollingFile::open(&log_dir, app_name, config.max_files, config.max_file_size)?;
    let writer = RollingWriter::new(file, recent.clone());

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(writer).with_ansi(false).with_timer(LocalTimer))
        .with(fmt::layer().with_writer(std::io::stderr).with_timer(LocalTimer))
        .try_init()
        .map_err(|_| LoggerError::AlreadyInitialized)?;

    let _ = INSTALLED.set(Installed { log_dir, recent });
    tracing::info!(app = app_name, "logger initialized");
    Ok(())
}

fn ensure_initialized() -> Result<(), LoggerError> {
    INSTALLED.get().map(|_| ()).ok_or(LoggerError::NotInitialized)
}

pub fn info(message: &str) -> Result<(), LoggerError> {
    ensure_initialized()?;
    tracing::info!(target: "app", "{}", message);
    Ok(())
}

pub fn warn(message: &str) -> Result<(), LoggerError> {
    ensure_initialized()?;
    tracing::warn!(target: "app", "{}", message);
    Ok(())
}

pub fn error(message: &str) -> Result<(), LoggerError> {
    ensure_initialized()?;
    tracing::error!(target: "app", "{}", message);
    Ok(())
}

/// Most recent log lines, oldest first
pub fn recent_lines() -> Vec<String> {
    INSTALLED.get().map(|i| i.recent.snapshot()).unwrap_or_default()
}

pub fn log_dir() -> Option<&'static Path> {
    INSTALLED.get().map(|i| i.log_dir.as_path())
}
