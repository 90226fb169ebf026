//! Logging infrastructure for gitviz
//!
//! Provides unified logging setup using the tracing ecosystem.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Arc;

use directories::ProjectDirs;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

use crate::{GitvizError, Result};

/// Log output destination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutput {
    /// Log to stderr (development)
    Stderr,
    /// Log to file (the backend controller runs inside a host that owns the
    /// console)
    File,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Output destination
    pub output: LogOutput,
    /// Log level filter (e.g., "info", "gitviz_backend=debug")
    pub filter: String,
    /// Include file/line in logs
    pub file_line: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            output: LogOutput::Stderr,
            filter: "info".into(),
            file_line: false,
        }
    }
}

impl LogConfig {
    /// Create config for the backend controller (file logging)
    pub fn backend() -> Self {
        Self {
            output: LogOutput::File,
            filter: std::env::var("GITVIZ_LOG").unwrap_or_else(|_| "info".into()),
            file_line: true,
        }
    }

    /// Create config for development (verbose stderr)
    pub fn development() -> Self {
        Self {
            output: LogOutput::Stderr,
            filter: "debug".into(),
            file_line: true,
        }
    }
}

/// Directory where log files are written
pub fn log_dir() -> PathBuf {
    ProjectDirs::from("", "", "gitviz")
        .map(|dirs| dirs.data_dir().join("logs"))
        .unwrap_or_else(|| PathBuf::from("/tmp/gitviz/logs"))
}

/// Initialize logging with default configuration
///
/// Uses GITVIZ_LOG env var for filter, defaults to "info"
pub fn init_logging() -> Result<()> {
    init_logging_with_config(LogConfig::backend())
}

/// Initialize logging with custom configuration
pub fn init_logging_with_config(config: LogConfig) -> Result<()> {
    let filter = EnvFilter::try_new(&config.filter)
        .map_err(|e| GitvizError::config(format!("Invalid log filter: {}", e)))?;

    match config.output {
        LogOutput::Stderr => {
            let fmt_layer = fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr)
                .with_file(config.file_line)
                .with_line_number(config.file_line);
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt_layer)
                .try_init()
                .map_err(|e| GitvizError::config(format!("Failed to init logging: {}", e)))?;
        }
        LogOutput::File => {
            let dir = log_dir();
            std::fs::create_dir_all(&dir).map_err(|e| GitvizError::FileWrite {
                path: dir.clone(),
                source: e,
            })?;
            let path = dir.join("gitviz.log");
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .map_err(|e| GitvizError::FileWrite { path, source: e })?;
            let fmt_layer = fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(Arc::new(file))
                .with_file(config.file_line)
                .with_line_number(config.file_line);
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt_layer)
                .try_init()
                .map_err(|e| GitvizError::config(format!("Failed to init logging: {}", e)))?;
        }
    }

    Ok(())
}
