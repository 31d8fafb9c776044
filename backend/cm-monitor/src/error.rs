use std::panic::Location;
use std::path::PathBuf;

use error_location::ErrorLocation;
use thiserror::Error;

/// Log file could not be read this poll; the watcher retries next tick.
#[derive(Error, Debug)]
pub enum WatchError {
    #[error("Log file {path} unavailable: {message} {location}")]
    LogUnavailable {
        path: PathBuf,
        message: String,
        location: ErrorLocation,
    },
}

impl WatchError {
    #[track_caller]
    pub fn unavailable<S: Into<String>>(path: &std::path::Path, message: S) -> Self {
        WatchError::LogUnavailable {
            path: path.to_path_buf(),
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("Config error: {0}")]
    Config(#[from] cm_config::ConfigError),

    #[error("Notifier error: {0}")]
    Notify(#[from] cm_notify::NotifyError),

    #[error("Another monitor is already running (pid {pid}, lock file {path}) {location}")]
    AlreadyRunning {
        path: PathBuf,
        pid: u32,
        location: ErrorLocation,
    },

    #[error("Failed to acquire lock file {path}: {source} {location}")]
    LockAcquisition {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("IO error: {message} {location}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("Logger setup failed: {message}")]
    Logger { message: String },
}

impl MonitorError {
    #[track_caller]
    pub fn io<S: Into<String>>(message: S, source: std::io::Error) -> Self {
        MonitorError::Io {
            message: message.into(),
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, MonitorError>;
