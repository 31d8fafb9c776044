use std::panic::Location;
use std::path::PathBuf;
use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum ConfigError {
    #[error("{category} error: {message} {location}")]
    Generic {
        category: &'static str,
        message: String,
        location: ErrorLocation,
    },

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON parse error in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ConfigError {
    /// Create a config error
    #[track_caller]
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::generic("Config", message)
    }

    /// Create a server section error
    #[track_caller]
    pub fn server<S: Into<String>>(message: S) -> Self {
        Self::generic("Server", message)
    }

    /// Create a webhook / discord error
    #[track_caller]
    pub fn webhook<S: Into<String>>(message: S) -> Self {
        Self::generic("Webhook", message)
    }

    /// Create a firewall error
    #[track_caller]
    pub fn firewall<S: Into<String>>(message: S) -> Self {
        Self::generic("Firewall", message)
    }

    /// Create a zombie detection error
    #[track_caller]
    pub fn zombie_detection<S: Into<String>>(message: S) -> Self {
        Self::generic("ZombieDetection", message)
    }

    /// Create a messages error
    #[track_caller]
    pub fn messages<S: Into<String>>(message: S) -> Self {
        Self::generic("Messages", message)
    }

    /// Create a logging error
    #[track_caller]
    pub fn logging<S: Into<String>>(message: S) -> Self {
        Self::generic("Logging", message)
    }

    #[track_caller]
    fn generic<S: Into<String>>(category: &'static str, message: S) -> Self {
        ConfigError::Generic {
            category,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type ConfigErrorResult<T> = StdResult<T, ConfigError>;
