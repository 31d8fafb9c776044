use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LivenessError {
    #[error("Process query failed: {message} {location}")]
    ProcessQuery {
        message: String,
        location: ErrorLocation,
    },

    #[error("Failed to kill process {pid}: {message} {location}")]
    Kill {
        pid: u32,
        message: String,
        location: ErrorLocation,
    },
}

impl LivenessError {
    #[track_caller]
    pub fn process_query<S: Into<String>>(message: S) -> Self {
        LivenessError::ProcessQuery {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn kill<S: Into<String>>(pid: u32, message: S) -> Self {
        LivenessError::Kill {
            pid,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, LivenessError>;
