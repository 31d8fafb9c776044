use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FirewallError {
    #[error("Firewall command `{command}` failed: {message} {location}")]
    CommandFailed {
        command: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("Firewall command `{command}` timed out after {timeout_secs}s {location}")]
    Timeout {
        command: String,
        timeout_secs: u64,
        location: ErrorLocation,
    },
}

impl FirewallError {
    #[track_caller]
    pub fn command_failed<C: Into<String>, M: Into<String>>(command: C, message: M) -> Self {
        FirewallError::CommandFailed {
            command: command.into(),
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn timeout<C: Into<String>>(command: C, timeout_secs: u64) -> Self {
        FirewallError::Timeout {
            command: command.into(),
            timeout_secs,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, FirewallError>;
