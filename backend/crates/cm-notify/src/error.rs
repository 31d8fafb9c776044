use std::panic::Location;
use std::time::Duration;

use error_location::ErrorLocation;
use thiserror::Error;

/// Webhook delivery failures.
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Webhook request failed: {message} {location}")]
    Delivery {
        message: String,
        timed_out: bool,
        connect: bool,
        location: ErrorLocation,
        #[source]
        source: reqwest::Error,
    },

    #[error("Webhook returned HTTP {status} {location}")]
    Status {
        status: u16,
        /// Wait requested by a rate-limited response
        retry_after: Option<Duration>,
        location: ErrorLocation,
    },

    #[error("Webhook client setup failed: {message} {location}")]
    Setup {
        message: String,
        location: ErrorLocation,
    },
}

impl NotifyError {
    #[track_caller]
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        NotifyError::Delivery {
            message: err.to_string(),
            timed_out: err.is_timeout(),
            connect: err.is_connect(),
            location: ErrorLocation::from(Location::caller()),
            source: err,
        }
    }

    #[track_caller]
    pub fn status(status: u16) -> Self {
        NotifyError::Status {
            status,
            retry_after: None,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// HTTP 429 carrying the webhook's `Retry-After`, if it sent one.
    #[track_caller]
    pub fn rate_limited(retry_after: Option<Duration>) -> Self {
        NotifyError::Status {
            status: 429,
            retry_after,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Timeouts, refused connections, rate limits and server-side errors
    /// are worth one more try; client errors (bad URL, revoked webhook) are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            NotifyError::Delivery {
                timed_out, connect, ..
            } => *timed_out || *connect,
            NotifyError::Status { status, .. } => *status == 429 || *status >= 500,
            NotifyError::Setup { .. } => false,
        }
    }

    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            NotifyError::Status { retry_after, .. } => *retry_after,
            _ => None,
        }
    }
}

impl From<reqwest::Error> for NotifyError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        NotifyError::from_reqwest(err)
    }
}

pub type Result<T> = std::result::Result<T, NotifyError>;
