use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid protocol: {value} (expected TCP or UDP) {location}")]
    InvalidProtocol {
        value: String,
        location: ErrorLocation,
    },

    #[error("Invalid notification kind: {value} {location}")]
    InvalidNotificationKind {
        value: String,
        location: ErrorLocation,
    },
}

pub type Result<T> = StdResult<T, CoreError>;
