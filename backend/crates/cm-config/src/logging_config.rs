use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_LOG_DIRECTORY, DEFAULT_LOG_FILE, DEFAULT_LOG_LEVEL,
    LogLevel,
};

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub level: LogLevel,
    pub dir: String,
    /// File name inside `dir`; `None` logs to stdout only
    pub file: Option<String>,
    pub colored: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel(DEFAULT_LOG_LEVEL),
            dir: String::from(DEFAULT_LOG_DIRECTORY),
            file: Some(String::from(DEFAULT_LOG_FILE)),
            colored: true,
        }
    }
}

impl LoggingConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.file.is_some() && self.dir.trim().is_empty() {
            return Err(ConfigError::logging(
                "logging.dir must not be empty when logging.file is set",
            ));
        }

        Ok(())
    }

    /// Full path of the log file, if file logging is on.
    pub fn file_path(&self) -> Option<PathBuf> {
        self.file
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .map(|name| PathBuf::from(&self.dir).join(name))
    }
}
