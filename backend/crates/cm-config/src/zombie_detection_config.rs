use crate::{ConfigError, ConfigErrorResult};

use cm_core::conan::SERVER_PROCESS_NAME;

use serde::{Deserialize, Serialize};

pub const MIN_CHECK_INTERVAL_SECS: u64 = 1;
pub const MAX_CHECK_INTERVAL_SECS: u64 = 3600;
pub const DEFAULT_CHECK_INTERVAL_SECS: u64 = 30;

pub const MIN_TIMEOUT_MINUTES: u64 = 1;
pub const MAX_TIMEOUT_MINUTES: u64 = 1440;
pub const DEFAULT_TIMEOUT_MINUTES: u64 = 5;

/// Process liveness checking and zombie handling.
///
/// Older config files call this section `process_monitoring` and use the
/// short keys `check_interval` and `timeout`; both spellings load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ZombieDetectionConfig {
    pub enabled: bool,
    #[serde(alias = "check_interval")]
    pub check_interval_seconds: u64,
    /// How long the process must stay unresponsive before it counts as a zombie
    #[serde(alias = "timeout")]
    pub timeout_minutes: u64,
    pub auto_kill: bool,
    /// Executable name to look for in the process table
    pub process_name: String,
}

impl Default for ZombieDetectionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            check_interval_seconds: DEFAULT_CHECK_INTERVAL_SECS,
            timeout_minutes: DEFAULT_TIMEOUT_MINUTES,
            auto_kill: true,
            process_name: String::from(SERVER_PROCESS_NAME),
        }
    }
}

impl ZombieDetectionConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if !self.enabled {
            return Ok(());
        }

        if self.check_interval_seconds < MIN_CHECK_INTERVAL_SECS
            || self.check_interval_seconds > MAX_CHECK_INTERVAL_SECS
        {
            return Err(ConfigError::zombie_detection(format!(
                "server.zombie_detection.check_interval_seconds must be {}-{}, got {}",
                MIN_CHECK_INTERVAL_SECS, MAX_CHECK_INTERVAL_SECS, self.check_interval_seconds
            )));
        }

        if self.timeout_minutes < MIN_TIMEOUT_MINUTES || self.timeout_minutes > MAX_TIMEOUT_MINUTES
        {
            return Err(ConfigError::zombie_detection(format!(
                "server.zombie_detection.timeout_minutes must be {}-{}, got {}",
                MIN_TIMEOUT_MINUTES, MAX_TIMEOUT_MINUTES, self.timeout_minutes
            )));
        }

        if self.process_name.trim().is_empty() {
            return Err(ConfigError::zombie_detection(
                "server.zombie_detection.process_name must not be empty",
            ));
        }

        Ok(())
    }
}
