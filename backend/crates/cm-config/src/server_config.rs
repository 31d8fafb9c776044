use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_FIREWALL_ENABLED, DEFAULT_POLL_INTERVAL_MS,
    DEFAULT_SERVER_NAME, DEFAULT_STARTUP_DELAY_SECS, MAX_POLL_INTERVAL_MS, MAX_STARTUP_DELAY_SECS,
    MIN_POLL_INTERVAL_MS, MessageControl, Messages, PortsOnExit, ZombieDetectionConfig,
};

use cm_core::PortRule;
use cm_core::conan::LOG_FILE_NAME;

use std::collections::HashSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Display name used in notifications
    pub name: String,
    /// Directory holding the server's log file
    pub logs_directory: String,
    pub log_file_name: String,
    /// Seconds between the ready marker and opening the ports
    pub startup_delay: u64,
    pub firewall_enabled: bool,
    pub poll_interval_ms: u64,
    pub ports: Vec<PortRule>,
    pub ports_on_exit: PortsOnExit,
    /// Stop monitoring once the server reports it has stopped
    pub stop_with_server: bool,
    #[serde(alias = "process_monitoring")]
    pub zombie_detection: ZombieDetectionConfig,
    pub message_control: MessageControl,
    pub messages: Messages,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: String::from(DEFAULT_SERVER_NAME),
            logs_directory: String::new(),
            log_file_name: String::from(LOG_FILE_NAME),
            startup_delay: DEFAULT_STARTUP_DELAY_SECS,
            firewall_enabled: DEFAULT_FIREWALL_ENABLED,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            ports: PortRule::conan_defaults(),
            ports_on_exit: PortsOnExit::default(),
            stop_with_server: false,
            zombie_detection: ZombieDetectionConfig::default(),
            message_control: MessageControl::default(),
            messages: Messages::default(),
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.logs_directory.trim().is_empty() {
            return Err(ConfigError::server(
                "server.logs_directory must be set to the server's Saved/Logs directory",
            ));
        }

        if self.log_file_name.trim().is_empty() {
            return Err(ConfigError::server("server.log_file_name must not be empty"));
        }

        if self.startup_delay > MAX_STARTUP_DELAY_SECS {
            return Err(ConfigError::server(format!(
                "server.startup_delay must be 0-{}, got {}",
                MAX_STARTUP_DELAY_SECS, self.startup_delay
            )));
        }

        if self.poll_interval_ms < MIN_POLL_INTERVAL_MS
            || self.poll_interval_ms > MAX_POLL_INTERVAL_MS
        {
            return Err(ConfigError::server(format!(
                "server.poll_interval_ms must be {}-{}, got {}",
                MIN_POLL_INTERVAL_MS, MAX_POLL_INTERVAL_MS, self.poll_interval_ms
            )));
        }

        self.validate_ports()?;
        self.zombie_detection.validate()?;
        self.messages.validate()?;

        Ok(())
    }

    fn validate_ports(&self) -> ConfigErrorResult<()> {
        let mut seen = HashSet::new();

        for rule in &self.ports {
            if rule.port == 0 {
                return Err(ConfigError::server(
                    "server.ports: port must be 1-65535, got 0",
                ));
            }
            if !seen.insert(*rule) {
                return Err(ConfigError::server(format!(
                    "server.ports: duplicate rule {}",
                    rule
                )));
            }
        }

        if self.firewall_enabled && self.ports.is_empty() {
            return Err(ConfigError::server(
                "server.ports must not be empty when firewall_enabled is true",
            ));
        }

        Ok(())
    }

    /// Path of the watched server log.
    pub fn log_path(&self) -> PathBuf {
        PathBuf::from(&self.logs_directory).join(&self.log_file_name)
    }
}
