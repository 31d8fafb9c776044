mod config;
mod error;
mod firewall_config;
mod flexible_bool;
mod log_level;
mod logging_config;
mod message_control;
mod messages;
mod ports_on_exit;
mod server_config;
mod webhook_config;
mod zombie_detection_config;

pub use config::Config;
pub use error::{ConfigError, ConfigErrorResult};
pub use firewall_config::FirewallConfig;
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use message_control::MessageControl;
pub use messages::Messages;
pub use ports_on_exit::PortsOnExit;
pub use server_config::ServerConfig;
pub use webhook_config::WebhookConfig;
pub use zombie_detection_config::ZombieDetectionConfig;

pub const CONFIG_PATH_ENV: &str = "CM_CONFIG_PATH";
pub const DEFAULT_CONFIG_PATH: &str = "config/config.json";

const DEFAULT_SERVER_NAME: &str = "Conan Exiles Server";
const DEFAULT_STARTUP_DELAY_SECS: u64 = 30;
const MAX_STARTUP_DELAY_SECS: u64 = 3600;
const DEFAULT_FIREWALL_ENABLED: bool = false;

pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;
pub const MIN_POLL_INTERVAL_MS: u64 = 100;
pub const MAX_POLL_INTERVAL_MS: u64 = 60_000;

const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "logs";
const DEFAULT_LOG_FILE: &str = "server_monitor.log";

#[cfg(test)]
mod tests;
