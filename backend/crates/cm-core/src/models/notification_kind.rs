use crate::{CoreError, CoreResult};

use std::fmt;
use std::panic::Location;
use std::str::FromStr;

use error_location::ErrorLocation;
use serde::Serialize;

/// Category of a status message; each maps to a `<kind>_notification`
/// toggle and a message template in the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Startup,
    Loading,
    Ready,
    ShutdownWarning,
    NetworkShutdown,
    ShutdownFinal,
    MonitorStop,
    ZombieDetected,
    ZombieKilled,
    Error,
}

impl NotificationKind {
    pub const ALL: [NotificationKind; 10] = [
        Self::Startup,
        Self::Loading,
        Self::Ready,
        Self::ShutdownWarning,
        Self::NetworkShutdown,
        Self::ShutdownFinal,
        Self::MonitorStop,
        Self::ZombieDetected,
        Self::ZombieKilled,
        Self::Error,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Startup => "startup",
            Self::Loading => "loading",
            Self::Ready => "ready",
            Self::ShutdownWarning => "shutdown_warning",
            Self::NetworkShutdown => "network_shutdown",
            Self::ShutdownFinal => "shutdown_final",
            Self::MonitorStop => "monitor_stop",
            Self::ZombieDetected => "zombie_detected",
            Self::ZombieKilled => "zombie_killed",
            Self::Error => "error",
        }
    }

    /// Name of the message-control flag gating this kind.
    pub fn control_flag(&self) -> String {
        format!("{}_notification", self.as_str())
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationKind {
    type Err = CoreError;

    #[track_caller]
    fn from_str(s: &str) -> CoreResult<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| CoreError::InvalidNotificationKind {
                value: s.to_string(),
                location: ErrorLocation::from(Location::caller()),
            })
    }
}
