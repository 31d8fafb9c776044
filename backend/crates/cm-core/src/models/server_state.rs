use crate::NotificationKind;

use std::fmt;

use serde::Serialize;

/// Lifecycle position of the monitored game server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ServerState {
    /// No startup marker seen since the monitor (or the log file) started
    NotStarted,
    /// Server process is booting and loading the world
    Loading,
    /// World is loaded; clients may connect
    Ready,
    /// Shutdown requested; `network_down` once the net driver is gone
    ShuttingDown { network_down: bool },
    /// Server process has exited its main loop
    Stopped,
    /// Process is alive but no longer responding
    Zombie,
}

impl ServerState {
    /// Ports are open exactly while the server is ready.
    pub fn ports_open(&self) -> bool {
        matches!(self, Self::Ready)
    }

    /// Shutdown notices a stop from this state went past without sending.
    /// A server that never got going has nothing to warn about.
    pub fn skipped_shutdown_kinds(&self) -> &'static [NotificationKind] {
        match self {
            Self::NotStarted | Self::Stopped => &[],
            Self::ShuttingDown { network_down: true } => &[],
            Self::ShuttingDown { network_down: false } => &[NotificationKind::NetworkShutdown],
            Self::Loading | Self::Ready | Self::Zombie => &[
                NotificationKind::ShutdownWarning,
                NotificationKind::NetworkShutdown,
            ],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::Loading => "loading",
            Self::Ready => "ready",
            Self::ShuttingDown { .. } => "shutting_down",
            Self::Stopped => "stopped",
            Self::Zombie => "zombie",
        }
    }
}

impl fmt::Display for ServerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShuttingDown { network_down: true } => f.write_str("shutting_down (network down)"),
            other => f.write_str(other.as_str()),
        }
    }
}
