//! Run context of one monitor process.

use cm_core::ServerState;

use std::fmt;
use std::time::Instant;

use chrono::{DateTime, Utc};

/// Where the monitor itself is in its own lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorPhase {
    /// Constructed, nothing touched yet
    Idle,
    /// Ports blocked, waiting for the log file to open
    Starting,
    /// Log file open, lines are being classified
    Monitoring,
    /// Stop requested, applying the exit policy
    Stopping,
    /// Final notification sent
    Halted,
}

impl fmt::Display for MonitorPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Starting => "starting",
            Self::Monitoring => "monitoring",
            Self::Stopping => "stopping",
            Self::Halted => "halted",
        };
        f.write_str(name)
    }
}

/// State owned and mutated only by the orchestrator.
///
/// The log-derived state and the liveness verdict are kept apart; a zombie
/// verdict masks whatever the log last said until the process recovers,
/// exits or is started again.
#[derive(Debug, Clone)]
pub struct MonitorSession {
    pub phase: MonitorPhase,
    pub started_at: DateTime<Utc>,
    log_state: ServerState,
    zombie: bool,
    /// Ready was reached and the delayed opening is pending or done
    pub(crate) ready_since: Option<Instant>,
    /// The delayed open step ran for the current ready period
    pub(crate) ports_open: bool,
    /// Last block pass finished without failures
    pub(crate) ports_blocked: bool,
    pub(crate) log_available: bool,
    pub(crate) stop_requested: bool,
}

impl MonitorSession {
    pub fn new() -> Self {
        Self {
            phase: MonitorPhase::Idle,
            started_at: Utc::now(),
            log_state: ServerState::NotStarted,
            zombie: false,
            ready_since: None,
            ports_open: false,
            ports_blocked: false,
            log_available: false,
            stop_requested: false,
        }
    }

    /// Effective server state; a zombie verdict takes precedence.
    pub fn state(&self) -> ServerState {
        if self.zombie {
            ServerState::Zombie
        } else {
            self.log_state
        }
    }

    /// State as derived from the log alone.
    pub fn log_state(&self) -> ServerState {
        self.log_state
    }

    pub fn is_zombie(&self) -> bool {
        self.zombie
    }

    pub fn ports_open(&self) -> bool {
        self.ports_open
    }

    pub fn stop_requested(&self) -> bool {
        self.stop_requested
    }

    pub(crate) fn set_log_state(&mut self, state: ServerState) {
        self.log_state = state;
    }

    pub(crate) fn set_zombie(&mut self, zombie: bool) {
        self.zombie = zombie;
    }
}

impl Default for MonitorSession {
    fn default() -> Self {
        Self::new()
    }
}
