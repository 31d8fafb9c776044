//! Stop requests shared by the monitor loop and its background tasks.
//!
//! A request is a level, not an event: the first reason sticks, and a guard
//! taken after the request still sees it.

use std::fmt;
use std::sync::Arc;

use tokio::sync::watch;

/// Why the monitor is stopping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Ctrl-C or another operator interrupt
    Interrupted,
    /// The monitor loop ended on its own
    MonitorFinished,
}

impl StopReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Interrupted => "interrupted",
            Self::MonitorFinished => "monitor finished",
        }
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct ShutdownCoordinator {
    tx: Arc<watch::Sender<Option<StopReason>>>,
}

impl ShutdownCoordinator {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(None);
        Self { tx: Arc::new(tx) }
    }

    /// Ask everything holding a guard to stop. Returns `false` when a stop
    /// was already requested; the earlier reason is kept.
    pub fn request_stop(&self, reason: StopReason) -> bool {
        let first = self.tx.send_if_modified(|current| {
            if current.is_some() {
                return false;
            }
            *current = Some(reason);
            true
        });

        if first {
            log::info!("Stop requested ({}), notifying all subsystems", reason);
        }
        first
    }

    pub fn reason(&self) -> Option<StopReason> {
        *self.tx.borrow()
    }

    pub fn guard(&self) -> ShutdownGuard {
        ShutdownGuard {
            rx: self.tx.subscribe(),
        }
    }
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

/// Waits for a stop request in an async task.
#[derive(Debug)]
pub struct ShutdownGuard {
    rx: watch::Receiver<Option<StopReason>>,
}

impl ShutdownGuard {
    /// Resolve once a stop is requested. Returns immediately if it already
    /// was. Never resolves if the coordinator is gone without a request.
    pub async fn wait(&mut self) -> StopReason {
        let requested = self
            .rx
            .wait_for(Option::is_some)
            .await
            .ok()
            .and_then(|reason| *reason);

        match requested {
            Some(reason) => reason,
            None => std::future::pending().await,
        }
    }

    pub fn is_stopping(&self) -> bool {
        self.rx.borrow().is_some()
    }
}
