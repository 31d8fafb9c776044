mod session;

use crate::{LogWatcher, Orchestrator, OrchestratorSettings};

use cm_config::PortsOnExit;
use cm_core::{
    MarkerRule, MarkerTarget, NotificationEvent, NotificationKind, PortRule, ReadinessClassifier,
};
use cm_firewall::{FirewallBackend, FirewallError, FirewallResult, PortGate};
use cm_liveness::LivenessSignal;
use cm_notify::NotifierHandle;

use std::collections::BTreeSet;
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tempfile::TempDir;
use tokio::sync::mpsc;

pub(crate) const PREFIX: &str = "GameServerControl";

pub(crate) const LOADING: &str = "Loading world...";
pub(crate) const LOADED: &str = "World loaded.";
pub(crate) const READY: &str = "Server is ready for connections";
pub(crate) const SHUTTING_DOWN: &str = "Shutting down server";
pub(crate) const STOPPED: &str = "Server stopped";

/// Plain-language markers, so tests read independently of any game's log
pub(crate) fn test_classifier() -> ReadinessClassifier {
    ReadinessClassifier::new(vec![
        MarkerRule::new(STOPPED, MarkerTarget::Stopped),
        MarkerRule::new("Loading world", MarkerTarget::Starting),
        MarkerRule::new(READY, MarkerTarget::Ready),
        MarkerRule::new(SHUTTING_DOWN, MarkerTarget::ShutdownWarning),
    ])
}

pub(crate) fn settings(startup_delay_secs: u64) -> OrchestratorSettings {
    OrchestratorSettings {
        startup_delay: Duration::from_secs(startup_delay_secs),
        poll_interval: Duration::from_millis(10),
        ports_on_exit: PortsOnExit::Block,
        stop_with_server: false,
    }
}

// =========================================================================
// Fake firewall
// =========================================================================

/// In-memory rule table counting every add and delete
#[derive(Clone, Default)]
pub(crate) struct FakeFirewall {
    rules: Arc<Mutex<BTreeSet<String>>>,
    failing: Arc<Mutex<Vec<String>>>,
    adds: Arc<Mutex<usize>>,
    deletes: Arc<Mutex<usize>>,
    latency: Arc<Mutex<Duration>>,
}

impl FakeFirewall {
    pub(crate) fn fail_on(&self, name: &str) {
        self.failing.lock().unwrap().push(name.to_string());
    }

    /// Make every add and delete take `latency`, like a slow netsh.
    pub(crate) fn slow_down(&self, latency: Duration) {
        *self.latency.lock().unwrap() = latency;
    }

    pub(crate) fn rule_count(&self) -> usize {
        self.rules.lock().unwrap().len()
    }

    pub(crate) fn adds(&self) -> usize {
        *self.adds.lock().unwrap()
    }

    pub(crate) fn deletes(&self) -> usize {
        *self.deletes.lock().unwrap()
    }

    async fn lag(&self) {
        let latency = *self.latency.lock().unwrap();
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
    }

    fn check(&self, name: &str) -> FirewallResult<()> {
        if self.failing.lock().unwrap().iter().any(|n| n == name) {
            return Err(FirewallError::command_failed(
                format!("fake {}", name),
                "access denied",
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl FirewallBackend for FakeFirewall {
    async fn rule_exists(&self, name: &str) -> FirewallResult<bool> {
        Ok(self.rules.lock().unwrap().contains(name))
    }

    async fn add_block_rule(&self, name: &str, _rule: &PortRule) -> FirewallResult<()> {
        self.lag().await;
        self.check(name)?;
        *self.adds.lock().unwrap() += 1;
        self.rules.lock().unwrap().insert(name.to_string());
        Ok(())
    }

    async fn delete_rule(&self, name: &str) -> FirewallResult<()> {
        self.lag().await;
        self.check(name)?;
        *self.deletes.lock().unwrap() += 1;
        self.rules.lock().unwrap().remove(name);
        Ok(())
    }
}

// =========================================================================
// Harness
// =========================================================================

/// An orchestrator over a temp log file, a fake firewall and a bare
/// notification queue.
pub(crate) struct Harness {
    pub(crate) orchestrator: Orchestrator,
    pub(crate) firewall: FakeFirewall,
    pub(crate) log: PathBuf,
    events: mpsc::Receiver<NotificationEvent>,
    _dir: TempDir,
}

impl Harness {
    pub(crate) fn new(settings: OrchestratorSettings) -> Self {
        Self::build(settings, true)
    }

    pub(crate) fn without_firewall(settings: OrchestratorSettings) -> Self {
        Self::build(settings, false)
    }

    fn build(settings: OrchestratorSettings, gated: bool) -> Self {
        let dir = TempDir::new().unwrap();
        let log = dir.path().join("server.log");
        std::fs::write(&log, "").unwrap();

        let firewall = FakeFirewall::default();
        let gate = gated.then(|| {
            PortGate::new(
                Box::new(firewall.clone()),
                PortRule::conan_defaults(),
                PREFIX,
            )
        });
        let (notifier, events) = NotifierHandle::channel(64);

        let orchestrator = Orchestrator::new(
            settings,
            LogWatcher::new(&log),
            test_classifier(),
            gate,
            notifier,
        );

        Self {
            orchestrator,
            firewall,
            log,
            events,
            _dir: dir,
        }
    }

    pub(crate) fn with_liveness(mut self) -> (Self, mpsc::Sender<LivenessSignal>) {
        let (tx, rx) = mpsc::channel(16);
        self.orchestrator = self.orchestrator.with_liveness(rx);
        (self, tx)
    }

    /// Start the monitor and open the (empty) log at `now`.
    pub(crate) async fn boot(&mut self, now: Instant) {
        self.orchestrator.start().await;
        self.orchestrator.tick(now).await;
    }

    pub(crate) fn append(&self, lines: &[&str]) {
        let mut file = std::fs::OpenOptions::new()
            .append(true)
            .open(&self.log)
            .unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
    }

    /// Drain queued notifications.
    pub(crate) fn events(&mut self) -> Vec<NotificationEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            events.push(event);
        }
        events
    }

    pub(crate) fn kinds(&mut self) -> Vec<NotificationKind> {
        self.events().into_iter().map(|event| event.kind).collect()
    }
}
