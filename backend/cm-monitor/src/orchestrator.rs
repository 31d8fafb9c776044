//! The monitor's poll loop.
//!
//! One task owns the [`MonitorSession`]. Each tick it pulls new log lines,
//! folds them through the classifier, then folds in whatever the liveness
//! checker posted since the last tick, and finally opens the ports once a
//! ready server has waited out the startup delay. Notifications go through
//! the notifier queue and never hold up a tick.

use crate::{LogWatcher, MonitorPhase, MonitorSession, ShutdownGuard};

use cm_config::{PortsOnExit, ServerConfig};
use cm_core::{NotificationEvent, NotificationKind, ReadinessClassifier, ServerState, Transition};
use cm_firewall::{GateReport, PortGate};
use cm_liveness::LivenessSignal;
use cm_notify::NotifierHandle;

use std::time::{Duration, Instant};

use log::{debug, info, warn};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;
use tokio::time::MissedTickBehavior;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrchestratorSettings {
    /// Wait between the ready marker and opening the ports
    pub startup_delay: Duration,
    pub poll_interval: Duration,
    pub ports_on_exit: PortsOnExit,
    pub stop_with_server: bool,
}

impl OrchestratorSettings {
    pub fn from_config(server: &ServerConfig) -> Self {
        Self {
            startup_delay: Duration::from_secs(server.startup_delay),
            poll_interval: Duration::from_millis(server.poll_interval_ms),
            ports_on_exit: server.ports_on_exit,
            stop_with_server: server.stop_with_server,
        }
    }
}

impl Default for OrchestratorSettings {
    fn default() -> Self {
        Self::from_config(&ServerConfig::default())
    }
}

pub struct Orchestrator {
    settings: OrchestratorSettings,
    session: MonitorSession,
    watcher: LogWatcher,
    classifier: ReadinessClassifier,
    gate: Option<PortGate>,
    notifier: NotifierHandle,
    liveness: Option<mpsc::Receiver<LivenessSignal>>,
    outage_reported: bool,
}

impl Orchestrator {
    /// `gate` is `None` when port gating is disabled; the firewall is then
    /// never touched.
    pub fn new(
        settings: OrchestratorSettings,
        watcher: LogWatcher,
        classifier: ReadinessClassifier,
        gate: Option<PortGate>,
        notifier: NotifierHandle,
    ) -> Self {
        Self {
            settings,
            session: MonitorSession::new(),
            watcher,
            classifier,
            gate,
            notifier,
            liveness: None,
            outage_reported: false,
        }
    }

    /// Receive signals from a liveness checker running on its own timer.
    pub fn with_liveness(mut self, signals: mpsc::Receiver<LivenessSignal>) -> Self {
        self.liveness = Some(signals);
        self
    }

    pub fn session(&self) -> &MonitorSession {
        &self.session
    }

    pub fn settings(&self) -> &OrchestratorSettings {
        &self.settings
    }

    /// Idle -> Starting: block the ports and announce the monitor.
    pub async fn start(&mut self) {
        self.session.phase = MonitorPhase::Starting;
        info!(
            "Monitor: starting, watching {}",
            self.watcher.path().display()
        );

        self.close_ports().await;
        self.notifier.notify(NotificationKind::Startup);
    }

    /// One poll step at `now`.
    pub async fn tick(&mut self, now: Instant) {
        self.poll_log(now).await;
        self.drain_liveness(now).await;
        self.maybe_open_ports(now).await;
    }

    /// Run until a stop is requested (or the server stops while
    /// `stop_with_server` is set), then apply the exit policy. A request
    /// cuts short the firewall pass in progress.
    pub async fn run(mut self, mut guard: ShutdownGuard) -> MonitorSession {
        let mut interrupted = tokio::select! {
            reason = guard.wait() => Some(reason),
            _ = self.start() => None,
        };

        let mut ticker = tokio::time::interval(self.settings.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        while interrupted.is_none() {
            interrupted = tokio::select! {
                reason = guard.wait() => Some(reason),
                _ = self.poll_step(&mut ticker) => None,
            };

            if self.session.stop_requested {
                info!("Monitor: server stopped and stop_with_server is set");
                break;
            }
        }

        if let Some(reason) = interrupted {
            info!("Monitor: stop requested ({})", reason);
        }

        self.stop().await;
        self.session
    }

    async fn poll_step(&mut self, ticker: &mut tokio::time::Interval) {
        ticker.tick().await;
        self.tick(Instant::now()).await;
    }

    /// Stopping -> Halted: leave the ports as `ports_on_exit` says and send
    /// the final notification.
    pub async fn stop(&mut self) {
        self.session.phase = MonitorPhase::Stopping;
        info!(
            "Monitor: stopping (ports on exit: {})",
            self.settings.ports_on_exit
        );

        if let Some(gate) = &self.gate {
            let report = match self.settings.ports_on_exit {
                PortsOnExit::Block => gate.block().await,
                PortsOnExit::Allow => gate.allow().await,
            };
            self.session.ports_blocked =
                self.settings.ports_on_exit == PortsOnExit::Block && report.is_success();
            self.report_gate_failure(&report);
        }
        self.session.ports_open = false;
        self.session.ready_since = None;

        self.notifier.notify(NotificationKind::MonitorStop);
        self.session.phase = MonitorPhase::Halted;
        info!("Monitor: halted");
    }

    async fn poll_log(&mut self, now: Instant) {
        let batch = match self.watcher.poll() {
            Ok(batch) => batch,
            Err(e) => {
                if !self.outage_reported {
                    warn!("Monitor: {}; retrying every poll", e);
                    self.outage_reported = true;
                }
                self.session.log_available = false;
                return;
            }
        };

        if !self.session.log_available {
            info!("Monitor: log file {} is open", self.watcher.path().display());
            self.session.log_available = true;
            self.outage_reported = false;
        }

        if self.session.phase == MonitorPhase::Starting {
            self.session.phase = MonitorPhase::Monitoring;
        }

        if batch.rotated {
            self.reset_cycle().await;
        }

        for line in &batch.lines {
            if let Some(transition) = self.classifier.classify(self.session.state(), line) {
                self.apply_transition(transition, now).await;
            }
        }
    }

    /// A rotated log belongs to a new server run.
    async fn reset_cycle(&mut self) {
        info!("Monitor: log rotated, starting a new server cycle");
        self.session.set_log_state(ServerState::NotStarted);
        self.session.ready_since = None;
        self.close_ports().await;
    }

    async fn apply_transition(&mut self, transition: Transition, now: Instant) {
        let previous = self.session.state();
        let previous_log = self.session.log_state();
        let next = transition.next;
        info!("Monitor: server state {} -> {}", previous, next);

        // Only a fresh start or an exit gets a server out of the zombie state
        if matches!(next, ServerState::Loading | ServerState::Stopped) {
            self.session.set_zombie(false);
        }
        self.session.set_log_state(next);

        if next == ServerState::Ready {
            self.session.ready_since = Some(now);
            if !self.settings.startup_delay.is_zero() {
                info!(
                    "Monitor: server ready, opening ports in {:?}",
                    self.settings.startup_delay
                );
            }
        } else {
            self.session.ready_since = None;
            self.close_ports().await;
        }

        if next == ServerState::Stopped {
            let skipped = previous_log.skipped_shutdown_kinds();
            if !skipped.is_empty() {
                warn!("Monitor: server stopped without a shutdown warning");
            }
            for kind in skipped {
                self.notifier.notify(*kind);
            }
        }

        // The ready message goes out with the delayed port opening
        if let Some(kind) = transition.event
            && kind != NotificationKind::Ready
        {
            self.notifier.notify(kind);
        }

        if next == ServerState::Stopped && self.settings.stop_with_server {
            self.session.stop_requested = true;
        }
    }

    async fn drain_liveness(&mut self, now: Instant) {
        let mut signals = Vec::new();

        if let Some(rx) = self.liveness.as_mut() {
            loop {
                match rx.try_recv() {
                    Ok(signal) => signals.push(signal),
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        debug!("Monitor: liveness checker is gone");
                        self.liveness = None;
                        break;
                    }
                }
            }
        }

        for signal in signals {
            self.apply_liveness(signal, now).await;
        }
    }

    async fn apply_liveness(&mut self, signal: LivenessSignal, now: Instant) {
        info!("Monitor: liveness {}", signal);

        match signal {
            LivenessSignal::ZombieDetected { pid } => {
                if !self.session.is_zombie() {
                    self.session.set_zombie(true);
                    self.session.ready_since = None;
                    self.close_ports().await;
                }
                self.notifier.notify(NotificationEvent::with_detail(
                    NotificationKind::ZombieDetected,
                    format!("pid {}", pid),
                ));
            }
            LivenessSignal::ZombieKilled { pid } => {
                self.notifier.notify(NotificationEvent::with_detail(
                    NotificationKind::ZombieKilled,
                    format!("pid {}", pid),
                ));
            }
            LivenessSignal::KillFailed { pid, reason } => {
                self.notifier.notify(NotificationEvent::with_detail(
                    NotificationKind::Error,
                    format!("Failed to kill zombie process {}: {}", pid, reason),
                ));
            }
            LivenessSignal::Recovered { .. } => {
                self.session.set_zombie(false);
                if self.session.log_state() == ServerState::Ready {
                    self.session.ready_since = Some(now);
                }
            }
            LivenessSignal::Exited { .. } => {
                self.session.set_zombie(false);
                if self.session.log_state() != ServerState::Stopped {
                    let exited = Transition {
                        next: ServerState::Stopped,
                        event: Some(NotificationKind::ShutdownFinal),
                    };
                    self.apply_transition(exited, now).await;
                } else {
                    self.close_ports().await;
                }
            }
        }
    }

    async fn maybe_open_ports(&mut self, now: Instant) {
        if self.session.state() != ServerState::Ready || self.session.ports_open {
            return;
        }
        let Some(since) = self.session.ready_since else {
            return;
        };
        if now.saturating_duration_since(since) < self.settings.startup_delay {
            return;
        }

        self.session.ports_open = true;
        self.session.ports_blocked = false;

        if let Some(gate) = &self.gate {
            let report = gate.allow().await;
            self.report_gate_failure(&report);
        }

        info!("Monitor: server is ready for players");
        self.notifier.notify(NotificationKind::Ready);
    }

    /// Block the ports unless the last block pass already succeeded.
    async fn close_ports(&mut self) {
        self.session.ports_open = false;

        let Some(gate) = &self.gate else {
            return;
        };
        if self.session.ports_blocked {
            return;
        }

        let report = gate.block().await;
        self.session.ports_blocked = report.is_success();
        self.report_gate_failure(&report);
    }

    fn report_gate_failure(&self, report: &GateReport) {
        if let Some(summary) = report.failure_summary() {
            self.notifier.notify(NotificationEvent::with_detail(
                NotificationKind::Error,
                summary,
            ));
        }
    }
}
