use crate::{LivenessSignal, LivenessTracker, ProcessProbe, SysinfoProbe, Verdict};

use cm_config::ZombieDetectionConfig;

use std::future::Future;
use std::time::{Duration, Instant};

use log::{debug, error, info, warn};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

/// Periodic liveness check of the server executable.
pub struct LivenessChecker<P: ProcessProbe> {
    probe: P,
    tracker: LivenessTracker,
    process_name: String,
    interval: Duration,
}

impl LivenessChecker<SysinfoProbe> {
    pub fn from_config(config: &ZombieDetectionConfig) -> Self {
        Self::new(SysinfoProbe::new(), config)
    }
}

impl<P: ProcessProbe + 'static> LivenessChecker<P> {
    pub fn new(probe: P, config: &ZombieDetectionConfig) -> Self {
        Self {
            probe,
            tracker: LivenessTracker::new(
                Duration::from_secs(config.timeout_minutes * 60),
                config.auto_kill,
            ),
            process_name: config.process_name.clone(),
            interval: Duration::from_secs(config.check_interval_seconds),
        }
    }

    /// Run one check. A failed process query skips this round.
    pub fn check(&mut self, now: Instant) -> Vec<LivenessSignal> {
        let sample = match self.probe.sample(&self.process_name) {
            Ok(sample) => sample,
            Err(e) => {
                warn!("Liveness: querying {} failed, skipping check: {}", self.process_name, e);
                return Vec::new();
            }
        };

        match self.tracker.observe(sample, now) {
            Verdict::Absent | Verdict::Responsive => Vec::new(),
            Verdict::Unresponsive => {
                debug!("Liveness: {} is not responding", self.process_name);
                Vec::new()
            }
            Verdict::Zombie { pid, kill } => {
                warn!("Liveness: zombie process detected (pid {})", pid);
                let mut signals = vec![LivenessSignal::ZombieDetected { pid }];
                if kill {
                    signals.push(self.kill(pid));
                }
                signals
            }
            Verdict::Recovered { pid } => {
                info!("Liveness: process {} is responding again", pid);
                vec![LivenessSignal::Recovered { pid }]
            }
            Verdict::Exited { pid } => {
                info!("Liveness: process {} has exited", pid);
                vec![LivenessSignal::Exited { pid }]
            }
        }
    }

    fn kill(&mut self, pid: u32) -> LivenessSignal {
        match self.probe.kill(pid) {
            Ok(()) => {
                info!("Liveness: forcefully terminated zombie process (pid {})", pid);
                LivenessSignal::ZombieKilled { pid }
            }
            Err(e) => {
                error!("Liveness: {}", e);
                LivenessSignal::KillFailed {
                    pid,
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Check on a fixed interval until `shutdown` resolves or the receiving
    /// side goes away. Process-table scans run on the blocking pool.
    pub async fn run(
        mut self,
        signals: mpsc::Sender<LivenessSignal>,
        shutdown: impl Future<Output = ()> + Send,
    ) {
        tokio::pin!(shutdown);
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            "Liveness: watching {} every {:?}",
            self.process_name, self.interval
        );

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                _ = ticker.tick() => {}
            }

            let checked = tokio::task::spawn_blocking(move || {
                let found = self.check(Instant::now());
                (self, found)
            })
            .await;

            let found = match checked {
                Ok((checker, found)) => {
                    self = checker;
                    found
                }
                Err(e) => {
                    error!("Liveness: check task failed, stopping checker: {}", e);
                    return;
                }
            };

            for signal in found {
                if signals.send(signal).await.is_err() {
                    debug!("Liveness: monitor loop gone, stopping checker");
                    return;
                }
            }
        }

        debug!("Liveness: checker stopped");
    }
}
