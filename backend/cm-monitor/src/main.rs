use cm_config::Config;
use cm_core::ReadinessClassifier;
use cm_firewall::PortGate;
use cm_liveness::LivenessChecker;
use cm_monitor::cli::Cli;
use cm_monitor::{
    LockFile, LogWatcher, MonitorError, MonitorResult, Orchestrator, OrchestratorSettings,
    ShutdownCoordinator, StopReason, logger,
};
use cm_notify::Notifier;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use log::{error, info, warn};
use tokio::sync::mpsc;

/// How long queued notifications may take to drain after the loop ends
const NOTIFIER_DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

const LIVENESS_QUEUE_CAPACITY: usize = 16;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // The logger may not be up yet
            eprintln!("conan-monitor: {}", e);
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> MonitorResult<()> {
    // Load and validate configuration
    let config_path = Config::resolve_path(cli.config.as_deref());
    let (mut config, created) = Config::load_or_init(&config_path)?;
    if let Some(logs_dir) = cli.logs_dir {
        config.server.logs_directory = logs_dir;
    }
    if let Err(e) = config.validate() {
        // The logger is not up yet
        if created {
            eprintln!(
                "conan-monitor: wrote a default config to {}; edit it and start again",
                config_path.display()
            );
        }
        return Err(e.into());
    }

    // Ensure log directory exists, then initialize logger (before any other logging)
    let log_file_path: Option<PathBuf> = config.logging.file_path();
    if let Some(parent) = log_file_path.as_deref().and_then(Path::parent)
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .map_err(|e| MonitorError::io(format!("creating {}", parent.display()), e))?;
    }
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting conan-monitor v{}", env!("CARGO_PKG_VERSION"));
    info!("Config file: {}", config_path.display());
    if created {
        warn!(
            "Config file {} not found, wrote defaults there",
            config_path.display()
        );
    }
    config.log_summary();

    if cli.check_config {
        info!("Configuration is valid");
        return Ok(());
    }

    let lock_dir = config_path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let mut lock = LockFile::acquire(lock_dir)?;
    info!("Lock file: {}", lock.path().display());

    let (notifier, notifier_task) = Notifier::from_config(&config)?.spawn();
    let gate = PortGate::from_config(&config);
    if gate.is_none() {
        info!("Port gating disabled; the firewall will not be touched");
    }

    // Create shutdown coordinator
    let shutdown = ShutdownCoordinator::new();
    let signal_shutdown = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received Ctrl+C");
                signal_shutdown.request_stop(StopReason::Interrupted);
            }
            Err(e) => warn!("Failed to listen for Ctrl+C: {}", e),
        }
    });

    let settings = OrchestratorSettings::from_config(&config.server);
    let watcher = LogWatcher::new(config.server.log_path());
    let mut orchestrator = Orchestrator::new(
        settings,
        watcher,
        ReadinessClassifier::conan_exiles(),
        gate,
        notifier,
    );

    let liveness_task = if config.server.zombie_detection.enabled {
        let (tx, rx) = mpsc::channel(LIVENESS_QUEUE_CAPACITY);
        let checker = LivenessChecker::from_config(&config.server.zombie_detection);
        orchestrator = orchestrator.with_liveness(rx);
        let mut guard = shutdown.guard();
        Some(tokio::spawn(checker.run(tx, async move {
            guard.wait().await;
        })))
    } else {
        None
    };

    let session = orchestrator.run(shutdown.guard()).await;

    // Stop background tasks
    shutdown.request_stop(StopReason::MonitorFinished);
    if let Some(task) = liveness_task
        && let Err(e) = task.await
    {
        warn!("Liveness task ended abnormally: {}", e);
    }

    // The orchestrator owned the last notifier handle; the queue drains and closes
    match tokio::time::timeout(NOTIFIER_DRAIN_TIMEOUT, notifier_task).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => warn!("Notifier task ended abnormally: {}", e),
        Err(_) => warn!("Notifier did not drain within {:?}", NOTIFIER_DRAIN_TIMEOUT),
    }

    lock.release();
    info!(
        "Monitor stopped (ran since {}, final server state {})",
        session.started_at.to_rfc3339(),
        session.state()
    );

    Ok(())
}
