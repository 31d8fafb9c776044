use crate::{NotificationKind, ServerState};

#[test]
fn test_stop_from_ready_skips_both_shutdown_notices() {
    assert_eq!(
        ServerState::Ready.skipped_shutdown_kinds(),
        &[NotificationKind::ShutdownWarning, NotificationKind::NetworkShutdown]
    );
    assert_eq!(
        ServerState::Loading.skipped_shutdown_kinds(),
        ServerState::Ready.skipped_shutdown_kinds()
    );
}

#[test]
fn test_stop_after_warning_skips_only_network_notice() {
    let state = ServerState::ShuttingDown { network_down: false };
    assert_eq!(
        state.skipped_shutdown_kinds(),
        &[NotificationKind::NetworkShutdown]
    );
}

#[test]
fn test_stop_after_full_shutdown_skips_nothing() {
    let state = ServerState::ShuttingDown { network_down: true };
    assert!(state.skipped_shutdown_kinds().is_empty());
    assert!(ServerState::NotStarted.skipped_shutdown_kinds().is_empty());
    assert!(ServerState::Stopped.skipped_shutdown_kinds().is_empty());
}
