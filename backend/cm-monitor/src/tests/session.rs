use crate::{MonitorPhase, MonitorSession};

use cm_core::ServerState;

use googletest::assert_that;
use googletest::prelude::eq;

#[test]
fn given_new_session_then_idle_and_not_started() {
    // Given
    let session = MonitorSession::new();

    // Then
    assert_that!(session.phase, eq(MonitorPhase::Idle));
    assert_that!(session.state(), eq(ServerState::NotStarted));
    assert_that!(session.ports_open(), eq(false));
}

#[test]
fn given_ready_log_when_zombie_flagged_then_state_is_zombie() {
    // Given
    let mut session = MonitorSession::new();
    session.set_log_state(ServerState::Ready);

    // When
    session.set_zombie(true);

    // Then
    assert_that!(session.state(), eq(ServerState::Zombie));
    assert_that!(session.log_state(), eq(ServerState::Ready));
}

#[test]
fn given_zombie_when_cleared_then_log_state_shows_through() {
    // Given
    let mut session = MonitorSession::new();
    session.set_log_state(ServerState::Loading);
    session.set_zombie(true);

    // When
    session.set_zombie(false);

    // Then
    assert_that!(session.state(), eq(ServerState::Loading));
}

#[test]
fn given_phases_then_display_lowercase() {
    assert_that!(MonitorPhase::Monitoring.to_string(), eq("monitoring"));
    assert_that!(MonitorPhase::Halted.to_string(), eq("halted"));
}
