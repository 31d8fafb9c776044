use crate::conan::{
    LOAD_COMPLETE, SERVER_EXIT_WARNING, SERVER_NETWORK_DOWN, SERVER_STARTING, SERVER_STOPPED,
};
use crate::{MarkerRule, MarkerTarget, NotificationKind, ReadinessClassifier, ServerState};

use googletest::assert_that;
use googletest::prelude::{eq, none, some};

fn generic_classifier() -> ReadinessClassifier {
    ReadinessClassifier::new(vec![
        MarkerRule::new("Loading world", MarkerTarget::Starting),
        MarkerRule::new("Server is ready for connections", MarkerTarget::Ready),
        MarkerRule::new("Shutting down", MarkerTarget::ShutdownWarning),
        MarkerRule::new("Server stopped", MarkerTarget::Stopped),
    ])
}

fn log_line(marker: &str) -> String {
    format!("[2024.01.01-12.00.00:000][  0]{marker}")
}

// =========================================================================
// Happy Path
// =========================================================================

#[test]
fn given_loading_then_ready_lines_when_classified_then_not_started_loading_ready() {
    // Given
    let classifier = generic_classifier();
    let lines = [
        "Loading world...",
        "World loaded.",
        "Server is ready for connections",
    ];

    // When
    let transitions = classifier.classify_all(ServerState::NotStarted, lines);

    // Then
    let states: Vec<ServerState> = transitions.iter().map(|t| t.next).collect();
    assert_that!(states, eq(&vec![ServerState::Loading, ServerState::Ready]));
    let events: Vec<_> = transitions.iter().filter_map(|t| t.event).collect();
    assert_that!(
        events,
        eq(&vec![NotificationKind::Loading, NotificationKind::Ready])
    );
}

#[test]
fn given_full_conan_sequence_when_classified_then_walks_every_state() {
    // Given
    let classifier = ReadinessClassifier::conan_exiles();
    let lines: Vec<String> = [
        SERVER_STARTING,
        LOAD_COMPLETE,
        SERVER_EXIT_WARNING,
        SERVER_NETWORK_DOWN,
        SERVER_STOPPED,
    ]
    .iter()
    .map(|marker| log_line(marker))
    .collect();

    // When
    let transitions =
        classifier.classify_all(ServerState::NotStarted, lines.iter().map(String::as_str));

    // Then
    let events: Vec<_> = transitions.iter().filter_map(|t| t.event).collect();
    assert_that!(
        events,
        eq(&vec![
            NotificationKind::Loading,
            NotificationKind::Ready,
            NotificationKind::ShutdownWarning,
            NotificationKind::NetworkShutdown,
            NotificationKind::ShutdownFinal,
        ])
    );
    assert_that!(
        transitions.last().map(|t| t.next),
        some(eq(ServerState::Stopped))
    );
}

// =========================================================================
// Out-of-order and Missing Lines
// =========================================================================

#[test]
fn given_ready_without_loading_when_classified_then_jumps_to_ready() {
    // Given
    let classifier = generic_classifier();

    // When
    let transition = classifier.classify(
        ServerState::NotStarted,
        "Server is ready for connections",
    );

    // Then
    assert_that!(transition.map(|t| t.next), some(eq(ServerState::Ready)));
}

#[test]
fn given_network_down_without_warning_when_classified_then_shutting_down() {
    // Given
    let classifier = ReadinessClassifier::conan_exiles();

    // When
    let transition = classifier.classify(ServerState::Ready, &log_line(SERVER_NETWORK_DOWN));

    // Then
    assert_that!(
        transition.map(|t| t.next),
        some(eq(ServerState::ShuttingDown { network_down: true }))
    );
}

#[test]
fn given_network_already_down_when_marker_repeats_then_no_transition() {
    // Given
    let classifier = ReadinessClassifier::conan_exiles();

    // When
    let transition = classifier.classify(
        ServerState::ShuttingDown { network_down: true },
        &log_line(SERVER_NETWORK_DOWN),
    );

    // Then
    assert_that!(transition, none());
}

#[test]
fn given_shutting_down_when_world_save_marker_then_stays_shutting_down() {
    // Given
    let classifier = ReadinessClassifier::conan_exiles();

    // When
    let transition = classifier.classify(
        ServerState::ShuttingDown {
            network_down: false,
        },
        &log_line(LOAD_COMPLETE),
    );

    // Then
    assert_that!(transition, none());
}

#[test]
fn given_ready_when_load_marker_repeats_then_no_duplicate_transition() {
    let classifier = ReadinessClassifier::conan_exiles();

    let transition = classifier.classify(ServerState::Ready, &log_line(LOAD_COMPLETE));

    assert_that!(transition, none());
}

#[test]
fn given_unmatched_line_when_classified_then_none() {
    let classifier = ReadinessClassifier::conan_exiles();

    let transition = classifier.classify(ServerState::Loading, "LogInit: Display: Engine init");

    assert_that!(transition, none());
}

// =========================================================================
// Terminal State
// =========================================================================

#[test]
fn given_stopped_when_ready_marker_then_ignored() {
    // Given
    let classifier = ReadinessClassifier::conan_exiles();

    // When
    let transition = classifier.classify(ServerState::Stopped, &log_line(LOAD_COMPLETE));

    // Then
    assert_that!(transition, none());
}

#[test]
fn given_stopped_when_start_marker_then_loading_again() {
    // Given
    let classifier = ReadinessClassifier::conan_exiles();

    // When
    let transition = classifier.classify(ServerState::Stopped, &log_line(SERVER_STARTING));

    // Then
    assert_that!(transition.map(|t| t.next), some(eq(ServerState::Loading)));
    assert_that!(
        transition.and_then(|t| t.event),
        some(eq(NotificationKind::Loading))
    );
}

#[test]
fn given_zombie_when_stop_marker_then_stopped() {
    let classifier = ReadinessClassifier::conan_exiles();

    let transition = classifier.classify(ServerState::Zombie, &log_line(SERVER_STOPPED));

    assert_that!(transition.map(|t| t.next), some(eq(ServerState::Stopped)));
}

#[test]
fn given_zombie_when_exit_warning_then_ignored() {
    let classifier = ReadinessClassifier::conan_exiles();

    let transition = classifier.classify(ServerState::Zombie, &log_line(SERVER_EXIT_WARNING));

    assert_that!(transition, none());
}

#[test]
fn given_line_with_two_markers_when_classified_then_first_rule_wins() {
    // Given
    let classifier = ReadinessClassifier::conan_exiles();
    let line = format!("{SERVER_STARTING} ... {SERVER_STOPPED}");

    // When
    let transition = classifier.classify(ServerState::Ready, &line);

    // Then
    assert_that!(transition.map(|t| t.next), some(eq(ServerState::Stopped)));
}
