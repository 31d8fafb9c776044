use crate::tests::{PID, busy, halted, idle};
use crate::{LivenessTracker, Verdict};

use std::time::{Duration, Instant};

use googletest::assert_that;
use googletest::prelude::eq;

const TIMEOUT: Duration = Duration::from_secs(300);

#[test]
fn given_no_process_when_observed_then_absent() {
    let mut tracker = LivenessTracker::new(TIMEOUT, false);

    let verdict = tracker.observe(None, Instant::now());

    assert_that!(verdict, eq(Verdict::Absent));
}

#[test]
fn given_first_sample_with_zero_cpu_when_observed_then_responsive_baseline() {
    // Given
    let mut tracker = LivenessTracker::new(TIMEOUT, false);

    // When
    let verdict = tracker.observe(idle(PID), Instant::now());

    // Then
    assert_that!(verdict, eq(Verdict::Responsive));
}

#[test]
fn given_idle_shorter_than_timeout_when_observed_then_unresponsive_only() {
    // Given
    let mut tracker = LivenessTracker::new(TIMEOUT, false);
    let start = Instant::now();
    tracker.observe(busy(PID), start);

    // When
    tracker.observe(idle(PID), start + Duration::from_secs(10));
    let verdict = tracker.observe(idle(PID), start + Duration::from_secs(200));

    // Then
    assert_that!(verdict, eq(Verdict::Unresponsive));
    assert_that!(tracker.is_zombie(), eq(false));
}

#[test]
fn given_idle_past_timeout_when_observed_then_zombie_once() {
    // Given
    let mut tracker = LivenessTracker::new(TIMEOUT, true);
    let start = Instant::now();
    tracker.observe(busy(PID), start);
    tracker.observe(idle(PID), start + Duration::from_secs(1));

    // When
    let first = tracker.observe(idle(PID), start + Duration::from_secs(302));
    let second = tracker.observe(idle(PID), start + Duration::from_secs(400));

    // Then
    assert_that!(first, eq(Verdict::Zombie { pid: PID, kill: true }));
    assert_that!(second, eq(Verdict::Unresponsive));
}

#[test]
fn given_activity_resumes_before_timeout_when_idle_again_then_timer_restarts() {
    // Given
    let mut tracker = LivenessTracker::new(TIMEOUT, false);
    let start = Instant::now();
    tracker.observe(busy(PID), start);
    tracker.observe(idle(PID), start + Duration::from_secs(1));
    tracker.observe(busy(PID), start + Duration::from_secs(250));

    // When
    tracker.observe(idle(PID), start + Duration::from_secs(260));
    let verdict = tracker.observe(idle(PID), start + Duration::from_secs(400));

    // Then
    assert_that!(verdict, eq(Verdict::Unresponsive));
}

#[test]
fn given_zombie_when_activity_resumes_then_recovered() {
    // Given
    let mut tracker = LivenessTracker::new(TIMEOUT, false);
    let start = Instant::now();
    tracker.observe(busy(PID), start);
    tracker.observe(halted(PID), start + Duration::from_secs(1));
    tracker.observe(halted(PID), start + Duration::from_secs(400));

    // When
    let verdict = tracker.observe(busy(PID), start + Duration::from_secs(401));

    // Then
    assert_that!(verdict, eq(Verdict::Recovered { pid: PID }));
}

#[test]
fn given_seen_process_when_it_disappears_then_exited_once() {
    // Given
    let mut tracker = LivenessTracker::new(TIMEOUT, false);
    let now = Instant::now();
    tracker.observe(busy(PID), now);

    // When
    let first = tracker.observe(None, now);
    let second = tracker.observe(None, now);

    // Then
    assert_that!(first, eq(Verdict::Exited { pid: PID }));
    assert_that!(second, eq(Verdict::Absent));
}

#[test]
fn given_zombie_when_new_pid_appears_then_fresh_episode() {
    // Given
    let mut tracker = LivenessTracker::new(TIMEOUT, false);
    let start = Instant::now();
    tracker.observe(busy(PID), start);
    tracker.observe(idle(PID), start + Duration::from_secs(1));
    tracker.observe(idle(PID), start + Duration::from_secs(400));

    // When
    let verdict = tracker.observe(idle(PID + 1), start + Duration::from_secs(401));

    // Then
    assert_that!(verdict, eq(Verdict::Responsive));
    assert_that!(tracker.is_zombie(), eq(false));
}
