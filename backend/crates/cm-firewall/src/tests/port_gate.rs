use crate::tests::FakeFirewall;
use crate::{GateAction, PortGate};

use cm_core::{PortRule, Protocol};

use googletest::assert_that;
use googletest::prelude::{eq, none, some};

const PREFIX: &str = "GameServerControl";

fn gate(fake: &FakeFirewall) -> PortGate {
    PortGate::new(Box::new(fake.clone()), PortRule::conan_defaults(), PREFIX)
}

// =========================================================================
// Block / Allow
// =========================================================================

#[tokio::test]
async fn given_no_rules_when_block_then_every_port_blocked() {
    // Given
    let fake = FakeFirewall::default();
    let gate = gate(&fake);

    // When
    let report = gate.block().await;

    // Then
    assert_that!(report.is_success(), eq(true));
    assert_that!(report.changed.len(), eq(5));
    assert_that!(fake.rule_names().len(), eq(5));
    assert_that!(
        fake.rule_names().contains(&String::from("GameServerControl_25575_TCP")),
        eq(true)
    );
}

#[tokio::test]
async fn given_blocked_when_block_again_then_rule_set_unchanged() {
    // Given
    let fake = FakeFirewall::default();
    let gate = gate(&fake);
    gate.block().await;
    let before = fake.rule_names();

    // When
    let report = gate.block().await;

    // Then
    assert_that!(fake.rule_names(), eq(&before));
    assert_that!(report.unchanged.len(), eq(5));
    assert_that!(fake.mutation_count(), eq(5));
}

#[tokio::test]
async fn given_blocked_when_allow_then_rules_removed() {
    // Given
    let fake = FakeFirewall::default();
    let gate = gate(&fake);
    gate.block().await;

    // When
    let report = gate.allow().await;

    // Then
    assert_that!(report.action, eq(GateAction::Allow));
    assert_that!(report.changed.len(), eq(5));
    assert_that!(fake.rule_names().is_empty(), eq(true));
}

#[tokio::test]
async fn given_allowed_when_allow_again_then_no_mutation() {
    // Given
    let fake = FakeFirewall::default();
    let gate = gate(&fake);

    // When
    gate.allow().await;
    let report = gate.allow().await;

    // Then
    assert_that!(report.unchanged.len(), eq(5));
    assert_that!(fake.mutation_count(), eq(0));
}

// =========================================================================
// Partial Failure
// =========================================================================

#[tokio::test]
async fn given_rcon_rule_fails_when_block_then_other_ports_still_blocked() {
    // Given
    let fake = FakeFirewall::default();
    fake.fail_on("GameServerControl_25575_TCP");
    let gate = gate(&fake);

    // When
    let report = gate.block().await;

    // Then
    assert_that!(report.failures.len(), eq(1));
    assert_that!(
        report.failures[0].rule,
        eq(PortRule::new(25575, Protocol::Tcp))
    );
    assert_that!(fake.rule_names().len(), eq(4));
    assert_that!(
        report.failure_summary(),
        some(eq("Failed to block port(s) 25575/TCP"))
    );
}

#[tokio::test]
async fn given_successful_block_when_summarised_then_no_failure_text() {
    let fake = FakeFirewall::default();

    let report = gate(&fake).block().await;

    assert_that!(report.failure_summary(), none());
}
