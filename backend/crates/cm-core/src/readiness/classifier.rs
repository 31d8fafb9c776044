//! Readiness classification of server log lines.
//!
//! The classifier is a pure function of the current [`ServerState`] and one
//! log line. It never assumes the lines arrive in the happy-path order: a
//! ready marker seen before any loading marker moves straight to `Ready`,
//! and a network-down marker without a preceding exit warning still counts
//! as a shutdown.

use crate::{MarkerRule, MarkerTarget, NotificationKind, ServerState, conan};

/// Result of a line that changed the lifecycle position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub next: ServerState,
    pub event: Option<NotificationKind>,
}

impl Transition {
    fn to(next: ServerState, event: NotificationKind) -> Self {
        Self {
            next,
            event: Some(event),
        }
    }
}

/// Ordered marker rules; the first rule matching a line wins.
#[derive(Debug, Clone)]
pub struct ReadinessClassifier {
    rules: Vec<MarkerRule>,
}

impl ReadinessClassifier {
    pub fn new(rules: Vec<MarkerRule>) -> Self {
        Self { rules }
    }

    /// Classifier for the Conan Exiles dedicated server log.
    pub fn conan_exiles() -> Self {
        Self::new(conan::marker_rules())
    }

    pub fn rules(&self) -> &[MarkerRule] {
        &self.rules
    }

    /// Map `(current, line)` to the next state, or `None` when the line
    /// does not move the server.
    pub fn classify(&self, current: ServerState, line: &str) -> Option<Transition> {
        let target = self.rules.iter().find(|rule| rule.matches(line))?.target;

        // A stopped server only comes back through a fresh start; a hung one
        // may still log its own exit
        match current {
            ServerState::Stopped if target != MarkerTarget::Starting => return None,
            ServerState::Zombie
                if !matches!(target, MarkerTarget::Starting | MarkerTarget::Stopped) =>
            {
                return None;
            }
            _ => {}
        }

        match (target, current) {
            (MarkerTarget::Starting, ServerState::Loading) => None,
            (MarkerTarget::Starting, _) => Some(Transition::to(
                ServerState::Loading,
                NotificationKind::Loading,
            )),

            // World saves during shutdown also print the load marker
            (MarkerTarget::Ready, ServerState::Ready | ServerState::ShuttingDown { .. }) => None,
            (MarkerTarget::Ready, _) => {
                Some(Transition::to(ServerState::Ready, NotificationKind::Ready))
            }

            (MarkerTarget::ShutdownWarning, ServerState::ShuttingDown { .. }) => None,
            (MarkerTarget::ShutdownWarning, _) => Some(Transition::to(
                ServerState::ShuttingDown {
                    network_down: false,
                },
                NotificationKind::ShutdownWarning,
            )),

            (MarkerTarget::NetworkDown, ServerState::ShuttingDown { network_down: true }) => None,
            (MarkerTarget::NetworkDown, _) => Some(Transition::to(
                ServerState::ShuttingDown { network_down: true },
                NotificationKind::NetworkShutdown,
            )),

            (MarkerTarget::Stopped, ServerState::Stopped) => None,
            (MarkerTarget::Stopped, _) => Some(Transition::to(
                ServerState::Stopped,
                NotificationKind::ShutdownFinal,
            )),
        }
    }

    /// Fold a batch of lines, returning every transition in order.
    pub fn classify_all<'a, I>(&self, start: ServerState, lines: I) -> Vec<Transition>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut state = start;
        let mut transitions = Vec::new();

        for line in lines {
            if let Some(transition) = self.classify(state, line) {
                state = transition.next;
                transitions.push(transition);
            }
        }

        transitions
    }
}

impl Default for ReadinessClassifier {
    fn default() -> Self {
        Self::conan_exiles()
    }
}
