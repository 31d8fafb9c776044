pub mod error;
pub mod models;
pub mod readiness;

pub use error::{CoreError, Result as CoreResult};
pub use models::notification_event::NotificationEvent;
pub use models::notification_kind::NotificationKind;
pub use models::port_rule::PortRule;
pub use models::protocol::Protocol;
pub use models::server_state::ServerState;
pub use readiness::classifier::{ReadinessClassifier, Transition};
pub use readiness::conan;
pub use readiness::marker_rule::{MarkerRule, MarkerTarget};

#[cfg(test)]
mod tests;
