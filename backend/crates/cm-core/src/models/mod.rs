pub mod notification_event;
pub mod notification_kind;
pub mod port_rule;
pub mod protocol;
pub mod server_state;
