use cm_config::{MessageControl, Messages, ServerConfig};
use cm_core::NotificationEvent;

/// Decides whether an event is announced and what it says.
#[derive(Debug, Clone)]
pub struct MessageCatalog {
    server_name: String,
    control: MessageControl,
    messages: Messages,
}

impl MessageCatalog {
    pub fn new(server_name: &str, control: MessageControl, messages: Messages) -> Self {
        Self {
            server_name: server_name.to_string(),
            control,
            messages,
        }
    }

    pub fn from_config(server: &ServerConfig) -> Self {
        Self::new(
            &server.name,
            server.message_control.clone(),
            server.messages.clone(),
        )
    }

    /// Rendered text, or `None` when the event's kind is switched off.
    pub fn render(&self, event: &NotificationEvent) -> Option<String> {
        if !self.control.is_enabled(event.kind) {
            return None;
        }

        let template = self.messages.template(event.kind);
        let detail = event.detail.as_deref().unwrap_or_default();

        Some(
            template
                .replace("{server}", &self.server_name)
                .replace("{detail}", detail),
        )
    }
}
