use crate::NotificationKind;

/// A status message waiting for delivery. Created on a state change,
/// consumed once by the notifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationEvent {
    pub kind: NotificationKind,
    pub detail: Option<String>,
}

impl NotificationEvent {
    pub fn new(kind: NotificationKind) -> Self {
        Self { kind, detail: None }
    }

    pub fn with_detail<S: Into<String>>(kind: NotificationKind, detail: S) -> Self {
        Self {
            kind,
            detail: Some(detail.into()),
        }
    }
}

impl From<NotificationKind> for NotificationEvent {
    fn from(kind: NotificationKind) -> Self {
        Self::new(kind)
    }
}
