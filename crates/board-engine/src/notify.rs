//! User feedback port

/// Kind of user-facing message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// A message for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub text: String,
}

impl Notification {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            text: text.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NotificationKind::Error
    }
}

/// Receives every notification the engine emits
pub trait Notifier {
    fn notify(&self, notification: Notification);
}

impl<F> Notifier for F
where
    F: Fn(Notification),
{
    fn notify(&self, notification: Notification) {
        self(notification)
    }
}
