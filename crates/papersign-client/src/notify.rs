//! Transient notifications (toasts) and the notifier seam.

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Operation succeeded.
    Success,
    /// Operation failed.
    Error,
}

/// Screen corner a toast appears in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPosition {
    /// Top edge, centred.
    TopCenter,
    /// Top-right corner.
    TopRight,
}

/// Presentation hints passed through to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastStyle {
    /// How long the toast stays visible, in milliseconds.
    pub duration_ms: u64,
    /// Where the toast appears.
    pub position: ToastPosition,
    /// Background colour override.
    pub background: Option<&'static str>,
    /// Text colour override.
    pub color: Option<&'static str>,
}

impl ToastStyle {
    /// Default style for account notifications.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            duration_ms: 4000,
            position: ToastPosition::TopRight,
            background: None,
            color: None,
        }
    }

    /// Red toast shown when the login form is rejected.
    #[must_use]
    pub const fn login_error() -> Self {
        Self {
            duration_ms: 4000,
            position: ToastPosition::TopRight,
            background: Some("#ef4444"),
            color: Some("#fff"),
        }
    }

    /// Host default style, used by the document list.
    #[must_use]
    pub const fn host_default() -> Self {
        Self {
            duration_ms: 4000,
            position: ToastPosition::TopCenter,
            background: None,
            color: None,
        }
    }
}

/// One toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Severity.
    pub level: Level,
    /// Text shown to the user.
    pub message: String,
    /// Presentation hints.
    pub style: ToastStyle,
}

impl Notification {
    /// Success toast with `style`.
    #[must_use]
    pub fn success(message: impl Into<String>, style: ToastStyle) -> Self {
        Self {
            level: Level::Success,
            message: message.into(),
            style,
        }
    }

    /// Error toast with `style`.
    #[must_use]
    pub fn error(message: impl Into<String>, style: ToastStyle) -> Self {
        Self {
            level: Level::Error,
            message: message.into(),
            style,
        }
    }
}

/// Host-provided toast sink.
pub trait Notifier: Send + Sync {
    /// Display `notification`.
    fn notify(&self, notification: Notification);
}
