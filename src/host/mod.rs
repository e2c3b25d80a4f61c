//! Interfaces to the hosting media center.
//!
//! The refresh core only needs to tell the user what happened and, on
//! success, ask the host to reload the current view. Both are
//! fire-and-forget.

pub mod console;

pub use console::{CommandRefresher, ConsoleNotifier};

/// Notification level, mirroring the host's toast icons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn label(&self) -> &str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

/// User-facing notifications.
pub trait Notifier {
    fn notify(&self, title: &str, message: &str, severity: Severity);
}

/// Reload of the host's current folder view.
pub trait UiRefresher {
    fn refresh_view(&self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(Severity::Info.label(), "info");
        assert_eq!(Severity::Warning.label(), "warning");
        assert_eq!(Severity::Error.label(), "error");
    }
}
