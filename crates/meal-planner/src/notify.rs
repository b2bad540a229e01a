//! User-facing feedback hooks
//!
//! The planner reports the outcome of every top-level mutation through a
//! [`Notifier`] and asks a [`Confirm`] before destructive operations.

use std::time::Duration;

/// Receives one message per completed or failed operation
#[cfg_attr(test, mockall::automock)]
pub trait Notifier {
    /// Show `message` for about `duration`
    fn notify(&self, message: &str, duration: Duration);
}

/// Answers yes/no before destructive operations
#[cfg_attr(test, mockall::automock)]
pub trait Confirm {
    /// Ask `prompt`; `true` means proceed
    fn confirm(&self, prompt: &str) -> bool;
}

/// Notifier that writes messages to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str, duration: Duration) {
        tracing::info!(duration_ms = duration.as_millis(), "{message}");
    }
}

/// Confirmation that always proceeds
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

impl Confirm for AlwaysConfirm {
    #[inline]
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}
