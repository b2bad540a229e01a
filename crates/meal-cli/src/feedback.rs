//! Terminal notifier and confirmation prompt

use meal_planner::{Confirm, Notifier};
use std::time::Duration;

/// Prints notifications to stderr so stdout stays machine-readable
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&self, message: &str, _duration: Duration) {
        eprintln!("{message}");
    }
}

/// Interactive yes/no prompt, skipped entirely with `--yes`
#[derive(Debug, Clone, Copy)]
pub(crate) struct PromptConfirm {
    assume_yes: bool,
}

impl PromptConfirm {
    pub(crate) fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl Confirm for PromptConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        match dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
        {
            Ok(answer) => answer,
            Err(e) => {
                tracing::warn!(error = %e, "no interactive terminal, treating as refusal");
                false
            }
        }
    }
}
