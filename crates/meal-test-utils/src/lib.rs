//! Testing utilities for the meal planner workspace
//!
//! Shared fixtures, recording hooks and planners over throwaway storage.

#![allow(missing_docs)]

use chrono::NaiveDate;
use meal_calendar::{Day, WeekKey};
use meal_planner::{Confirm, Meal, Notifier, Planner, PlannerConfig};
use meal_storage::{DirectoryBackend, MemoryBackend};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

/// Week used by the shared scenario
pub fn scenario_week() -> WeekKey {
    WeekKey::new(2025, 20).unwrap()
}

/// Wednesday inside [`scenario_week`]
pub fn scenario_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 5, 14).unwrap()
}

pub fn week(key: &str) -> WeekKey {
    key.parse().unwrap()
}

/// Config with seeding off, so stores start empty
pub fn test_config() -> PlannerConfig {
    PlannerConfig::new()
        .with_storage_prefix("test_")
        .with_seed_example_data(false)
}

/// Collects every notification message
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    messages: Arc<Mutex<Vec<String>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }

    pub fn last(&self) -> Option<String> {
        self.messages.lock().last().cloned()
    }

    pub fn count(&self) -> usize {
        self.messages.lock().len()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str, _duration: Duration) {
        self.messages.lock().push(message.to_string());
    }
}

/// Answers prompts from a queue, refusing once it runs dry
#[derive(Debug, Clone, Default)]
pub struct ScriptedConfirm {
    answers: Arc<Mutex<VecDeque<bool>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl ScriptedConfirm {
    pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: Arc::new(Mutex::new(answers.into_iter().collect())),
            prompts: Arc::default(),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }
}

impl Confirm for ScriptedConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        self.prompts.lock().push(prompt.to_string());
        self.answers.lock().pop_front().unwrap_or(false)
    }
}

/// Empty in-memory planner plus a handle on its notifications
pub fn memory_planner() -> (Planner<MemoryBackend>, RecordingNotifier) {
    let notifier = RecordingNotifier::new();
    let planner = Planner::new(MemoryBackend::new(), test_config()).with_notifier(notifier.clone());
    (planner, notifier)
}

/// Planner over a fresh temporary directory; keep the guard alive
pub fn directory_planner() -> (Planner<DirectoryBackend>, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let backend = DirectoryBackend::new(dir.path());
    (Planner::new(backend, test_config()), dir)
}

/// Monday lunch `Riso basmati, Petto di pollo` and Tuesday lunch
/// `Petto di pollo`, both in [`scenario_week`]
pub fn seed_scenario_menu<B: meal_storage::StorageBackend>(planner: &Planner<B>) {
    let week = scenario_week();
    planner
        .set_meal(week, Day::Monday, Meal::Lunch, &["Riso basmati", "Petto di pollo"])
        .unwrap();
    planner
        .set_meal(week, Day::Tuesday, Meal::Lunch, &["Petto di pollo"])
        .unwrap();
}
