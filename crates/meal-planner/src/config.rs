//! Planner configuration

use meal_storage::DEFAULT_PREFIX;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Current data-format version written by `bootstrap`
pub const APP_VERSION: &str = "1.1.0";

/// Planner configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Prefix for every persisted key
    pub storage_prefix: String,
    /// Seed example menu, custom foods and list on first start
    pub seed_example_data: bool,
    /// How long notifications stay visible, in milliseconds
    pub notification_duration_ms: u64,
    /// Version stamped into storage
    pub app_version: String,
}

impl PlannerConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With storage prefix
    #[inline]
    #[must_use]
    pub fn with_storage_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.storage_prefix = prefix.into();
        self
    }

    /// With example-data seeding on or off
    #[inline]
    #[must_use]
    pub fn with_seed_example_data(mut self, seed: bool) -> Self {
        self.seed_example_data = seed;
        self
    }

    /// With notification duration
    #[inline]
    #[must_use]
    pub fn with_notification_duration(mut self, duration: Duration) -> Self {
        self.notification_duration_ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Notification duration
    #[inline]
    #[must_use]
    pub fn notification_duration(&self) -> Duration {
        Duration::from_millis(self.notification_duration_ms)
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            storage_prefix: DEFAULT_PREFIX.to_string(),
            seed_example_data: true,
            notification_duration_ms: 3000,
            app_version: APP_VERSION.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = PlannerConfig::new();
        assert_eq!(config.storage_prefix, "mealplanner_");
        assert!(config.seed_example_data);
        assert_eq!(config.notification_duration(), Duration::from_secs(3));
        assert_eq!(config.app_version, APP_VERSION);
    }

    #[test]
    fn builder_methods() {
        let config = PlannerConfig::new()
            .with_storage_prefix("test_")
            .with_seed_example_data(false)
            .with_notification_duration(Duration::from_millis(500));
        assert_eq!(config.storage_prefix, "test_");
        assert!(!config.seed_example_data);
        assert_eq!(config.notification_duration_ms, 500);
    }

    #[test]
    fn partial_deserialize_fills_defaults() {
        let config: PlannerConfig =
            serde_json::from_str(r#"{"seed_example_data": false}"#).unwrap();
        assert!(!config.seed_example_data);
        assert_eq!(config.storage_prefix, "mealplanner_");
    }
}
