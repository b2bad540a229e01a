//! File-based configuration

use anyhow::{Context, Result};
use meal_planner::PlannerConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Data directory used when neither flag nor file names one
pub(crate) const DEFAULT_DATA_DIR: &str = ".mealplan";

/// Contents of the `--config` TOML file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct CliConfig {
    /// Directory holding stored records
    pub(crate) data_dir: Option<PathBuf>,
    /// Planner settings
    pub(crate) planner: PlannerConfig,
}

impl CliConfig {
    /// Parse TOML text
    pub(crate) fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("invalid configuration")
    }

    /// Read `path`, or defaults when no path is given
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config file {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("in {}", path.display()))
    }

    /// Data directory, with the command-line flag taking precedence
    pub(crate) fn resolve_data_dir(&self, flag: Option<&PathBuf>) -> PathBuf {
        flag.cloned()
            .or_else(|| self.data_dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
    }
}
