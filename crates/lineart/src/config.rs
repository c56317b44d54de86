//! CLI configuration (seed, output formatting, budget). Loaded from lineart.ron.

use anyhow::{Context, Result};
use composer::BudgetConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "lineart.ron";

/// Persistent settings. Loaded from `lineart.ron` in the current directory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineartConfig {
    /// Fixed request seed; a fresh one is drawn per run when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Pretty-print the scene document.
    #[serde(default)]
    pub pretty: bool,
    #[serde(default)]
    pub budget: BudgetConfig,
}

impl LineartConfig {
    /// Load from `lineart.ron`. A missing or invalid file yields the defaults.
    pub fn load() -> Self {
        let path = config_path();
        if let Ok(data) = std::fs::read_to_string(&path) {
            match ron::from_str(&data) {
                Ok(c) => return c,
                Err(e) => log::warn!("Invalid config at {:?}: {}, using defaults", path, e),
            }
        }
        Self::default()
    }

    /// Load an explicitly requested file. Unlike [`LineartConfig::load`], any
    /// failure is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("could not read config {}", path.display()))?;
        Self::parse(&data).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn parse(data: &str) -> Result<Self> {
        Ok(ron::from_str(data)?)
    }
}

fn config_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(CONFIG_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_is_default() {
        assert_eq!(LineartConfig::parse("()").unwrap(), LineartConfig::default());
    }

    #[test]
    fn partial_budget_keeps_other_defaults() {
        let config = LineartConfig::parse("(seed: Some(42), budget: (max_total_lines: 300))").unwrap();
        assert_eq!(config.seed, Some(42));
        assert!(!config.pretty);
        assert_eq!(config.budget.max_total_lines, 300);
        assert_eq!(config.budget.max_lines_per_algorithm, 500);
        assert_eq!(config.budget.max_algorithms, 6);
    }

    #[test]
    fn invalid_config_is_an_error() {
        assert!(LineartConfig::parse("(budget: 7)").is_err());
        assert!(LineartConfig::load_from(Path::new("/nonexistent/lineart.ron")).is_err());
    }
}
