//! Engine configuration support
//!
//! Loads the engine configuration from `threatgraph.toml` or
//! `.threatgraphrc.json` in a directory, or from an explicit path.
//!
//! # Configuration Format
//!
//! ```toml
//! # threatgraph.toml
//!
//! SkipRiskRules = "missing-hardening, unnecessary-technical-asset"
//! IgnoreOrphanedRiskTracking = false
//! Workers = 4
//!
//! [Attractiveness]
//! Quantity = 1
//! Confidentiality = { Asset = 1, ProcessedOrStoredData = 2, TransferredData = 1 }
//! ```
//!
//! Keys are matched case-insensitively and `_`/`-` are ignored, so
//! `skip_risk_rules` and `SkipRiskRules` name the same setting. Only keys
//! present in the file are applied on top of the defaults.

use crate::rules::{RiskCategoryRegistry, RuleEngine};
use crate::scoring::Attractiveness;
use crate::tracking::OrphanPolicy;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// File names searched in a directory, first found wins
pub const CONFIG_FILE_NAMES: &[&str] = &["threatgraph.toml", ".threatgraphrc.json"];

/// Settings of one analysis run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EngineConfig {
    /// Risk rule ids not to evaluate
    pub skip_risk_rules: Vec<String>,
    /// Warn about orphaned tracking entries instead of failing (default: true)
    pub ignore_orphaned_risk_tracking: bool,
    pub attractiveness: Attractiveness,
    /// Rule evaluation threads, 0 = auto
    pub workers: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            skip_risk_rules: Vec::new(),
            ignore_orphaned_risk_tracking: true,
            attractiveness: Attractiveness::default(),
            workers: 0,
        }
    }
}

impl EngineConfig {
    pub fn orphan_policy(&self) -> OrphanPolicy {
        OrphanPolicy::from_ignore_flag(self.ignore_orphaned_risk_tracking)
    }

    /// Build a rule engine with these settings
    pub fn engine(&self, registry: Arc<RiskCategoryRegistry>) -> RuleEngine {
        RuleEngine::builder(registry)
            .workers(self.workers)
            .skip_risk_rules(self.skip_risk_rules.clone())
            .attractiveness(self.attractiveness)
            .orphan_policy(self.orphan_policy())
            .build()
    }

    /// Apply the keys of a parsed document on top of this config
    pub fn merge(&mut self, document: &Value) -> Result<()> {
        let Some(table) = document.as_object() else {
            anyhow::bail!("configuration must be a table of settings");
        };
        for (key, value) in table {
            let normalized = normalize_config_key(key);
            match SETTERS.iter().find(|(name, _)| *name == normalized) {
                Some((_, setter)) => {
                    setter(self, value.clone()).with_context(|| format!("Invalid value for {key}"))?
                }
                None => debug!("Ignoring unknown configuration key {}", key),
            }
        }
        Ok(())
    }
}

type Setter = fn(&mut EngineConfig, Value) -> Result<()>;

/// Normalized key -> setter
const SETTERS: &[(&str, Setter)] = &[
    ("skipriskrules", set_skip_risk_rules),
    ("ignoreorphanedrisktracking", set_ignore_orphaned_risk_tracking),
    ("attractiveness", set_attractiveness),
    ("workers", set_workers),
];

/// Skip list as written in a config file
#[derive(Deserialize)]
#[serde(untagged)]
enum SkipList {
    List(Vec<String>),
    Csv(String),
}

fn set_skip_risk_rules(config: &mut EngineConfig, value: Value) -> Result<()> {
    config.skip_risk_rules = match serde_json::from_value(value)? {
        SkipList::List(ids) => ids
            .iter()
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .collect(),
        SkipList::Csv(csv) => parse_skip_list(&csv),
    };
    Ok(())
}

fn set_ignore_orphaned_risk_tracking(config: &mut EngineConfig, value: Value) -> Result<()> {
    config.ignore_orphaned_risk_tracking = serde_json::from_value(value)?;
    Ok(())
}

fn set_attractiveness(config: &mut EngineConfig, value: Value) -> Result<()> {
    config.attractiveness = serde_json::from_value(value)?;
    Ok(())
}

fn set_workers(config: &mut EngineConfig, value: Value) -> Result<()> {
    config.workers = serde_json::from_value(value)?;
    Ok(())
}

/// Lower-case a key and drop `_` and `-` separators
pub fn normalize_config_key(key: &str) -> String {
    key.chars()
        .filter(|c| *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Split a comma-separated rule list, dropping blanks
pub fn parse_skip_list(csv: &str) -> Vec<String> {
    csv.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

/// Load the engine configuration.
///
/// An explicit path must exist. Otherwise the directory is searched for:
/// 1. `threatgraph.toml`
/// 2. `.threatgraphrc.json`
///
/// Returns the default configuration if no config file is found.
pub fn load_engine_config(dir: &Path, explicit: Option<&Path>) -> Result<EngineConfig> {
    let path: Option<PathBuf> = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists()),
    };
    let Some(path) = path else {
        debug!("No engine config found, using defaults");
        return Ok(EngineConfig::default());
    };

    let document = read_document(&path)
        .with_context(|| format!("Failed to load config {}", path.display()))?;
    let mut config = EngineConfig::default();
    config
        .merge(&document)
        .with_context(|| format!("Failed to apply config {}", path.display()))?;
    debug!("Loaded engine config from {}", path.display());
    Ok(config)
}

fn read_document(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    let is_toml = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
    if is_toml {
        let table: toml::Table = toml::from_str(&content)?;
        Ok(serde_json::to_value(table)?)
    } else {
        Ok(serde_json::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests;
