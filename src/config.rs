//! Application configuration.
//!
//! The configuration is loaded from a JSON file, either the path passed with
//! `--config <path>` or `$XDG_CONFIG_HOME/aeromanager/config.json`.
//!
//! # Example
//!
//! ```json
//! {
//!   "aerospace_bin": "/opt/homebrew/bin/aerospace",
//!   "builtin_marker": "Built-in",
//!   "builtin_rule": "numbered",
//!   "home_workspaces": { "dual": ["B1", "L1"] }
//! }
//! ```

use crate::mapping::{BuiltinRule, WorkspaceMapper, DEFAULT_BUILTIN_MARKER};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration.
///
/// Every field is optional — a minimal `{}` file is valid and all fields
/// fall back to their compiled-in defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Name or path of the AeroSpace CLI.
    pub aerospace_bin: String,
    /// Substring that identifies the built-in display by monitor name.
    pub builtin_marker: String,
    /// Naming scheme used for workspaces on the built-in display.
    pub builtin_rule: BuiltinRule,
    /// Workspaces focused after a rearrange.
    pub home_workspaces: HomeWorkspaces,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            aerospace_bin: "aerospace".into(),
            builtin_marker: DEFAULT_BUILTIN_MARKER.into(),
            builtin_rule: BuiltinRule::default(),
            home_workspaces: HomeWorkspaces::default(),
        }
    }
}

/// Workspaces to focus, in order, once a rearrange has finished.
///
/// The last one listed ends up with keyboard focus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HomeWorkspaces {
    pub single: Vec<String>,
    pub dual: Vec<String>,
    pub triple: Vec<String>,
}

impl Default for HomeWorkspaces {
    fn default() -> Self {
        Self {
            single: vec!["A".into()],
            dual: vec!["A".into(), "L1".into()],
            triple: vec!["A".into(), "L1".into(), "R1".into()],
        }
    }
}

impl HomeWorkspaces {
    /// Home workspaces for a setup with `count` monitors.
    pub fn for_monitor_count(&self, count: usize) -> &[String] {
        match count {
            1 => &self.single,
            2 => &self.dual,
            3 => &self.triple,
            _ => &[],
        }
    }
}

impl Config {
    /// Load configuration from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError(format!("failed to read {}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| ConfigError(format!("failed to parse {}: {}", path.display(), e)))?;
        Ok(config)
    }

    /// Build the workspace mapper described by this configuration.
    pub fn mapper(&self) -> WorkspaceMapper {
        WorkspaceMapper::new(self.builtin_rule, self.builtin_marker.clone())
    }
}

/// Error from loading or parsing a configuration file.
#[derive(Debug, thiserror::Error)]
#[error("config error: {0}")]
pub struct ConfigError(String);
