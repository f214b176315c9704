//! Skill configuration
//!
//! Loaded once at process start, typically from a `skill.toml` next to the
//! binary. Every field has a default so an empty file is a valid config.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{SkillError, SkillResult};

/// Configuration for a skill instance
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SkillConfig {
    /// Directory holding the APL layout documents
    #[serde(default = "default_assets_dir")]
    pub assets_dir: PathBuf,

    /// File name of the plain greeting layout
    #[serde(default = "default_hello_world_document")]
    pub hello_world_document: String,

    /// File name of the greeting layout with the fade button
    #[serde(default = "default_hello_world_button_document")]
    pub hello_world_button_document: String,

    /// Default tracing filter, overridden by `RUST_LOG`
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_assets_dir() -> PathBuf {
    PathBuf::from("assets")
}

fn default_hello_world_document() -> String {
    "helloworldDocument.json".to_string()
}

fn default_hello_world_button_document() -> String {
    "helloworldWithButtonDocument.json".to_string()
}

fn default_log_filter() -> String {
    "cim_domain_skill=info".to_string()
}

impl Default for SkillConfig {
    fn default() -> Self {
        Self {
            assets_dir: default_assets_dir(),
            hello_world_document: default_hello_world_document(),
            hello_world_button_document: default_hello_world_button_document(),
            log_filter: default_log_filter(),
        }
    }
}

impl SkillConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(text: &str) -> SkillResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load a configuration file
    pub fn load(path: impl AsRef<Path>) -> SkillResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            SkillError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&text)
    }

    /// Point the skill at a different asset directory
    pub fn with_assets_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.assets_dir = dir.into();
        self
    }
}
