//! APL layout documents
//!
//! Documents are read from disk on every use; the store only remembers where
//! they live.

use std::io::ErrorKind;
use std::path::PathBuf;

use serde_json::Value;
use tracing::debug;

use crate::config::SkillConfig;
use crate::errors::{SkillError, SkillResult};

/// Token sent with the plain greeting document
pub const HELLO_WORLD_TOKEN: &str = "helloworldToken";

/// Token sent with the greeting document that has the fade button
pub const HELLO_WORLD_WITH_BUTTON_TOKEN: &str = "helloworldWithButtonToken";

/// Layout documents known to the skill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutDocument {
    HelloWorld,
    HelloWorldWithButton,
}

impl LayoutDocument {
    /// Token correlating the rendered document with later commands
    pub fn token(&self) -> &'static str {
        match self {
            LayoutDocument::HelloWorld => HELLO_WORLD_TOKEN,
            LayoutDocument::HelloWorldWithButton => HELLO_WORLD_WITH_BUTTON_TOKEN,
        }
    }
}

/// Read-only access to the layout documents
#[derive(Debug, Clone)]
pub struct DocumentStore {
    root: PathBuf,
    hello_world: String,
    hello_world_with_button: String,
}

impl DocumentStore {
    pub fn from_config(config: &SkillConfig) -> Self {
        Self {
            root: config.assets_dir.clone(),
            hello_world: config.hello_world_document.clone(),
            hello_world_with_button: config.hello_world_button_document.clone(),
        }
    }

    /// Path the given document is read from
    pub fn path_of(&self, document: LayoutDocument) -> PathBuf {
        let file_name = match document {
            LayoutDocument::HelloWorld => &self.hello_world,
            LayoutDocument::HelloWorldWithButton => &self.hello_world_with_button,
        };
        self.root.join(file_name)
    }

    /// Load and parse a layout document
    pub fn load(&self, document: LayoutDocument) -> SkillResult<Value> {
        let path = self.path_of(document);
        debug!(path = %path.display(), "loading layout document");

        let text = std::fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => SkillError::AssetNotFound { path: path.clone() },
            _ => SkillError::AssetIo {
                path: path.clone(),
                message: e.to_string(),
            },
        })?;

        serde_json::from_str(&text).map_err(|e| SkillError::AssetMalformed {
            path,
            message: e.to_string(),
        })
    }
}
