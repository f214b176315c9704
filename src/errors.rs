//! Skill error types

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used across the skill
pub type SkillResult<T> = Result<T, SkillError>;

/// Errors raised while decoding, routing or answering a request
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SkillError {
    /// No registered request handler accepted the request
    #[error("no request handler found for request type {request_type}")]
    NoHandlerFound { request_type: String },

    /// An IntentRequest arrived without an intent
    #[error("intent request carries no intent")]
    MissingIntent,

    /// Layout document does not exist
    #[error("layout document not found: {}", path.display())]
    AssetNotFound { path: PathBuf },

    /// Layout document exists but could not be read
    #[error("failed to read layout document {}: {message}", path.display())]
    AssetIo { path: PathBuf, message: String },

    /// Layout document is not valid JSON
    #[error("malformed layout document {}: {message}", path.display())]
    AssetMalformed { path: PathBuf, message: String },

    /// Inbound payload does not match the request envelope contract
    #[error("invalid request envelope: {0}")]
    InvalidEnvelope(String),

    /// Outbound response could not be encoded
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Configuration file unreadable or not valid TOML
    #[error("configuration error: {0}")]
    Config(String),

    /// Generic failure raised by a handler action
    #[error("handler failed: {0}")]
    Handler(String),
}

impl From<serde_json::Error> for SkillError {
    fn from(e: serde_json::Error) -> Self {
        SkillError::Serialization(e.to_string())
    }
}

impl From<toml::de::Error> for SkillError {
    fn from(e: toml::de::Error) -> Self {
        SkillError::Config(e.to_string())
    }
}

impl SkillError {
    /// Whether the exception handler chain may answer this error.
    ///
    /// Envelope and serialization failures happen outside dispatch and go
    /// straight back to the hosting runtime. `MissingIntent` is raised inside
    /// dispatch by handlers that need the intent name.
    pub fn is_recoverable(&self) -> bool {
        match self {
            SkillError::NoHandlerFound { .. } => true,
            SkillError::MissingIntent => true,
            SkillError::AssetNotFound { .. } => true,
            SkillError::AssetIo { .. } => true,
            SkillError::AssetMalformed { .. } => true,
            SkillError::Handler(_) => true,
            SkillError::InvalidEnvelope(_) => false,
            SkillError::Serialization(_) => false,
            SkillError::Config(_) => false,
        }
    }
}
