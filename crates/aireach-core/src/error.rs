//! Error types for catalog loading and configuration.
//!
//! Reply resolution itself never fails; these only surface when a catalog file or
//! the chat configuration is read from disk.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for catalog and configuration operations
pub type Result<T> = std::result::Result<T, AireachError>;

#[derive(Error, Debug)]
pub enum AireachError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON catalog error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML catalog error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Unsupported catalog format: {} (expected .json or .toml)", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("Catalog root must be a table of categories")]
    InvalidRoot,

    #[error("Category '{category}' must be a table of trigger -> reply")]
    InvalidCategory { category: String },

    #[error("Reply for '{key}' in category '{category}' is not a string")]
    InvalidReply { category: String, key: String },

    #[error("Catalog validation failed: {0}")]
    Validation(#[from] ValidationError),
}

/// Problems found by [`crate::Catalog::validate`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("empty trigger key")]
    EmptyTrigger,

    #[error("trigger '{key}' is not normalized (would only match as '{normalized}')")]
    UnnormalizedTrigger { key: String, normalized: String },
}
