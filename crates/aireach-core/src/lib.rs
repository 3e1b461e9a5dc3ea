//! AIREACH: rule-based reply engine.
//! Categorized response catalog, input normalization, and longest-match trigger resolution.

pub mod catalog;
pub mod config;
pub mod error;
pub mod normalize;
pub mod resolver;

pub use crate::catalog::{load_catalog, Catalog, CategorizedResponses, Category, Collision};
pub use crate::config::ChatConfig;
pub use crate::error::{AireachError, Result, ValidationError};
pub use crate::normalize::normalize;
pub use crate::resolver::{default_resolver, get_reply, matches, ReplyResolver, Resolution, DEFAULT_REPLY};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
