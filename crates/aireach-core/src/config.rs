//! Chat configuration.
//!
//! Loaded from built-in defaults, then an optional TOML file (`$AIREACH_CONFIG`, default
//! `config/aireach.toml`), then `AIREACH__*` environment variables.
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | catalog_path | unset | JSON or TOML response catalog; unset uses the embedded one |
//! | greeting | "Sawadee! I am your AI buddy (type 'bye' to exit)" | First bot line |
//! | exit_command | "bye" | Input that ends the session after its reply |
//! | thinking_delay_ms | 500 | Pause before each bot reply |
//! | strict_catalog | false | Refuse to start if the catalog fails validation |

use crate::catalog::{CategorizedResponses, Collision};
use crate::error::Result;
use crate::normalize::normalize;
use crate::resolver::ReplyResolver;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_GREETING: &str = "Sawadee! I am your AI buddy (type 'bye' to exit)";
pub const DEFAULT_EXIT_COMMAND: &str = "bye";
pub const DEFAULT_THINKING_DELAY_MS: u64 = 500;
pub const DEFAULT_CONFIG_PATH: &str = "config/aireach.toml";

fn default_greeting() -> String {
    DEFAULT_GREETING.to_string()
}

fn default_exit_command() -> String {
    DEFAULT_EXIT_COMMAND.to_string()
}

fn default_thinking_delay_ms() -> u64 {
    DEFAULT_THINKING_DELAY_MS
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Response catalog file. `None` uses the catalog compiled into the crate.
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
    #[serde(default = "default_greeting")]
    pub greeting: String,
    #[serde(default = "default_exit_command")]
    pub exit_command: String,
    #[serde(default = "default_thinking_delay_ms")]
    pub thinking_delay_ms: u64,
    #[serde(default)]
    pub strict_catalog: bool,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            greeting: default_greeting(),
            exit_command: default_exit_command(),
            thinking_delay_ms: DEFAULT_THINKING_DELAY_MS,
            strict_catalog: false,
        }
    }
}

impl ChatConfig {
    /// Load config from file and environment. Precedence: `AIREACH__*` env > file at
    /// `$AIREACH_CONFIG` (or `config/aireach.toml`) > defaults.
    pub fn load() -> Result<Self> {
        let config_path = std::env::var("AIREACH_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(Path::new(&config_path))
    }

    /// Like [`ChatConfig::load`] with an explicit file path. A missing file is not an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        let builder = config::Config::builder()
            .set_default("greeting", DEFAULT_GREETING)?
            .set_default("exit_command", DEFAULT_EXIT_COMMAND)?
            .set_default("thinking_delay_ms", DEFAULT_THINKING_DELAY_MS as i64)?
            .set_default("strict_catalog", false)?;

        let builder = builder.add_source(config::File::from(path).required(false));

        let built = builder
            .add_source(config::Environment::with_prefix("AIREACH").separator("__"))
            .build()?;

        Ok(built.try_deserialize()?)
    }

    pub fn thinking_delay(&self) -> Duration {
        Duration::from_millis(self.thinking_delay_ms)
    }

    /// True when `input` is the configured exit command (compared after normalization).
    pub fn is_exit(&self, input: &str) -> bool {
        let exit = normalize(&self.exit_command);
        !exit.is_empty() && normalize(input) == exit
    }

    /// Categorized catalog named by `catalog_path`, or the embedded one.
    pub fn load_categories(&self) -> Result<CategorizedResponses> {
        match &self.catalog_path {
            Some(path) => CategorizedResponses::from_path(path),
            None => CategorizedResponses::embedded(),
        }
    }

    /// Build the resolver this configuration describes. Collisions are logged; with
    /// `strict_catalog` set, validation problems are returned as errors.
    pub fn build_resolver(&self) -> Result<ReplyResolver> {
        let categorized = self.load_categories()?;
        for Collision { key, categories } in categorized.collisions() {
            tracing::warn!(trigger = %key, categories = ?categories, "trigger defined in several categories; last one wins");
        }
        let catalog = crate::catalog::load_catalog(&categorized);
        tracing::info!(
            categories = categorized.categories().len(),
            triggers = catalog.len(),
            source = %self.catalog_path.as_deref().map(|p| p.display().to_string()).unwrap_or_else(|| "embedded".to_string()),
            "response catalog loaded"
        );
        if self.strict_catalog {
            catalog.validate()?;
        }
        Ok(ReplyResolver::new(catalog))
    }
}
