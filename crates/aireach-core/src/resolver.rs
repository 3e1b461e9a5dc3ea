//! ReplyResolver: pick the most specific trigger that matches normalized input.
//!
//! Triggers are tried longest first (by character count), so "ai reach" wins over "ai".
//! Equal-length triggers keep catalog insertion order. A multi-word trigger matches as a
//! plain substring; a single-word trigger must sit on word boundaries, so "hi" never
//! fires inside "this".

use crate::catalog::{load_catalog, Catalog, CategorizedResponses};
use crate::normalize::{decompose, normalize};
use once_cell::sync::Lazy;
use regex::Regex;

/// Returned when input is absent, not text, or matches no trigger.
pub const DEFAULT_REPLY: &str =
    "Sorry, I don't understand. Can you try again? Try asking about AI, greetings, or my capabilities!";

/// Process-wide resolver over the embedded catalog. Built on first use, read-only after.
static DEFAULT_RESOLVER: Lazy<ReplyResolver> = Lazy::new(|| match CategorizedResponses::embedded() {
    Ok(categorized) => ReplyResolver::from_categories(&categorized),
    Err(e) => {
        tracing::error!(error = %e, "embedded response catalog failed to parse; replying with default only");
        ReplyResolver::new(Catalog::default())
    }
});

/// Reply for `input` using the embedded catalog.
pub fn get_reply(input: Option<&str>) -> &'static str {
    DEFAULT_RESOLVER.reply(input)
}

/// The process-wide resolver behind [`get_reply`].
pub fn default_resolver() -> &'static ReplyResolver {
    &DEFAULT_RESOLVER
}

/// True when `key` occurs in already-normalized `normalized_input`.
///
/// Phrases (containing a space) match as substrings anywhere; single words must be
/// bounded by non-word characters or the ends of the input.
pub fn matches(key: &str, normalized_input: &str) -> bool {
    match Matcher::compile(&decompose(key)) {
        Some(m) => m.is_match(normalized_input),
        None => false,
    }
}

#[derive(Debug)]
enum Matcher {
    Phrase(String),
    Word(Regex),
}

impl Matcher {
    fn compile(key: &str) -> Option<Self> {
        if key.is_empty() {
            return None;
        }
        if key.contains(' ') {
            return Some(Matcher::Phrase(key.to_string()));
        }
        let pattern = format!(r"\b{}\b", regex::escape(key));
        match Regex::new(&pattern) {
            Ok(re) => Some(Matcher::Word(re)),
            Err(e) => {
                tracing::warn!(key, error = %e, "trigger pattern rejected");
                None
            }
        }
    }

    fn is_match(&self, normalized_input: &str) -> bool {
        match self {
            Matcher::Phrase(phrase) => normalized_input.contains(phrase.as_str()),
            Matcher::Word(re) => re.is_match(normalized_input),
        }
    }
}

#[derive(Debug)]
struct Trigger {
    key: String,
    reply: String,
    matcher: Matcher,
}

/// Which trigger answered, and with what.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution<'a> {
    pub key: &'a str,
    pub reply: &'a str,
}

/// Matches input against a flattened catalog. Immutable once built; share freely.
#[derive(Debug)]
pub struct ReplyResolver {
    triggers: Vec<Trigger>,
}

impl ReplyResolver {
    /// Compile and order every trigger once. Empty triggers are skipped.
    pub fn new(catalog: Catalog) -> Self {
        let mut triggers: Vec<Trigger> = catalog
            .iter()
            .filter_map(|(key, reply)| {
                let matcher = Matcher::compile(&decompose(key));
                if matcher.is_none() {
                    tracing::warn!(key, "skipping trigger that can never match");
                }
                matcher.map(|matcher| Trigger {
                    key: key.to_string(),
                    reply: reply.to_string(),
                    matcher,
                })
            })
            .collect();
        // Stable: equal lengths keep insertion order.
        triggers.sort_by_key(|t| std::cmp::Reverse(t.key.chars().count()));
        tracing::debug!(triggers = triggers.len(), "reply resolver ready");
        Self { triggers }
    }

    pub fn from_categories(categorized: &CategorizedResponses) -> Self {
        Self::new(load_catalog(categorized))
    }

    /// Number of usable triggers.
    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }

    /// Trigger keys in the order they are tried.
    pub fn trigger_order(&self) -> impl Iterator<Item = &str> {
        self.triggers.iter().map(|t| t.key.as_str())
    }

    /// Best-matching trigger for raw `input`, if any.
    pub fn resolve(&self, input: &str) -> Option<Resolution<'_>> {
        let normalized = normalize(input);
        if normalized.is_empty() {
            return None;
        }
        let hit = self.triggers.iter().find(|t| t.matcher.is_match(&normalized))?;
        tracing::trace!(input = %normalized, trigger = %hit.key, "trigger matched");
        Some(Resolution {
            key: &hit.key,
            reply: &hit.reply,
        })
    }

    /// Reply for `input`; [`DEFAULT_REPLY`] when absent or unmatched. Never fails.
    pub fn reply(&self, input: Option<&str>) -> &str {
        input
            .and_then(|text| self.resolve(text))
            .map(|r| r.reply)
            .unwrap_or(DEFAULT_REPLY)
    }

    /// Reply for untyped input (e.g. a decoded JSON field). Anything but a string gets
    /// [`DEFAULT_REPLY`].
    pub fn reply_to_value(&self, value: &serde_json::Value) -> &str {
        match value {
            serde_json::Value::String(text) => self.reply(Some(text.as_str())),
            _ => DEFAULT_REPLY,
        }
    }
}
