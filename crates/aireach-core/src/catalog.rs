//! Response catalog: categorized trigger → reply tables, flattened into one lookup.
//!
//! The configuration resource is a table of categories (`greetings`, `capabilities`, ...),
//! each a table of trigger phrase → reply text. Category and trigger order follow the
//! source document; that order is the tie-break for equal-length triggers.

use crate::error::{AireachError, Result, ValidationError};
use crate::normalize::{decompose, normalize};
use std::collections::HashMap;
use std::path::Path;

/// Built-in catalog shipped with the crate.
const EMBEDDED_RESPONSES: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/responses.json"));

/// One named category of trigger → reply pairs, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub triggers: Vec<(String, String)>,
}

/// A trigger key defined by more than one category. The last category listed wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collision {
    pub key: String,
    pub categories: Vec<String>,
}

/// Categorized form of the response catalog, as authored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorizedResponses {
    categories: Vec<Category>,
}

impl CategorizedResponses {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a category. Builder form, mostly for tests and programmatic catalogs.
    pub fn with_category<I, K, V>(mut self, name: impl Into<String>, triggers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.push_category(name, triggers);
        self
    }

    pub fn push_category<I, K, V>(&mut self, name: impl Into<String>, triggers: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.categories.push(Category {
            name: name.into(),
            triggers: triggers.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        });
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// The catalog compiled into the crate (`data/responses.json`).
    pub fn embedded() -> Result<Self> {
        Self::from_json_str(EMBEDDED_RESPONSES)
    }

    /// Parse a JSON catalog: `{ "category": { "trigger": "reply", ... }, ... }`.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let root: serde_json::Value = serde_json::from_str(s)?;
        let serde_json::Value::Object(root) = root else {
            return Err(AireachError::InvalidRoot);
        };
        let mut out = Self::new();
        for (category, body) in root {
            let serde_json::Value::Object(body) = body else {
                return Err(AireachError::InvalidCategory { category });
            };
            let mut triggers = Vec::with_capacity(body.len());
            for (key, reply) in body {
                match reply {
                    serde_json::Value::String(reply) => triggers.push((key, reply)),
                    _ => return Err(AireachError::InvalidReply { category, key }),
                }
            }
            out.categories.push(Category { name: category, triggers });
        }
        Ok(out)
    }

    /// Parse a TOML catalog: one `[category]` table per category, `"trigger" = "reply"` entries.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let root: toml::Table = toml::from_str(s)?;
        let mut out = Self::new();
        for (category, body) in root {
            let toml::Value::Table(body) = body else {
                return Err(AireachError::InvalidCategory { category });
            };
            let mut triggers = Vec::with_capacity(body.len());
            for (key, reply) in body {
                match reply {
                    toml::Value::String(reply) => triggers.push((key, reply)),
                    _ => return Err(AireachError::InvalidReply { category, key }),
                }
            }
            out.categories.push(Category { name: category, triggers });
        }
        Ok(out)
    }

    /// Load a catalog file; format is chosen by extension (`.json` or `.toml`).
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        let parsed = match ext.as_deref() {
            Some("json") => Self::from_json_str(&std::fs::read_to_string(path)?)?,
            Some("toml") => Self::from_toml_str(&std::fs::read_to_string(path)?)?,
            _ => return Err(AireachError::UnsupportedFormat(path.to_path_buf())),
        };
        tracing::debug!(
            path = %path.display(),
            categories = parsed.categories.len(),
            "loaded response catalog"
        );
        Ok(parsed)
    }

    /// Trigger keys that appear in more than one category, in first-seen order.
    pub fn collisions(&self) -> Vec<Collision> {
        let mut first_category: HashMap<&str, &str> = HashMap::new();
        let mut reported: HashMap<&str, usize> = HashMap::new();
        let mut out: Vec<Collision> = Vec::new();
        for category in &self.categories {
            for (key, _) in &category.triggers {
                let Some(first) = first_category.get(key.as_str()).copied() else {
                    first_category.insert(key.as_str(), category.name.as_str());
                    continue;
                };
                if let Some(&i) = reported.get(key.as_str()) {
                    out[i].categories.push(category.name.clone());
                } else {
                    reported.insert(key.as_str(), out.len());
                    out.push(Collision {
                        key: key.clone(),
                        categories: vec![first.to_string(), category.name.clone()],
                    });
                }
            }
        }
        out
    }
}

/// Flattened trigger → reply lookup. Iteration follows first-insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Insert or overwrite. An overwritten key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, reply: impl Into<String>) {
        let key = key.into();
        let reply = reply.into();
        match self.index.get(&key) {
            Some(&i) => self.entries[i].1 = reply,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, reply));
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.index.get(key).map(|&i| self.entries[i].1.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Optional startup check. Rejects empty triggers and triggers that are not in
    /// normalized form (those can never match normalized input).
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        let problems = self.problems();
        for p in &problems {
            tracing::warn!(problem = %p, "response catalog validation");
        }
        match problems.into_iter().next() {
            Some(first) => Err(first),
            None => Ok(()),
        }
    }

    /// Every validation problem, in catalog order.
    pub fn problems(&self) -> Vec<ValidationError> {
        self.keys()
            .filter_map(|key| {
                if key.is_empty() {
                    return Some(ValidationError::EmptyTrigger);
                }
                let normalized = normalize(key);
                if normalized != decompose(key) {
                    return Some(ValidationError::UnnormalizedTrigger {
                        key: key.to_string(),
                        normalized,
                    });
                }
                None
            })
            .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Catalog {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut catalog = Catalog::default();
        for (k, v) in iter {
            catalog.insert(k, v);
        }
        catalog
    }
}

/// Flatten categories into one lookup. Later categories overwrite earlier replies for
/// the same trigger. Pure; never fails.
pub fn load_catalog(categorized: &CategorizedResponses) -> Catalog {
    categorized
        .categories
        .iter()
        .flat_map(|c| c.triggers.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CategorizedResponses {
        CategorizedResponses::new()
            .with_category("greetings", [("hello", "Hi there!"), ("hi", "Hello!")])
            .with_category("capabilities", [("help", "I can chat."), ("hello", "Capabilities hello")])
    }

    #[test]
    fn flatten_merges_categories_in_order() {
        let catalog = load_catalog(&sample());
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.get("help"), Some("I can chat."));
        assert_eq!(catalog.get("missing"), None);
    }

    #[test]
    fn later_category_overwrites_but_keeps_position() {
        let catalog = load_catalog(&sample());
        assert_eq!(catalog.get("hello"), Some("Capabilities hello"));
        let keys: Vec<&str> = catalog.keys().collect();
        assert_eq!(keys, vec!["hello", "hi", "help"]);
    }

    #[test]
    fn collisions_report_every_category() {
        let categorized = sample().with_category("extra", [("hello", "third")]);
        let collisions = categorized.collisions();
        assert_eq!(collisions.len(), 1);
        assert_eq!(collisions[0].key, "hello");
        assert_eq!(collisions[0].categories, vec!["greetings", "capabilities", "extra"]);
    }

    #[test]
    fn json_preserves_document_order() {
        let parsed = CategorizedResponses::from_json_str(
            r#"{ "zeta": { "b": "1", "a": "2" }, "alpha": { "c": "3" } }"#,
        )
        .unwrap();
        let names: Vec<&str> = parsed.categories().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
        assert_eq!(parsed.categories()[0].triggers[0], ("b".to_string(), "1".to_string()));
    }

    #[test]
    fn json_rejects_non_string_reply() {
        let err = CategorizedResponses::from_json_str(r#"{ "greetings": { "hi": 42 } }"#).unwrap_err();
        assert!(matches!(err, AireachError::InvalidReply { ref key, .. } if key == "hi"));
    }

    #[test]
    fn json_rejects_non_table_category_and_root() {
        let err = CategorizedResponses::from_json_str(r#"{ "greetings": "hi" }"#).unwrap_err();
        assert!(matches!(err, AireachError::InvalidCategory { .. }));
        let err = CategorizedResponses::from_json_str(r#"["hi"]"#).unwrap_err();
        assert!(matches!(err, AireachError::InvalidRoot));
    }

    #[test]
    fn toml_catalog_parses() {
        let parsed = CategorizedResponses::from_toml_str(
            "[greetings]\nhello = \"Hi!\"\n\"good morning\" = \"Morning!\"\n",
        )
        .unwrap();
        let catalog = load_catalog(&parsed);
        assert_eq!(catalog.get("good morning"), Some("Morning!"));
        let keys: Vec<&str> = catalog.keys().collect();
        assert_eq!(keys, vec!["hello", "good morning"]);
    }

    #[test]
    fn embedded_catalog_is_valid() {
        let embedded = CategorizedResponses::embedded().unwrap();
        let catalog = load_catalog(&embedded);
        assert!(!catalog.is_empty());
        assert_eq!(catalog.validate(), Ok(()));
        assert!(embedded.collisions().is_empty());
    }

    #[test]
    fn validation_flags_empty_and_unnormalized_triggers() {
        let catalog: Catalog = [("", "x"), ("What's up", "y"), ("caf\u{e9}", "z")].into_iter().collect();
        let problems = catalog.problems();
        assert_eq!(problems.len(), 2);
        assert_eq!(problems[0], ValidationError::EmptyTrigger);
        assert_eq!(
            problems[1],
            ValidationError::UnnormalizedTrigger {
                key: "What's up".to_string(),
                normalized: "whats up".to_string(),
            }
        );
        assert_eq!(catalog.validate(), Err(ValidationError::EmptyTrigger));
    }
}
