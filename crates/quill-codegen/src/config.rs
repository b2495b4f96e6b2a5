//! Engine configuration.
//!
//! Every table the pipeline consults (keyword lists, scale tables, severity
//! penalties, breakpoint policy) is carried here and handed to the component
//! that needs it, so the engine holds no ambient state and tests can swap in
//! their own tables.

use crate::analyzer::ClassifierConfig;
use crate::audit::AuditConfig;
use crate::element::TagTable;
use crate::generators::UtilityScale;
use crate::responsive::ResponsivePolicy;
use serde::{Deserialize, Serialize};

/// Engine version baked into cache keys and metadata.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Case-insensitive substring keyword list. Order is significant: the first
/// matching keyword wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeywordSet(Vec<String>);

impl KeywordSet {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(keywords.into_iter().map(|k| k.into().to_lowercase()).collect())
    }

    /// First keyword contained in `name`.
    pub fn first_match(&self, name: &str) -> Option<&str> {
        let lower = name.to_lowercase();
        self.0
            .iter()
            .find(|k| lower.contains(k.as_str()))
            .map(String::as_str)
    }

    pub fn matches(&self, name: &str) -> bool {
        self.first_match(name).is_some()
    }

    /// Whether any keyword equals a whole alphanumeric word of `name`.
    pub fn matches_word(&self, name: &str) -> bool {
        let lower = name.to_lowercase();
        lower
            .split(|c: char| !c.is_ascii_alphanumeric())
            .any(|word| self.0.iter().any(|k| k == word))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// Keywords marking an element as something the user interacts with.
pub fn default_interactive_keywords() -> KeywordSet {
    KeywordSet::new([
        "button", "btn", "link", "click", "toggle", "checkbox", "switch", "submit", "tab",
        "dropdown",
    ])
}

/// Aggregate configuration for a [`CodegenEngine`](crate::CodegenEngine).
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Version string mixed into cache keys.
    pub version: String,
    pub classifier: ClassifierConfig,
    pub tags: TagTable,
    pub utility: UtilityScale,
    pub audit: AuditConfig,
    pub responsive: ResponsivePolicy,
}

impl EngineConfig {
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            version: ENGINE_VERSION.to_string(),
            classifier: ClassifierConfig::default(),
            tags: TagTable::default(),
            utility: UtilityScale::default(),
            audit: AuditConfig::default(),
            responsive: ResponsivePolicy::default(),
        }
    }
}
