//! Memoization of generated components by content fingerprint.
//!
//! Keys are derived from the node's serialized content, the canonical JSON
//! of the options and custom fragments, and the engine version. Timestamps
//! never take part, so identical requests always map to the same key.

use crate::error::Result;
use crate::model::GeneratedComponent;
use crate::options::{CustomCode, GenerationOptions};
use quill_core::SceneNode;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

/// Inputs that determine a generated component.
#[derive(Debug, Clone, Copy)]
pub struct CacheKeyParts<'a> {
    pub node: &'a SceneNode,
    pub options: &'a GenerationOptions,
    pub custom: &'a CustomCode,
    pub version: &'a str,
}

fn digest(bytes: &[u8]) -> u64 {
    let mut hasher = DefaultHasher::new();
    bytes.hash(&mut hasher);
    hasher.finish()
}

/// In-process, unbounded result cache.
///
/// Reads run concurrently; a store replaces the whole entry. Two callers
/// that miss on the same key may both compute and store, the last store
/// wins.
#[derive(Debug, Default)]
pub struct ResultCache {
    entries: RwLock<HashMap<String, Arc<GeneratedComponent>>>,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl ResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deterministic key for a request under `scope`.
    pub fn generate_key(scope: &str, parts: CacheKeyParts<'_>) -> Result<String> {
        let node = serde_json::to_vec(parts.node)?;
        let options = serde_json::to_string(parts.options)?;
        let custom = serde_json::to_vec(parts.custom)?;
        Ok(format!(
            "{}:{}:{}:{:016x}:{}:{:016x}",
            scope,
            parts.version,
            parts.node.id,
            digest(&node),
            options,
            digest(&custom)
        ))
    }

    pub fn get(&self, key: &str) -> Option<Arc<GeneratedComponent>> {
        let found = self
            .entries
            .read()
            .ok()
            .and_then(|entries| entries.get(key).cloned());
        match found {
            Some(component) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                log::debug!("cache hit: {}", component.id);
                Some(component)
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    pub fn set(&self, key: String, component: Arc<GeneratedComponent>) {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(key, component);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> usize {
        self.misses.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{ComponentCategory, Complexity};
    use crate::model::ComponentMetadata;
    use crate::options::{MarkupDialect, StyleDialect};
    use quill_core::NodeKind;
    use std::time::Duration;

    fn key(node: &SceneNode, options: &GenerationOptions) -> String {
        ResultCache::generate_key(
            "component",
            CacheKeyParts {
                node,
                options,
                custom: &CustomCode::default(),
                version: "0.1.0",
            },
        )
        .unwrap()
    }

    fn component(id: &str) -> Arc<GeneratedComponent> {
        Arc::new(GeneratedComponent {
            id: id.to_string(),
            sanitized_name: "Box".to_string(),
            markup: String::new(),
            stylesheet: String::new(),
            type_declarations: None,
            accessibility: None,
            responsive: None,
            metadata: ComponentMetadata {
                source_node_id: id.to_string(),
                category: ComponentCategory::Complex,
                complexity: Complexity::Simple,
                estimated_accuracy: 0.95,
                generation_time: Duration::from_millis(1),
                dependencies: Vec::new(),
                suggested_props: Vec::new(),
                warnings: Vec::new(),
                markup_dialect: MarkupDialect::Static,
                style_dialect: StyleDialect::Plain,
                engine_version: "0.1.0".to_string(),
            },
        })
    }

    #[test]
    fn test_key_is_deterministic() {
        let node = SceneNode::new("1", "Box", NodeKind::Frame);
        let options = GenerationOptions::new(MarkupDialect::Componentized, StyleDialect::Utility);
        assert_eq!(key(&node, &options), key(&node, &options));
        assert!(key(&node, &options).starts_with("component:0.1.0:1:"));
    }

    #[test]
    fn test_key_changes_with_inputs() {
        let node = SceneNode::new("1", "Box", NodeKind::Frame);
        let options = GenerationOptions::new(MarkupDialect::Componentized, StyleDialect::Utility);
        let base = key(&node, &options);

        assert_ne!(base, key(&node, &options.clone().with_typescript(false)));
        assert_ne!(base, key(&node.clone().with_corner_radius(4.0), &options));

        let custom = CustomCode {
            styles: Some(".a {}".to_string()),
            ..CustomCode::default()
        };
        let with_custom = ResultCache::generate_key(
            "component",
            CacheKeyParts {
                node: &node,
                options: &options,
                custom: &custom,
                version: "0.1.0",
            },
        )
        .unwrap();
        assert_ne!(base, with_custom);
    }

    #[test]
    fn test_get_set_and_counters() {
        let cache = ResultCache::new();
        assert!(cache.get("k").is_none());
        cache.set("k".to_string(), component("1"));
        let hit = cache.get("k").unwrap();
        assert_eq!(hit.id, "1");
        assert_eq!(cache.hits(), 1);
        assert_eq!(cache.misses(), 1);
        assert_eq!(cache.len(), 1);

        cache.set("k".to_string(), component("2"));
        assert_eq!(cache.get("k").unwrap().id, "2");
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
    }
}
