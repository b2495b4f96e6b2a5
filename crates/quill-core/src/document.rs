//! Scene payloads as returned by the design tool's file API.

use crate::errors::{Result, SceneError};
use crate::scene::SceneNode;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Entry of the named-component index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentMeta {
    pub key: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A whole scene graph plus its component index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub document: SceneNode,
    /// Node id -> component metadata.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub components: IndexMap<String, ComponentMeta>,
}

impl SceneDocument {
    /// Wrap a root node without a component index.
    pub fn new(document: SceneNode) -> Self {
        Self {
            name: None,
            document,
            components: IndexMap::new(),
        }
    }

    /// Parse a JSON payload.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Register a component index entry for `node_id`.
    pub fn with_component(mut self, node_id: impl Into<String>, meta: ComponentMeta) -> Self {
        self.components.insert(node_id.into(), meta);
        self
    }

    /// Find a node by id anywhere in the tree.
    pub fn find_node(&self, id: &str) -> Result<&SceneNode> {
        self.document
            .find(id)
            .ok_or_else(|| SceneError::NodeNotFound { id: id.to_string() })
    }

    /// Resolve a generation target: a node id first, then a component
    /// index entry whose name or key matches.
    pub fn resolve_target(&self, target: &str) -> Result<&SceneNode> {
        if let Some(node) = self.document.find(target) {
            return Ok(node);
        }

        let by_component = self
            .components
            .iter()
            .find(|(_, meta)| meta.name == target || meta.key == target)
            .map(|(id, _)| id.as_str());

        match by_component {
            Some(id) => self.find_node(id),
            None => Err(SceneError::NodeNotFound { id: target.to_string() }),
        }
    }

    /// Total number of nodes in the document.
    pub fn node_count(&self) -> usize {
        self.document.walk().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::NodeKind;

    const PAYLOAD: &str = r#"{
        "name": "Marketing Site",
        "document": {
            "id": "0:0",
            "name": "Document",
            "type": "DOCUMENT",
            "children": [
                {"id": "1:1", "name": "Page", "type": "CANVAS", "children": [
                    {"id": "2:1", "name": "Hero Card", "type": "COMPONENT"}
                ]}
            ]
        },
        "components": {
            "2:1": {"key": "abc123", "name": "Hero Card"}
        }
    }"#;

    #[test]
    fn test_from_json() {
        let doc = SceneDocument::from_json(PAYLOAD).unwrap();
        assert_eq!(doc.name.as_deref(), Some("Marketing Site"));
        assert_eq!(doc.node_count(), 3);
        assert_eq!(doc.find_node("2:1").unwrap().kind, NodeKind::Component);
    }

    #[test]
    fn test_resolve_target_by_component_name_and_key() {
        let doc = SceneDocument::from_json(PAYLOAD).unwrap();
        assert_eq!(doc.resolve_target("Hero Card").unwrap().id, "2:1");
        assert_eq!(doc.resolve_target("abc123").unwrap().id, "2:1");
        assert_eq!(doc.resolve_target("1:1").unwrap().name, "Page");
    }

    #[test]
    fn test_missing_node() {
        let doc = SceneDocument::from_json(PAYLOAD).unwrap();
        let err = doc.resolve_target("9:9").unwrap_err();
        assert!(matches!(err, SceneError::NodeNotFound { ref id } if id == "9:9"));
    }

    #[test]
    fn test_malformed_payload() {
        assert!(matches!(
            SceneDocument::from_json("{\"document\": 3}"),
            Err(SceneError::InvalidPayload(_))
        ));
    }
}
