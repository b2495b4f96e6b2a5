//! Component classification.
//!
//! Name keywords decide the category first; the node's structure is only
//! consulted when no keyword matches. The classification tree mirrors the
//! scene tree node for node.

use super::category::{ComponentCategory, Complexity};
use crate::config::{default_interactive_keywords, KeywordSet};
use quill_core::{NodeKind, SceneNode};
use serde::Serialize;

/// Keyword tables and thresholds used by the [`Classifier`].
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// Category keyword lists, checked in order. First match wins.
    pub category_keywords: Vec<(ComponentCategory, KeywordSet)>,
    pub interactive_keywords: KeywordSet,
    /// More children than this makes an unnamed node a layout.
    pub layout_child_threshold: usize,
    /// Highest complexity score still considered simple.
    pub simple_max: u32,
    /// Highest complexity score still considered medium.
    pub medium_max: u32,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            category_keywords: vec![
                (ComponentCategory::Button, KeywordSet::new(["button", "btn"])),
                (ComponentCategory::Card, KeywordSet::new(["card", "panel"])),
                (ComponentCategory::Input, KeywordSet::new(["input", "field", "form"])),
                (ComponentCategory::Image, KeywordSet::new(["image", "img", "photo", "avatar"])),
                (ComponentCategory::Icon, KeywordSet::new(["icon"])),
            ],
            interactive_keywords: default_interactive_keywords(),
            layout_child_threshold: 3,
            simple_max: 3,
            medium_max: 8,
        }
    }
}

impl ClassifierConfig {
    /// Category implied by a node name, if any keyword matches.
    pub fn category_for_name(&self, name: &str) -> Option<ComponentCategory> {
        self.category_keywords
            .iter()
            .find(|(_, keywords)| keywords.matches(name))
            .map(|(category, _)| *category)
    }
}

/// Classification of one node and, recursively, its children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentClassification {
    pub category: ComponentCategory,
    pub complexity: Complexity,
    /// This node or any descendant has an interactive name.
    pub has_interactivity: bool,
    /// The node's own name is interactive.
    pub interactive_name: bool,
    pub has_variants: bool,
    pub children: Vec<ComponentClassification>,
}

impl ComponentClassification {
    /// Number of classified nodes in this tree.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Self::node_count).sum::<usize>()
    }

    /// Whether this tree has the same shape as `node`'s subtree.
    pub fn mirrors(&self, node: &SceneNode) -> bool {
        self.children.len() == node.children.len()
            && self
                .children
                .iter()
                .zip(&node.children)
                .all(|(c, n)| c.mirrors(n))
    }
}

/// Maps scene nodes to semantic categories.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    config: ClassifierConfig,
}

impl Classifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Classify a node and every descendant.
    pub fn classify(&self, node: &SceneNode) -> ComponentClassification {
        let children: Vec<ComponentClassification> =
            node.children.iter().map(|child| self.classify(child)).collect();

        let category = self
            .config
            .category_for_name(&node.name)
            .unwrap_or_else(|| self.structural_category(node));

        let interactive_name = self.config.interactive_keywords.matches(&node.name);
        let has_interactivity = interactive_name || children.iter().any(|c| c.has_interactivity);

        ComponentClassification {
            category,
            complexity: self.complexity(node),
            has_interactivity,
            interactive_name,
            has_variants: node.kind.has_variants(),
            children,
        }
    }

    /// Fallback category from node structure.
    fn structural_category(&self, node: &SceneNode) -> ComponentCategory {
        if node.kind == NodeKind::Text {
            ComponentCategory::Text
        } else if node.children.len() > self.config.layout_child_threshold {
            ComponentCategory::Layout
        } else {
            ComponentCategory::Complex
        }
    }

    /// Weighted score: one per child, two for any effects, one for layered
    /// fills.
    pub fn complexity_score(node: &SceneNode) -> u32 {
        let mut score = node.children.len() as u32;
        if !node.effects.is_empty() {
            score += 2;
        }
        if node.fills.len() > 1 {
            score += 1;
        }
        score
    }

    fn complexity(&self, node: &SceneNode) -> Complexity {
        Complexity::from_score(
            Self::complexity_score(node),
            self.config.simple_max,
            self.config.medium_max,
        )
    }
}
