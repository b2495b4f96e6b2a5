//! Per-node accessibility rules.

use super::{AccessibilityIssue, AuditConfig, Severity};
use quill_core::{Paint, SceneNode};
use std::fmt::Debug;

/// A check applied to every node of the audited subtree.
pub trait AccessibilityRule: Debug + Send + Sync {
    /// Stable rule identifier reported with each issue.
    fn id(&self) -> &'static str;

    fn evaluate(&self, node: &SceneNode, config: &AuditConfig) -> Vec<AccessibilityIssue>;
}

fn element_label(node: &SceneNode) -> String {
    if node.name.trim().is_empty() {
        node.id.clone()
    } else {
        node.name.clone()
    }
}

fn first_solid(paints: &[Paint]) -> Option<quill_core::Color> {
    paints
        .iter()
        .filter(|p| p.is_visible())
        .find_map(Paint::effective_color)
}

/// WCAG contrast between the first solid fill and the first solid stroke.
#[derive(Debug, Default)]
pub struct ContrastRule;

impl AccessibilityRule for ContrastRule {
    fn id(&self) -> &'static str {
        "color-contrast"
    }

    fn evaluate(&self, node: &SceneNode, config: &AuditConfig) -> Vec<AccessibilityIssue> {
        if node.fills.is_empty() || node.strokes.is_empty() {
            return Vec::new();
        }
        let (Some(fill), Some(stroke)) = (first_solid(&node.fills), first_solid(&node.strokes)) else {
            return Vec::new();
        };

        let ratio = fill.contrast_ratio(&stroke);
        if ratio >= config.min_contrast {
            return Vec::new();
        }
        vec![AccessibilityIssue::new(
            Severity::High,
            format!("Insufficient color contrast ({:.2}:1) between fill and stroke", ratio),
            element_label(node),
            format!("Increase the contrast ratio to at least {}:1", config.min_contrast),
        )
        .with_rule(self.id())]
    }
}

/// Interactive elements need a visible focus state.
#[derive(Debug, Default)]
pub struct FocusRule;

impl AccessibilityRule for FocusRule {
    fn id(&self) -> &'static str {
        "focus-management"
    }

    fn evaluate(&self, node: &SceneNode, config: &AuditConfig) -> Vec<AccessibilityIssue> {
        if !config.interactive_keywords.matches(&node.name) {
            return Vec::new();
        }
        vec![AccessibilityIssue::new(
            Severity::Medium,
            "Interactive element needs a visible focus indicator".to_string(),
            element_label(node),
            "Add :focus-visible styles and keep the element reachable by keyboard".to_string(),
        )
        .with_rule(self.id())]
    }
}

/// Text that reads like a heading should be marked up as one.
#[derive(Debug, Default)]
pub struct SemanticStructureRule;

impl AccessibilityRule for SemanticStructureRule {
    fn id(&self) -> &'static str {
        "semantic-structure"
    }

    fn evaluate(&self, node: &SceneNode, config: &AuditConfig) -> Vec<AccessibilityIssue> {
        let heading = config.heading_keywords.matches(&node.name)
            || config.heading_levels.matches_word(&node.name);
        if !node.is_text() || !heading {
            return Vec::new();
        }
        vec![AccessibilityIssue::new(
            Severity::Low,
            "Text looks like a heading but may not use heading markup".to_string(),
            element_label(node),
            "Use an h1-h6 element that fits the document outline".to_string(),
        )
        .with_rule(self.id())]
    }
}

/// Images need alternative text.
#[derive(Debug, Default)]
pub struct AltTextRule;

impl AccessibilityRule for AltTextRule {
    fn id(&self) -> &'static str {
        "alt-text"
    }

    fn evaluate(&self, node: &SceneNode, config: &AuditConfig) -> Vec<AccessibilityIssue> {
        if !node.has_image_fill() && !config.image_keywords.matches(&node.name) {
            return Vec::new();
        }
        vec![AccessibilityIssue::new(
            Severity::Critical,
            "Image is missing alternative text".to_string(),
            element_label(node),
            "Provide a descriptive alt attribute, or alt=\"\" for decorative images".to_string(),
        )
        .with_rule(self.id())]
    }
}

/// The fixed rule order used by the auditor.
pub fn default_rules() -> Vec<Box<dyn AccessibilityRule>> {
    vec![
        Box::new(ContrastRule),
        Box::new(FocusRule),
        Box::new(SemanticStructureRule),
        Box::new(AltTextRule),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_core::{Color, NodeKind};

    fn config() -> AuditConfig {
        AuditConfig::default()
    }

    #[test]
    fn test_contrast_rule() {
        let low = SceneNode::new("1", "Box", NodeKind::Rectangle)
            .with_fill(Paint::solid(Color::WHITE))
            .with_stroke(Paint::solid(Color::from_rgb8(200, 200, 200)), 1.0);
        let issues = ContrastRule.evaluate(&low, &config());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::High);
        assert_eq!(issues[0].rule, Some("color-contrast"));

        let high = SceneNode::new("1", "Box", NodeKind::Rectangle)
            .with_fill(Paint::solid(Color::WHITE))
            .with_stroke(Paint::solid(Color::BLACK), 1.0);
        assert!(ContrastRule.evaluate(&high, &config()).is_empty());

        let unstroked = SceneNode::new("1", "Box", NodeKind::Rectangle).with_fill(Paint::solid(Color::WHITE));
        assert!(ContrastRule.evaluate(&unstroked, &config()).is_empty());
    }

    #[test]
    fn test_focus_rule() {
        let node = SceneNode::new("1", "Settings Tab", NodeKind::Frame);
        assert_eq!(FocusRule.evaluate(&node, &config())[0].severity, Severity::Medium);
        let plain = SceneNode::new("1", "Divider", NodeKind::Line);
        assert!(FocusRule.evaluate(&plain, &config()).is_empty());
    }

    #[test]
    fn test_semantic_structure_rule() {
        let heading = SceneNode::text("1", "H1", "Welcome");
        assert_eq!(SemanticStructureRule.evaluate(&heading, &config())[0].severity, Severity::Low);
        let frame = SceneNode::new("1", "Title Bar", NodeKind::Frame);
        assert!(SemanticStructureRule.evaluate(&frame, &config()).is_empty());
        for name in ["Graph1", "Path2", "Width6"] {
            let text = SceneNode::text("1", name, "42");
            assert!(SemanticStructureRule.evaluate(&text, &config()).is_empty(), "{}", name);
        }
        let level = SceneNode::text("1", "Hero / H2", "Welcome");
        assert_eq!(SemanticStructureRule.evaluate(&level, &config()).len(), 1);
    }

    #[test]
    fn test_alt_text_rule() {
        let fill = SceneNode::new("1", "Hero", NodeKind::Rectangle).with_fill(Paint::image("ref"));
        assert_eq!(AltTextRule.evaluate(&fill, &config())[0].severity, Severity::Critical);
        let named = SceneNode::new("1", "Avatar", NodeKind::Ellipse);
        assert_eq!(AltTextRule.evaluate(&named, &config()).len(), 1);
        let issue = &AltTextRule.evaluate(&SceneNode::new("7", "", NodeKind::Rectangle).with_fill(Paint::image("r")), &config())[0];
        assert_eq!(issue.element, "7");
    }
}
