//! The scene graph: a strictly owned tree of visual nodes.

use crate::types::{Color, Constraints, Effect, Layout, LayoutMode, Padding, Paint, PaintKind, Rect, Typography};
use serde::{Deserialize, Serialize};

/// Node type tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeKind {
    Document,
    Canvas,
    Frame,
    Group,
    Section,
    Text,
    Rectangle,
    Ellipse,
    Vector,
    Line,
    Star,
    #[serde(rename = "REGULAR_POLYGON", alias = "POLYGON")]
    Polygon,
    BooleanOperation,
    Slice,
    Component,
    ComponentSet,
    Instance,
    #[default]
    #[serde(other)]
    Unknown,
}

impl NodeKind {
    /// Kinds that are reusable component definitions or usages of one.
    pub fn has_variants(&self) -> bool {
        matches!(self, Self::ComponentSet | Self::Instance)
    }

    /// Kinds that can contain other nodes.
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            Self::Document
                | Self::Canvas
                | Self::Frame
                | Self::Group
                | Self::Section
                | Self::Component
                | Self::ComponentSet
                | Self::Instance
        )
    }

    /// Vector-ish leaf shapes.
    pub fn is_shape(&self) -> bool {
        matches!(
            self,
            Self::Rectangle
                | Self::Ellipse
                | Self::Vector
                | Self::Line
                | Self::Star
                | Self::Polygon
                | Self::BooleanOperation
        )
    }
}

/// A node of the input design tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneNode {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SceneNode>,
    #[serde(rename = "absoluteBoundingBox", default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<Rect>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fills: Vec<Paint>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub strokes: Vec<Paint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub effects: Vec<Effect>,
    #[serde(rename = "style", default, skip_serializing_if = "Option::is_none")]
    pub typography: Option<Typography>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub characters: Option<String>,
    #[serde(flatten)]
    pub layout: Layout,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corner_radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<Constraints>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Color>,
}

impl SceneNode {
    /// Create an empty node.
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            children: Vec::new(),
            geometry: None,
            fills: Vec::new(),
            strokes: Vec::new(),
            stroke_weight: None,
            effects: Vec::new(),
            typography: None,
            characters: None,
            layout: Layout::default(),
            corner_radius: None,
            opacity: None,
            constraints: None,
            background_color: None,
        }
    }

    /// Create a text node with literal content.
    pub fn text(id: impl Into<String>, name: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(id, name, NodeKind::Text).with_characters(content)
    }

    pub fn with_child(mut self, child: SceneNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = SceneNode>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.geometry = Some(Rect::sized(width, height));
        self
    }

    pub fn with_fill(mut self, paint: Paint) -> Self {
        self.fills.push(paint);
        self
    }

    pub fn with_stroke(mut self, paint: Paint, weight: f64) -> Self {
        self.strokes.push(paint);
        self.stroke_weight = Some(weight);
        self
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_typography(mut self, typography: Typography) -> Self {
        self.typography = Some(typography);
        self
    }

    pub fn with_characters(mut self, content: impl Into<String>) -> Self {
        self.characters = Some(content.into());
        self
    }

    pub fn with_auto_layout(mut self, mode: LayoutMode, spacing: f64, padding: Padding) -> Self {
        self.layout = Layout {
            layout_mode: mode,
            item_spacing: Some(spacing),
            padding,
        };
        self
    }

    pub fn with_corner_radius(mut self, radius: f64) -> Self {
        self.corner_radius = Some(radius);
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    pub fn with_constraints(mut self, constraints: Constraints) -> Self {
        self.constraints = Some(constraints);
        self
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = Some(color);
        self
    }

    pub fn is_text(&self) -> bool {
        self.kind == NodeKind::Text
    }

    /// Literal text content, if this is a non-empty text node.
    pub fn text_content(&self) -> Option<&str> {
        if !self.is_text() {
            return None;
        }
        self.characters.as_deref().filter(|s| !s.is_empty())
    }

    pub fn has_image_fill(&self) -> bool {
        self.fills.iter().any(|p| p.kind == PaintKind::Image)
    }

    /// Absolute width, when geometry is known.
    pub fn width(&self) -> Option<f64> {
        self.geometry.map(|g| g.width)
    }

    /// Depth-first, pre-order traversal starting at this node.
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }

    /// Find a node in this subtree by id.
    pub fn find(&self, id: &str) -> Option<&SceneNode> {
        self.walk().find(|n| n.id == id)
    }

    /// Number of nodes below this one.
    pub fn descendant_count(&self) -> usize {
        self.walk().count() - 1
    }

    /// Whether any strict descendant satisfies the predicate.
    pub fn any_descendant(&self, mut pred: impl FnMut(&SceneNode) -> bool) -> bool {
        self.walk().skip(1).any(|n| pred(n))
    }
}

/// Pre-order iterator over a subtree.
#[derive(Debug)]
pub struct Walk<'a> {
    stack: Vec<&'a SceneNode>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a SceneNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SceneNode {
        SceneNode::new("1", "Root", NodeKind::Frame)
            .with_child(
                SceneNode::new("2", "Header", NodeKind::Frame)
                    .with_child(SceneNode::text("3", "Title", "Hello")),
            )
            .with_child(SceneNode::new("4", "Body", NodeKind::Rectangle))
    }

    #[test]
    fn test_walk_is_preorder() {
        let root = sample();
        let ids: Vec<&str> = root.walk().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn test_find_and_count() {
        let root = sample();
        assert_eq!(root.find("3").map(|n| n.name.as_str()), Some("Title"));
        assert!(root.find("99").is_none());
        assert_eq!(root.descendant_count(), 3);
        assert!(root.any_descendant(|n| n.is_text()));
        assert!(!root.any_descendant(|n| n.id == "1"));
    }

    #[test]
    fn test_deserialize_api_node() {
        let json = r#"{
            "id": "10:2",
            "name": "Primary Button",
            "type": "INSTANCE",
            "absoluteBoundingBox": {"x": 0, "y": 0, "width": 120, "height": 40},
            "layoutMode": "HORIZONTAL",
            "itemSpacing": 8,
            "paddingTop": 12, "paddingRight": 24, "paddingBottom": 12, "paddingLeft": 24,
            "cornerRadius": 8,
            "fills": [{"type": "SOLID", "color": {"r": 0.23, "g": 0.51, "b": 0.96, "a": 1}}],
            "children": [
                {"id": "10:3", "name": "Label", "type": "TEXT", "characters": "Submit",
                 "style": {"fontFamily": "Inter", "fontSize": 16, "fontWeight": 600}}
            ]
        }"#;
        let node: SceneNode = serde_json::from_str(json).unwrap();
        assert_eq!(node.kind, NodeKind::Instance);
        assert_eq!(node.layout.layout_mode, LayoutMode::Horizontal);
        assert_eq!(node.layout.padding, Padding::new(12.0, 24.0, 12.0, 24.0));
        assert_eq!(node.children[0].text_content(), Some("Submit"));
        assert_eq!(
            node.children[0].typography.as_ref().and_then(|t| t.font_size),
            Some(16.0)
        );
    }

    #[test]
    fn test_unknown_kind_falls_back() {
        let node: SceneNode =
            serde_json::from_str(r#"{"id": "1", "type": "WIDGET"}"#).unwrap();
        assert_eq!(node.kind, NodeKind::Unknown);
        assert!(node.name.is_empty());
    }
}
