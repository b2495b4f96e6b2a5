//! Resolution of a node's visual properties into a [`StyleBag`].
//!
//! Competing color sources are applied in a fixed order, later sources
//! overriding earlier ones:
//!
//! 1. the explicit `backgroundColor` field,
//! 2. the first visible solid entry of the fill list,
//! 3. for text nodes, the first solid typography fill, which sets the
//!    foreground `color` only.

use super::{props, StyleBag, StyleValue};
use quill_core::{format_number, ColorStop, EffectKind, LayoutMode, Paint, PaintKind, SceneNode};
use smallvec::smallvec;

/// Turns raw node properties into canonical styles. Single node only;
/// callers resolve children on their own.
#[derive(Debug, Clone, Copy, Default)]
pub struct StyleResolver;

impl StyleResolver {
    pub fn new() -> Self {
        Self
    }

    pub fn resolve(&self, node: &SceneNode) -> StyleBag {
        let mut bag = StyleBag::new();

        if let Some(geometry) = node.geometry {
            bag.set(props::WIDTH, StyleValue::Px(geometry.width));
            bag.set(props::HEIGHT, StyleValue::Px(geometry.height));
        }

        self.resolve_layout(node, &mut bag);
        self.resolve_background(node, &mut bag);
        self.resolve_border(node, &mut bag);

        if let Some(radius) = node.corner_radius.filter(|r| *r > 0.0) {
            bag.set(props::BORDER_RADIUS, StyleValue::Px(radius));
        }

        self.resolve_effects(node, &mut bag);

        if let Some(opacity) = node.opacity.filter(|o| *o < 1.0) {
            bag.set(props::OPACITY, StyleValue::Number(opacity.max(0.0)));
        }

        if node.is_text() {
            self.resolve_typography(node, &mut bag);
        }

        bag
    }

    fn resolve_layout(&self, node: &SceneNode, bag: &mut StyleBag) {
        let layout = &node.layout;
        let direction = match layout.layout_mode {
            LayoutMode::Horizontal => Some("row"),
            LayoutMode::Vertical => Some("column"),
            LayoutMode::None => None,
        };

        if let Some(direction) = direction {
            bag.set(props::DISPLAY, StyleValue::keyword("flex"));
            bag.set(props::FLEX_DIRECTION, StyleValue::keyword(direction));
            if let Some(gap) = layout.item_spacing.filter(|g| *g > 0.0) {
                bag.set(props::GAP, StyleValue::Px(gap));
            }
        }

        let padding = layout.padding;
        if padding.is_zero() {
            return;
        }
        if padding.is_uniform() {
            bag.set(props::PADDING, StyleValue::Px(padding.top));
        } else {
            bag.set(
                props::PADDING,
                StyleValue::Edges(smallvec![padding.top, padding.right, padding.bottom, padding.left]),
            );
        }
    }

    fn resolve_background(&self, node: &SceneNode, bag: &mut StyleBag) {
        if let Some(color) = node.background_color {
            bag.set(props::BACKGROUND_COLOR, StyleValue::Color(color));
        }

        let visible = || node.fills.iter().filter(|p| p.is_visible());

        if let Some(color) = visible().find_map(Paint::effective_color) {
            bag.set(props::BACKGROUND_COLOR, StyleValue::Color(color));
        } else if let Some(gradient) = visible().find_map(gradient_css) {
            bag.set(props::BACKGROUND, StyleValue::Keyword(gradient));
        }
    }

    fn resolve_border(&self, node: &SceneNode, bag: &mut StyleBag) {
        let stroke = node
            .strokes
            .iter()
            .filter(|p| p.is_visible())
            .find_map(Paint::effective_color);

        if let Some(color) = stroke {
            let weight = node.stroke_weight.unwrap_or(1.0);
            bag.set(
                props::BORDER,
                StyleValue::Keyword(format!("{}px solid {}", format_number(weight), color.to_css())),
            );
        }
    }

    fn resolve_effects(&self, node: &SceneNode, bag: &mut StyleBag) {
        let shadows: Vec<String> = node
            .effects
            .iter()
            .filter(|e| e.kind == EffectKind::DropShadow && e.is_visible())
            .map(|e| {
                let offset = e.offset.unwrap_or_default();
                let color = e.color.unwrap_or(quill_core::Color::rgba(0.0, 0.0, 0.0, 0.25));
                format!(
                    "{}px {}px {}px {}px {}",
                    format_number(offset.x),
                    format_number(offset.y),
                    format_number(e.radius),
                    format_number(e.spread.unwrap_or(0.0)),
                    color.to_css()
                )
            })
            .collect();

        if !shadows.is_empty() {
            bag.set(props::BOX_SHADOW, StyleValue::Keyword(shadows.join(", ")));
        }

        if let Some(blur) = node
            .effects
            .iter()
            .find(|e| e.kind == EffectKind::LayerBlur && e.is_visible())
        {
            bag.set(
                props::FILTER,
                StyleValue::Keyword(format!("blur({}px)", format_number(blur.radius))),
            );
        }
    }

    fn resolve_typography(&self, node: &SceneNode, bag: &mut StyleBag) {
        let Some(typography) = node.typography.as_ref() else {
            return;
        };

        if let Some(family) = typography.font_family.as_deref().filter(|f| !f.is_empty()) {
            bag.set(props::FONT_FAMILY, StyleValue::keyword(family));
        }
        if let Some(size) = typography.font_size {
            bag.set(props::FONT_SIZE, StyleValue::Px(size));
        }
        if let Some(weight) = typography.font_weight {
            bag.set(props::FONT_WEIGHT, StyleValue::Number(weight));
        }
        if let Some(line_height) = typography.line_height_px {
            bag.set(props::LINE_HEIGHT, StyleValue::Px(line_height));
        }
        if let Some(spacing) = typography.letter_spacing.filter(|s| *s != 0.0) {
            bag.set(props::LETTER_SPACING, StyleValue::Px(spacing));
        }
        if let Some(align) = typography.text_align_horizontal {
            bag.set(props::TEXT_ALIGN, StyleValue::keyword(align.to_css()));
        }

        let foreground = typography
            .fills
            .iter()
            .filter(|p| p.is_visible())
            .find_map(Paint::effective_color);
        if let Some(color) = foreground {
            bag.set(props::COLOR, StyleValue::Color(color));
        }
    }
}

/// CSS gradient function for a gradient paint.
fn gradient_css(paint: &Paint) -> Option<String> {
    if !paint.is_gradient() || paint.gradient_stops.is_empty() {
        return None;
    }
    let stops = color_stops(&paint.gradient_stops, paint.opacity.unwrap_or(1.0));

    Some(match paint.kind {
        PaintKind::GradientLinear => {
            format!("linear-gradient({}deg, {})", format_number(linear_angle(paint)), stops)
        }
        PaintKind::GradientAngular => format!("conic-gradient({})", stops),
        _ => format!("radial-gradient(circle, {})", stops),
    })
}

fn color_stops(stops: &[ColorStop], opacity: f64) -> String {
    stops
        .iter()
        .map(|stop| {
            let color = stop.color.with_alpha(stop.color.a * opacity);
            format!("{} {}%", color.to_css(), format_number(stop.position * 100.0))
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// CSS angle (0deg points up, clockwise) of the first two gradient handles.
/// Top-to-bottom when handles are missing.
fn linear_angle(paint: &Paint) -> f64 {
    match paint.gradient_handle_positions.as_slice() {
        [start, end, ..] => {
            let (dx, dy) = (end.x - start.x, end.y - start.y);
            if dx == 0.0 && dy == 0.0 {
                return 180.0;
            }
            let degrees = dx.atan2(-dy).to_degrees().round();
            (degrees + 360.0) % 360.0
        }
        _ => 180.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_core::{Color, Effect, NodeKind, Padding, Typography, Vector};

    fn resolve(node: &SceneNode) -> StyleBag {
        StyleResolver::new().resolve(node)
    }

    fn css(bag: &StyleBag, key: &str) -> Option<String> {
        bag.get(key).map(StyleValue::to_css)
    }

    #[test]
    fn test_fill_overrides_explicit_background() {
        let node = SceneNode::new("1", "Box", NodeKind::Frame)
            .with_background(Color::WHITE)
            .with_fill(Paint::solid(Color::rgb(1.0, 0.0, 0.0)));
        assert_eq!(css(&resolve(&node), props::BACKGROUND_COLOR).unwrap(), "rgba(255, 0, 0, 1)");
    }

    #[test]
    fn test_explicit_background_without_fills() {
        let node = SceneNode::new("1", "Box", NodeKind::Frame).with_background(Color::BLACK);
        assert_eq!(css(&resolve(&node), props::BACKGROUND_COLOR).unwrap(), "rgba(0, 0, 0, 1)");
    }

    #[test]
    fn test_first_solid_fill_wins_and_hidden_skipped() {
        let node = SceneNode::new("1", "Box", NodeKind::Frame)
            .with_fill(Paint::image("img"))
            .with_fill(Paint::solid(Color::BLACK).hidden())
            .with_fill(Paint::solid(Color::rgb(0.0, 0.0, 1.0)))
            .with_fill(Paint::solid(Color::WHITE));
        assert_eq!(css(&resolve(&node), props::BACKGROUND_COLOR).unwrap(), "rgba(0, 0, 255, 1)");
    }

    #[test]
    fn test_text_fill_sets_color_not_background() {
        let node = SceneNode::text("1", "Label", "Hi").with_typography(
            Typography::new("Inter", 16.0).with_fill(Paint::solid(Color::rgb(0.0, 1.0, 0.0))),
        );
        let bag = resolve(&node);
        assert_eq!(css(&bag, props::COLOR).unwrap(), "rgba(0, 255, 0, 1)");
        assert!(!bag.contains(props::BACKGROUND_COLOR));
        assert_eq!(css(&bag, props::FONT_SIZE).unwrap(), "16px");
        assert_eq!(css(&bag, props::FONT_FAMILY).unwrap(), "Inter");
    }

    #[test]
    fn test_gradient_fill() {
        let mut paint = Paint::linear_gradient(vec![
            ColorStop { color: Color::WHITE, position: 0.0 },
            ColorStop { color: Color::BLACK, position: 1.0 },
        ]);
        paint.gradient_handle_positions = vec![Vector { x: 0.0, y: 0.5 }, Vector { x: 1.0, y: 0.5 }];
        let node = SceneNode::new("1", "Hero", NodeKind::Frame).with_fill(paint);
        let bag = resolve(&node);
        assert_eq!(
            css(&bag, props::BACKGROUND).unwrap(),
            "linear-gradient(90deg, rgba(255, 255, 255, 1) 0%, rgba(0, 0, 0, 1) 100%)"
        );
        assert!(!bag.contains(props::BACKGROUND_COLOR));
    }

    #[test]
    fn test_padding_shorthand() {
        let uniform = SceneNode::new("1", "A", NodeKind::Frame).with_auto_layout(
            LayoutMode::Vertical,
            12.0,
            Padding::uniform(16.0),
        );
        let bag = resolve(&uniform);
        assert_eq!(css(&bag, props::PADDING).unwrap(), "16px");
        assert_eq!(css(&bag, props::FLEX_DIRECTION).unwrap(), "column");
        assert_eq!(css(&bag, props::GAP).unwrap(), "12px");

        let mixed = SceneNode::new("1", "A", NodeKind::Frame).with_auto_layout(
            LayoutMode::Horizontal,
            0.0,
            Padding::new(8.0, 16.0, 4.0, 2.0),
        );
        let bag = resolve(&mixed);
        assert_eq!(css(&bag, props::PADDING).unwrap(), "8px 16px 4px 2px");
        assert!(!bag.contains(props::GAP));
    }

    #[test]
    fn test_only_visible_drop_shadows() {
        let node = SceneNode::new("1", "Card", NodeKind::Frame)
            .with_effect(Effect::drop_shadow(0.0, 4.0, 8.0, Color::rgba(0.0, 0.0, 0.0, 0.5)))
            .with_effect(Effect::drop_shadow(0.0, 1.0, 2.0, Color::BLACK).hidden())
            .with_effect(Effect {
                kind: EffectKind::InnerShadow,
                ..Effect::drop_shadow(1.0, 1.0, 1.0, Color::BLACK)
            })
            .with_effect(Effect::drop_shadow(2.0, 2.0, 0.0, Color::WHITE));
        assert_eq!(
            css(&resolve(&node), props::BOX_SHADOW).unwrap(),
            "0px 4px 8px 0px rgba(0, 0, 0, 0.5), 2px 2px 0px 0px rgba(255, 255, 255, 1)"
        );
    }

    #[test]
    fn test_border_and_radius() {
        let node = SceneNode::new("1", "Box", NodeKind::Rectangle)
            .with_stroke(Paint::solid(Color::BLACK), 2.0)
            .with_corner_radius(8.0)
            .with_opacity(0.5);
        let bag = resolve(&node);
        assert_eq!(css(&bag, props::BORDER).unwrap(), "2px solid rgba(0, 0, 0, 1)");
        assert_eq!(css(&bag, props::BORDER_RADIUS).unwrap(), "8px");
        assert_eq!(css(&bag, props::OPACITY).unwrap(), "0.5");
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let node = SceneNode::new("1", "Card", NodeKind::Frame)
            .with_size(320.0, 200.0)
            .with_fill(Paint::solid(Color::WHITE))
            .with_corner_radius(12.0);
        assert_eq!(resolve(&node), resolve(&node));
    }
}
