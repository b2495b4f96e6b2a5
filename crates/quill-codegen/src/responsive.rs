//! Responsive style variants.
//!
//! A node gets per-breakpoint copies of its base style bag. The default
//! policy only changes the mobile variant (smaller type, compact padding);
//! tablet and desktop pass the base bag through untouched.

use crate::style::{props, StyleBag, StyleValue};
use quill_core::SceneNode;
use serde::Serialize;
use std::collections::BTreeMap;

/// Adjustments applied to one breakpoint's copy of the base styles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BreakpointPolicy {
    /// Multiplier for `fontSize`.
    pub font_scale: f64,
    /// Lower bound for the scaled font size.
    pub font_floor: Option<f64>,
    /// Replacement for an existing `padding`.
    pub compact_padding: Option<f64>,
}

impl BreakpointPolicy {
    pub const PASSTHROUGH: BreakpointPolicy = BreakpointPolicy {
        font_scale: 1.0,
        font_floor: None,
        compact_padding: None,
    };

    pub fn apply(&self, base: &StyleBag) -> StyleBag {
        let mut bag = base.clone();

        if let Some(size) = base.get(props::FONT_SIZE).and_then(StyleValue::as_px) {
            let mut scaled = size * self.font_scale;
            if let Some(floor) = self.font_floor {
                scaled = scaled.max(floor);
            }
            if scaled != size {
                bag.set(props::FONT_SIZE, StyleValue::Px(scaled));
            }
        }

        if let Some(padding) = self.compact_padding {
            if bag.contains(props::PADDING) {
                bag.set(props::PADDING, StyleValue::Px(padding));
            }
        }

        bag
    }
}

/// Per-breakpoint policies plus the width that marks a design as
/// desktop-sized.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponsivePolicy {
    pub mobile: BreakpointPolicy,
    pub tablet: BreakpointPolicy,
    pub desktop: BreakpointPolicy,
    /// Nodes wider than this are treated as responsive designs.
    pub width_threshold: f64,
}

impl Default for ResponsivePolicy {
    fn default() -> Self {
        Self {
            mobile: BreakpointPolicy {
                font_scale: 0.8,
                font_floor: Some(14.0),
                compact_padding: Some(16.0),
            },
            tablet: BreakpointPolicy::PASSTHROUGH,
            desktop: BreakpointPolicy::PASSTHROUGH,
            width_threshold: 768.0,
        }
    }
}

/// Style bags for each breakpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsiveVariants {
    pub mobile: StyleBag,
    pub tablet: StyleBag,
    pub desktop: StyleBag,
    pub has_responsive_design: bool,
}

/// Max widths of the narrow breakpoints. Desktop is everything above
/// `tablet_max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Breakpoints {
    pub mobile_max: u32,
    pub tablet_max: u32,
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            mobile_max: 767,
            tablet_max: 1023,
        }
    }
}

impl Breakpoints {
    /// Defaults with `mobile` / `tablet` entries of the override map
    /// applied. Other keys are ignored.
    pub fn from_overrides(overrides: Option<&BTreeMap<String, u32>>) -> Self {
        let mut breakpoints = Self::default();
        if let Some(map) = overrides {
            if let Some(mobile) = map.get("mobile") {
                breakpoints.mobile_max = *mobile;
            }
            if let Some(tablet) = map.get("tablet") {
                breakpoints.tablet_max = *tablet;
            }
        }
        breakpoints
    }
}

/// Derives breakpoint variants from base styles.
#[derive(Debug, Clone, Default)]
pub struct ResponsiveGenerator {
    policy: ResponsivePolicy,
}

impl ResponsiveGenerator {
    pub fn new(policy: ResponsivePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &ResponsivePolicy {
        &self.policy
    }

    /// Variants of `base`. `has_responsive_design` is left unset; see
    /// [`ResponsiveGenerator::generate`].
    pub fn derive(&self, base: &StyleBag) -> ResponsiveVariants {
        ResponsiveVariants {
            mobile: self.policy.mobile.apply(base),
            tablet: self.policy.tablet.apply(base),
            desktop: self.policy.desktop.apply(base),
            has_responsive_design: false,
        }
    }

    /// Wide nodes, anchored nodes and auto-layout frames adapt to the
    /// viewport.
    pub fn has_responsive_design(&self, node: &SceneNode) -> bool {
        node.width().map_or(false, |w| w > self.policy.width_threshold)
            || node.constraints.map_or(false, |c| c.is_non_default())
            || node.layout.is_auto_layout()
    }

    pub fn generate(&self, node: &SceneNode, base: &StyleBag) -> ResponsiveVariants {
        ResponsiveVariants {
            has_responsive_design: self.has_responsive_design(node),
            ..self.derive(base)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_core::{Constraints, HorizontalConstraint, LayoutMode, NodeKind, Padding};

    fn bag(font: f64) -> StyleBag {
        StyleBag::new()
            .with(props::FONT_SIZE, StyleValue::Px(font))
            .with(props::PADDING, StyleValue::Px(32.0))
    }

    #[test]
    fn test_mobile_scales_and_compacts() {
        let variants = ResponsiveGenerator::default().derive(&bag(24.0));
        let font = variants.mobile.get(props::FONT_SIZE).map(StyleValue::to_css);
        assert_eq!(font.as_deref(), Some("19.2px"));
        assert_eq!(variants.mobile.get(props::PADDING), Some(&StyleValue::Px(16.0)));
        assert_eq!(variants.tablet, bag(24.0));
        assert_eq!(variants.desktop, bag(24.0));
    }

    #[test]
    fn test_mobile_font_floor() {
        let variants = ResponsiveGenerator::default().derive(&bag(16.0));
        assert_eq!(variants.mobile.get(props::FONT_SIZE), Some(&StyleValue::Px(14.0)));
    }

    #[test]
    fn test_compact_padding_only_replaces() {
        let base = StyleBag::new().with(props::WIDTH, StyleValue::Px(100.0));
        let variants = ResponsiveGenerator::default().derive(&base);
        assert!(!variants.mobile.contains(props::PADDING));
    }

    #[test]
    fn test_has_responsive_design() {
        let generator = ResponsiveGenerator::default();
        let narrow = SceneNode::new("1", "Box", NodeKind::Frame).with_size(320.0, 100.0);
        assert!(!generator.has_responsive_design(&narrow));

        let wide = SceneNode::new("1", "Box", NodeKind::Frame).with_size(1440.0, 900.0);
        assert!(generator.has_responsive_design(&wide));

        let anchored = narrow.clone().with_constraints(Constraints {
            horizontal: HorizontalConstraint::LeftRight,
            ..Constraints::default()
        });
        assert!(generator.has_responsive_design(&anchored));

        let stacked = narrow.with_auto_layout(LayoutMode::Vertical, 8.0, Padding::default());
        assert!(generator.has_responsive_design(&stacked));
    }

    #[test]
    fn test_breakpoint_overrides() {
        let mut map = BTreeMap::new();
        map.insert("mobile".to_string(), 599);
        map.insert("wide".to_string(), 1600);
        let breakpoints = Breakpoints::from_overrides(Some(&map));
        assert_eq!(breakpoints.mobile_max, 599);
        assert_eq!(breakpoints.tablet_max, 1023);
    }
}
