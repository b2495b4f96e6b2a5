//! Utility-class backend.
//!
//! Lengths snap to the nearest step of a discrete scale when one is close
//! enough; everything else becomes an arbitrary-value class.

use super::css::kebab_property;
use crate::responsive::Breakpoints;
use crate::style::{props, StyleBag, StyleValue, StyledNode};
use quill_core::format_number;

/// Discrete value tables for utility classes.
#[derive(Debug, Clone, PartialEq)]
pub struct UtilityScale {
    /// Spacing and size steps: class suffix to pixels.
    pub spacing: Vec<(String, f64)>,
    pub font_sizes: Vec<(String, f64)>,
    /// Radius steps. An empty suffix means the bare `rounded` class.
    pub radii: Vec<(String, f64)>,
    pub font_weights: Vec<(String, f64)>,
    /// A step matches when within `max(tolerance_px, tolerance_ratio * value)`.
    pub tolerance_px: f64,
    pub tolerance_ratio: f64,
}

fn table(entries: &[(&str, f64)]) -> Vec<(String, f64)> {
    entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

impl Default for UtilityScale {
    fn default() -> Self {
        Self {
            spacing: table(&[
                ("0", 0.0),
                ("px", 1.0),
                ("0.5", 2.0),
                ("1", 4.0),
                ("1.5", 6.0),
                ("2", 8.0),
                ("2.5", 10.0),
                ("3", 12.0),
                ("3.5", 14.0),
                ("4", 16.0),
                ("5", 20.0),
                ("6", 24.0),
                ("7", 28.0),
                ("8", 32.0),
                ("9", 36.0),
                ("10", 40.0),
                ("11", 44.0),
                ("12", 48.0),
                ("14", 56.0),
                ("16", 64.0),
                ("20", 80.0),
                ("24", 96.0),
                ("28", 112.0),
                ("32", 128.0),
                ("36", 144.0),
                ("40", 160.0),
                ("44", 176.0),
                ("48", 192.0),
                ("52", 208.0),
                ("56", 224.0),
                ("60", 240.0),
                ("64", 256.0),
                ("72", 288.0),
                ("80", 320.0),
                ("96", 384.0),
            ]),
            font_sizes: table(&[
                ("xs", 12.0),
                ("sm", 14.0),
                ("base", 16.0),
                ("lg", 18.0),
                ("xl", 20.0),
                ("2xl", 24.0),
                ("3xl", 30.0),
                ("4xl", 36.0),
                ("5xl", 48.0),
                ("6xl", 60.0),
                ("7xl", 72.0),
                ("8xl", 96.0),
                ("9xl", 128.0),
            ]),
            radii: table(&[
                ("none", 0.0),
                ("sm", 2.0),
                ("", 4.0),
                ("md", 6.0),
                ("lg", 8.0),
                ("xl", 12.0),
                ("2xl", 16.0),
                ("3xl", 24.0),
                ("full", 9999.0),
            ]),
            font_weights: table(&[
                ("thin", 100.0),
                ("extralight", 200.0),
                ("light", 300.0),
                ("normal", 400.0),
                ("medium", 500.0),
                ("semibold", 600.0),
                ("bold", 700.0),
                ("extrabold", 800.0),
                ("black", 900.0),
            ]),
            tolerance_px: 2.0,
            tolerance_ratio: 0.125,
        }
    }
}

impl UtilityScale {
    /// Nearest step within tolerance.
    pub fn snap<'t>(&self, steps: &'t [(String, f64)], value: f64) -> Option<&'t str> {
        let tolerance = self.tolerance_px.max(self.tolerance_ratio * value.abs());
        steps
            .iter()
            .map(|(key, px)| (key, (px - value).abs()))
            .filter(|(_, distance)| *distance <= tolerance)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(key, _)| key.as_str())
    }

    fn spacing_class(&self, prefix: &str, value: f64) -> String {
        match self.snap(&self.spacing, value) {
            Some(step) => format!("{}-{}", prefix, step),
            None => format!("{}-[{}px]", prefix, format_number(value)),
        }
    }

    fn padding_classes(&self, edges: &[f64], out: &mut Vec<String>) {
        let [top, right, bottom, left] = match edges {
            [t, r, b, l] => [*t, *r, *b, *l],
            _ => return,
        };
        if top == bottom && right == left {
            if top != 0.0 {
                out.push(self.spacing_class("py", top));
            }
            if right != 0.0 {
                out.push(self.spacing_class("px", right));
            }
            return;
        }
        for (prefix, value) in [("pt", top), ("pr", right), ("pb", bottom), ("pl", left)] {
            if value != 0.0 {
                out.push(self.spacing_class(prefix, value));
            }
        }
    }

    /// Utility classes for a style bag, in bag order.
    pub fn classes(&self, bag: &StyleBag) -> Vec<String> {
        let mut out = Vec::new();
        for (property, value) in bag.iter() {
            match (property, value) {
                (props::WIDTH, StyleValue::Px(v)) => out.push(self.spacing_class("w", *v)),
                (props::HEIGHT, StyleValue::Px(v)) => out.push(self.spacing_class("h", *v)),
                (props::DISPLAY, StyleValue::Keyword(k)) if k == "flex" => out.push("flex".to_string()),
                (props::FLEX_DIRECTION, StyleValue::Keyword(k)) => out.push(match k.as_str() {
                    "column" => "flex-col".to_string(),
                    _ => "flex-row".to_string(),
                }),
                (props::GAP, StyleValue::Px(v)) => out.push(self.spacing_class("gap", *v)),
                (props::PADDING, StyleValue::Px(v)) => out.push(self.spacing_class("p", *v)),
                (props::PADDING, StyleValue::Edges(edges)) => self.padding_classes(edges, &mut out),
                (props::BACKGROUND_COLOR, v) | (props::BACKGROUND, v) => {
                    out.push(format!("bg-[{}]", arbitrary(v)))
                }
                (props::BORDER_RADIUS, StyleValue::Px(v)) => out.push(match self.snap(&self.radii, *v) {
                    Some("") => "rounded".to_string(),
                    Some(step) => format!("rounded-{}", step),
                    None => format!("rounded-[{}px]", format_number(*v)),
                }),
                (props::BOX_SHADOW, v) => out.push(format!("shadow-[{}]", arbitrary(v))),
                (props::OPACITY, v) => out.push(format!("opacity-[{}]", arbitrary(v))),
                (props::FONT_FAMILY, v) => out.push(format!("font-[{}]", arbitrary(v))),
                (props::FONT_SIZE, StyleValue::Px(v)) => out.push(match self.snap(&self.font_sizes, *v) {
                    Some(step) => format!("text-{}", step),
                    None => format!("text-[{}px]", format_number(*v)),
                }),
                (props::FONT_WEIGHT, StyleValue::Number(v)) => {
                    out.push(match self.snap(&self.font_weights, *v) {
                        Some(step) => format!("font-{}", step),
                        None => format!("font-[{}]", format_number(*v)),
                    })
                }
                (props::LINE_HEIGHT, v) => out.push(format!("leading-[{}]", arbitrary(v))),
                (props::LETTER_SPACING, v) => out.push(format!("tracking-[{}]", arbitrary(v))),
                (props::TEXT_ALIGN, v) => out.push(format!("text-{}", v)),
                (props::COLOR, v) => out.push(format!("text-[{}]", arbitrary(v))),
                (other, v) => out.push(format!("[{}:{}]", kebab_property(other), arbitrary(v))),
            }
        }
        out
    }

    /// Class list for one node of the styled tree.
    ///
    /// With breakpoint variants the unprefixed classes describe the mobile
    /// variant and wider breakpoints add prefixed overrides.
    pub fn node_classes(&self, styled: &StyledNode<'_>, breakpoints: Option<&Breakpoints>) -> String {
        let (Some(variants), Some(breakpoints)) = (styled.responsive.as_ref(), breakpoints) else {
            return self.classes(&styled.styles).join(" ");
        };

        let mut classes = self.classes(&variants.mobile);
        let tablet = variants.tablet.diff(&variants.mobile);
        let desktop = variants.desktop.diff(&variants.tablet);
        let tablet_prefix = min_width_prefix(breakpoints.mobile_max + 1, 768, "md");
        let desktop_prefix = min_width_prefix(breakpoints.tablet_max + 1, 1024, "lg");

        classes.extend(self.classes(&tablet).into_iter().map(|c| format!("{}:{}", tablet_prefix, c)));
        classes.extend(self.classes(&desktop).into_iter().map(|c| format!("{}:{}", desktop_prefix, c)));
        classes.join(" ")
    }
}

/// Named screen prefix when the width matches the stock one, else an
/// arbitrary `min-[..]` variant.
fn min_width_prefix(min_width: u32, stock: u32, name: &str) -> String {
    if min_width == stock {
        name.to_string()
    } else {
        format!("min-[{}px]", min_width)
    }
}

/// Arbitrary-value spelling: no spaces, separators become underscores.
fn arbitrary(value: &StyleValue) -> String {
    value.to_css().replace(", ", ",").replace(' ', "_")
}

/// Stylesheet entry point for the utility dialect.
pub fn stylesheet() -> String {
    "@tailwind base;\n@tailwind components;\n@tailwind utilities;\n".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_core::Color;
    use smallvec::smallvec;

    #[test]
    fn test_snap_within_tolerance() {
        let scale = UtilityScale::default();
        assert_eq!(scale.snap(&scale.spacing, 16.0), Some("4"));
        assert_eq!(scale.snap(&scale.spacing, 17.0), Some("4"));
        assert_eq!(scale.snap(&scale.spacing, 500.0), None);
        assert_eq!(scale.snap(&scale.font_sizes, 15.0), Some("sm"));
    }

    #[test]
    fn test_arbitrary_fallback() {
        let scale = UtilityScale::default();
        let bag = StyleBag::new()
            .with(props::WIDTH, StyleValue::Px(500.0))
            .with(props::PADDING, StyleValue::Px(16.0));
        assert_eq!(scale.classes(&bag), vec!["w-[500px]", "p-4"]);
    }

    #[test]
    fn test_padding_axes() {
        let scale = UtilityScale::default();
        let bag = StyleBag::new().with(props::PADDING, StyleValue::Edges(smallvec![12.0, 24.0, 12.0, 24.0]));
        assert_eq!(scale.classes(&bag), vec!["py-3", "px-6"]);

        let bag = StyleBag::new().with(props::PADDING, StyleValue::Edges(smallvec![8.0, 0.0, 4.0, 0.0]));
        assert_eq!(scale.classes(&bag), vec!["pt-2", "pb-1"]);
    }

    #[test]
    fn test_colors_and_type() {
        let scale = UtilityScale::default();
        let bag = StyleBag::new()
            .with(props::BACKGROUND_COLOR, StyleValue::Color(Color::rgba(0.0, 0.0, 0.0, 0.5)))
            .with(props::BORDER_RADIUS, StyleValue::Px(4.0))
            .with(props::FONT_SIZE, StyleValue::Px(16.0))
            .with(props::FONT_WEIGHT, StyleValue::Number(600.0))
            .with(props::TEXT_ALIGN, StyleValue::keyword("center"));
        assert_eq!(
            scale.classes(&bag),
            vec!["bg-[rgba(0,0,0,0.5)]", "rounded", "text-base", "font-semibold", "text-center"]
        );
    }

    #[test]
    fn test_min_width_prefix() {
        assert_eq!(min_width_prefix(768, 768, "md"), "md");
        assert_eq!(min_width_prefix(600, 768, "md"), "min-[600px]");
    }
}
