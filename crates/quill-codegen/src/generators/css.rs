//! Rule-based stylesheet backends: plain classes, scoped modules and
//! styled wrappers.

use crate::naming::module_binding;
use crate::responsive::Breakpoints;
use crate::style::{StyleBag, StyledNode};
use convert_case::{Case, Casing};

/// `backgroundColor` -> `background-color`.
pub fn kebab_property(property: &str) -> String {
    property.to_case(Case::Kebab)
}

/// `property: value;` lines at the given indent.
pub fn declarations(bag: &StyleBag, indent: usize) -> Vec<String> {
    let spaces = " ".repeat(indent);
    bag.iter()
        .map(|(property, value)| format!("{}{}: {};", spaces, kebab_property(property), value))
        .collect()
}

fn rule(selector: &str, bag: &StyleBag, indent: usize) -> String {
    let spaces = " ".repeat(indent);
    let mut lines = vec![format!("{}{} {{", spaces, selector)];
    lines.extend(declarations(bag, indent + 2));
    lines.push(format!("{}}}", spaces));
    lines.join("\n")
}

/// Per-breakpoint overrides: media query plus the nodes whose variant
/// differs from their base styles.
struct MediaBlock<'t, 'a> {
    query: String,
    overrides: Vec<(&'t StyledNode<'a>, StyleBag)>,
}

/// Desktop-first overrides, widest breakpoint first so narrower ones win.
fn media_blocks<'t, 'a>(root: &'t StyledNode<'a>, breakpoints: Option<&Breakpoints>) -> Vec<MediaBlock<'t, 'a>> {
    let Some(breakpoints) = breakpoints else {
        return Vec::new();
    };
    if !root.has_responsive_design() {
        return Vec::new();
    }

    let nodes = root.walk();
    let mut blocks = Vec::new();
    for (max_width, pick) in [
        (breakpoints.tablet_max, Breakpoint::Tablet),
        (breakpoints.mobile_max, Breakpoint::Mobile),
    ] {
        let overrides: Vec<_> = nodes
            .iter()
            .filter_map(|styled| {
                let variants = styled.responsive.as_ref()?;
                let bag = match pick {
                    Breakpoint::Tablet => &variants.tablet,
                    Breakpoint::Mobile => &variants.mobile,
                };
                let diff = bag.diff(&styled.styles);
                (!diff.is_empty()).then_some((*styled, diff))
            })
            .collect();
        if !overrides.is_empty() {
            blocks.push(MediaBlock {
                query: format!("@media (max-width: {}px)", max_width),
                overrides,
            });
        }
    }
    blocks
}

#[derive(Clone, Copy)]
enum Breakpoint {
    Tablet,
    Mobile,
}

/// Class-rule stylesheet. `selector` maps a node to its rule selector.
fn class_stylesheet<F>(root: &StyledNode<'_>, breakpoints: Option<&Breakpoints>, selector: F) -> String
where
    F: Fn(&StyledNode<'_>) -> String,
{
    let mut blocks: Vec<String> = root
        .walk()
        .into_iter()
        .filter(|styled| !styled.styles.is_empty())
        .map(|styled| rule(&selector(styled), &styled.styles, 0))
        .collect();

    for block in media_blocks(root, breakpoints) {
        let mut lines = vec![format!("{} {{", block.query)];
        for (styled, diff) in &block.overrides {
            lines.push(rule(&selector(*styled), diff, 2));
        }
        lines.push("}".to_string());
        blocks.push(lines.join("\n"));
    }

    if blocks.is_empty() {
        return String::new();
    }
    format!("{}\n", blocks.join("\n\n"))
}

/// Plain stylesheet with kebab-case class selectors.
pub fn plain(root: &StyledNode<'_>, breakpoints: Option<&Breakpoints>) -> String {
    class_stylesheet(root, breakpoints, |styled| format!(".{}", styled.class_name))
}

/// Scoped module with camelCase class selectors.
pub fn scoped_module(root: &StyledNode<'_>, breakpoints: Option<&Breakpoints>) -> String {
    class_stylesheet(root, breakpoints, |styled| format!(".{}", module_binding(&styled.class_name)))
}

/// Styled wrapper for the root element with nested child selectors.
pub fn styled_root(
    root: &StyledNode<'_>,
    component: &str,
    tag: &str,
    breakpoints: Option<&Breakpoints>,
) -> String {
    let child_selector = |styled: &StyledNode<'_>| format!("& .{}", styled.class_name);
    let is_root = |styled: &StyledNode<'_>| std::ptr::eq(styled.node, root.node);

    let mut sections: Vec<String> = Vec::new();
    let base = declarations(&root.styles, 2);
    if !base.is_empty() {
        sections.push(base.join("\n"));
    }
    for styled in root.walk().into_iter().skip(1) {
        if !styled.styles.is_empty() {
            sections.push(rule(&child_selector(styled), &styled.styles, 2));
        }
    }

    for block in media_blocks(root, breakpoints) {
        let mut lines = vec![format!("  {} {{", block.query)];
        for (styled, diff) in &block.overrides {
            if is_root(*styled) {
                lines.extend(declarations(diff, 4));
            } else {
                lines.push(rule(&child_selector(*styled), diff, 4));
            }
        }
        lines.push("  }".to_string());
        sections.push(lines.join("\n"));
    }

    format!(
        "const {}Root = styled.{}`\n{}\n`;\n",
        component,
        tag,
        sections.join("\n\n")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::Classifier;
    use crate::responsive::ResponsiveGenerator;
    use crate::style::StyleResolver;
    use quill_core::{Color, LayoutMode, NodeKind, Padding, Paint, SceneNode, Typography};

    fn sample() -> SceneNode {
        SceneNode::new("1", "Promo Card", NodeKind::Frame)
            .with_auto_layout(LayoutMode::Vertical, 8.0, Padding::uniform(32.0))
            .with_fill(Paint::solid(Color::WHITE))
            .with_child(
                SceneNode::text("2", "Headline", "Sale").with_typography(Typography::new("Inter", 30.0)),
            )
    }

    #[test]
    fn test_plain_stylesheet() {
        let node = SceneNode::new("1", "Box", NodeKind::Frame)
            .with_fill(Paint::solid(Color::WHITE))
            .with_corner_radius(8.0);
        let classification = Classifier::default().classify(&node);
        let styled = StyledNode::build(&node, &classification, &StyleResolver::new(), None);
        assert_eq!(
            plain(&styled, None),
            ".box {\n  background-color: rgba(255, 255, 255, 1);\n  border-radius: 8px;\n}\n"
        );
    }

    #[test]
    fn test_media_blocks_carry_only_differences() {
        let node = sample();
        let classification = Classifier::default().classify(&node);
        let responsive = ResponsiveGenerator::default();
        let styled = StyledNode::build(&node, &classification, &StyleResolver::new(), Some(&responsive));
        let css = scoped_module(&styled, Some(&Breakpoints::default()));

        assert!(css.contains(".promoCard {"));
        assert!(!css.contains("max-width: 1023px"));
        let media = css.split("@media (max-width: 767px) {").nth(1).unwrap();
        assert!(media.contains("  .promoCard {\n    padding: 16px;\n  }"));
        assert!(media.contains("  .headline {\n    font-size: 24px;\n  }"));
        assert!(!media.contains("background-color"));
    }

    #[test]
    fn test_styled_root() {
        let node = sample();
        let classification = Classifier::default().classify(&node);
        let responsive = ResponsiveGenerator::default();
        let styled = StyledNode::build(&node, &classification, &StyleResolver::new(), Some(&responsive));
        let code = styled_root(&styled, "PromoCard", "div", Some(&Breakpoints::default()));

        assert!(code.starts_with("const PromoCardRoot = styled.div`\n  display: flex;"));
        assert!(code.contains("  & .headline {\n    font-family: Inter;\n    font-size: 30px;\n  }"));
        assert!(code.contains("  @media (max-width: 767px) {\n    padding: 16px;\n    & .headline {"));
        assert!(code.ends_with("`;\n"));
    }
}
