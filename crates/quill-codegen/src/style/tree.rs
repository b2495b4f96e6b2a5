//! The styled tree: scene nodes paired with their classification, resolved
//! styles and generated class names.

use super::{StyleBag, StyleResolver};
use crate::analyzer::ComponentClassification;
use crate::naming::ClassNamer;
use crate::responsive::{ResponsiveGenerator, ResponsiveVariants};
use quill_core::SceneNode;

/// One node of the styled tree. Mirrors the scene subtree it was built from.
#[derive(Debug, Clone)]
pub struct StyledNode<'a> {
    pub node: &'a SceneNode,
    pub classification: &'a ComponentClassification,
    /// Kebab-case class name, unique within the tree.
    pub class_name: String,
    pub styles: StyleBag,
    /// Breakpoint variants, present when responsive output is requested.
    pub responsive: Option<ResponsiveVariants>,
    pub children: Vec<StyledNode<'a>>,
}

impl<'a> StyledNode<'a> {
    /// Build the styled tree for `node`. `classification` must mirror it.
    pub fn build(
        node: &'a SceneNode,
        classification: &'a ComponentClassification,
        resolver: &StyleResolver,
        responsive: Option<&ResponsiveGenerator>,
    ) -> Self {
        let mut namer = ClassNamer::new();
        Self::build_with(node, classification, resolver, responsive, &mut namer)
    }

    fn build_with(
        node: &'a SceneNode,
        classification: &'a ComponentClassification,
        resolver: &StyleResolver,
        responsive: Option<&ResponsiveGenerator>,
        namer: &mut ClassNamer,
    ) -> Self {
        let class_name = namer.class_for(&node.name, classification.category.as_str());
        let styles = resolver.resolve(node);
        let variants = responsive.map(|generator| generator.generate(node, &styles));

        let children = node
            .children
            .iter()
            .zip(&classification.children)
            .map(|(child, class)| Self::build_with(child, class, resolver, responsive, namer))
            .collect();

        Self {
            node,
            classification,
            class_name,
            styles,
            responsive: variants,
            children,
        }
    }

    /// Pre-order traversal of the styled tree.
    pub fn walk(&self) -> Vec<&StyledNode<'a>> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(styled) = stack.pop() {
            out.push(styled);
            stack.extend(styled.children.iter().rev());
        }
        out
    }

    pub fn has_responsive_design(&self) -> bool {
        self.responsive
            .as_ref()
            .map_or(false, |v| v.has_responsive_design)
    }
}
