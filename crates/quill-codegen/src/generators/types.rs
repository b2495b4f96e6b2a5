//! Prop types derived from the component classification.

use crate::analyzer::{ComponentCategory, ComponentClassification};
use serde::Serialize;

/// One declared prop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropSpec {
    pub name: &'static str,
    /// TypeScript type expression.
    pub ty: &'static str,
}

impl PropSpec {
    const fn new(name: &'static str, ty: &'static str) -> Self {
        Self { name, ty }
    }
}

/// Props a component of this classification accepts. All optional.
pub fn props_for(classification: &ComponentClassification) -> Vec<PropSpec> {
    let mut props = vec![PropSpec::new("className", "string")];
    if classification.has_interactivity {
        props.push(PropSpec::new("onClick", "() => void"));
    }
    match classification.category {
        ComponentCategory::Button => {
            props.push(PropSpec::new("disabled", "boolean"));
            props.push(PropSpec::new("variant", "'primary' | 'secondary' | 'outline'"));
        }
        ComponentCategory::Input => {
            props.push(PropSpec::new("value", "string"));
            props.push(PropSpec::new("onChange", "(value: string) => void"));
            props.push(PropSpec::new("placeholder", "string"));
        }
        _ => {}
    }
    props
}

/// `interface {Name}Props { ... }` body lines, without a trailing newline.
pub fn interface(component: &str, props: &[PropSpec]) -> String {
    let mut lines = vec![format!("interface {}Props {{", component)];
    lines.extend(props.iter().map(|p| format!("  {}?: {};", p.name, p.ty)));
    lines.push("}".to_string());
    lines.join("\n")
}

/// Standalone declaration file content.
pub fn declaration_file(component: &str, props: &[PropSpec]) -> String {
    format!("export {}\n", interface(component, props))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::Classifier;
    use quill_core::{NodeKind, SceneNode};

    #[test]
    fn test_button_props() {
        let node = SceneNode::new("1", "Submit Button", NodeKind::Frame);
        let classification = Classifier::default().classify(&node);
        let names: Vec<&str> = props_for(&classification).iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["className", "onClick", "disabled", "variant"]);
    }

    #[test]
    fn test_input_props() {
        let node = SceneNode::new("1", "Email Field", NodeKind::Frame);
        let classification = Classifier::default().classify(&node);
        let names: Vec<&str> = props_for(&classification).iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["className", "value", "onChange", "placeholder"]);
    }

    #[test]
    fn test_declaration_file() {
        let props = vec![PropSpec::new("className", "string")];
        assert_eq!(
            declaration_file("Hero", &props),
            "export interface HeroProps {\n  className?: string;\n}\n"
        );
    }
}
