//! Single-file component markup.

use super::templates::{TemplateEngine, VUE_COMPONENT};
use super::types::interface;
use super::ComponentParts;
use crate::error::Result;
use crate::options::StyleDialect;
use serde_json::json;

fn script(parts: &ComponentParts<'_>) -> String {
    let mut lines = Vec::new();
    if parts.typescript {
        lines.push(interface(parts.name, parts.props));
        lines.push(String::new());
        lines.push(format!("defineProps<{}Props>();", parts.name));
        if parts.interactive {
            lines.push("defineEmits<{ (e: 'click'): void }>();".to_string());
        }
    } else {
        let names: Vec<String> = parts.props.iter().map(|p| format!("'{}'", p.name)).collect();
        lines.push(format!("defineProps([{}]);", names.join(", ")));
        if parts.interactive {
            lines.push("defineEmits(['click']);".to_string());
        }
    }
    lines.join("\n")
}

fn style_block(parts: &ComponentParts<'_>) -> String {
    let attribute = match parts.style {
        StyleDialect::Plain => "scoped",
        StyleDialect::ScopedModule => "module",
        StyleDialect::Utility | StyleDialect::CssInJs => return String::new(),
    };
    if parts.stylesheet.is_empty() {
        return String::new();
    }
    format!("\n<style {}>\n{}</style>\n", attribute, parts.stylesheet)
}

pub(crate) fn render(engine: &TemplateEngine, parts: &ComponentParts<'_>) -> Result<String> {
    let script_attrs = if parts.typescript { " lang=\"ts\"" } else { "" };
    engine.render(
        VUE_COMPONENT,
        &json!({
            "body": parts.body,
            "script_attrs": script_attrs,
            "script": script(parts),
            "style_block": style_block(parts),
        }),
    )
}
