//! Function component (JSX) markup.

use super::templates::{TemplateEngine, JSX_COMPONENT};
use super::types::interface;
use super::ComponentParts;
use crate::error::Result;
use crate::options::StyleDialect;
use serde_json::json;

pub(crate) fn render(engine: &TemplateEngine, parts: &ComponentParts<'_>) -> Result<String> {
    let name = parts.name;
    let mut imports = vec!["import React from 'react';".to_string()];
    match parts.style {
        StyleDialect::Utility => {}
        StyleDialect::Plain => imports.push(format!("import './{}.css';", name)),
        StyleDialect::ScopedModule => imports.push(format!("import styles from './{}.module.css';", name)),
        StyleDialect::CssInJs => imports.push("import styled from 'styled-components';".to_string()),
    }

    let mut preamble = vec![imports.join("\n")];
    if parts.style == StyleDialect::CssInJs && !parts.stylesheet.is_empty() {
        preamble.push(parts.stylesheet.trim_end().to_string());
    }
    if parts.typescript {
        preamble.push(format!("export {}", interface(name, parts.props)));
    }

    let params = if parts.typescript {
        format!("props: {}Props", name)
    } else {
        "props".to_string()
    };

    engine.render(
        JSX_COMPONENT,
        &json!({
            "preamble": preamble.join("\n\n"),
            "name": name,
            "params": params,
            "body": parts.body,
        }),
    )
}
