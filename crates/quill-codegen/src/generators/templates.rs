//! Template engine for component files.

use crate::error::{CodegenError, Result};
use handlebars::{handlebars_helper, no_escape, Handlebars};
use serde::Serialize;
use std::fmt;

pub const JSX_COMPONENT: &str = "jsx_component";
pub const VUE_COMPONENT: &str = "vue_component";
pub const HTML_DOCUMENT: &str = "html_document";

const JSX_TEMPLATE: &str = "{{preamble}}

export default function {{name}}({{params}}) {
  return (
{{indent body 4}}
  );
}
";

const VUE_TEMPLATE: &str = "<template>
{{indent body 2}}
</template>

<script setup{{script_attrs}}>
{{script}}
</script>
{{style_block}}";

const HTML_TEMPLATE: &str = "<!DOCTYPE html>
<html lang=\"en\">
<head>
  <meta charset=\"UTF-8\">
  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">
  <title>{{title}}</title>
  {{head}}
</head>
<body>
{{indent body 2}}
</body>
</html>
";

handlebars_helper!(indent: |content: str, spaces: u64| indent_lines(content, spaces as usize));

/// Prefix every non-blank line with `spaces` spaces.
pub fn indent_lines(content: &str, spaces: usize) -> String {
    let pad = " ".repeat(spaces);
    content
        .lines()
        .map(|line| {
            if line.trim().is_empty() {
                line.to_string()
            } else {
                format!("{}{}", pad, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Handlebars registry with the component templates and the `indent` helper.
///
/// Output is code, not HTML, so escaping is disabled.
pub struct TemplateEngine {
    handlebars: Handlebars<'static>,
}

impl TemplateEngine {
    /// Create an engine with only the helpers registered.
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.register_escape_fn(no_escape);
        Self::register_helpers(&mut handlebars);
        Self { handlebars }
    }

    /// Create an engine with the component file templates registered.
    pub fn with_component_templates() -> Result<Self> {
        let mut engine = Self::new();
        engine.register_template(JSX_COMPONENT, JSX_TEMPLATE)?;
        engine.register_template(VUE_COMPONENT, VUE_TEMPLATE)?;
        engine.register_template(HTML_DOCUMENT, HTML_TEMPLATE)?;
        Ok(engine)
    }

    pub fn register_template(&mut self, name: &str, template: &str) -> Result<()> {
        self.handlebars
            .register_template_string(name, template)
            .map_err(CodegenError::InvalidTemplate)?;
        Ok(())
    }

    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String> {
        self.handlebars
            .render(name, data)
            .map_err(CodegenError::TemplateError)
    }

    /// Render a template string directly.
    pub fn render_string<T: Serialize>(&self, template: &str, data: &T) -> Result<String> {
        self.handlebars
            .render_template(template, data)
            .map_err(CodegenError::TemplateError)
    }

    fn register_helpers(handlebars: &mut Handlebars) {
        handlebars.register_helper("indent", Box::new(indent));
    }
}

impl fmt::Debug for TemplateEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateEngine").finish_non_exhaustive()
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_simple() {
        let mut engine = TemplateEngine::new();
        engine.register_template("hello", "Hello, {{name}}!").unwrap();
        let result = engine.render("hello", &json!({"name": "<World>"})).unwrap();
        assert_eq!(result, "Hello, <World>!");
    }

    #[test]
    fn test_indent_helper() {
        let engine = TemplateEngine::new();
        let result = engine
            .render_string("{{indent body 2}}", &json!({"body": "<a>\n\n  <b />\n</a>"}))
            .unwrap();
        assert_eq!(result, "  <a>\n\n    <b />\n  </a>");
    }

    #[test]
    fn test_component_templates_register() {
        let engine = TemplateEngine::with_component_templates().unwrap();
        let html = engine
            .render(
                HTML_DOCUMENT,
                &json!({"title": "Hero", "head": "<link rel=\"stylesheet\" href=\"Hero.css\">", "body": "<div></div>"}),
            )
            .unwrap();
        assert!(html.contains("<body>\n  <div></div>\n</body>"));
    }
}
