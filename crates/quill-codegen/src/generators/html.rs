//! Static HTML document markup.

use super::templates::{TemplateEngine, HTML_DOCUMENT};
use super::ComponentParts;
use crate::error::Result;
use crate::options::StyleDialect;
use serde_json::json;

pub(crate) fn render(engine: &TemplateEngine, parts: &ComponentParts<'_>) -> Result<String> {
    let head = match parts.style {
        StyleDialect::Utility => "<script src=\"https://cdn.tailwindcss.com\"></script>".to_string(),
        _ => format!("<link rel=\"stylesheet\" href=\"{}.css\">", parts.name),
    };
    engine.render(
        HTML_DOCUMENT,
        &json!({
            "title": parts.name,
            "head": head,
            "body": parts.body,
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document() {
        let engine = TemplateEngine::with_component_templates().unwrap();
        let parts = ComponentParts {
            name: "Hero",
            body: "<section class=\"hero\">\n  <h2 class=\"title\">Hi</h2>\n</section>".to_string(),
            props: &[],
            typescript: false,
            style: StyleDialect::Plain,
            stylesheet: "",
            interactive: false,
        };
        let html = render(&engine, &parts).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>\n<html lang=\"en\">"));
        assert!(html.contains("  <title>Hero</title>\n  <link rel=\"stylesheet\" href=\"Hero.css\">\n</head>"));
        assert!(html.contains("<body>\n  <section class=\"hero\">\n    <h2 class=\"title\">Hi</h2>\n  </section>\n</body>"));
        assert!(html.ends_with("</html>\n"));
    }
}
