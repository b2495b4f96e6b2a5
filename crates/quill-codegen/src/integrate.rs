//! Splicing caller-supplied fragments into generated output.
//!
//! Integration never fails a request. When a fragment cannot be placed, both
//! outputs are returned exactly as generated and the problem is reported as
//! a warning.

use crate::generators::indent_lines;
use crate::options::{CustomCode, MarkupDialect};
use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

fn jsx_body_open() -> &'static Regex {
    static JSX_BODY_OPEN: OnceLock<Regex> = OnceLock::new();
    JSX_BODY_OPEN.get_or_init(|| {
        Regex::new(r"export default function \w+\([^)]*\)\s*\{")
            .expect("BUG: invalid JSX_BODY_OPEN regex literal")
    })
}

fn template_open() -> &'static Regex {
    static TEMPLATE_OPEN: OnceLock<Regex> = OnceLock::new();
    TEMPLATE_OPEN
        .get_or_init(|| Regex::new(r"<template>").expect("BUG: invalid TEMPLATE_OPEN regex literal"))
}

fn html_body_open() -> &'static Regex {
    static HTML_BODY_OPEN: OnceLock<Regex> = OnceLock::new();
    HTML_BODY_OPEN
        .get_or_init(|| Regex::new(r"<body[^>]*>").expect("BUG: invalid HTML_BODY_OPEN regex literal"))
}

fn framework_import() -> &'static Regex {
    static FRAMEWORK_IMPORT: OnceLock<Regex> = OnceLock::new();
    FRAMEWORK_IMPORT.get_or_init(|| {
        Regex::new(r#"(?m)^import .* from ['"](react|vue)['"];?[ \t]*$"#)
            .expect("BUG: invalid FRAMEWORK_IMPORT regex literal")
    })
}

fn script_open() -> &'static Regex {
    static SCRIPT_OPEN: OnceLock<Regex> = OnceLock::new();
    SCRIPT_OPEN.get_or_init(|| {
        Regex::new(r"(?m)^<script[^>]*>[ \t]*$").expect("BUG: invalid SCRIPT_OPEN regex literal")
    })
}

const UTILITIES_BANNER: &str = "// Custom utilities";
const STYLES_BANNER: &str = "/* Custom styles */";
const ADVANCED_STYLES_BANNER: &str = "/* Advanced styles */";

/// Warning recorded when styles arrive without the markup they target.
pub const ORPHAN_STYLES_WARNING: &str = "custom styles without corresponding markup";

#[derive(Debug, Error)]
enum SpliceError {
    #[error("no component body opening found in {0} markup")]
    MissingBodyOpening(MarkupDialect),
    #[error("no closing </body> tag to attach custom utilities to")]
    MissingBodyClose,
    #[error("no <script> block to attach custom utilities to")]
    MissingScriptBlock,
}

/// Outputs after integration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Integration {
    pub markup: String,
    pub stylesheet: String,
    pub warnings: Vec<String>,
}

/// Splices [`CustomCode`] fragments into emitted markup and stylesheets.
#[derive(Debug, Clone, Copy, Default)]
pub struct Integrator;

impl Integrator {
    pub fn new() -> Self {
        Self
    }

    pub fn integrate(
        &self,
        markup: &str,
        stylesheet: &str,
        custom: &CustomCode,
        dialect: MarkupDialect,
    ) -> Integration {
        let mut warnings = Vec::new();
        if custom.is_empty() {
            return Integration {
                markup: markup.to_string(),
                stylesheet: stylesheet.to_string(),
                warnings,
            };
        }

        let has_markup = non_blank(&custom.markup).is_some();
        let has_styles = non_blank(&custom.styles).is_some() || non_blank(&custom.advanced_styles).is_some();
        if has_styles && !has_markup {
            log::warn!("{}", ORPHAN_STYLES_WARNING);
            warnings.push(ORPHAN_STYLES_WARNING.to_string());
        }

        match self.splice(markup, stylesheet, custom, dialect) {
            Ok((markup, stylesheet)) => Integration {
                markup,
                stylesheet,
                warnings,
            },
            Err(err) => {
                log::warn!("custom code not integrated: {}", err);
                warnings.push(format!("custom code not integrated: {}", err));
                Integration {
                    markup: markup.to_string(),
                    stylesheet: stylesheet.to_string(),
                    warnings,
                }
            }
        }
    }

    fn splice(
        &self,
        markup: &str,
        stylesheet: &str,
        custom: &CustomCode,
        dialect: MarkupDialect,
    ) -> Result<(String, String), SpliceError> {
        let mut markup = markup.to_string();

        if let Some(fragment) = non_blank(&custom.markup) {
            markup = insert_markup(&markup, fragment, dialect)?;
        }
        if let Some(imports) = non_blank(&custom.imports) {
            markup = insert_imports(&markup, imports, dialect);
        }
        if let Some(utilities) = non_blank(&custom.utilities) {
            markup = append_utilities(&markup, utilities, dialect)?;
        }

        let mut stylesheet = stylesheet.to_string();
        for (banner, fragment) in [
            (STYLES_BANNER, non_blank(&custom.styles)),
            (ADVANCED_STYLES_BANNER, non_blank(&custom.advanced_styles)),
        ] {
            if let Some(fragment) = fragment {
                append_block(&mut stylesheet, banner, fragment);
            }
        }

        Ok((markup, stylesheet))
    }
}

fn non_blank(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim_end).filter(|s| !s.trim().is_empty())
}

fn insert_markup(markup: &str, fragment: &str, dialect: MarkupDialect) -> Result<String, SpliceError> {
    let pattern = match dialect {
        MarkupDialect::Componentized => jsx_body_open(),
        MarkupDialect::Templated => template_open(),
        MarkupDialect::Static => html_body_open(),
    };
    let found = pattern
        .find(markup)
        .ok_or(SpliceError::MissingBodyOpening(dialect))?;
    Ok(insert_at(markup, found.end(), &format!("\n{}", indent_lines(fragment, 2))))
}

fn insert_imports(markup: &str, imports: &str, dialect: MarkupDialect) -> String {
    let anchor = framework_import().find(markup).or_else(|| match dialect {
        MarkupDialect::Templated => script_open().find(markup),
        _ => None,
    });
    match anchor {
        Some(found) => insert_at(markup, found.end(), &format!("\n{}", imports)),
        None => format!("{}\n{}", imports, markup),
    }
}

fn append_utilities(markup: &str, utilities: &str, dialect: MarkupDialect) -> Result<String, SpliceError> {
    match dialect {
        MarkupDialect::Static => {
            let close = markup.rfind("</body>").ok_or(SpliceError::MissingBodyClose)?;
            let block = format!(
                "<script>\n{}\n{}\n</script>\n",
                UTILITIES_BANNER,
                utilities
            );
            Ok(insert_at(markup, close, &block))
        }
        // Utilities close out the `<script setup>` block.
        MarkupDialect::Templated => {
            let open = script_open().find(markup).ok_or(SpliceError::MissingScriptBlock)?;
            let close = markup[open.end()..]
                .find("</script>")
                .map(|at| open.end() + at)
                .ok_or(SpliceError::MissingScriptBlock)?;
            let lead = if markup[..close].ends_with('\n') { "\n" } else { "\n\n" };
            let block = format!("{}{}\n{}\n", lead, UTILITIES_BANNER, utilities);
            Ok(insert_at(markup, close, &block))
        }
        MarkupDialect::Componentized => {
            let mut markup = markup.to_string();
            append_block(&mut markup, UTILITIES_BANNER, utilities);
            Ok(markup)
        }
    }
}

fn append_block(target: &mut String, banner: &str, fragment: &str) {
    if !target.is_empty() && !target.ends_with('\n') {
        target.push('\n');
    }
    if !target.is_empty() {
        target.push('\n');
    }
    target.push_str(banner);
    target.push('\n');
    target.push_str(fragment);
    target.push('\n');
}

fn insert_at(text: &str, at: usize, insertion: &str) -> String {
    let mut out = String::with_capacity(text.len() + insertion.len());
    out.push_str(&text[..at]);
    out.push_str(insertion);
    out.push_str(&text[at..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const JSX: &str = "import React from 'react';\nimport './Card.css';\n\n\
                       export default function Card(props) {\n  return (\n    <div className=\"card\" />\n  );\n}\n";

    fn custom() -> CustomCode {
        CustomCode::default()
    }

    #[test]
    fn test_empty_custom_code_is_identity() {
        let out = Integrator::new().integrate(JSX, ".card {}\n", &custom(), MarkupDialect::Componentized);
        assert_eq!(out.markup, JSX);
        assert_eq!(out.stylesheet, ".card {}\n");
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_markup_after_function_opening() {
        let code = CustomCode {
            markup: Some("const [open, setOpen] = React.useState(false);".to_string()),
            ..custom()
        };
        let out = Integrator::new().integrate(JSX, "", &code, MarkupDialect::Componentized);
        assert!(out.markup.contains(
            "export default function Card(props) {\n  const [open, setOpen] = React.useState(false);\n  return ("
        ));
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_imports_after_framework_import() {
        let code = CustomCode {
            imports: Some("import clsx from 'clsx';".to_string()),
            ..custom()
        };
        let out = Integrator::new().integrate(JSX, "", &code, MarkupDialect::Componentized);
        assert!(out
            .markup
            .starts_with("import React from 'react';\nimport clsx from 'clsx';\nimport './Card.css';"));

        let bare = Integrator::new().integrate("<div />\n", "", &code, MarkupDialect::Componentized);
        assert_eq!(bare.markup, "import clsx from 'clsx';\n<div />\n");
    }

    #[test]
    fn test_imports_in_script_setup() {
        let sfc = "<template>\n  <div />\n</template>\n\n<script setup lang=\"ts\">\ndefineProps<CardProps>();\n</script>\n";
        let code = CustomCode {
            imports: Some("import { ref } from 'vue';".to_string()),
            ..custom()
        };
        let out = Integrator::new().integrate(sfc, "", &code, MarkupDialect::Templated);
        assert!(out
            .markup
            .contains("<script setup lang=\"ts\">\nimport { ref } from 'vue';\ndefineProps<CardProps>();"));
    }

    #[test]
    fn test_utilities_and_styles_banners() {
        let code = CustomCode {
            markup: Some("<p>extra</p>".to_string()),
            utilities: Some("export const noop = () => {};".to_string()),
            styles: Some(".extra { color: red; }".to_string()),
            advanced_styles: Some("@keyframes spin {}".to_string()),
            ..custom()
        };
        let out = Integrator::new().integrate(JSX, ".card {}\n", &code, MarkupDialect::Componentized);
        assert!(out.markup.contains("{\n  <p>extra</p>\n  return ("));
        assert!(out.markup.ends_with("}\n\n// Custom utilities\nexport const noop = () => {};\n"));
        assert_eq!(
            out.stylesheet,
            ".card {}\n\n/* Custom styles */\n.extra { color: red; }\n\n/* Advanced styles */\n@keyframes spin {}\n"
        );
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_templated_utilities_inside_script_setup() {
        let sfc = "<template>\n  <div />\n</template>\n\n<script setup>\ndefineEmits(['click']);\n</script>\n\n<style>\n.card {}\n</style>\n";
        let code = CustomCode {
            utilities: Some("export const noop = () => {};".to_string()),
            ..custom()
        };
        let out = Integrator::new().integrate(sfc, "", &code, MarkupDialect::Templated);
        assert!(out.markup.contains(
            "<script setup>\ndefineEmits(['click']);\n\n// Custom utilities\nexport const noop = () => {};\n</script>"
        ));
        assert!(out.markup.ends_with("</style>\n"));
        assert!(out.warnings.is_empty());

        let bare = "<template>\n  <div />\n</template>\n";
        let out = Integrator::new().integrate(bare, "", &code, MarkupDialect::Templated);
        assert_eq!(out.markup, bare);
        assert_eq!(out.warnings.len(), 1);
        assert!(out.warnings[0].contains("no <script> block"));
    }

    #[test]
    fn test_styles_without_markup_warns() {
        let code = CustomCode {
            styles: Some(".x { top: 0; }".to_string()),
            ..custom()
        };
        let out = Integrator::new().integrate(JSX, ".card {}\n", &code, MarkupDialect::Componentized);
        assert_eq!(out.warnings, vec![ORPHAN_STYLES_WARNING.to_string()]);
        assert!(out.stylesheet.ends_with("/* Custom styles */\n.x { top: 0; }\n"));
    }

    #[test]
    fn test_failed_splice_leaves_outputs_unchanged() {
        let code = CustomCode {
            markup: Some("<p>extra</p>".to_string()),
            styles: Some(".x {}".to_string()),
            ..custom()
        };
        let out = Integrator::new().integrate("<div />", ".card {}\n", &code, MarkupDialect::Static);
        assert_eq!(out.markup, "<div />");
        assert_eq!(out.stylesheet, ".card {}\n");
        assert_eq!(out.warnings.len(), 1);
        assert!(out.warnings[0].contains("no component body opening found in static markup"));
    }

    #[test]
    fn test_static_utilities_before_body_close() {
        let html = "<html>\n<body>\n  <div></div>\n</body>\n</html>\n";
        let code = CustomCode {
            utilities: Some("console.log('ready');".to_string()),
            ..custom()
        };
        let out = Integrator::new().integrate(html, "", &code, MarkupDialect::Static);
        assert!(out
            .markup
            .contains("<script>\n// Custom utilities\nconsole.log('ready');\n</script>\n</body>"));
    }
}
