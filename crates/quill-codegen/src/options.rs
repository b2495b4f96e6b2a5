//! Generation options supplied by the caller.

use crate::audit::AuditProfile;
use crate::error::{CodegenError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Markup dialect of the primary output.
///
/// Deserialization goes through [`FromStr`], so aliases and unknown names
/// behave the same from JSON as from a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum MarkupDialect {
    /// Function component with embedded expressions (JSX).
    #[serde(rename = "componentized")]
    Componentized,
    /// Single-file component with a `<template>` block.
    #[serde(rename = "templated")]
    Templated,
    /// Static HTML document.
    #[serde(rename = "static")]
    Static,
}

impl MarkupDialect {
    pub const ALL: [MarkupDialect; 3] = [Self::Componentized, Self::Templated, Self::Static];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Componentized => "componentized",
            Self::Templated => "templated",
            Self::Static => "static",
        }
    }
}

impl FromStr for MarkupDialect {
    type Err = CodegenError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "componentized" | "react" | "jsx" => Ok(Self::Componentized),
            "templated" | "vue" => Ok(Self::Templated),
            "static" | "html" => Ok(Self::Static),
            other => Err(CodegenError::UnknownDialect {
                kind: "markup",
                value: other.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for MarkupDialect {
    type Error = CodegenError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl fmt::Display for MarkupDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stylesheet dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum StyleDialect {
    /// Utility classes applied in markup.
    #[serde(rename = "utility")]
    Utility,
    /// Scoped class rules (CSS modules).
    #[serde(rename = "scoped-module")]
    ScopedModule,
    /// Styled wrapper with nested selectors.
    #[serde(rename = "css-in-js")]
    CssInJs,
    /// Plain class rules.
    #[serde(rename = "plain")]
    Plain,
}

impl StyleDialect {
    pub const ALL: [StyleDialect; 4] = [Self::Utility, Self::ScopedModule, Self::CssInJs, Self::Plain];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Utility => "utility",
            Self::ScopedModule => "scoped-module",
            Self::CssInJs => "css-in-js",
            Self::Plain => "plain",
        }
    }
}

impl FromStr for StyleDialect {
    type Err = CodegenError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "utility" | "tailwind" => Ok(Self::Utility),
            "scoped-module" | "css-modules" | "scoped" => Ok(Self::ScopedModule),
            "css-in-js" | "styled-components" => Ok(Self::CssInJs),
            "plain" | "css" => Ok(Self::Plain),
            other => Err(CodegenError::UnknownDialect {
                kind: "stylesheet",
                value: other.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for StyleDialect {
    type Error = CodegenError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl fmt::Display for StyleDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated markup × stylesheet pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dialect {
    pub markup: MarkupDialect,
    pub style: StyleDialect,
}

impl Dialect {
    /// Validate a pairing. Styled wrappers only exist for componentized
    /// markup.
    pub fn new(markup: MarkupDialect, style: StyleDialect) -> Result<Self> {
        if style == StyleDialect::CssInJs && markup != MarkupDialect::Componentized {
            return Err(CodegenError::UnsupportedCombination {
                markup: markup.as_str(),
                style: style.as_str(),
            });
        }
        Ok(Self { markup, style })
    }

    /// Every supported pairing.
    pub fn all() -> Vec<Dialect> {
        MarkupDialect::ALL
            .into_iter()
            .flat_map(|m| StyleDialect::ALL.into_iter().filter_map(move |s| Dialect::new(m, s).ok()))
            .collect()
    }

    pub fn from_options(options: &GenerationOptions) -> Result<Self> {
        let markup = options.markup.ok_or(CodegenError::MissingDialect("markup"))?;
        let style = options.stylesheet.ok_or(CodegenError::MissingDialect("stylesheet"))?;
        Self::new(markup, style)
    }
}

/// Options controlling a generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationOptions {
    pub markup: Option<MarkupDialect>,
    pub stylesheet: Option<StyleDialect>,
    /// Emit static type declarations.
    pub typescript: bool,
    pub include_accessibility: bool,
    pub include_responsive: bool,
    /// Add lazy-loading hints to image elements.
    pub optimize_images: bool,
    pub audit_profile: AuditProfile,
    /// Breakpoint name -> max width override.
    pub breakpoints: Option<BTreeMap<String, u32>>,
}

impl GenerationOptions {
    pub fn new(markup: MarkupDialect, stylesheet: StyleDialect) -> Self {
        Self {
            markup: Some(markup),
            stylesheet: Some(stylesheet),
            ..Self::default()
        }
    }

    /// Parse options from JSON. Unrecognized dialect names are reported
    /// as [`CodegenError::UnknownDialect`], not as JSON errors.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if let Some(name) = value.get("markup").and_then(serde_json::Value::as_str) {
            name.parse::<MarkupDialect>()?;
        }
        if let Some(name) = value.get("stylesheet").and_then(serde_json::Value::as_str) {
            name.parse::<StyleDialect>()?;
        }
        Ok(serde_json::from_value(value)?)
    }

    pub fn with_typescript(mut self, enabled: bool) -> Self {
        self.typescript = enabled;
        self
    }

    pub fn with_accessibility(mut self, enabled: bool) -> Self {
        self.include_accessibility = enabled;
        self
    }

    pub fn with_responsive(mut self, enabled: bool) -> Self {
        self.include_responsive = enabled;
        self
    }

    pub fn with_image_optimization(mut self, enabled: bool) -> Self {
        self.optimize_images = enabled;
        self
    }

    pub fn with_audit_profile(mut self, profile: AuditProfile) -> Self {
        self.audit_profile = profile;
        self
    }

    pub fn with_breakpoint(mut self, name: impl Into<String>, max_width: u32) -> Self {
        self.breakpoints
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), max_width);
        self
    }
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            markup: None,
            stylesheet: None,
            typescript: true,
            include_accessibility: true,
            include_responsive: true,
            optimize_images: false,
            audit_profile: AuditProfile::Full,
            breakpoints: None,
        }
    }
}

/// Caller-supplied fragments spliced into generated output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomCode {
    pub markup: Option<String>,
    pub styles: Option<String>,
    pub advanced_styles: Option<String>,
    pub imports: Option<String>,
    pub utilities: Option<String>,
}

impl CustomCode {
    pub fn is_empty(&self) -> bool {
        [
            &self.markup,
            &self.styles,
            &self.advanced_styles,
            &self.imports,
            &self.utilities,
        ]
        .iter()
        .all(|f| f.as_deref().map_or(true, |s| s.trim().is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dialect_names() {
        assert_eq!("react".parse::<MarkupDialect>().unwrap(), MarkupDialect::Componentized);
        assert_eq!("HTML".parse::<MarkupDialect>().unwrap(), MarkupDialect::Static);
        assert_eq!("tailwind".parse::<StyleDialect>().unwrap(), StyleDialect::Utility);
        assert_eq!(
            "styled-components".parse::<StyleDialect>().unwrap(),
            StyleDialect::CssInJs
        );
    }

    #[test]
    fn test_unknown_dialect_is_configuration_error() {
        let err = "svelte".parse::<MarkupDialect>().unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("svelte"));
    }

    #[test]
    fn test_missing_dialect() {
        let options = GenerationOptions::default();
        let err = Dialect::from_options(&options).unwrap_err();
        assert!(matches!(err, CodegenError::MissingDialect("markup")));
    }

    #[test]
    fn test_css_in_js_requires_componentized() {
        assert!(Dialect::new(MarkupDialect::Componentized, StyleDialect::CssInJs).is_ok());
        assert!(matches!(
            Dialect::new(MarkupDialect::Static, StyleDialect::CssInJs),
            Err(CodegenError::UnsupportedCombination { .. })
        ));
        assert_eq!(Dialect::all().len(), 10);
    }

    #[test]
    fn test_options_from_json() {
        let options = GenerationOptions::from_json(
            r#"{"markup": "vue", "stylesheet": "css-modules", "typescript": false,
                "breakpoints": {"mobile": 600}}"#,
        )
        .unwrap();
        assert_eq!(options.markup, Some(MarkupDialect::Templated));
        assert_eq!(options.stylesheet, Some(StyleDialect::ScopedModule));
        assert!(!options.typescript);
        assert!(options.include_accessibility);
        assert_eq!(options.breakpoints.unwrap()["mobile"], 600);
    }

    #[test]
    fn test_unknown_dialect_from_json() {
        let err = GenerationOptions::from_json(r#"{"markup": "svelte", "stylesheet": "plain"}"#).unwrap_err();
        assert!(matches!(err, CodegenError::UnknownDialect { kind: "markup", .. }));
        assert!(err.is_configuration());

        let err = GenerationOptions::from_json(r#"{"markup": "react", "stylesheet": "sass"}"#).unwrap_err();
        assert!(matches!(err, CodegenError::UnknownDialect { kind: "stylesheet", .. }));
        assert!(err.is_configuration());

        let options = GenerationOptions::from_json(r#"{"markup": "React", "stylesheet": "Tailwind"}"#).unwrap();
        assert_eq!(options.markup, Some(MarkupDialect::Componentized));
        assert_eq!(options.stylesheet, Some(StyleDialect::Utility));

        let err = GenerationOptions::from_json(r#"{"markup": "#).unwrap_err();
        assert!(!err.is_configuration());
    }

    #[test]
    fn test_options_round_trip_canonical_names() {
        let options = GenerationOptions::new(MarkupDialect::Templated, StyleDialect::ScopedModule);
        let json = serde_json::to_string(&options).unwrap();
        assert!(json.contains(r#""markup":"templated""#));
        assert!(json.contains(r#""stylesheet":"scoped-module""#));
        assert_eq!(GenerationOptions::from_json(&json).unwrap(), options);
    }

    #[test]
    fn test_custom_code_empty() {
        assert!(CustomCode::default().is_empty());
        let custom = CustomCode {
            styles: Some("  ".to_string()),
            ..CustomCode::default()
        };
        assert!(custom.is_empty());
    }
}
