//! Code generation from design scene graphs to web component source.
//!
//! This crate classifies scene nodes, resolves their visual properties into
//! canonical styles, and emits component markup, stylesheets and type
//! declarations in several dialects. Each component also gets an
//! accessibility audit and a set of responsive style variants.
//!
//! # Dialects
//!
//! - markup: `componentized` (JSX), `templated` (Vue SFC), `static` (HTML)
//! - stylesheet: `utility` (Tailwind), `scoped-module` (CSS modules),
//!   `css-in-js` (styled-components, componentized markup only), `plain`
//!
//! # Example
//!
//! ```ignore
//! use quill_codegen::{CodegenEngine, CustomCode, GenerationOptions, MarkupDialect, StyleDialect};
//! use quill_core::SceneDocument;
//!
//! let document = SceneDocument::from_json(&payload)?;
//! let engine = CodegenEngine::with_defaults()?;
//! let options = GenerationOptions::new(MarkupDialect::Componentized, StyleDialect::Utility);
//! let component = engine.generate(&document, "1:2", &options, &CustomCode::default())?;
//! println!("{}", component.markup);
//! ```

pub mod analyzer;
pub mod audit;
pub mod cache;
pub mod config;
pub mod element;
pub mod engine;
pub mod error;
pub mod generators;
pub mod integrate;
pub mod model;
pub mod naming;
pub mod options;
pub mod responsive;
pub mod style;

pub use analyzer::{Classifier, ClassifierConfig, ComponentCategory, ComponentClassification, Complexity};
pub use audit::{
    AccessibilityIssue, AccessibilityReport, AccessibilityRule, AuditConfig, AuditProfile, Auditor,
    ComplianceTier, Severity,
};
pub use cache::{CacheKeyParts, ResultCache};
pub use config::{EngineConfig, KeywordSet, ENGINE_VERSION};
pub use engine::CodegenEngine;
pub use error::{CodegenError, Result};
pub use generators::{EmitOptions, EmittedCode, Emitter};
pub use integrate::{Integration, Integrator};
pub use model::{ComponentMetadata, GeneratedComponent, GenerationReport};
pub use naming::sanitize_component_name;
pub use options::{CustomCode, Dialect, GenerationOptions, MarkupDialect, StyleDialect};
pub use responsive::{Breakpoints, ResponsiveGenerator, ResponsivePolicy, ResponsiveVariants};
pub use style::{StyleBag, StyleResolver, StyleValue, StyledNode};
