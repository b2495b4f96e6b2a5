//! Error types for code generation.

use quill_core::SceneError;
use thiserror::Error;

/// Result type alias for codegen operations.
pub type Result<T> = std::result::Result<T, CodegenError>;

/// Errors that can occur during code generation.
///
/// Only input-shape and configuration problems are errors. Heuristic
/// uncertainty resolves to documented defaults and integration problems
/// surface as warnings on the generated component.
#[derive(Error, Debug)]
pub enum CodegenError {
    /// The target node is missing or the payload is malformed.
    #[error(transparent)]
    Scene(#[from] SceneError),

    /// A required dialect option was not supplied.
    #[error("Missing {0} dialect option")]
    MissingDialect(&'static str),

    /// A dialect name that no backend understands.
    #[error("Unknown {kind} dialect '{value}'")]
    UnknownDialect {
        kind: &'static str,
        value: String,
    },

    /// Two dialects that cannot be emitted together.
    #[error("Stylesheet dialect '{style}' is not supported with '{markup}' markup")]
    UnsupportedCombination {
        markup: &'static str,
        style: &'static str,
    },

    /// Template rendering error.
    #[error("Template error: {0}")]
    TemplateError(#[from] handlebars::RenderError),

    /// Invalid template.
    #[error("Invalid template: {0}")]
    InvalidTemplate(#[from] handlebars::TemplateError),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CodegenError {
    /// Whether the error comes from caller configuration rather than input.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::MissingDialect(_) | Self::UnknownDialect { .. } | Self::UnsupportedCombination { .. }
        )
    }
}
