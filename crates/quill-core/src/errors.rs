//! Error types for the scene graph model.

use thiserror::Error;

/// Errors raised while loading or querying a scene document.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("Node not found: {id}")]
    NodeNotFound { id: String },

    #[error("Invalid scene payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),
}

/// Result type alias for scene operations.
pub type Result<T> = std::result::Result<T, SceneError>;
