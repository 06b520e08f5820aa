//! Error types for editor operations.

use thiserror::Error;

/// Result type for editor operations.
pub type EditorResult<T> = Result<T, EditorError>;

/// Errors that can occur in editor operations.
///
/// Missing preconditions (no workspace, empty selection) are not errors;
/// those operations quietly do nothing.
#[derive(Debug, Error)]
pub enum EditorError {
    /// Object not found on the canvas.
    #[error("Object not found: {0}")]
    ObjectNotFound(String),

    /// A color string could not be parsed.
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// A shape name did not match any toolbar shape.
    #[error("Unknown shape: {0}")]
    UnknownShape(String),

    /// Configuration values are out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The selection tracker is already subscribed to a canvas.
    #[error("Selection tracker is already attached to a canvas")]
    TrackerAlreadyAttached,

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error while loading configuration.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
