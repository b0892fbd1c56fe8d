//! Error types for scene data loading.

use thiserror::Error;

/// Errors that can occur when loading a scene layout.
#[derive(Debug, Error)]
pub enum SceneLoadError {
    /// File could not be read.
    #[error("Failed to read file '{path}': {details}")]
    ReadError { path: String, details: String },

    /// RON parsing failed.
    #[error("Parse error in '{path}': {details}")]
    ParseError { path: String, details: String },

    /// A coin has nowhere to appear.
    #[error("Coin {index} has no waypoints")]
    EmptyCoinRoute { index: usize },

    /// A narrative zone points at nothing.
    #[error("NPC '{name}' has an empty script id")]
    MissingScript { name: String },
}
