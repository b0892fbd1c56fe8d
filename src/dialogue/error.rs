//! Error types for dialogue scripts and sessions.

use thiserror::Error;

/// Errors that can occur while loading scripts or driving a conversation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DialogueError {
    /// No script with this id has been loaded.
    #[error("Dialogue script not found: {0}")]
    ScriptNotFound(String),

    /// Script file could not be read.
    #[error("Failed to read script '{path}': {details}")]
    ReadError { path: String, details: String },

    /// RON parsing failed.
    #[error("Parse error in script '{script}': {details}")]
    ParseError { script: String, details: String },

    /// The script's start knot does not exist.
    #[error("Script '{script}' starts at unknown knot '{knot}'")]
    UnknownStartKnot { script: String, knot: String },

    /// A `next` or choice divert points at a knot that does not exist.
    #[error("Script '{script}': knot '{from}' diverts to unknown knot '{target}'")]
    InvalidDivert {
        script: String,
        from: String,
        target: String,
    },

    /// A choice was picked that is not currently on offer.
    #[error("Choice {index} is out of range ({available} available)")]
    ChoiceOutOfRange { index: usize, available: usize },
}
