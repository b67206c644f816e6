//! Core error types for codeflow-core.

use thiserror::Error;

/// Errors produced by the codeflow-core crate.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// A script identifier was blank or contained characters that cannot
    /// appear in a path segment.
    #[error("invalid script id: '{id}'")]
    InvalidScriptId { id: String },
}
