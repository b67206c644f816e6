//! Error types for the AI collaborators.

use thiserror::Error;

/// Errors produced by prompt rendering, provider calls and reply parsing.
#[derive(Debug, Error)]
pub enum AssistError {
    /// The caller supplied blank input; no request was made.
    #[error("{field} must not be empty")]
    EmptyInput { field: &'static str },

    /// A template placeholder had no value.
    #[error("prompt template '{template}' has no value for '{name}'")]
    MissingVariable { template: &'static str, name: String },

    /// The provider configuration is unusable.
    #[error("assistant not configured: {0}")]
    NotConfigured(String),

    /// The request never produced a response.
    #[error("provider request failed: {0}")]
    Transport(String),

    /// The provider answered with a non-success status.
    #[error("provider request failed ({status}): {body}")]
    Provider { status: u16, body: String },

    /// The provider answered but the payload was unusable.
    #[error("malformed provider response: {0}")]
    MalformedResponse(String),
}

impl AssistError {
    /// Whether the failure happened on the provider side rather than in the
    /// caller's input or configuration.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            AssistError::Transport(_) | AssistError::Provider { .. } | AssistError::MalformedResponse(_)
        )
    }
}
