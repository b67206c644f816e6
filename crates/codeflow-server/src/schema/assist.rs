//! AI collaborator request/response types.

use codeflow_core::script::Script;
use serde::{Deserialize, Serialize};

/// Request to generate a script from a description.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateRequest {
    pub prompt: String,
    /// When present, the generated script is also stored under this name.
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateResponse {
    pub script: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<Script>,
}

/// Request to explain either literal text or a stored script.
#[derive(Debug, Clone, Deserialize)]
pub struct ExplainRequest {
    #[serde(default)]
    pub code_snippet: Option<String>,
    #[serde(default)]
    pub script_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExplainResponse {
    pub explanation: String,
}
