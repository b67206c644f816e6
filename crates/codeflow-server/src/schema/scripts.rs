//! Script CRUD request/response types.

use codeflow_core::script::Script;
use serde::{Deserialize, Serialize};

/// Request to create a script.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateScriptRequest {
    /// Display name; `.py` is appended when missing.
    pub name: String,
    /// Initial source. Blank or absent uses the default template.
    #[serde(default)]
    pub content: Option<String>,
}

/// Request to replace a script's source.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateContentRequest {
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScriptListResponse {
    pub scripts: Vec<Script>,
}
