//! The generate-script and explain-snippet flows.
//!
//! Each flow is a prompt template plus a reply parser. The provider is asked
//! for a JSON object; replies that are not JSON are accepted as the raw
//! payload with Markdown code fences removed.

use serde::{Deserialize, Serialize};

use crate::error::AssistError;
use crate::prompt::PromptTemplate;

/// Result of script generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedScript {
    pub script: String,
}

/// Result of an explanation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Explanation {
    pub explanation: String,
}

pub const GENERATE_SCRIPT_PROMPT: PromptTemplate = PromptTemplate::new(
    "generatePythonScript",
    r#"You are an expert Python programmer specializing in the Firebase Admin SDK and Cloud Functions.

Generate a Python script based on the following description.

Requirements:
- Use asyncio for asynchronous operations where applicable.
- Use the firebase-admin SDK for database/auth operations if requested.
- Follow Python 3.10+ best practices.
- Include concise, helpful comments.

Respond with a JSON object of the form {"script": "<python source>"}.

Python script description: {{{prompt}}}"#,
);

pub const EXPLAIN_SNIPPET_PROMPT: PromptTemplate = PromptTemplate::new(
    "explainPythonCodeSnippet",
    r#"You are an expert Python debugger specializing in the Firebase Admin SDK, Cloud Functions and Nix-based development environments.

Analyze the Python code snippet, terminal error or traceback below using exactly four steps.

Environment:
- OS: Nix-based shell.
- Runtime: Python 3.11+.
- Virtual environment: /home/user/project/.venv.
- FIREBASE_CONFIG_PATH points to /home/user/project/serviceAccountKey.json.
- SDKs: firebase-admin (asyncio preferred), google-cloud-firestore.

Step 1: Root Cause. Identify the exact technical failure.
Step 2: Environment Context. Separate Python logic, Firebase SDK configuration and OS-level (Nix) requirements; say whether a system library or a pip package is missing.
Step 3: The Fix. Give the corrected Python code (async/await where applicable) and any shell commands needed (nix-shell -p, pip install).
Step 4: Prevention. Give one architectural tip that prevents a regression.

Snippet/Error to analyze:
```
{{{codeSnippet}}}
```

Be professional and concise. Respond with a JSON object of the form {"explanation": "<markdown text>"}."#,
);

/// Renders the generation prompt. Blank descriptions are rejected.
pub fn generate_script_prompt(prompt: &str) -> Result<String, AssistError> {
    if prompt.trim().is_empty() {
        return Err(AssistError::EmptyInput { field: "prompt" });
    }
    GENERATE_SCRIPT_PROMPT.render(&[("prompt", prompt)])
}

/// Renders the explanation prompt. Blank snippets are rejected.
pub fn explain_snippet_prompt(code_snippet: &str) -> Result<String, AssistError> {
    if code_snippet.trim().is_empty() {
        return Err(AssistError::EmptyInput {
            field: "code_snippet",
        });
    }
    EXPLAIN_SNIPPET_PROMPT.render(&[("codeSnippet", code_snippet)])
}

pub fn parse_generated_script(reply: &str) -> Result<GeneratedScript, AssistError> {
    let script = extract_field(reply, "script")?;
    Ok(GeneratedScript { script })
}

pub fn parse_explanation(reply: &str) -> Result<Explanation, AssistError> {
    let explanation = extract_field(reply, "explanation")?;
    Ok(Explanation { explanation })
}

/// Pulls `field` out of a JSON object reply, or falls back to the fenced or
/// raw text when the reply is not JSON.
fn extract_field(reply: &str, field: &str) -> Result<String, AssistError> {
    let body = strip_code_fence(reply);

    let value = match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::Object(map)) => match map.get(field) {
            Some(serde_json::Value::String(s)) => s.clone(),
            _ => {
                return Err(AssistError::MalformedResponse(format!(
                    "reply object has no string field '{}'",
                    field
                )))
            }
        },
        _ => body.to_string(),
    };

    if value.trim().is_empty() {
        return Err(AssistError::MalformedResponse(format!("empty {}", field)));
    }
    Ok(value)
}

/// Removes one surrounding Markdown code fence, if present.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(after_open) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Skip the language tag line.
    let body = match after_open.find('\n') {
        Some(nl) => &after_open[nl + 1..],
        None => after_open,
    };
    body.strip_suffix("```").unwrap_or(body).trim()
}
