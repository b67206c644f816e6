//! OpenAI-compatible chat-completions client.

use serde::Deserialize;
use serde_json::json;

use crate::config::LlmConfig;
use crate::error::AssistError;

const OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Resolves the chat-completions endpoint for the configured provider.
pub fn endpoint(llm: &LlmConfig) -> Result<String, AssistError> {
    let base_url = match llm.provider_name() {
        "openrouter" => llm
            .api_base_url
            .clone()
            .unwrap_or_else(|| OPENROUTER_BASE_URL.to_string()),
        "openai_compatible" => llm.api_base_url.clone().ok_or_else(|| {
            AssistError::NotConfigured(
                "openai_compatible provider requires CODEFLOW_LLM_API_BASE_URL".to_string(),
            )
        })?,
        other => {
            return Err(AssistError::NotConfigured(format!(
                "unsupported provider '{}': use openrouter or openai_compatible",
                other
            )))
        }
    };
    Ok(format!("{}/chat/completions", base_url.trim_end_matches('/')))
}

/// Builds the request body. The provider is asked for a JSON object reply.
pub fn request_body(llm: &LlmConfig, model: &str, user_message: &str) -> serde_json::Value {
    let mut messages = Vec::new();
    if let Some(system_prompt) = &llm.system_prompt {
        messages.push(json!({ "role": "system", "content": system_prompt }));
    }
    messages.push(json!({ "role": "user", "content": user_message }));

    json!({
        "model": model,
        "messages": messages,
        "response_format": { "type": "json_object" },
    })
}

/// Sends one chat request and returns the trimmed assistant content.
pub async fn chat_json(
    client: &reqwest::Client,
    llm: &LlmConfig,
    user_message: &str,
) -> Result<String, AssistError> {
    let endpoint = endpoint(llm)?;
    let model = llm
        .model
        .as_deref()
        .ok_or_else(|| AssistError::NotConfigured("CODEFLOW_LLM_MODEL is not set".to_string()))?;
    let api_key = llm.api_key.clone().unwrap_or_default();

    let mut req = client
        .post(&endpoint)
        .header("Authorization", format!("Bearer {}", api_key))
        .header("Content-Type", "application/json")
        .json(&request_body(llm, model, user_message));

    if llm.provider_name() == "openrouter" {
        req = req
            .header("HTTP-Referer", "https://localhost:3000")
            .header("X-Title", "codeflow");
    }

    tracing::debug!(%endpoint, model, "sending assistant request");
    let response = req.send().await.map_err(|err| {
        tracing::warn!(error = %err, "assistant request failed");
        AssistError::Transport(err.to_string())
    })?;

    let status = response.status();
    let body_text = response
        .text()
        .await
        .map_err(|err| AssistError::Transport(format!("response read failed: {}", err)))?;

    if !status.is_success() {
        tracing::warn!(status = status.as_u16(), "assistant provider returned an error");
        return Err(AssistError::Provider {
            status: status.as_u16(),
            body: body_text,
        });
    }

    parse_chat_response(&body_text)
}

/// Extracts the first choice's assistant content.
pub fn parse_chat_response(body: &str) -> Result<String, AssistError> {
    let parsed: ChatResponse = serde_json::from_str(body)
        .map_err(|err| AssistError::MalformedResponse(format!("response parse failed: {}", err)))?;

    parsed
        .choices
        .first()
        .and_then(|choice| choice.message.content.clone())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            AssistError::MalformedResponse("response missing assistant content".to_string())
        })
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}
