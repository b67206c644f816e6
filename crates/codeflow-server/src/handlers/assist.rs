//! AI collaborator handlers.
//!
//! Each request is a single provider call. Failures are returned to the
//! caller as-is; nothing is retried.

use axum::extract::State;
use axum::Json;

use codeflow_assist::Assistant;

use crate::error::ApiError;
use crate::handlers::load_script;
use crate::schema::assist::{ExplainRequest, ExplainResponse, GenerateRequest, GenerateResponse};
use crate::state::AppState;

/// Generates a script, optionally storing it.
///
/// `POST /assist/generate`
pub async fn generate<A: Assistant>(
    State(state): State<AppState<A>>,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let generated = state.assistant.generate_script(&req.prompt).await?;

    let created = match req.name {
        Some(name) => {
            let mut store = state.store.lock().await;
            let script = store.add(&name, Some(&generated.script))?;
            tracing::info!(id = %script.id, name = %script.name, "stored generated script");
            Some(script)
        }
        None => None,
    };

    Ok(Json(GenerateResponse {
        script: generated.script,
        created,
    }))
}

/// Explains a snippet, or the source of a stored script.
///
/// `POST /assist/explain`
pub async fn explain<A: Assistant>(
    State(state): State<AppState<A>>,
    Json(req): Json<ExplainRequest>,
) -> Result<Json<ExplainResponse>, ApiError> {
    let snippet = match (req.code_snippet, req.script_id) {
        (Some(snippet), _) => snippet,
        (None, Some(id)) => load_script(&state.store, &id).await?.content,
        (None, None) => {
            return Err(ApiError::BadRequest(
                "provide either code_snippet or script_id".to_string(),
            ))
        }
    };

    let explanation = state.assistant.explain_snippet(&snippet).await?;
    Ok(Json(ExplainResponse {
        explanation: explanation.explanation,
    }))
}
