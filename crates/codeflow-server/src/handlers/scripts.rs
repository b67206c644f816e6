//! Script management handlers (list, create, get, update, delete, export).

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;

use codeflow_assist::Assistant;
use codeflow_core::id::ScriptId;
use codeflow_core::script::Script;

use crate::error::ApiError;
use crate::handlers::load_script;
use crate::schema::scripts::{CreateScriptRequest, ScriptListResponse, UpdateContentRequest};
use crate::state::AppState;

/// Lists all scripts, seeding defaults on first use.
///
/// `GET /scripts`
pub async fn list_scripts<A: Assistant>(
    State(state): State<AppState<A>>,
) -> Result<Json<ScriptListResponse>, ApiError> {
    let mut store = state.store.lock().await;
    let scripts = store.list()?;
    Ok(Json(ScriptListResponse { scripts }))
}

/// Creates a script.
///
/// `POST /scripts`
pub async fn create_script<A: Assistant>(
    State(state): State<AppState<A>>,
    Json(req): Json<CreateScriptRequest>,
) -> Result<Json<Script>, ApiError> {
    let mut store = state.store.lock().await;
    let script = store.add(&req.name, req.content.as_deref())?;
    Ok(Json(script))
}

/// `GET /scripts/{id}`
pub async fn get_script<A: Assistant>(
    State(state): State<AppState<A>>,
    Path(id): Path<String>,
) -> Result<Json<Script>, ApiError> {
    Ok(Json(load_script(&state.store, &id).await?))
}

/// Replaces a script's source. Unknown ids are ignored.
///
/// `PUT /scripts/{id}/content`
pub async fn update_content<A: Assistant>(
    State(state): State<AppState<A>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateContentRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let id = ScriptId::parse(&id)?;
    let mut store = state.store.lock().await;
    store.update_content(&id, &req.content)?;
    Ok(Json(serde_json::json!({ "success": true })))
}

/// Deletes a script. Unknown ids are ignored.
///
/// `DELETE /scripts/{id}`
pub async fn delete_script<A: Assistant>(
    State(state): State<AppState<A>>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let id = ScriptId::parse(&id)?;
    let mut store = state.store.lock().await;
    store.delete(&id)?;
    Ok(Json(serde_json::json!({ "success": true })))
}

/// Downloads the script source as a file named after the script.
///
/// `GET /scripts/{id}/export`
pub async fn export_script<A: Assistant>(
    State(state): State<AppState<A>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let script = load_script(&state.store, &id).await?;
    let disposition = format!(
        "attachment; filename=\"{}\"",
        script.name.replace(['"', '\\'], "_")
    );
    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        script.content,
    ))
}
