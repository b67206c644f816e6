//! Console log and simulator status handlers.

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;

use codeflow_assist::Assistant;

use crate::error::ApiError;
use crate::schema::run::{ConsoleResponse, StatusResponse};
use crate::state::AppState;

/// `GET /console`
pub async fn get_console<A: Assistant>(State(state): State<AppState<A>>) -> Json<ConsoleResponse> {
    let console = state.console.lock().await;
    Json(ConsoleResponse {
        events: console.events().to_vec(),
        state: state.simulator.state(),
    })
}

/// Clears the console. Refused while a run is still emitting.
///
/// `DELETE /console`
pub async fn clear_console<A: Assistant>(
    State(state): State<AppState<A>>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if state.simulator.is_running() {
        return Err(ApiError::Conflict(
            "cannot clear the console while a run is in progress".to_string(),
        ));
    }
    state.console.lock().await.clear();
    Ok(Json(serde_json::json!({ "success": true })))
}

/// All console text, newline-joined, for pasting into a real shell.
///
/// `GET /console/text`
pub async fn console_text<A: Assistant>(State(state): State<AppState<A>>) -> impl IntoResponse {
    let text = state.console.lock().await.copy_text();
    ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], text)
}

/// `GET /status`
pub async fn status<A: Assistant>(State(state): State<AppState<A>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        state: state.simulator.state(),
    })
}
