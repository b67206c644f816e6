//! HTTP handler modules for the codeflow API.
//!
//! Each sub-module implements thin handlers that parse requests, acquire the
//! relevant lock, delegate to the core crates, and return JSON responses.
//! No business logic lives in handlers.

pub mod assist;
pub mod console;
pub mod run;
pub mod scripts;

use codeflow_core::id::ScriptId;
use codeflow_core::script::Script;

use crate::error::ApiError;
use crate::state::SharedStore;

/// Resolves a path id to a script snapshot, or 404.
pub(crate) async fn load_script(store: &SharedStore, raw_id: &str) -> Result<Script, ApiError> {
    let id = ScriptId::parse(raw_id)?;
    let mut store = store.lock().await;
    store
        .get(&id)?
        .ok_or_else(|| ApiError::NotFound(format!("script {} not found", id)))
}
