//! Application state shared by all handlers.
//!
//! The script store wraps a `rusqlite::Connection`, which is `Send` but not
//! `Sync`, so it sits behind a `tokio::sync::Mutex`. Handlers await the lock
//! without blocking the runtime. The simulator carries its own running flag
//! and is shared as-is.

use std::sync::Arc;

use codeflow_assist::{Assistant, LlmAssistant};
use codeflow_core::console::ConsoleLog;
use codeflow_sim::{Simulator, SimulatorConfig};
use codeflow_storage::{ScriptStore, SqliteBlobStore};

use crate::config::ServerConfig;
use crate::error::ApiError;

/// The store type served over HTTP.
pub type SharedStore = Arc<tokio::sync::Mutex<ScriptStore<SqliteBlobStore>>>;

/// Shared application state for the HTTP server.
pub struct AppState<A> {
    /// Script collection (async Mutex, non-blocking await).
    pub store: SharedStore,
    /// Single-flight execution simulator.
    pub simulator: Arc<Simulator>,
    /// Console log accumulated across runs until cleared.
    pub console: Arc<tokio::sync::Mutex<ConsoleLog>>,
    /// AI collaborators.
    pub assistant: Arc<A>,
}

impl<A> Clone for AppState<A> {
    fn clone(&self) -> Self {
        AppState {
            store: Arc::clone(&self.store),
            simulator: Arc::clone(&self.simulator),
            console: Arc::clone(&self.console),
            assistant: Arc::clone(&self.assistant),
        }
    }
}

impl AppState<LlmAssistant> {
    /// Creates state backed by the SQLite file and provider in `config`.
    pub fn new(config: &ServerConfig) -> Result<Self, ApiError> {
        let medium = SqliteBlobStore::new(&config.db_path)?;
        let sim = SimulatorConfig::default().with_tick(config.tick);
        Ok(Self::with_parts(
            ScriptStore::new(medium),
            sim,
            LlmAssistant::new(config.llm.clone()),
        ))
    }
}

impl<A: Assistant> AppState<A> {
    /// Creates state over an in-memory database (for testing).
    pub fn in_memory(assistant: A, sim: SimulatorConfig) -> Result<Self, ApiError> {
        let medium = SqliteBlobStore::in_memory()?;
        Ok(Self::with_parts(ScriptStore::new(medium), sim, assistant))
    }

    pub fn with_parts(
        store: ScriptStore<SqliteBlobStore>,
        sim: SimulatorConfig,
        assistant: A,
    ) -> Self {
        AppState {
            store: Arc::new(tokio::sync::Mutex::new(store)),
            simulator: Arc::new(Simulator::new(sim)),
            console: Arc::new(tokio::sync::Mutex::new(ConsoleLog::new())),
            assistant: Arc::new(assistant),
        }
    }
}
