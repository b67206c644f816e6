//! Simulated run and console response types.

use codeflow_core::console::{ConsoleEvent, RunState};
use codeflow_core::id::ScriptId;
use serde::Serialize;

/// Events emitted by one replayed run.
#[derive(Debug, Clone, Serialize)]
pub struct RunResponse {
    pub script_id: ScriptId,
    pub events: Vec<ConsoleEvent>,
    /// Simulator state after the run.
    pub state: RunState,
}

/// The accumulated console log.
#[derive(Debug, Clone, Serialize)]
pub struct ConsoleResponse {
    pub events: Vec<ConsoleEvent>,
    pub state: RunState,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub state: RunState,
}
