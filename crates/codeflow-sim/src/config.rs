//! Simulator configuration.

use std::time::Duration;

/// Default delay between staged emissions.
pub const DEFAULT_TICK: Duration = Duration::from_millis(200);

/// Configuration for the execution simulator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulatorConfig {
    /// Delay before each bootstrap line and before the output batch.
    pub tick: Duration,
    /// Interpreter name echoed in the invocation line.
    pub interpreter: String,
    /// Environment narration emitted one per tick before any output.
    pub bootstrap_lines: Vec<String>,
}

impl SimulatorConfig {
    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        SimulatorConfig {
            tick: DEFAULT_TICK,
            interpreter: "python3".to_string(),
            bootstrap_lines: vec![
                "🔍 Scanning for virtual environment...".to_string(),
                "✅ Found .venv (Python 3.11.5)".to_string(),
                "🚀 Initializing Python Hub Engine...".to_string(),
            ],
        }
    }
}
