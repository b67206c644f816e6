//! Core data model for codeflow.
//!
//! Scripts, their identifiers, console events and the caller-held console
//! log, plus the built-in default scripts every store is seeded with.

pub mod clock;
pub mod console;
pub mod defaults;
pub mod error;
pub mod id;
pub mod script;

// Re-export commonly used types
pub use clock::{Clock, FixedClock, SystemClock};
pub use console::{ConsoleEvent, ConsoleLog, EventKind, RunState};
pub use defaults::{default_scripts, DefaultScript, DEFAULT_SCRIPT_CONTENT};
pub use error::CoreError;
pub use id::ScriptId;
pub use script::{normalize_name, Script};
