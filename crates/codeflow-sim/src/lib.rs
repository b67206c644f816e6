//! Execution simulator for codeflow scripts.
//!
//! Turns a script snapshot into a staged console event stream without running
//! any interpreter. Nothing here parses Python: output is recovered by a naive
//! lexical pass and errors are fixed substring checks.
//!
//! # Architecture
//!
//! - [`extract`] pulls `print(...)` literals and `COMMAND:` shell directives
//!   out of the source text, in source order.
//! - [`faults`] holds the fixed mock-error table.
//! - [`RunPlan`] is the explicit finite sequence of `(delay, events)` steps a
//!   run emits: invocation echo, environment bootstrap lines, then output.
//! - [`Simulator`] is the single-flight scheduler. [`Simulator::start`] hands
//!   out at most one [`Run`] at a time; a run emits either through
//!   [`Run::replay`] (all ticks at once) or [`Run::stream`] (real timers),
//!   and the simulator is busy until the run is dropped.
//!
//! The lifecycle is `Idle -> Bootstrapping -> Output -> Idle`.
//!
//! # Usage
//!
//! ```ignore
//! let sim = Simulator::new(SimulatorConfig::default());
//! if let Some(run) = sim.start(&script) {
//!     log.extend(run.replay());
//! }
//! ```

pub mod config;
pub mod extract;
pub mod faults;
pub mod plan;
pub mod simulator;

pub use config::SimulatorConfig;
pub use faults::{detect_faults, MockFault};
pub use plan::{output_events, RunPlan, Step, CLEAN_EXIT_MESSAGE, EMPTY_SCRIPT_MESSAGE};
pub use simulator::{Run, Simulator};
