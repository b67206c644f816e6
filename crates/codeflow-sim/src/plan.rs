//! The staged emission plan for one run.
//!
//! A [`RunPlan`] is built once from a script snapshot. It is a finite list of
//! steps, each waiting `delay` and then emitting a batch of events. Consumers
//! either replay it instantly or honor the delays.

use std::time::Duration;

use codeflow_core::console::{ConsoleEvent, RunState};
use codeflow_core::script::Script;

use crate::config::SimulatorConfig;
use crate::extract::extract_output;
use crate::faults::detect_faults;

/// Emitted when the trimmed source is empty.
pub const EMPTY_SCRIPT_MESSAGE: &str = "(script is empty)";

/// Emitted when the source has content but nothing was extracted.
pub const CLEAN_EXIT_MESSAGE: &str = "Process finished with exit code 0.";

/// One scheduled emission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// Wait before emitting.
    pub delay: Duration,
    /// Simulator phase while this step's events are delivered.
    pub phase: RunState,
    pub events: Vec<ConsoleEvent>,
}

/// Ordered steps for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPlan {
    script_name: String,
    steps: Vec<Step>,
}

impl RunPlan {
    /// Builds the plan: invocation echo, one bootstrap line per tick, then the
    /// output batch one tick later.
    pub fn build(script: &Script, config: &SimulatorConfig) -> Self {
        let mut steps = Vec::with_capacity(config.bootstrap_lines.len() + 2);

        steps.push(Step {
            delay: Duration::ZERO,
            phase: RunState::Bootstrapping,
            events: vec![ConsoleEvent::info(format!(
                "> {} {}",
                config.interpreter, script.name
            ))],
        });

        for line in &config.bootstrap_lines {
            steps.push(Step {
                delay: config.tick,
                phase: RunState::Bootstrapping,
                events: vec![ConsoleEvent::info(line.clone())],
            });
        }

        steps.push(Step {
            delay: config.tick,
            phase: RunState::Output,
            events: output_events(script),
        });

        RunPlan {
            script_name: script.name.clone(),
            steps,
        }
    }

    pub fn script_name(&self) -> &str {
        &self.script_name
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn into_steps(self) -> Vec<Step> {
        self.steps
    }

    /// Every event in emission order.
    pub fn events(&self) -> impl Iterator<Item = &ConsoleEvent> {
        self.steps.iter().flat_map(|s| s.events.iter())
    }

    /// Sum of all step delays.
    pub fn total_delay(&self) -> Duration {
        self.steps.iter().map(|s| s.delay).sum()
    }
}

/// Events produced after the bootstrap phase.
///
/// Extracted output in source order (or a single placeholder line when
/// nothing was extracted), followed by mock-fault errors.
pub fn output_events(script: &Script) -> Vec<ConsoleEvent> {
    let mut events: Vec<ConsoleEvent> = extract_output(&script.content)
        .into_iter()
        .map(ConsoleEvent::info)
        .collect();

    if events.is_empty() {
        let text = if script.is_blank() {
            EMPTY_SCRIPT_MESSAGE
        } else {
            CLEAN_EXIT_MESSAGE
        };
        events.push(ConsoleEvent::info(text));
    }

    events.extend(detect_faults(&script.name, &script.content));
    events
}
