//! Single-flight scheduler for simulated runs.
//!
//! [`Simulator`] owns the running flag. At most one [`Run`] exists at a time;
//! `start` while a run is in flight returns `None` and the request is ignored.
//! The flag goes back to idle when the run is dropped. Runs cannot be
//! cancelled mid-sequence other than by dropping them.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;

use codeflow_core::console::{ConsoleEvent, RunState};
use codeflow_core::script::Script;

use crate::config::SimulatorConfig;
use crate::plan::RunPlan;

const IDLE: u8 = 0;
const BOOTSTRAPPING: u8 = 1;
const OUTPUT: u8 = 2;

fn encode(state: RunState) -> u8 {
    match state {
        RunState::Idle => IDLE,
        RunState::Bootstrapping => BOOTSTRAPPING,
        RunState::Output => OUTPUT,
    }
}

fn decode(raw: u8) -> RunState {
    match raw {
        BOOTSTRAPPING => RunState::Bootstrapping,
        OUTPUT => RunState::Output,
        _ => RunState::Idle,
    }
}

/// The execution simulator.
#[derive(Debug, Clone)]
pub struct Simulator {
    config: SimulatorConfig,
    phase: Arc<AtomicU8>,
}

impl Simulator {
    pub fn new(config: SimulatorConfig) -> Self {
        Simulator {
            config,
            phase: Arc::new(AtomicU8::new(IDLE)),
        }
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Current lifecycle phase.
    pub fn state(&self) -> RunState {
        decode(self.phase.load(Ordering::SeqCst))
    }

    pub fn is_running(&self) -> bool {
        self.state().is_running()
    }

    /// Claims the simulator for a run over `script`.
    ///
    /// Returns `None` if another run is still in flight.
    pub fn start(&self, script: &Script) -> Option<Run> {
        if self
            .phase
            .compare_exchange(IDLE, BOOTSTRAPPING, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            tracing::warn!(script = %script.name, "run ignored: simulator busy");
            return None;
        }

        tracing::info!(script = %script.name, id = %script.id, "simulated run started");
        Some(Run {
            plan: RunPlan::build(script, &self.config),
            guard: RunGuard {
                phase: Arc::clone(&self.phase),
            },
        })
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new(SimulatorConfig::default())
    }
}

/// Resets the simulator to idle when the run ends, however it ends.
#[derive(Debug)]
struct RunGuard {
    phase: Arc<AtomicU8>,
}

impl RunGuard {
    fn enter(&self, state: RunState) {
        self.phase.store(encode(state), Ordering::SeqCst);
    }
}

impl Drop for RunGuard {
    fn drop(&mut self) {
        self.phase.store(IDLE, Ordering::SeqCst);
    }
}

/// An in-flight run. Holding it keeps the simulator busy.
///
/// Emitting events does not release the simulator; dropping the run does.
/// Callers that log events elsewhere keep the run alive until logging is
/// done, so a later run or a console clear cannot interleave with it.
#[derive(Debug)]
pub struct Run {
    plan: RunPlan,
    guard: RunGuard,
}

impl Run {
    /// Builds a run that owns its own phase instead of claiming a shared
    /// simulator. It can never be rejected.
    pub fn standalone(script: &Script, config: &SimulatorConfig) -> Self {
        tracing::info!(script = %script.name, id = %script.id, "standalone simulated run started");
        Run {
            plan: RunPlan::build(script, config),
            guard: RunGuard {
                phase: Arc::new(AtomicU8::new(BOOTSTRAPPING)),
            },
        }
    }

    pub fn plan(&self) -> &RunPlan {
        &self.plan
    }

    /// Current phase of this run.
    pub fn state(&self) -> RunState {
        decode(self.guard.phase.load(Ordering::SeqCst))
    }

    /// Replays every tick without waiting and returns all events in order.
    pub fn replay(&self) -> Vec<ConsoleEvent> {
        let mut events = Vec::new();
        for step in self.plan.steps() {
            self.guard.enter(step.phase);
            events.extend(step.events.iter().cloned());
        }
        tracing::info!(script = %self.plan.script_name(), events = events.len(), "simulated run finished");
        events
    }

    /// Emits events on real timers, sleeping each step's delay first.
    ///
    /// Returns the number of events delivered. If the receiver goes away the
    /// remaining steps still run to completion, so the full sequence always
    /// elapses before the run can finish.
    pub async fn stream(&self, sink: mpsc::UnboundedSender<ConsoleEvent>) -> usize {
        let mut delivered = 0;
        for step in self.plan.steps() {
            if !step.delay.is_zero() {
                tokio::time::sleep(step.delay).await;
            }
            self.guard.enter(step.phase);
            for event in &step.events {
                if sink.send(event.clone()).is_ok() {
                    delivered += 1;
                }
            }
        }
        tracing::info!(script = %self.plan.script_name(), events = delivered, "simulated run finished");
        delivered
    }
}
