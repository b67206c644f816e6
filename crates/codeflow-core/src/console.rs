//! Console events and the caller-held console log.
//!
//! A run produces an ordered sequence of [`ConsoleEvent`]s. Events carry no
//! identity beyond their position; the [`ConsoleLog`] only ever grows until it
//! is explicitly cleared.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity of a console line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// Normal log line.
    Info,
    /// Failure line (simulated traceback).
    Error,
}

/// One line (possibly multi-line text) written to the simulated terminal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleEvent {
    pub kind: EventKind,
    pub text: String,
}

impl ConsoleEvent {
    pub fn info(text: impl Into<String>) -> Self {
        ConsoleEvent {
            kind: EventKind::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        ConsoleEvent {
            kind: EventKind::Error,
            text: text.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == EventKind::Error
    }
}

/// Lifecycle of the execution simulator.
///
/// `Idle -> Bootstrapping -> Output -> Idle`; a new run always starts from
/// `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    #[default]
    Idle,
    Bootstrapping,
    Output,
}

impl RunState {
    pub fn is_running(self) -> bool {
        self != RunState::Idle
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RunState::Idle => "idle",
            RunState::Bootstrapping => "bootstrapping",
            RunState::Output => "output",
        };
        f.write_str(s)
    }
}

/// Append-only console log owned by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleLog {
    events: Vec<ConsoleEvent>,
}

impl ConsoleLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: ConsoleEvent) {
        self.events.push(event);
    }

    pub fn extend<I: IntoIterator<Item = ConsoleEvent>>(&mut self, events: I) {
        self.events.extend(events);
    }

    /// Drops every event.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn events(&self) -> &[ConsoleEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// All event texts joined by newlines, ready to paste into a real shell.
    pub fn copy_text(&self) -> String {
        self.events
            .iter()
            .map(|e| e.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Renders the log as numbered terminal lines (`[1] ...`).
    ///
    /// Continuation lines of multi-line events are indented under the text
    /// column so tracebacks stay readable.
    pub fn render_numbered(&self) -> String {
        let width = self.events.len().to_string().len() + 2;
        let mut out = String::new();
        for (idx, event) in self.events.iter().enumerate() {
            let label = format!("[{}]", idx + 1);
            let mut lines = event.text.split('\n');
            let first = lines.next().unwrap_or_default();
            out.push_str(&format!("{:>width$} {}\n", label, first, width = width));
            for line in lines {
                out.push_str(&format!("{:width$} {}\n", "", line, width = width));
            }
        }
        out
    }
}

impl<'a> IntoIterator for &'a ConsoleLog {
    type Item = &'a ConsoleEvent;
    type IntoIter = std::slice::Iter<'a, ConsoleEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_appends_and_clears() {
        let mut log = ConsoleLog::new();
        log.push(ConsoleEvent::info("a"));
        log.extend(vec![ConsoleEvent::info("b"), ConsoleEvent::error("c")]);
        assert_eq!(log.len(), 3);
        assert_eq!(log.copy_text(), "a\nb\nc");
        assert!(log.events()[2].is_error());

        log.clear();
        assert!(log.is_empty());
        assert_eq!(log.copy_text(), "");
    }

    #[test]
    fn numbered_rendering_indents_continuations() {
        let mut log = ConsoleLog::new();
        log.push(ConsoleEvent::info("hello"));
        log.push(ConsoleEvent::error("Traceback\n  File"));
        assert_eq!(log.render_numbered(), "[1] hello\n[2] Traceback\n      File\n");
    }

    #[test]
    fn event_kind_serializes_lowercase() {
        let json = serde_json::to_value(ConsoleEvent::error("x")).unwrap();
        assert_eq!(json["kind"], "error");
        assert_eq!(serde_json::to_value(RunState::Bootstrapping).unwrap(), "bootstrapping");
    }
}
