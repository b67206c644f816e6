//! Mock faults: fixed substrings that simulate common mistakes.
//!
//! These are containment checks over the raw source, not syntax analysis.
//! Every fault that fires contributes one error event, in table order, after
//! all normal output. Several faults may fire for the same script.

use codeflow_core::console::ConsoleEvent;

use crate::extract::line_of;

/// A simulated mistake and the traceback it produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockFault {
    /// `pirnt` instead of `print`.
    MisspelledPrint,
    /// Import of a module that never exists.
    MissingModule,
}

impl MockFault {
    /// Check order. Output is stable because this order is fixed.
    pub const ALL: [MockFault; 2] = [MockFault::MisspelledPrint, MockFault::MissingModule];

    /// Substrings that trigger this fault.
    pub fn needles(self) -> &'static [&'static str] {
        match self {
            MockFault::MisspelledPrint => &["pirnt"],
            MockFault::MissingModule => &["import nonexistent_module", "from nonexistent_module"],
        }
    }

    fn exception(self) -> &'static str {
        match self {
            MockFault::MisspelledPrint => {
                "NameError: name 'pirnt' is not defined. Did you mean: 'print'?"
            }
            MockFault::MissingModule => "ModuleNotFoundError: No module named 'nonexistent_module'",
        }
    }

    /// Byte offset of the earliest needle in `source`, if any.
    pub fn find(self, source: &str) -> Option<usize> {
        self.needles().iter().filter_map(|n| source.find(n)).min()
    }

    /// Renders the traceback for a hit at `offset`.
    pub fn traceback(self, script_name: &str, source: &str, offset: usize) -> String {
        let line_no = line_of(source, offset);
        let line = source.lines().nth(line_no - 1).unwrap_or_default().trim();
        format!(
            "Traceback (most recent call last):\n  File \"{}\", line {}, in <module>\n    {}\n{}",
            script_name,
            line_no,
            line,
            self.exception()
        )
    }
}

/// Error events for every fault present in `source`.
pub fn detect_faults(script_name: &str, source: &str) -> Vec<ConsoleEvent> {
    MockFault::ALL
        .iter()
        .filter_map(|fault| {
            fault
                .find(source)
                .map(|offset| ConsoleEvent::error(fault.traceback(script_name, source, offset)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn misspelled_print_traceback() {
        let src = "x = 1\n    pirnt(\"hello\")\n";
        let events = detect_faults("main.py", src);
        assert_eq!(events.len(), 1);
        assert!(events[0].is_error());
        assert_eq!(
            events[0].text,
            "Traceback (most recent call last):\n  File \"main.py\", line 2, in <module>\n    pirnt(\"hello\")\nNameError: name 'pirnt' is not defined. Did you mean: 'print'?"
        );
    }

    #[test]
    fn both_faults_fire_in_table_order() {
        let src = "from nonexistent_module import thing\npirnt('x')\n";
        let events = detect_faults("tool.py", src);
        assert_eq!(events.len(), 2);
        assert!(events[0].text.contains("NameError"));
        assert!(events[0].text.contains("line 2"));
        assert!(events[1].text.contains("ModuleNotFoundError"));
        assert!(events[1].text.contains("line 1"));
        assert!(events.iter().all(|e| e.text.contains("tool.py")));
    }

    #[test]
    fn earliest_needle_wins() {
        let src = "import os\nfrom nonexistent_module import a\nimport nonexistent_module\n";
        assert_eq!(MockFault::MissingModule.find(src), Some(10));
    }

    #[test]
    fn clean_source_has_no_faults() {
        assert!(detect_faults("a.py", "print('fine')").is_empty());
        assert!(detect_faults("a.py", "").is_empty());
    }

    #[test]
    fn repeated_detection_is_identical() {
        let src = "pirnt('a')";
        assert_eq!(detect_faults("a.py", src), detect_faults("a.py", src));
    }
}
