//! Naive literal-print extractor.
//!
//! This is a pattern-matching pass over text, not a tokenizer. It finds
//! `print(` followed by a single- or double-quoted literal and `)`, falling
//! back to "anything up to the next `)`" for unquoted arguments. Escaped quotes
//! and nested parentheses are not handled.
//!
//! Lines tagged `COMMAND:` are echoed as `SHELL: ...` so setup steps written
//! as comments show up in the terminal.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

fn print_call() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"\bprint\s*\(\s*(?:"([^"\n]*)"|'([^'\n]*)'|([^)]*))\s*\)"#)
            .expect("print pattern is valid")
    })
}

fn shell_directive() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?m)COMMAND:[ \t]*([^\r\n]*)").expect("directive pattern is valid")
    })
}

/// One extracted output line with the byte offset it was found at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    pub offset: usize,
    pub text: String,
}

/// Every `print(...)` argument in left-to-right order, trimmed.
pub fn extract_prints(source: &str) -> Vec<Extracted> {
    print_call()
        .captures_iter(source)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let inner = caps.get(1).or_else(|| caps.get(2)).or_else(|| caps.get(3))?;
            Some(Extracted {
                offset: whole.start(),
                text: inner.as_str().trim().to_string(),
            })
        })
        .collect()
}

/// Every `COMMAND:` directive rendered as `SHELL: ...`.
pub fn extract_directives(source: &str) -> Vec<Extracted> {
    shell_directive()
        .captures_iter(source)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let rest = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
            Some(Extracted {
                offset: whole.start(),
                text: format!("SHELL: {}", rest.trim()),
            })
        })
        .collect()
}

/// Prints and directives merged in source order.
///
/// A directive on a line that already produced a print is dropped.
pub fn extract_output(source: &str) -> Vec<String> {
    let prints = extract_prints(source);
    let print_lines: HashSet<usize> = prints.iter().map(|p| line_of(source, p.offset)).collect();

    let mut merged = prints;
    merged.extend(
        extract_directives(source)
            .into_iter()
            .filter(|d| !print_lines.contains(&line_of(source, d.offset))),
    );
    merged.sort_by_key(|e| e.offset);
    merged.into_iter().map(|e| e.text).collect()
}

/// 1-based line number of a byte offset.
pub fn line_of(source: &str, offset: usize) -> usize {
    source[..offset].matches('\n').count() + 1
}
