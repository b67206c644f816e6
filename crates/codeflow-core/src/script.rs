//! The [`Script`] record and name normalization.

use serde::{Deserialize, Serialize};

use crate::id::ScriptId;

/// Name given to scripts created with a blank name.
pub const UNTITLED_NAME: &str = "untitled.py";

/// A stored Python script.
///
/// Field names are camelCase on the wire so that collections written by
/// earlier versions of the editor (`updatedAt`) load unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Script {
    /// Immutable identifier.
    pub id: ScriptId,
    /// Display name, always ending in `.py`.
    pub name: String,
    /// Raw source text.
    pub content: String,
    /// Unix epoch milliseconds of the last content mutation.
    pub updated_at: i64,
}

impl Script {
    /// Builds a script, normalizing `name`.
    pub fn new(id: ScriptId, name: &str, content: impl Into<String>, updated_at: i64) -> Self {
        Script {
            id,
            name: normalize_name(name),
            content: content.into(),
            updated_at,
        }
    }

    /// Returns `true` if the source is empty after trimming whitespace.
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}

/// Normalizes a display name so it always carries a `.py` suffix.
///
/// Surrounding whitespace is trimmed and a blank name becomes
/// [`UNTITLED_NAME`]. A name that already ends in `.py` is kept as is.
pub fn normalize_name(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return UNTITLED_NAME.to_string();
    }
    if trimmed.ends_with(".py") {
        trimmed.to_string()
    } else {
        format!("{}.py", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn appends_suffix_once() {
        assert_eq!(normalize_name("x"), "x.py");
        assert_eq!(normalize_name("x.py"), "x.py");
        assert_eq!(normalize_name("  tool  "), "tool.py");
        assert_eq!(normalize_name("   "), UNTITLED_NAME);
    }

    #[test]
    fn wire_format_uses_camel_case() {
        let script = Script::new(ScriptId::from_static("a"), "a", "print('a')", 42);
        let value = serde_json::to_value(&script).unwrap();
        assert_eq!(value["updatedAt"], 42);
        assert_eq!(value["name"], "a.py");
        assert!(value.get("updated_at").is_none());
    }

    proptest! {
        #[test]
        fn normalized_names_end_in_py(name in "\\PC{0,24}") {
            let normalized = normalize_name(&name);
            prop_assert!(normalized.ends_with(".py"));
            prop_assert!(!normalized.ends_with(".py.py") || name.trim().ends_with(".py.py"));
        }
    }
}
