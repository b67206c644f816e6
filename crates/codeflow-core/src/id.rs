//! Opaque script identifiers.
//!
//! A [`ScriptId`] is assigned once when a script is created and never changes.
//! Generated ids are short lowercase base-36 strings; built-in default
//! scripts use fixed, human-readable ids such as `"default"`.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Length of a freshly generated id.
pub const GENERATED_ID_LEN: usize = 9;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Stable script identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScriptId(pub String);

impl ScriptId {
    /// Wraps a fixed id without validation. Used for the built-in defaults.
    pub fn from_static(id: &'static str) -> Self {
        ScriptId(id.to_string())
    }

    /// Parses a caller-supplied id (path segment, CLI argument).
    ///
    /// Rejects blank ids and ids containing whitespace or `/`.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        if raw.is_empty() || raw.chars().any(|c| c.is_whitespace() || c == '/') {
            return Err(CoreError::InvalidScriptId { id: raw.to_string() });
        }
        Ok(ScriptId(raw.to_string()))
    }

    /// Generates a random base-36 id of [`GENERATED_ID_LEN`] characters.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let id = (0..GENERATED_ID_LEN)
            .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
            .collect();
        ScriptId(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScriptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
