//! Built-in scripts every store is seeded with.
//!
//! Each default is a fixed `(id, name, content)` triplet. Stores seed the
//! whole set into an uninitialized medium and backfill any default whose id
//! and name have both disappeared from the collection.

use crate::id::ScriptId;
use crate::script::Script;

/// Template used for the `main.py` default and for scripts created without
/// content.
pub const DEFAULT_SCRIPT_CONTENT: &str = r#"import asyncio
import firebase_admin
from firebase_admin import credentials, firestore

# Python Hub - async Firestore example
async def main():
    print("🚀 Initializing Expert Python Engine...")

    # Initialize with real credentials when running outside the simulator:
    # if not firebase_admin._apps:
    #     cred = credentials.ApplicationDefault()
    #     firebase_admin.initialize_app(cred)

    print("✅ System Ready.")
    await asyncio.sleep(1)
    print("💡 Tip: Use 'await' for all Firestore operations to keep the Hub responsive.")

if __name__ == "__main__":
    asyncio.run(main())
"#;

const SETUP_ENV_CONTENT: &str = r#"# Environment bootstrap notes.
# Lines tagged COMMAND: are echoed to the terminal so they can be copied
# into a real shell.

# COMMAND: python3 -m venv .venv
# COMMAND: source .venv/bin/activate
# COMMAND: pip install firebase-admin google-cloud-firestore

print("Environment checklist printed.")
"#;

/// A built-in script definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultScript {
    pub id: &'static str,
    pub name: &'static str,
    pub content: &'static str,
}

impl DefaultScript {
    /// Materializes the default with the given timestamp.
    pub fn to_script(&self, now: i64) -> Script {
        Script {
            id: ScriptId::from_static(self.id),
            name: self.name.to_string(),
            content: self.content.to_string(),
            updated_at: now,
        }
    }
}

const DEFAULTS: &[DefaultScript] = &[
    DefaultScript {
        id: "default",
        name: "main.py",
        content: DEFAULT_SCRIPT_CONTENT,
    },
    DefaultScript {
        id: "default-shell",
        name: "setup_env.py",
        content: SETUP_ENV_CONTENT,
    },
];

/// The ordered default seed set.
pub fn default_scripts() -> &'static [DefaultScript] {
    DEFAULTS
}
