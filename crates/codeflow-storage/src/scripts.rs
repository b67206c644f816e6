//! [`ScriptStore`]: CRUD over the script collection.
//!
//! The whole collection is stored as one JSON array under [`STORAGE_KEY`].
//! Every mutation reads the full collection, modifies a copy and writes the
//! whole array back. Callers only ever receive snapshots.

use std::collections::HashSet;

use rand::thread_rng;

use codeflow_core::clock::{Clock, SystemClock};
use codeflow_core::defaults::{default_scripts, DEFAULT_SCRIPT_CONTENT};
use codeflow_core::id::ScriptId;
use codeflow_core::script::{normalize_name, Script};

use crate::error::StorageError;
use crate::traits::BlobStore;

/// Key the serialized collection lives under.
pub const STORAGE_KEY: &str = "codeflow_scripts";

/// Script collection over an injected medium.
#[derive(Debug)]
pub struct ScriptStore<B, C = SystemClock> {
    medium: B,
    clock: C,
}

impl<B: BlobStore> ScriptStore<B> {
    /// Creates a store using the system clock.
    pub fn new(medium: B) -> Self {
        ScriptStore {
            medium,
            clock: SystemClock,
        }
    }
}

impl<B: BlobStore, C: Clock> ScriptStore<B, C> {
    /// Creates a store with an explicit clock.
    pub fn with_clock(medium: B, clock: C) -> Self {
        ScriptStore { medium, clock }
    }

    /// Borrow the underlying medium.
    pub fn medium(&self) -> &B {
        &self.medium
    }

    /// Consumes the store, returning the medium.
    pub fn into_medium(self) -> B {
        self.medium
    }

    /// Returns every script, newest additions first.
    ///
    /// An uninitialized medium is seeded with the default set. Defaults whose
    /// id and name are both missing are appended and the collection is
    /// re-persisted. Without a medium this returns an empty list.
    pub fn list(&mut self) -> Result<Vec<Script>, StorageError> {
        if !self.medium.is_available() {
            tracing::debug!("no persistence medium attached; listing nothing");
            return Ok(Vec::new());
        }

        let now = self.clock.now_millis();
        let Some(mut scripts) = self.load()? else {
            let seeded: Vec<Script> = default_scripts().iter().map(|d| d.to_script(now)).collect();
            tracing::info!(count = seeded.len(), "seeding script store with defaults");
            self.save(&seeded)?;
            return Ok(seeded);
        };

        let restored = backfill_defaults(&mut scripts, now);
        if restored > 0 {
            tracing::info!(restored, "backfilled missing default scripts");
            self.save(&scripts)?;
        }
        Ok(scripts)
    }

    /// Returns a snapshot of the script with `id`, if present.
    pub fn get(&mut self, id: &ScriptId) -> Result<Option<Script>, StorageError> {
        Ok(self.list()?.into_iter().find(|s| &s.id == id))
    }

    /// Creates a script and prepends it to the collection.
    ///
    /// Blank or missing `content` falls back to [`DEFAULT_SCRIPT_CONTENT`].
    pub fn add(&mut self, name: &str, content: Option<&str>) -> Result<Script, StorageError> {
        let mut scripts = self.list()?;

        let taken: HashSet<&ScriptId> = scripts.iter().map(|s| &s.id).collect();
        let mut rng = thread_rng();
        let id = loop {
            let candidate = ScriptId::generate(&mut rng);
            if !taken.contains(&candidate) {
                break candidate;
            }
        };

        let content = match content {
            Some(c) if !c.is_empty() => c,
            _ => DEFAULT_SCRIPT_CONTENT,
        };
        let script = Script {
            id,
            name: normalize_name(name),
            content: content.to_string(),
            updated_at: self.clock.now_millis(),
        };

        scripts.insert(0, script.clone());
        self.save(&scripts)?;
        tracing::debug!(id = %script.id, name = %script.name, "script added");
        Ok(script)
    }

    /// Replaces the content of `id` and refreshes its timestamp.
    ///
    /// An unknown id is a no-op and issues no write.
    pub fn update_content(&mut self, id: &ScriptId, content: &str) -> Result<(), StorageError> {
        let mut scripts = self.list()?;
        let now = self.clock.now_millis();

        let Some(script) = scripts.iter_mut().find(|s| &s.id == id) else {
            tracing::debug!(%id, "update for unknown script ignored");
            return Ok(());
        };
        script.content = content.to_string();
        script.updated_at = now;

        self.save(&scripts)
    }

    /// Removes the script with `id`.
    ///
    /// An unknown id is a no-op and issues no write.
    pub fn delete(&mut self, id: &ScriptId) -> Result<(), StorageError> {
        let mut scripts = self.list()?;
        let before = scripts.len();
        scripts.retain(|s| &s.id != id);
        if scripts.len() == before {
            tracing::debug!(%id, "delete for unknown script ignored");
            return Ok(());
        }
        self.save(&scripts)?;
        tracing::debug!(%id, "script deleted");
        Ok(())
    }

    /// Reads and parses the collection. `None` means the key was never written.
    fn load(&self) -> Result<Option<Vec<Script>>, StorageError> {
        match self.medium.get(STORAGE_KEY)? {
            Some(blob) => Ok(Some(serde_json::from_str(&blob)?)),
            None => Ok(None),
        }
    }

    fn save(&mut self, scripts: &[Script]) -> Result<(), StorageError> {
        if !self.medium.is_available() {
            return Ok(());
        }
        let blob = serde_json::to_string(scripts)?;
        self.medium.set(STORAGE_KEY, &blob)
    }
}

/// Appends every default whose id and name are both absent. Returns how many
/// were appended.
fn backfill_defaults(scripts: &mut Vec<Script>, now: i64) -> usize {
    let mut appended = 0;
    for default in default_scripts() {
        let present = scripts
            .iter()
            .any(|s| s.id.as_str() == default.id || s.name == default.name);
        if !present {
            scripts.push(default.to_script(now));
            appended += 1;
        }
    }
    appended
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{DetachedBlobStore, InMemoryBlobStore};
    use codeflow_core::clock::FixedClock;
    use proptest::prelude::*;

    fn store() -> ScriptStore<InMemoryBlobStore, FixedClock> {
        ScriptStore::with_clock(InMemoryBlobStore::new(), FixedClock::new(1_000))
    }

    fn persisted(store: &ScriptStore<InMemoryBlobStore, FixedClock>) -> Vec<Script> {
        serde_json::from_str(store.medium().raw(STORAGE_KEY).unwrap()).unwrap()
    }

    fn default_ids() -> Vec<&'static str> {
        default_scripts().iter().map(|d| d.id).collect()
    }

    #[test]
    fn empty_store_is_seeded_and_idempotent() {
        let mut store = store();
        let first = store.list().unwrap();
        let ids: Vec<_> = first.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, default_ids());
        assert_eq!(store.medium().writes(), 1);

        let second = store.list().unwrap();
        assert_eq!(first, second);
        assert_eq!(store.medium().writes(), 1, "second list must not rewrite");
    }

    #[test]
    fn add_prepends_and_normalizes() {
        let mut store = store();
        store.list().unwrap();

        let a = store.add("tool", None).unwrap();
        assert_eq!(a.name, "tool.py");
        assert_eq!(a.content, DEFAULT_SCRIPT_CONTENT);
        assert_eq!(a.updated_at, 1_000);

        let b = store.add("x.py", Some("print('x')")).unwrap();
        assert_eq!(b.name, "x.py");
        assert_eq!(b.content, "print('x')");

        let listed = store.list().unwrap();
        assert_eq!(listed[0].id, b.id);
        assert_eq!(listed[1].id, a.id);
        assert_eq!(listed.len(), default_scripts().len() + 2);
    }

    #[test]
    fn add_with_empty_content_uses_template() {
        let mut store = store();
        let script = store.add("blank", Some("")).unwrap();
        assert_eq!(script.content, DEFAULT_SCRIPT_CONTENT);
    }

    #[test]
    fn duplicate_names_are_allowed() {
        let mut store = store();
        let a = store.add("dup", None).unwrap();
        let b = store.add("dup.py", None).unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(store.get(&a.id).unwrap().unwrap().name, "dup.py");
        assert_eq!(store.get(&b.id).unwrap().unwrap().name, "dup.py");
    }

    #[test]
    fn update_refreshes_timestamp() {
        let clock = FixedClock::new(10);
        let mut store = ScriptStore::with_clock(InMemoryBlobStore::new(), &clock);
        let script = store.add("a", Some("old")).unwrap();

        clock.advance(500);
        store.update_content(&script.id, "new").unwrap();

        let updated = store.get(&script.id).unwrap().unwrap();
        assert_eq!(updated.content, "new");
        assert_eq!(updated.updated_at, 510);
    }

    #[test]
    fn update_unknown_id_leaves_blob_untouched() {
        let mut store = store();
        store.add("keep", Some("print('k')")).unwrap();
        let before = store.medium().raw(STORAGE_KEY).unwrap().to_string();
        let writes = store.medium().writes();

        store
            .update_content(&ScriptId::from_static("missing"), "zzz")
            .unwrap();

        assert_eq!(store.medium().raw(STORAGE_KEY).unwrap(), before);
        assert_eq!(store.medium().writes(), writes);
    }

    #[test]
    fn delete_unknown_id_is_noop() {
        let mut store = store();
        store.list().unwrap();
        let before = store.medium().raw(STORAGE_KEY).unwrap().to_string();
        store.delete(&ScriptId::from_static("missing")).unwrap();
        assert_eq!(store.medium().raw(STORAGE_KEY).unwrap(), before);
    }

    #[test]
    fn backfill_appends_missing_defaults_after_user_scripts() {
        let user = Script::new(ScriptId::from_static("u1"), "mine", "print('m')", 5);
        let blob = serde_json::to_string(&vec![user.clone()]).unwrap();
        let mut store = ScriptStore::with_clock(
            InMemoryBlobStore::with_blob(STORAGE_KEY, &blob),
            FixedClock::new(9),
        );

        let listed = store.list().unwrap();
        assert_eq!(listed[0], user);
        let tail: Vec<_> = listed[1..].iter().map(|s| s.id.as_str()).collect();
        assert_eq!(tail, default_ids());
        assert_eq!(listed.iter().filter(|s| s.id == user.id).count(), 1);
        assert_eq!(persisted(&store), listed);
    }

    #[test]
    fn backfill_skips_default_whose_name_is_taken() {
        let renamed = Script::new(ScriptId::from_static("u1"), "main.py", "", 5);
        let blob = serde_json::to_string(&vec![renamed]).unwrap();
        let mut store = ScriptStore::with_clock(
            InMemoryBlobStore::with_blob(STORAGE_KEY, &blob),
            FixedClock::new(9),
        );

        let listed = store.list().unwrap();
        assert!(listed.iter().all(|s| s.id.as_str() != "default"));
        assert_eq!(listed.len(), default_scripts().len());
    }

    #[test]
    fn corrupt_blob_is_fatal() {
        let mut store = ScriptStore::new(InMemoryBlobStore::with_blob(STORAGE_KEY, "{not json"));
        let err = store.list().unwrap_err();
        assert!(matches!(err, StorageError::Serialization(_)));
        assert!(store.add("x", None).is_err());
    }

    #[test]
    fn detached_medium_lists_nothing() {
        let mut store = ScriptStore::new(DetachedBlobStore);
        assert!(store.list().unwrap().is_empty());
        let created = store.add("ghost", None).unwrap();
        assert_eq!(created.name, "ghost.py");
        assert!(store.list().unwrap().is_empty());
    }

    #[derive(Debug, Clone)]
    enum Op {
        Add(String, String),
        Update(prop::sample::Index, String),
        UpdateMissing(String),
        Delete(prop::sample::Index),
        DeleteMissing,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            ("[a-z]{1,6}(\\.py)?", "[ -~]{0,12}").prop_map(|(n, c)| Op::Add(n, c)),
            (any::<prop::sample::Index>(), "[ -~]{0,12}").prop_map(|(i, c)| Op::Update(i, c)),
            "[ -~]{0,12}".prop_map(Op::UpdateMissing),
            any::<prop::sample::Index>().prop_map(Op::Delete),
            Just(Op::DeleteMissing),
        ]
    }

    /// Expected `(id, name, content)` view of the collection.
    type Model = Vec<(String, String, String)>;

    fn view(scripts: &[Script]) -> Model {
        scripts
            .iter()
            .map(|s| (s.id.0.clone(), s.name.clone(), s.content.clone()))
            .collect()
    }

    fn model_backfill(model: &mut Model) {
        for d in default_scripts() {
            if !model.iter().any(|(id, name, _)| id == d.id || name == d.name) {
                model.push((d.id.to_string(), d.name.to_string(), d.content.to_string()));
            }
        }
    }

    proptest! {
        #[test]
        fn persisted_collection_matches_replayed_operations(ops in prop::collection::vec(op(), 1..20)) {
            let mut store = store();
            let mut model: Model = view(&store.list().unwrap());

            for op in ops {
                model_backfill(&mut model);
                match op {
                    Op::Add(name, content) => {
                        let created = store.add(&name, Some(&content)).unwrap();
                        let content = if content.is_empty() { DEFAULT_SCRIPT_CONTENT.to_string() } else { content };
                        model.insert(0, (created.id.0.clone(), normalize_name(&name), content));
                    }
                    Op::Update(idx, content) => {
                        if model.is_empty() { continue; }
                        let i = idx.index(model.len());
                        store.update_content(&ScriptId(model[i].0.clone()), &content).unwrap();
                        model[i].2 = content;
                    }
                    Op::UpdateMissing(content) => {
                        store.update_content(&ScriptId("no-such-id".into()), &content).unwrap();
                    }
                    Op::Delete(idx) => {
                        if model.is_empty() { continue; }
                        let i = idx.index(model.len());
                        store.delete(&ScriptId(model[i].0.clone())).unwrap();
                        model.remove(i);
                    }
                    Op::DeleteMissing => {
                        store.delete(&ScriptId("no-such-id".into())).unwrap();
                    }
                }
                prop_assert_eq!(view(&persisted(&store)), model.clone());
            }
        }
    }
}
