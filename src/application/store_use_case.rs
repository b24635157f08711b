// ============================================================
// Layer 2 — StoreUseCase
// ============================================================
// Read and edit one side store through the SideStore trait.
// Edits are read-modify-write of the whole file.
//
//   show / get     → load():            malformed file reads as {}
//   put / remove   → load_for_update(): malformed file is an error
//
// Why the split?
//   Reading a damaged store as empty is harmless for a lookup, but
//   an edit writes the map back. Writing {key: value} over a file
//   that merely failed to parse would wipe every entry in it.

use anyhow::Result;
use serde::Serialize;
use serde_json::Value;

use crate::domain::traits::SideStore;

/// Short description of a store's contents
#[derive(Debug, Clone, Serialize)]
pub struct StoreSummary {
    /// Store label, e.g. "entity2id"
    pub name: String,

    /// Number of top-level keys
    pub entries: usize,

    /// First few keys, in file order
    pub sample_keys: Vec<String>,
}

pub struct StoreUseCase<S: SideStore> {
    store: S,
}

impl<S: SideStore> StoreUseCase<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn summary(&self, max_keys: usize) -> Result<StoreSummary> {
        let map = self.store.load()?;
        Ok(StoreSummary {
            name:        self.store.name().to_string(),
            entries:     map.len(),
            sample_keys: map.keys().take(max_keys).cloned().collect(),
        })
    }

    pub fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.store.load()?.get(key).cloned())
    }

    /// Set `key` to `value`, returning the previous value
    pub fn put(&self, key: &str, value: Value) -> Result<Option<Value>> {
        let mut map = self.store.load_for_update()?;
        let previous = map.insert(key.to_string(), value);
        self.store.write(&map)?;
        tracing::info!("{}: set '{}' ({} entries)", self.store.name(), key, map.len());
        Ok(previous)
    }

    /// Remove `key`, returning its value if it was present
    pub fn remove(&self, key: &str) -> Result<Option<Value>> {
        let mut map = self.store.load_for_update()?;
        let removed = map.remove(key);
        if removed.is_some() {
            self.store.write(&map)?;
        }
        Ok(removed)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::json_store::{JsonStore, StoreKind};
    use serde_json::json;

    #[test]
    fn test_put_get_remove() {
        let dir = tempfile::tempdir().unwrap();
        let use_case = StoreUseCase::new(JsonStore::in_dir(StoreKind::Entity2Id, dir.path()));

        assert_eq!(use_case.summary(5).unwrap().entries, 0);
        assert_eq!(use_case.put("Apple", json!(0)).unwrap(), None);
        assert_eq!(use_case.put("Jobs", json!(1)).unwrap(), None);
        assert_eq!(use_case.put("Apple", json!(2)).unwrap(), Some(json!(0)));

        let summary = use_case.summary(5).unwrap();
        assert_eq!(summary.name, "entity2id");
        assert_eq!(summary.sample_keys, vec!["Apple", "Jobs"]);
        assert_eq!(use_case.get("Apple").unwrap(), Some(json!(2)));

        assert_eq!(use_case.remove("Jobs").unwrap(), Some(json!(1)));
        assert_eq!(use_case.remove("Jobs").unwrap(), None);
        assert_eq!(use_case.summary(5).unwrap().entries, 1);
    }

    #[test]
    fn test_edits_refuse_malformed_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::in_dir(StoreKind::Graph, dir.path());
        let broken = r#"{"v1": ["v2"], "v3": ["#;
        std::fs::write(store.path(), broken).unwrap();
        let use_case = StoreUseCase::new(store.clone());

        assert!(use_case.put("x", json!(1)).is_err());
        assert!(use_case.remove("v1").is_err());
        assert_eq!(std::fs::read_to_string(store.path()).unwrap(), broken);

        // lookups still degrade to an empty store
        assert_eq!(use_case.get("v1").unwrap(), None);
        assert_eq!(use_case.summary(5).unwrap().entries, 0);
    }

    #[test]
    fn test_put_into_missing_store_creates_it() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::in_dir(StoreKind::EdgeFeature, dir.path());
        StoreUseCase::new(store.clone()).put("a|b", json!([0.5])).unwrap();

        assert_eq!(store.load_strict().unwrap().get("a|b"), Some(&json!([0.5])));
    }
}
