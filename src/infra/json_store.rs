// ============================================================
// Layer 6 — JSON Side Stores
// ============================================================
// Continual-learning runs carry four pieces of auxiliary data
// from one run to the next, each persisted as one JSON object:
//
//   entity features → entity name  → feature vector
//   edge features   → edge key     → feature vector
//   graph           → vertex       → adjacency list
//   entity2id       → entity name  → integer id
//
// All four share one contract:
//
//   load:  file missing   → create an empty file, return {}
//          file malformed → log, leave the file alone, return {}
//                           (or fail, with MalformedPolicy::Fail)
//          otherwise      → the parsed object
//
//   write: serialise and overwrite the whole file (no merge)
//
// Nothing is cached. Every call opens the file again, so two
// writers on the same path are last-writer-wins and must be
// ordered by the caller.

use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};
use thiserror::Error;

use crate::domain::{traits::SideStore, JsonMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreKind {
    EntityFeature,
    EdgeFeature,
    Graph,
    Entity2Id,
}

impl StoreKind {
    pub const ALL: [StoreKind; 4] = [
        StoreKind::EntityFeature,
        StoreKind::EdgeFeature,
        StoreKind::Graph,
        StoreKind::Entity2Id,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            StoreKind::EntityFeature => "entity_features",
            StoreKind::EdgeFeature   => "edge_features",
            StoreKind::Graph         => "graph",
            StoreKind::Entity2Id     => "entity2id",
        }
    }

    /// File name used when a store lives in a shared directory
    pub fn file_name(&self) -> &'static str {
        match self {
            StoreKind::EntityFeature => "entity_feature.json",
            StoreKind::EdgeFeature   => "edge_feature.json",
            StoreKind::Graph         => "graph.json",
            StoreKind::Entity2Id     => "entity2id.json",
        }
    }
}

#[derive(Debug, Error)]
#[error("unknown store kind '{0}' (expected one of: entity_features, edge_features, graph, entity2id)")]
pub struct UnknownStoreKind(pub String);

impl std::str::FromStr for StoreKind {
    type Err = UnknownStoreKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        StoreKind::ALL
            .into_iter()
            .find(|k| k.label() == lower || k.label().trim_end_matches('s') == lower)
            .ok_or_else(|| UnknownStoreKind(s.to_string()))
    }
}

/// What to do with a store file that exists but does not parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedPolicy {
    /// Log and treat the store as empty
    #[default]
    Degrade,
    /// Surface the parse failure to the caller
    Fail,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("store file '{}' does not exist", .0.display())]
    Missing(PathBuf),

    #[error("store file '{}' is empty", .0.display())]
    Empty(PathBuf),

    #[error("store file '{}' is not a JSON object: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error for '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cannot write store file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot serialise store '{}': {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// One side store bound to a file path.
#[derive(Debug, Clone)]
pub struct JsonStore {
    kind: StoreKind,
    path: PathBuf,
}

impl JsonStore {
    pub fn new(kind: StoreKind, path: impl Into<PathBuf>) -> Self {
        Self { kind, path: path.into() }
    }

    /// Store of `kind` at its conventional file name inside `dir`
    pub fn in_dir(kind: StoreKind, dir: impl AsRef<Path>) -> Self {
        Self::new(kind, dir.as_ref().join(kind.file_name()))
    }

    pub fn kind(&self) -> StoreKind {
        self.kind
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse the file without any recovery. Missing, empty and
    /// malformed files are reported as distinct errors and
    /// nothing is created on disk.
    pub fn load_strict(&self) -> Result<JsonMap, LoadError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(LoadError::Missing(self.path.clone()));
            }
            Err(source) => {
                return Err(LoadError::Io { path: self.path.clone(), source });
            }
        };

        if text.trim().is_empty() {
            return Err(LoadError::Empty(self.path.clone()));
        }

        serde_json::from_str(&text)
            .map_err(|source| LoadError::Malformed { path: self.path.clone(), source })
    }

    /// Load-or-default, see the module header for the contract.
    pub fn load_with_policy(&self, policy: MalformedPolicy) -> Result<JsonMap, LoadError> {
        tracing::info!("Loading {} from '{}'", self.kind.label(), self.path.display());

        match self.load_strict() {
            Ok(map) => {
                tracing::debug!("{}: {} entries", self.kind.label(), map.len());
                Ok(map)
            }
            Err(LoadError::Missing(path)) => {
                File::create(&path)
                    .map_err(|source| LoadError::Io { path: path.clone(), source })?;
                tracing::info!("{} did not exist, created empty '{}'", self.kind.label(), path.display());
                Ok(JsonMap::new())
            }
            Err(LoadError::Empty(path)) => {
                tracing::warn!("'{}' is empty!", path.display());
                Ok(JsonMap::new())
            }
            Err(err @ LoadError::Malformed { .. }) => match policy {
                MalformedPolicy::Degrade => {
                    tracing::warn!("{}; treating {} as empty", err, self.kind.label());
                    Ok(JsonMap::new())
                }
                MalformedPolicy::Fail => Err(err),
            },
            Err(err) => Err(err),
        }
    }

    /// Serialise `map` and overwrite the file.
    pub fn save(&self, map: &JsonMap) -> Result<(), StoreError> {
        tracing::info!(
            "Writing {} ({} entries) to '{}'",
            self.kind.label(),
            map.len(),
            self.path.display()
        );

        let file = File::create(&self.path)
            .map_err(|source| StoreError::Io { path: self.path.clone(), source })?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, map)
            .map_err(|source| StoreError::Json { path: self.path.clone(), source })?;
        writer
            .flush()
            .map_err(|source| StoreError::Io { path: self.path.clone(), source })
    }
}

impl SideStore for JsonStore {
    fn name(&self) -> &str {
        self.kind.label()
    }

    fn load(&self) -> anyhow::Result<JsonMap> {
        Ok(self.load_with_policy(MalformedPolicy::Degrade)?)
    }

    fn load_for_update(&self) -> anyhow::Result<JsonMap> {
        Ok(self.load_with_policy(MalformedPolicy::Fail)?)
    }

    fn write(&self, map: &JsonMap) -> anyhow::Result<()> {
        Ok(self.save(map)?)
    }
}

// ─── Per-store helpers ────────────────────────────────────────────────────────

pub fn load_entity_feature(path: impl AsRef<Path>) -> Result<JsonMap, LoadError> {
    JsonStore::new(StoreKind::EntityFeature, path.as_ref()).load_with_policy(MalformedPolicy::Degrade)
}

pub fn write_entity_feature(entity_features: &JsonMap, path: impl AsRef<Path>) -> Result<(), StoreError> {
    JsonStore::new(StoreKind::EntityFeature, path.as_ref()).save(entity_features)
}

pub fn load_edge_feature(path: impl AsRef<Path>) -> Result<JsonMap, LoadError> {
    JsonStore::new(StoreKind::EdgeFeature, path.as_ref()).load_with_policy(MalformedPolicy::Degrade)
}

pub fn write_edge_feature(edge_features: &JsonMap, path: impl AsRef<Path>) -> Result<(), StoreError> {
    JsonStore::new(StoreKind::EdgeFeature, path.as_ref()).save(edge_features)
}

/// Graph is an adjacency list keyed by vertex
pub fn load_graph(path: impl AsRef<Path>) -> Result<JsonMap, LoadError> {
    JsonStore::new(StoreKind::Graph, path.as_ref()).load_with_policy(MalformedPolicy::Degrade)
}

pub fn write_graph(graph: &JsonMap, path: impl AsRef<Path>) -> Result<(), StoreError> {
    JsonStore::new(StoreKind::Graph, path.as_ref()).save(graph)
}

pub fn load_entity2id(path: impl AsRef<Path>) -> Result<JsonMap, LoadError> {
    JsonStore::new(StoreKind::Entity2Id, path.as_ref()).load_with_policy(MalformedPolicy::Degrade)
}

pub fn write_entity2id(entity2id: &JsonMap, path: impl AsRef<Path>) -> Result<(), StoreError> {
    JsonStore::new(StoreKind::Entity2Id, path.as_ref()).save(entity2id)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_map() -> JsonMap {
        let value = json!({
            "Apple":  [0.1, 0.2, 0.3],
            "Jobs":   [0.4, 0.5, 0.6],
            "nested": {"k": [1, 2]}
        });
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_round_trip() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("entity_feature.json");

        let map = sample_map();
        write_entity_feature(&map, &path).unwrap();
        let loaded = load_entity_feature(&path).unwrap();
        assert_eq!(loaded, map);
        assert_eq!(loaded.keys().collect::<Vec<_>>(), vec!["Apple", "Jobs", "nested"]);
    }

    #[test]
    fn test_missing_file_is_created_empty() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.json");
        assert!(!path.exists());

        let graph = load_graph(&path).unwrap();
        assert!(graph.is_empty());
        assert!(path.exists());
        assert_eq!(fs::read_to_string(&path).unwrap(), "");

        // The freshly created empty file reads as empty, not as an error.
        assert!(load_graph(&path).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_json_degrades_and_leaves_file() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("edge_feature.json");
        fs::write(&path, "{\"a\": [1, 2").unwrap();

        let edges = load_edge_feature(&path).unwrap();
        assert!(edges.is_empty());
        assert_eq!(fs::read_to_string(&path).unwrap(), "{\"a\": [1, 2");
    }

    #[test]
    fn test_fail_policy_surfaces_malformed_json() {
        let dir   = tempfile::tempdir().unwrap();
        let store = JsonStore::in_dir(StoreKind::Entity2Id, dir.path());
        fs::write(store.path(), "[1, 2, 3]").unwrap();

        let err = store.load_with_policy(MalformedPolicy::Fail).unwrap_err();
        assert!(matches!(err, LoadError::Malformed { .. }));
        assert!(store.load_with_policy(MalformedPolicy::Degrade).unwrap().is_empty());
    }

    #[test]
    fn test_strict_load_distinguishes_conditions() {
        let dir   = tempfile::tempdir().unwrap();
        let store = JsonStore::in_dir(StoreKind::EntityFeature, dir.path());

        assert!(matches!(store.load_strict(), Err(LoadError::Missing(_))));
        assert!(!store.path().exists());

        fs::write(store.path(), "  \n").unwrap();
        assert!(matches!(store.load_strict(), Err(LoadError::Empty(_))));

        fs::write(store.path(), "not json").unwrap();
        assert!(matches!(store.load_strict(), Err(LoadError::Malformed { .. })));
    }

    #[test]
    fn test_write_overwrites_without_merge() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("entity2id.json");

        write_entity2id(&sample_map(), &path).unwrap();
        let mut second = JsonMap::new();
        second.insert("Jobs".to_string(), json!(7));
        write_entity2id(&second, &path).unwrap();

        assert_eq!(load_entity2id(&path).unwrap(), second);
    }

    #[test]
    fn test_parse_store_kind() {
        assert_eq!("graph".parse::<StoreKind>().unwrap(), StoreKind::Graph);
        assert_eq!("entity_feature".parse::<StoreKind>().unwrap(), StoreKind::EntityFeature);
        assert_eq!("Edge_Features".parse::<StoreKind>().unwrap(), StoreKind::EdgeFeature);
        assert!("vertices".parse::<StoreKind>().is_err());
    }

    #[test]
    fn test_side_store_trait() {
        let dir   = tempfile::tempdir().unwrap();
        let store = JsonStore::in_dir(StoreKind::Graph, dir.path());
        let side: &dyn SideStore = &store;

        assert_eq!(side.name(), "graph");
        assert!(side.load().unwrap().is_empty());
        side.write(&sample_map()).unwrap();
        assert_eq!(side.load().unwrap().len(), 3);
    }
}
