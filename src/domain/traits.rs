// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The application layer talks to persisted side-data through
// these traits rather than through concrete file stores.
//
// Implementations:
//   - infra::json_store::JsonStore → one JSON file per store
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;
use crate::domain::JsonMap;

// ─── SideStore ────────────────────────────────────────────────────────────────
/// A persisted string-keyed mapping of auxiliary training data
/// (entity features, edge features, relation graph, entity2id).
pub trait SideStore {
    /// Human-readable store name used in log lines
    fn name(&self) -> &str;

    /// Read the whole mapping. A store that does not exist yet
    /// reads as empty.
    fn load(&self) -> Result<JsonMap>;

    /// Read the mapping before editing it. A store that exists but
    /// does not parse is an error here, so an edit never replaces
    /// recoverable data with a near-empty map.
    fn load_for_update(&self) -> Result<JsonMap>;

    /// Replace the whole mapping on disk. No merge with what was
    /// there before.
    fn write(&self, map: &JsonMap) -> Result<()>;
}
