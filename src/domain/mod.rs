// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust structs and traits describing the relation
// extraction training side-data:
//
//   - the label space and its grouping into tasks
//   - the per-example feature record fed to the encoder
//   - the per-task candidate memory used for replay
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - No tensors, no tokenizers
//   - Only plain Rust structs, enums, and traits
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// Relation labels, tasks, and the per-task sample table
pub mod label;

// One encoded relation example
pub mod features;

// Score → exemplar mapping collected while training a task
pub mod memory;

// Core abstractions (traits) that other layers implement
pub mod traits;

/// A JSON object with insertion order preserved.
/// Every side store (entity features, edge features, graph,
/// entity2id) is persisted as one of these.
pub type JsonMap = serde_json::Map<String, serde_json::Value>;
