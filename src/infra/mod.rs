// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting concerns that touch the outside world:
//
//   tokenizer_factory.rs — Loads the pretrained tokenizer for
//                          the encoder family and registers the
//                          entity marker tokens
//
//   json_store.rs        — The four JSON side stores (entity
//                          features, edge features, graph,
//                          entity2id) with load-or-create and
//                          whole-file write
//
//   metrics.rs           — Appends evaluation results to a CSV
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling)

/// Tokenizer loading with entity markers
pub mod tokenizer_factory;

/// Persistent JSON side stores
pub mod json_store;

/// Evaluation metrics CSV logger
pub mod metrics;
