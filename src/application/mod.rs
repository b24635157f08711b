// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Orchestrates the other layers for one user-facing workflow.
//
// Rules for this layer:
//   - No tensor math here
//   - No printing here (that's Layer 1)
//   - Only workflow coordination
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// Score a prediction file against gold labels
pub mod evaluate_use_case;

// Tokenize entity-marked text with a family's tokenizer
pub mod tokenize_use_case;

// Inspect and edit the JSON side stores
pub mod store_use_case;

// Fold per-task candidate memories into the replay memory
pub mod replay_use_case;
