// ============================================================
// Layer 5 — ML Layer
// ============================================================
// Everything that knows about the encoder families, the Burn
// backends, or how model predictions are scored.
//
//   model_type.rs — BERT / RoBERTa / ALBERT lookup table
//                   (default pretrained id, tokenizer kind)
//
//   seed.rs       — explicit seeding of the Burn backends and
//                   of the host RNG handed to the driver
//
//   evaluation.rs — task-grouped accuracy over the relation
//                   taxonomy (score / acc_and_f1)
//
// Reference: Burn Book §3 (Backends)

/// Encoder family lookup table
pub mod model_type;

/// Backend and host RNG seeding
pub mod seed;

/// Task-grouped and whole accuracy
pub mod evaluation;
