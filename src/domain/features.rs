// ============================================================
// Layer 3 — InputFeatures Domain Type
// ============================================================
// One relation example after tokenisation, in plain host
// numbers (no tensor or device attached):
//
//   [CLS] ... <e1> head entity </e1> ... <e2> tail entity </e2> ... [SEP] [PAD]...
//
// e1_mask / e2_mask mark the token positions covered by each
// entity span so the encoder can pool an entity representation.
// e1_id / e2_id index the entity into the entity2id store.

use serde::{Deserialize, Serialize};

/// A fully tokenised, padded relation example.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputFeatures {
    /// Token ids including the entity markers, padded to seq_len
    pub input_ids: Vec<i64>,

    /// 1 = real token, 0 = padding
    pub attention_mask: Vec<i64>,

    /// Segment ids (all 0 for single-sentence input)
    pub token_type_ids: Vec<i64>,

    /// Relation labels this example is known NOT to express,
    /// used as negatives by the training objective
    pub false_labels: Vec<i64>,

    /// Gold relation label, in 0..80
    pub label_id: i64,

    pub e1_mask: Vec<i64>,
    pub e2_mask: Vec<i64>,

    /// Entity ids from the entity2id store
    pub e1_id: i64,
    pub e2_id: i64,
}

impl InputFeatures {
    /// Padded sequence length
    pub fn seq_len(&self) -> usize {
        self.input_ids.len()
    }
}
