// ============================================================
// Layer 4 — Relation Batcher
// ============================================================
// Implements Burn's Batcher trait to stack a Vec<InputFeatures>
// into the tensor bundle the relation encoder consumes.
//
//   Input:  N examples, each padded to S tokens, F false labels
//   Output: RelationBatch with
//             input_ids, attention_mask, token_type_ids,
//             e1_mask, e2_mask                → [N, S]
//             false_labels                    → [N, F]
//             labels, e1_ids, e2_ids          → [N]
//
// How stacking works here:
//   Every row is flattened into one long Vec, then reshaped:
//   [x1_t1, ..., x1_tS, x2_t1, ..., xN_tS] → [N, S]
//
// Why check widths first?
//   The reshape only succeeds when every row has exactly S (or F)
//   values. Rows coming out of a training batch always do, but
//   rows read back from a memory file may not. try_batch checks
//   every row and names the first ragged one instead of letting
//   the reshape abort the process.
//
// Reference: Burn Book §4 (Batcher)

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
};
use thiserror::Error;

use crate::domain::features::InputFeatures;

// ─── RelationBatch ────────────────────────────────────────────────────────────
/// A batch of relation examples ready for the forward pass.
/// All tensors have batch_size as their first dimension.
#[derive(Debug, Clone)]
///
/// B is the Burn Backend (NdArray for replay on the CPU, Wgpu
/// for training).
pub struct RelationBatch<B: Backend> {
    /// Token ids, with the entity markers — shape: [batch_size, seq_len]
    pub input_ids: Tensor<B, 2, Int>,

    /// 1 = real token, 0 = padding — shape: [batch_size, seq_len]
    pub attention_mask: Tensor<B, 2, Int>,

    /// Segment ids — shape: [batch_size, seq_len]
    pub token_type_ids: Tensor<B, 2, Int>,

    /// Negative relation labels sampled for each example
    /// — shape: [batch_size, num_false]
    pub false_labels: Tensor<B, 2, Int>,

    /// Gold relation label — shape: [batch_size]
    pub labels: Tensor<B, 1, Int>,

    /// 1 over the tokens of the first entity — shape: [batch_size, seq_len]
    pub e1_mask: Tensor<B, 2, Int>,

    /// 1 over the tokens of the second entity — shape: [batch_size, seq_len]
    pub e2_mask: Tensor<B, 2, Int>,

    /// Entity2id index of the first entity — shape: [batch_size]
    pub e1_ids: Tensor<B, 1, Int>,

    /// Entity2id index of the second entity — shape: [batch_size]
    pub e2_ids: Tensor<B, 1, Int>,
}

impl<B: Backend> RelationBatch<B> {
    pub fn batch_size(&self) -> usize {
        self.labels.dims()[0]
    }
}

// ─── Row widths ───────────────────────────────────────────────────────────────

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BatchShapeError {
    #[error("example {index}: {field} has {found} values, expected {expected}")]
    RaggedRow {
        index:    usize,
        field:    &'static str,
        expected: usize,
        found:    usize,
    },
}

/// Widths shared by every example: (seq_len, num_false).
/// The first example sets them; any other example that differs
/// is reported by position and field.
pub fn check_widths(items: &[InputFeatures]) -> Result<(usize, usize), BatchShapeError> {
    let Some(first) = items.first() else {
        return Ok((0, 0));
    };
    let seq_len   = first.seq_len();
    let false_len = first.false_labels.len();

    for (index, f) in items.iter().enumerate() {
        let rows: [(&'static str, usize, usize); 6] = [
            ("input_ids",      f.input_ids.len(),      seq_len),
            ("attention_mask", f.attention_mask.len(), seq_len),
            ("token_type_ids", f.token_type_ids.len(), seq_len),
            ("e1_mask",        f.e1_mask.len(),        seq_len),
            ("e2_mask",        f.e2_mask.len(),        seq_len),
            ("false_labels",   f.false_labels.len(),   false_len),
        ];
        if let Some(&(field, found, expected)) = rows.iter().find(|(_, found, want)| found != want) {
            return Err(BatchShapeError::RaggedRow { index, field, expected, found });
        }
    }
    Ok((seq_len, false_len))
}

// ─── RelationBatcher ──────────────────────────────────────────────────────────
/// Holds the target device so tensors are created on the right
/// GPU/CPU.
#[derive(Clone, Debug)]
pub struct RelationBatcher<B: Backend> {
    /// Device every tensor of the batch is created on
    pub device: B::Device,
}

impl<B: Backend> RelationBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }

    /// Flatten one Vec<i64> per example into a [rows, width] tensor
    fn stack<'a>(
        &self,
        rows:  impl Iterator<Item = &'a Vec<i64>>,
        count: usize,
        width: usize,
    ) -> Tensor<B, 2, Int> {
        let flat: Vec<i64> = rows.flat_map(|r| r.iter().copied()).collect();
        Tensor::<B, 1, Int>::from_ints(flat.as_slice(), &self.device)
            .reshape([count, width])
    }

    fn column(&self, values: Vec<i64>) -> Tensor<B, 1, Int> {
        Tensor::<B, 1, Int>::from_ints(values.as_slice(), &self.device)
    }

    /// Stack `items`, rejecting ragged rows instead of panicking.
    pub fn try_batch(&self, items: Vec<InputFeatures>) -> Result<RelationBatch<B>, BatchShapeError> {
        let (seq_len, false_len) = check_widths(&items)?;
        Ok(self.stack_all(&items, seq_len, false_len))
    }

    fn stack_all(&self, items: &[InputFeatures], seq_len: usize, false_len: usize) -> RelationBatch<B> {
        let n = items.len();
        RelationBatch {
            input_ids:      self.stack(items.iter().map(|f| &f.input_ids), n, seq_len),
            attention_mask: self.stack(items.iter().map(|f| &f.attention_mask), n, seq_len),
            token_type_ids: self.stack(items.iter().map(|f| &f.token_type_ids), n, seq_len),
            false_labels:   self.stack(items.iter().map(|f| &f.false_labels), n, false_len),
            labels:         self.column(items.iter().map(|f| f.label_id).collect()),
            e1_mask:        self.stack(items.iter().map(|f| &f.e1_mask), n, seq_len),
            e2_mask:        self.stack(items.iter().map(|f| &f.e2_mask), n, seq_len),
            e1_ids:         self.column(items.iter().map(|f| f.e1_id).collect()),
            e2_ids:         self.column(items.iter().map(|f| f.e2_id).collect()),
        }
    }
}

/// Used by Burn's DataLoader, whose items come from one padded
/// dataset and so share the widths of the first example.
/// Callers holding rows of unknown shape go through try_batch.
impl<B: Backend> Batcher<InputFeatures, RelationBatch<B>> for RelationBatcher<B> {
    fn batch(&self, items: Vec<InputFeatures>) -> RelationBatch<B> {
        let seq_len   = items.first().map_or(0, InputFeatures::seq_len);
        let false_len = items.first().map_or(0, |f| f.false_labels.len());
        self.stack_all(&items, seq_len, false_len)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    fn features(seq_len: usize, num_false: usize) -> InputFeatures {
        InputFeatures {
            input_ids:      vec![7; seq_len],
            attention_mask: vec![1; seq_len],
            token_type_ids: vec![0; seq_len],
            false_labels:   vec![3; num_false],
            label_id:       1,
            e1_mask:        vec![0; seq_len],
            e2_mask:        vec![0; seq_len],
            e1_id:          4,
            e2_id:          5,
        }
    }

    #[test]
    fn test_try_batch_shapes() {
        let batcher = RelationBatcher::<NdArray>::new(Default::default());
        let batch = batcher.try_batch(vec![features(4, 2), features(4, 2), features(4, 2)]).unwrap();

        assert_eq!(batch.batch_size(), 3);
        assert_eq!(batch.input_ids.dims(), [3, 4]);
        assert_eq!(batch.false_labels.dims(), [3, 2]);
        assert_eq!(batch.e2_ids.dims(), [3]);
    }

    #[test]
    fn test_ragged_input_ids_rejected() {
        let batcher = RelationBatcher::<NdArray>::new(Default::default());
        let err = batcher
            .try_batch(vec![features(4, 2), features(6, 2), features(4, 2)])
            .unwrap_err();
        assert_eq!(err, BatchShapeError::RaggedRow {
            index: 1, field: "input_ids", expected: 4, found: 6,
        });
    }

    #[test]
    fn test_ragged_false_labels_rejected() {
        let mut odd = features(4, 2);
        odd.false_labels.push(9);
        let err = check_widths(&[features(4, 2), features(4, 2), odd]).unwrap_err();
        assert_eq!(err, BatchShapeError::RaggedRow {
            index: 2, field: "false_labels", expected: 2, found: 3,
        });
    }

    #[test]
    fn test_empty_has_zero_widths() {
        assert_eq!(check_widths(&[]), Ok((0, 0)));
    }
}
