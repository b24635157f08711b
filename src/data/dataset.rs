// ============================================================
// Layer 4 — Relation Dataset
// ============================================================
// Implements Burn's Dataset trait over a Vec<InputFeatures>.
//
// Why a Dataset at all?
//   Burn's DataLoader only needs get(i) and len(). Wrapping the
//   replay memory the same way as a task's training split lets
//   one batcher serve both, and labels_in gives the per-task
//   view used when counting exemplars.
//
// Reference: Burn Book §4 (Dataset)

use burn::data::dataset::Dataset;

use crate::domain::features::InputFeatures;

/// In-memory relation examples, either a task's training split
/// or the replay memory accumulated across tasks.
pub struct RelationDataset {
    examples: Vec<InputFeatures>,
}

impl RelationDataset {
    pub fn new(examples: Vec<InputFeatures>) -> Self { Self { examples } }

    /// Examples whose gold label falls in `labels` (see TaskLayout::labels_of)
    pub fn labels_in(&self, labels: std::ops::Range<usize>) -> Vec<&InputFeatures> {
        self.examples
            .iter()
            .filter(|f| usize::try_from(f.label_id).map_or(false, |l| labels.contains(&l)))
            .collect()
    }
}

impl Dataset<InputFeatures> for RelationDataset {
    fn get(&self, index: usize) -> Option<InputFeatures> {
        self.examples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.examples.len()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn with_label(label_id: i64) -> InputFeatures {
        InputFeatures {
            input_ids:      vec![101, 102],
            attention_mask: vec![1, 1],
            token_type_ids: vec![0, 0],
            false_labels:   vec![],
            label_id,
            e1_mask:        vec![0, 0],
            e2_mask:        vec![0, 0],
            e1_id:          0,
            e2_id:          0,
        }
    }

    #[test]
    fn test_dataset_access() {
        let dataset = RelationDataset::new(vec![with_label(1), with_label(9), with_label(-1)]);
        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.get(1).map(|f| f.label_id), Some(9));
        assert!(dataset.get(3).is_none());
    }

    #[test]
    fn test_labels_in_range() {
        let dataset = RelationDataset::new(vec![with_label(1), with_label(9), with_label(7), with_label(-1)]);
        let task0: Vec<i64> = dataset.labels_in(0..8).iter().map(|f| f.label_id).collect();
        assert_eq!(task0, vec![1, 7]);
    }
}
