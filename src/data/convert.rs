// ============================================================
// Layer 4 — Batch → InputFeatures
// ============================================================
// The inverse of the batcher for a single row: pulls example i
// out of a RelationBatch back into plain host numbers. Used when
// the driver selects exemplars from a live batch to keep in the
// replay memory.

use burn::prelude::*;
use thiserror::Error;

use crate::data::batcher::RelationBatch;
use crate::domain::features::InputFeatures;

#[derive(Debug, Error, PartialEq)]
pub enum ConvertError {
    #[error("row {index} is out of range for `{field}` (batch size {batch_size})")]
    IndexOutOfRange { field: &'static str, index: usize, batch_size: usize },

    #[error("cannot read `{field}` back from the device: {reason}")]
    Data { field: &'static str, reason: String },
}

fn check_row(field: &'static str, batch_size: usize, index: usize) -> Result<(), ConvertError> {
    if index >= batch_size {
        return Err(ConvertError::IndexOutOfRange { field, index, batch_size });
    }
    Ok(())
}

fn row<B: Backend>(field: &'static str, t: &Tensor<B, 2, Int>, i: usize) -> Result<Vec<i64>, ConvertError> {
    let [rows, width] = t.dims();
    check_row(field, rows, i)?;

    t.clone()
        .slice([i..i + 1, 0..width])
        .into_data()
        .convert::<i64>()
        .to_vec::<i64>()
        .map_err(|e| ConvertError::Data { field, reason: format!("{e:?}") })
}

fn scalar<B: Backend>(field: &'static str, t: &Tensor<B, 1, Int>, i: usize) -> Result<i64, ConvertError> {
    let [rows] = t.dims();
    check_row(field, rows, i)?;

    let values = t
        .clone()
        .slice([i..i + 1])
        .into_data()
        .convert::<i64>()
        .to_vec::<i64>()
        .map_err(|e| ConvertError::Data { field, reason: format!("{e:?}") })?;

    values
        .first()
        .copied()
        .ok_or_else(|| ConvertError::Data { field, reason: "empty slice".to_string() })
}

/// Materialise row `i` of `inputs` as an InputFeatures record.
pub fn convert_inputs_to_features<B: Backend>(
    inputs: &RelationBatch<B>,
    i:      usize,
) -> Result<InputFeatures, ConvertError> {
    Ok(InputFeatures {
        input_ids:      row("input_ids", &inputs.input_ids, i)?,
        attention_mask: row("attention_mask", &inputs.attention_mask, i)?,
        token_type_ids: row("token_type_ids", &inputs.token_type_ids, i)?,
        false_labels:   row("false_labels", &inputs.false_labels, i)?,
        label_id:       scalar("labels", &inputs.labels, i)?,
        e1_mask:        row("e1_mask", &inputs.e1_mask, i)?,
        e2_mask:        row("e2_mask", &inputs.e2_mask, i)?,
        e1_id:          scalar("e1_ids", &inputs.e1_ids, i)?,
        e2_id:          scalar("e2_ids", &inputs.e2_ids, i)?,
    })
}
