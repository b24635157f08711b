// ============================================================
// Layer 4 — Prediction File Writer
// ============================================================
// Writes predictions in the format the official scorer reads:
// one line per example, the example id (8001 + position) and
// the relation label, tab separated.
//
//   8001	3
//   8002	0
//
// Ids start at 8001 and labels are written as they appear in
// the label list; the external scorer depends on both.

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Id of the first example in the official test split
pub const FIRST_EXAMPLE_ID: usize = 8001;

#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("prediction {pred} at position {index} is not in the label list ({num_labels} labels)")]
    UnknownLabel { index: usize, pred: usize, num_labels: usize },

    #[error("cannot write prediction file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Write `preds` to `output_file`, mapping each prediction
/// through `relation_labels`.
pub fn write_prediction<L: std::fmt::Display>(
    output_file:     impl AsRef<Path>,
    preds:           &[usize],
    relation_labels: &[L],
) -> Result<(), PredictionError> {
    let path = output_file.as_ref();

    // Validate before touching the file so a bad run leaves no partial dump
    if let Some((index, &pred)) = preds.iter().enumerate().find(|(_, &p)| p >= relation_labels.len()) {
        return Err(PredictionError::UnknownLabel { index, pred, num_labels: relation_labels.len() });
    }

    let io_err = |source| PredictionError::Io { path: path.to_path_buf(), source };

    let mut w = BufWriter::new(File::create(path).map_err(io_err)?);
    for (idx, &pred) in preds.iter().enumerate() {
        writeln!(w, "{}\t{}", FIRST_EXAMPLE_ID + idx, relation_labels[pred]).map_err(io_err)?;
    }
    w.flush().map_err(io_err)?;

    tracing::info!("Wrote {} predictions to '{}'", preds.len(), path.display());
    Ok(())
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::label::get_label;

    #[test]
    fn test_official_format() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("proposed_answers.txt");

        write_prediction(&path, &[3, 0], &get_label(&())).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().collect::<Vec<_>>(), vec!["8001\t3", "8002\t0"]);
    }

    #[test]
    fn test_labels_are_mapped_not_renumbered() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("answers.txt");

        write_prediction(&path, &[1, 0], &["Other", "Cause-Effect(e1,e2)"]).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "8001\tCause-Effect(e1,e2)\n8002\tOther\n");
    }

    #[test]
    fn test_unknown_prediction() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("answers.txt");

        let err = write_prediction(&path, &[0, 80], &get_label(&())).unwrap_err();
        assert!(matches!(err, PredictionError::UnknownLabel { index: 1, pred: 80, .. }));
        assert!(!path.exists());
    }
}
