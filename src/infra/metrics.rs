// ============================================================
// Layer 6 — Evaluation Metrics Logger
// ============================================================
// Appends one row per evaluation pass to a CSV file so a whole
// continual-learning run (one evaluation per task) can be
// plotted afterwards.
//
// Output file: <dir>/eval_metrics.csv
//
//   task,num_examples,whole_acc,average_acc
//   task_1,1078,0.912000,0.098300
//   task_2,2158,0.874000,0.187100
//   ...
//
// Reference: Rust Book §12 (I/O and File Handling)

use anyhow::Result;
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::PathBuf,
};
use serde::{Deserialize, Serialize};

use crate::ml::evaluation::EvalMetrics;

/// One row of the evaluation log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalRecord {
    /// Name of the evaluated task, e.g. "task_3"
    pub task: String,

    /// Number of scored predictions
    pub num_examples: usize,

    /// Whole-set and task-averaged accuracy
    pub metrics: EvalMetrics,
}

impl EvalRecord {
    pub fn new(task: impl Into<String>, num_examples: usize, metrics: EvalMetrics) -> Self {
        Self { task: task.into(), num_examples, metrics }
    }
}

/// Logs evaluation results to a CSV file for later analysis.
pub struct MetricsLogger {
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Create the logger, writing the CSV header if the file is new.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;

        let csv_path = dir.join("eval_metrics.csv");

        // Existing logs are appended to across runs
        if !csv_path.exists() {
            let mut f = fs::File::create(&csv_path)?;
            writeln!(f, "task,num_examples,whole_acc,average_acc")?;
            tracing::debug!("Created metrics CSV: '{}'", csv_path.display());
        }

        Ok(Self { csv_path })
    }

    /// Append one evaluation as a new row.
    pub fn log(&self, r: &EvalRecord) -> Result<()> {
        let mut f = OpenOptions::new()
            .append(true)
            .open(&self.csv_path)?;

        writeln!(
            f,
            "{},{},{:.6},{:.6}",
            r.task,
            r.num_examples,
            r.metrics.whole_acc,
            r.metrics.average_acc,
        )?;

        tracing::debug!(
            "Logged {} metrics: whole_acc={:.4}, average_acc={:.4}",
            r.task,
            r.metrics.whole_acc,
            r.metrics.average_acc,
        );

        Ok(())
    }

    pub fn csv_path(&self) -> &PathBuf {
        &self.csv_path
    }
}
