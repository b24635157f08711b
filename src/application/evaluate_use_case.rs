// ============================================================
// Layer 2 — EvaluateUseCase
// ============================================================
// Scores one evaluation pass:
//
//   Step 1: Load the task layout           (Layer 3 - domain)
//   Step 2: Read gold and predicted labels (Layer 4 - data)
//   Step 3: Compute the metrics            (Layer 5 - ml)
//   Step 4: Dump the official answer file  (Layer 4 - data)
//   Step 5: Append to the metrics CSV      (Layer 6 - infra)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::{loader::load_labels, prediction::write_prediction};
use crate::domain::label::{get_label, TaskLayout};
use crate::infra::metrics::{EvalRecord, MetricsLogger};
use crate::ml::evaluation::{compute_metrics, task_accuracies, EvalMetrics};

// ─── Evaluation Configuration ────────────────────────────────────────────────
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluateConfig {
    pub gold_file:   String,
    pub pred_file:   String,
    /// Name of the evaluated task, used in logs and the CSV
    pub task_name:   String,
    /// JSON TaskLayout; the built-in 10 × 8 table when absent
    pub layout_file: Option<String>,
    /// Official-format answer file to write
    pub output_file: Option<String>,
    /// Directory holding eval_metrics.csv
    pub metrics_dir: Option<String>,
}

/// Everything the CLI reports back to the user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalReport {
    pub task_name:    String,
    pub num_examples: usize,
    pub metrics:      EvalMetrics,
    /// Per-task accuracy against the fixed sample table
    pub per_task:     Vec<f64>,
}

pub struct EvaluateUseCase {
    config: EvaluateConfig,
}

impl EvaluateUseCase {
    pub fn new(config: EvaluateConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<EvalReport> {
        let cfg = &self.config;

        // ── Step 1: Task layout ──────────────────────────────────────────────
        let layout = TaskLayout::resolve(cfg.layout_file.as_deref())?;
        tracing::debug!(
            "Task layout: {} tasks × {} labels",
            layout.num_tasks(),
            layout.labels_per_task
        );

        // ── Step 2: Labels ───────────────────────────────────────────────────
        let gold  = load_labels(&cfg.gold_file)?;
        let preds = load_labels(&cfg.pred_file)?;
        tracing::info!("Scoring {} predictions against {} gold labels", preds.len(), gold.len());

        // ── Step 3: Metrics ──────────────────────────────────────────────────
        let metrics = compute_metrics(&cfg.task_name, &preds, &gold, &layout)
            .with_context(|| format!("Cannot score '{}'", cfg.pred_file))?;
        let per_task = task_accuracies(&gold, &preds, &layout)?;

        // ── Step 4: Official answer file ─────────────────────────────────────
        if let Some(output_file) = &cfg.output_file {
            write_prediction(output_file, &preds, &get_label(cfg))?;
        }

        // ── Step 5: Metrics CSV ──────────────────────────────────────────────
        if let Some(dir) = &cfg.metrics_dir {
            let logger = MetricsLogger::new(dir)?;
            logger.log(&EvalRecord::new(&cfg.task_name, preds.len(), metrics))?;
        }

        Ok(EvalReport {
            task_name:    cfg.task_name.clone(),
            num_examples: preds.len(),
            metrics,
            per_task,
        })
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn config(dir: &std::path::Path) -> EvaluateConfig {
        EvaluateConfig {
            gold_file:   dir.join("gold.txt").to_string_lossy().into_owned(),
            pred_file:   dir.join("pred.txt").to_string_lossy().into_owned(),
            task_name:   "task_1".to_string(),
            layout_file: None,
            output_file: Some(dir.join("proposed_answers.txt").to_string_lossy().into_owned()),
            metrics_dir: Some(dir.join("metrics").to_string_lossy().into_owned()),
        }
    }

    #[test]
    fn test_full_evaluation() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("gold.txt"), "0\n0\n8\n8\n16\n").unwrap();
        fs::write(dir.path().join("pred.txt"), "0\n0\n8\n8\n16\n").unwrap();

        let report = EvaluateUseCase::new(config(dir.path())).execute().unwrap();

        assert_eq!(report.num_examples, 5);
        assert_eq!(report.metrics.whole_acc, 1.0);
        let expected = (2.0 / 1078.0 + 2.0 / 1080.0 + 1.0 / 1085.0) / 10.0;
        assert!((report.metrics.average_acc - expected).abs() < 1e-12);
        assert_eq!(report.per_task.len(), 10);

        let answers = fs::read_to_string(dir.path().join("proposed_answers.txt")).unwrap();
        assert_eq!(answers.lines().next(), Some("8001\t0"));
        assert_eq!(answers.lines().count(), 5);

        let csv = fs::read_to_string(dir.path().join("metrics").join("eval_metrics.csv")).unwrap();
        assert!(csv.lines().nth(1).unwrap().starts_with("task_1,5,1.000000,"));
    }

    #[test]
    fn test_length_mismatch_fails() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("gold.txt"), "0 1 2").unwrap();
        fs::write(dir.path().join("pred.txt"), "0 1").unwrap();

        let err = EvaluateUseCase::new(config(dir.path())).execute().unwrap_err();
        assert!(format!("{err:#}").contains("differ in length"));
        assert!(!dir.path().join("proposed_answers.txt").exists());
    }

    #[test]
    fn test_custom_layout_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("gold.txt"), "0 1 2 3").unwrap();
        fs::write(dir.path().join("pred.txt"), "0 1 2 0").unwrap();
        let layout = dir.path().join("layout.json");
        fs::write(&layout, r#"{"labels_per_task": 2, "samples_per_task": [2, 2]}"#).unwrap();

        let mut cfg = config(dir.path());
        cfg.layout_file = Some(layout.to_string_lossy().into_owned());
        cfg.output_file = None;
        cfg.metrics_dir = None;

        let report = EvaluateUseCase::new(cfg).execute().unwrap();
        assert_eq!(report.metrics.whole_acc, 0.75);
        assert!((report.metrics.average_acc - (1.0 + 0.5) / 2.0).abs() < 1e-12);
    }
}
