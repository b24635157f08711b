// ============================================================
// Layer 5 — Evaluation Metrics
// ============================================================
// Two numbers are reported after every evaluation pass:
//
//   whole_acc   = correct / total predictions
//                 (plain micro accuracy, tasks ignored)
//
//   average_acc = mean over tasks of
//                   correct predictions whose PREDICTED label
//                   falls in the task
//                   ───────────────────────────────────────
//                   samples_per_task[task]
//
// Two properties of average_acc are deliberate and must be kept:
//   1. A correct prediction is bucketed by the predicted label.
//      Since it is correct, this equals the gold label's task.
//   2. The denominator is the fixed evaluation population of the
//      task (TaskLayout), not the number of gold examples seen in
//      this run. Scoring a subset of the evaluation set therefore
//      yields a proportionally smaller average_acc.
//
// Example with the default layout:
//   gold = pred = [0, 0, 8, 8, 16]
//   task 0 → 2 correct, task 1 → 2, task 2 → 1
//   average_acc = (2/1078 + 2/1080 + 1/1085) / 10

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::label::TaskLayout;

#[derive(Debug, Error, PartialEq)]
pub enum MetricError {
    #[error("gold and predicted labels differ in length ({gold} vs {pred})")]
    LengthMismatch { gold: usize, pred: usize },

    #[error("cannot score an empty prediction set")]
    Empty,

    #[error("label {label} is outside the label space (0..{num_labels})")]
    LabelOutOfRange { label: usize, num_labels: usize },

    #[error("invalid task layout: {0}")]
    InvalidLayout(String),
}

/// Result of one evaluation pass
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvalMetrics {
    pub average_acc: f64,
    pub whole_acc:   f64,
}

/// Check lengths, emptiness, labels, and layout before scoring.
fn check_inputs(key: &[usize], prediction: &[usize], layout: &TaskLayout) -> Result<(), MetricError> {
    if key.len() != prediction.len() {
        return Err(MetricError::LengthMismatch { gold: key.len(), pred: prediction.len() });
    }
    if prediction.is_empty() {
        return Err(MetricError::Empty);
    }
    if layout.labels_per_task == 0 || layout.samples_per_task.is_empty() {
        return Err(MetricError::InvalidLayout("no labels or no tasks".to_string()));
    }
    if layout.samples_per_task.contains(&0) {
        return Err(MetricError::InvalidLayout("zero sample count".to_string()));
    }

    let num_labels = layout.num_labels();
    if let Some(&label) = key.iter().chain(prediction).find(|&&l| l >= num_labels) {
        return Err(MetricError::LabelOutOfRange { label, num_labels });
    }
    Ok(())
}

/// Count correct predictions per task, bucketed by predicted label.
fn correct_by_task(key: &[usize], prediction: &[usize], layout: &TaskLayout) -> Vec<usize> {
    let mut counts = vec![0usize; layout.num_tasks()];
    for (&gold, &guess) in key.iter().zip(prediction) {
        if gold == guess {
            counts[layout.task_of(guess)] += 1;
        }
    }
    counts
}

/// Per-task accuracy: correct predictions in the task divided by
/// the task's fixed sample count.
pub fn task_accuracies(
    key:        &[usize],
    prediction: &[usize],
    layout:     &TaskLayout,
) -> Result<Vec<f64>, MetricError> {
    check_inputs(key, prediction, layout)?;

    Ok(correct_by_task(key, prediction, layout)
        .into_iter()
        .zip(&layout.samples_per_task)
        .map(|(correct, &total)| correct as f64 / total as f64)
        .collect())
}

/// Score predictions against gold labels.
///
/// `key` holds the gold labels, `prediction` the predicted ones.
/// Returns `(average_acc, whole_acc)`.
pub fn score(
    key:        &[usize],
    prediction: &[usize],
    layout:     &TaskLayout,
) -> Result<(f64, f64), MetricError> {
    let per_task = task_accuracies(key, prediction, layout)?;

    let correct = key.iter().zip(prediction).filter(|(g, p)| g == p).count();
    let whole_acc = correct as f64 / prediction.len() as f64;

    let average_acc = per_task.iter().sum::<f64>() / layout.num_tasks() as f64;

    Ok((average_acc, whole_acc))
}

/// Wrap `score` into the metrics record reported by the driver.
/// Note the argument order: predictions first, gold labels second.
pub fn acc_and_f1(
    preds:  &[usize],
    labels: &[usize],
    layout: &TaskLayout,
) -> Result<EvalMetrics, MetricError> {
    let (average_acc, whole_acc) = score(labels, preds, layout)?;
    Ok(EvalMetrics { average_acc, whole_acc })
}

/// Entry point used after an evaluation pass. `task` only names
/// the run in the log.
pub fn compute_metrics(
    task:   &str,
    preds:  &[usize],
    labels: &[usize],
    layout: &TaskLayout,
) -> Result<EvalMetrics, MetricError> {
    if preds.len() != labels.len() {
        return Err(MetricError::LengthMismatch { gold: labels.len(), pred: preds.len() });
    }
    let metrics = acc_and_f1(preds, labels, layout)?;
    tracing::info!(
        "[{}] whole_acc={:.4} average_acc={:.4} ({} examples)",
        task,
        metrics.whole_acc,
        metrics.average_acc,
        preds.len(),
    );
    Ok(metrics)
}

/// Fraction of positions where prediction equals gold.
pub fn simple_accuracy(preds: &[usize], labels: &[usize]) -> Result<f64, MetricError> {
    if preds.len() != labels.len() {
        return Err(MetricError::LengthMismatch { gold: labels.len(), pred: preds.len() });
    }
    if preds.is_empty() {
        return Err(MetricError::Empty);
    }
    let correct = preds.iter().zip(labels).filter(|(p, l)| p == l).count();
    Ok(correct as f64 / preds.len() as f64)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_identical_arrays() {
        let layout = TaskLayout::default();
        let labels = vec![0, 0, 8, 8, 16];
        let (average_acc, whole_acc) = score(&labels, &labels, &layout).unwrap();

        assert_eq!(whole_acc, 1.0);
        let expected = (2.0 / 1078.0 + 2.0 / 1080.0 + 1.0 / 1085.0) / 10.0;
        assert!((average_acc - expected).abs() < EPS);
    }

    #[test]
    fn test_all_wrong() {
        let layout = TaskLayout::default();
        let (average_acc, whole_acc) = score(&[0, 1], &[1, 0], &layout).unwrap();
        assert_eq!(whole_acc, 0.0);
        assert_eq!(average_acc, 0.0);
    }

    #[test]
    fn test_wrong_predictions_do_not_count_toward_any_task() {
        let layout = TaskLayout::default();
        // Only position 0 is correct; the miss predicts a task-9 label.
        let gold = [3, 10];
        let pred = [3, 79];
        let (average_acc, whole_acc) = score(&gold, &pred, &layout).unwrap();

        assert_eq!(whole_acc, 0.5);
        assert!((average_acc - (1.0 / 1078.0) / 10.0).abs() < EPS);
    }

    #[test]
    fn test_fixed_denominator_not_run_population() {
        // A perfect run on 3 task-3 examples is still normalised by 1132.
        let layout = TaskLayout::default();
        let labels = [24, 25, 31];
        let per_task = task_accuracies(&labels, &labels, &layout).unwrap();
        assert!((per_task[3] - 3.0 / 1132.0).abs() < EPS);
        assert!(per_task.iter().enumerate().all(|(t, &a)| t == 3 || a == 0.0));
    }

    #[test]
    fn test_length_mismatch() {
        let layout = TaskLayout::default();
        assert_eq!(
            score(&[0, 1], &[0], &layout),
            Err(MetricError::LengthMismatch { gold: 2, pred: 1 })
        );
        assert!(matches!(
            compute_metrics("dev", &[0], &[0, 1], &layout),
            Err(MetricError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn test_empty_input_is_guarded() {
        let layout = TaskLayout::default();
        assert_eq!(score(&[], &[], &layout), Err(MetricError::Empty));
        assert_eq!(simple_accuracy(&[], &[]), Err(MetricError::Empty));
    }

    #[test]
    fn test_out_of_range_label() {
        let layout = TaskLayout::default();
        assert_eq!(
            score(&[80], &[80], &layout),
            Err(MetricError::LabelOutOfRange { label: 80, num_labels: 80 })
        );
    }

    #[test]
    fn test_acc_and_f1_argument_order() {
        let layout = TaskLayout::default();
        let preds  = [0, 9, 9];
        let labels = [0, 9, 1];
        let metrics = acc_and_f1(&preds, &labels, &layout).unwrap();

        assert!((metrics.whole_acc - 2.0 / 3.0).abs() < EPS);
        let expected = (1.0 / 1078.0 + 1.0 / 1080.0) / 10.0;
        assert!((metrics.average_acc - expected).abs() < EPS);
    }

    #[test]
    fn test_custom_layout() {
        let layout = TaskLayout { labels_per_task: 2, samples_per_task: vec![4, 2] };
        let labels = [0, 1, 2];
        let (average_acc, whole_acc) = score(&labels, &labels, &layout).unwrap();
        assert_eq!(whole_acc, 1.0);
        assert!((average_acc - (2.0 / 4.0 + 1.0 / 2.0) / 2.0).abs() < EPS);
    }

    #[test]
    fn test_simple_accuracy() {
        assert_eq!(simple_accuracy(&[1, 2, 3, 4], &[1, 2, 0, 0]).unwrap(), 0.5);
    }
}
