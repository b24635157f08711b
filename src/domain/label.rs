// ============================================================
// Layer 3 — Relation Label Space
// ============================================================
// The relation taxonomy is a fixed list of 80 integer labels
// (including "no relation"). For continual learning the labels
// are grouped into 10 tasks of 8 contiguous labels each:
//
//   task 0 → labels  0..8
//   task 1 → labels  8..16
//   ...
//   task 9 → labels 72..80
//
// The per-task sample counts are the sizes of each task's
// evaluation split. They are used as the normaliser of the
// task-averaged accuracy, so they must describe the evaluation
// set actually being scored. TaskLayout keeps them swappable.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// Total number of relation labels
pub const NUM_LABELS: usize = 80;

/// Number of contiguous labels that make up one task
pub const LABELS_PER_TASK: usize = 8;

/// Evaluation-set population of each task, in task order
pub const DEFAULT_SAMPLES_PER_TASK: [usize; 10] =
    [1078, 1080, 1085, 1132, 1082, 1077, 1056, 1099, 1090, 1123];

/// Return the ordered list of relation label ids.
///
/// The configuration is accepted so every factory in the crate
/// has the same shape; it does not change the result.
pub fn get_label<C>(_cfg: &C) -> Vec<usize> {
    (0..NUM_LABELS).collect()
}

/// How labels are grouped into tasks, and how many evaluation
/// samples each task has.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskLayout {
    pub labels_per_task:  usize,
    pub samples_per_task: Vec<usize>,
}

impl Default for TaskLayout {
    fn default() -> Self {
        Self {
            labels_per_task:  LABELS_PER_TASK,
            samples_per_task: DEFAULT_SAMPLES_PER_TASK.to_vec(),
        }
    }
}

impl TaskLayout {
    pub fn num_tasks(&self) -> usize {
        self.samples_per_task.len()
    }

    pub fn num_labels(&self) -> usize {
        self.num_tasks() * self.labels_per_task
    }

    /// Task a label belongs to. Labels outside the label space
    /// map to a task id >= num_tasks().
    pub fn task_of(&self, label: usize) -> usize {
        label / self.labels_per_task
    }

    /// Labels belonging to `task`, as a half-open range
    pub fn labels_of(&self, task: usize) -> std::ops::Range<usize> {
        let start = task * self.labels_per_task;
        start..start + self.labels_per_task
    }

    /// Reject layouts that would divide by zero when scoring.
    pub fn validate(&self) -> Result<()> {
        if self.labels_per_task == 0 {
            anyhow::bail!("labels_per_task must be positive");
        }
        if self.samples_per_task.is_empty() {
            anyhow::bail!("task layout must contain at least one task");
        }
        if let Some(task) = self.samples_per_task.iter().position(|&n| n == 0) {
            anyhow::bail!("task {task} has a sample count of zero");
        }
        Ok(())
    }

    /// Load a layout from a JSON file such as
    /// `{"labels_per_task": 8, "samples_per_task": [1078, ...]}`
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("Cannot read task layout '{}'", path.display()))?;
        let layout: TaskLayout = serde_json::from_str(&json)
            .with_context(|| format!("Invalid task layout in '{}'", path.display()))?;
        layout.validate()?;
        Ok(layout)
    }

    /// The layout in `path` when one is given, the built-in one otherwise
    pub fn resolve(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None       => Ok(Self::default()),
        }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_list_is_ordered() {
        let labels = get_label(&());
        assert_eq!(labels.len(), NUM_LABELS);
        assert_eq!(labels.first(), Some(&0));
        assert_eq!(labels.last(), Some(&79));
        assert!(labels.windows(2).all(|w| w[1] == w[0] + 1));
    }

    #[test]
    fn test_tasks_partition_label_space() {
        let layout = TaskLayout::default();
        assert_eq!(layout.num_tasks(), 10);
        assert_eq!(layout.num_labels(), NUM_LABELS);

        let mut per_task = vec![0usize; layout.num_tasks()];
        for label in get_label(&()) {
            let task = layout.task_of(label);
            assert!(task < 10);
            assert!(layout.labels_of(task).contains(&label));
            per_task[task] += 1;
        }
        assert!(per_task.iter().all(|&n| n == LABELS_PER_TASK));
    }

    #[test]
    fn test_validate_rejects_zero_counts() {
        let layout = TaskLayout { labels_per_task: 8, samples_per_task: vec![10, 0] };
        assert!(layout.validate().is_err());
        let layout = TaskLayout { labels_per_task: 0, samples_per_task: vec![10] };
        assert!(layout.validate().is_err());
        assert!(TaskLayout::default().validate().is_ok());
    }

    #[test]
    fn test_layout_from_file() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("layout.json");
        fs::write(&path, r#"{"labels_per_task": 4, "samples_per_task": [5, 6]}"#).unwrap();

        let layout = TaskLayout::from_file(&path).unwrap();
        assert_eq!(layout.num_labels(), 8);
        assert_eq!(layout.task_of(5), 1);
    }

    #[test]
    fn test_resolve_falls_back_to_default() {
        assert_eq!(TaskLayout::resolve(None).unwrap(), TaskLayout::default());
        assert!(TaskLayout::resolve(Some("no/such/layout.json")).is_err());
    }
}
