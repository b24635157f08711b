// ============================================================
// Layer 2 — ReplayUseCase
// ============================================================
// Folds the candidate memories selected while training a task
// into the replay memory carried to the next task:
//
//   Step 1: Check the batch size and task layout
//   Step 2: Seed the backends and host RNG     (Layer 5 - ml)
//   Step 3: Read the existing replay memory    (JSON array)
//   Step 4: Read the per-task candidates       (JSON array of arrays)
//   Step 5: Append candidates to the memory    (Layer 4 - data)
//   Step 6: Check every row has the same width (Layer 4 - data)
//   Step 7: Write the memory back
//   Step 8: Count exemplars per task and build
//           replay batches on the CPU          (Layer 4 - data)
//
// Why is everything checked before Step 7?
//   save_memory never deduplicates. If the command wrote the file
//   and then failed, fixing the flag and running it again would
//   append the same candidates a second time. So every input that
//   can be rejected is rejected while memory.json is untouched.
//
// Candidates file layout, one inner array per task:
//
//   [
//     [ {"score": 0.93, "features": {...InputFeatures...}}, ... ],
//     [ {"score": 0.71, "features": {...}} ]
//   ]

use anyhow::{Context, Result};
use burn::{backend::NdArray, data::dataset::Dataset};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::data::{
    batcher::{check_widths, RelationBatcher},
    dataset::RelationDataset,
    memory::save_memory,
    splitter::{split_data, SplitError},
};
use crate::domain::{features::InputFeatures, label::TaskLayout, memory::CandidateMemory};
use crate::ml::seed::{set_seed, SeedConfig};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayConfig {
    /// JSON file with one array of scored candidates per task
    pub candidates_file: String,

    /// JSON replay memory, read, extended and written back.
    /// A missing file starts an empty memory.
    pub memory_file: String,

    /// Examples per replay batch, must be positive
    pub batch_size: usize,

    /// Shuffle the memory before cutting replay batches
    pub shuffle: bool,

    /// JSON task layout used for the per-task counts.
    /// None = the built-in 10 × 8 layout.
    pub layout_file: Option<String>,

    pub seed: SeedConfig,
}

/// One scored exemplar as stored in the candidates file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredExample {
    pub score:    f64,
    pub features: InputFeatures,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReplaySummary {
    /// Memory size before this run
    pub previous_size: usize,

    /// Candidates appended by this run
    pub added: usize,

    /// Memory size after this run
    pub memory_size: usize,

    /// Exemplars per task, by gold label
    pub per_task: Vec<usize>,

    /// Number of examples in each replay batch
    pub batch_sizes: Vec<usize>,
}

pub struct ReplayUseCase {
    config: ReplayConfig,
}

impl ReplayUseCase {
    pub fn new(config: ReplayConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<ReplaySummary> {
        let cfg = &self.config;

        // ── Step 1: Arguments ────────────────────────────────────────────────
        if cfg.batch_size == 0 {
            return Err(SplitError::ZeroBatchSize.into());
        }
        let layout = TaskLayout::resolve(cfg.layout_file.as_deref())?;

        // ── Step 2: Seeding ──────────────────────────────────────────────────
        let mut rng = set_seed(&cfg.seed);

        // ── Step 3: Existing memory ──────────────────────────────────────────
        let mut memory = read_memory(Path::new(&cfg.memory_file))?;
        let previous_size = memory.len();

        // ── Step 4: Candidates ───────────────────────────────────────────────
        let text = fs::read_to_string(&cfg.candidates_file)
            .with_context(|| format!("Cannot read candidates '{}'", cfg.candidates_file))?;
        let per_task: Vec<Vec<ScoredExample>> = serde_json::from_str(&text)
            .with_context(|| format!("Invalid candidates file '{}'", cfg.candidates_file))?;
        let memory_list: Vec<CandidateMemory<InputFeatures>> = per_task
            .into_iter()
            .map(|task| task.into_iter().map(|s| (s.score, s.features)).collect())
            .collect();

        // ── Step 5: Accumulate ───────────────────────────────────────────────
        save_memory(&mut memory, &memory_list);

        // ── Step 6: Row widths ───────────────────────────────────────────────
        // Positions past previous_size are candidates
        check_widths(&memory).with_context(|| {
            format!(
                "Replay memory rows differ in width ('{}' holds the first {} rows, '{}' the rest)",
                cfg.memory_file, previous_size, cfg.candidates_file
            )
        })?;

        // ── Step 7: Persist ──────────────────────────────────────────────────
        let json = serde_json::to_string(&memory)?;
        fs::write(&cfg.memory_file, json)
            .with_context(|| format!("Cannot write memory '{}'", cfg.memory_file))?;
        tracing::info!(
            "Replay memory: {} → {} exemplars, saved to '{}'",
            previous_size,
            memory.len(),
            cfg.memory_file
        );

        // ── Step 8: Replay batches ───────────────────────────────────────────
        let memory_size = memory.len();
        let dataset = RelationDataset::new(memory);
        let per_task: Vec<usize> = (0..layout.num_tasks())
            .map(|t| dataset.labels_in(layout.labels_of(t)).len())
            .collect();
        tracing::debug!("Replay exemplars per task: {:?}", per_task);

        let mut order: Vec<InputFeatures> = (0..dataset.len()).filter_map(|i| dataset.get(i)).collect();
        if cfg.shuffle {
            order.shuffle(&mut rng);
        }

        let batcher = RelationBatcher::<NdArray>::new(Default::default());
        let mut batch_sizes = Vec::new();
        for slice in split_data(&order, cfg.batch_size)? {
            let batch = batcher.try_batch(slice.to_vec())?;
            tracing::debug!("Replay batch: input_ids {:?}", batch.input_ids.dims());
            batch_sizes.push(batch.batch_size());
        }

        Ok(ReplaySummary {
            previous_size,
            added: memory_size - previous_size,
            memory_size,
            per_task,
            batch_sizes,
        })
    }
}

/// Read the replay memory; a missing or empty file is an empty memory.
fn read_memory(path: &Path) -> Result<Vec<InputFeatures>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let text = fs::read_to_string(path)
        .with_context(|| format!("Cannot read memory '{}'", path.display()))?;
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(&text)
        .with_context(|| format!("Invalid memory file '{}'", path.display()))
}
