// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Moves relation examples between the training driver, the
// Burn tensors, and the files on disk:
//
//   label files ──► loader        → gold / predicted label ids
//   predictions ──► prediction    → official scorer dump
//
//   InputFeatures ─► RelationDataset ─► RelationBatcher ─► RelationBatch
//                                                              │
//   replay memory ◄── save_memory ◄── convert_inputs_to_features
//
//   splitter      → fixed-size slices of the replay memory
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

/// Reads gold / predicted label files
pub mod loader;

/// Writes the official-format prediction file
pub mod prediction;

/// Implements Burn's Dataset trait for relation examples
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;

/// Pulls a single example back out of a tensor batch
pub mod convert;

/// Flattens per-task candidate memories into the replay memory
pub mod memory;

/// Cuts a sequence into fixed-size slices
pub mod splitter;
