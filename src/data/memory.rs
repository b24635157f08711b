// ============================================================
// Layer 4 — Replay Memory Accumulator
// ============================================================
// After training on a task the driver holds one CandidateMemory
// per task (score → exemplar). save_memory flattens them into
// the running replay memory:
//
//   memory      = [m1, m2]
//   memory_list = [{0.9: a, 0.1: b}, {0.5: c}]
//   → memory    = [m1, m2, a, b, c]
//
// Scores are ignored, order is list order then insertion order.
// There is no dedup and no capacity limit; bounding the memory
// is the caller's job.

use crate::domain::memory::CandidateMemory;

/// Append every payload of every mapping in `memory_list` to
/// `memory`.
pub fn save_memory<T: Clone>(memory: &mut Vec<T>, memory_list: &[CandidateMemory<T>]) {
    let before = memory.len();

    memory.reserve(memory_list.iter().map(CandidateMemory::len).sum());
    for candidates in memory_list {
        memory.extend(candidates.values().cloned());
    }

    tracing::debug!(
        "Replay memory grew from {} to {} exemplars ({} task mappings)",
        before,
        memory.len(),
        memory_list.len()
    );
}
