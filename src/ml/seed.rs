// ============================================================
// Layer 5 — Seeding
// ============================================================
// Makes a run reproducible by seeding every random source the
// training driver uses:
//
//   - the CPU Burn backend (NdArray): always
//   - the GPU Burn backend (Wgpu):    unless no_cuda is set
//   - a host StdRng returned to the caller, for shuffling and
//     memory sampling
//
// Backend seeds are process-wide state. There is no teardown:
// once set they stay set until the next call.

use burn::{
    backend::{NdArray, Wgpu},
    prelude::Backend,
};
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Value every random source is seeded with
    pub seed: u64,

    /// Skip the GPU backend, for CPU-only runs where creating a
    /// Wgpu device is not wanted
    pub no_cuda: bool,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self { seed: 42, no_cuda: false }
    }
}

/// Seed the Burn backends selected by `cfg` and return a host
/// RNG seeded with the same value.
pub fn set_seed(cfg: &SeedConfig) -> StdRng {
    <NdArray as Backend>::seed(cfg.seed);

    if !cfg.no_cuda {
        <Wgpu as Backend>::seed(cfg.seed);
        tracing::debug!("Seeded NdArray and Wgpu backends with {}", cfg.seed);
    } else {
        tracing::debug!("Seeded NdArray backend with {} (GPU disabled)", cfg.seed);
    }

    StdRng::seed_from_u64(cfg.seed)
}
