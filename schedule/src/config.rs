//! Cost-model configuration.
//!
//! Provides typed configuration with a bon builder and environment-variable
//! fallbacks for quick experiments without recompiling the host.

use bon::bon;

/// Tunables for the scheduling-based SIF/VF search.
#[derive(Debug, Clone)]
pub struct CostModelConfig {
    /// Scheduling trials per candidate factor. The scheduler is randomized;
    /// the best (shortest) of `repeat_factor` samples is kept.
    pub repeat_factor: usize,
    /// Weight of the random term in port selection, in [0, 1].
    /// 0 = purely scarcity-driven, 1 = purely random among free ports.
    pub blend_weight: f32,
    /// Hard ceiling on simulated cycles per trial; exceeding it is reported
    /// as a scheduling deadlock.
    pub cycle_budget: u32,
    /// Highest SIF candidate the estimator will consider.
    pub max_sif_candidates: u32,
    /// Vectorization factors explored by the joint VF/SIF search.
    pub vf_candidates: Vec<u32>,
    /// Base seed for the per-trial random streams.
    pub seed: u64,
}

impl Default for CostModelConfig {
    fn default() -> Self {
        Self {
            repeat_factor: 10,
            blend_weight: 0.35,
            cycle_budget: 10_000,
            max_sif_candidates: 8,
            vf_candidates: vec![1, 2, 4, 8],
            seed: 0,
        }
    }
}

#[bon]
impl CostModelConfig {
    /// Create a configuration with builder pattern.
    #[builder]
    pub fn builder(
        #[builder(default = 10)] repeat_factor: usize,
        #[builder(default = 0.35)] blend_weight: f32,
        #[builder(default = 10_000)] cycle_budget: u32,
        #[builder(default = 8)] max_sif_candidates: u32,
        #[builder(default = vec![1, 2, 4, 8])] vf_candidates: Vec<u32>,
        #[builder(default = 0)] seed: u64,
    ) -> Self {
        Self { repeat_factor, blend_weight, cycle_budget, max_sif_candidates, vf_candidates, seed }
    }

    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// * `WEFT_REPEAT` - trials per candidate (default: 10)
    /// * `WEFT_BLEND` - random-term weight (default: 0.35)
    /// * `WEFT_CYCLE_BUDGET` - cycles per trial ceiling (default: 10000)
    /// * `WEFT_MAX_SIF` - highest SIF candidate (default: 8)
    /// * `WEFT_SEED` - base RNG seed (default: 0)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            repeat_factor: std::env::var("WEFT_REPEAT").ok().and_then(|s| s.parse().ok()).unwrap_or(defaults.repeat_factor),
            blend_weight: std::env::var("WEFT_BLEND")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(|w: f32| w.clamp(0.0, 1.0))
                .unwrap_or(defaults.blend_weight),
            cycle_budget: std::env::var("WEFT_CYCLE_BUDGET").ok().and_then(|s| s.parse().ok()).unwrap_or(defaults.cycle_budget),
            max_sif_candidates: std::env::var("WEFT_MAX_SIF").ok().and_then(|s| s.parse().ok()).unwrap_or(defaults.max_sif_candidates),
            vf_candidates: defaults.vf_candidates,
            seed: std::env::var("WEFT_SEED").ok().and_then(|s| s.parse().ok()).unwrap_or(defaults.seed),
        }
    }
}
