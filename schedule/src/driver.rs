//! Cost-model driver: the entry points the host vectorizer calls.
//!
//! Orchestrates legality, the repeated randomized scheduling search over
//! candidate factors, and the heuristic fallback, and enforces the safety
//! bound on the returned factor. All recoverable conditions degrade to
//! "do not interpolate" (factor 0); nothing here aborts compilation.

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;
use weft_ir::{LoopBody, extract_features, is_legal_to_interpolate};

use crate::config::CostModelConfig;
use crate::error::*;
use crate::graph::ScheduleGraph;
use crate::heuristic::heuristic_si_factor;
use crate::resources::{ResourceHandler, TargetProfile};
use crate::scheduler::list_schedule;

/// The scalar-interpolation cost model for one target.
#[derive(Debug, Clone)]
pub struct CostModel {
    profile: TargetProfile,
    config: CostModelConfig,
}

impl CostModel {
    pub fn new(profile: TargetProfile, config: CostModelConfig) -> Self {
        Self { profile, config }
    }

    pub fn config(&self) -> &CostModelConfig {
        &self.config
    }

    /// Choose a scalar interpolation factor for `body`.
    ///
    /// Returns 0 ("do not interpolate") when interpolation is disabled,
    /// illegal for this loop, or when the chosen factor would exceed
    /// `max_safe_sif` — a shrunk factor may no longer be profitable, so the
    /// bound never clamps, it vetoes.
    ///
    /// A nonzero `forced_sif` (or, failing that, `forced_count`) wins over
    /// the search, subject to the same safety bound.
    pub fn profitable_si_factor(
        &self,
        body: &LoopBody,
        forced_sif: u32,
        forced_count: u32,
        max_safe_sif: u32,
        enabled: bool,
    ) -> u32 {
        if !enabled {
            return 0;
        }
        if !is_legal_to_interpolate(body) {
            debug!("loop is not legal to interpolate");
            return 0;
        }

        let forced = if forced_sif > 0 { forced_sif } else { forced_count };
        if forced > 0 {
            debug!(forced, max_safe_sif, "user-forced interpolation factor");
            return Self::bounded(forced, max_safe_sif);
        }

        let suggested = match self.estimate_si_factor(body) {
            Ok(sif) => sif,
            Err(error) => {
                debug!(%error, "scheduling search failed, falling back to static heuristic");
                heuristic_si_factor(&extract_features(body))
            }
        };
        debug!(suggested, max_safe_sif, "scalar interpolation factor");
        Self::bounded(suggested, max_safe_sif)
    }

    /// Joint search over (VF, SIF) candidates.
    ///
    /// Scores each pair by best schedule length divided by `vf + sif`
    /// (iterations of the original loop retired per schedule) and returns
    /// the winner; `(1, 0)` when the loop cannot be interpolated.
    pub fn profitable_vf(&self, body: &LoopBody) -> (u32, u32) {
        if body.is_empty() || !is_legal_to_interpolate(body) {
            return (1, 0);
        }

        let mut handler = ResourceHandler::new(self.profile);
        let mut best: Option<(f64, u32, u32)> = None;

        for &vf in &self.config.vf_candidates {
            for sif in 0..=self.config.max_sif_candidates {
                let mut graph = ScheduleGraph::build(body, self.profile, vf, sif);
                let length = match self.best_length(&mut graph, &mut handler, u64::from(vf) << 24 | u64::from(sif)) {
                    Ok(len) => len,
                    Err(error) => {
                        debug!(%error, vf, sif, "trial failed, falling back to static heuristic");
                        return (1, heuristic_si_factor(&extract_features(body)));
                    }
                };
                let cost = f64::from(length) / f64::from(vf + sif);
                debug!(vf, sif, length, cost, "VF/SIF candidate");
                if best.is_none_or(|(b, ..)| cost < b) {
                    best = Some((cost, vf, sif));
                }
            }
        }

        match best {
            Some((_, vf, sif)) => (vf, sif),
            None => (1, 0),
        }
    }

    /// Render the chosen schedule for one candidate, for diagnostics.
    pub fn dump_schedule(&self, body: &LoopBody, vf: u32, sif: u32) -> Result<String> {
        let mut graph = ScheduleGraph::build(body, self.profile, vf, sif);
        let mut handler = ResourceHandler::new(self.profile);
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        list_schedule(&mut graph, &mut handler, self.config.cycle_budget, self.config.blend_weight, &mut rng)?;
        Ok(graph.dump())
    }

    /// Scheduling-based SIF estimation: for each candidate, the best of
    /// `repeat_factor` randomized trials, normalized by the candidate
    /// (approximating cycles per original iteration); smallest candidate
    /// wins ties.
    fn estimate_si_factor(&self, body: &LoopBody) -> Result<u32> {
        if body.is_empty() {
            return Ok(0);
        }

        let mut handler = ResourceHandler::new(self.profile);
        let mut best: Option<(f64, u32)> = None;

        for sif in 1..=self.config.max_sif_candidates.max(1) {
            let mut graph = ScheduleGraph::build(body, self.profile, 1, sif);
            let length = self.best_length(&mut graph, &mut handler, u64::from(sif))?;
            let normalized = f64::from(length) / f64::from(sif);
            debug!(sif, length, normalized, "SIF candidate");
            if best.is_none_or(|(b, _)| normalized < b) {
                best = Some((normalized, sif));
            }
        }

        Ok(best.map_or(0, |(_, sif)| sif))
    }

    /// Best (shortest) schedule length over `repeat_factor` trials.
    ///
    /// Each trial owns the graph (via reset) and a random stream derived
    /// from the base seed and `salt`, and the winner is chosen by `min`, so
    /// trial order cannot change the result.
    fn best_length(&self, graph: &mut ScheduleGraph, handler: &mut ResourceHandler, salt: u64) -> Result<u32> {
        let mut best: Option<u32> = None;
        for trial in 0..self.config.repeat_factor.max(1) {
            graph.reset();
            let mut rng = StdRng::seed_from_u64(self.config.seed.wrapping_add(salt << 32).wrapping_add(trial as u64));
            let length =
                list_schedule(graph, handler, self.config.cycle_budget, self.config.blend_weight, &mut rng)?;
            best = Some(best.map_or(length, |b| b.min(length)));
        }
        // repeat_factor is clamped to at least one trial.
        Ok(best.unwrap_or(0))
    }

    fn bounded(factor: u32, max_safe_sif: u32) -> u32 {
        if factor > max_safe_sif { 0 } else { factor }
    }
}
