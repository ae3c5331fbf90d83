//! Static loop features for the interpolation heuristic.
//!
//! A single forward scan over the loop body producing aggregate counters and
//! the per-(opcode, type) histogram. Extraction is a pure function returning
//! a value; nothing is accumulated into long-lived state, so analyses of
//! different loops are independent.

use std::collections::HashMap;

use crate::body::LoopBody;
use crate::types::{Opcode, PhiKind, ValueType};

/// Occurrence count per (mnemonic, operand type) pair, e.g. `(Mul, I32)`.
pub type TypeHistogram = HashMap<(Opcode, ValueType), u32>;

/// Aggregate static features of one loop body.
#[derive(Debug, Clone, Default)]
pub struct LoopFeatures {
    /// Total instruction count.
    pub inst_count: u32,
    /// Unary/binary arithmetic instructions.
    pub compute_count: u32,
    /// Memory-effecting instructions (loads, stores).
    pub memory_count: u32,
    /// True if any header phi is a reduction accumulator.
    pub has_reductions: bool,
    pub histogram: TypeHistogram,
}

impl LoopFeatures {
    /// Occurrences of `(opcode, ty)` in the loop, 0 if absent.
    pub fn count(&self, opcode: Opcode, ty: ValueType) -> u32 {
        self.histogram.get(&(opcode, ty)).copied().unwrap_or(0)
    }

    /// Memory-to-compute instruction ratio.
    ///
    /// Defined as `+inf` for loops with no compute instructions, so every
    /// `ratio >= threshold` comparison in the heuristic sends a memory-only
    /// loop down its memory-bound branch.
    pub fn mem_compute_ratio(&self) -> f64 {
        if self.compute_count == 0 {
            f64::INFINITY
        } else {
            f64::from(self.memory_count) / f64::from(self.compute_count)
        }
    }
}

/// Scan `body` and collect its static features. O(instructions).
pub fn extract_features(body: &LoopBody) -> LoopFeatures {
    let mut features = LoopFeatures::default();

    for (_, inst) in body.insts() {
        features.inst_count += 1;
        if inst.opcode.is_compute() {
            features.compute_count += 1;
        }
        if inst.opcode.is_memory() {
            features.memory_count += 1;
        }
        *features.histogram.entry((inst.opcode, inst.ty)).or_insert(0) += 1;
    }

    features.has_reductions = body.header_phis().any(|(_, kind)| kind == PhiKind::Reduction);

    features
}
