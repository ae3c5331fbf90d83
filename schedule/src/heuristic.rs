//! Legacy decision-tree estimator over static loop features.
//!
//! This is the fallback path when the scheduling-based search is unavailable
//! or deadlocks: a fixed tree of threshold rules on the instruction-type
//! histogram, the memory/compute ratio and the reduction flag. It is a pure
//! function of the features, so the same loop always gets the same factor.

use tracing::trace;
use weft_ir::{LoopFeatures, Opcode, ValueType};

/// Loops at or below this many instructions leave issue ports idle enough
/// that a second scalar copy is almost always free.
const SMALL_LOOP_INSTS: u32 = 8;

/// Memory/compute ratio above which a reduction loop is treated as
/// memory-bound.
const REDUCTION_MEMORY_BOUND_RATIO: f64 = 2.0;

/// Memory/compute ratio above which a plain loop is treated as memory-bound.
const MEMORY_BOUND_RATIO: f64 = 3.0;

/// Pick a scalar interpolation factor from static features alone.
///
/// The `+inf` ratio sentinel for compute-free loops satisfies every
/// `>= threshold` comparison below, so such loops consistently take the
/// memory-bound branches.
pub fn heuristic_si_factor(features: &LoopFeatures) -> u32 {
    let mul_i32 = features.count(Opcode::Mul, ValueType::I32);

    let factor = if features.has_reductions {
        if mul_i32 == 0 {
            // Reduction loops without multiplies keep the ALU ports idle;
            // integer-load reductions without wide bitwise ops tolerate the
            // deepest interleave.
            if features.count(Opcode::Load, ValueType::I32) > 0 && features.count(Opcode::Or, ValueType::I64) == 0 {
                4
            } else {
                2
            }
        } else if features.mem_compute_ratio() >= REDUCTION_MEMORY_BOUND_RATIO {
            2
        } else {
            1
        }
    } else if mul_i32 == 0 {
        if features.inst_count <= SMALL_LOOP_INSTS && features.count(Opcode::Store, ValueType::Void) == 0 {
            2
        } else if features.mem_compute_ratio() >= MEMORY_BOUND_RATIO {
            2
        } else {
            1
        }
    } else {
        // Multiply-heavy bodies already saturate the narrow mul pipes.
        1
    };

    trace!(
        factor,
        has_reductions = features.has_reductions,
        mul_i32,
        inst_count = features.inst_count,
        ratio = features.mem_compute_ratio(),
        "heuristic SIF"
    );
    factor
}
