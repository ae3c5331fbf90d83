//! Legality gate for scalar interpolation.
//!
//! A pure predicate evaluated before any scheduling work: loops containing
//! cross-iteration or predication constructs that cannot be duplicated, or
//! any floating-point value, are rejected outright.

use tracing::trace;

use crate::body::LoopBody;
use crate::types::{InstKind, PhiKind};

/// True iff every instruction in the loop may be duplicated into scalar
/// interpolation copies.
///
/// Rejects:
/// - the fixed exclusion set of operation kinds: interleave groups,
///   first-order-recurrence header phis, active-lane-mask header phis,
///   vector selects, and predicated-instruction phis;
/// - any instruction producing or consuming a floating-point value.
pub fn is_legal_to_interpolate(body: &LoopBody) -> bool {
    for (id, inst) in body.insts() {
        let excluded = match inst.kind {
            InstKind::InterleaveGroup | InstKind::VectorSelect => true,
            InstKind::HeaderPhi { kind, .. } => matches!(
                kind,
                PhiKind::FirstOrderRecurrence | PhiKind::ActiveLaneMask | PhiKind::Predicated
            ),
            InstKind::Normal => false,
        };
        if excluded {
            trace!(%id, ?inst.kind, "loop not interpolatable: excluded operation kind");
            return false;
        }

        if inst.ty.is_float() || inst.opcode.is_float_arith() {
            trace!(%id, ?inst.opcode, "loop not interpolatable: floating point");
            return false;
        }
        if inst.operands.iter().any(|&op| body.inst(op).ty.is_float()) {
            trace!(%id, "loop not interpolatable: floating-point operand");
            return false;
        }
    }
    true
}
