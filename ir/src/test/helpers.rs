//! Builders for the loop shapes the analyses are exercised on.

use crate::body::LoopBody;
use crate::types::{InstKind, Opcode, PhiKind, ValueType};

/// `for (i = ..) { b[i] = a[i] + 1 }` — induction phi, load, add, store,
/// induction update, exit compare, branch.
pub fn simple_int_loop() -> LoopBody {
    let mut b = LoopBody::builder();
    let iv = b.phi(ValueType::I64, PhiKind::Induction);
    let load = b.push(Opcode::Load, ValueType::I32, &[iv]);
    let add = b.push(Opcode::Add, ValueType::I32, &[load]);
    b.push(Opcode::Store, ValueType::Void, &[iv, add]);
    let iv_next = b.push(Opcode::Add, ValueType::I64, &[iv]);
    let cmp = b.push(Opcode::ICmp, ValueType::I1, &[iv_next]);
    b.push(Opcode::Br, ValueType::Void, &[cmp]);
    b.set_latch_update(iv, iv_next).unwrap();
    b.finish().unwrap()
}

/// `acc += a[i]` — a reduction loop with no store and no multiply.
pub fn int_sum_reduction_loop() -> LoopBody {
    let mut b = LoopBody::builder();
    let iv = b.phi(ValueType::I64, PhiKind::Induction);
    let acc = b.phi(ValueType::I32, PhiKind::Reduction);
    let load = b.push(Opcode::Load, ValueType::I32, &[iv]);
    let acc_next = b.push(Opcode::Add, ValueType::I32, &[acc, load]);
    let iv_next = b.push(Opcode::Add, ValueType::I64, &[iv]);
    let cmp = b.push(Opcode::ICmp, ValueType::I1, &[iv_next]);
    b.push(Opcode::Br, ValueType::Void, &[cmp]);
    b.set_latch_update(iv, iv_next).unwrap();
    b.set_latch_update(acc, acc_next).unwrap();
    b.finish().unwrap()
}

/// A loop whose only arithmetic is floating point.
pub fn float_loop() -> LoopBody {
    let mut b = LoopBody::builder();
    let iv = b.phi(ValueType::I64, PhiKind::Induction);
    let load = b.push(Opcode::Load, ValueType::F32, &[iv]);
    let fadd = b.push(Opcode::FAdd, ValueType::F32, &[load]);
    b.push(Opcode::Store, ValueType::Void, &[iv, fadd]);
    let iv_next = b.push(Opcode::Add, ValueType::I64, &[iv]);
    let cmp = b.push(Opcode::ICmp, ValueType::I1, &[iv_next]);
    b.push(Opcode::Br, ValueType::Void, &[cmp]);
    b.set_latch_update(iv, iv_next).unwrap();
    b.finish().unwrap()
}

/// An otherwise-legal integer loop with one instruction of the given kind
/// spliced in.
pub fn loop_with_kind(kind: InstKind) -> LoopBody {
    let mut b = LoopBody::builder();
    let iv = b.phi(ValueType::I64, PhiKind::Induction);
    let load = b.push(Opcode::Load, ValueType::I32, &[iv]);
    b.push_kind(Opcode::Select, ValueType::I32, &[load], kind);
    let iv_next = b.push(Opcode::Add, ValueType::I64, &[iv]);
    let cmp = b.push(Opcode::ICmp, ValueType::I1, &[iv_next]);
    b.push(Opcode::Br, ValueType::Void, &[cmp]);
    b.set_latch_update(iv, iv_next).unwrap();
    b.finish().unwrap()
}

/// An otherwise-legal loop with a header phi of the given kind.
pub fn loop_with_header_phi(kind: PhiKind) -> LoopBody {
    let mut b = LoopBody::builder();
    let iv = b.phi(ValueType::I64, PhiKind::Induction);
    let phi = b.phi(ValueType::I32, kind);
    let load = b.push(Opcode::Load, ValueType::I32, &[iv]);
    let next = b.push(Opcode::Or, ValueType::I32, &[phi, load]);
    let iv_next = b.push(Opcode::Add, ValueType::I64, &[iv]);
    let cmp = b.push(Opcode::ICmp, ValueType::I1, &[iv_next]);
    b.push(Opcode::Br, ValueType::Void, &[cmp]);
    b.set_latch_update(iv, iv_next).unwrap();
    b.set_latch_update(phi, next).unwrap();
    b.finish().unwrap()
}
