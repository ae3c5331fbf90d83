//! Tests for the interpolation legality gate.

use test_case::test_case;

use crate::legality::is_legal_to_interpolate;
use crate::test::helpers::*;
use crate::types::{InstKind, Opcode, PhiKind, ValueType};

#[test]
fn clean_integer_loop_is_legal() {
    assert!(is_legal_to_interpolate(&simple_int_loop()));
}

#[test]
fn reduction_loop_is_legal() {
    // Plain reductions are fine; only the recurrence/mask/predication phis
    // are in the exclusion set.
    assert!(is_legal_to_interpolate(&int_sum_reduction_loop()));
}

#[test]
fn float_arithmetic_is_rejected() {
    assert!(!is_legal_to_interpolate(&float_loop()));
}

#[test_case(Opcode::FAdd ; "fadd")]
#[test_case(Opcode::FMul ; "fmul")]
#[test_case(Opcode::FDiv ; "fdiv")]
fn any_float_opcode_is_rejected(opcode: Opcode) {
    let mut b = crate::LoopBody::builder();
    let iv = b.phi(ValueType::I64, PhiKind::Induction);
    b.push(opcode, ValueType::F64, &[]);
    let iv_next = b.push(Opcode::Add, ValueType::I64, &[iv]);
    b.set_latch_update(iv, iv_next).unwrap();
    let body = b.finish().unwrap();

    assert!(!is_legal_to_interpolate(&body));
}

#[test]
fn float_typed_load_is_rejected() {
    // No float arithmetic at all, but a load produces an f32 that an
    // integer-typed user consumes.
    let mut b = crate::LoopBody::builder();
    let iv = b.phi(ValueType::I64, PhiKind::Induction);
    let load = b.push(Opcode::Load, ValueType::F32, &[iv]);
    b.push(Opcode::Store, ValueType::Void, &[iv, load]);
    let iv_next = b.push(Opcode::Add, ValueType::I64, &[iv]);
    b.set_latch_update(iv, iv_next).unwrap();
    let body = b.finish().unwrap();

    assert!(!is_legal_to_interpolate(&body));
}

#[test_case(InstKind::InterleaveGroup ; "interleave group")]
#[test_case(InstKind::VectorSelect ; "vector select")]
fn excluded_instruction_kinds_are_rejected(kind: InstKind) {
    assert!(!is_legal_to_interpolate(&loop_with_kind(kind)));
}

#[test_case(PhiKind::FirstOrderRecurrence ; "first order recurrence")]
#[test_case(PhiKind::ActiveLaneMask ; "active lane mask")]
#[test_case(PhiKind::Predicated ; "predicated phi")]
fn excluded_header_phis_are_rejected(kind: PhiKind) {
    assert!(!is_legal_to_interpolate(&loop_with_header_phi(kind)));
}

#[test_case(PhiKind::Induction ; "induction")]
#[test_case(PhiKind::Reduction ; "reduction")]
fn ordinary_header_phis_are_legal(kind: PhiKind) {
    assert!(is_legal_to_interpolate(&loop_with_header_phi(kind)));
}
