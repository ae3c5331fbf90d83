//! Tests for the legacy decision-tree estimator.

use weft_ir::{LoopBody, Opcode, PhiKind, ValueType, extract_features};

use crate::heuristic::heuristic_si_factor;
use crate::test::helpers::*;

#[test]
fn integer_load_reduction_gets_four() {
    // hasReductions, no mul.i32, load.i32 present, no or.i64.
    let features = extract_features(&int_sum_reduction_loop());
    assert!(features.has_reductions);
    assert_eq!(features.count(Opcode::Mul, ValueType::I32), 0);
    assert!(features.count(Opcode::Load, ValueType::I32) > 0);
    assert_eq!(features.count(Opcode::Or, ValueType::I64), 0);

    assert_eq!(heuristic_si_factor(&features), 4);
}

#[test]
fn wide_bitwise_reduction_gets_two() {
    // Same reduction shape but with an or.i64 in the body.
    let mut b = LoopBody::builder();
    let iv = b.phi(ValueType::I64, PhiKind::Induction);
    let acc = b.phi(ValueType::I64, PhiKind::Reduction);
    let load = b.push(Opcode::Load, ValueType::I32, &[iv]);
    let wide = b.push(Opcode::Or, ValueType::I64, &[acc]);
    let acc_next = b.push(Opcode::Add, ValueType::I64, &[wide]);
    let iv_next = b.push(Opcode::Add, ValueType::I64, &[iv]);
    b.set_latch_update(iv, iv_next).unwrap();
    b.set_latch_update(acc, acc_next).unwrap();
    let _ = load;
    let body = b.finish().unwrap();

    assert_eq!(heuristic_si_factor(&extract_features(&body)), 2);
}

#[test]
fn small_storeless_loop_gets_two() {
    // No reductions, no mul.i32, at most eight instructions, no store.void.
    let mut b = LoopBody::builder();
    let iv = b.phi(ValueType::I64, PhiKind::Induction);
    let load = b.push(Opcode::Load, ValueType::I32, &[iv]);
    b.push(Opcode::Add, ValueType::I32, &[load]);
    let iv_next = b.push(Opcode::Add, ValueType::I64, &[iv]);
    b.push(Opcode::ICmp, ValueType::I1, &[iv_next]);
    b.set_latch_update(iv, iv_next).unwrap();
    let body = b.finish().unwrap();

    let features = extract_features(&body);
    assert!(!features.has_reductions);
    assert!(features.inst_count <= 8);
    assert_eq!(heuristic_si_factor(&features), 2);
}

#[test]
fn multiply_heavy_loop_gets_one() {
    let mut b = LoopBody::builder();
    let load = b.push(Opcode::Load, ValueType::I32, &[]);
    b.push(Opcode::Mul, ValueType::I32, &[load]);
    b.push(Opcode::Mul, ValueType::I32, &[load]);
    let body = b.finish().unwrap();

    assert_eq!(heuristic_si_factor(&extract_features(&body)), 1);
}

#[test]
fn large_memory_bound_loop_gets_two() {
    // Above the small-loop cutoff, no compute at all: the +inf ratio takes
    // the memory-bound branch.
    let mut b = LoopBody::builder();
    for _ in 0..9 {
        b.push(Opcode::Load, ValueType::I32, &[]);
    }
    let last = b.push(Opcode::Load, ValueType::I32, &[]);
    b.push(Opcode::Store, ValueType::Void, &[last]);
    let body = b.finish().unwrap();

    let features = extract_features(&body);
    assert!(features.mem_compute_ratio().is_infinite());
    assert_eq!(heuristic_si_factor(&features), 2);
}

#[test]
fn large_compute_bound_loop_gets_one() {
    let mut b = LoopBody::builder();
    let load = b.push(Opcode::Load, ValueType::I32, &[]);
    let mut prev = load;
    for _ in 0..10 {
        prev = b.push(Opcode::Add, ValueType::I32, &[prev]);
    }
    b.push(Opcode::Store, ValueType::Void, &[prev]);
    let body = b.finish().unwrap();

    assert_eq!(heuristic_si_factor(&extract_features(&body)), 1);
}

#[test]
fn heuristic_is_a_pure_function_of_features() {
    let features = extract_features(&int_sum_reduction_loop());
    let first = heuristic_si_factor(&features);
    for _ in 0..10 {
        assert_eq!(heuristic_si_factor(&features), first);
    }
}
