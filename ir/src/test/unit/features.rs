//! Tests for static feature extraction.

use crate::features::extract_features;
use crate::test::helpers::*;
use crate::types::{Opcode, PhiKind, ValueType};

#[test]
fn counts_simple_loop() {
    let features = extract_features(&simple_int_loop());

    assert_eq!(features.inst_count, 7);
    // add.i32, add.i64, icmp.i1
    assert_eq!(features.compute_count, 3);
    // load.i32, store.void
    assert_eq!(features.memory_count, 2);
    assert!(!features.has_reductions);
}

#[test]
fn histogram_keys_by_opcode_and_type() {
    let features = extract_features(&simple_int_loop());

    assert_eq!(features.count(Opcode::Load, ValueType::I32), 1);
    assert_eq!(features.count(Opcode::Store, ValueType::Void), 1);
    assert_eq!(features.count(Opcode::Add, ValueType::I32), 1);
    assert_eq!(features.count(Opcode::Add, ValueType::I64), 1);
    // Absent pair reads as zero.
    assert_eq!(features.count(Opcode::Mul, ValueType::I32), 0);
}

#[test]
fn detects_reductions() {
    assert!(extract_features(&int_sum_reduction_loop()).has_reductions);
    // An induction phi alone is not a reduction.
    assert!(!extract_features(&loop_with_header_phi(PhiKind::Induction)).has_reductions);
}

#[test]
fn ratio_of_memory_to_compute() {
    let features = extract_features(&simple_int_loop());
    let expected = 2.0 / 3.0;
    assert!((features.mem_compute_ratio() - expected).abs() < 1e-9);
}

#[test]
fn ratio_without_compute_is_infinite() {
    // Loads and a store only: compute count is zero and the ratio must be
    // the defined +inf sentinel, not a panic or NaN.
    let mut b = crate::LoopBody::builder();
    let load = b.push(Opcode::Load, ValueType::I32, &[]);
    b.push(Opcode::Store, ValueType::Void, &[load]);
    let body = b.finish().unwrap();

    let features = extract_features(&body);
    assert_eq!(features.compute_count, 0);
    assert!(features.mem_compute_ratio().is_infinite());
    assert!(features.mem_compute_ratio() >= 4.0);
}

#[test]
fn extraction_is_pure() {
    let body = int_sum_reduction_loop();
    let a = extract_features(&body);
    let b = extract_features(&body);

    assert_eq!(a.inst_count, b.inst_count);
    assert_eq!(a.compute_count, b.compute_count);
    assert_eq!(a.memory_count, b.memory_count);
    assert_eq!(a.has_reductions, b.has_reductions);
    assert_eq!(a.histogram, b.histogram);
}
