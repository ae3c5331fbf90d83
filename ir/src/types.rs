//! Type definitions for loop-body instructions.
//!
//! This module contains the fundamental enums describing what an instruction
//! *is*: its opcode, the type of the value it produces, and its structural
//! role inside the loop (plain instruction, header phi, interleave group, ...).

/// Instruction opcode, reduced to the categories the cost model cares about.
///
/// The resource model switches on these; anything the host compiler knows
/// beyond this classification is irrelevant to scheduling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    // Control flow.
    Br,
    // Integer ALU.
    Add,
    Sub,
    And,
    Or,
    Xor,
    Shl,
    LShr,
    AShr,
    ICmp,
    Select,
    Phi,
    // Integer multiply and divide.
    Mul,
    UDiv,
    SDiv,
    URem,
    SRem,
    // Memory.
    Load,
    Store,
    // Vector lane movement.
    Shuffle,
    // Floating point. Present so the legality gate can recognize and reject
    // them; the resource model never maps these.
    FAdd,
    FSub,
    FMul,
    FDiv,
    FCmp,
}

impl Opcode {
    /// Unary/binary arithmetic, counted as "compute" by the feature extractor.
    pub fn is_compute(&self) -> bool {
        matches!(
            self,
            Self::Add
                | Self::Sub
                | Self::And
                | Self::Or
                | Self::Xor
                | Self::Shl
                | Self::LShr
                | Self::AShr
                | Self::ICmp
                | Self::Mul
                | Self::UDiv
                | Self::SDiv
                | Self::URem
                | Self::SRem
                | Self::FAdd
                | Self::FSub
                | Self::FMul
                | Self::FDiv
                | Self::FCmp
        )
    }

    /// Loads, stores and anything else that touches memory.
    pub fn is_memory(&self) -> bool {
        matches!(self, Self::Load | Self::Store)
    }

    /// Floating-point arithmetic or comparison.
    pub fn is_float_arith(&self) -> bool {
        matches!(self, Self::FAdd | Self::FSub | Self::FMul | Self::FDiv | Self::FCmp)
    }
}

/// Type of the value an instruction produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    I1,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    Ptr,
    /// No produced value (stores, branches).
    Void,
}

impl ValueType {
    pub fn is_float(&self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }
}

/// Classification of a loop-header phi.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhiKind {
    /// Canonical induction variable.
    Induction,
    /// Reduction accumulator (sum, min/max, ...).
    Reduction,
    /// First-order recurrence: the phi carries the *previous* iteration's
    /// value of some instruction, not an accumulator.
    FirstOrderRecurrence,
    /// Active-lane-mask predicate phi for tail folding.
    ActiveLaneMask,
    /// Phi merging predicated (masked) instruction results.
    Predicated,
}

/// Structural role of an instruction inside the loop.
///
/// The legality gate keys off this: some roles encode cross-iteration or
/// predication patterns that cannot be duplicated safely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstKind {
    Normal,
    /// A phi in the loop header. `update` is the in-loop instruction feeding
    /// the back edge; it is patched in after that instruction exists.
    HeaderPhi { kind: PhiKind, update: Option<InstId> },
    /// Member of an interleaved memory access group.
    InterleaveGroup,
    /// Widened select blending whole vector lanes.
    VectorSelect,
}

/// Index of an instruction inside a [`crate::LoopBody`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstId(pub u32);

impl InstId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for InstId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "%{}", self.0)
    }
}
