//! Loop-body abstraction and static analyses for the weft cost model.
//!
//! This crate defines the view of a loop the interpolation cost model works
//! on, together with the pure analyses that run before any scheduling:
//!
//! - [`types`] - Opcode, value type and instruction-role enums
//! - [`body`] - [`LoopBody`] arena and its [`LoopBuilder`]
//! - [`features`] - static feature extraction (histogram, counters, ratio)
//! - [`legality`] - the interpolation legality gate
//! - [`error`] - error types and result handling
//!
//! Everything here is free of scheduling state; the scheduler and cost-model
//! driver live in `weft-schedule`.

pub mod body;
pub mod error;
pub mod features;
pub mod legality;
pub mod types;


pub use body::{Block, Instruction, LoopBody, LoopBuilder};
pub use error::{Error, Result};
pub use features::{LoopFeatures, TypeHistogram, extract_features};
pub use legality::is_legal_to_interpolate;
pub use types::{InstId, InstKind, Opcode, PhiKind, ValueType};
