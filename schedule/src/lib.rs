//! Software-pipelining cost model for loop vectorization.
//!
//! Given a loop body (from `weft-ir`), this crate decides how many scalar
//! interpolation copies to interleave with each vector iteration (the SIF)
//! and, jointly, which vectorization factor to pair it with, by simulating
//! cycle-accurate list schedules against a target issue-port model.
//!
//! # Module Organization
//!
//! - [`resources`] - per-target issue-port tables, scarcity priorities,
//!   latencies
//! - [`graph`] - operation-node arena and dependency edges per candidate
//! - [`scheduler`] - the randomized list scheduler
//! - [`heuristic`] - the legacy decision-tree fallback over static features
//! - [`driver`] - the [`CostModel`] facade the host vectorizer calls
//! - [`config`] - tunables with builder and environment fallbacks
//!
//! The scheduler is randomized, so the driver repeats each candidate's
//! schedule a configurable number of times with derived seeds and keeps the
//! best sample; with a fixed base seed every result is reproducible.

pub mod config;
pub mod driver;
pub mod error;
pub mod graph;
pub mod heuristic;
pub mod resources;
pub mod scheduler;


pub use config::CostModelConfig;
pub use driver::CostModel;
pub use error::{Error, Result};
pub use graph::{NodeId, OperationNode, ScheduleGraph};
pub use heuristic::heuristic_si_factor;
pub use resources::{PortGrant, PortId, ResourceHandler, TargetProfile};
pub use scheduler::list_schedule;
