//! Randomized list scheduling over the operation graph.
//!
//! A greedy cycle-by-cycle simulation: each cycle resets port availability,
//! then issues ready nodes in priority order until nothing else fits, then
//! advances. Port selection carries a random term, so one pass is a single
//! sample; the driver repeats passes with derived seeds and keeps the best.

use std::collections::BinaryHeap;

use rand::rngs::StdRng;
use snafu::ensure;
use tracing::trace;

use crate::error::*;
use crate::graph::{NodeId, ScheduleGraph};
use crate::resources::ResourceHandler;

/// Heap key for the ready set: highest priority first, then lowest node id
/// for a deterministic tie-break.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ReadyKey {
    priority: u32,
    node: NodeId,
}

impl Ord for ReadyKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.priority.cmp(&other.priority).then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for ReadyKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Run one scheduling pass over `graph`, which must be in its reset state.
///
/// Returns the total schedule length in cycles. All randomness flows through
/// `rng`; equal seeds give identical schedules.
///
/// `cycle_budget` bounds the simulation: for an acyclic graph the ready set
/// always drains, so exhausting the budget indicates an inconsistent graph
/// and is reported as [`Error::SchedulingDeadlock`] instead of looping.
pub fn list_schedule(
    graph: &mut ScheduleGraph,
    handler: &mut ResourceHandler,
    cycle_budget: u32,
    blend_weight: f32,
    rng: &mut StdRng,
) -> Result<u32> {
    let total = graph.len();
    ensure!(total > 0, EmptyGraphSnafu);

    let mut ready: BinaryHeap<ReadyKey> = graph
        .roots()
        .map(|id| ReadyKey { priority: graph.node(id).priority, node: id })
        .collect();
    // Nodes that could not issue this cycle; drained back into the heap when
    // the cycle advances.
    let mut stalled: Vec<ReadyKey> = Vec::new();

    let mut scheduled = 0usize;
    let mut cycle = 0u32;

    while scheduled < total {
        ensure!(
            cycle <= cycle_budget,
            SchedulingDeadlockSnafu { cycle, unscheduled: total - scheduled }
        );
        handler.reset_cycle();

        while let Some(key) = ready.pop() {
            let (earliest, opcode, is_vector, latency) = {
                let node = graph.node(key.node);
                (node.earliest, node.opcode, node.is_vector(), node.latency)
            };
            if earliest > cycle {
                stalled.push(key);
                continue;
            }

            let ports = handler.profile().ports(opcode, is_vector);
            let Some(grant) = handler.schedule_on(ports, blend_weight, rng) else {
                stalled.push(key);
                continue;
            };

            let end = cycle + latency;
            {
                let node = graph.node_mut(key.node);
                node.start = Some(cycle);
                node.duration = Some(latency);
                node.port = grant.port();
            }
            scheduled += 1;
            trace!(node = key.node.0, ?opcode, cycle, ?grant, "issued");

            let succs = graph.node(key.node).succs.clone();
            for succ in succs {
                let s = graph.node_mut(succ);
                s.earliest = s.earliest.max(end);
                s.unscheduled_preds -= 1;
                if s.unscheduled_preds == 0 {
                    // Latencies are nonzero, so a fresh successor can never
                    // issue in the cycle that readied it.
                    stalled.push(ReadyKey { priority: s.priority, node: succ });
                }
            }
        }

        ready.extend(stalled.drain(..));
        cycle += 1;
    }

    // All nodes scheduled, so the length is defined.
    Ok(graph.length().unwrap_or(0))
}
