//! Dependency graph of operation nodes for one (VF, SIF) candidate.
//!
//! The graph holds one node per instruction per interpolation copy: copy 0 is
//! the vector form of the loop body, copies 1..=SIF are the interleaved
//! scalar copies. All nodes live in one contiguous arena and reference each
//! other by index; the scheduler mutates node state destructively and
//! [`ScheduleGraph::reset`] restores the pre-scheduling state so repeated
//! trials reuse the arena instead of deep-copying it.
//!
//! Edges encode "must execute no earlier than":
//! - data edges, producer to consumer, within each copy;
//! - iteration-order edges, copy `k`'s header phi to copy `k-1`'s latch
//!   update (exactly one per copy pair). The header's initial value comes
//!   from the preheader, which is external, so copy 0 phis are roots.

use std::fmt::Write as _;

use smallvec::SmallVec;
use weft_ir::{InstId, LoopBody, Opcode};

use crate::resources::{PortId, TargetProfile};

/// Index of a node inside a [`ScheduleGraph`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One dataflow operation instance: the vector form or one scalar copy of a
/// loop-body instruction.
#[derive(Debug, Clone)]
pub struct OperationNode {
    pub inst: InstId,
    pub opcode: Opcode,
    /// 0 = vector form, k > 0 = k-th scalar interpolation copy.
    pub copy: u32,
    /// Modeled latency, annotated at build time from the target profile.
    pub latency: u32,
    /// Critical-path-to-exit depth; higher schedules earlier.
    pub priority: u32,
    /// Issue cycle, set when a resource grant succeeds.
    pub start: Option<u32>,
    /// Set together with `start`; `is_scheduled() == duration.is_some()`.
    pub duration: Option<u32>,
    /// Granted port, `None` for unconstrained operations.
    pub port: Option<PortId>,
    pub preds: SmallVec<[NodeId; 2]>,
    pub succs: SmallVec<[NodeId; 4]>,
    /// Predecessors not yet scheduled; the node is ready at zero.
    pub unscheduled_preds: u32,
    /// Earliest legal issue cycle: max end time over scheduled predecessors.
    pub earliest: u32,
}

impl OperationNode {
    pub fn is_vector(&self) -> bool {
        self.copy == 0
    }

    pub fn is_scheduled(&self) -> bool {
        self.duration.is_some()
    }

    pub fn end_time(&self) -> Option<u32> {
        Some(self.start? + self.duration?)
    }
}

/// The schedule map for one candidate: every operation node across all
/// interpolation copies, plus the edges between them.
#[derive(Debug, Clone)]
pub struct ScheduleGraph {
    nodes: Vec<OperationNode>,
    inst_count: u32,
    vf: u32,
    sif: u32,
    /// First interpolation copy in the arena: 0 when a vector iteration
    /// exists, 1 for a scalar-only graph.
    first_copy: u32,
}

impl ScheduleGraph {
    /// Build the graph for `body` at vectorization factor `vf` with `sif`
    /// scalar interpolation copies, annotating latencies from `profile`.
    ///
    /// The vector form (copy 0) exists only when `vf > 0`; its latencies
    /// scale with the width via [`TargetProfile::vector_latency`], so a
    /// wider candidate pays for its extra lanes.
    pub fn build(body: &LoopBody, profile: TargetProfile, vf: u32, sif: u32) -> Self {
        let inst_count = body.len() as u32;
        let first_copy = if vf > 0 { 0 } else { 1 };
        let copies = sif + 1 - first_copy;
        let mut graph =
            Self { nodes: Vec::with_capacity((inst_count * copies) as usize), inst_count, vf, sif, first_copy };

        for copy in first_copy..=sif {
            for (id, inst) in body.insts() {
                let latency = if copy == 0 {
                    profile.vector_latency(inst.opcode, vf)
                } else {
                    profile.latency(inst.opcode, false)
                };
                graph.nodes.push(OperationNode {
                    inst: id,
                    opcode: inst.opcode,
                    copy,
                    latency,
                    priority: 0,
                    start: None,
                    duration: None,
                    port: None,
                    preds: SmallVec::new(),
                    succs: SmallVec::new(),
                    unscheduled_preds: 0,
                    earliest: 0,
                });
            }
        }

        for copy in first_copy..=sif {
            for (id, inst) in body.insts() {
                let to = graph.node_id(copy, id);
                if inst.is_header_phi() {
                    // Within a copy the phi depends on nothing; across copies
                    // it depends on the previous copy's back-edge update. The
                    // first copy's incoming value is the preheader's.
                    if copy > first_copy {
                        if let Some(update) = inst.latch_update() {
                            graph.add_edge(graph.node_id(copy - 1, update), to);
                        }
                    }
                    continue;
                }
                for &op in &inst.operands {
                    graph.add_edge(graph.node_id(copy, op), to);
                }
            }
        }

        for node in &mut graph.nodes {
            node.unscheduled_preds = node.preds.len() as u32;
        }
        graph.set_priorities();
        graph
    }

    /// Node for instruction `inst` in interpolation copy `copy`.
    ///
    /// The arena is laid out copy-major, so this is pure index arithmetic.
    pub fn node_id(&self, copy: u32, inst: InstId) -> NodeId {
        debug_assert!(copy >= self.first_copy && copy <= self.sif);
        NodeId((copy - self.first_copy) * self.inst_count + inst.0)
    }

    pub fn node(&self, id: NodeId) -> &OperationNode {
        &self.nodes[id.index()]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut OperationNode {
        &mut self.nodes[id.index()]
    }

    pub fn nodes(&self) -> &[OperationNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn vf(&self) -> u32 {
        self.vf
    }

    pub fn sif(&self) -> u32 {
        self.sif
    }

    /// Nodes with no predecessors.
    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.preds.is_empty())
            .map(|(i, _)| NodeId(i as u32))
    }

    fn add_edge(&mut self, from: NodeId, to: NodeId) {
        debug_assert!(from < to, "edges must follow arena order");
        if self.nodes[from.index()].succs.contains(&to) {
            return;
        }
        self.nodes[from.index()].succs.push(to);
        self.nodes[to.index()].preds.push(from);
    }

    /// Assign critical-path-to-exit priorities: each node's latency plus the
    /// highest successor priority.
    ///
    /// Every edge points from a lower to a higher arena index, so a single
    /// reverse sweep is a reverse-topological walk.
    pub fn set_priorities(&mut self) {
        for i in (0..self.nodes.len()).rev() {
            let best_succ = self.nodes[i]
                .succs
                .iter()
                .map(|s| self.nodes[s.index()].priority)
                .max()
                .unwrap_or(0);
            self.nodes[i].priority = self.nodes[i].latency + best_succ;
        }
    }

    /// Clear all per-trial scheduling state, keeping structure, latencies and
    /// priorities.
    pub fn reset(&mut self) {
        for node in &mut self.nodes {
            node.start = None;
            node.duration = None;
            node.port = None;
            node.unscheduled_preds = node.preds.len() as u32;
            node.earliest = 0;
        }
    }

    /// Total schedule length: max end time over all nodes. `None` until every
    /// node is scheduled.
    pub fn length(&self) -> Option<u32> {
        let mut max = 0;
        for node in &self.nodes {
            max = max.max(node.end_time()?);
        }
        Some(max)
    }

    /// Human-readable dump of the operation-to-(cycle, port) assignment.
    /// For debugging only; not a stable format.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            let form = if node.is_vector() { "v".to_string() } else { format!("s{}", node.copy) };
            let cycle = node.start.map_or("unscheduled".to_string(), |c| format!("cycle {c}"));
            let port = match node.port {
                Some(p) => format!("port {p}"),
                None if node.is_scheduled() => "any port".to_string(),
                None => "no port".to_string(),
            };
            let _ = writeln!(out, "{}.{form} {:?} -> {cycle}, {port}", node.inst, node.opcode);
        }
        out
    }
}
