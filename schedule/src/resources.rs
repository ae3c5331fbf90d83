//! Target-specific issue-port and latency model.
//!
//! Each target is a fixed, hand-authored table mapping an opcode category to
//! the set of issue ports that can execute it, in scalar and in vector form.
//! [`ResourceHandler`] layers per-cycle availability and static scarcity
//! priorities on top of those tables.
//!
//! An *empty* eligible set means the operation is unconstrained: it issues
//! without occupying a port. Nothing is ever hard-blocked by a missing table
//! entry.

use rand::Rng;
use rand::rngs::StdRng;
use smallvec::SmallVec;
use weft_ir::Opcode;

/// Hardware issue-port index.
pub type PortId = usize;

/// Outcome of a successful port request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortGrant {
    /// A specific port was reserved for this cycle.
    Port(PortId),
    /// The operation has no port constraint and consumed no capacity.
    Unconstrained,
}

impl PortGrant {
    pub fn port(&self) -> Option<PortId> {
        match self {
            Self::Port(p) => Some(*p),
            Self::Unconstrained => None,
        }
    }
}

const NONE: &[PortId] = &[];

// Eight-port out-of-order superscalar. Ports 0/1/5/6 are ALU pipes, 1 carries
// the scalar multiplier, 0 the divider, 2/3 are load pipes, 4/7 store data
// and store address, 5 the shuffle unit, 0/6 take branches.
const BIG_BRANCH: &[PortId] = &[0, 6];
const BIG_ALU: &[PortId] = &[0, 1, 5, 6];
const BIG_MUL: &[PortId] = &[1];
const BIG_DIV: &[PortId] = &[0];
const BIG_LOAD: &[PortId] = &[2, 3];
const BIG_STORE: &[PortId] = &[4, 7];
const BIG_SHUFFLE: &[PortId] = &[5];
const BIG_ALU_V: &[PortId] = &[0, 1, 5];
const BIG_MUL_V: &[PortId] = &[0, 1];
const BIG_DIV_V: &[PortId] = &[0];
const BIG_SHUFFLE_V: &[PortId] = &[5];

// Seven-port in-order core. Ports 0/1 are ALU pipes (1 doubles as the
// shuffle unit), 2 multiply/divide, 3/4 load, 5 store, 6 branch.
const LITTLE_BRANCH: &[PortId] = &[6];
const LITTLE_ALU: &[PortId] = &[0, 1];
const LITTLE_MULDIV: &[PortId] = &[2];
const LITTLE_LOAD: &[PortId] = &[3, 4];
const LITTLE_STORE: &[PortId] = &[5];
const LITTLE_SHUFFLE: &[PortId] = &[1];
const LITTLE_ALU_V: &[PortId] = &[0];
const LITTLE_LOAD_V: &[PortId] = &[3];

/// The two modeled issue-port profiles.
///
/// Adding a target means adding a variant and its tables; the scheduler
/// never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetProfile {
    /// Eight-port out-of-order superscalar.
    BigCore,
    /// Seven-port in-order core.
    LittleCore,
}

impl TargetProfile {
    pub fn port_count(&self) -> usize {
        match self {
            Self::BigCore => 8,
            Self::LittleCore => 7,
        }
    }

    /// Eligible ports for `opcode` in scalar form.
    pub fn scalar_ports(&self, opcode: Opcode) -> &'static [PortId] {
        use Opcode::*;
        match self {
            Self::BigCore => match opcode {
                Br => BIG_BRANCH,
                Add | Sub | And | Or | Xor | Shl | LShr | AShr | ICmp | Select => BIG_ALU,
                Mul => BIG_MUL,
                UDiv | SDiv | URem | SRem => BIG_DIV,
                Load => BIG_LOAD,
                Store => BIG_STORE,
                Shuffle => BIG_SHUFFLE,
                Phi | FAdd | FSub | FMul | FDiv | FCmp => NONE,
            },
            Self::LittleCore => match opcode {
                Br => LITTLE_BRANCH,
                Add | Sub | And | Or | Xor | Shl | LShr | AShr | ICmp | Select => LITTLE_ALU,
                Mul | UDiv | SDiv | URem | SRem => LITTLE_MULDIV,
                Load => LITTLE_LOAD,
                Store => LITTLE_STORE,
                Shuffle => LITTLE_SHUFFLE,
                Phi | FAdd | FSub | FMul | FDiv | FCmp => NONE,
            },
        }
    }

    /// Eligible ports for `opcode` in vector form.
    pub fn vector_ports(&self, opcode: Opcode) -> &'static [PortId] {
        use Opcode::*;
        match self {
            Self::BigCore => match opcode {
                Add | Sub | And | Or | Xor | Shl | LShr | AShr | ICmp | Select => BIG_ALU_V,
                Mul => BIG_MUL_V,
                UDiv | SDiv | URem | SRem => BIG_DIV_V,
                Load => BIG_LOAD,
                Store => BIG_STORE,
                Shuffle => BIG_SHUFFLE_V,
                Br | Phi | FAdd | FSub | FMul | FDiv | FCmp => NONE,
            },
            Self::LittleCore => match opcode {
                Add | Sub | And | Or | Xor | Shl | LShr | AShr | ICmp | Select => LITTLE_ALU_V,
                Mul | UDiv | SDiv | URem | SRem => LITTLE_MULDIV,
                Load => LITTLE_LOAD_V,
                Store => LITTLE_STORE,
                Shuffle => LITTLE_SHUFFLE,
                Br | Phi | FAdd | FSub | FMul | FDiv | FCmp => NONE,
            },
        }
    }

    pub fn ports(&self, opcode: Opcode, is_vector: bool) -> &'static [PortId] {
        if is_vector { self.vector_ports(opcode) } else { self.scalar_ports(opcode) }
    }

    /// Modeled issue-to-result latency in cycles.
    pub fn latency(&self, opcode: Opcode, is_vector: bool) -> u32 {
        use Opcode::*;
        match self {
            Self::BigCore => match opcode {
                Mul => 3,
                UDiv | SDiv | URem | SRem => {
                    if is_vector { 16 } else { 12 }
                }
                Load => {
                    if is_vector { 5 } else { 4 }
                }
                Shuffle => {
                    if is_vector { 3 } else { 1 }
                }
                _ => 1,
            },
            Self::LittleCore => match opcode {
                Mul => 4,
                UDiv | SDiv | URem | SRem => {
                    if is_vector { 24 } else { 20 }
                }
                Load => {
                    if is_vector { 4 } else { 3 }
                }
                Shuffle => 2,
                _ => 1,
            },
        }
    }

    /// Native SIMD width of the vector pipes: the widest form that executes
    /// in a single pass. Wider vector forms micro-split into
    /// `ceil(vf / native_width)` passes.
    pub fn native_width(&self) -> u32 {
        match self {
            Self::BigCore => 4,
            Self::LittleCore => 2,
        }
    }

    /// Modeled latency of the vector form at vectorization factor `vf`:
    /// the base vector latency times the number of micro-split passes.
    pub fn vector_latency(&self, opcode: Opcode, vf: u32) -> u32 {
        let passes = vf.max(1).div_ceil(self.native_width());
        self.latency(opcode, true) * passes
    }

    /// The hand-authored eligibility groups the scarcity priorities are
    /// derived from: one group per (operation class, form) pair.
    fn opportunity_groups(&self) -> &'static [&'static [PortId]] {
        match self {
            Self::BigCore => &[
                BIG_BRANCH,
                BIG_ALU,
                BIG_MUL,
                BIG_DIV,
                BIG_LOAD,
                BIG_STORE,
                BIG_SHUFFLE,
                BIG_ALU_V,
                BIG_MUL_V,
                BIG_DIV_V,
                BIG_SHUFFLE_V,
            ],
            Self::LittleCore => &[
                LITTLE_BRANCH,
                LITTLE_ALU,
                LITTLE_MULDIV,
                LITTLE_LOAD,
                LITTLE_STORE,
                LITTLE_SHUFFLE,
                LITTLE_ALU_V,
                LITTLE_LOAD_V,
            ],
        }
    }
}

/// Per-cycle availability and static scarcity priorities for one target's
/// issue ports.
///
/// `resources[p]` is true while port `p` is free in the current cycle.
/// `priorities[p]` is a static score: ports serving fewer scheduling
/// opportunities score higher and are preferred, keeping broadly-capable
/// ports free for operations with no alternative.
#[derive(Debug, Clone)]
pub struct ResourceHandler {
    profile: TargetProfile,
    resources: SmallVec<[bool; 8]>,
    priorities: SmallVec<[f32; 8]>,
    max_priority: f32,
}

impl ResourceHandler {
    pub fn new(profile: TargetProfile) -> Self {
        let count = profile.port_count();
        let groups = profile.opportunity_groups();

        let total: u32 = groups.iter().map(|g| g.len() as u32).sum();
        let mut priorities: SmallVec<[f32; 8]> = SmallVec::from_elem(0.0, count);
        for group in groups {
            for &port in *group {
                // A port outside the table is a configuration bug.
                assert!(port < count, "port {port} out of range for {profile:?} ({count} ports)");
                priorities[port] += group.len() as f32;
            }
        }
        for p in priorities.iter_mut() {
            *p = total as f32 - *p;
        }
        let max_priority = priorities.iter().copied().fold(f32::MIN, f32::max).max(1.0);

        Self { profile, resources: SmallVec::from_elem(true, count), priorities, max_priority }
    }

    pub fn profile(&self) -> TargetProfile {
        self.profile
    }

    pub fn priorities(&self) -> &[f32] {
        &self.priorities
    }

    /// Free every port for the next simulated cycle.
    pub fn reset_cycle(&mut self) {
        self.resources.fill(true);
    }

    /// True iff the eligible set is unconstrained or at least one of its
    /// ports is still free this cycle.
    pub fn is_available_for(&self, ports: &[PortId]) -> bool {
        ports.is_empty() || ports.iter().any(|&p| self.resources[p])
    }

    /// Reserve a port for this cycle.
    ///
    /// Among free eligible ports the blended score
    /// `scarcity*(1-w) + random*w` picks the winner; `None` means every
    /// eligible port is busy. An empty eligible set is granted without
    /// consuming capacity or randomness.
    pub fn schedule_on(&mut self, ports: &[PortId], blend_weight: f32, rng: &mut StdRng) -> Option<PortGrant> {
        if ports.is_empty() {
            return Some(PortGrant::Unconstrained);
        }

        let mut best: Option<(f32, PortId)> = None;
        for &port in ports {
            if !self.resources[port] {
                continue;
            }
            let scarcity = self.priorities[port] / self.max_priority;
            let score = scarcity * (1.0 - blend_weight) + rng.r#gen::<f32>() * blend_weight;
            if best.is_none_or(|(b, _)| score > b) {
                best = Some((score, port));
            }
        }

        let (_, port) = best?;
        self.resources[port] = false;
        Some(PortGrant::Port(port))
    }
}
