//! The loop-body abstraction handed to us by the host vectorizer.
//!
//! A [`LoopBody`] is a flat arena of [`Instruction`]s partitioned into basic
//! blocks, with def-use edges expressed as operand indices into the arena.
//! Only values produced *inside* the loop appear as operands; live-in values
//! are external and simply absent (an instruction consuming only live-ins has
//! no operand edges and is ready immediately).
//!
//! Header phis are special: their operand list is empty and their back-edge
//! input is recorded as a latch update on [`InstKind::HeaderPhi`], because
//! within a single iteration copy the phi does not depend on anything — it
//! depends on the *previous* copy's update.

use smallvec::SmallVec;
use snafu::{OptionExt, ensure};

use crate::error::*;
use crate::types::{InstId, InstKind, Opcode, PhiKind, ValueType};

/// One dataflow operation of the loop body.
#[derive(Debug, Clone)]
pub struct Instruction {
    pub opcode: Opcode,
    pub ty: ValueType,
    /// Producers of this instruction's in-loop operands, in operand order.
    pub operands: SmallVec<[InstId; 2]>,
    pub kind: InstKind,
}

impl Instruction {
    pub fn is_header_phi(&self) -> bool {
        matches!(self.kind, InstKind::HeaderPhi { .. })
    }

    /// The latch update feeding this header phi's back edge, if any.
    pub fn latch_update(&self) -> Option<InstId> {
        match self.kind {
            InstKind::HeaderPhi { update, .. } => update,
            _ => None,
        }
    }
}

/// A basic block: a name and the instructions it contains, in program order.
#[derive(Debug, Clone)]
pub struct Block {
    pub name: String,
    pub insts: Vec<InstId>,
}

/// A single-loop body: blocks plus the instruction arena they index into.
///
/// The first block is the loop header.
#[derive(Debug, Clone)]
pub struct LoopBody {
    blocks: Vec<Block>,
    insts: Vec<Instruction>,
}

impl LoopBody {
    pub fn builder() -> LoopBuilder {
        LoopBuilder::new()
    }

    pub fn inst(&self, id: InstId) -> &Instruction {
        &self.insts[id.index()]
    }

    pub fn len(&self) -> usize {
        self.insts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.insts.is_empty()
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn header(&self) -> Option<&Block> {
        self.blocks.first()
    }

    /// Iterate over all instructions with their ids, in arena order.
    pub fn insts(&self) -> impl Iterator<Item = (InstId, &Instruction)> {
        self.insts.iter().enumerate().map(|(i, inst)| (InstId(i as u32), inst))
    }

    /// Header phis together with their classification, in header order.
    pub fn header_phis(&self) -> impl Iterator<Item = (InstId, PhiKind)> + '_ {
        self.header().into_iter().flat_map(|block| {
            block.insts.iter().filter_map(|&id| match self.inst(id).kind {
                InstKind::HeaderPhi { kind, .. } => Some((id, kind)),
                _ => None,
            })
        })
    }
}

/// Push-style constructor for [`LoopBody`], used by the host-side adapter and
/// by tests.
///
/// Instructions can only reference already-pushed instructions as operands, so
/// arena order is a topological order of the intra-iteration dataflow — the
/// one exception being header phis, whose back edge is patched in later via
/// [`LoopBuilder::set_latch_update`].
pub struct LoopBuilder {
    blocks: Vec<Block>,
    insts: Vec<Instruction>,
}

impl LoopBuilder {
    pub fn new() -> Self {
        Self { blocks: vec![Block { name: "header".into(), insts: Vec::new() }], insts: Vec::new() }
    }

    /// Start a new basic block; subsequent pushes land in it.
    pub fn block(&mut self, name: impl Into<String>) -> &mut Self {
        self.blocks.push(Block { name: name.into(), insts: Vec::new() });
        self
    }

    /// Push a plain instruction.
    pub fn push(&mut self, opcode: Opcode, ty: ValueType, operands: &[InstId]) -> InstId {
        self.push_kind(opcode, ty, operands, InstKind::Normal)
    }

    /// Push an instruction with an explicit structural role.
    pub fn push_kind(&mut self, opcode: Opcode, ty: ValueType, operands: &[InstId], kind: InstKind) -> InstId {
        let id = InstId(self.insts.len() as u32);
        self.insts.push(Instruction { opcode, ty, operands: operands.iter().copied().collect(), kind });
        self.blocks.last_mut().unwrap().insts.push(id);
        id
    }

    /// Push a header phi of the given kind. Its latch update is attached
    /// later, once the updating instruction exists.
    pub fn phi(&mut self, ty: ValueType, kind: PhiKind) -> InstId {
        self.push_kind(Opcode::Phi, ty, &[], InstKind::HeaderPhi { kind, update: None })
    }

    /// Attach the back-edge update to a previously pushed header phi.
    pub fn set_latch_update(&mut self, phi: InstId, update: InstId) -> Result<()> {
        ensure!(update.index() < self.insts.len(), UpdateOutOfRangeSnafu { phi, update });
        let inst = self.insts.get_mut(phi.index()).context(NotAHeaderPhiSnafu { inst: phi })?;
        match &mut inst.kind {
            InstKind::HeaderPhi { update: slot, .. } => {
                *slot = Some(update);
                Ok(())
            }
            _ => NotAHeaderPhiSnafu { inst: phi }.fail(),
        }
    }

    /// Validate operand references and produce the finished body.
    ///
    /// Every operand must be produced by a strictly earlier instruction;
    /// forward (or self) references would smuggle a cycle into graphs built
    /// from the body. Back-edge values go through
    /// [`LoopBuilder::set_latch_update`] instead.
    pub fn finish(self) -> Result<LoopBody> {
        for (i, inst) in self.insts.iter().enumerate() {
            for &op in &inst.operands {
                ensure!(op.index() < i, OperandNotYetDefinedSnafu { user: InstId(i as u32), operand: op });
            }
        }
        Ok(LoopBody { blocks: self.blocks, insts: self.insts })
    }
}

impl Default for LoopBuilder {
    fn default() -> Self {
        Self::new()
    }
}
