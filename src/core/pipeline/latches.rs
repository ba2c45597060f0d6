//! Pipeline latch structures for inter-stage communication.
//!
//! One instruction per stage per cycle — this pipeline is not superscalar,
//! so each latch holds exactly one instruction's worth of state rather than
//! a vector of entries. A latch holding `ir == 0` is a bubble.

/// IF/ID latch (Fetch to Decode stage).
///
/// `stall_count`, `jump_stall_count`, and `jump_detected` are control-hazard
/// bookkeeping kept here by convention even though they describe
/// pipeline-wide state rather than per-instruction fetch state.
#[derive(Clone, Copy, Debug, Default)]
pub struct IfId {
    /// Fetched instruction word (0 denotes a bubble).
    pub ir: u32,
    /// PC of the fetched instruction.
    pub pc: u32,
    /// Remaining cycles fetch must hold for a load-use data hazard.
    pub stall_count: u8,
    /// Remaining cycles fetch must hold after a taken control transfer.
    pub jump_stall_count: u8,
    /// Set when decode has resolved a branch/jump this cycle.
    pub jump_detected: bool,
}

impl IfId {
    /// A bubble: no instruction in flight, no hazard bookkeeping pending.
    pub fn bubble() -> Self {
        Self::default()
    }
}

/// ID/EX latch (Decode to Execute stage).
#[derive(Clone, Copy, Debug, Default)]
pub struct IdEx {
    /// Instruction word carried through from IF/ID.
    pub ir: u32,
    /// PC of the instruction.
    pub pc: u32,
    /// Value of rs1 as read (or forwarded) at decode.
    pub a: u32,
    /// Value of rs2 as read (or forwarded) at decode.
    pub b: u32,
    /// Sign-extended immediate.
    pub imm: i32,
    /// ALU result, set by the execute stage.
    pub alu_output: u32,
    /// Loaded memory data, set by the memory stage.
    pub lmd: u32,
    /// Whether this instruction writes a destination register.
    pub reg_write: bool,
}

impl IdEx {
    /// A bubble latch.
    pub fn bubble() -> Self {
        Self::default()
    }
}

/// EX/MEM latch (Execute to Memory stage).
#[derive(Clone, Copy, Debug, Default)]
pub struct ExMem {
    /// Instruction word carried through from ID/EX.
    pub ir: u32,
    /// PC of the instruction.
    pub pc: u32,
    /// Value of rs1 (or forwarded substitute), carried for store data.
    pub a: u32,
    /// Value of rs2 (or forwarded substitute), carried for store data.
    pub b: u32,
    /// Sign-extended immediate, carried through for the memory stage.
    pub imm: i32,
    /// ALU result: effective address for loads/stores, result for ALU ops.
    pub alu_output: u32,
    /// Whether this instruction writes a destination register.
    pub reg_write: bool,
}

impl ExMem {
    /// A bubble latch.
    pub fn bubble() -> Self {
        Self::default()
    }
}

/// MEM/WB latch (Memory to Writeback stage).
#[derive(Clone, Copy, Debug, Default)]
pub struct MemWb {
    /// Instruction word carried through from EX/MEM.
    pub ir: u32,
    /// PC of the instruction.
    pub pc: u32,
    /// ALU result (used as the writeback value for non-load instructions).
    pub alu_output: u32,
    /// Data loaded from memory (used as the writeback value for loads).
    pub lmd: u32,
    /// Whether this instruction writes a destination register.
    pub reg_write: bool,
}

impl MemWb {
    /// A bubble latch.
    pub fn bubble() -> Self {
        Self::default()
    }
}
