//! The five pipeline stage routines.
//!
//! Each stage is invoked once per cycle by [`crate::core::cpu::Cpu::step`],
//! in reverse pipeline order (writeback first, fetch last), so that every
//! stage reads the latch its upstream neighbor produced last cycle before
//! that neighbor overwrites it with this cycle's output.

/// Decode stage: operand read, hazard detection, forwarding.
pub mod decode;

/// Execute stage: ALU, branch/jump resolution, control-hazard flush.
pub mod execute;

/// Fetch stage: instruction fetch and PC advance.
pub mod fetch;

/// Memory stage: load/store access.
pub mod memory;

/// Writeback stage: register file commit.
pub mod writeback;
