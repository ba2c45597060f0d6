//! Architectural state: the general-purpose register file, program
//! counter, and the legacy HI/LO scratch registers carried for shell
//! compatibility.

/// General-purpose register file implementation.
pub mod gpr;

use gpr::Gpr;

/// One snapshot of architectural state.
///
/// The pipeline keeps two of these (`current`, `next`): stages read
/// `current` and publish to `next`; the cycle driver commits `next` into
/// `current` at the end of every cycle.
#[derive(Clone, Copy, Debug, Default)]
pub struct ArchState {
    /// General-purpose registers x0-x31.
    pub regs: Gpr,
    /// Program counter.
    pub pc: u32,
    /// Legacy HI scratch register (unused by the pipeline; shell-settable).
    pub hi: u32,
    /// Legacy LO scratch register (unused by the pipeline; shell-settable).
    pub lo: u32,
}

impl ArchState {
    /// Zeroed state with PC at the given text base.
    pub fn at(pc: u32) -> Self {
        Self {
            regs: Gpr::new(),
            pc,
            hi: 0,
            lo: 0,
        }
    }

    /// Zeroes registers, HI, LO, and PC.
    pub fn reset(&mut self) {
        self.regs.reset();
        self.pc = 0;
        self.hi = 0;
        self.lo = 0;
    }
}
