//! Data hazard detection and forwarding for the decode stage.
//!
//! Two independent RAW hazards are checked, closer-producer-first: an
//! EX/MEM hazard (the instruction now in EX/MEM, one instruction ahead of
//! the consumer) and a MEM/WB hazard (the instruction now in MEM/WB, two
//! instructions ahead). Each is gated on that latch's own `reg_write`, the
//! way the teacher's `forward_rs` gates every source on the producing
//! entry's own write-enable — not on some other latch's.
//!
//! A load producer one instruction ahead is a special case: EX/MEM's
//! `alu_output` is the effective address at that point, not the loaded
//! datum (MEM hasn't run against this latch yet), so it can never be
//! forwarded. That hazard forces a stall regardless of whether forwarding
//! is enabled, mirroring the teacher's separate `need_stall_load_use` check
//! alongside `forward_rs`.

use crate::core::pipeline::latches::{ExMem, MemWb};

/// Destination register and forwarded value for one decode-stage operand,
/// if a hazard against that operand was found.
#[derive(Clone, Copy, Debug, Default)]
pub struct Forward {
    /// Forwarded value to use in place of a register-file read.
    pub value: u32,
    /// Cycles decode must stall if no forwarding path exists for this hazard.
    pub stall_count: u8,
    /// If set, decode must stall regardless of the forwarding switch: `value`
    /// is not usable (the load-use case, where EX/MEM holds an address, not
    /// the loaded datum).
    pub must_stall: bool,
}

/// Resolves a RAW hazard for one source register against the EX/MEM and
/// MEM/WB latches, in that precedence order.
///
/// Returns `None` if neither latch's destination matches `rs`, or if `rs`
/// is x0 (never a real hazard, since nothing is ever written there).
pub fn resolve(rs: usize, ex_mem: &ExMem, mem_wb: &MemWb) -> Option<Forward> {
    if rs == 0 {
        return None;
    }

    let ex_mem_rd = dest_reg(ex_mem.ir);
    if ex_mem.reg_write && ex_mem_rd == rs {
        if is_load(ex_mem.ir) {
            return Some(Forward {
                value: 0,
                stall_count: 1,
                must_stall: true,
            });
        }
        return Some(Forward {
            value: ex_mem.alu_output,
            stall_count: 3,
            must_stall: false,
        });
    }

    let mem_wb_rd = dest_reg(mem_wb.ir);
    if mem_wb.reg_write && mem_wb_rd == rs {
        let value = if is_load(mem_wb.ir) {
            mem_wb.lmd
        } else {
            mem_wb.alu_output
        };
        return Some(Forward {
            value,
            stall_count: 2,
            must_stall: false,
        });
    }

    None
}

fn dest_reg(ir: u32) -> usize {
    ((ir >> 7) & 0x1f) as usize
}

fn is_load(ir: u32) -> bool {
    (ir & 0x7f) == crate::core::decode::opcodes::LOAD
}
