//! Decode stage (ID): operand read, immediate extraction, hazard handling.

use crate::core::decode::{decode, opcodes};
use crate::core::pipeline::hazards;
use crate::core::pipeline::latches::IdEx;
use crate::core::Cpu;

/// Runs one cycle of decode.
pub fn tick(cpu: &mut Cpu) {
    if cpu.if_id.jump_stall_count > 0 || cpu.if_id.jump_detected {
        cpu.id_ex = IdEx::bubble();
        return;
    }

    let ir = cpu.if_id.ir;
    if ir == 0 {
        cpu.id_ex = IdEx::bubble();
        return;
    }

    let d = decode(ir);

    // (has_rs2, reg_write) per the opcode's role in the register file.
    let (has_rs2, reg_write): (bool, bool) = match d.opcode {
        opcodes::OP => (true, true),
        opcodes::OP_IMM => (false, true),
        opcodes::LOAD => (false, true),
        opcodes::STORE => (true, false),
        opcodes::BRANCH => (true, false),
        opcodes::JAL => (false, true),
        opcodes::JALR => (false, true),
        _ => (false, false),
    };

    let uses_rs1 = d.opcode != opcodes::JAL;
    let mut a = if uses_rs1 {
        cpu.current.regs.read(d.rs1)
    } else {
        0
    };
    let mut b = if has_rs2 { cpu.current.regs.read(d.rs2) } else { 0 };

    let mut stall_count: u8 = 0;
    if uses_rs1 {
        if let Some(fwd) = hazards::resolve(d.rs1, &cpu.ex_mem, &cpu.mem_wb) {
            if fwd.must_stall || !cpu.forwarding {
                stall_count = stall_count.max(fwd.stall_count);
            } else {
                a = fwd.value;
            }
        }
    }
    if has_rs2 {
        if let Some(fwd) = hazards::resolve(d.rs2, &cpu.ex_mem, &cpu.mem_wb) {
            if fwd.must_stall || !cpu.forwarding {
                stall_count = stall_count.max(fwd.stall_count);
            } else {
                b = fwd.value;
            }
        }
    }

    cpu.if_id.stall_count = stall_count;

    if stall_count > 0 {
        cpu.id_ex = IdEx::bubble();
        return;
    }

    cpu.id_ex = IdEx {
        ir,
        pc: cpu.if_id.pc,
        a,
        b,
        imm: d.imm,
        alu_output: 0,
        lmd: 0,
        reg_write,
    };
}
