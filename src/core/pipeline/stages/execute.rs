//! Execute stage (EX): ALU computation and control-transfer resolution.

use crate::core::decode::opcodes;
use crate::core::pipeline::latches::{ExMem, IdEx};
use crate::core::Cpu;

/// Runs one cycle of execute.
pub fn tick(cpu: &mut Cpu) {
    // A control transfer resolved this cycle squashes the instruction that
    // was speculatively fetched right behind it.
    if cpu.if_id.jump_detected {
        cpu.id_ex = IdEx::bubble();
    }

    let id_ex = cpu.id_ex;
    if id_ex.ir == 0 {
        cpu.ex_mem = ExMem::bubble();
        return;
    }

    let opcode = id_ex.ir & 0x7f;
    let funct3 = (id_ex.ir >> 12) & 0x7;
    let funct7 = (id_ex.ir >> 25) & 0x7f;

    let mut ex_mem = ExMem {
        ir: id_ex.ir,
        pc: id_ex.pc,
        a: id_ex.a,
        b: id_ex.b,
        imm: id_ex.imm,
        alu_output: 0,
        reg_write: id_ex.reg_write,
    };

    match opcode {
        opcodes::LOAD | opcodes::STORE => {
            ex_mem.alu_output = id_ex.a.wrapping_add(id_ex.imm as u32);
        }
        opcodes::OP_IMM => {
            ex_mem.alu_output = match funct3 {
                0 => id_ex.a.wrapping_add(id_ex.imm as u32), // ADDI
                1 => id_ex.a << (id_ex.imm as u32 & 0x1f),   // SLLI
                4 => id_ex.a ^ (id_ex.imm as u32),           // XORI
                5 => {
                    let shamt = id_ex.imm as u32 & 0x1f;
                    if funct7 == 0x20 {
                        ((id_ex.a as i32) >> shamt) as u32 // SRAI
                    } else {
                        id_ex.a >> shamt // SRLI
                    }
                }
                6 => id_ex.a | (id_ex.imm as u32), // ORI
                7 => id_ex.a & (id_ex.imm as u32), // ANDI
                _ => {
                    cpu.run_flag = false;
                    0
                }
            };
        }
        opcodes::OP => {
            ex_mem.alu_output = match (funct3, funct7) {
                (0, 0x00) => id_ex.a.wrapping_add(id_ex.b), // ADD
                (0, 0x20) => id_ex.a.wrapping_sub(id_ex.b), // SUB
                (1, 0x00) => id_ex.a << (id_ex.b & 0x1f),   // SLL
                (4, 0x00) => id_ex.a ^ id_ex.b,             // XOR
                (5, 0x00) => id_ex.a >> (id_ex.b & 0x1f),   // SRL
                (5, 0x20) => ((id_ex.a as i32) >> (id_ex.b & 0x1f)) as u32, // SRA
                (6, 0x00) => id_ex.a | id_ex.b,             // OR
                (7, 0x00) => id_ex.a & id_ex.b,             // AND
                _ => {
                    cpu.run_flag = false;
                    0
                }
            };
        }
        opcodes::JAL => {
            ex_mem.alu_output = id_ex.pc.wrapping_add(4);
            cpu.next.pc = id_ex.pc.wrapping_add(id_ex.imm as u32);
            cpu.if_id.jump_stall_count = 1;
            cpu.if_id.jump_detected = true;
        }
        opcodes::JALR => {
            ex_mem.alu_output = id_ex.pc.wrapping_add(4);
            cpu.next.pc = id_ex.a.wrapping_add(id_ex.imm as u32) & !1u32;
            cpu.if_id.jump_stall_count = 1;
            cpu.if_id.jump_detected = true;
        }
        opcodes::BRANCH => {
            let taken = match funct3 {
                0 => id_ex.a == id_ex.b,                    // BEQ
                1 => id_ex.a != id_ex.b,                     // BNE
                4 => (id_ex.a as i32) < (id_ex.b as i32),    // BLT
                5 => (id_ex.a as i32) >= (id_ex.b as i32),   // BGE
                6 => id_ex.a < id_ex.b,                      // BLTU
                7 => id_ex.a >= id_ex.b,                     // BGEU
                _ => {
                    cpu.run_flag = false;
                    false
                }
            };
            if taken {
                cpu.next.pc = id_ex.pc.wrapping_add(id_ex.imm as u32);
                cpu.if_id.jump_detected = true;
            }
            cpu.if_id.jump_stall_count = 1;
        }
        _ => {
            cpu.run_flag = false;
        }
    }

    cpu.ex_mem = ex_mem;
}
