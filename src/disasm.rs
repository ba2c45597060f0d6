//! Instruction disassembler and state dump formatting.
//!
//! An external collaborator relative to the pipeline core: it renders
//! instruction words and latch/register snapshots for the shell, but never
//! mutates simulator state.

use crate::core::decode::{decode, opcodes};
use crate::core::Cpu;

const REG_NAMES: [&str; 32] = [
    "zero", "ra", "sp", "gp", "tp", "t0", "t1", "t2", "s0", "s1", "a0", "a1", "a2", "a3", "a4",
    "a5", "a6", "a7", "s2", "s3", "s4", "s5", "s6", "s7", "s8", "s9", "s10", "s11", "t3", "t4",
    "t5", "t6",
];

/// Renders register `n`'s ABI name (e.g. `x2` -> `sp`).
pub fn reg_name(n: usize) -> &'static str {
    REG_NAMES.get(n).copied().unwrap_or("x?")
}

/// Renders one instruction word as a short assembly-like mnemonic line.
///
/// `ir == 0` renders as `"nop (bubble)"`, matching the pipeline's bubble
/// convention rather than a real `addi x0, x0, 0`.
pub fn disassemble(ir: u32) -> String {
    if ir == 0 {
        return "nop (bubble)".to_string();
    }

    let d = decode(ir);
    let rd = reg_name(d.rd);
    let rs1 = reg_name(d.rs1);
    let rs2 = reg_name(d.rs2);

    match d.opcode {
        opcodes::OP => {
            let name = match (d.funct3, d.funct7) {
                (0, 0x00) => "add",
                (0, 0x20) => "sub",
                (1, 0x00) => "sll",
                (4, 0x00) => "xor",
                (5, 0x00) => "srl",
                (5, 0x20) => "sra",
                (6, 0x00) => "or",
                (7, 0x00) => "and",
                _ => "op.?",
            };
            format!("{name} {rd}, {rs1}, {rs2}")
        }
        opcodes::OP_IMM => {
            let name = match d.funct3 {
                0 => "addi",
                1 => "slli",
                4 => "xori",
                5 if d.funct7 == 0x20 => "srai",
                5 => "srli",
                6 => "ori",
                7 => "andi",
                _ => "opimm.?",
            };
            format!("{name} {rd}, {rs1}, {}", d.imm)
        }
        opcodes::LOAD => {
            let name = match d.funct3 {
                0 => "lb",
                1 => "lh",
                2 => "lw",
                4 => "lbu",
                5 => "lhu",
                _ => "load.?",
            };
            format!("{name} {rd}, {}({rs1})", d.imm)
        }
        opcodes::STORE => {
            let name = match d.funct3 {
                0 => "sb",
                1 => "sh",
                2 => "sw",
                _ => "store.?",
            };
            format!("{name} {rs2}, {}({rs1})", d.imm)
        }
        opcodes::BRANCH => {
            let name = match d.funct3 {
                0 => "beq",
                1 => "bne",
                4 => "blt",
                5 => "bge",
                6 => "bltu",
                7 => "bgeu",
                _ => "branch.?",
            };
            format!("{name} {rs1}, {rs2}, {}", d.imm)
        }
        opcodes::JAL => format!("jal {rd}, {}", d.imm),
        opcodes::JALR => format!("jalr {rd}, {}({rs1})", d.imm),
        opcodes::SYSTEM => "ecall/system".to_string(),
        _ => format!("unknown ({:#010x})", ir),
    }
}

/// Renders the full register file as a multi-line dump, ten registers per
/// group of lines, in the style of the original `rdump` command.
pub fn format_register_dump(cpu: &Cpu) -> String {
    let mut out = String::new();
    out.push_str(&format!("PC: {:#010x}\n", cpu.pc()));
    for i in 0..32 {
        out.push_str(&format!(
            "x{:<2} ({:<4}) = {:#010x}\n",
            i,
            reg_name(i),
            cpu.read_register(i)
        ));
    }
    out.push_str(&format!("HI: {:#010x}  LO: {:#010x}\n", cpu.hi(), cpu.lo()));
    out
}

/// Renders a memory range `[start, start + n_words*4)` as hex words, one per
/// line, in the style of the original `mdump` command.
pub fn format_memory_dump(cpu: &Cpu, start: u32, n_words: u32) -> String {
    let mut out = String::new();
    for i in 0..n_words {
        let addr = start.wrapping_add(i * 4);
        out.push_str(&format!("{:#010x}: {:#010x}\n", addr, cpu.read_memory_word(addr)));
    }
    out
}

/// Renders a one-line summary of all four pipeline latches, in the style of
/// the original `show` command.
pub fn format_pipeline_dump(cpu: &Cpu) -> String {
    format!(
        "IF/ID:  {}\nID/EX:  {}\nEX/MEM: {}\nMEM/WB: {}\n",
        disassemble(cpu.if_id().ir),
        disassemble(cpu.id_ex().ir),
        disassemble(cpu.ex_mem().ir),
        disassemble(cpu.mem_wb().ir),
    )
}
