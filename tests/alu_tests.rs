//! ALU behavior, exercised end-to-end through the pipeline.
//!
//! There is no standalone ALU unit in this design — the execute stage
//! dispatches directly on opcode/funct3/funct7 — so these tests drive a
//! `Cpu` through one instruction at a time and check the retired result.

use rv32i_pipe_sim::config::Config;
use rv32i_pipe_sim::core::Cpu;

fn run_program(words: &[u32]) -> Cpu {
    let config = Config::default();
    let mut cpu = Cpu::new(&config);
    cpu.load_words(words);
    cpu.run_all();
    cpu
}

#[test]
fn addi_adds_sign_extended_immediate() {
    // addi x1, x0, 5
    let cpu = run_program(&[0x0050_0093]);
    assert_eq!(cpu.read_register(1), 5);
}

#[test]
fn addi_negative_immediate_sign_extends() {
    // addi x1, x0, -1
    let cpu = run_program(&[0xFFF0_0093]);
    assert_eq!(cpu.read_register(1), 0xFFFF_FFFF);
}

#[test]
fn add_register_register() {
    // addi x1,x0,10; addi x2,x0,20; add x3,x1,x2
    let cpu = run_program(&[0x00A0_0093, 0x0140_0113, 0x0020_81B3]);
    assert_eq!(cpu.read_register(3), 30);
}

#[test]
fn sub_register_register() {
    // addi x1,x0,30; addi x2,x0,10; sub x3,x1,x2
    let cpu = run_program(&[0x01E0_0093, 0x00A0_0113, 0x4020_81B3]);
    assert_eq!(cpu.read_register(3), 20);
}

#[test]
fn sll_and_srl_are_logical() {
    // addi x1,x0,1; slli x2,x1,3 -> 8
    let cpu = run_program(&[0x0010_0093, 0x0030_9113]);
    assert_eq!(cpu.read_register(2), 8);
}

#[test]
fn srai_sign_extends_a_negative_value() {
    // addi x1,x0,-8 (0xFFFFFFF8); srai x2,x1,1 -> arithmetic shift keeps sign
    let cpu = run_program(&[0xFF80_0093, 0x4010_D113]);
    assert_eq!(cpu.read_register(2) as i32, -4);
}

#[test]
fn srli_does_not_sign_extend() {
    // addi x1,x0,-8; srli x2,x1,1 -> logical shift, top bit becomes 0
    let cpu = run_program(&[0xFF80_0093, 0x0010_D113]);
    assert_eq!(cpu.read_register(2), 0x7FFF_FFFC);
}

#[test]
fn sra_on_op_matches_srai_on_op_imm() {
    // addi x1,x0,-8; addi x2,x0,1; sra x3,x1,x2
    let cpu = run_program(&[0xFF80_0093, 0x0010_0113, 0x4020_D1B3]);
    assert_eq!(cpu.read_register(3) as i32, -4);
}

#[test]
fn logical_ops() {
    // addi x1,x0,0x0F; addi x2,x0,0x33; or x3,x1,x2; and x4,x1,x2; xor x5,x1,x2
    let cpu = run_program(&[
        0x00F0_0093,
        0x0330_0113,
        0x0020_E1B3,
        0x0020_F233,
        0x0020_C2B3,
    ]);
    assert_eq!(cpu.read_register(3), 0x3F);
    assert_eq!(cpu.read_register(4), 0x03);
    assert_eq!(cpu.read_register(5), 0x3C);
}

#[test]
fn unknown_op_imm_funct3_halts_the_run() {
    // funct3=2 and funct3=3 are unused for OP-IMM.
    let ir = (2u32 << 12) | 0x13;
    let mut cpu = Cpu::new(&Config::default());
    cpu.load_words(&[ir]);
    cpu.run_all();
    assert!(!cpu.is_running());
}
