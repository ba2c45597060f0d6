//! End-to-end forwarding and stall-cycle tests driven through the full
//! pipeline (complementing the hazard-resolution unit tests colocated with
//! `core::pipeline::hazards`).

use rv32i_pipe_sim::config::Config;
use rv32i_pipe_sim::core::Cpu;

fn cpu_with(words: &[u32], forwarding: bool) -> Cpu {
    let mut cpu = Cpu::new(&Config::default());
    cpu.set_forwarding(forwarding);
    cpu.load_words(words);
    cpu
}

/// EX/MEM forwarding: a consumer immediately after its producer gets the
/// right value with forwarding on, and no extra cycles are spent.
#[test]
fn ex_mem_forward_to_immediate_consumer() {
    let mut cpu = cpu_with(
        &[
            0x0050_0093, // addi x1, x0, 5
            0x0010_8113, // addi x2, x1, 1
        ],
        true,
    );
    cpu.run_all();
    assert_eq!(cpu.read_register(2), 6);
    assert_eq!(cpu.cycle_count(), 6); // k=2 independent-in-program-order + 4
}

/// MEM/WB forwarding: a consumer two instructions behind its producer
/// (EX/MEM hazard already resolved) still gets the right value from the
/// older latch.
#[test]
fn mem_wb_forward_to_second_instruction_after() {
    let mut cpu = cpu_with(
        &[
            0x0050_0093, // addi x1, x0, 5
            0x0000_0113, // addi x2, x0, 0   (independent filler)
            0x0010_8193, // addi x3, x1, 1   (depends on x1, now MEM/WB-distance)
        ],
        true,
    );
    cpu.run_all();
    assert_eq!(cpu.read_register(3), 6);
}

/// A closer producer (EX/MEM) wins over a farther one (MEM/WB) writing the
/// same register.
#[test]
fn ex_mem_hazard_wins_over_mem_wb_for_same_register() {
    let mut cpu = cpu_with(
        &[
            0x0010_0093, // addi x1, x0, 1
            0x0020_0093, // addi x1, x0, 2   (re-defines x1, now EX/MEM-distance)
            0x0000_8113, // addi x2, x1, 0   (must see the closer def: 2)
        ],
        true,
    );
    cpu.run_all();
    assert_eq!(cpu.read_register(2), 2);
}

/// Store data (rs2) is forwarded from a producer one instruction ahead.
#[test]
fn store_data_is_forwarded_from_producer() {
    let mut cpu = cpu_with(
        &[
            0x0010_0113, // addi x2, x0, 1     -> x2 = 1
            0x01C1_1113, // slli x2, x2, 28    -> x2 = 0x1000_0000 (data base)
            0x0070_0093, // addi x1, x0, 7     -> x1 = 7 (producer, right before the store)
            0x0011_2023, // sw   x1, 0(x2)     -> mem[x2] = x1 (forwarded from EX/MEM)
        ],
        true,
    );
    cpu.run_all();
    assert_eq!(cpu.read_memory_word(0x1000_0000), 7);
}

/// With forwarding disabled, the same immediate RAW dependency instead
/// costs a hardware stall, but still produces the correct final value.
#[test]
fn raw_hazard_without_forwarding_still_converges_via_stall() {
    let mut cpu = cpu_with(
        &[
            0x0050_0093, // addi x1, x0, 5
            0x0010_8113, // addi x2, x1, 1
        ],
        false,
    );
    cpu.run_all();
    assert_eq!(cpu.read_register(2), 6);
    assert!(cpu.cycle_count() > 6); // stall cycles were spent getting there
}

/// Toggling forwarding off mid-run is honored from the next decode
/// onward.
#[test]
fn forwarding_can_be_toggled_at_runtime() {
    let mut cpu = cpu_with(&[0x0050_0093, 0x0010_8113, 0x0021_0193], true);
    assert!(cpu.forwarding());
    cpu.set_forwarding(false);
    assert!(!cpu.forwarding());
    cpu.run_all();
    // Correctness holds regardless of when the stall/forward path is taken.
    assert_eq!(cpu.read_register(3), 8);
}

/// x0 is never a forwarding hazard target: a producer that nominally
/// targets x0 never perturbs a later read of x0.
#[test]
fn x0_never_participates_in_forwarding() {
    use rv32i_pipe_sim::core::pipeline::hazards;
    use rv32i_pipe_sim::core::pipeline::latches::{ExMem, MemWb};

    let mut ex_mem = ExMem::default();
    ex_mem.ir = 0x13; // addi x0, x0, 0 -- rd field is 0
    ex_mem.alu_output = 0xDEAD_BEEF;
    let mut mem_wb = MemWb::default();
    mem_wb.reg_write = true;

    assert!(hazards::resolve(0, &ex_mem, &mem_wb).is_none());
}
