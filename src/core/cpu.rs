//! The `Cpu`: wires memory, architectural state, and the pipeline together
//! and drives the cycle loop.

use std::path::Path;

use crate::common::SimError;
use crate::config::Config;
use crate::core::arch::ArchState;
use crate::core::memory::{Memory, MemoryRegion};
use crate::core::pipeline::latches::{ExMem, IdEx, IfId, MemWb};
use crate::core::pipeline::stages;
use crate::sim::loader;
use crate::stats::SimStats;

/// The pipeline simulator's complete state.
pub struct Cpu {
    pub(crate) memory: Memory,
    pub(crate) current: ArchState,
    pub(crate) next: ArchState,

    pub(crate) if_id: IfId,
    pub(crate) id_ex: IdEx,
    pub(crate) ex_mem: ExMem,
    pub(crate) mem_wb: MemWb,

    pub(crate) forwarding: bool,
    pub(crate) run_flag: bool,
    trace_cycles: bool,

    cycle_count: u64,
    instruction_count: u64,

    /// Statistics mirror of the counters above, updated every cycle.
    pub stats: SimStats,

    text_base: u32,
    loaded_program: Vec<u32>,
}

impl Cpu {
    /// Builds a `Cpu` with memory regions laid out per `config`, forwarding
    /// enabled or disabled per `config`, and no program loaded.
    pub fn new(config: &Config) -> Self {
        let mut memory = Memory::new();
        memory.add_region(MemoryRegion::new(
            "text",
            config.memory.text_base(),
            config.memory.text_size(),
        ));
        memory.add_region(MemoryRegion::new(
            "data",
            config.memory.data_base(),
            config.memory.data_size(),
        ));
        let stack_size = config.memory.stack_size();
        let stack_base = config.memory.stack_top().wrapping_sub(stack_size as u32 - 1);
        memory.add_region(MemoryRegion::new("stack", stack_base, stack_size));

        let text_base = config.memory.text_base();

        Self {
            memory,
            current: ArchState::at(text_base),
            next: ArchState::at(text_base),
            if_id: IfId::default(),
            id_ex: IdEx::default(),
            ex_mem: ExMem::default(),
            mem_wb: MemWb::default(),
            forwarding: config.general.forwarding,
            run_flag: true,
            trace_cycles: config.general.trace_cycles,
            cycle_count: 0,
            instruction_count: 0,
            stats: SimStats::default(),
            text_base,
            loaded_program: Vec::new(),
        }
    }

    /// Zeroes all architectural and pipeline state, leaving memory and the
    /// loaded program untouched. Equivalent to the state right after
    /// construction but before `load_program`.
    pub fn initialize(&mut self) {
        self.current = ArchState::at(self.text_base);
        self.next = ArchState::at(self.text_base);
        self.if_id = IfId::default();
        self.id_ex = IdEx::default();
        self.ex_mem = ExMem::default();
        self.mem_wb = MemWb::default();
        self.run_flag = true;
        self.cycle_count = 0;
        self.instruction_count = 0;
        self.stats = SimStats::default();
    }

    /// Loads a hex-word program file into the text region at `text_base`,
    /// remembering it so `reset` can reload it without touching disk again.
    pub fn load_program(&mut self, path: &Path) -> Result<(), SimError> {
        let words = loader::load_program(path)?;
        loader::write_program(&mut self.memory, self.text_base, &words);
        self.loaded_program = words;
        Ok(())
    }

    /// Zeroes every memory region, reloads the program image at the text
    /// base, and resets all architectural and pipeline state.
    pub fn reset(&mut self) {
        self.memory.reset();
        loader::write_program(&mut self.memory, self.text_base, &self.loaded_program.clone());
        self.initialize();
    }

    /// Runs one cycle: WB, MEM, EX, ID, IF, then commits `next` into
    /// `current`. Returns `false` once the pipeline has drained (or a fatal
    /// decode error halted the run) and no further cycles should execute.
    pub fn step(&mut self) -> bool {
        if !self.run_flag {
            return false;
        }

        let retired = stages::writeback::tick(self);
        stages::memory::tick(self);
        stages::execute::tick(self);
        stages::decode::tick(self);
        stages::fetch::tick(self);

        self.current = self.next;
        self.cycle_count += 1;
        if retired {
            self.instruction_count += 1;
        }
        self.stats.cycles = self.cycle_count;
        self.stats.instructions_retired = self.instruction_count;

        if self.trace_cycles {
            self.trace_cycle();
        }

        let drained = self.if_id.ir == 0
            && self.id_ex.ir == 0
            && self.ex_mem.ir == 0
            && self.mem_wb.ir == 0;

        self.run_flag && !drained
    }

    /// Emits a one-line per-cycle trace to stderr: cycle number, PC, and the
    /// instruction word (or `--------` for a bubble) sitting in each latch.
    fn trace_cycle(&self) {
        let latch = |ir: u32| {
            if ir == 0 {
                "--------".to_string()
            } else {
                format!("{ir:08x}")
            }
        };
        eprintln!(
            "cycle {:>6} pc={:#010x} if/id={} id/ex={} ex/mem={} mem/wb={}",
            self.cycle_count,
            self.current.pc,
            latch(self.if_id.ir),
            latch(self.id_ex.ir),
            latch(self.ex_mem.ir),
            latch(self.mem_wb.ir),
        );
    }

    /// Runs up to `n` cycles, stopping early if the pipeline drains or a
    /// fatal decode error halts the run.
    pub fn run(&mut self, n: u64) {
        for _ in 0..n {
            if !self.step() {
                break;
            }
        }
    }

    /// Runs until the pipeline drains or a fatal decode error halts the run.
    pub fn run_all(&mut self) {
        while self.step() {}
    }

    // --- Shell-facing accessors (the only surface external collaborators
    // may use; none of them reach into latch internals directly). ---

    /// Current value of cycle count (CYCLE_COUNT).
    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }

    /// Current value of instruction count (INSTRUCTION_COUNT).
    pub fn instruction_count(&self) -> u64 {
        self.instruction_count
    }

    /// Whether the run flag is still set (no fatal decode error seen).
    pub fn is_running(&self) -> bool {
        self.run_flag
    }

    /// Reads general-purpose register `n` from the current state.
    pub fn read_register(&self, n: usize) -> u32 {
        self.current.regs.read(n)
    }

    /// Writes general-purpose register `n` in both the current and next
    /// snapshots.
    pub fn set_register(&mut self, n: usize, value: u32) {
        self.current.regs.write(n, value);
        self.next.regs.write(n, value);
    }

    /// Current program counter.
    pub fn pc(&self) -> u32 {
        self.current.pc
    }

    /// Legacy HI scratch register.
    pub fn hi(&self) -> u32 {
        self.current.hi
    }

    /// Sets the legacy HI scratch register.
    pub fn set_hi(&mut self, value: u32) {
        self.current.hi = value;
        self.next.hi = value;
    }

    /// Legacy LO scratch register.
    pub fn lo(&self) -> u32 {
        self.current.lo
    }

    /// Sets the legacy LO scratch register.
    pub fn set_lo(&mut self, value: u32) {
        self.current.lo = value;
        self.next.lo = value;
    }

    /// Reads a 32-bit word from memory.
    pub fn read_memory_word(&self, addr: u32) -> u32 {
        self.memory.read32(addr)
    }

    /// Writes a 32-bit word to memory.
    pub fn write_memory_word(&mut self, addr: u32, value: u32) {
        self.memory.write32(addr, value);
    }

    /// Enables or disables data forwarding.
    pub fn set_forwarding(&mut self, enabled: bool) {
        self.forwarding = enabled;
    }

    /// Whether data forwarding is currently enabled.
    pub fn forwarding(&self) -> bool {
        self.forwarding
    }

    /// A snapshot of the IF/ID latch, for dump tooling.
    pub fn if_id(&self) -> IfId {
        self.if_id
    }

    /// A snapshot of the ID/EX latch, for dump tooling.
    pub fn id_ex(&self) -> IdEx {
        self.id_ex
    }

    /// A snapshot of the EX/MEM latch, for dump tooling.
    pub fn ex_mem(&self) -> ExMem {
        self.ex_mem
    }

    /// A snapshot of the MEM/WB latch, for dump tooling.
    pub fn mem_wb(&self) -> MemWb {
        self.mem_wb
    }

    /// Path-free loader entry point used by tests: installs `words` as the
    /// program image directly, as if read from a file.
    pub fn load_words(&mut self, words: &[u32]) {
        loader::write_program(&mut self.memory, self.text_base, words);
        self.loaded_program = words.to_vec();
    }
}

impl std::fmt::Debug for Cpu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cpu")
            .field("cycle_count", &self.cycle_count)
            .field("instruction_count", &self.instruction_count)
            .field("pc", &self.current.pc)
            .field("run_flag", &self.run_flag)
            .finish()
    }
}
