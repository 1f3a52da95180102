//! CPU Core Definition and Initialization.
//!
//! This module defines the central `Cpu` structure, the container for the
//! complete machine state during a run. It coordinates the following:
//! 1. **State Management:** Registers, flags, program counter and step count.
//! 2. **Memory:** Data memory loaded from the program's data image.
//! 3. **System Interface:** The console that receives `write` syscalls.
//! 4. **Statistics:** Per-run execution counters.

/// Instruction dispatch and the fetch/execute step.
pub mod execution;

/// Load/store address generation and memory access.
pub mod memory;

/// Supervisor calls and the output console.
pub mod syscall;

use crate::common::RegisterFile;
use crate::common::error::ExecutionError;
use crate::config::Config;
use crate::isa::program::Program;
use crate::soc::DataMemory;
use crate::stats::SimStats;

pub use self::syscall::Console;

/// Why a run ended normally.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HaltReason {
    /// A `halt`/`hlt` instruction executed.
    HaltInstruction,
    /// The `exit` (or `exit_group`) syscall executed with this status.
    ExitSyscall(i64),
    /// The program counter reached the end of the program.
    EndOfProgram,
}

/// Control-flow outcome of executing one instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Flow {
    /// Continue with the next instruction.
    Next,
    /// Continue at the given instruction index.
    Jump(usize),
    /// Stop the run.
    Halt(HaltReason),
}

/// Main CPU structure containing all machine state for one run.
#[derive(Clone, Debug)]
pub struct Cpu {
    /// General-purpose registers, stack pointer and flags.
    pub regs: RegisterFile,
    /// Program counter (instruction index).
    pub pc: usize,
    /// Data memory.
    pub memory: DataMemory,
    /// Bytes written through the `write` syscall.
    pub console: Console,
    /// Instructions executed in the current run.
    pub steps: u64,
    /// Emit a trace event per executed instruction.
    pub trace: bool,
    /// Fault on division by zero instead of producing 0.
    pub trap_divide_by_zero: bool,
    /// Performance statistics.
    pub stats: SimStats,
}

impl Cpu {
    /// Creates a CPU with empty memory and zeroed registers.
    pub fn new(config: &Config) -> Self {
        Self {
            regs: RegisterFile::new(),
            pc: 0,
            memory: DataMemory::default(),
            console: Console::default(),
            steps: 0,
            trace: config.general.trace_instructions,
            trap_divide_by_zero: config.general.trap_divide_by_zero,
            stats: SimStats::default(),
        }
    }

    /// Resets all state for a fresh run of `program`.
    ///
    /// Memory is rebuilt from the data image, registers and flags are zeroed,
    /// `sp` points at the top of memory and `pc` at the program entry.
    ///
    /// # Errors
    ///
    /// `ExecutionError::MemoryUnavailable` when the configured data memory
    /// cannot be built; the CPU is left untouched.
    pub fn reset(&mut self, program: &Program, config: &Config) -> Result<(), ExecutionError> {
        let size = config.memory.size;
        self.memory = DataMemory::new(program.data_base(), program.data(), size).ok_or(
            ExecutionError::MemoryUnavailable {
                base: program.data_base(),
                size,
            },
        )?;
        self.regs.reset(self.memory.top());
        self.pc = program.entry();
        self.console.clear();
        self.steps = 0;
        self.trace = config.general.trace_instructions;
        self.trap_divide_by_zero = config.general.trap_divide_by_zero;
        self.stats = SimStats::default();
        Ok(())
    }
}
