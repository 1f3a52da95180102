//! Simulator: owns the parsed program and the CPU side-by-side.
//!
//! The caller drives a session as construct → parse → run → inspect. Each
//! `run` resets all machine state first, so repeated runs of the same program
//! are independent and nothing is shared between simulator instances.

use tracing::{debug, info, warn};

use crate::asm;
use crate::common::RegisterFile;
use crate::common::error::{AsmError, ExecutionError, RegisterError};
use crate::config::Config;
use crate::core::Cpu;
use crate::core::cpu::{Console, HaltReason};
use crate::isa::program::Program;
use crate::stats::SimStats;

/// Lifecycle state of a [`Simulator`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineState {
    /// No program has been parsed.
    Empty,
    /// A program is loaded and has not been run since.
    Ready,
    /// A run is in progress.
    Running,
    /// The last run halted normally.
    Halted,
    /// The last run stopped on an execution error.
    Faulted,
}

/// Outcome of [`Simulator::run`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExecutionResult {
    /// The program stopped normally.
    Halted {
        /// Why the run ended.
        reason: HaltReason,
        /// Instructions executed.
        steps: u64,
    },
    /// The program stopped on an execution error.
    Faulted {
        /// The fault.
        error: ExecutionError,
        /// Program counter of the faulting instruction.
        pc: usize,
        /// Instructions executed before the fault.
        steps: u64,
    },
}

impl ExecutionResult {
    /// True when the run halted normally.
    pub const fn is_halted(&self) -> bool {
        matches!(self, Self::Halted { .. })
    }

    /// Number of instructions executed.
    pub const fn steps(&self) -> u64 {
        match self {
            Self::Halted { steps, .. } | Self::Faulted { steps, .. } => *steps,
        }
    }

    /// The fault, if the run faulted.
    pub const fn error(&self) -> Option<&ExecutionError> {
        match self {
            Self::Halted { .. } => None,
            Self::Faulted { error, .. } => Some(error),
        }
    }
}

/// Top-level simulator: configuration, program and CPU state.
#[derive(Debug)]
pub struct Simulator {
    config: Config,
    program: Option<Program>,
    cpu: Cpu,
    state: EngineState,
}

impl Simulator {
    /// Creates a simulator with no program loaded.
    pub fn new(config: Config) -> Self {
        let cpu = Cpu::new(&config);
        Self {
            config,
            program: None,
            cpu,
            state: EngineState::Empty,
        }
    }

    /// Parses and resolves source lines, replacing any previously loaded program.
    ///
    /// On failure no program remains loaded.
    pub fn parse<I>(&mut self, lines: I) -> Result<&Program, AsmError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.program = None;
        self.state = EngineState::Empty;
        match asm::assemble(lines, &self.config) {
            Ok(program) => Ok(self.load(program)),
            Err(e) => {
                warn!(line = e.line(), "parse failed: {e}");
                Err(e)
            }
        }
    }

    /// Installs an already assembled program.
    pub fn load(&mut self, program: Program) -> &Program {
        debug!(
            instructions = program.len(),
            entry = program.entry(),
            "program loaded"
        );
        self.state = EngineState::Ready;
        self.program.insert(program)
    }

    /// Runs the loaded program from a fresh reset until it halts or faults.
    pub fn run(&mut self) -> ExecutionResult {
        let Some(program) = self.program.as_ref() else {
            self.state = EngineState::Faulted;
            return ExecutionResult::Faulted {
                error: ExecutionError::NoProgramLoaded,
                pc: 0,
                steps: 0,
            };
        };

        if let Err(error) = self.cpu.reset(program, &self.config) {
            warn!("run aborted: {error}");
            self.state = EngineState::Faulted;
            return ExecutionResult::Faulted {
                error,
                pc: program.entry(),
                steps: 0,
            };
        }
        self.state = EngineState::Running;
        let limit = self.config.general.step_limit;
        debug!(entry = self.cpu.pc, ?limit, "run started");

        let outcome = loop {
            if let Some(max) = limit {
                if self.cpu.steps >= max && self.cpu.pc != program.len() {
                    break Err(ExecutionError::StepLimitExceeded { limit: max });
                }
            }
            match self.cpu.step(program) {
                Ok(None) => {}
                Ok(Some(reason)) => break Ok(reason),
                Err(e) => break Err(e),
            }
        };

        let steps = self.cpu.steps;
        match outcome {
            Ok(reason) => {
                info!(?reason, steps, "run halted");
                self.state = EngineState::Halted;
                ExecutionResult::Halted { reason, steps }
            }
            Err(error) => {
                warn!(pc = self.cpu.pc, steps, "run faulted: {error}");
                self.state = EngineState::Faulted;
                ExecutionResult::Faulted {
                    error,
                    pc: self.cpu.pc,
                    steps,
                }
            }
        }
    }

    /// Register state after the most recent run.
    pub const fn registers(&self) -> &RegisterFile {
        &self.cpu.regs
    }

    /// Reads one register by name (`x0`-`x30`, `sp`, `lr`, `fp`, `xzr`).
    pub fn reg(&self, name: &str) -> Result<i64, RegisterError> {
        self.cpu.regs.read(name)
    }

    /// Output captured from `write` syscalls during the most recent run.
    pub const fn console(&self) -> &Console {
        &self.cpu.console
    }

    /// Statistics of the most recent run.
    pub const fn stats(&self) -> &SimStats {
        &self.cpu.stats
    }

    /// Current lifecycle state.
    pub const fn state(&self) -> EngineState {
        self.state
    }

    /// The loaded program, if any.
    pub const fn program(&self) -> Option<&Program> {
        self.program.as_ref()
    }

    /// Machine state (program counter, memory, step count).
    pub const fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    /// Active configuration.
    pub const fn config(&self) -> &Config {
        &self.config
    }
}
