//! Simulation statistics collection and reporting.
//!
//! This module tracks execution metrics for a run. It provides:
//! 1. **Throughput:** Retired instructions, host time and derived MIPS.
//! 2. **Instruction mix:** Counts by category (move, memory, ALU, compare, branch, system).
//! 3. **Control flow:** Taken branches and supervisor calls.

use std::fmt;
use std::time::Instant;

use crate::isa::mnemonic::Category;

/// Simulation statistics for one run.
#[derive(Clone, Debug)]
pub struct SimStats {
    start_time: Instant,
    /// Number of instructions executed to completion.
    pub instructions_retired: u64,

    /// Count of register/immediate moves retired.
    pub inst_move: u64,
    /// Count of loads and stores retired.
    pub inst_memory: u64,
    /// Count of arithmetic, logical and shift instructions retired.
    pub inst_alu: u64,
    /// Count of flag-only comparisons retired.
    pub inst_compare: u64,
    /// Count of branch instructions retired.
    pub inst_branch: u64,
    /// Count of system instructions (svc, halt, nop) retired.
    pub inst_system: u64,

    /// Number of branches that redirected the program counter.
    pub branches_taken: u64,
    /// Number of supervisor calls serviced.
    pub syscalls: u64,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            instructions_retired: 0,
            inst_move: 0,
            inst_memory: 0,
            inst_alu: 0,
            inst_compare: 0,
            inst_branch: 0,
            inst_system: 0,
            branches_taken: 0,
            syscalls: 0,
        }
    }
}

impl SimStats {
    /// Records one retired instruction of the given category.
    pub fn retire(&mut self, category: Category) {
        self.instructions_retired += 1;
        let counter = match category {
            Category::Move => &mut self.inst_move,
            Category::Memory => &mut self.inst_memory,
            Category::Alu => &mut self.inst_alu,
            Category::Compare => &mut self.inst_compare,
            Category::Branch => &mut self.inst_branch,
            Category::System => &mut self.inst_system,
        };
        *counter += 1;
    }

    /// Prints the report to stdout.
    pub fn print(&self) {
        println!("{self}");
    }
}

impl fmt::Display for SimStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let seconds = self.start_time.elapsed().as_secs_f64();
        let instr = self.instructions_retired.max(1) as f64;
        let pct = |count: u64| (count as f64 / instr) * 100.0;
        let mips = if seconds > 0.0 {
            (self.instructions_retired as f64 / seconds) / 1_000_000.0
        } else {
            0.0
        };

        writeln!(f, "==========================================================")?;
        writeln!(f, "ARMSIM EXECUTION STATISTICS")?;
        writeln!(f, "==========================================================")?;
        writeln!(f, "host_seconds             {seconds:.4} s")?;
        writeln!(f, "sim_insts                {}", self.instructions_retired)?;
        writeln!(f, "sim_mips                 {mips:.2}")?;
        writeln!(f, "----------------------------------------------------------")?;
        writeln!(f, "INSTRUCTION MIX")?;
        for (name, count) in [
            ("move", self.inst_move),
            ("memory", self.inst_memory),
            ("alu", self.inst_alu),
            ("compare", self.inst_compare),
            ("branch", self.inst_branch),
            ("system", self.inst_system),
        ] {
            writeln!(f, "  op.{name:<19} {count} ({:.2}%)", pct(count))?;
        }
        writeln!(f, "----------------------------------------------------------")?;
        writeln!(f, "branches.taken           {}", self.branches_taken)?;
        write!(f, "syscalls                 {}", self.syscalls)
    }
}
