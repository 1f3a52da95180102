//! Main Execution Step.
//!
//! This module implements the fetch/dispatch/execute cycle. It performs the following:
//! 1. **Fetch:** Selects the instruction at the program counter, detecting the end of
//!    the program and out-of-range counters.
//! 2. **Dispatch:** Matches on the closed mnemonic set and operand variants.
//! 3. **Update:** Applies register, flag and memory effects, then advances or redirects
//!    the program counter.
//! 4. **Observability:** Emits per-instruction trace events and updates statistics.

use tracing::trace;

use super::{Cpu, Flow, HaltReason};
use crate::common::error::ExecutionError;
use crate::core::units::alu::{Alu, AluOp};
use crate::core::units::bru;
use crate::isa::instruction::{Instruction, Operand, Reg};
use crate::isa::mnemonic::Mnemonic;
use crate::isa::program::Program;

fn malformed(inst: &Instruction) -> ExecutionError {
    ExecutionError::UnsupportedOperation {
        line: inst.line(),
        detail: format!("malformed operands for `{inst}`"),
    }
}

fn reg_at(inst: &Instruction, idx: usize) -> Result<Reg, ExecutionError> {
    match inst.operand(idx) {
        Some(Operand::Register(reg)) => Ok(*reg),
        _ => Err(malformed(inst)),
    }
}

fn target_at(inst: &Instruction, idx: usize) -> Result<usize, ExecutionError> {
    match inst.operand(idx) {
        Some(Operand::Target(target)) => Ok(*target),
        _ => Err(malformed(inst)),
    }
}

impl Cpu {
    /// Executes the instruction at the program counter.
    ///
    /// # Returns
    ///
    /// `Ok(Some(reason))` when the run has halted, `Ok(None)` to keep going.
    ///
    /// # Errors
    ///
    /// Any execution fault. The program counter is left on the faulting instruction.
    pub fn step(&mut self, program: &Program) -> Result<Option<HaltReason>, ExecutionError> {
        if self.pc == program.len() {
            return Ok(Some(HaltReason::EndOfProgram));
        }
        let inst = program
            .get(self.pc)
            .ok_or(ExecutionError::InvalidProgramCounter {
                pc: self.pc as u64,
                len: program.len(),
            })?;

        if self.trace {
            trace!(pc = self.pc, line = inst.line(), "{inst}");
        }

        let flow = self.execute(inst, program.len())?;
        self.steps += 1;
        self.stats.retire(inst.mnemonic().category());

        match flow {
            Flow::Next => {
                self.pc += 1;
                Ok(None)
            }
            Flow::Jump(target) => {
                self.stats.branches_taken += 1;
                self.pc = target;
                Ok(None)
            }
            Flow::Halt(reason) => {
                self.pc += 1;
                Ok(Some(reason))
            }
        }
    }

    /// Reads a register-or-immediate operand.
    fn source(&self, inst: &Instruction, idx: usize) -> Result<u64, ExecutionError> {
        match inst.operand(idx) {
            Some(Operand::Register(reg)) => Ok(self.regs.get(*reg)),
            Some(Operand::Immediate(imm)) => Ok(*imm as u64),
            _ => Err(malformed(inst)),
        }
    }

    /// Resolves the memory operand at `idx` to an address.
    fn address(&self, inst: &Instruction, idx: usize) -> Result<u64, ExecutionError> {
        match inst.operand(idx) {
            Some(Operand::Memory { base, offset }) => Ok(self.effective_address(*base, *offset)),
            _ => Err(malformed(inst)),
        }
    }

    /// Converts a register value into a jump target.
    fn indirect(value: u64, len: usize) -> Result<Flow, ExecutionError> {
        usize::try_from(value)
            .ok()
            .filter(|&target| target <= len)
            .map(Flow::Jump)
            .ok_or(ExecutionError::InvalidProgramCounter { pc: value, len })
    }

    /// Saves the return index in the link register.
    fn link(&mut self) {
        self.regs.set(Reg::LR, self.pc as u64 + 1);
    }

    fn execute(&mut self, inst: &Instruction, len: usize) -> Result<Flow, ExecutionError> {
        let line = inst.line();
        let mnemonic = inst.mnemonic();

        if let Some(op) = AluOp::from_mnemonic(mnemonic) {
            let rd = reg_at(inst, 0)?;
            let a = self.regs.get(reg_at(inst, 1)?);
            let b = self.source(inst, 2)?;
            if op.is_division() && b == 0 && self.trap_divide_by_zero {
                return Err(ExecutionError::ArithmeticFault {
                    line,
                    detail: "division by zero",
                });
            }
            let result = if matches!(mnemonic, Mnemonic::Adds | Mnemonic::Subs | Mnemonic::Ands) {
                let (result, flags) = Alu::execute_with_flags(op, a, b);
                self.regs.set_flags(flags);
                result
            } else {
                Alu::execute(op, a, b)
            };
            self.regs.set(rd, result);
            return Ok(Flow::Next);
        }

        match mnemonic {
            Mnemonic::Mov => {
                let value = self.source(inst, 1)?;
                self.regs.set(reg_at(inst, 0)?, value);
            }
            Mnemonic::Mvn => {
                let value = self.source(inst, 1)?;
                self.regs.set(reg_at(inst, 0)?, !value);
            }
            Mnemonic::Neg => {
                let value = self.source(inst, 1)?;
                self.regs.set(reg_at(inst, 0)?, 0u64.wrapping_sub(value));
            }
            Mnemonic::Ldr => {
                let value = match inst.operand(1) {
                    Some(Operand::Immediate(imm)) => *imm as u64,
                    Some(Operand::Memory { .. }) => self.load_u64(self.address(inst, 1)?, line)?,
                    _ => return Err(malformed(inst)),
                };
                self.regs.set(reg_at(inst, 0)?, value);
            }
            Mnemonic::Ldrb => {
                let value = self.load_u8(self.address(inst, 1)?, line)?;
                self.regs.set(reg_at(inst, 0)?, value);
            }
            Mnemonic::Str => {
                let value = self.regs.get(reg_at(inst, 0)?);
                let address = self.address(inst, 1)?;
                self.store_u64(address, value, line)?;
            }
            Mnemonic::Strb => {
                let value = self.regs.get(reg_at(inst, 0)?);
                let address = self.address(inst, 1)?;
                self.store_u8(address, value, line)?;
            }
            Mnemonic::Cmp | Mnemonic::Cmn | Mnemonic::Tst => {
                let a = self.regs.get(reg_at(inst, 0)?);
                let b = self.source(inst, 1)?;
                let op = match mnemonic {
                    Mnemonic::Cmp => AluOp::Sub,
                    Mnemonic::Cmn => AluOp::Add,
                    _ => AluOp::And,
                };
                let (_, flags) = Alu::execute_with_flags(op, a, b);
                self.regs.set_flags(flags);
            }
            Mnemonic::B => return Ok(Flow::Jump(target_at(inst, 0)?)),
            Mnemonic::BCond(cond) => {
                if bru::condition_holds(cond, self.regs.flags()) {
                    return Ok(Flow::Jump(target_at(inst, 0)?));
                }
            }
            Mnemonic::Bl => {
                let target = target_at(inst, 0)?;
                self.link();
                return Ok(Flow::Jump(target));
            }
            Mnemonic::Br => return Self::indirect(self.regs.get(reg_at(inst, 0)?), len),
            Mnemonic::Blr => {
                let value = self.regs.get(reg_at(inst, 0)?);
                self.link();
                return Self::indirect(value, len);
            }
            Mnemonic::Ret => {
                let reg = if inst.operands().is_empty() {
                    Reg::LR
                } else {
                    reg_at(inst, 0)?
                };
                return Self::indirect(self.regs.get(reg), len);
            }
            Mnemonic::Cbz | Mnemonic::Cbnz => {
                let zero = self.regs.get(reg_at(inst, 0)?) == 0;
                if zero == (mnemonic == Mnemonic::Cbz) {
                    return Ok(Flow::Jump(target_at(inst, 1)?));
                }
            }
            Mnemonic::Svc => return self.syscall(line),
            Mnemonic::Halt => return Ok(Flow::Halt(HaltReason::HaltInstruction)),
            Mnemonic::Nop => {}
            Mnemonic::Add
            | Mnemonic::Adds
            | Mnemonic::Sub
            | Mnemonic::Subs
            | Mnemonic::Mul
            | Mnemonic::Sdiv
            | Mnemonic::Udiv
            | Mnemonic::And
            | Mnemonic::Ands
            | Mnemonic::Orr
            | Mnemonic::Eor
            | Mnemonic::Lsl
            | Mnemonic::Lsr
            | Mnemonic::Asr => return Err(malformed(inst)),
        }
        Ok(Flow::Next)
    }
}
