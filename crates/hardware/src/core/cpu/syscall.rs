//! Supervisor Calls.
//!
//! Services `svc` using the Linux AArch64 convention: the syscall number is
//! in `x8`, arguments in `x0`-`x2`, and the result is returned in `x0`.
//!
//! Supported calls:
//! * `write(fd, buf, len)` (64): appends `len` bytes at `buf` to the console
//!   stream for `fd` (1 = stdout, 2 = stderr) and returns `len`.
//! * `exit(status)` (93) and `exit_group(status)` (94): halt the run.
//!
//! Anything else faults with `UnsupportedOperation`.

use std::borrow::Cow;

use tracing::debug;

use super::{Cpu, Flow, HaltReason};
use crate::common::error::ExecutionError;
use crate::isa::abi;
use crate::isa::instruction::Reg;

/// Captured program output.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Console {
    stdout: Vec<u8>,
    stderr: Vec<u8>,
}

impl Console {
    /// Bytes written to file descriptor 1.
    pub fn stdout(&self) -> &[u8] {
        &self.stdout
    }

    /// Bytes written to file descriptor 2.
    pub fn stderr(&self) -> &[u8] {
        &self.stderr
    }

    /// Standard output decoded as UTF-8, with invalid sequences replaced.
    pub fn stdout_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.stdout)
    }

    /// Discards all captured output.
    pub fn clear(&mut self) {
        self.stdout.clear();
        self.stderr.clear();
    }
}

impl Cpu {
    /// Executes the syscall selected by `x8`.
    pub(crate) fn syscall(&mut self, line: usize) -> Result<Flow, ExecutionError> {
        let number = self.regs.get(Reg::X(abi::REG_SYSCALL as u8));
        let arg0 = self.regs.get(Reg::X(abi::REG_X0 as u8));
        self.stats.syscalls += 1;
        debug!(number, arg0, line, "syscall");

        match number {
            abi::SYS_WRITE => {
                let buf = self.regs.get(Reg::X(abi::REG_X1 as u8));
                let len = self.regs.get(Reg::X(abi::REG_X2 as u8));
                let bytes = self
                    .memory
                    .read_slice(buf, len)
                    .ok_or(ExecutionError::MemoryFault {
                        line,
                        address: buf,
                        size: len,
                    })?;
                let stream = match arg0 {
                    abi::FD_STDOUT => &mut self.console.stdout,
                    abi::FD_STDERR => &mut self.console.stderr,
                    fd => {
                        return Err(ExecutionError::UnsupportedOperation {
                            line,
                            detail: format!("write to file descriptor {fd}"),
                        });
                    }
                };
                stream.extend_from_slice(bytes);
                self.regs.set(Reg::X(abi::REG_X0 as u8), len);
                Ok(Flow::Next)
            }
            abi::SYS_EXIT | abi::SYS_EXIT_GROUP => {
                Ok(Flow::Halt(HaltReason::ExitSyscall(arg0 as i64)))
            }
            other => Err(ExecutionError::UnsupportedOperation {
                line,
                detail: format!("syscall {other}"),
            }),
        }
    }
}
