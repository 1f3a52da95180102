//! Application Binary Interface (ABI) register and syscall constants.
//!
//! Defines the register roles and Linux AArch64 syscall numbers used by the
//! supervisor-call layer and by subroutine linkage.

/// Register x0 (first argument / return value / exit status).
pub const REG_X0: usize = 0;
/// Register x1 (second syscall argument: buffer address).
pub const REG_X1: usize = 1;
/// Register x2 (third syscall argument: length).
pub const REG_X2: usize = 2;
/// Register x8 (syscall number).
pub const REG_SYSCALL: usize = 8;
/// Register x29 (frame pointer, `fp`).
pub const REG_FP: usize = 29;
/// Register x30 (link register, `lr`).
pub const REG_LR: usize = 30;

/// `write(fd, buf, len)` syscall number.
pub const SYS_WRITE: u64 = 64;
/// `exit(status)` syscall number.
pub const SYS_EXIT: u64 = 93;
/// `exit_group(status)` syscall number.
pub const SYS_EXIT_GROUP: u64 = 94;

/// Standard output file descriptor.
pub const FD_STDOUT: u64 = 1;
/// Standard error file descriptor.
pub const FD_STDERR: u64 = 2;
