//! # Supervisor Call Tests
//!
//! `write` to the console streams, `exit`/`exit_group`, and the faults raised
//! for unsupported descriptors and syscall numbers.

use armsim_core::common::ExecutionError;
use armsim_core::core::cpu::HaltReason;
use armsim_core::ExecutionResult;
use pretty_assertions::assert_eq;

use crate::common::harness::{run_source, run_to_halt};

const HELLO: &str = r#"
.text
.global _start
_start:
    mov x0, #1
    ldr x1, =msg
    ldr x2, =msg_len
    mov x8, 0x40
    svc 0
    mov x8, #93
    mov x0, #0
    svc 0
.data
msg: .ascii "Hello, world!\n"
msg_len = .-msg
"#;

#[test]
fn test_write_to_stdout() {
    let (ctx, result) = run_source(HELLO);
    assert_eq!(ctx.stdout(), "Hello, world!\n");
    assert_eq!(
        result,
        ExecutionResult::Halted {
            reason: HaltReason::ExitSyscall(0),
            steps: 8
        }
    );
    assert!(ctx.sim.console().stderr().is_empty());
}

#[test]
fn test_write_returns_length() {
    let ctx = run_to_halt(
        "mov x0, 2
ldr x1, =text
mov x2, 3
mov x8, 64
svc #0
.data
text: .asciz \"err\"",
    );
    assert_eq!(ctx.reg("x0"), 3);
    assert_eq!(ctx.sim.console().stderr(), b"err");
    assert!(ctx.stdout().is_empty());
}

#[test]
fn test_exit_status_in_halt_reason() {
    let (ctx, result) = run_source("mov x0, 7\nmov x8, 93\nsvc 0\nmov x0, 1");
    assert_eq!(
        result,
        ExecutionResult::Halted {
            reason: HaltReason::ExitSyscall(7),
            steps: 3
        }
    );
    assert_eq!(ctx.reg("x0"), 7);
}

#[test]
fn test_exit_group() {
    let (_, result) = run_source("mov x0, -1\nmov x8, 94\nsvc 0");
    assert!(matches!(
        result,
        ExecutionResult::Halted {
            reason: HaltReason::ExitSyscall(-1),
            ..
        }
    ));
}

#[test]
fn test_write_to_unknown_descriptor() {
    let (_, result) = run_source("mov x0, 3\nmov x8, 64\nsvc 0");
    assert!(matches!(
        result.error(),
        Some(ExecutionError::UnsupportedOperation { line: 3, .. })
    ));
}

#[test]
fn test_unknown_syscall() {
    let (_, result) = run_source("mov x8, 999\nsvc 0");
    let Some(ExecutionError::UnsupportedOperation { line, detail }) = result.error() else {
        panic!("expected unsupported operation, got {result:?}");
    };
    assert_eq!(*line, 2);
    assert_eq!(detail, "syscall 999");
}

#[test]
fn test_write_buffer_out_of_range() {
    let (_, result) = run_source("mov x0, 1\nmov x1, 0\nmov x2, 4\nmov x8, 64\nsvc 0");
    assert!(matches!(
        result.error(),
        Some(ExecutionError::MemoryFault {
            address: 0,
            size: 4,
            ..
        })
    ));
}
