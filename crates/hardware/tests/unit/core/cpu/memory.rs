//! # Load/Store Tests
//!
//! Loads and stores against the data image and the stack, address
//! generation for each memory operand form, and memory faults.

use armsim_core::common::ExecutionError;
use armsim_core::ExecutionResult;
use pretty_assertions::assert_eq;

use crate::common::harness::{run_source, run_to_halt};

#[test]
fn test_stack_pointer_starts_at_top_of_memory() {
    let ctx = run_to_halt("nop");
    assert_eq!(ctx.reg("sp"), 0x1_0000 + 64 * 1024);
}

#[test]
fn test_stack_store_and_load() {
    let ctx = run_to_halt(
        "sub sp, sp, #16
mov x0, -2
str x0, [sp]
ldr x1, [sp]
strb x0, [sp, #8]
ldrb x2, [sp, #8]
mov x3, 8
ldrb x4, [sp, x3]",
    );
    assert_eq!(ctx.reg("x1"), -2);
    assert_eq!(ctx.reg("x2"), 0xFE);
    assert_eq!(ctx.reg("x4"), 0xFE);
}

#[test]
fn test_load_from_data_section() {
    let ctx = run_to_halt(
        ".data
table: .quad 10, 20, 30
.text
ldr x1, =table
ldr x0, [x1, #16]
ldrb x2, [x1, #8]",
    );
    assert_eq!(ctx.reg("x0"), 30);
    assert_eq!(ctx.reg("x2"), 20);
}

#[test]
fn test_store_is_little_endian() {
    let ctx = run_to_halt(
        "sub sp, sp, #16
mov x0, 0x0102030405060708
str x0, [sp]
ldrb x1, [sp]
ldrb x2, [sp, #7]",
    );
    assert_eq!(ctx.reg("x1"), 0x08);
    assert_eq!(ctx.reg("x2"), 0x01);
}

#[test]
fn test_load_outside_memory_faults() {
    let (_, result) = run_source("mov x0, 0\nldr x1, [x0]");
    assert_eq!(
        result,
        ExecutionResult::Faulted {
            error: ExecutionError::MemoryFault {
                line: 2,
                address: 0,
                size: 8
            },
            pc: 1,
            steps: 1
        }
    );
}

#[test]
fn test_store_straddling_top_faults() {
    let (_, result) = run_source("str x0, [sp, #-4]");
    assert!(matches!(
        result.error(),
        Some(ExecutionError::MemoryFault { size: 8, .. })
    ));
}
