//! # Directive Tests
//!
//! Section switching, data emission, alignment, constants and entry-point
//! selection.

use armsim_core::Simulator;
use armsim_core::common::{AsmError, ParseErrorKind};
use armsim_core::config::Config;
use armsim_core::isa::Symbol;
use pretty_assertions::assert_eq;

use crate::common::harness::{TestContext, assemble, assemble_err, run_to_halt};

#[test]
fn test_string_and_length_idiom() {
    let ctx = run_to_halt(
        ".text
ldr x1, =msg
ldr x2, =msg_len
.data
msg: .ascii \"hi\"
msg_len = .-msg",
    );
    assert_eq!(ctx.reg("x1"), 0x1_0000);
    assert_eq!(ctx.reg("x2"), 2);
}

#[test]
fn test_asciz_terminates_each_string() {
    let program = assemble(".data\n.asciz \"ab\", \"cd\"\n.string \"\"");
    assert_eq!(program.data(), b"ab\0cd\0\0");
}

#[test]
fn test_integer_widths_are_little_endian() {
    let program = assemble(
        ".data
.byte 1, 0xff
.hword 0x0304
.short -2
.word 0x05060708
.quad 9",
    );
    assert_eq!(
        program.data(),
        &[1, 0xff, 0x04, 0x03, 0xfe, 0xff, 0x08, 0x07, 0x06, 0x05, 9, 0, 0, 0, 0, 0, 0, 0]
    );
}

#[test]
fn test_values_may_reference_symbols() {
    let program = assemble(
        ".data
first: .byte 7
ptr: .quad first
.equ OFFSET, 3
.byte OFFSET + 1",
    );
    assert_eq!(program.symbol("ptr"), Some(Symbol::Data(0x1_0001)));
    assert_eq!(&program.data()[1..9], &0x1_0000u64.to_le_bytes());
    assert_eq!(program.data()[9], 4);
}

#[test]
fn test_alignment() {
    let program = assemble(
        ".data
.byte 1
.align 3
value: .quad 7
.byte 2
.balign 4
word: .word 1
.p2align 0",
    );
    assert_eq!(program.symbol("value"), Some(Symbol::Data(0x1_0008)));
    assert_eq!(program.symbol("word"), Some(Symbol::Data(0x1_0014)));
    assert_eq!(program.data().len(), 0x18);
}

#[test]
fn test_alignment_in_text_has_no_effect() {
    let program = assemble("nop\n.align 4\nafter: nop");
    assert_eq!(program.label_index("after"), Some(1));
    assert!(program.data().is_empty());
}

#[test]
fn test_skip_and_fill() {
    let program = assemble(".data\n.skip 3, 0xaa\n.zero 2\n.space 1, 7");
    assert_eq!(program.data(), &[0xaa, 0xaa, 0xaa, 0, 0, 7]);
}

#[test]
fn test_constants() {
    let ctx = run_to_halt(
        ".equ SIZE, 24
.set STEP, 0x10
COUNT = SIZE - 4
ldr x0, =SIZE
ldr x1, =COUNT
ldr x2, =STEP",
    );
    assert_eq!(ctx.reg("x0"), 24);
    assert_eq!(ctx.reg("x1"), 20);
    assert_eq!(ctx.reg("x2"), 16);
}

#[test]
fn test_data_directive_in_text_is_rejected() {
    let AsmError::Parse(err) = assemble_err("nop\n.byte 1") else {
        panic!("expected a parse error");
    };
    assert_eq!(err.line, 2);
    assert!(matches!(
        err.kind,
        ParseErrorKind::MalformedDirective { ref directive, .. } if directive == "data"
    ));
}

#[test]
fn test_section_aliases() {
    for header in [".data", ".bss", ".rodata", ".section .data", ".SECTION .bss"] {
        let program = assemble(&format!("{header}\nbuf: .zero 4\n.section .text\nnop"));
        assert_eq!(program.symbol("buf"), Some(Symbol::Data(0x1_0000)));
        assert_eq!(program.len(), 1);
    }
}

#[test]
fn test_sections_interleave() {
    let program = assemble(
        ".data
a: .byte 1
.text
nop
.data
b: .byte 2
.text
end: nop",
    );
    assert_eq!(program.symbol("b"), Some(Symbol::Data(0x1_0001)));
    assert_eq!(program.label_index("end"), Some(1));
    assert_eq!(program.data(), &[1, 2]);
}

#[test]
fn test_start_symbol_selects_entry() {
    let program = assemble(
        ".global _start
mov x0, 99
_start: mov x1, 1",
    );
    assert_eq!(program.entry(), 1);

    let ctx = run_to_halt(".globl _start\nmov x0, 99\n_start: mov x1, 1");
    assert_eq!(ctx.reg("x0"), 0);
    assert_eq!(ctx.reg("x1"), 1);
}

#[test]
fn test_entry_defaults_to_first_instruction() {
    assert_eq!(assemble("mov x0, 1").entry(), 0);
    assert_eq!(assemble("nop\n.data\n_start: .byte 1").entry(), 0);
}

#[test]
fn test_custom_entry_symbol() {
    let mut config = Config::default();
    config.general.entry_symbol = "main".to_string();
    let mut ctx = TestContext::with_config(config).load("helper: mov x0, 1\nmain: mov x1, 2");
    assert!(ctx.run().is_halted());
    assert_eq!(ctx.reg("x0"), 0);
    assert_eq!(ctx.reg("x1"), 2);
}

#[test]
fn test_custom_data_base() {
    let mut config = Config::default();
    config.memory.data_base = 0x40_0000;
    let mut sim = Simulator::new(config);
    let program = sim.parse([".data", "x: .byte 1"]).unwrap();
    assert_eq!(program.data_base(), 0x40_0000);
    assert_eq!(program.symbol("x"), Some(Symbol::Data(0x40_0000)));
}

#[test]
fn test_oversized_skip_is_rejected() {
    for source in [
        ".data\n.skip 0x7fffffffffffffff",
        ".data\n.skip 0x7ffffffffffffff0\n.skip 0x7ffffffffffffff0",
        ".data\n.space 0x1000001",
        ".data\n.skip -1",
    ] {
        let AsmError::Parse(err) = assemble_err(source) else {
            panic!("expected a parse error for {source:?}");
        };
        assert_eq!(err.line, 2, "{source:?}");
        assert!(
            matches!(
                err.kind,
                ParseErrorKind::MalformedDirective { ref directive, .. } if directive == ".skip"
            ),
            "{source:?}: {err}"
        );
    }
}

#[test]
fn test_skip_up_to_the_image_limit() {
    let program = assemble(".data\n.skip 0x1000000");
    assert_eq!(program.data().len(), 0x100_0000);
}
