//! # Register File Tests
//!
//! Name-based access, aliases, the zero register and the dump helpers.

use armsim_core::common::{RegisterError, RegisterFile};
use armsim_core::isa::Reg;
use rstest::rstest;

#[test]
fn test_new_register_file_is_zeroed() {
    let regs = RegisterFile::new();
    for name in RegisterFile::names() {
        assert_eq!(regs.read(&name).unwrap(), 0);
    }
    assert_eq!(regs.non_zero().count(), 0);
}

#[test]
fn test_names_cover_gprs_and_sp() {
    let names: Vec<String> = RegisterFile::names().collect();
    assert_eq!(names.len(), 32);
    assert_eq!(names[0], "x0");
    assert_eq!(names[30], "x30");
    assert_eq!(names[31], "sp");
}

#[rstest]
#[case("lr", "x30")]
#[case("fp", "x29")]
#[case("X7", "x7")]
fn test_aliases_share_storage(#[case] alias: &str, #[case] canonical: &str) {
    let mut regs = RegisterFile::new();
    regs.write(alias, -3).unwrap();
    assert_eq!(regs.read(canonical).unwrap(), -3);
}

#[test]
fn test_zero_register_discards_writes() {
    let mut regs = RegisterFile::new();
    regs.write("xzr", 42).unwrap();
    regs.set(Reg::Zero, 42);
    assert_eq!(regs.read("xzr").unwrap(), 0);
    assert_eq!(regs.get(Reg::Zero), 0);
}

#[rstest]
#[case("x31")]
#[case("w0")]
#[case("pc")]
#[case("")]
fn test_unknown_names_are_rejected(#[case] name: &str) {
    let mut regs = RegisterFile::new();
    assert_eq!(
        regs.read(name),
        Err(RegisterError::UnknownRegister(name.to_string()))
    );
    assert!(regs.write(name, 1).is_err());
}

#[test]
fn test_reset_sets_stack_pointer() {
    let mut regs = RegisterFile::new();
    regs.write("x3", 9).unwrap();
    regs.reset(0x2000);
    assert_eq!(regs.read("x3").unwrap(), 0);
    assert_eq!(regs.read("sp").unwrap(), 0x2000);
}

#[test]
fn test_non_zero_lists_written_registers() {
    let mut regs = RegisterFile::new();
    regs.write("x4", 1).unwrap();
    regs.write("x12", -1).unwrap();
    let set: Vec<(usize, i64)> = regs.non_zero().collect();
    assert_eq!(set, vec![(4, 1), (12, -1)]);
}

#[test]
fn test_dump_format() {
    let mut regs = RegisterFile::new();
    regs.write("x1", 0xff).unwrap();
    let dump = regs.to_string();
    assert!(dump.starts_with("x0 =0x0000000000000000 x1 =0x00000000000000ff\n"));
    assert!(dump.contains("sp =0x0000000000000000"));
}
