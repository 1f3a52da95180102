//! # Data Memory Tests
//!
//! Image placement, bounds checking and little-endian access.

use armsim_core::common::constants::MAX_MEMORY_SIZE;
use armsim_core::soc::DataMemory;

#[test]
fn test_image_is_padded_before_free_space() {
    let mem = DataMemory::new(0x1000, &[1, 2, 3], 32).unwrap();
    assert_eq!(mem.base(), 0x1000);
    assert_eq!(mem.len(), 16 + 32);
    assert_eq!(mem.top(), 0x1000 + 48);
    assert_eq!(mem.read_slice(0x1000, 4), Some(&[1, 2, 3, 0][..]));
}

#[test]
fn test_top_is_aligned() {
    let mem = DataMemory::new(0x1000, &[], 20).unwrap();
    assert_eq!(mem.top(), 0x1010);
}

#[test]
fn test_read_write_round_trip() {
    let mut mem = DataMemory::new(0, &[], 64).unwrap();
    mem.write_u64(8, 0x1122_3344_5566_7788).unwrap();
    assert_eq!(mem.read_u64(8), Some(0x1122_3344_5566_7788));
    assert_eq!(mem.read_u8(8), Some(0x88));
    mem.write_u8(15, 0xAB).unwrap();
    assert_eq!(mem.read_u64(8), Some(0xAB22_3344_5566_7788));
}

#[test]
fn test_out_of_range_access() {
    let mut mem = DataMemory::new(0x100, &[], 16).unwrap();
    assert_eq!(mem.read_u8(0xFF), None);
    assert_eq!(mem.read_u8(0x110), None);
    assert_eq!(mem.read_u64(0x109), None);
    assert!(mem.read_u64(0x108).is_some());
    assert_eq!(mem.write_u64(u64::MAX - 3, 1), None);
    assert_eq!(mem.read_slice(0x100, u64::MAX), None);
}

#[test]
fn test_empty_memory() {
    let mem = DataMemory::default();
    assert!(mem.is_empty());
    assert_eq!(mem.read_u8(0), None);
}

#[test]
fn test_oversized_memory_is_refused() {
    assert!(DataMemory::new(0, &[], MAX_MEMORY_SIZE + 1).is_none());
    assert!(DataMemory::new(0, &[1], usize::MAX).is_none());
}

#[test]
fn test_memory_past_address_space_is_refused() {
    assert!(DataMemory::new(u64::MAX - 8, &[], 16).is_none());
    assert!(DataMemory::new(u64::MAX - 32, &[], 16).is_some());
}
