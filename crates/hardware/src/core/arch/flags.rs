//! Condition Flags (NZCV).
//!
//! The processor state flags written by flag-setting arithmetic (`adds`, `subs`,
//! `ands`) and the compare family (`cmp`, `cmn`, `tst`), and read by conditional
//! branches.

use std::fmt;

/// Negative, Zero, Carry and oVerflow condition flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Flags {
    /// Result was negative (bit 63 set).
    pub n: bool,
    /// Result was zero.
    pub z: bool,
    /// Unsigned carry out of an addition, or no borrow from a subtraction.
    pub c: bool,
    /// Signed overflow.
    pub v: bool,
}

impl Flags {
    /// Flags produced by a logical result: N and Z from the value, C and V cleared.
    pub const fn from_logical(result: u64) -> Self {
        Self {
            n: (result as i64) < 0,
            z: result == 0,
            c: false,
            v: false,
        }
    }
}

impl fmt::Display for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bit = |set: bool, c: char| if set { c } else { '-' };
        write!(
            f,
            "{}{}{}{}",
            bit(self.n, 'N'),
            bit(self.z, 'Z'),
            bit(self.c, 'C'),
            bit(self.v, 'V')
        )
    }
}
