pub mod alu;
pub mod bru;
