//! Condition code register bits. Bits 6 and 7 always read as 1.

pub const C: u8 = 0x01;
pub const V: u8 = 0x02;
pub const Z: u8 = 0x04;
pub const N: u8 = 0x08;
pub const I: u8 = 0x10;
pub const H: u8 = 0x20;

/// The writable flag bits.
pub const MASK: u8 = H | I | N | Z | V | C;
/// The fixed upper bits.
pub const FIXED: u8 = 0xC0;
