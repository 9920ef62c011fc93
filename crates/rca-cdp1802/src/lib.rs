//! RCA CDP1802 (COSMAC) CPU emulator.
//!
//! The 1802 has sixteen 16-bit scratchpad registers; any of them can be the
//! program counter (selected by P) or the index register (selected by X).
//! A standard instruction takes two machine cycles of eight clocks each;
//! long branches and long skips take three. DMA and interrupt each steal one
//! machine cycle.

mod cpu;
mod disasm;

pub use cpu::{Cdp1802, Cdp1802Bus, Cdp1802State};
pub use disasm::disassemble;
