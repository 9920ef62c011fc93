//! Quirk-parameterized CHIP-8 family interpreter.
//!
//! One interpreter covers CHIP-8 through XO-CHIP: a [`Quirks`] value selects
//! the opcode variants, memory layout and frame pacing, and eleven [`Preset`]
//! values reproduce the shipped variants exactly. The dispatch table is built
//! once per instance, so running code never branches on quirks.

mod disasm;
mod font;
mod interp;
mod options;
mod rand;

pub use disasm::disassemble;
pub use font::{big_font, small_font};
pub use interp::Chip8Generic;
pub use options::{Preset, Quirks};
