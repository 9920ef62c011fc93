//! DREAM6800 hardware emulation.
//!
//! Michael J. Bauer's 1979 single-board computer: an M6800, an MC6821 PIA
//! driving a 4x4 hex keypad and a speaker, and the CHIPOS monitor in 1KB of
//! ROM. Rather than reimplementing its CHIP-8 dialect, the machine runs the
//! original ROM on the emulated CPU and projects the interpreter's register
//! file out of the zero page, so programs get the authentic timing (a CHIP-8
//! instruction costs whatever CHIPOS spends on it) and the authentic quirks.

mod keymatrix;
mod machine;
mod options;
mod rom;

pub use keymatrix::{KeyMatrix, Strobe};
pub use machine::Dream6800;
pub use options::{Dream6800Options, MonitorRom};
pub use rom::{CHIPOS, CHIPOSLO};
