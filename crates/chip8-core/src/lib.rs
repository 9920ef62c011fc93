//! Core traits and types shared by every emulation core in the workspace.
//!
//! A core is driven once per display frame by the host; everything else —
//! instruction timing, timer decrement, vblank waits — derives from the
//! core's own cycle counter. Observation never mutates emulation state.

mod chip8;
mod exec;
mod properties;
mod time;
mod video;

pub use chip8::{Chip8Core, Chip8State, ScreenView};
pub use exec::{
    BreakpointInfo, Breakpoints, CpuState, Disassembled, ExecMode, ExecutionUnit, RegisterValue,
};
pub use properties::{PropValue, Properties};
pub use time::{ClockedTime, Time, next_frame_boundary};
pub use video::{Palette, VideoScreen};
