//! The CHIP-8-level core contract.
//!
//! Both kinds of core implement this: the quirk-parameterized interpreter,
//! where these registers are the actual machine state, and the real-hardware
//! cores, where they are a projection read out of emulated RAM after each
//! burst (the "CHIP-8 CPU" there is a fiction maintained by an interpreter
//! ROM running on a CDP1802 or M6800).

use crate::exec::{CpuState, ExecMode};
use crate::video::Palette;

/// Snapshot of the CHIP-8 register file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Chip8State {
    pub v: [u8; 16],
    pub i: u32,
    pub pc: u32,
    pub sp: u32,
    pub dt: u8,
    pub st: u8,
    pub stack: [u16; 16],
}

/// Borrowed view of a core's framebuffer for presentation.
#[derive(Debug, Clone, Copy)]
pub struct ScreenView<'a> {
    pub width: usize,
    pub height: usize,
    pub stride: usize,
    pub data: &'a [u8],
    pub palette: &'a Palette,
}

impl ScreenView<'_> {
    #[must_use]
    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.stride + x]
    }

    /// True if no pixel in the active area is set.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        (0..self.height).all(|y| self.data[y * self.stride..y * self.stride + self.width]
            .iter()
            .all(|&p| p == 0))
    }
}

/// A runnable CHIP-8 family core.
///
/// The host drives the core once per display frame: push the key state, call
/// `execute_frame`, read the screen, pull audio. All methods are synchronous;
/// the `Waiting` state is a PC-rewind busy-retry, never a blocked thread.
pub trait Chip8Core {
    fn core_name(&self) -> &'static str;

    fn reset(&mut self);

    fn exec_mode(&self) -> ExecMode;
    fn set_exec_mode(&mut self, mode: ExecMode);
    fn cpu_state(&self) -> CpuState;

    fn in_error_state(&self) -> bool {
        self.cpu_state() == CpuState::Error
    }

    /// Populated when `cpu_state` is `Error`.
    fn error_message(&self) -> Option<&str>;

    /// Run one frame's worth of instructions and fire the 60Hz (or 50Hz)
    /// timer tick exactly once.
    fn execute_frame(&mut self);

    /// Execute a single CHIP-8 instruction; returns consumed backend cycles.
    fn execute_instruction(&mut self) -> i64;

    fn execute_instructions(&mut self, count: usize) {
        for _ in 0..count {
            self.execute_instruction();
        }
    }

    /// Frames completed since reset.
    fn frames(&self) -> i64;

    /// CHIP-8 instructions executed since reset (monotonic).
    fn cycles(&self) -> i64;

    fn frame_rate(&self) -> u32;

    /// Copy a program into memory. Fails without touching the current
    /// program if it does not fit.
    fn load_data(&mut self, data: &[u8], load_address: Option<u32>) -> Result<(), String>;

    /// Push the 16-key hex pad state; sampled at opcode execution time.
    fn set_key_states(&mut self, keys: [bool; 16]);

    /// The CHIP-8 register view (fetched from RAM on real-hardware cores).
    fn state(&self) -> Chip8State;

    fn stack_size(&self) -> usize {
        16
    }

    fn screen(&self) -> ScreenView<'_>;

    /// Fill a caller-owned buffer with signed 16-bit mono samples at the
    /// requested rate. The core resamples; silence when no sound is active.
    fn render_audio(&mut self, samples: &mut [i16], sample_rate: u32);

    /// Raw memory snapshot.
    fn memory(&self) -> &[u8];
}
