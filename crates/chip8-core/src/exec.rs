//! The common execution-unit contract.
//!
//! Every CPU in the workspace — the high-level CHIP-8 interpreter as well as
//! the real CDP1802/M6800 backends — exposes the same debugger-facing surface:
//! registers, breakpoints, execution modes and a cycle counter.

use std::collections::BTreeMap;

/// How the host wants an execution unit to advance.
///
/// Mode transitions take effect at instruction boundaries only; there is no
/// mid-instruction cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecMode {
    /// Not executing. `execute_frame` is a no-op.
    Paused,
    /// Free-running.
    #[default]
    Running,
    /// Execute one instruction, then pause.
    Step,
    /// Run until the stack pointer is back at or above the level captured
    /// when the mode was set (i.e. skip over a call).
    StepOver,
    /// Run until the current subroutine returns.
    StepOut,
}

/// The condition a CPU is in, orthogonal to [`ExecMode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CpuState {
    #[default]
    Normal,
    /// Busy-retry: the PC has been rewound and the instruction will be
    /// retried until the wait condition (key release, vblank) clears.
    Waiting,
    /// Deliberately stopped (exit opcode, IDL, WAI).
    Halted,
    /// A fatal emulation fault. `error_message()` explains it; no further
    /// instructions execute until reset.
    Error,
}

/// A register value paired with its width in bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegisterValue {
    pub value: u32,
    pub size: u32,
}

/// One disassembled instruction: byte length and rendered text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Disassembled {
    pub size: usize,
    pub text: String,
}

#[derive(Debug, Clone, Default)]
pub struct BreakpointInfo {
    pub label: String,
    pub is_enabled: bool,
}

/// Sparse breakpoint map with a dense low-bits bitmap for O(1) miss testing.
///
/// `has()` consults only the bitmap (indexed by `addr & 0xFFF`), so the hot
/// path never touches the map unless some breakpoint shares the low bits.
#[derive(Debug)]
pub struct Breakpoints {
    map: BTreeMap<u32, BreakpointInfo>,
    mask: [bool; 4096],
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            map: BTreeMap::new(),
            mask: [false; 4096],
        }
    }
}

impl Breakpoints {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, address: u32, info: BreakpointInfo) {
        self.map.insert(address, info);
        self.mask[(address & 0xFFF) as usize] = true;
    }

    pub fn remove(&mut self, address: u32) {
        self.map.remove(&address);
        let masked = address & 0xFFF;
        self.mask[masked as usize] = self.map.keys().any(|a| a & 0xFFF == masked);
    }

    pub fn remove_all(&mut self) {
        self.map.clear();
        self.mask = [false; 4096];
    }

    /// Cheap test: false means definitely no breakpoint at `address`.
    #[must_use]
    pub fn has(&self, address: u32) -> bool {
        self.mask[(address & 0xFFF) as usize]
    }

    /// Exact test, returning the breakpoint if one is set and enabled.
    #[must_use]
    pub fn hit(&self, address: u32) -> Option<&BreakpointInfo> {
        if !self.has(address) {
            return None;
        }
        self.map.get(&address).filter(|info| info.is_enabled)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&u32, &BreakpointInfo)> {
        self.map.iter()
    }
}

/// Debugger-facing contract implemented by every CPU in the workspace.
pub trait ExecutionUnit {
    fn name(&self) -> &'static str;

    /// Monotonic cycle counter. Never resets except on hard reset.
    fn cycles(&self) -> i64;

    fn pc(&self) -> u32;
    fn sp(&self) -> u32;

    fn register_names(&self) -> &'static [&'static str];
    fn register(&self, index: usize) -> RegisterValue;
    fn set_register(&mut self, index: usize, value: u32);

    fn in_error_state(&self) -> bool;

    /// Read memory without side effects (for disassembly and inspection).
    fn memory_byte(&self, address: u32) -> u8;

    fn disassemble(&self, address: u32) -> Disassembled;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoint_bitmap_tracks_low_bits() {
        let mut bp = Breakpoints::new();
        bp.set(0x200, BreakpointInfo { label: "start".into(), is_enabled: true });
        assert!(bp.has(0x200));
        assert!(bp.has(0x1200)); // shares low 12 bits
        assert!(bp.hit(0x1200).is_none());
        assert!(bp.hit(0x200).is_some());

        bp.set(0x1200, BreakpointInfo { label: String::new(), is_enabled: true });
        bp.remove(0x200);
        // 0x1200 still shares the masked slot, so the bitmap stays set
        assert!(bp.has(0x200));
        assert!(bp.hit(0x200).is_none());
        bp.remove(0x1200);
        assert!(!bp.has(0x200));
    }

    #[test]
    fn disabled_breakpoints_do_not_hit() {
        let mut bp = Breakpoints::new();
        bp.set(0x300, BreakpointInfo { label: String::new(), is_enabled: false });
        assert!(bp.has(0x300));
        assert!(bp.hit(0x300).is_none());
    }
}
