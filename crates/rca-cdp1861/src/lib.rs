//! RCA CDP1861 "Pixie" video display controller.
//!
//! The 1861 generates a 262-line frame of 14 machine cycles each (3668
//! machine cycles, 29344 clocks, ~61 Hz at the VIP's 1.76 MHz). It has no
//! framebuffer of its own: during each of the 128 visible lines it steals
//! eight DMA cycles from the CPU and fetches the line's eight bytes through
//! R0. The chip is driven purely off the CPU's monotonic cycle counter, so
//! it must be stepped after every CPU instruction.

use chip8_core::VideoScreen;
use rca_cdp1802::{Cdp1802, Cdp1802Bus};

/// Machine cycles per frame (262 lines of 14 cycles).
pub const CYCLES_PER_FRAME: i64 = 3668;
/// First visible line of the frame.
pub const FIRST_VISIBLE_LINE: i64 = 80;
/// First line after the visible region.
pub const FIRST_INVISIBLE_LINE: i64 = 208;

const VISIBLE_START: i64 = FIRST_VISIBLE_LINE * 14;
const VISIBLE_END: i64 = FIRST_INVISIBLE_LINE * 14;

/// What a step observed, so the machine can react to frame boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    pub frame_cycle: i64,
    pub vsync: bool,
}

/// The CDP1861 video generator with its reconstructed 64×128 frame.
#[derive(Debug)]
pub struct Cdp1861 {
    screen: VideoScreen<64, 128>,
    frame_cycle: i64,
    frame_counter: i64,
    display_enabled: bool,
    display_latch: bool,
}

impl Default for Cdp1861 {
    fn default() -> Self {
        Self::new()
    }
}

impl Cdp1861 {
    #[must_use]
    pub fn new() -> Self {
        Self {
            screen: VideoScreen::new(),
            frame_cycle: 0,
            frame_counter: 0,
            display_enabled: false,
            display_latch: false,
        }
    }

    pub fn reset(&mut self) {
        self.frame_cycle = 0;
        self.frame_counter = 0;
        self.display_latch = false;
        self.disable_display();
    }

    /// Machine cycle for a clock cycle count (8 clocks per machine cycle).
    #[must_use]
    pub fn machine_cycle(cycles: i64) -> i64 {
        cycles >> 3
    }

    /// Position within the current frame, in machine cycles.
    #[must_use]
    pub fn frame_cycle(cycles: i64) -> i64 {
        Self::machine_cycle(cycles) % CYCLES_PER_FRAME
    }

    /// Video line for a clock cycle count.
    #[must_use]
    pub fn video_line(cycles: i64) -> i64 {
        Self::frame_cycle(cycles) / 14
    }

    /// First clock cycle of the next frame.
    #[must_use]
    pub fn next_frame(cycles: i64) -> i64 {
        cycles + (8 * CYCLES_PER_FRAME - cycles % (8 * CYCLES_PER_FRAME))
    }

    /// The EF1 flip-flop: asserted for the four lines before the visible
    /// region starts and the four lines before it ends. The VIP interpreter
    /// uses it to synchronize drawing with the beam.
    #[must_use]
    pub fn nefx(&self) -> bool {
        (self.frame_cycle >= VISIBLE_START - 4 * 14 && self.frame_cycle < VISIBLE_START)
            || (self.frame_cycle >= VISIBLE_END - 4 * 14 && self.frame_cycle < VISIBLE_END)
    }

    pub fn enable_display(&mut self) {
        self.display_enabled = true;
    }

    /// Disabling the display blanks the frame.
    pub fn disable_display(&mut self) {
        self.screen.set_all(0);
        self.display_enabled = false;
    }

    #[must_use]
    pub fn is_display_enabled(&self) -> bool {
        self.display_enabled
    }

    #[must_use]
    pub fn frames(&self) -> i64 {
        self.frame_counter
    }

    #[must_use]
    pub fn screen(&self) -> &VideoScreen<64, 128> {
        &self.screen
    }

    /// Advance to the CPU's current cycle position. Triggers the display
    /// interrupt two lines before the visible region and performs the
    /// per-line 8-byte DMA fetch inside it. Call after every instruction.
    pub fn execute_step<B: Cdp1802Bus>(&mut self, cpu: &mut Cdp1802, bus: &mut B) -> StepResult {
        let fc = Self::frame_cycle(cpu.cycles());
        let vsync = fc < self.frame_cycle;
        if vsync {
            self.frame_counter += 1;
        }
        self.frame_cycle = fc;
        let line_cycle = fc % 14;

        if fc > VISIBLE_END || fc < VISIBLE_START - 2 * 14 {
            return StepResult { frame_cycle: fc, vsync };
        }
        if fc < VISIBLE_START && fc >= VISIBLE_START - 2 * 14 + 1 && cpu.ie() {
            // latch the enable state for the whole frame
            self.display_latch = self.display_enabled;
            if self.display_enabled {
                cpu.trigger_interrupt();
            }
        } else if (VISIBLE_START..VISIBLE_END).contains(&fc) && (line_cycle == 4 || line_cycle == 5)
        {
            // one instruction advances 2 or 3 machine cycles, so exactly one
            // step per line lands on cycle 4 or 5
            let line = (fc / 14 - FIRST_VISIBLE_LINE) as usize;
            for i in 0..8 {
                let data = if self.display_latch { cpu.dma_out(bus).0 } else { 0 };
                for j in 0..8 {
                    self.screen.set_pixel(i * 8 + j, line, (data >> (7 - j)) & 1);
                }
            }
        }
        StepResult { frame_cycle: Self::frame_cycle(cpu.cycles()), vsync }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Ram(Vec<u8>);

    impl Cdp1802Bus for Ram {
        fn read_byte(&mut self, addr: u16) -> u8 {
            self.0[addr as usize]
        }
        fn read_byte_dma(&self, addr: u16) -> u8 {
            self.0[addr as usize]
        }
        fn write_byte(&mut self, addr: u16, value: u8) {
            self.0[addr as usize] = value;
        }
    }

    fn cpu_at_machine_cycle(mc: i64) -> Cdp1802 {
        let mut cpu = Cdp1802::new();
        let mut state = cpu.state();
        state.cycles = mc * 8;
        cpu.set_state(&state);
        cpu
    }

    #[test]
    fn frame_position_arithmetic() {
        assert_eq!(Cdp1861::machine_cycle(29344), CYCLES_PER_FRAME);
        assert_eq!(Cdp1861::frame_cycle(29344), 0);
        assert_eq!(Cdp1861::video_line(80 * 14 * 8), 80);
        assert_eq!(Cdp1861::next_frame(0), 29344);
        assert_eq!(Cdp1861::next_frame(29343), 29344);
        assert_eq!(Cdp1861::next_frame(29344), 58688);
    }

    #[test]
    fn nefx_windows() {
        let mut pixie = Cdp1861::new();
        let mut bus = Ram(vec![0; 0x10000]);

        let mut cpu = cpu_at_machine_cycle((FIRST_VISIBLE_LINE - 4) * 14);
        pixie.execute_step(&mut cpu, &mut bus);
        assert!(pixie.nefx());

        let mut cpu = cpu_at_machine_cycle((FIRST_VISIBLE_LINE - 5) * 14);
        pixie.execute_step(&mut cpu, &mut bus);
        assert!(!pixie.nefx());

        let mut cpu = cpu_at_machine_cycle((FIRST_INVISIBLE_LINE - 1) * 14);
        pixie.execute_step(&mut cpu, &mut bus);
        assert!(pixie.nefx());

        let mut cpu = cpu_at_machine_cycle(FIRST_INVISIBLE_LINE * 14);
        pixie.execute_step(&mut cpu, &mut bus);
        assert!(!pixie.nefx());
    }

    #[test]
    fn interrupt_two_lines_before_display() {
        let mut pixie = Cdp1861::new();
        pixie.enable_display();
        let mut bus = Ram(vec![0; 0x10000]);
        let mut cpu = cpu_at_machine_cycle((FIRST_VISIBLE_LINE - 2) * 14 + 1);
        pixie.execute_step(&mut cpu, &mut bus);
        assert!(!cpu.ie());
    }

    #[test]
    fn dma_line_fetch_fills_pixels() {
        let mut pixie = Cdp1861::new();
        pixie.enable_display();
        let mut bus = Ram(vec![0; 0x10000]);
        bus.0[0x900] = 0xA5;

        // latch the enable during the pre-display window
        let mut cpu = cpu_at_machine_cycle((FIRST_VISIBLE_LINE - 2) * 14 + 1);
        pixie.execute_step(&mut cpu, &mut bus);

        let mut cpu = cpu_at_machine_cycle(FIRST_VISIBLE_LINE * 14 + 4);
        cpu.set_r(0, 0x900);
        pixie.execute_step(&mut cpu, &mut bus);
        let expected = [1, 0, 1, 0, 0, 1, 0, 1];
        for (x, &bit) in expected.iter().enumerate() {
            assert_eq!(pixie.screen().pixel(x, 0), bit);
        }
        assert_eq!(cpu.r(0), 0x908);
    }

    #[test]
    fn vsync_counts_frames() {
        let mut pixie = Cdp1861::new();
        let mut bus = Ram(vec![0; 0x10000]);
        let mut cpu = cpu_at_machine_cycle(CYCLES_PER_FRAME - 1);
        pixie.execute_step(&mut cpu, &mut bus);
        let mut cpu = cpu_at_machine_cycle(CYCLES_PER_FRAME + 1);
        let result = pixie.execute_step(&mut cpu, &mut bus);
        assert!(result.vsync);
        assert_eq!(pixie.frames(), 1);
    }
}
