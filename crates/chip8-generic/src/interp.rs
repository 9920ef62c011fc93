//! The quirk-parameterized CHIP-8 interpreter.
//!
//! One instance covers the whole family: a 65536-entry handler table is
//! built once from the quirk set, so the per-instruction path is a fetch,
//! a table lookup and an indirect call with no quirk branches. Opcode
//! variants that differ only in a quirk (shift source, VF reset, I
//! increment) are separate handlers selected at table-build time, and the
//! draw routine is monomorphized over a bitset of draw quirks the same way.

use std::time::{Duration, Instant};

use chip8_core::{
    Breakpoints, Chip8Core, Chip8State, ClockedTime, CpuState, Disassembled, ExecMode,
    ExecutionUnit, RegisterValue, ScreenView, VideoScreen, next_frame_boundary,
};

use crate::disasm;
use crate::font;
use crate::options::{Preset, Quirks};
use crate::rand;

type Handler = fn(&mut Chip8Generic, u16);

// Draw-quirk bits for the monomorphized sprite paths.
const HIRES: u16 = 1;
const MULTICOLOR: u16 = 2;
const WRAP: u16 = 4;
const SC_LORES: u16 = 8;
const SC11: u16 = 16;

const REGISTER_NAMES: &[&str] = &[
    "V0", "V1", "V2", "V3", "V4", "V5", "V6", "V7", "V8", "V9", "VA", "VB", "VC", "VD", "VE",
    "VF", "I", "DT", "ST", "PC", "SP",
];

const fn vx(opcode: u16) -> usize {
    ((opcode >> 8) & 0xF) as usize
}

const fn vy(opcode: u16) -> usize {
    ((opcode >> 4) & 0xF) as usize
}

/// A CHIP-8 family interpreter configured by a [`Quirks`] set.
pub struct Chip8Generic {
    quirks: Quirks,
    base: Preset,
    address_mask: u32,
    handlers: Vec<Handler>,
    memory: Vec<u8>,
    v: [u8; 16],
    i: u32,
    pc: u32,
    sp: usize,
    stack: [u16; 16],
    dt: u8,
    st: u8,
    cycle_counter: i64,
    frame_counter: i64,
    exec_mode: ExecMode,
    cpu_state: CpuState,
    error_message: Option<String>,
    step_over_sp: usize,
    breakpoints: Breakpoints,
    system_time: ClockedTime,
    screen: VideoScreen<256, 192>,
    planes: u8,
    is_hires: bool,
    is_instant_dxyn: bool,
    is_megachip_mode: bool,
    keys: [bool; 16],
    wait_keys: [bool; 16],
    random_seed: u16,
    rand_table: [u8; 256],
    simple_rand_state: u32,
    /// Fx75/Fx85 flag registers; survive reset like the HP-48 RPL variables
    /// they emulated.
    register_space: [u8; 16],
    xo_audio_pattern: [u8; 16],
    xo_pitch: u8,
    wave_phase: f32,
    vp595_frequency: u8,
    chip8x_background: u8,
    /// VP-590 color overlay cells (16x32 grid, height per cell varies).
    overlay: [u8; 16 * 32],
    overlay_cell_height: u8,
    sprite_width: usize,
    sprite_height: usize,
    collision_color: u8,
    screen_alpha: u8,
    blend_mode: u8,
    sample_start: u32,
    sample_length: u32,
    sample_step: f64,
    sample_loop: bool,
    mc_sample_pos: f64,
}

impl Chip8Generic {
    pub fn new(quirks: Quirks) -> Result<Self, String> {
        if !quirks.ram_size.is_power_of_two() || quirks.ram_size < 4096 {
            return Err(format!(
                "ram size must be a power of two of at least 4096, got {}",
                quirks.ram_size
            ));
        }
        if quirks.start_address >= quirks.ram_size {
            return Err(format!(
                "start address 0x{:04X} outside {} bytes of ram",
                quirks.start_address, quirks.ram_size
            ));
        }
        let clock = (quirks.instructions_per_frame * quirks.frame_rate).max(1);
        let mut core = Self {
            quirks,
            base: quirks.base,
            address_mask: quirks.ram_size - 1,
            handlers: vec![Self::op_invalid as Handler; 0x10000],
            memory: vec![0; quirks.ram_size as usize],
            v: [0; 16],
            i: 0,
            pc: quirks.start_address,
            sp: 0,
            stack: [0; 16],
            dt: 0,
            st: 0,
            cycle_counter: 0,
            frame_counter: 0,
            exec_mode: ExecMode::Running,
            cpu_state: CpuState::Normal,
            error_message: None,
            step_over_sp: 0,
            breakpoints: Breakpoints::new(),
            system_time: ClockedTime::new(clock),
            screen: VideoScreen::new(),
            planes: 1,
            is_hires: quirks.only_hires,
            is_instant_dxyn: quirks.instant_dxyn,
            is_megachip_mode: false,
            keys: [false; 16],
            wait_keys: [false; 16],
            random_seed: 0,
            rand_table: rand::fold_table(font::small_font(quirks.base)),
            simple_rand_state: 12345,
            register_space: [0; 16],
            xo_audio_pattern: [0; 16],
            xo_pitch: 64,
            wave_phase: 0.0,
            vp595_frequency: 0x80,
            chip8x_background: 0,
            overlay: [0; 16 * 32],
            overlay_cell_height: 4,
            sprite_width: 0,
            sprite_height: 0,
            collision_color: 1,
            screen_alpha: 255,
            blend_mode: 0,
            sample_start: 0,
            sample_length: 0,
            sample_step: 0.0,
            sample_loop: false,
            mc_sample_pos: 0.0,
        };
        core.set_handlers();
        core.reset_state();
        Ok(core)
    }

    pub fn from_preset(preset: Preset) -> Result<Self, String> {
        Self::new(preset.quirks())
    }

    #[must_use]
    pub fn quirks(&self) -> &Quirks {
        &self.quirks
    }

    #[must_use]
    pub fn preset(&self) -> Preset {
        self.base
    }

    #[must_use]
    pub fn is_hires(&self) -> bool {
        self.is_hires
    }

    #[must_use]
    pub fn is_megachip_mode(&self) -> bool {
        self.is_megachip_mode
    }

    #[must_use]
    pub fn breakpoints(&self) -> &Breakpoints {
        &self.breakpoints
    }

    pub fn breakpoints_mut(&mut self) -> &mut Breakpoints {
        &mut self.breakpoints
    }

    /// CHIP-8X background color index cycled by 02A0.
    #[must_use]
    pub fn background_color(&self) -> u8 {
        self.chip8x_background
    }

    /// VP-590 overlay cells and the current cell height in pixels.
    #[must_use]
    pub fn color_overlay(&self) -> (&[u8; 16 * 32], u8) {
        (&self.overlay, self.overlay_cell_height)
    }

    /// MegaChip screen alpha set by 05nn (stored for presentation).
    #[must_use]
    pub fn screen_alpha(&self) -> u8 {
        self.screen_alpha
    }

    /// MegaChip blend mode set by 080n (stored for presentation).
    #[must_use]
    pub fn blend_mode(&self) -> u8 {
        self.blend_mode
    }

    /// Emulated time advanced so far.
    #[must_use]
    pub fn system_time(&self) -> &ClockedTime {
        &self.system_time
    }

    /// Run for (at most) `micros` of emulated time, firing frame timers at
    /// the right boundaries. Returns the unexecuted remainder in micros.
    pub fn execute_for(&mut self, micros: i64) -> i64 {
        if self.exec_mode == ExecMode::Paused || self.cpu_state == CpuState::Error {
            self.exec_mode = ExecMode::Paused;
            return 0;
        }
        let ipf = i64::from(self.quirks.instructions_per_frame);
        if ipf != 0 {
            let start = self.cycle_counter;
            let micros_per_cycle =
                1_000_000.0 / (ipf as f64 * f64::from(self.quirks.frame_rate));
            let end_cycles = start + (micros as f64 / micros_per_cycle) as i64;
            let mut next_frame = self.calc_next_frame();
            while self.exec_mode != ExecMode::Paused && next_frame <= end_cycles {
                self.run_instructions((next_frame - self.cycle_counter) as usize);
                if self.cycle_counter == next_frame {
                    self.handle_timer();
                    next_frame += ipf;
                }
            }
            while self.exec_mode != ExecMode::Paused && self.cycle_counter < end_cycles {
                self.step();
            }
            ((end_cycles - self.cycle_counter) as f64 * micros_per_cycle) as i64
        } else {
            self.handle_timer();
            let budget = if micros > 2000 { micros * 3 / 4 } else { 0 };
            let end = Instant::now() + Duration::from_micros(budget.max(0) as u64);
            loop {
                self.run_instructions(487);
                if self.exec_mode == ExecMode::Paused || Instant::now() >= end {
                    break;
                }
            }
            0
        }
    }

    // --- memory access -------------------------------------------------

    fn mem(&self, addr: u32) -> u8 {
        self.memory[(addr & self.address_mask) as usize]
    }

    fn read(&self, addr: u32) -> u8 {
        if addr <= self.address_mask { self.memory[addr as usize] } else { 255 }
    }

    fn write(&mut self, addr: u32, value: u8) {
        if addr <= self.address_mask {
            self.memory[addr as usize] = value;
        }
    }

    fn peek_opcode(&self) -> u16 {
        let hi = self.mem(self.pc);
        let lo = self.mem(self.pc.wrapping_add(1));
        (u16::from(hi) << 8) | u16::from(lo)
    }

    // --- execution loop ------------------------------------------------

    fn calc_next_frame(&self) -> i64 {
        next_frame_boundary(self.cycle_counter, i64::from(self.quirks.instructions_per_frame))
    }

    fn dispatch(&mut self, opcode: u16) {
        (self.handlers[opcode as usize])(self, opcode);
    }

    /// Hot path: no breakpoint checks, no mode transitions.
    fn step_fast(&mut self) {
        let opcode = self.peek_opcode();
        self.cycle_counter += 1;
        self.pc = (self.pc + 2) & self.address_mask;
        self.dispatch(opcode);
    }

    fn step(&mut self) -> i64 {
        let start = self.cycle_counter;
        if self.exec_mode == ExecMode::Running {
            let opcode = self.peek_opcode();
            self.pc = (self.pc + 2) & self.address_mask;
            self.dispatch(opcode);
            self.cycle_counter += 1;
        } else {
            if self.exec_mode == ExecMode::Paused || self.cpu_state == CpuState::Error {
                return 0;
            }
            let opcode = self.peek_opcode();
            self.pc = (self.pc + 2) & self.address_mask;
            self.dispatch(opcode);
            self.cycle_counter += 1;
            if self.exec_mode == ExecMode::Step
                || (self.exec_mode == ExecMode::StepOver && self.sp <= self.step_over_sp)
            {
                self.exec_mode = ExecMode::Paused;
            }
        }
        if self.breakpoints.hit(self.pc).is_some() {
            self.exec_mode = ExecMode::Paused;
        }
        self.cycle_counter - start
    }

    fn run_instructions(&mut self, count: usize) {
        if self.exec_mode == ExecMode::Paused {
            return;
        }
        let start = self.cycle_counter;
        if self.is_megachip_mode {
            if self.exec_mode == ExecMode::Running {
                let end = self.cycle_counter + count as i64;
                while self.exec_mode == ExecMode::Running && self.cycle_counter < end {
                    if self.breakpoints.is_empty() {
                        self.step_fast();
                    } else {
                        self.step();
                    }
                }
            } else {
                for _ in 0..count {
                    self.step();
                }
            }
        } else if self.is_instant_dxyn {
            if self.exec_mode == ExecMode::Running && self.breakpoints.is_empty() {
                for i in 0..count {
                    let opcode = self.peek_opcode();
                    self.pc = (self.pc + 2) & self.address_mask;
                    self.dispatch(opcode);
                    if self.cpu_state == CpuState::Waiting {
                        // waiting consumes the rest of the frame budget
                        self.cycle_counter += (count - i) as i64;
                        break;
                    }
                    self.cycle_counter += 1;
                    if self.exec_mode != ExecMode::Running {
                        break;
                    }
                }
            } else {
                for _ in 0..count {
                    self.step();
                }
            }
        } else {
            for _ in 0..count {
                if self.exec_mode == ExecMode::Running && self.breakpoints.is_empty() {
                    self.step_fast();
                } else {
                    self.step();
                }
            }
        }
        let delta = self.cycle_counter - start;
        if delta > 0 {
            self.system_time.add_cycles(delta as u64);
        }
    }

    fn handle_timer(&mut self) {
        if self.exec_mode == ExecMode::Paused {
            return;
        }
        self.frame_counter += 1;
        self.random_seed = self.random_seed.wrapping_add(1);
        if self.dt > 0 {
            self.dt -= 1;
        }
        if self.st > 0 {
            self.st -= 1;
        }
        if self.st == 0 {
            self.wave_phase = 0.0;
        }
    }

    fn halt(&mut self) {
        self.exec_mode = ExecMode::Paused;
        self.cpu_state = CpuState::Halted;
        self.pc = self.pc.wrapping_sub(2) & self.address_mask;
    }

    fn error_halt(&mut self, message: String) {
        self.exec_mode = ExecMode::Paused;
        self.cpu_state = CpuState::Error;
        self.error_message = Some(message);
        self.pc = self.pc.wrapping_sub(2) & self.address_mask;
    }

    fn reset_state(&mut self) {
        self.cycle_counter = 0;
        self.frame_counter = 0;
        self.system_time.reset();
        if self.quirks.clean_ram {
            self.memory.fill(0);
        } else {
            let mut state = 42u32;
            for byte in &mut self.memory {
                *byte = rand::lcg_rand(&mut state);
            }
        }
        let small = font::small_font(self.base);
        self.memory[..small.len()].copy_from_slice(small);
        if let Some(big) = font::big_font(self.base) {
            self.memory[80..80 + big.len()].copy_from_slice(big);
        }
        self.v = [0; 16];
        self.i = 0;
        self.pc = self.quirks.start_address;
        self.sp = 0;
        self.stack = [0; 16];
        self.dt = 0;
        self.st = 0;
        self.step_over_sp = 0;
        self.planes = 1;
        self.is_hires = self.quirks.only_hires;
        self.is_instant_dxyn = self.quirks.instant_dxyn;
        self.is_megachip_mode = false;
        self.screen.set_mode(
            if self.base == Preset::MegaChip8 { 128 } else { self.quirks.max_screen_width() },
            if self.base == Preset::MegaChip8 { 64 } else { self.quirks.max_screen_height() },
        );
        self.screen.set_all(0);
        self.keys = [false; 16];
        self.wait_keys = [false; 16];
        self.random_seed = 0;
        self.simple_rand_state = 12345;
        self.xo_audio_pattern = [0; 16];
        self.xo_pitch = 64;
        self.wave_phase = 0.0;
        self.vp595_frequency = 0x80;
        self.chip8x_background = 0;
        self.overlay = [0; 16 * 32];
        self.overlay_cell_height = 4;
        self.sprite_width = 0;
        self.sprite_height = 0;
        self.collision_color = 1;
        self.screen_alpha = 255;
        self.blend_mode = 0;
        self.sample_start = 0;
        self.sample_length = 0;
        self.sample_step = 0.0;
        self.sample_loop = false;
        self.mc_sample_pos = 0.0;
        self.exec_mode = ExecMode::Running;
        self.cpu_state = CpuState::Normal;
        self.error_message = None;
    }

    // --- dispatch table ------------------------------------------------

    /// Register `handler` for every opcode matching `opcode` under `mask`
    /// (zero mask bits enumerate). Later registrations win, so the base set
    /// goes in first and per-variant overrides after.
    fn on(&mut self, mask: u16, opcode: u16, handler: Handler) {
        let arg_mask = !mask;
        if arg_mask == 0 {
            self.handlers[opcode as usize] = handler;
            return;
        }
        let mut shift = 0;
        let mut field = arg_mask;
        while field & 1 == 0 {
            field >>= 1;
            shift += 1;
        }
        let mut val: u16 = 0;
        loop {
            self.handlers[(opcode | ((val & field) << shift)) as usize] = handler;
            val = val.wrapping_add(1);
            if val & field == 0 {
                break;
            }
        }
    }

    #[allow(clippy::too_many_lines)]
    fn set_handlers(&mut self) {
        let q = self.quirks;
        self.on(0xFFFF, 0x00E0, Self::op_00e0);
        self.on(0xFFFF, 0x00EE, if q.cyclic_stack { Self::op_00ee_cyclic } else { Self::op_00ee });
        self.on(0xF000, 0x1000, Self::op_1nnn);
        self.on(0xF000, 0x2000, if q.cyclic_stack { Self::op_2nnn_cyclic } else { Self::op_2nnn });
        self.on(0xF000, 0x3000, Self::op_3xnn);
        self.on(0xF000, 0x4000, Self::op_4xnn);
        self.on(0xF00F, 0x5000, Self::op_5xy0);
        self.on(0xF000, 0x6000, Self::op_6xnn);
        self.on(0xF000, 0x7000, Self::op_7xnn);
        self.on(0xF00F, 0x8000, Self::op_8xy0);
        self.on(
            0xF00F,
            0x8001,
            if q.dont_reset_vf { Self::op_8xy1_dont_reset_vf } else { Self::op_8xy1 },
        );
        self.on(
            0xF00F,
            0x8002,
            if q.dont_reset_vf { Self::op_8xy2_dont_reset_vf } else { Self::op_8xy2 },
        );
        self.on(
            0xF00F,
            0x8003,
            if q.dont_reset_vf { Self::op_8xy3_dont_reset_vf } else { Self::op_8xy3 },
        );
        self.on(0xF00F, 0x8004, Self::op_8xy4);
        self.on(0xF00F, 0x8005, Self::op_8xy5);
        self.on(
            0xF00F,
            0x8006,
            if q.just_shift_vx { Self::op_8xy6_just_shift_vx } else { Self::op_8xy6 },
        );
        self.on(0xF00F, 0x8007, Self::op_8xy7);
        self.on(
            0xF00F,
            0x800E,
            if q.just_shift_vx { Self::op_8xye_just_shift_vx } else { Self::op_8xye },
        );
        self.on(0xF00F, 0x9000, Self::op_9xy0);
        self.on(0xF000, 0xA000, Self::op_annn);
        if self.base != Preset::Chip8X {
            self.on(0xF000, 0xB000, if q.jump0_bxnn { Self::op_bxnn } else { Self::op_bnnn });
        }
        self.on(
            0xF000,
            0xC000,
            if self.base < Preset::Chip48 { Self::op_cxnn_fold } else { Self::op_cxnn_lcg },
        );
        if self.base == Preset::Chip8X {
            self.on(
                0xF000,
                0xD000,
                if q.instant_dxyn { Self::op_dxyn::<0> } else { Self::op_dxyn_display_wait },
            );
        } else if q.allow_hires {
            if q.allow_colors {
                self.on(
                    0xF000,
                    0xD000,
                    if q.wrap_sprites {
                        Self::op_dxyn::<{ HIRES | MULTICOLOR | WRAP }>
                    } else {
                        Self::op_dxyn::<{ HIRES | MULTICOLOR }>
                    },
                );
            } else if q.wrap_sprites {
                self.on(0xF000, 0xD000, Self::op_dxyn::<{ HIRES | WRAP }>);
            } else if q.sc_lores_drawing {
                self.on(
                    0xF000,
                    0xD000,
                    if q.sc11_collision {
                        Self::op_dxyn::<{ HIRES | SC_LORES | SC11 }>
                    } else {
                        Self::op_dxyn::<{ HIRES | SC_LORES }>
                    },
                );
            } else {
                self.on(
                    0xF000,
                    0xD000,
                    if q.sc11_collision {
                        Self::op_dxyn::<{ HIRES | SC11 }>
                    } else {
                        Self::op_dxyn::<HIRES>
                    },
                );
            }
        } else if q.allow_colors {
            self.on(
                0xF000,
                0xD000,
                if q.wrap_sprites {
                    Self::op_dxyn::<{ MULTICOLOR | WRAP }>
                } else {
                    Self::op_dxyn::<MULTICOLOR>
                },
            );
        } else if q.wrap_sprites {
            self.on(0xF000, 0xD000, Self::op_dxyn::<WRAP>);
        } else if q.instant_dxyn {
            self.on(0xF000, 0xD000, Self::op_dxyn::<0>);
        } else {
            self.on(0xF000, 0xD000, Self::op_dxyn_display_wait);
        }
        self.on(0xF0FF, 0xE09E, Self::op_ex9e);
        self.on(0xF0FF, 0xE0A1, Self::op_exa1);
        self.on(0xF0FF, 0xF007, Self::op_fx07);
        self.on(0xF0FF, 0xF00A, Self::op_fx0a);
        self.on(0xF0FF, 0xF015, Self::op_fx15);
        self.on(0xF0FF, 0xF018, Self::op_fx18);
        self.on(0xF0FF, 0xF01E, Self::op_fx1e);
        self.on(0xF0FF, 0xF029, Self::op_fx29);
        self.on(0xF0FF, 0xF033, Self::op_fx33);
        self.on(
            0xF0FF,
            0xF055,
            if q.load_store_inc_i_by_x {
                Self::op_fx55_inc_i_by_x
            } else if q.load_store_dont_inc_i {
                Self::op_fx55_dont_inc_i
            } else {
                Self::op_fx55
            },
        );
        self.on(
            0xF0FF,
            0xF065,
            if q.load_store_inc_i_by_x {
                Self::op_fx65_inc_i_by_x
            } else if q.load_store_dont_inc_i {
                Self::op_fx65_dont_inc_i
            } else {
                Self::op_fx65
            },
        );
        match self.base {
            Preset::SChip10 => {
                self.on(0xFFFF, 0x00FD, Self::op_00fd);
                if q.mode_change_clear {
                    self.on(0xFFFF, 0x00FE, Self::op_00fe_with_clear);
                    self.on(0xFFFF, 0x00FF, Self::op_00ff_with_clear);
                } else {
                    self.on(0xFFFF, 0x00FE, Self::op_00fe);
                    self.on(0xFFFF, 0x00FF, Self::op_00ff);
                }
                self.on(0xF0FF, 0xF029, Self::op_fx29_schip10_beta);
                self.on(0xF0FF, 0xF075, Self::op_fx75);
                self.on(0xF0FF, 0xF085, Self::op_fx85);
            }
            Preset::Chip8E => {
                self.on(0xFFFF, 0x00ED, Self::op_00fd);
                self.on(0xFFFF, 0x00F2, Self::op_nop);
                self.on(0xFFFF, 0x0151, Self::op_0151_c8e);
                self.on(0xFFFF, 0x0188, Self::op_0188_c8e);
                self.on(0xF00F, 0x5001, Self::op_5xy1_c8e);
                self.on(0xF00F, 0x5002, Self::op_5xy2_c8e);
                self.on(0xF00F, 0x5003, Self::op_5xy3_c8e);
                self.on(0xFF00, 0xBB00, Self::op_bbnn_c8e);
                self.on(0xFF00, 0xBF00, Self::op_bfnn_c8e);
                self.on(0xF0FF, 0xF003, Self::op_nop);
                self.on(0xF0FF, 0xF01B, Self::op_fx1b_c8e);
                self.on(0xF0FF, 0xF04F, Self::op_fx4f_c8e);
                self.on(0xF0FF, 0xF0E3, Self::op_nop);
                self.on(0xF0FF, 0xF0E7, Self::op_nop);
            }
            Preset::Chip8X => {
                self.on(0xFFFF, 0x02A0, Self::op_02a0_c8x);
                self.on(0xF00F, 0x5001, Self::op_5xy1_c8x);
                self.on(0xF000, 0xB000, Self::op_bxyn_c8x);
                self.on(0xF00F, 0xB000, Self::op_bxy0_c8x);
                self.on(0xF0FF, 0xE0F2, Self::op_nop);
                self.on(0xF0FF, 0xE0F5, Self::op_exf5_c8x);
                self.on(0xF0FF, 0xF0F8, Self::op_fxf8_c8x);
                self.on(0xF0FF, 0xF0FB, Self::op_nop);
            }
            Preset::SChip11 | Preset::SChipC | Preset::SChipModern => {
                self.on(0xFFF0, 0x00C0, Self::op_00cn);
                self.on(0xFFFF, 0x00C0, Self::op_invalid);
                self.on(0xFFFF, 0x00FB, Self::op_00fb);
                self.on(0xFFFF, 0x00FC, Self::op_00fc);
                self.on(0xFFFF, 0x00FD, Self::op_00fd);
                if q.mode_change_clear {
                    self.on(0xFFFF, 0x00FE, Self::op_00fe_with_clear);
                    self.on(0xFFFF, 0x00FF, Self::op_00ff_with_clear);
                } else {
                    self.on(0xFFFF, 0x00FE, Self::op_00fe);
                    self.on(0xFFFF, 0x00FF, Self::op_00ff);
                }
                self.on(0xF0FF, 0xF030, Self::op_fx30);
                self.on(0xF0FF, 0xF075, Self::op_fx75);
                self.on(0xF0FF, 0xF085, Self::op_fx85);
            }
            Preset::MegaChip8 => {
                self.on(0xFFFF, 0x0010, Self::op_0010);
                self.on(0xFFFF, 0x0011, Self::op_0011);
                self.on(0xFFF0, 0x00B0, Self::op_00bn);
                self.on(0xFFF0, 0x00C0, Self::op_00cn);
                self.on(0xFFFF, 0x00E0, Self::op_00e0_megachip);
                self.on(0xFFFF, 0x00FB, Self::op_00fb);
                self.on(0xFFFF, 0x00FC, Self::op_00fc);
                self.on(0xFFFF, 0x00FD, Self::op_00fd);
                self.on(0xFFFF, 0x00FE, Self::op_00fe_megachip);
                self.on(0xFFFF, 0x00FF, Self::op_00ff_megachip);
                self.on(0xFF00, 0x0100, Self::op_01nn);
                self.on(0xFF00, 0x0200, Self::op_02nn);
                self.on(0xFF00, 0x0300, Self::op_03nn);
                self.on(0xFF00, 0x0400, Self::op_04nn);
                self.on(0xFF00, 0x0500, Self::op_05nn);
                self.on(0xFFF0, 0x0600, Self::op_060n);
                self.on(0xFFFF, 0x0700, Self::op_0700);
                self.on(0xFFF0, 0x0800, Self::op_080n);
                self.on(0xFF00, 0x0900, Self::op_09nn);
                self.on(0xF000, 0x3000, Self::op_3xnn_with_01nn);
                self.on(0xF000, 0x4000, Self::op_4xnn_with_01nn);
                self.on(0xF00F, 0x5000, Self::op_5xy0_with_01nn);
                self.on(0xF00F, 0x9000, Self::op_9xy0_with_01nn);
                self.on(0xF000, 0xD000, Self::op_dxyn_megachip);
                self.on(0xF0FF, 0xE09E, Self::op_ex9e_with_01nn);
                self.on(0xF0FF, 0xE0A1, Self::op_exa1_with_01nn);
                self.on(0xF0FF, 0xF030, Self::op_fx30);
                self.on(0xF0FF, 0xF075, Self::op_fx75);
                self.on(0xF0FF, 0xF085, Self::op_fx85);
            }
            Preset::XoChip => {
                self.on(0xFFF0, 0x00C0, Self::op_00cn_masked);
                self.on(0xFFF0, 0x00D0, Self::op_00dn_masked);
                self.on(0xFFFF, 0x00FB, Self::op_00fb_masked);
                self.on(0xFFFF, 0x00FC, Self::op_00fc_masked);
                self.on(0xFFFF, 0x00FD, Self::op_00fd);
                self.on(0xFFFF, 0x00FE, Self::op_00fe_with_clear);
                self.on(0xFFFF, 0x00FF, Self::op_00ff_with_clear);
                self.on(0xF000, 0x3000, Self::op_3xnn_with_f000);
                self.on(0xF000, 0x4000, Self::op_4xnn_with_f000);
                self.on(0xF00F, 0x5000, Self::op_5xy0_with_f000);
                self.on(0xF00F, 0x5002, Self::op_5xy2);
                self.on(0xF00F, 0x5003, Self::op_5xy3);
                self.on(0xF00F, 0x9000, Self::op_9xy0_with_f000);
                self.on(0xF0FF, 0xE09E, Self::op_ex9e_with_f000);
                self.on(0xF0FF, 0xE0A1, Self::op_exa1_with_f000);
                self.on(0xFFFF, 0xF000, Self::op_f000);
                self.on(0xF0FF, 0xF001, Self::op_fx01);
                self.on(0xFFFF, 0xF002, Self::op_f002);
                self.on(0xF0FF, 0xF030, Self::op_fx30);
                self.on(0xF0FF, 0xF03A, Self::op_fx3a);
                self.on(0xF0FF, 0xF075, Self::op_fx75);
                self.on(0xF0FF, 0xF085, Self::op_fx85);
            }
            _ => {}
        }
    }

    // --- handlers ------------------------------------------------------

    fn op_nop(&mut self, _opcode: u16) {}

    fn op_invalid(&mut self, opcode: u16) {
        self.error_halt(format!("INVALID OPCODE: {opcode:04X}"));
    }

    fn clear_screen(&mut self) {
        if self.quirks.allow_colors {
            self.screen.binary_and(!self.planes);
        } else {
            self.screen.set_all(0);
        }
    }

    fn scroll_amount(&self, n: usize) -> usize {
        if self.is_hires || self.quirks.half_pixel_scroll { n } else { n * 2 }
    }

    fn op_0010(&mut self, _opcode: u16) {
        self.is_megachip_mode = false;
        self.screen.set_mode(128, 64);
        self.clear_screen();
    }

    fn op_0011(&mut self, _opcode: u16) {
        self.is_megachip_mode = true;
        self.screen.set_mode(256, 192);
        self.clear_screen();
    }

    fn op_00bn(&mut self, opcode: u16) {
        let n = usize::from(opcode & 0xF);
        if self.is_megachip_mode {
            self.screen.scroll_up(n);
        } else {
            self.screen.scroll_up(self.scroll_amount(n));
        }
    }

    fn op_00cn(&mut self, opcode: u16) {
        let n = usize::from(opcode & 0xF);
        if self.is_megachip_mode {
            self.screen.scroll_down(n);
        } else {
            self.screen.scroll_down(self.scroll_amount(n));
        }
    }

    fn op_00cn_masked(&mut self, opcode: u16) {
        let mut n = usize::from(opcode & 0xF);
        if !self.is_hires {
            n *= 2;
        }
        let width = self.screen.width();
        let height = self.screen.height();
        let planes = self.planes;
        for sy in (0..height.saturating_sub(n)).rev() {
            for sx in 0..width {
                self.screen.move_pixel_masked(sx, sy, sx, sy + n, planes);
            }
        }
        for sy in 0..n.min(height) {
            for sx in 0..width {
                self.screen.clear_pixel_masked(sx, sy, planes);
            }
        }
    }

    fn op_00dn_masked(&mut self, opcode: u16) {
        let mut n = usize::from(opcode & 0xF);
        if !self.is_hires {
            n *= 2;
        }
        let width = self.screen.width();
        let height = self.screen.height();
        let planes = self.planes;
        for sy in n..height {
            for sx in 0..width {
                self.screen.move_pixel_masked(sx, sy, sx, sy - n, planes);
            }
        }
        for sy in height.saturating_sub(n)..height {
            for sx in 0..width {
                self.screen.clear_pixel_masked(sx, sy, planes);
            }
        }
    }

    fn op_00e0(&mut self, _opcode: u16) {
        self.clear_screen();
    }

    fn op_00e0_megachip(&mut self, _opcode: u16) {
        // a MegaChip clear doubles as the frame-present point
        self.clear_screen();
        self.cycle_counter = self.calc_next_frame() - 1;
    }

    fn op_00ee(&mut self, _opcode: u16) {
        if self.sp == 0 {
            self.error_halt("STACK UNDERFLOW".into());
        } else {
            self.sp -= 1;
            self.pc = u32::from(self.stack[self.sp]);
            if self.exec_mode == ExecMode::StepOut {
                self.exec_mode = ExecMode::Paused;
            }
        }
    }

    fn op_00ee_cyclic(&mut self, _opcode: u16) {
        self.sp = self.sp.wrapping_sub(1) & 0xFF;
        self.pc = u32::from(self.stack[self.sp & 0xF]);
        if self.exec_mode == ExecMode::StepOut {
            self.exec_mode = ExecMode::Paused;
        }
    }

    fn op_00fb(&mut self, _opcode: u16) {
        if self.is_megachip_mode {
            self.screen.scroll_right(4);
        } else {
            self.screen.scroll_right(self.scroll_amount(4));
        }
    }

    fn op_00fb_masked(&mut self, _opcode: u16) {
        let n = if self.is_hires { 4 } else { 8 };
        let width = self.screen.width();
        let height = self.screen.height();
        let planes = self.planes;
        for sy in 0..height {
            for sx in (0..width.saturating_sub(n)).rev() {
                self.screen.move_pixel_masked(sx, sy, sx + n, sy, planes);
            }
            for sx in 0..n.min(width) {
                self.screen.clear_pixel_masked(sx, sy, planes);
            }
        }
    }

    fn op_00fc(&mut self, _opcode: u16) {
        if self.is_megachip_mode {
            self.screen.scroll_left(4);
        } else {
            self.screen.scroll_left(self.scroll_amount(4));
        }
    }

    fn op_00fc_masked(&mut self, _opcode: u16) {
        let n = if self.is_hires { 4 } else { 8 };
        let width = self.screen.width();
        let height = self.screen.height();
        let planes = self.planes;
        for sy in 0..height {
            for sx in n..width {
                self.screen.move_pixel_masked(sx, sy, sx - n, sy, planes);
            }
            for sx in width.saturating_sub(n)..width {
                self.screen.clear_pixel_masked(sx, sy, planes);
            }
        }
    }

    fn op_00fd(&mut self, _opcode: u16) {
        self.halt();
    }

    fn op_00fe(&mut self, _opcode: u16) {
        self.is_hires = false;
        self.is_instant_dxyn = self.quirks.instant_dxyn;
    }

    fn op_00fe_with_clear(&mut self, _opcode: u16) {
        self.is_hires = false;
        self.is_instant_dxyn = self.quirks.instant_dxyn;
        self.screen.set_all(0);
    }

    fn op_00fe_megachip(&mut self, _opcode: u16) {
        if self.is_hires && !self.is_megachip_mode {
            self.is_hires = false;
            self.is_instant_dxyn = self.quirks.instant_dxyn;
            self.clear_screen();
        }
    }

    fn op_00ff(&mut self, _opcode: u16) {
        self.is_hires = true;
        self.is_instant_dxyn = true;
    }

    fn op_00ff_with_clear(&mut self, _opcode: u16) {
        self.is_hires = true;
        self.is_instant_dxyn = true;
        self.screen.set_all(0);
    }

    fn op_00ff_megachip(&mut self, _opcode: u16) {
        if !self.is_hires && !self.is_megachip_mode {
            self.is_hires = true;
            self.is_instant_dxyn = true;
            self.clear_screen();
        }
    }

    fn op_0151_c8e(&mut self, _opcode: u16) {
        if self.dt != 0 {
            self.pc = self.pc.wrapping_sub(2) & self.address_mask;
            self.cpu_state = CpuState::Waiting;
        } else {
            self.cpu_state = CpuState::Normal;
        }
    }

    fn op_0188_c8e(&mut self, _opcode: u16) {
        self.pc = (self.pc + 2) & self.address_mask;
    }

    fn op_01nn(&mut self, opcode: u16) {
        let word = u32::from(self.peek_opcode());
        self.i = ((u32::from(opcode & 0xFF) << 16) | word) & self.address_mask;
        self.pc = (self.pc + 2) & self.address_mask;
    }

    fn op_02a0_c8x(&mut self, _opcode: u16) {
        self.chip8x_background = (self.chip8x_background + 1) & 3;
    }

    fn op_02nn(&mut self, opcode: u16) {
        let count = usize::from(opcode & 0xFF);
        let mut palette = *self.screen.palette();
        let mut address = self.i;
        for entry in palette.iter_mut().skip(1).take(count) {
            let a = self.mem(address);
            let r = self.mem(address.wrapping_add(1));
            let g = self.mem(address.wrapping_add(2));
            let b = self.mem(address.wrapping_add(3));
            address = address.wrapping_add(4);
            *entry = (u32::from(r) << 24) | (u32::from(g) << 16) | (u32::from(b) << 8)
                | u32::from(a);
        }
        self.screen.set_palette(&palette);
    }

    fn op_03nn(&mut self, opcode: u16) {
        self.sprite_width = usize::from(opcode & 0xFF);
        if self.sprite_width == 0 {
            self.sprite_width = 256;
        }
    }

    fn op_04nn(&mut self, opcode: u16) {
        self.sprite_height = usize::from(opcode & 0xFF);
        if self.sprite_height == 0 {
            self.sprite_height = 256;
        }
    }

    fn op_05nn(&mut self, opcode: u16) {
        self.screen_alpha = (opcode & 0xFF) as u8;
    }

    fn op_060n(&mut self, opcode: u16) {
        let frequency = (u32::from(self.mem(self.i)) << 8) | u32::from(self.mem(self.i + 1));
        let length = (u32::from(self.mem(self.i + 2)) << 16)
            | (u32::from(self.mem(self.i + 3)) << 8)
            | u32::from(self.mem(self.i + 4));
        self.sample_start = self.i.wrapping_add(6) & self.address_mask;
        self.sample_step = f64::from(frequency) / 44100.0;
        self.sample_length = length;
        self.sample_loop = opcode & 0xF == 0;
        self.mc_sample_pos = 0.0;
    }

    fn op_0700(&mut self, _opcode: u16) {
        self.sample_length = 0;
        self.mc_sample_pos = 0.0;
    }

    fn op_080n(&mut self, opcode: u16) {
        let bm = (opcode & 0xF) as u8;
        self.blend_mode = if bm < 6 { bm } else { 0 };
    }

    fn op_09nn(&mut self, opcode: u16) {
        self.collision_color = (opcode & 0xFF) as u8;
    }

    fn op_1nnn(&mut self, opcode: u16) {
        if u32::from(opcode & 0xFFF) == self.pc.wrapping_sub(2) {
            // jump-to-self: the program is done, stop spinning
            self.exec_mode = ExecMode::Paused;
        }
        self.pc = u32::from(opcode & 0xFFF);
    }

    fn op_2nnn(&mut self, opcode: u16) {
        if self.sp == 16 {
            self.error_halt("STACK OVERFLOW".into());
        } else {
            self.stack[self.sp] = self.pc as u16;
            self.sp += 1;
            self.pc = u32::from(opcode & 0xFFF);
        }
    }

    fn op_2nnn_cyclic(&mut self, opcode: u16) {
        self.stack[self.sp & 0xF] = self.pc as u16;
        self.sp = self.sp.wrapping_add(1) & 0xFF;
        self.pc = u32::from(opcode & 0xFFF);
    }

    /// Skip distance when the next instruction may be a 4-byte one.
    fn skip_offset(&self, if_opcode: u16, mask: u16) -> u32 {
        let hi = self.mem(self.pc);
        let lo = self.mem(self.pc.wrapping_add(1));
        if hi & (mask >> 8) as u8 == (if_opcode >> 8) as u8
            && lo & mask as u8 == if_opcode as u8
        {
            4
        } else {
            2
        }
    }

    fn op_3xnn(&mut self, opcode: u16) {
        if self.v[vx(opcode)] == (opcode & 0xFF) as u8 {
            self.pc = self.pc.wrapping_add(2);
        }
    }

    fn op_3xnn_with_f000(&mut self, opcode: u16) {
        if self.v[vx(opcode)] == (opcode & 0xFF) as u8 {
            self.pc = (self.pc + self.skip_offset(0xF000, 0xFFFF)) & self.address_mask;
        }
    }

    fn op_3xnn_with_01nn(&mut self, opcode: u16) {
        if self.v[vx(opcode)] == (opcode & 0xFF) as u8 {
            self.pc = (self.pc + self.skip_offset(0x0100, 0xFF00)) & self.address_mask;
        }
    }

    fn op_4xnn(&mut self, opcode: u16) {
        if self.v[vx(opcode)] != (opcode & 0xFF) as u8 {
            self.pc = self.pc.wrapping_add(2);
        }
    }

    fn op_4xnn_with_f000(&mut self, opcode: u16) {
        if self.v[vx(opcode)] != (opcode & 0xFF) as u8 {
            self.pc = (self.pc + self.skip_offset(0xF000, 0xFFFF)) & self.address_mask;
        }
    }

    fn op_4xnn_with_01nn(&mut self, opcode: u16) {
        if self.v[vx(opcode)] != (opcode & 0xFF) as u8 {
            self.pc = (self.pc + self.skip_offset(0x0100, 0xFF00)) & self.address_mask;
        }
    }

    fn op_5xy0(&mut self, opcode: u16) {
        if self.v[vx(opcode)] == self.v[vy(opcode)] {
            self.pc = self.pc.wrapping_add(2);
        }
    }

    fn op_5xy0_with_f000(&mut self, opcode: u16) {
        if self.v[vx(opcode)] == self.v[vy(opcode)] {
            self.pc = (self.pc + self.skip_offset(0xF000, 0xFFFF)) & self.address_mask;
        }
    }

    fn op_5xy0_with_01nn(&mut self, opcode: u16) {
        if self.v[vx(opcode)] == self.v[vy(opcode)] {
            self.pc = (self.pc + self.skip_offset(0x0100, 0xFF00)) & self.address_mask;
        }
    }

    fn op_5xy1_c8e(&mut self, opcode: u16) {
        if self.v[vx(opcode)] > self.v[vy(opcode)] {
            self.pc = (self.pc + 2) & self.address_mask;
        }
    }

    fn op_5xy1_c8x(&mut self, opcode: u16) {
        let x = vx(opcode);
        self.v[x] = ((self.v[x] & 0x77) + (self.v[vy(opcode)] & 0x77)) & 0x77;
    }

    fn op_5xy2(&mut self, opcode: u16) {
        let x = vx(opcode);
        let y = vy(opcode);
        for idx in 0..=x.abs_diff(y) {
            let reg = if x < y { x + idx } else { x - idx };
            self.write(self.i.wrapping_add(idx as u32), self.v[reg]);
        }
    }

    fn op_5xy2_c8e(&mut self, opcode: u16) {
        let x = vx(opcode);
        let y = vy(opcode);
        if x < y {
            let len = y - x;
            for idx in 0..=len {
                self.write(self.i.wrapping_add(idx as u32), self.v[x + idx]);
            }
            self.i = (self.i + len as u32 + 1) & self.address_mask;
        }
    }

    fn op_5xy3(&mut self, opcode: u16) {
        let x = vx(opcode);
        let y = vy(opcode);
        for idx in 0..=x.abs_diff(y) {
            let reg = if x < y { x + idx } else { x - idx };
            self.v[reg] = self.read(self.i.wrapping_add(idx as u32));
        }
    }

    fn op_5xy3_c8e(&mut self, opcode: u16) {
        let x = vx(opcode);
        let y = vy(opcode);
        if x < y {
            let len = y - x;
            for idx in 0..=len {
                self.v[x + idx] = self.read(self.i.wrapping_add(idx as u32));
            }
            self.i = (self.i + len as u32 + 1) & self.address_mask;
        }
    }

    fn op_6xnn(&mut self, opcode: u16) {
        self.v[vx(opcode)] = (opcode & 0xFF) as u8;
    }

    fn op_7xnn(&mut self, opcode: u16) {
        let x = vx(opcode);
        self.v[x] = self.v[x].wrapping_add((opcode & 0xFF) as u8);
    }

    fn op_8xy0(&mut self, opcode: u16) {
        self.v[vx(opcode)] = self.v[vy(opcode)];
    }

    fn op_8xy1(&mut self, opcode: u16) {
        self.v[vx(opcode)] |= self.v[vy(opcode)];
        self.v[0xF] = 0;
    }

    fn op_8xy1_dont_reset_vf(&mut self, opcode: u16) {
        self.v[vx(opcode)] |= self.v[vy(opcode)];
    }

    fn op_8xy2(&mut self, opcode: u16) {
        self.v[vx(opcode)] &= self.v[vy(opcode)];
        self.v[0xF] = 0;
    }

    fn op_8xy2_dont_reset_vf(&mut self, opcode: u16) {
        self.v[vx(opcode)] &= self.v[vy(opcode)];
    }

    fn op_8xy3(&mut self, opcode: u16) {
        self.v[vx(opcode)] ^= self.v[vy(opcode)];
        self.v[0xF] = 0;
    }

    fn op_8xy3_dont_reset_vf(&mut self, opcode: u16) {
        self.v[vx(opcode)] ^= self.v[vy(opcode)];
    }

    fn op_8xy4(&mut self, opcode: u16) {
        let result = u16::from(self.v[vx(opcode)]) + u16::from(self.v[vy(opcode)]);
        self.v[vx(opcode)] = result as u8;
        self.v[0xF] = (result >> 8) as u8;
    }

    fn op_8xy5(&mut self, opcode: u16) {
        let result = u16::from(self.v[vx(opcode)]).wrapping_sub(u16::from(self.v[vy(opcode)]));
        self.v[vx(opcode)] = result as u8;
        self.v[0xF] = u8::from(result <= 255);
    }

    fn op_8xy6(&mut self, opcode: u16) {
        let carry = self.v[vy(opcode)] & 1;
        self.v[vx(opcode)] = self.v[vy(opcode)] >> 1;
        self.v[0xF] = carry;
    }

    fn op_8xy6_just_shift_vx(&mut self, opcode: u16) {
        let x = vx(opcode);
        let carry = self.v[x] & 1;
        self.v[x] >>= 1;
        self.v[0xF] = carry;
    }

    fn op_8xy7(&mut self, opcode: u16) {
        let result = u16::from(self.v[vy(opcode)]).wrapping_sub(u16::from(self.v[vx(opcode)]));
        self.v[vx(opcode)] = result as u8;
        self.v[0xF] = u8::from(result <= 255);
    }

    fn op_8xye(&mut self, opcode: u16) {
        let carry = self.v[vy(opcode)] >> 7;
        self.v[vx(opcode)] = self.v[vy(opcode)] << 1;
        self.v[0xF] = carry;
    }

    fn op_8xye_just_shift_vx(&mut self, opcode: u16) {
        let x = vx(opcode);
        let carry = self.v[x] >> 7;
        self.v[x] <<= 1;
        self.v[0xF] = carry;
    }

    fn op_9xy0(&mut self, opcode: u16) {
        if self.v[vx(opcode)] != self.v[vy(opcode)] {
            self.pc = self.pc.wrapping_add(2);
        }
    }

    fn op_9xy0_with_f000(&mut self, opcode: u16) {
        if self.v[vx(opcode)] != self.v[vy(opcode)] {
            self.pc = (self.pc + self.skip_offset(0xF000, 0xFFFF)) & self.address_mask;
        }
    }

    fn op_9xy0_with_01nn(&mut self, opcode: u16) {
        if self.v[vx(opcode)] != self.v[vy(opcode)] {
            self.pc = (self.pc + self.skip_offset(0x0100, 0xFF00)) & self.address_mask;
        }
    }

    fn op_annn(&mut self, opcode: u16) {
        self.i = u32::from(opcode & 0xFFF);
    }

    fn op_bnnn(&mut self, opcode: u16) {
        self.pc = (u32::from(self.v[0]) + u32::from(opcode & 0xFFF)) & self.address_mask;
    }

    fn op_bxnn(&mut self, opcode: u16) {
        self.pc =
            (u32::from(self.v[vx(opcode)]) + u32::from(opcode & 0xFFF)) & self.address_mask;
    }

    fn op_bbnn_c8e(&mut self, opcode: u16) {
        self.pc = self.pc.wrapping_sub(2 + (opcode & 0xFF) as u32) & self.address_mask;
    }

    fn op_bfnn_c8e(&mut self, opcode: u16) {
        self.pc = self.pc.wrapping_sub(2).wrapping_add(u32::from(opcode & 0xFF))
            & self.address_mask;
    }

    fn set_overlay_cell(&mut self, x: usize, y: usize, col: u8) {
        if x < 16 && y < 32 {
            self.overlay[y * 16 + x] = col;
        }
    }

    fn op_bxy0_c8x(&mut self, opcode: u16) {
        let rx = self.v[vx(opcode)];
        let ry = self.v[(vx(opcode) + 1) & 0xF];
        let x_pos = usize::from(rx & 0xF);
        let width = usize::from(rx >> 4);
        let y_pos = usize::from(ry & 0xF);
        let height = usize::from(ry >> 4);
        let col = self.v[vy(opcode)] & 7;
        self.overlay_cell_height = 4;
        for y in 0..=height {
            for x in 0..=width {
                self.set_overlay_cell(x_pos + x, y_pos + y, col);
            }
        }
    }

    fn op_bxyn_c8x(&mut self, opcode: u16) {
        let rx = self.v[vx(opcode)];
        let ry = self.v[(vx(opcode) + 1) & 0xF];
        let x_pos = usize::from((rx >> 3) & 7);
        let y_pos = usize::from(ry & 0x1F);
        let height = usize::from(opcode & 0xF);
        let col = self.v[vy(opcode)] & 7;
        self.overlay_cell_height = 1;
        for y in 0..height {
            self.set_overlay_cell(x_pos, y_pos + y, col);
        }
    }

    fn op_cxnn_fold(&mut self, opcode: u16) {
        self.v[vx(opcode)] =
            rand::fold_rand(&mut self.random_seed, &self.rand_table, (opcode & 0xFF) as u8);
    }

    fn op_cxnn_lcg(&mut self, opcode: u16) {
        self.v[vx(opcode)] = rand::lcg_rand(&mut self.simple_rand_state) & (opcode & 0xFF) as u8;
    }

    // --- drawing ---------------------------------------------------------

    fn draw_pixel<const Q: u16>(&mut self, x: usize, y: usize, planes: u8, hires: bool) -> bool {
        if Q & HIRES != 0 {
            if Q & SC_LORES != 0 {
                self.screen.draw_sprite_pixel_doubled_sc(x, y, planes, hires)
            } else {
                self.screen.draw_sprite_pixel_doubled(x, y, planes, hires)
            }
        } else {
            self.screen.draw_sprite_pixel(x, y, planes)
        }
    }

    fn draw_sprite<const Q: u16>(
        &mut self,
        x: usize,
        y: usize,
        addr: u32,
        mut height: usize,
        hires: bool,
    ) -> u8 {
        let mut collision: u32 = 0;
        let scr_width = if Q & HIRES != 0 { 128 } else { 64 };
        let scr_height = if Q & HIRES != 0 { 64 } else { 32 };
        let scale = if Q & HIRES != 0 && !hires { 2 } else { 1 };
        let mut width = 8usize;
        if height == 0 {
            height = 16;
            if self.quirks.lores_dxy0_is_16x16 || (self.is_hires && !self.quirks.only_hires) {
                width = 16;
            } else if !self.quirks.lores_dxy0_is_8x16 {
                width = 0;
                height = 0;
            }
        }
        let mut planes = if Q & MULTICOLOR != 0 { self.planes } else { 1 };
        let mut data = addr & self.address_mask;
        while planes != 0 {
            let plane = planes & planes.wrapping_neg();
            planes &= planes - 1;
            for l in 0..height {
                let mut value = self.mem(data);
                data = data.wrapping_add(1);
                if Q & WRAP != 0 {
                    for b in 0..width {
                        if b == 8 {
                            value = self.mem(data);
                            data = data.wrapping_add(1);
                        }
                        if value & 0x80 != 0
                            && self.draw_pixel::<Q>(
                                (x + b * scale) % scr_width,
                                (y + l * scale) % scr_height,
                                plane,
                                hires,
                            )
                        {
                            collision += 1;
                        }
                        value <<= 1;
                    }
                } else if y + l * scale < scr_height {
                    let mut line_col = 0;
                    for b in 0..width {
                        if b == 8 {
                            value = self.mem(data);
                            data = data.wrapping_add(1);
                        }
                        if Q & SC_LORES != 0 {
                            // the SCHIP lores path touches the row even for
                            // clear bits so the doubled row stays coherent
                            let bit_plane = if value & 0x80 != 0 { plane } else { 0 };
                            if x + b * scale < scr_width
                                && self.draw_pixel::<Q>(
                                    x + b * scale,
                                    y + l * scale,
                                    bit_plane,
                                    hires,
                                )
                            {
                                line_col = 1;
                            }
                        } else if x + b * scale < scr_width
                            && value & 0x80 != 0
                            && self.draw_pixel::<Q>(x + b * scale, y + l * scale, plane, hires)
                        {
                            line_col = 1;
                        }
                        value <<= 1;
                    }
                    if Q & SC_LORES != 0 && !hires {
                        let x1 = x & 0x70;
                        let x2 = (x1 + 32).min(128);
                        self.screen.copy_pixel_row(x1, x2, y + l * scale, y + l * scale + 1);
                    }
                    collision += line_col;
                } else {
                    if Q & SC11 != 0 {
                        collision += 1;
                    }
                    if width == 16 {
                        data = data.wrapping_add(1);
                    }
                }
            }
        }
        if Q & SC11 != 0 {
            if hires { collision as u8 } else { u8::from(collision != 0) }
        } else {
            u8::from(collision != 0)
        }
    }

    fn op_dxyn<const Q: u16>(&mut self, opcode: u16) {
        let lines = usize::from(opcode & 0xF);
        if Q & HIRES != 0 {
            if self.is_hires {
                let x = usize::from(self.v[vx(opcode)]) % 128;
                let y = usize::from(self.v[vy(opcode)]) % 64;
                self.v[0xF] = self.draw_sprite::<Q>(x, y, self.i, lines, true);
            } else {
                if Q & SC_LORES != 0 {
                    let ipf = i64::from(self.quirks.instructions_per_frame);
                    if ipf != 0 && self.cycle_counter % ipf != 0 {
                        self.pc = self.pc.wrapping_sub(2) & self.address_mask;
                        return;
                    }
                }
                let x = usize::from(self.v[vx(opcode)]) % 64;
                let y = usize::from(self.v[vy(opcode)]) % 32;
                self.v[0xF] = self.draw_sprite::<Q>(x * 2, y * 2, self.i, lines, false);
            }
        } else {
            let x = usize::from(self.v[vx(opcode)]) % 64;
            let y = usize::from(self.v[vy(opcode)]) % 32;
            self.v[0xF] = self.draw_sprite::<Q>(x, y, self.i, lines, false);
        }
    }

    /// The original interpreters could only draw during the vertical blank,
    /// so a draw issued mid-frame is retried until the frame boundary.
    fn op_dxyn_display_wait(&mut self, opcode: u16) {
        let ipf = i64::from(self.quirks.instructions_per_frame);
        if ipf != 0 && self.cycle_counter % ipf != 0 {
            self.pc = self.pc.wrapping_sub(2) & self.address_mask;
            return;
        }
        let x = usize::from(self.v[vx(opcode)]) % 64;
        let y = usize::from(self.v[vy(opcode)]) % 32;
        let lines = usize::from(opcode & 0xF);
        if !self.is_instant_dxyn
            && self.quirks.extended_vblank
            && self.cpu_state != CpuState::Waiting
        {
            // tall sprites starting late in a row miss the blank period
            if lines > 4 && lines + (x & 7) > 9 {
                self.pc = self.pc.wrapping_sub(2) & self.address_mask;
                self.cpu_state = CpuState::Waiting;
                return;
            }
        } else {
            self.cpu_state = CpuState::Normal;
        }
        self.v[0xF] = self.draw_sprite::<0>(x, y, self.i, lines, false);
    }

    fn op_dxyn_megachip(&mut self, opcode: u16) {
        if !self.is_megachip_mode {
            self.op_dxyn::<HIRES>(opcode);
            return;
        }
        let xpos = usize::from(self.v[vx(opcode)]);
        let ypos = usize::from(self.v[vy(opcode)]);
        self.v[0xF] = 0;
        if self.i < 0x100 {
            // low I draws classic 8-wide font sprites as white
            let lines = usize::from(opcode & 0xF);
            let mut offset = self.i;
            for l in 0..lines {
                if ypos + l >= 192 {
                    break;
                }
                let mut value = self.mem(offset);
                offset = offset.wrapping_add(1);
                for b in 0..8 {
                    if xpos + b >= 256 || value == 0 {
                        break;
                    }
                    if value & 0x80 != 0 {
                        if self.screen.pixel(xpos + b, ypos + l) != 0 {
                            self.v[0xF] = 1;
                            self.screen.set_pixel(xpos + b, ypos + l, 0);
                        } else {
                            self.screen.set_pixel(xpos + b, ypos + l, 255);
                        }
                    }
                    value <<= 1;
                }
            }
        } else {
            for y in 0..self.sprite_height {
                let mut yy = ypos + y;
                if self.quirks.wrap_sprites {
                    yy &= 0xFF;
                    if yy >= 192 {
                        continue;
                    }
                } else if yy >= 192 {
                    break;
                }
                for x in 0..self.sprite_width {
                    let mut xx = xpos + x;
                    if xx > 255 {
                        if self.quirks.wrap_sprites {
                            xx &= 0xFF;
                        } else {
                            continue;
                        }
                    }
                    let col = self.mem(self.i.wrapping_add((y * self.sprite_width + x) as u32));
                    if col != 0 {
                        if self.screen.pixel(xx, yy) == self.collision_color {
                            self.v[0xF] = 1;
                        }
                        self.screen.set_pixel(xx, yy, col);
                    }
                }
            }
        }
    }

    // --- keys, timers, I/O ------------------------------------------------

    fn op_ex9e(&mut self, opcode: u16) {
        if self.keys[usize::from(self.v[vx(opcode)] & 0xF)] {
            self.pc = self.pc.wrapping_add(2);
        }
    }

    fn op_ex9e_with_f000(&mut self, opcode: u16) {
        if self.keys[usize::from(self.v[vx(opcode)] & 0xF)] {
            self.pc = (self.pc + self.skip_offset(0xF000, 0xFFFF)) & self.address_mask;
        }
    }

    fn op_ex9e_with_01nn(&mut self, opcode: u16) {
        if self.keys[usize::from(self.v[vx(opcode)] & 0xF)] {
            self.pc = (self.pc + self.skip_offset(0x0100, 0xFF00)) & self.address_mask;
        }
    }

    fn op_exa1(&mut self, opcode: u16) {
        if !self.keys[usize::from(self.v[vx(opcode)] & 0xF)] {
            self.pc = self.pc.wrapping_add(2);
        }
    }

    fn op_exa1_with_f000(&mut self, opcode: u16) {
        if !self.keys[usize::from(self.v[vx(opcode)] & 0xF)] {
            self.pc = (self.pc + self.skip_offset(0xF000, 0xFFFF)) & self.address_mask;
        }
    }

    fn op_exa1_with_01nn(&mut self, opcode: u16) {
        if !self.keys[usize::from(self.v[vx(opcode)] & 0xF)] {
            self.pc = (self.pc + self.skip_offset(0x0100, 0xFF00)) & self.address_mask;
        }
    }

    fn op_exf5_c8x(&mut self, _opcode: u16) {
        self.pc = self.pc.wrapping_add(2);
    }

    fn op_f000(&mut self, _opcode: u16) {
        self.i = u32::from(self.peek_opcode()) & self.address_mask;
        self.pc = (self.pc + 2) & self.address_mask;
    }

    fn op_fx01(&mut self, opcode: u16) {
        self.planes = ((opcode >> 8) & 0xF) as u8;
    }

    fn op_f002(&mut self, _opcode: u16) {
        for idx in 0..16 {
            self.xo_audio_pattern[idx] = self.mem(self.i.wrapping_add(idx as u32));
        }
    }

    fn op_fx07(&mut self, opcode: u16) {
        self.v[vx(opcode)] = self.dt;
    }

    /// Wait for a key press *and release*; the released key lands in Vx.
    fn op_fx0a(&mut self, opcode: u16) {
        if self.cpu_state != CpuState::Waiting {
            self.wait_keys = [false; 16];
        }
        for key in 0..16 {
            if self.wait_keys[key] && !self.keys[key] {
                self.v[vx(opcode)] = key as u8;
                self.cpu_state = CpuState::Normal;
                return;
            }
        }
        let mut newly_pressed = false;
        for key in 0..16 {
            if self.keys[key] && !self.wait_keys[key] {
                self.wait_keys[key] = true;
                newly_pressed = true;
            }
        }
        self.pc = self.pc.wrapping_sub(2) & self.address_mask;
        if newly_pressed && self.base < Preset::Chip48 {
            // VIP interpreter key click
            self.st = 4;
        }
        self.cpu_state = CpuState::Waiting;
    }

    fn op_fx15(&mut self, opcode: u16) {
        self.dt = self.v[vx(opcode)];
    }

    fn op_fx18(&mut self, opcode: u16) {
        self.st = self.v[vx(opcode)];
        if self.st == 0 {
            self.wave_phase = 0.0;
        }
    }

    fn op_fx1b_c8e(&mut self, opcode: u16) {
        self.pc = (self.pc + u32::from(self.v[vx(opcode)])) & self.address_mask;
    }

    fn op_fx1e(&mut self, opcode: u16) {
        self.i = (self.i + u32::from(self.v[vx(opcode)])) & self.address_mask;
    }

    fn op_fx29(&mut self, opcode: u16) {
        self.i = u32::from(self.v[vx(opcode)] & 0xF) * 5;
    }

    fn op_fx29_schip10_beta(&mut self, opcode: u16) {
        let n = self.v[vx(opcode)];
        self.i = if (10..=19).contains(&n) {
            u32::from(n - 10) * 10 + 16 * 5
        } else {
            u32::from(n & 0xF) * 5
        };
    }

    fn op_fx30(&mut self, opcode: u16) {
        self.i = u32::from(self.v[vx(opcode)] & 0xF) * 10 + 16 * 5;
    }

    fn op_fx33(&mut self, opcode: u16) {
        let val = self.v[vx(opcode)];
        self.write(self.i, val / 100);
        self.write(self.i.wrapping_add(1), (val / 10) % 10);
        self.write(self.i.wrapping_add(2), val % 10);
    }

    fn op_fx3a(&mut self, opcode: u16) {
        self.xo_pitch = self.v[vx(opcode)];
    }

    fn op_fx4f_c8e(&mut self, opcode: u16) {
        if self.cpu_state != CpuState::Waiting {
            self.dt = self.v[vx(opcode)];
            self.cpu_state = CpuState::Waiting;
        }
        if self.dt != 0 && self.cpu_state == CpuState::Waiting {
            self.pc = self.pc.wrapping_sub(2) & self.address_mask;
        } else {
            self.cpu_state = CpuState::Normal;
        }
    }

    fn op_fx55(&mut self, opcode: u16) {
        let upto = vx(opcode);
        for idx in 0..=upto {
            self.write(self.i.wrapping_add(idx as u32), self.v[idx]);
        }
        self.i = (self.i + upto as u32 + 1) & self.address_mask;
    }

    fn op_fx55_inc_i_by_x(&mut self, opcode: u16) {
        let upto = vx(opcode);
        for idx in 0..=upto {
            self.write(self.i.wrapping_add(idx as u32), self.v[idx]);
        }
        self.i = (self.i + upto as u32) & self.address_mask;
    }

    fn op_fx55_dont_inc_i(&mut self, opcode: u16) {
        let upto = vx(opcode);
        for idx in 0..=upto {
            self.write(self.i.wrapping_add(idx as u32), self.v[idx]);
        }
    }

    fn op_fx65(&mut self, opcode: u16) {
        let upto = vx(opcode);
        for idx in 0..=upto {
            self.v[idx] = self.read(self.i.wrapping_add(idx as u32));
        }
        self.i = (self.i + upto as u32 + 1) & self.address_mask;
    }

    fn op_fx65_inc_i_by_x(&mut self, opcode: u16) {
        let upto = vx(opcode);
        for idx in 0..=upto {
            self.v[idx] = self.read(self.i.wrapping_add(idx as u32));
        }
        self.i = (self.i + upto as u32) & self.address_mask;
    }

    fn op_fx65_dont_inc_i(&mut self, opcode: u16) {
        let upto = vx(opcode);
        for idx in 0..=upto {
            self.v[idx] = self.read(self.i.wrapping_add(idx as u32));
        }
    }

    fn op_fx75(&mut self, opcode: u16) {
        let upto = vx(opcode);
        self.register_space[..=upto].copy_from_slice(&self.v[..=upto]);
    }

    fn op_fx85(&mut self, opcode: u16) {
        let upto = vx(opcode);
        self.v[..=upto].copy_from_slice(&self.register_space[..=upto]);
    }

    fn op_fxf8_c8x(&mut self, opcode: u16) {
        let val = self.v[vx(opcode)];
        // the VP-595 forces 0x80 into the CDP1863 latch when 0 is written
        self.vp595_frequency = if val != 0 { val } else { 0x80 };
    }

    // --- audio ------------------------------------------------------------

    fn next_mc_sample(&mut self) -> u8 {
        if self.is_megachip_mode && self.sample_length > 0 && self.exec_mode == ExecMode::Running
        {
            let val = self.mem(self.sample_start.wrapping_add(self.mc_sample_pos as u32));
            let mut pos = self.mc_sample_pos + self.sample_step;
            if pos >= f64::from(self.sample_length) {
                if self.sample_loop {
                    pos -= f64::from(self.sample_length);
                } else {
                    pos = 0.0;
                    self.sample_length = 0;
                }
            }
            self.mc_sample_pos = pos;
            val
        } else {
            128
        }
    }
}

impl Chip8Core for Chip8Generic {
    fn core_name(&self) -> &'static str {
        self.base.name()
    }

    fn reset(&mut self) {
        self.reset_state();
    }

    fn exec_mode(&self) -> ExecMode {
        self.exec_mode
    }

    fn set_exec_mode(&mut self, mode: ExecMode) {
        if mode == ExecMode::StepOver {
            self.step_over_sp = self.sp;
        }
        self.exec_mode = mode;
    }

    fn cpu_state(&self) -> CpuState {
        self.cpu_state
    }

    fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    fn execute_frame(&mut self) {
        if self.quirks.instructions_per_frame == 0 {
            self.handle_timer();
            let start = Instant::now();
            loop {
                self.run_instructions(4870);
                if self.exec_mode == ExecMode::Paused
                    || start.elapsed() >= Duration::from_millis(16)
                {
                    break;
                }
            }
        } else {
            let left = self.calc_next_frame() - self.cycle_counter;
            if left == i64::from(self.quirks.instructions_per_frame) {
                self.handle_timer();
            }
            self.run_instructions(left as usize);
        }
    }

    fn execute_instruction(&mut self) -> i64 {
        self.step()
    }

    fn execute_instructions(&mut self, count: usize) {
        self.run_instructions(count);
    }

    fn frames(&self) -> i64 {
        self.frame_counter
    }

    fn cycles(&self) -> i64 {
        self.cycle_counter
    }

    fn frame_rate(&self) -> u32 {
        self.quirks.frame_rate
    }

    fn load_data(&mut self, data: &[u8], load_address: Option<u32>) -> Result<(), String> {
        let offset = load_address.unwrap_or(self.quirks.start_address) as usize;
        if offset >= self.memory.len() || data.len() > self.memory.len() - offset {
            return Err(format!(
                "program of {} bytes does not fit at 0x{offset:04X} in {} bytes of ram",
                data.len(),
                self.memory.len()
            ));
        }
        self.memory[offset..offset + data.len()].copy_from_slice(data);
        Ok(())
    }

    fn set_key_states(&mut self, keys: [bool; 16]) {
        self.keys = keys;
    }

    fn state(&self) -> Chip8State {
        Chip8State {
            v: self.v,
            i: self.i,
            pc: self.pc,
            sp: self.sp as u32,
            dt: self.dt,
            st: self.st,
            stack: self.stack,
        }
    }

    fn screen(&self) -> ScreenView<'_> {
        ScreenView {
            width: self.screen.width(),
            height: self.screen.height(),
            stride: self.screen.stride(),
            data: self.screen.data(),
            palette: self.screen.palette(),
        }
    }

    fn render_audio(&mut self, samples: &mut [i16], sample_rate: u32) {
        if self.is_megachip_mode && self.sample_length > 0 {
            for sample in samples {
                *sample = (i16::from(self.next_mc_sample()) - 128) * 256;
            }
        } else if self.st > 0 {
            if self.quirks.xo_chip_sound {
                let step = 4000.0 * 2f32.powf((f32::from(self.xo_pitch) - 64.0) / 48.0)
                    / 128.0
                    / sample_rate as f32;
                for sample in samples {
                    let pos = (self.wave_phase * 128.0).clamp(0.0, 127.0) as usize;
                    *sample = if self.xo_audio_pattern[pos >> 3] & (1 << (7 - (pos & 7))) != 0 {
                        16384
                    } else {
                        -16384
                    };
                    self.wave_phase = (self.wave_phase + step) % 1.0;
                }
            } else {
                let frequency = if self.base == Preset::Chip8X {
                    27535.0 / (f32::from(self.vp595_frequency) + 1.0)
                } else {
                    1531.555
                };
                let step = frequency / sample_rate as f32;
                for sample in samples {
                    *sample = if self.wave_phase > 0.5 { 16384 } else { -16384 };
                    self.wave_phase = (self.wave_phase + step) % 1.0;
                }
            }
        } else {
            self.wave_phase = 0.0;
            samples.fill(0);
        }
    }

    fn memory(&self) -> &[u8] {
        &self.memory
    }
}

impl ExecutionUnit for Chip8Generic {
    fn name(&self) -> &'static str {
        "chip-8"
    }

    fn cycles(&self) -> i64 {
        self.cycle_counter
    }

    fn pc(&self) -> u32 {
        self.pc
    }

    fn sp(&self) -> u32 {
        self.sp as u32
    }

    fn register_names(&self) -> &'static [&'static str] {
        REGISTER_NAMES
    }

    fn register(&self, index: usize) -> RegisterValue {
        let addr_size = if self.memory.len() > 0x10000 { 24 } else { 16 };
        match index {
            0..=15 => RegisterValue { value: u32::from(self.v[index]), size: 8 },
            16 => RegisterValue { value: self.i, size: addr_size },
            17 => RegisterValue { value: u32::from(self.dt), size: 8 },
            18 => RegisterValue { value: u32::from(self.st), size: 8 },
            19 => RegisterValue { value: self.pc, size: addr_size },
            20 => RegisterValue { value: self.sp as u32, size: 8 },
            _ => RegisterValue::default(),
        }
    }

    fn set_register(&mut self, index: usize, value: u32) {
        match index {
            0..=15 => self.v[index] = value as u8,
            16 => self.i = value & self.address_mask,
            17 => self.dt = value as u8,
            18 => self.st = value as u8,
            19 => self.pc = value & self.address_mask,
            20 => self.sp = (value & 0xFF) as usize,
            _ => {}
        }
    }

    fn in_error_state(&self) -> bool {
        self.cpu_state == CpuState::Error
    }

    fn memory_byte(&self, address: u32) -> u8 {
        self.read(address)
    }

    fn disassemble(&self, address: u32) -> Disassembled {
        let bytes = [
            self.read(address),
            self.read(address.wrapping_add(1)),
            self.read(address.wrapping_add(2)),
            self.read(address.wrapping_add(3)),
        ];
        disasm::disassemble(&bytes)
    }
}
