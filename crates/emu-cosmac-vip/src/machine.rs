//! The COSMAC VIP board.
//!
//! A CDP1802 at 1.76064 MHz, 2 or 4KB of RAM, a CDP1861 video generator, a
//! hex keypad behind an output latch and the Q line on a speaker. There is
//! no CHIP-8 interpreter in here: a 512-byte interpreter image is patched
//! into the bottom of RAM and runs on the emulated CPU, and the machine
//! projects the CHIP-8 register file out of the interpreter's scratchpad
//! registers and work area every time the backend passes the fetch-loop
//! entry. Without an interpreter the machine runs as a bare VIP and every
//! 1802 instruction is an execution boundary.

#![allow(clippy::cast_possible_truncation)]

use chip8_core::{
    Breakpoints, Chip8Core, Chip8State, CpuState, Disassembled, ExecMode, ExecutionUnit,
    RegisterValue, ScreenView, next_frame_boundary,
};
use rca_cdp1802::{Cdp1802, Cdp1802Bus};
use rca_cdp1861::Cdp1861;

use crate::options::CosmacVipOptions;

/// 262 lines of 14 machine cycles of 8 clocks, a 60 Hz field.
const FRAME_CYCLES: i64 = 8 * rca_cdp1861::CYCLES_PER_FRAME;
/// Address of the interpreter's fetch/decode loop; passing it means one
/// CHIP-8 instruction has completed.
const FETCH_LOOP_ENTRY: u16 = 0x001B;
/// No CHIP-8 instruction takes longer than this through the interpreter
/// (the key wait is the exception and is cut off here).
const INSTRUCTION_CYCLE_CAP: i64 = FRAME_CYCLES * 0x30;
/// An interpreter image that has not reached its fetch loop after this many
/// cycles is not going to.
const BOOT_CYCLE_CAP: i64 = FRAME_CYCLES * 120;
const CLOCK_FREQUENCY: i64 = 1_760_640;
/// Pitch of the ceramic buzzer on the Q line.
const BEEPER_FREQUENCY: f32 = 1400.0;

const REGISTER_NAMES: &[&str] = &[
    "V0", "V1", "V2", "V3", "V4", "V5", "V6", "V7", "V8", "V9", "VA", "VB", "VC", "VD", "VE",
    "VF", "I", "DT", "ST", "PC", "SP",
];

/// The address map and I/O seen by the CPU: RAM from $0000, the low page
/// aliased into the ROM window at $8000, the keypad latch on OUT 2 / EF3,
/// the 1861 display control on port 1. Anything else is open bus and gets
/// reported as a fault.
#[derive(Debug)]
struct Board {
    ram: Vec<u8>,
    keys: [bool; 16],
    key_latch: u8,
    /// Pending display on/off from the port 1 side effects, drained by the
    /// machine after the instruction that caused it.
    display_control: Option<bool>,
    /// The 1861 EF1 level, refreshed before every instruction.
    ef1: bool,
    fault: Option<u16>,
}

impl Cdp1802Bus for Board {
    fn read_byte(&mut self, addr: u16) -> u8 {
        if (addr as usize) < self.ram.len() {
            return self.ram[addr as usize];
        }
        if addr >= 0x8000 {
            // A15 is not decoded on the stock board; the ROM window shows
            // the low page
            return self.ram[(addr & 0x1FF) as usize];
        }
        self.fault.get_or_insert(addr);
        0
    }

    fn read_byte_dma(&self, addr: u16) -> u8 {
        if (addr as usize) < self.ram.len() {
            return self.ram[addr as usize];
        }
        if addr >= 0x8000 {
            return self.ram[(addr & 0x1FF) as usize];
        }
        0
    }

    fn write_byte(&mut self, addr: u16, value: u8) {
        if (addr as usize) < self.ram.len() {
            self.ram[addr as usize] = value;
        } else if addr < 0x8000 {
            self.fault.get_or_insert(addr);
        }
        // writes into the ROM window are dropped
    }

    fn output(&mut self, port: u8, value: u8) {
        match port {
            1 => self.display_control = Some(false),
            2 => self.key_latch = value & 0xF,
            _ => {}
        }
    }

    fn input(&mut self, port: u8) -> u8 {
        if port == 1 {
            self.display_control = Some(true);
        }
        0
    }

    fn ef(&mut self, line: u8) -> bool {
        match line {
            0 => self.ef1,
            // EF3 reads the key selected by the OUT 2 latch
            2 => self.keys[self.key_latch as usize],
            // tape input and the unused flag read deasserted
            _ => false,
        }
    }
}

/// The machine. `patch_interpreter` installs an interpreter image and boots
/// it up to the fetch loop; without one the VIP runs raw 1802 programs.
pub struct CosmacVip {
    options: CosmacVipOptions,
    cpu: Cdp1802,
    board: Board,
    video: Cdp1861,
    interpreter: Option<Vec<u8>>,
    state: Chip8State,
    cycle_counter: i64,
    exec_mode: ExecMode,
    cpu_state: CpuState,
    error_message: Option<String>,
    step_over_sp: u32,
    breakpoints: Breakpoints,
    keys: [bool; 16],
    last_fetch_frame: i64,
    wave_phase: f32,
}

impl CosmacVip {
    pub fn new(options: CosmacVipOptions) -> Result<Self, String> {
        if options.ram_size != 2048 && options.ram_size != 4096 {
            return Err(format!("unsupported ram size {} (2048 or 4096)", options.ram_size));
        }
        if u32::from(options.start_address) >= options.ram_size {
            return Err(format!(
                "start address 0x{:04X} outside {} bytes of ram",
                options.start_address, options.ram_size
            ));
        }
        let mut machine = Self {
            options,
            cpu: Cdp1802::new(),
            board: Board {
                ram: vec![0; options.ram_size as usize],
                keys: [false; 16],
                key_latch: 0,
                display_control: None,
                ef1: false,
                fault: None,
            },
            video: Cdp1861::new(),
            interpreter: None,
            state: Chip8State::default(),
            cycle_counter: 0,
            exec_mode: ExecMode::Running,
            cpu_state: CpuState::Normal,
            error_message: None,
            step_over_sp: 0,
            breakpoints: Breakpoints::new(),
            keys: [false; 16],
            last_fetch_frame: 0,
            wave_phase: 0.0,
        };
        machine.reset_state();
        Ok(machine)
    }

    /// Installs a CHIP-8 interpreter image at $0000 and reboots into its
    /// fetch loop. The image must fit below the program area.
    pub fn patch_interpreter(&mut self, image: &[u8]) -> Result<(), String> {
        if image.is_empty() || image.len() > 0x200 {
            return Err(format!(
                "interpreter image of {} bytes does not fit below the program area",
                image.len()
            ));
        }
        self.interpreter = Some(image.to_vec());
        self.reset_state();
        if self.cpu_state == CpuState::Error {
            let message =
                self.error_message.clone().unwrap_or_else(|| "interpreter image failed to boot".into());
            self.interpreter = None;
            self.reset_state();
            return Err(message);
        }
        Ok(())
    }

    #[must_use]
    pub fn options(&self) -> &CosmacVipOptions {
        &self.options
    }

    /// The CDP1802 running the show, for inspection.
    #[must_use]
    pub fn backend(&self) -> &Cdp1802 {
        &self.cpu
    }

    /// Machine cycles (not CHIP-8 instructions) since power-on.
    #[must_use]
    pub fn machine_cycles(&self) -> i64 {
        self.cpu.cycles()
    }

    #[must_use]
    pub fn is_display_enabled(&self) -> bool {
        self.video.is_display_enabled()
    }

    #[must_use]
    pub fn breakpoints(&self) -> &Breakpoints {
        &self.breakpoints
    }

    pub fn breakpoints_mut(&mut self) -> &mut Breakpoints {
        &mut self.breakpoints
    }

    /// Runs until `micros` of machine time has elapsed; returns the unused
    /// remainder (negative when the last instruction overshot).
    pub fn execute_for(&mut self, micros: i64) -> i64 {
        if self.exec_mode == ExecMode::Paused {
            return 0;
        }
        let end = self.cpu.cycles() + micros * CLOCK_FREQUENCY / 1_000_000;
        while self.exec_mode != ExecMode::Paused && self.cpu.cycles() < end {
            self.step();
        }
        (end - self.cpu.cycles()) * 1_000_000 / CLOCK_FREQUENCY
    }

    /// First byte of the interpreter work area: V0-VF sit in the 16 bytes
    /// below the display page.
    fn v_base(&self) -> usize {
        self.board.ram.len() - 0x110
    }

    /// Initial value of the interpreter's stack pointer R2; call frames are
    /// pushed downward from here, two bytes each.
    fn stack_base(&self) -> usize {
        self.v_base() - 0x21
    }

    /// Highest address a CHIP-8 program may reach before it runs into the
    /// interpreter's stack.
    fn load_limit(&self) -> usize {
        self.stack_base() - 0x1F
    }

    /// Boot sequence: noise-fill (or clear) the RAM, patch the interpreter
    /// image back in and run it until it settles in the fetch loop with the
    /// CHIP-8 PC at the program start.
    fn reset_state(&mut self) {
        if self.options.clean_ram {
            self.board.ram.fill(0);
        } else {
            // power-on DRAM pattern, the same every run
            let mut noise = 42u32;
            for byte in &mut self.board.ram {
                *byte = lcg_noise(&mut noise);
            }
        }
        if let Some(image) = &self.interpreter {
            self.board.ram[..image.len()].copy_from_slice(image);
        }
        self.board.key_latch = 0;
        self.board.display_control = None;
        self.board.ef1 = false;
        self.board.fault = None;
        self.board.keys = self.keys;
        self.video.reset();
        self.cpu.reset();
        self.state = Chip8State::default();
        self.cycle_counter = 0;
        self.last_fetch_frame = 0;
        self.exec_mode = ExecMode::Running;
        self.cpu_state = CpuState::Normal;
        self.error_message = None;
        if self.interpreter.is_some() {
            while self.cpu_state == CpuState::Normal && !self.step_backend() {
                if self.cpu.cycles() >= BOOT_CYCLE_CAP {
                    self.exec_mode = ExecMode::Paused;
                    self.cpu_state = CpuState::Error;
                    self.error_message =
                        Some("interpreter image never reached the fetch loop".into());
                    return;
                }
            }
            if self.cpu_state == CpuState::Normal
                && self.state.pc != u32::from(self.options.start_address)
            {
                self.state.pc = u32::from(self.options.start_address);
                self.force_state();
            }
            self.cycle_counter = 0;
            self.exec_mode = ExecMode::Running;
        }
    }

    /// One backend instruction. Returns true at an execution boundary: the
    /// fetch-loop entry with an interpreter installed, every instruction
    /// without one.
    fn step_backend(&mut self) -> bool {
        self.video.execute_step(&mut self.cpu, &mut self.board);
        self.board.ef1 = self.video.nefx();
        self.cpu.execute_instruction(&mut self.board);
        if let Some(on) = self.board.display_control.take() {
            if on {
                self.video.enable_display();
            } else {
                self.video.disable_display();
            }
        }
        if let Some(addr) = self.board.fault.take() {
            self.exec_mode = ExecMode::Paused;
            self.cpu_state = CpuState::Error;
            self.error_message = Some(format!("bus access outside the memory map at ${addr:04X}"));
            return false;
        }
        if self.cpu.cpu_state() == CpuState::Error {
            self.exec_mode = ExecMode::Paused;
            self.cpu_state = CpuState::Error;
            self.error_message = self.cpu.error_message().map(str::to_owned);
            return false;
        }
        if self.interpreter.is_none() {
            self.cycle_counter += 1;
            if matches!(self.exec_mode, ExecMode::Step | ExecMode::StepOver) {
                self.exec_mode = ExecMode::Paused;
            }
            if self.breakpoints.hit(u32::from(self.cpu.pc())).is_some() {
                self.exec_mode = ExecMode::Paused;
            }
            return true;
        }
        if self.cpu.pc() == FETCH_LOOP_ENTRY {
            self.fetch_state();
            self.cycle_counter += 1;
            if self.exec_mode == ExecMode::Step
                || (self.exec_mode == ExecMode::StepOver && self.state.sp <= self.step_over_sp)
            {
                self.exec_mode = ExecMode::Paused;
            }
            let opcode = self.opcode();
            let new_frame = self.video.frames() > self.last_fetch_frame;
            self.last_fetch_frame = self.video.frames();
            if new_frame
                && opcode & 0xF000 == 0x1000
                && u32::from(opcode & 0xFFF) == self.state.pc
            {
                // spinning on a jump-to-self; stop at the frame boundary
                self.exec_mode = ExecMode::Paused;
            }
            if self.breakpoints.hit(self.state.pc).is_some() {
                self.exec_mode = ExecMode::Paused;
            }
            return true;
        }
        false
    }

    /// One CHIP-8 instruction: backend instructions until the fetch loop
    /// comes around again, capped for instructions that never complete.
    fn step(&mut self) -> i64 {
        if self.exec_mode == ExecMode::Paused || self.cpu_state == CpuState::Error {
            self.exec_mode = ExecMode::Paused;
            return 0;
        }
        let start = self.cpu.cycles();
        while !self.step_backend()
            && self.exec_mode != ExecMode::Paused
            && self.cpu.cycles() - start < INSTRUCTION_CYCLE_CAP
        {}
        self.cpu.cycles() - start
    }

    /// The CHIP-8 opcode at the projected PC.
    fn opcode(&self) -> u16 {
        let pc = self.state.pc as u16;
        (u16::from(self.board.read_byte_dma(pc)) << 8)
            | u16::from(self.board.read_byte_dma(pc.wrapping_add(1)))
    }

    /// Reads the CHIP-8 register file out of the interpreter's scratchpad
    /// registers and work area: R5 is the program counter, RA the index,
    /// R8 holds both timers, R2 walks the call stack below the variables.
    fn fetch_state(&mut self) {
        let cpu = self.cpu.state();
        let v_base = self.v_base();
        self.state.v.copy_from_slice(&self.board.ram[v_base..v_base + 16]);
        self.state.i = u32::from(cpu.r[0xA]) & 0xFFF;
        self.state.pc = u32::from(cpu.r[5]) & 0xFFF;
        self.state.dt = (cpu.r[8] >> 8) as u8;
        self.state.st = (cpu.r[8] & 0xFF) as u8;
        let base = self.stack_base();
        self.state.sp = ((base as i32 - i32::from(cpu.r[2])) >> 1).max(0) as u32;
        for n in 0..(self.state.sp.min(16) as usize) {
            self.state.stack[n] = (u16::from(self.board.ram[base - n * 2 - 1]) << 8)
                | u16::from(self.board.ram[base - n * 2]);
        }
    }

    /// Writes the projected register file back, for debugger edits.
    fn force_state(&mut self) {
        let v_base = self.v_base();
        let base = self.stack_base();
        self.board.ram[v_base..v_base + 16].copy_from_slice(&self.state.v);
        for n in 0..(self.state.sp.min(16) as usize) {
            self.board.ram[base - n * 2 - 1] = (self.state.stack[n] >> 8) as u8;
            self.board.ram[base - n * 2] = self.state.stack[n] as u8;
        }
        let mut cpu = self.cpu.state();
        cpu.r[0xA] = self.state.i as u16;
        cpu.r[5] = self.state.pc as u16;
        cpu.r[8] = (u16::from(self.state.dt) << 8) | u16::from(self.state.st);
        cpu.r[2] = (base - self.state.sp as usize * 2) as u16;
        self.cpu.set_state(&cpu);
    }
}

impl Chip8Core for CosmacVip {
    fn core_name(&self) -> &'static str {
        "COSMAC-VIP"
    }

    fn reset(&mut self) {
        self.reset_state();
    }

    fn exec_mode(&self) -> ExecMode {
        self.exec_mode
    }

    fn set_exec_mode(&mut self, mode: ExecMode) {
        if mode == ExecMode::StepOver {
            self.step_over_sp = self.state.sp;
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
        if self.exec_mode == ExecMode::Paused || self.cpu_state == CpuState::Error {
            self.exec_mode = ExecMode::Paused;
            return;
        }
        let next = next_frame_boundary(self.cpu.cycles(), FRAME_CYCLES);
        while self.exec_mode != ExecMode::Paused && self.cpu.cycles() < next {
            self.step_backend();
        }
    }

    fn execute_instruction(&mut self) -> i64 {
        self.step()
    }

    fn frames(&self) -> i64 {
        self.video.frames()
    }

    fn cycles(&self) -> i64 {
        self.cycle_counter
    }

    fn frame_rate(&self) -> u32 {
        60
    }

    fn load_data(&mut self, data: &[u8], load_address: Option<u32>) -> Result<(), String> {
        let offset = load_address.unwrap_or(u32::from(self.options.start_address)) as usize;
        // bare 1802 programs may use all of RAM; CHIP-8 programs stop below
        // the interpreter's stack
        let limit =
            if self.interpreter.is_some() { self.load_limit() } else { self.board.ram.len() };
        if offset >= limit || data.len() > limit - offset {
            return Err(format!(
                "program of {} bytes does not fit at 0x{offset:04X} below 0x{limit:04X}",
                data.len()
            ));
        }
        self.board.ram[offset..offset + data.len()].copy_from_slice(data);
        Ok(())
    }

    fn set_key_states(&mut self, keys: [bool; 16]) {
        // the keypad switches are wired straight to the latch selector, no
        // per-frame sampling in hardware
        self.keys = keys;
        self.board.keys = keys;
    }

    fn state(&self) -> Chip8State {
        self.state
    }

    fn screen(&self) -> ScreenView<'_> {
        let screen = self.video.screen();
        ScreenView {
            width: screen.width(),
            height: screen.height(),
            stride: screen.stride(),
            data: screen.data(),
            palette: screen.palette(),
        }
    }

    fn render_audio(&mut self, samples: &mut [i16], sample_rate: u32) {
        if self.cpu.q() {
            let step = BEEPER_FREQUENCY / sample_rate as f32;
            for sample in samples {
                *sample = if self.wave_phase > 0.5 { 16384 } else { -16384 };
                self.wave_phase = (self.wave_phase + step) % 1.0;
            }
        } else {
            samples.fill(0);
        }
    }

    fn memory(&self) -> &[u8] {
        &self.board.ram
    }
}

impl ExecutionUnit for CosmacVip {
    fn name(&self) -> &'static str {
        "chip-8"
    }

    fn cycles(&self) -> i64 {
        self.cycle_counter
    }

    fn pc(&self) -> u32 {
        self.state.pc
    }

    fn sp(&self) -> u32 {
        self.state.sp
    }

    fn register_names(&self) -> &'static [&'static str] {
        REGISTER_NAMES
    }

    fn register(&self, index: usize) -> RegisterValue {
        match index {
            0..=15 => RegisterValue { value: u32::from(self.state.v[index]), size: 8 },
            16 => RegisterValue { value: self.state.i, size: 16 },
            17 => RegisterValue { value: u32::from(self.state.dt), size: 8 },
            18 => RegisterValue { value: u32::from(self.state.st), size: 8 },
            19 => RegisterValue { value: self.state.pc, size: 16 },
            20 => RegisterValue { value: self.state.sp, size: 8 },
            _ => RegisterValue::default(),
        }
    }

    fn set_register(&mut self, index: usize, value: u32) {
        match index {
            0..=15 => self.state.v[index] = value as u8,
            16 => self.state.i = value & 0xFFF,
            17 => self.state.dt = value as u8,
            18 => self.state.st = value as u8,
            19 => self.state.pc = value & 0xFFF,
            20 => self.state.sp = value & 0xF,
            _ => return,
        }
        self.force_state();
    }

    fn in_error_state(&self) -> bool {
        self.cpu_state == CpuState::Error
    }

    fn memory_byte(&self, address: u32) -> u8 {
        self.board.read_byte_dma(address as u16)
    }

    fn disassemble(&self, address: u32) -> Disassembled {
        let bytes = [
            self.memory_byte(address),
            self.memory_byte(address.wrapping_add(1)),
            self.memory_byte(address.wrapping_add(2)),
            self.memory_byte(address.wrapping_add(3)),
        ];
        chip8_generic::disassemble(&bytes)
    }
}

/// The power-on RAM pattern generator.
fn lcg_noise(state: &mut u32) -> u8 {
    *state = state.wrapping_mul(1_103_515_245).wrapping_add(12345) & 0x7FFF_FFFF;
    (*state >> 16) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine() -> CosmacVip {
        CosmacVip::new(CosmacVipOptions::default()).unwrap()
    }

    // minimal interpreter that just spins at the fetch-loop entry; enough
    // for boot and load-limit behavior
    const SPIN_IMAGE: &[u8] = &[
        0x71, 0x00, // DIS
        0xF8, 0x00, 0xB4, // R4.1 = 00
        0xF8, 0x1B, 0xA4, // R4.0 = 1B
        0xD4, // SEP R4
        0xC4, 0xC4, 0xC4, 0xC4, 0xC4, 0xC4, 0xC4, 0xC4, 0xC4, // pad to 001B
        0xC4, 0xC4, 0xC4, 0xC4, 0xC4, 0xC4, 0xC4, 0xC4, 0xC4,
        0x30, 0x1B, // 001B: BR 001B
    ];

    #[test]
    fn the_rom_window_aliases_the_low_page() {
        let mut m = machine();
        m.board.ram[0x055] = 0x77;
        m.board.ram[0x1FF] = 0x12;
        assert_eq!(m.board.read_byte_dma(0x8055), 0x77);
        assert_eq!(m.board.read_byte_dma(0xFFFF), 0x12);
        assert_eq!(m.board.read_byte(0x8055), 0x77);
        assert!(m.board.fault.is_none());
    }

    #[test]
    fn unmapped_bus_access_is_a_fault() {
        let mut m = machine();
        // SEX R3; LDX with R3 pointing between RAM and the ROM window
        m.board.ram[..2].copy_from_slice(&[0xE3, 0xF0]);
        let mut cpu = m.cpu.state();
        cpu.r[3] = 0x5000;
        m.cpu.set_state(&cpu);
        m.step_backend();
        m.step_backend();
        assert_eq!(m.cpu_state, CpuState::Error);
        assert!(m.error_message.as_deref().unwrap().contains("$5000"));
        assert_eq!(m.exec_mode, ExecMode::Paused);
    }

    #[test]
    fn work_area_projection_uses_the_scratchpad_registers() {
        let mut m = machine();
        m.board.ram[0x0EF0..0x0F00].copy_from_slice(&[
            1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16,
        ]);
        let mut cpu = m.cpu.state();
        cpu.r[0xA] = 0x345;
        cpu.r[5] = 0x220;
        cpu.r[8] = 0x0904;
        cpu.r[2] = 0x0ECB; // two return addresses pushed from 0x0ECF
        m.cpu.set_state(&cpu);
        m.board.ram[0x0ECE] = 0x02;
        m.board.ram[0x0ECF] = 0x08;
        m.board.ram[0x0ECC] = 0x02;
        m.board.ram[0x0ECD] = 0x30;
        m.fetch_state();
        assert_eq!(m.state.v[0], 1);
        assert_eq!(m.state.v[0xF], 16);
        assert_eq!(m.state.i, 0x345);
        assert_eq!(m.state.pc, 0x220);
        assert_eq!(m.state.dt, 9);
        assert_eq!(m.state.st, 4);
        assert_eq!(m.state.sp, 2);
        assert_eq!(m.state.stack[0], 0x208);
        assert_eq!(m.state.stack[1], 0x230);
    }

    #[test]
    fn force_state_round_trips_through_the_backend() {
        let mut m = machine();
        m.state.v[3] = 0x77;
        m.state.i = 0x2F0;
        m.state.pc = 0x256;
        m.state.sp = 1;
        m.state.stack[0] = 0x204;
        m.state.dt = 2;
        m.state.st = 0;
        m.force_state();
        let saved = m.state;
        m.state = Chip8State::default();
        m.fetch_state();
        assert_eq!(m.state, saved);
    }

    #[test]
    fn load_data_stops_below_the_interpreter_stack() {
        let mut m = machine();
        m.patch_interpreter(SPIN_IMAGE).unwrap();
        // 4K layout: stack base 0x0ECF, programs end below 0x0EB0
        let fits = vec![0xAA; 0x0EB0 - 0x200];
        assert!(m.load_data(&fits, None).is_ok());
        let too_big = vec![0xAA; 0x0EB0 - 0x200 + 1];
        let before = m.board.ram[0x200];
        assert!(m.load_data(&too_big, None).is_err());
        assert_eq!(m.board.ram[0x200], before);
    }

    #[test]
    fn a_bare_machine_loads_anywhere_in_ram() {
        let mut m = machine();
        let raw = vec![0u8; 4096];
        assert!(m.load_data(&[0x30, 0x00], Some(0)).is_ok());
        assert!(m.load_data(&raw, Some(0)).is_ok());
        assert!(m.load_data(&[0], Some(4096)).is_err());
    }

    #[test]
    fn a_rejected_interpreter_leaves_the_machine_bare() {
        let mut m = machine();
        let too_big = vec![0; 0x201];
        assert!(m.patch_interpreter(&too_big).is_err());
        assert!(m.interpreter.is_none());
        // all zeros is IDL forever; the fetch loop never comes
        let idle = vec![0; 0x200];
        assert!(m.patch_interpreter(&idle).is_err());
        assert!(m.interpreter.is_none());
        assert_eq!(m.cpu_state, CpuState::Normal);
    }

    #[test]
    fn the_q_line_gates_the_beeper() {
        let mut m = machine();
        m.cpu.set_register(24, 1); // Q
        let mut samples = [0i16; 64];
        m.render_audio(&mut samples, 48_000);
        assert_eq!(samples[0], -16384);
        assert!(samples.contains(&16384));
        assert!(samples.iter().all(|&s| s == 16384 || s == -16384));

        m.cpu.set_register(24, 0);
        m.render_audio(&mut samples, 48_000);
        assert!(samples.iter().all(|&s| s == 0));
    }

    #[test]
    fn the_power_on_ram_pattern_is_reproducible() {
        let a = machine();
        let b = machine();
        assert_eq!(a.board.ram, b.board.ram);
        assert!(a.board.ram.iter().any(|&x| x != 0));

        let clean =
            CosmacVip::new(CosmacVipOptions { clean_ram: true, ..CosmacVipOptions::default() })
                .unwrap();
        assert!(clean.board.ram.iter().all(|&x| x == 0));
    }
}
