//! The DREAM6800 board.
//!
//! An M6800 at 1 MHz, 2 or 4KB of RAM, a 1KB monitor ROM at $C000 and an
//! MC6821 PIA wired to a 4x4 hex keypad and the speaker. There is no CHIP-8
//! interpreter in here: the machine runs the real CHIPOS image and projects
//! the CHIP-8 register file out of the zero page every time the backend
//! passes the interpreter's fetch-loop entry, so programs see the timing,
//! quirks and bugs of the real board.

#![allow(clippy::cast_possible_truncation)]

use chip8_core::{
    Breakpoints, Chip8Core, Chip8State, CpuState, Disassembled, ExecMode, ExecutionUnit,
    RegisterValue, ScreenView, VideoScreen, next_frame_boundary,
};
use motorola_6800::{M6800, M6800Bus};
use motorola_pia_6821::{Pia6821, Pia6821Io, PortInput};

use crate::keymatrix::KeyMatrix;
use crate::options::Dream6800Options;

/// 312 lines of 64 machine cycles at 1 MHz, a 50.08 Hz field.
const FRAME_CYCLES: i64 = 19968;
/// The CPU is off the bus while the VDG fetches the visible lines.
const VDG_STALL_CYCLES: i64 = 128 * 64;
/// CHIPOS address of the fetch/decode loop; passing it means one CHIP-8
/// instruction has completed.
const FETCH_LOOP_ENTRY: u16 = 0xC00C;
/// No CHIP-8 instruction takes longer than this through CHIPOS (the key
/// wait is the exception and is cut off here).
const INSTRUCTION_CYCLE_CAP: i64 = FRAME_CYCLES * 0x30;
const CLOCK_FREQUENCY: i64 = 1_000_000;

const REGISTER_NAMES: &[&str] = &[
    "V0", "V1", "V2", "V3", "V4", "V5", "V6", "V7", "V8", "V9", "VA", "VB", "VC", "VD", "VE",
    "VF", "I", "DT", "ST", "PC", "SP",
];

/// Everything on the peripheral side of the PIA.
#[derive(Debug)]
struct Peripherals {
    matrix: KeyMatrix<4, 4>,
    sound_enabled: bool,
    low_freq: bool,
    irq: bool,
}

impl Default for Peripherals {
    fn default() -> Self {
        // the frequency select line is strapped low on the shipped board
        Self { matrix: KeyMatrix::new(), sound_enabled: false, low_freq: true, irq: false }
    }
}

impl Pia6821Io for Peripherals {
    fn port_a_input(&mut self, mask: u8) -> PortInput {
        // PA0-PA3 are the keypad columns, PA4-PA7 the rows
        if mask & 0xF != 0 {
            let strobe = self.matrix.cols(u16::from(mask & 0xF));
            return PortInput {
                value: strobe.value as u8 & mask,
                connections: strobe.connections as u8 & mask,
            };
        }
        if mask & 0xF0 != 0 {
            let strobe = self.matrix.rows(u16::from(mask >> 4));
            return PortInput {
                value: ((strobe.value as u8) << 4) & mask,
                connections: ((strobe.connections as u8) << 4) & mask,
            };
        }
        PortInput::default()
    }

    fn ca1_input(&mut self) -> Option<bool> {
        // any-key-down line: a column pulled away from its pulled-up idle
        // level means some switch conducts
        let strobe = self.matrix.cols(0xF);
        Some(((strobe.value & strobe.connections) | !strobe.connections) & 0xF != 0xF)
    }

    fn port_a_output(&mut self, data: u8, mask: u8) {
        self.matrix.set_cols(u16::from(data & 0xF), u16::from(mask & 0xF));
        self.matrix.set_rows(u16::from(data >> 4), u16::from(mask >> 4));
    }

    fn port_b_output(&mut self, data: u8, mask: u8) {
        // PB6 gates the speaker
        if mask & 0x40 != 0 {
            self.sound_enabled = data & 0x40 != 0;
        }
    }

    fn irq_a(&mut self, level: bool) {
        if !level {
            self.irq = true;
        }
    }

    fn irq_b(&mut self, level: bool) {
        if !level {
            self.irq = true;
        }
    }
}

/// The address map seen by the CPU: RAM from $0000, the PIA at $8010-$801F,
/// the ROM at $C000 mirrored to the top. Anything else is open bus and gets
/// reported as a fault.
#[derive(Debug)]
struct Bus {
    ram: Vec<u8>,
    rom: [u8; 1024],
    pia: Pia6821,
    io: Peripherals,
    fault: Option<u16>,
}

impl M6800Bus for Bus {
    fn read_byte(&mut self, addr: u16) -> u8 {
        if (addr as usize) < self.ram.len() {
            return self.ram[addr as usize];
        }
        if (0x8010..0x8020).contains(&addr) {
            return self.pia.read(addr & 3, &mut self.io);
        }
        if addr >= 0xC000 {
            return self.rom[(addr & 0x3FF) as usize];
        }
        self.fault.get_or_insert(addr);
        0
    }

    fn write_byte(&mut self, addr: u16, value: u8) {
        if (addr as usize) < self.ram.len() {
            self.ram[addr as usize] = value;
        } else if (0x8010..0x8020).contains(&addr) {
            self.pia.write(addr & 3, value, &mut self.io);
        } else {
            self.fault.get_or_insert(addr);
        }
    }

    fn read_debug_byte(&self, addr: u16) -> u8 {
        if (addr as usize) < self.ram.len() {
            return self.ram[addr as usize];
        }
        if (0x8010..0x8020).contains(&addr) {
            return self.pia.read_debug(addr & 3);
        }
        if addr >= 0xC000 {
            return self.rom[(addr & 0x3FF) as usize];
        }
        0
    }
}

/// The machine. Construction boots CHIPOS up to the fetch loop, so a new
/// instance is ready for `load_data` and `execute_frame`.
pub struct Dream6800 {
    options: Dream6800Options,
    cpu: M6800,
    bus: Bus,
    state: Chip8State,
    cycle_counter: i64,
    frame_counter: i64,
    exec_mode: ExecMode,
    cpu_state: CpuState,
    error_message: Option<String>,
    step_over_sp: u32,
    breakpoints: Breakpoints,
    screen: VideoScreen<64, 128>,
    keys: [bool; 16],
    last_vdg_cycle: i64,
    last_fetch_cycle: i64,
    wave_phase: f32,
}

impl Dream6800 {
    pub fn new(options: Dream6800Options) -> Result<Self, String> {
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
            cpu: M6800::new(),
            bus: Bus {
                ram: vec![0; options.ram_size as usize],
                rom: *options.rom.image(),
                pia: Pia6821::new(),
                io: Peripherals::default(),
                fault: None,
            },
            state: Chip8State::default(),
            cycle_counter: 0,
            frame_counter: 0,
            exec_mode: ExecMode::Running,
            cpu_state: CpuState::Normal,
            error_message: None,
            step_over_sp: 0,
            breakpoints: Breakpoints::new(),
            screen: VideoScreen::new(),
            keys: [false; 16],
            last_vdg_cycle: FRAME_CYCLES + 1,
            last_fetch_cycle: 0,
            wave_phase: 0.0,
        };
        machine.reset_state();
        if machine.cpu_state == CpuState::Error {
            return Err(machine
                .error_message
                .clone()
                .unwrap_or_else(|| "monitor rom failed to boot".into()));
        }
        Ok(machine)
    }

    #[must_use]
    pub fn options(&self) -> &Dream6800Options {
        &self.options
    }

    /// The M6800 running the show, for inspection.
    #[must_use]
    pub fn backend(&self) -> &M6800 {
        &self.cpu
    }

    /// Machine cycles (not CHIP-8 instructions) since power-on.
    #[must_use]
    pub fn machine_cycles(&self) -> i64 {
        self.cpu.cycles()
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

    fn frame_cycle(&self) -> i64 {
        self.cpu.cycles() % FRAME_CYCLES
    }

    /// Boot sequence: noise-fill (or clear) the RAM, run the monitor's cold
    /// start until it unmasks interrupts, then restart it at the CHIP-8
    /// entry point and fast-forward into the fetch loop with the CHIP-8 PC
    /// at 0x200.
    fn reset_state(&mut self) {
        if self.options.clean_ram {
            self.bus.ram.fill(0);
        } else {
            // power-on DRAM pattern, the same every run
            let mut state = 42u32;
            for byte in &mut self.bus.ram {
                *byte = lcg_noise(&mut state);
            }
        }
        self.screen.set_all(0);
        self.bus.fault = None;
        self.cpu.reset(&mut self.bus);
        self.bus.ram[0x006] = 0xC0;
        self.bus.ram[0x007] = 0x00;
        self.exec_mode = ExecMode::Running;
        self.cpu_state = CpuState::Normal;
        self.error_message = None;
        self.last_vdg_cycle = FRAME_CYCLES + 1;
        self.last_fetch_cycle = 0;
        while self.cpu_state == CpuState::Normal
            && !self.step_backend()
            && self.cpu.state().cc & motorola_6800::I != 0
        {}
        self.flush_screen();
        self.bus.ram[0x026] = 0;
        self.bus.ram[0x027] = 0;
        self.bus.ram[0x30..0x40].fill(0);
        let mut cpu_state = self.cpu.state();
        cpu_state.pc = 0xC000;
        cpu_state.sp = 0x007F;
        self.cpu.set_state(&cpu_state);
        self.cycle_counter = 0;
        self.frame_counter = 0;
        while self.cpu_state == CpuState::Normal
            && !(self.step_backend() && self.state.pc == 0x200)
        {}
        self.exec_mode = ExecMode::Running;
    }

    /// Renders the framebuffer at $0100-$01FF; each CHIP-8 row covers four
    /// scanlines of the 64x128 raster.
    fn flush_screen(&mut self) {
        for y in 0..128 {
            for i in 0..8 {
                let data = self.bus.ram[0x100 + (y >> 2) * 8 + i];
                for j in 0..8 {
                    self.screen.set_pixel(i * 8 + j, y, (data >> (7 - j)) & 1);
                }
            }
        }
    }

    /// Advances the VDG alongside the CPU cycle counter. On every frame
    /// wrap the screen is presented, the CPU is stalled for the visible
    /// lines, CB1 gets the vsync pulse (which raises the 50 Hz interrupt)
    /// and the key matrix latches the host key state.
    fn run_vdg(&mut self) -> i64 {
        let fc = self.frame_cycle();
        if fc < self.last_vdg_cycle {
            self.flush_screen();
            self.cpu.add_cycles(VDG_STALL_CYCLES);
            self.frame_counter += 1;
            self.bus.pia.set_cb1(true, &mut self.bus.io);
            self.bus.pia.set_cb1(false, &mut self.bus.io);
            self.bus.io.matrix.set_keys(&self.keys);
        }
        self.last_vdg_cycle = fc;
        fc
    }

    /// One backend instruction. Returns true when the backend passed the
    /// fetch-loop entry, i.e. a CHIP-8 instruction boundary.
    fn step_backend(&mut self) -> bool {
        let fc = self.run_vdg();
        if self.bus.io.irq {
            self.bus.io.irq = false;
            self.cpu.irq();
        }
        self.cpu.execute_instruction(&mut self.bus);
        if let Some(addr) = self.bus.fault.take() {
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
        if self.cpu.pc() == FETCH_LOOP_ENTRY {
            self.fetch_state();
            self.cycle_counter += 1;
            if self.exec_mode == ExecMode::Step
                || (self.exec_mode == ExecMode::StepOver && self.state.sp <= self.step_over_sp)
            {
                self.exec_mode = ExecMode::Paused;
            }
            let opcode = self.opcode();
            let new_frame = self.last_fetch_cycle > fc;
            self.last_fetch_cycle = fc;
            if new_frame
                && opcode & 0xF000 == 0x1000
                && u32::from(opcode & 0xFFF) == self.state.pc
            {
                // spinning on a jump-to-self; present the frame and stop
                self.flush_screen();
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
        (u16::from(self.bus.read_debug_byte(pc)) << 8)
            | u16::from(self.bus.read_debug_byte(pc.wrapping_add(1)))
    }

    /// Reads the CHIP-8 register file out of the CHIPOS zero page.
    fn fetch_state(&mut self) {
        let ram = &self.bus.ram;
        self.state.v.copy_from_slice(&ram[0x30..0x40]);
        self.state.i = (u32::from(ram[0x26]) << 8) | u32::from(ram[0x27]);
        self.state.pc = (u32::from(ram[0x22]) << 8) | u32::from(ram[0x23]);
        let stack_ptr = (i32::from(ram[0x24]) << 8) | i32::from(ram[0x25]);
        self.state.sp = ((0x5F - stack_ptr) >> 1).max(0) as u32;
        self.state.dt = ram[0x20];
        self.state.st = ram[0x21];
        for n in 0..(self.state.sp.min(16) as usize) {
            self.state.stack[n] =
                (u16::from(ram[0x5F - n * 2 - 1]) << 8) | u16::from(ram[0x5F - n * 2]);
        }
    }

    /// Writes the projected register file back, for debugger edits.
    fn force_state(&mut self) {
        let ram = &mut self.bus.ram;
        ram[0x30..0x40].copy_from_slice(&self.state.v);
        ram[0x26] = (self.state.i >> 8) as u8;
        ram[0x27] = self.state.i as u8;
        ram[0x22] = (self.state.pc >> 8) as u8;
        ram[0x23] = self.state.pc as u8;
        let stack_ptr = 0x5F - self.state.sp as usize * 2;
        ram[0x24] = (stack_ptr >> 8) as u8;
        ram[0x25] = stack_ptr as u8;
        ram[0x20] = self.state.dt;
        ram[0x21] = self.state.st;
        for n in 0..(self.state.sp.min(16) as usize) {
            ram[0x5F - n * 2 - 1] = (self.state.stack[n] >> 8) as u8;
            ram[0x5F - n * 2] = self.state.stack[n] as u8;
        }
    }
}

impl Chip8Core for Dream6800 {
    fn core_name(&self) -> &'static str {
        "DREAM6800"
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
        self.frame_counter
    }

    fn cycles(&self) -> i64 {
        self.cycle_counter
    }

    fn frame_rate(&self) -> u32 {
        50
    }

    fn load_data(&mut self, data: &[u8], load_address: Option<u32>) -> Result<(), String> {
        let offset = load_address.unwrap_or(u32::from(self.options.start_address)) as usize;
        if offset >= self.bus.ram.len() || data.len() > self.bus.ram.len() - offset {
            return Err(format!(
                "program of {} bytes does not fit at 0x{offset:04X} in {} bytes of ram",
                data.len(),
                self.bus.ram.len()
            ));
        }
        self.bus.ram[offset..offset + data.len()].copy_from_slice(data);
        Ok(())
    }

    fn set_key_states(&mut self, keys: [bool; 16]) {
        self.keys = keys;
    }

    fn state(&self) -> Chip8State {
        self.state
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
        if self.bus.io.sound_enabled {
            let frequency = if self.bus.io.low_freq { 1200.0 } else { 2400.0 };
            let step = frequency / sample_rate as f32;
            for sample in samples {
                *sample = if self.wave_phase > 0.5 { 16384 } else { -16384 };
                self.wave_phase = (self.wave_phase + step) % 1.0;
            }
        } else {
            samples.fill(0);
        }
    }

    fn memory(&self) -> &[u8] {
        &self.bus.ram
    }
}

impl ExecutionUnit for Dream6800 {
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
        self.bus.read_debug_byte(address as u16)
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

    fn machine() -> Dream6800 {
        Dream6800::new(Dream6800Options::default()).unwrap()
    }

    #[test]
    fn boot_parks_the_interpreter_at_the_program_start() {
        let m = machine();
        assert_eq!(m.state.pc, 0x200);
        assert_eq!(m.cpu_state, CpuState::Normal);
        assert_eq!(m.exec_mode, ExecMode::Running);
        // CHIPOS parks I and the V registers cleared
        assert_eq!(m.state.v, [0; 16]);
        assert_eq!(m.state.i, 0);
    }

    #[test]
    fn unmapped_bus_access_is_a_fault() {
        let mut m = machine();
        // LDA $5000 sits between the RAM and the PIA
        m.bus.ram[0x80..0x83].copy_from_slice(&[0xB6, 0x50, 0x00]);
        let mut cpu_state = m.cpu.state();
        cpu_state.pc = 0x80;
        cpu_state.cc |= motorola_6800::I;
        m.cpu.set_state(&cpu_state);
        m.step_backend();
        assert_eq!(m.cpu_state, CpuState::Error);
        assert!(m.error_message.as_deref().unwrap().contains("$5000"));
        assert_eq!(m.exec_mode, ExecMode::Paused);
    }

    #[test]
    fn speaker_gate_produces_a_square_wave() {
        let mut m = machine();
        m.bus.io.sound_enabled = true;
        let mut samples = [0i16; 64];
        m.render_audio(&mut samples, 48_000);
        assert_eq!(samples[0], -16384);
        assert!(samples.contains(&16384));
        assert!(samples.iter().all(|&s| s == 16384 || s == -16384));

        m.bus.io.sound_enabled = false;
        m.render_audio(&mut samples, 48_000);
        assert!(samples.iter().all(|&s| s == 0));
    }

    #[test]
    fn zero_page_projection_matches_the_chipos_layout() {
        let mut m = machine();
        m.bus.ram[0x30..0x40].copy_from_slice(&[
            1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16,
        ]);
        m.bus.ram[0x26] = 0x03;
        m.bus.ram[0x27] = 0x45;
        m.bus.ram[0x22] = 0x02;
        m.bus.ram[0x23] = 0x20;
        m.bus.ram[0x24] = 0x00;
        m.bus.ram[0x25] = 0x5B; // two return addresses pushed
        m.bus.ram[0x20] = 9;
        m.bus.ram[0x21] = 4;
        m.bus.ram[0x5E] = 0x02;
        m.bus.ram[0x5F] = 0x08;
        m.bus.ram[0x5C] = 0x02;
        m.bus.ram[0x5D] = 0x30;
        m.fetch_state();
        assert_eq!(m.state.v[0], 1);
        assert_eq!(m.state.v[0xF], 16);
        assert_eq!(m.state.i, 0x345);
        assert_eq!(m.state.pc, 0x220);
        assert_eq!(m.state.sp, 2);
        assert_eq!(m.state.dt, 9);
        assert_eq!(m.state.st, 4);
        assert_eq!(m.state.stack[0], 0x208);
        assert_eq!(m.state.stack[1], 0x230);
    }

    #[test]
    fn force_state_round_trips_through_ram() {
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
    fn load_data_rejects_programs_that_do_not_fit() {
        let mut m = machine();
        let before = m.bus.ram[0x200];
        let too_big = vec![0xAA; 4096];
        assert!(m.load_data(&too_big, None).is_err());
        assert_eq!(m.bus.ram[0x200], before);
        assert!(m.load_data(&too_big, Some(0x8000)).is_err());
    }

    #[test]
    fn rom_is_mirrored_to_the_reset_vector() {
        let m = machine();
        assert_eq!(m.bus.read_debug_byte(0xFFFE), 0xC3);
        assert_eq!(m.bus.read_debug_byte(0xFFFF), 0x60);
        assert_eq!(m.bus.read_debug_byte(0xC000), m.bus.read_debug_byte(0xC400));
    }
}
