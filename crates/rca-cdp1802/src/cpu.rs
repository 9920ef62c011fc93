//! CDP1802 CPU core.

#![allow(clippy::cast_possible_truncation)]

use chip8_core::{CpuState, RegisterValue};

/// Memory and I/O attached to the CPU.
///
/// `read_byte_dma` must be side-effect free: the CDP1861 uses it for display
/// refresh and the debugger for inspection.
pub trait Cdp1802Bus {
    fn read_byte(&mut self, addr: u16) -> u8;
    fn read_byte_dma(&self, addr: u16) -> u8;
    fn write_byte(&mut self, addr: u16, value: u8);

    /// OUT N side effect (N = 1..7).
    fn output(&mut self, _port: u8, _value: u8) {}

    /// INP N bus value (N = 1..7).
    fn input(&mut self, _port: u8) -> u8 {
        0
    }

    /// External flag lines EF1..EF4 (`line` = 0..3). True means asserted.
    fn ef(&mut self, _line: u8) -> bool {
        true
    }
}

/// Full register snapshot, used by machines to project interpreter state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cdp1802State {
    pub r: [u16; 16],
    pub p: u8,
    pub x: u8,
    pub n: u8,
    pub i: u8,
    pub t: u8,
    pub d: u8,
    pub df: bool,
    pub ie: bool,
    pub q: bool,
    pub cycles: i64,
}

const REGISTER_NAMES: &[&str] = &[
    "R0", "R1", "R2", "R3", "R4", "R5", "R6", "R7", "R8", "R9", "RA", "RB", "RC", "RD", "RE",
    "RF", "I", "N", "P", "X", "D", "DF", "T", "IE", "Q",
];

/// The CDP1802 CPU. The bus is passed into each execution step, so one
/// machine can own both the CPU and its memory without borrow cycles.
#[derive(Debug)]
pub struct Cdp1802 {
    r: [u16; 16],
    p: u8,
    x: u8,
    n: u8,
    i: u8,
    t: u8,
    d: u8,
    df: bool,
    ie: bool,
    q: bool,
    cycles: i64,
    cpu_state: CpuState,
    error_message: Option<String>,
}

impl Default for Cdp1802 {
    fn default() -> Self {
        Self::new()
    }
}

impl Cdp1802 {
    #[must_use]
    pub fn new() -> Self {
        let mut cpu = Self {
            r: [0; 16],
            p: 0,
            x: 0,
            n: 0,
            i: 0,
            t: 0,
            d: 0,
            df: false,
            ie: true,
            q: false,
            cycles: 0,
            cpu_state: CpuState::Normal,
            error_message: None,
        };
        cpu.reset();
        cpu
    }

    /// Power-on/reset state: I, N, P, X, Q cleared, R0 and R1 cleared,
    /// interrupts enabled. D, DF and the other scratchpads are undefined on
    /// real silicon and left as they are.
    pub fn reset(&mut self) {
        self.i = 0;
        self.n = 0;
        self.p = 0;
        self.x = 0;
        self.q = false;
        self.r[0] = 0;
        self.r[1] = 0;
        self.ie = true;
        self.cycles = 0;
        self.cpu_state = CpuState::Normal;
        self.error_message = None;
    }

    #[must_use]
    pub fn pc(&self) -> u16 {
        self.r[self.p as usize]
    }

    pub fn set_pc(&mut self, pc: u16) {
        self.r[self.p as usize] = pc;
    }

    #[must_use]
    pub fn r(&self, index: u8) -> u16 {
        self.r[(index & 0xF) as usize]
    }

    pub fn set_r(&mut self, index: u8, value: u16) {
        self.r[(index & 0xF) as usize] = value;
    }

    #[must_use]
    pub fn d(&self) -> u8 {
        self.d
    }

    #[must_use]
    pub fn df(&self) -> bool {
        self.df
    }

    #[must_use]
    pub fn q(&self) -> bool {
        self.q
    }

    #[must_use]
    pub fn ie(&self) -> bool {
        self.ie
    }

    #[must_use]
    pub fn cycles(&self) -> i64 {
        self.cycles
    }

    #[must_use]
    pub fn cpu_state(&self) -> CpuState {
        self.cpu_state
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    #[must_use]
    pub fn state(&self) -> Cdp1802State {
        Cdp1802State {
            r: self.r,
            p: self.p,
            x: self.x,
            n: self.n,
            i: self.i,
            t: self.t,
            d: self.d,
            df: self.df,
            ie: self.ie,
            q: self.q,
            cycles: self.cycles,
        }
    }

    pub fn set_state(&mut self, state: &Cdp1802State) {
        self.r = state.r;
        self.p = state.p & 0xF;
        self.x = state.x & 0xF;
        self.n = state.n & 0xF;
        self.i = state.i & 0xF;
        self.t = state.t;
        self.d = state.d;
        self.df = state.df;
        self.ie = state.ie;
        self.q = state.q;
        self.cycles = state.cycles;
    }

    #[must_use]
    pub fn register_names() -> &'static [&'static str] {
        REGISTER_NAMES
    }

    #[must_use]
    pub fn register(&self, index: usize) -> RegisterValue {
        match index {
            0..=15 => RegisterValue { value: u32::from(self.r[index]), size: 16 },
            16 => RegisterValue { value: u32::from(self.i), size: 4 },
            17 => RegisterValue { value: u32::from(self.n), size: 4 },
            18 => RegisterValue { value: u32::from(self.p), size: 4 },
            19 => RegisterValue { value: u32::from(self.x), size: 4 },
            20 => RegisterValue { value: u32::from(self.d), size: 8 },
            21 => RegisterValue { value: u32::from(self.df), size: 1 },
            22 => RegisterValue { value: u32::from(self.t), size: 8 },
            23 => RegisterValue { value: u32::from(self.ie), size: 1 },
            24 => RegisterValue { value: u32::from(self.q), size: 1 },
            _ => RegisterValue::default(),
        }
    }

    pub fn set_register(&mut self, index: usize, value: u32) {
        match index {
            0..=15 => self.r[index] = value as u16,
            16 => self.i = (value & 0xF) as u8,
            17 => self.n = (value & 0xF) as u8,
            18 => self.p = (value & 0xF) as u8,
            19 => self.x = (value & 0xF) as u8,
            20 => self.d = value as u8,
            21 => self.df = value != 0,
            22 => self.t = value as u8,
            23 => self.ie = value != 0,
            24 => self.q = value != 0,
            _ => {}
        }
    }

    fn add_cycles(&mut self, cycles: i64) {
        self.cycles += cycles;
    }

    /// Assert the interrupt line. When IE is set: T := (X,P), P := 1,
    /// X := 2, IE cleared; costs one machine cycle. Wakes an idle CPU.
    pub fn trigger_interrupt(&mut self) {
        if self.ie {
            self.ie = false;
            self.add_cycles(8);
            self.t = (self.x << 4) | self.p;
            self.p = 1;
            self.x = 2;
            if self.cpu_state == CpuState::Waiting {
                self.cpu_state = CpuState::Normal;
            }
        }
    }

    /// DMA-in: write `data` to M(R0), increment R0. Wakes an idle CPU.
    pub fn dma_in<B: Cdp1802Bus>(&mut self, bus: &mut B, data: u8) {
        if self.cpu_state == CpuState::Waiting {
            self.cpu_state = CpuState::Normal;
        }
        self.add_cycles(8);
        let addr = self.r[0];
        self.r[0] = self.r[0].wrapping_add(1);
        bus.write_byte(addr, data);
    }

    /// DMA-out: read M(R0), increment R0; returns the byte and its address.
    pub fn dma_out<B: Cdp1802Bus>(&mut self, bus: &B) -> (u8, u16) {
        if self.cpu_state == CpuState::Waiting {
            self.cpu_state = CpuState::Normal;
        }
        self.add_cycles(8);
        let addr = self.r[0];
        self.r[0] = self.r[0].wrapping_add(1);
        (bus.read_byte_dma(addr), addr)
    }

    fn fetch<B: Cdp1802Bus>(&mut self, bus: &mut B) -> u8 {
        let pc = self.pc();
        self.set_pc(pc.wrapping_add(1));
        bus.read_byte(pc)
    }

    fn branch_short<B: Cdp1802Bus>(&mut self, bus: &mut B, condition: bool) {
        if condition {
            let target = bus.read_byte(self.pc());
            self.set_pc((self.pc() & 0xFF00) | u16::from(target));
        } else {
            self.set_pc(self.pc().wrapping_add(1));
        }
    }

    fn branch_long<B: Cdp1802Bus>(&mut self, bus: &mut B, condition: bool) {
        if condition {
            let hi = bus.read_byte(self.pc());
            let lo = bus.read_byte(self.pc().wrapping_add(1));
            self.set_pc((u16::from(hi) << 8) | u16::from(lo));
        } else {
            self.set_pc(self.pc().wrapping_add(2));
        }
        self.add_cycles(8);
    }

    fn skip_long(&mut self, condition: bool) {
        if condition {
            self.set_pc(self.pc().wrapping_add(2));
        }
        self.add_cycles(8);
    }

    fn rn(&self) -> u16 {
        self.r[self.n as usize]
    }

    fn set_rn(&mut self, value: u16) {
        self.r[self.n as usize] = value;
    }

    fn rx(&self) -> u16 {
        self.r[self.x as usize]
    }

    fn set_rx(&mut self, value: u16) {
        self.r[self.x as usize] = value;
    }

    fn alu_add(&mut self, value: u8, carry_in: u16) {
        let t = u16::from(value) + u16::from(self.d) + carry_in;
        self.df = (t >> 8) & 1 != 0;
        self.d = t as u8;
    }

    /// Execute one instruction; returns the clock cycles it took.
    /// An idle CPU burns one machine cycle per call until DMA or an
    /// interrupt wakes it.
    pub fn execute_instruction<B: Cdp1802Bus>(&mut self, bus: &mut B) -> i64 {
        let start_cycles = self.cycles;
        if self.cpu_state == CpuState::Error {
            return 0;
        }
        if self.cpu_state == CpuState::Waiting {
            self.add_cycles(8);
            return 8;
        }
        let opcode = self.fetch(bus);
        self.add_cycles(16);
        self.n = opcode & 0xF;
        match opcode {
            // IDL: wait for DMA or interrupt
            0x00 => self.cpu_state = CpuState::Waiting,
            // LDN Rn (N != 0)
            0x01..=0x0F => self.d = bus.read_byte(self.rn()),
            // INC Rn
            0x10..=0x1F => self.set_rn(self.rn().wrapping_add(1)),
            // DEC Rn
            0x20..=0x2F => self.set_rn(self.rn().wrapping_sub(1)),
            0x30 => self.branch_short(bus, true),
            0x31 => self.branch_short(bus, self.q),
            0x32 => self.branch_short(bus, self.d == 0),
            0x33 => self.branch_short(bus, self.df),
            // B1..B4 test the EF lines
            0x34..=0x37 => {
                let ef = bus.ef(opcode - 0x34);
                self.branch_short(bus, ef);
            }
            0x38 => self.set_pc(self.pc().wrapping_add(1)), // SKP
            0x39 => self.branch_short(bus, !self.q),
            0x3A => self.branch_short(bus, self.d != 0),
            0x3B => self.branch_short(bus, !self.df),
            0x3C..=0x3F => {
                let ef = bus.ef(opcode - 0x3C);
                self.branch_short(bus, !ef);
            }
            // LDA Rn
            0x40..=0x4F => {
                self.d = bus.read_byte(self.rn());
                self.set_rn(self.rn().wrapping_add(1));
            }
            // STR Rn
            0x50..=0x5F => bus.write_byte(self.rn(), self.d),
            0x60 => self.set_rx(self.rx().wrapping_add(1)), // IRX
            // OUT 1..7: M(R(X)) to the bus, R(X)+1
            0x61..=0x67 => {
                let value = bus.read_byte(self.rx());
                self.set_rx(self.rx().wrapping_add(1));
                bus.output(self.n, value);
            }
            0x68 => {
                self.cpu_state = CpuState::Error;
                self.error_message = Some("Illegal opcode 0x68!".into());
                self.set_pc(self.pc().wrapping_sub(1));
            }
            // INP 1..7: bus value to M(R(X)) and D
            0x69..=0x6F => {
                self.d = bus.input(self.n & 7);
                bus.write_byte(self.rx(), self.d);
            }
            // RET / DIS
            0x70 | 0x71 => {
                let t = bus.read_byte(self.rx());
                self.set_rx(self.rx().wrapping_add(1));
                self.p = t & 0xF;
                self.x = t >> 4;
                self.ie = opcode == 0x70;
            }
            // LDXA
            0x72 => {
                self.d = bus.read_byte(self.rx());
                self.set_rx(self.rx().wrapping_add(1));
            }
            // STXD
            0x73 => {
                bus.write_byte(self.rx(), self.d);
                self.set_rx(self.rx().wrapping_sub(1));
            }
            // ADC
            0x74 => {
                let m = bus.read_byte(self.rx());
                let carry = u16::from(self.df);
                self.alu_add(m, carry);
            }
            // SDB: M(R(X)) - D - !DF
            0x75 => {
                let m = bus.read_byte(self.rx());
                let t = u16::from(m) + u16::from(self.d ^ 0xFF) + u16::from(self.df);
                self.df = (t >> 8) & 1 != 0;
                self.d = t as u8;
            }
            // SHRC
            0x76 => {
                let carry_in = u8::from(self.df) << 7;
                self.df = self.d & 1 != 0;
                self.d = (self.d >> 1) | carry_in;
            }
            // SMB: D - M(R(X)) - !DF
            0x77 => {
                let m = bus.read_byte(self.rx());
                let t = u16::from(m ^ 0xFF) + u16::from(self.d) + u16::from(self.df);
                self.df = (t >> 8) & 1 != 0;
                self.d = t as u8;
            }
            // SAV
            0x78 => bus.write_byte(self.rx(), self.t),
            // MARK: (X,P) to T and M(R2), then P to X, R2-1
            0x79 => {
                self.t = (self.x << 4) | self.p;
                bus.write_byte(self.r[2], self.t);
                self.x = self.p;
                self.r[2] = self.r[2].wrapping_sub(1);
            }
            0x7A => self.q = false,
            0x7B => self.q = true,
            // ADCI
            0x7C => {
                let m = self.fetch(bus);
                let carry = u16::from(self.df);
                self.alu_add(m, carry);
            }
            // SDBI
            0x7D => {
                let m = self.fetch(bus);
                let t = u16::from(m) + u16::from(self.d ^ 0xFF) + u16::from(self.df);
                self.df = (t >> 8) & 1 != 0;
                self.d = t as u8;
            }
            // SHLC
            0x7E => {
                let carry_in = u8::from(self.df);
                self.df = self.d >> 7 != 0;
                self.d = (self.d << 1) | carry_in;
            }
            // SMBI
            0x7F => {
                let m = self.fetch(bus);
                let t = u16::from(m ^ 0xFF) + u16::from(self.d) + u16::from(self.df);
                self.df = (t >> 8) & 1 != 0;
                self.d = t as u8;
            }
            // GLO / GHI / PLO / PHI
            0x80..=0x8F => self.d = (self.rn() & 0xFF) as u8,
            0x90..=0x9F => self.d = (self.rn() >> 8) as u8,
            0xA0..=0xAF => self.set_rn((self.rn() & 0xFF00) | u16::from(self.d)),
            0xB0..=0xBF => self.set_rn((self.rn() & 0x00FF) | (u16::from(self.d) << 8)),
            0xC0 => self.branch_long(bus, true),
            0xC1 => self.branch_long(bus, self.q),
            0xC2 => self.branch_long(bus, self.d == 0),
            0xC3 => self.branch_long(bus, self.df),
            0xC4 => self.add_cycles(8), // NOP is a three-cycle instruction
            0xC5 => self.skip_long(!self.q),
            0xC6 => self.skip_long(self.d != 0),
            0xC7 => self.skip_long(!self.df),
            0xC8 => self.skip_long(true),
            0xC9 => self.branch_long(bus, !self.q),
            0xCA => self.branch_long(bus, self.d != 0),
            0xCB => self.branch_long(bus, !self.df),
            0xCC => self.skip_long(self.ie),
            0xCD => self.skip_long(self.q),
            0xCE => self.skip_long(self.d == 0),
            0xCF => self.skip_long(self.df),
            // SEP / SEX
            0xD0..=0xDF => self.p = self.n,
            0xE0..=0xEF => self.x = self.n,
            0xF0 => self.d = bus.read_byte(self.rx()),
            0xF1 => self.d |= bus.read_byte(self.rx()),
            0xF2 => self.d &= bus.read_byte(self.rx()),
            0xF3 => self.d ^= bus.read_byte(self.rx()),
            // ADD
            0xF4 => {
                let m = bus.read_byte(self.rx());
                self.alu_add(m, 0);
            }
            // SD: M(R(X)) - D
            0xF5 => {
                let m = bus.read_byte(self.rx());
                let t = u16::from(m) + u16::from(self.d ^ 0xFF) + 1;
                self.df = (t >> 8) & 1 != 0;
                self.d = t as u8;
            }
            // SHR
            0xF6 => {
                self.df = self.d & 1 != 0;
                self.d >>= 1;
            }
            // SM: D - M(R(X))
            0xF7 => {
                let m = bus.read_byte(self.rx());
                let t = u16::from(m ^ 0xFF) + u16::from(self.d) + 1;
                self.df = (t >> 8) & 1 != 0;
                self.d = t as u8;
            }
            0xF8 => self.d = self.fetch(bus),
            0xF9 => {
                let m = self.fetch(bus);
                self.d |= m;
            }
            0xFA => {
                let m = self.fetch(bus);
                self.d &= m;
            }
            0xFB => {
                let m = self.fetch(bus);
                self.d ^= m;
            }
            // ADI
            0xFC => {
                let m = self.fetch(bus);
                self.alu_add(m, 0);
            }
            // SDI
            0xFD => {
                let m = self.fetch(bus);
                let t = u16::from(m) + u16::from(self.d ^ 0xFF) + 1;
                self.df = (t >> 8) & 1 != 0;
                self.d = t as u8;
            }
            // SHL
            0xFE => {
                self.df = self.d >> 7 != 0;
                self.d <<= 1;
            }
            // SMI
            0xFF => {
                let m = self.fetch(bus);
                let t = u16::from(m ^ 0xFF) + u16::from(self.d) + 1;
                self.df = (t >> 8) & 1 != 0;
                self.d = t as u8;
            }
        }
        self.cycles - start_cycles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Ram {
        bytes: Vec<u8>,
        out: Vec<(u8, u8)>,
        ef1: bool,
    }

    impl Ram {
        fn with_program(program: &[u8]) -> Self {
            let mut bytes = vec![0u8; 0x10000];
            bytes[..program.len()].copy_from_slice(program);
            Self { bytes, out: Vec::new(), ef1: false }
        }
    }

    impl Cdp1802Bus for Ram {
        fn read_byte(&mut self, addr: u16) -> u8 {
            self.bytes[addr as usize]
        }
        fn read_byte_dma(&self, addr: u16) -> u8 {
            self.bytes[addr as usize]
        }
        fn write_byte(&mut self, addr: u16, value: u8) {
            self.bytes[addr as usize] = value;
        }
        fn output(&mut self, port: u8, value: u8) {
            self.out.push((port, value));
        }
        fn input(&mut self, port: u8) -> u8 {
            port | 0x40
        }
        fn ef(&mut self, line: u8) -> bool {
            line == 0 && self.ef1
        }
    }

    #[test]
    fn add_sets_carry() {
        // SEX R3; LDI 0xF0; ... ADD with M(R3)=0x20
        let mut bus = Ram::with_program(&[0xE3, 0xF8, 0xF0, 0xF4]);
        bus.bytes[0x100] = 0x20;
        let mut cpu = Cdp1802::new();
        cpu.set_r(3, 0x100);
        for _ in 0..3 {
            cpu.execute_instruction(&mut bus);
        }
        assert_eq!(cpu.d(), 0x10);
        assert!(cpu.df());
    }

    #[test]
    fn subtract_borrow_semantics() {
        // SDI 0x10 with D=0x20: 0x10 - 0x20 borrows, DF=0
        let mut bus = Ram::with_program(&[0xF8, 0x20, 0xFD, 0x10]);
        let mut cpu = Cdp1802::new();
        cpu.execute_instruction(&mut bus);
        cpu.execute_instruction(&mut bus);
        assert_eq!(cpu.d(), 0xF0);
        assert!(!cpu.df());

        // SMI 0x10 with D=0x20: 0x20 - 0x10, no borrow, DF=1
        let mut bus = Ram::with_program(&[0xF8, 0x20, 0xFF, 0x10]);
        let mut cpu = Cdp1802::new();
        cpu.execute_instruction(&mut bus);
        cpu.execute_instruction(&mut bus);
        assert_eq!(cpu.d(), 0x10);
        assert!(cpu.df());
    }

    #[test]
    fn short_branch_stays_in_page() {
        // BR 0x80 from address 0
        let mut bus = Ram::with_program(&[0x30, 0x80]);
        let mut cpu = Cdp1802::new();
        let cycles = cpu.execute_instruction(&mut bus);
        assert_eq!(cpu.pc(), 0x0080);
        assert_eq!(cycles, 16);
    }

    #[test]
    fn long_branch_takes_three_machine_cycles() {
        let mut bus = Ram::with_program(&[0xC0, 0x12, 0x34]);
        let mut cpu = Cdp1802::new();
        let cycles = cpu.execute_instruction(&mut bus);
        assert_eq!(cpu.pc(), 0x1234);
        assert_eq!(cycles, 24);
    }

    #[test]
    fn sep_switches_program_counter() {
        let mut bus = Ram::with_program(&[0xD5]);
        let mut cpu = Cdp1802::new();
        cpu.set_r(5, 0x300);
        cpu.execute_instruction(&mut bus);
        assert_eq!(cpu.pc(), 0x300);
    }

    #[test]
    fn interrupt_saves_xp_and_masks() {
        let mut cpu = Cdp1802::new();
        cpu.set_register(18, 3); // P
        cpu.set_register(19, 7); // X
        cpu.trigger_interrupt();
        assert_eq!(cpu.register(22).value, 0x73); // T = (X,P)
        assert_eq!(cpu.register(18).value, 1);
        assert_eq!(cpu.register(19).value, 2);
        assert!(!cpu.ie());
        // masked while IE is clear
        let t = cpu.register(22).value;
        cpu.trigger_interrupt();
        assert_eq!(cpu.register(22).value, t);
    }

    #[test]
    fn ret_restores_and_reenables() {
        // IRQ entry, then RET through M(R2)
        let mut bus = Ram::with_program(&[]);
        let mut cpu = Cdp1802::new();
        cpu.set_register(18, 3);
        cpu.set_register(19, 7);
        cpu.trigger_interrupt();
        cpu.set_r(1, 0x500);
        bus.bytes[0x500] = 0x70; // RET
        cpu.set_r(2, 0x600);
        bus.bytes[0x600] = 0x73; // saved (X,P)
        cpu.execute_instruction(&mut bus);
        assert_eq!(cpu.register(18).value, 3);
        assert_eq!(cpu.register(19).value, 7);
        assert!(cpu.ie());
    }

    #[test]
    fn idl_waits_until_interrupt() {
        let mut bus = Ram::with_program(&[0x00]);
        let mut cpu = Cdp1802::new();
        cpu.execute_instruction(&mut bus);
        assert_eq!(cpu.cpu_state(), CpuState::Waiting);
        assert_eq!(cpu.execute_instruction(&mut bus), 8);
        cpu.trigger_interrupt();
        assert_eq!(cpu.cpu_state(), CpuState::Normal);
    }

    #[test]
    fn illegal_opcode_enters_error_state() {
        let mut bus = Ram::with_program(&[0x68]);
        let mut cpu = Cdp1802::new();
        cpu.execute_instruction(&mut bus);
        assert_eq!(cpu.cpu_state(), CpuState::Error);
        assert!(cpu.error_message().is_some());
        assert_eq!(cpu.pc(), 0);
        assert_eq!(cpu.execute_instruction(&mut bus), 0);
    }

    #[test]
    fn out_reads_via_rx_and_increments() {
        let mut bus = Ram::with_program(&[0xE4, 0x62]);
        bus.bytes[0x200] = 0xAB;
        let mut cpu = Cdp1802::new();
        cpu.set_r(4, 0x200);
        cpu.execute_instruction(&mut bus);
        cpu.execute_instruction(&mut bus);
        assert_eq!(bus.out, vec![(2, 0xAB)]);
        assert_eq!(cpu.r(4), 0x201);
    }

    #[test]
    fn dma_out_walks_r0() {
        let mut bus = Ram::with_program(&[]);
        bus.bytes[0x340] = 0x5A;
        let mut cpu = Cdp1802::new();
        cpu.set_r(0, 0x340);
        let (byte, addr) = cpu.dma_out(&bus);
        assert_eq!((byte, addr), (0x5A, 0x340));
        assert_eq!(cpu.r(0), 0x341);
    }

    #[test]
    fn ef_lines_drive_branches() {
        // B1 taken when EF1 asserted
        let mut bus = Ram::with_program(&[0x34, 0x55]);
        bus.ef1 = true;
        let mut cpu = Cdp1802::new();
        cpu.execute_instruction(&mut bus);
        assert_eq!(cpu.pc(), 0x0055);

        let mut bus = Ram::with_program(&[0x34, 0x55]);
        let mut cpu = Cdp1802::new();
        cpu.execute_instruction(&mut bus);
        assert_eq!(cpu.pc(), 0x0002);
    }

    #[test]
    fn shift_with_carry_round_trips() {
        let mut bus = Ram::with_program(&[0x76, 0x7E]);
        let mut cpu = Cdp1802::new();
        cpu.set_register(20, 0x81);
        cpu.execute_instruction(&mut bus); // SHRC: D=0x40, DF=1
        assert_eq!(cpu.d(), 0x40);
        assert!(cpu.df());
        cpu.execute_instruction(&mut bus); // SHLC: D=0x81, DF=0
        assert_eq!(cpu.d(), 0x81);
        assert!(!cpu.df());
    }
}
