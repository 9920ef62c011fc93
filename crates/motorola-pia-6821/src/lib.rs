//! Motorola MC6821 PIA (peripheral interface adapter).
//!
//! Two 8-bit ports with per-bit data direction, two interrupt/control lines
//! per port. The machine wires the ports up by implementing [`Pia6821Io`];
//! all register accesses and control line changes go through that trait so
//! port reads can sample the peripheral lazily, like the real chip samples
//! its pins.

/// CA1/CB1 interrupt enable.
pub const C1C0: u8 = 0x01;
/// CA1/CB1 active edge select (0 = low-to-high).
pub const C1C1: u8 = 0x02;
/// Select data register (1) or data direction register (0).
pub const NDDR: u8 = 0x04;
/// CA2/CB2 interrupt enable, or strobe restore mode when C2 is an output.
pub const C2C0: u8 = 0x08;
/// CA2/CB2 edge select, or strobe/set mode when C2 is an output.
pub const C2C1: u8 = 0x10;
/// CA2/CB2 direction (1 = output).
pub const C2C2: u8 = 0x20;
/// Interrupt flag for the C2 line.
pub const IRQ2: u8 = 0x40;
/// Interrupt flag for the C1 line.
pub const IRQ1: u8 = 0x80;

/// Port input sample with a connection mask; unconnected lines float high.
#[derive(Debug, Clone, Copy, Default)]
pub struct PortInput {
    pub value: u8,
    pub connections: u8,
}

/// Peripheral side of the PIA. All methods default to an unconnected pin.
pub trait Pia6821Io {
    /// Sample the peripheral lines of port A; `mask` has a 1 for every
    /// line configured as input.
    fn port_a_input(&mut self, _mask: u8) -> PortInput {
        PortInput::default()
    }
    /// Sample the peripheral lines of port B.
    fn port_b_input(&mut self, _mask: u8) -> u8 {
        0
    }
    /// Sample the CA1 pin, `None` if nothing drives it.
    fn ca1_input(&mut self) -> Option<bool> {
        None
    }
    fn ca2_input(&mut self) -> Option<bool> {
        None
    }
    fn cb1_input(&mut self) -> Option<bool> {
        None
    }
    fn cb2_input(&mut self) -> Option<bool> {
        None
    }
    fn port_a_output(&mut self, _data: u8, _mask: u8) {}
    fn port_b_output(&mut self, _data: u8, _mask: u8) {}
    fn ca2_output(&mut self, _level: bool) {}
    fn cb2_output(&mut self, _level: bool) {}
    /// Level change of the IRQA output (active low).
    fn irq_a(&mut self, _level: bool) {}
    /// Level change of the IRQB output (active low).
    fn irq_b(&mut self, _level: bool) {}
}

#[derive(Debug, Clone, Copy, Default)]
struct Port {
    input: u8,
    output: u8,
    ddr: u8,
    ctrl: u8,
    c1_in: bool,
    c2_in: bool,
    c2_out: bool,
    irq: bool,
}

impl Port {
    fn pins(&self) -> u8 {
        (self.output & self.ddr) | (self.input & !self.ddr)
    }

    fn c1_active_level(&self) -> bool {
        self.ctrl & C1C1 == 0
    }

    fn c2_is_output(&self) -> bool {
        self.ctrl & C2C2 != 0
    }

    fn c2_is_strobe(&self) -> bool {
        self.ctrl & C2C1 == 0
    }

    fn c2_strobe_e_reset(&self) -> bool {
        self.ctrl & C2C0 != 0
    }

    fn c2_active_level(&self) -> bool {
        self.ctrl & C2C1 == 0
    }

    fn irq_level(&self) -> bool {
        (self.ctrl & IRQ1 != 0 && self.ctrl & C1C0 != 0)
            || (self.ctrl & IRQ2 != 0 && self.ctrl & C2C0 != 0)
    }
}

/// The PIA itself. Register addresses are taken modulo 4: port A data/DDR,
/// control A, port B data/DDR, control B.
#[derive(Debug, Default)]
pub struct Pia6821 {
    a: Port,
    b: Port,
}

impl Pia6821 {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.a = Port::default();
        self.b = Port::default();
    }

    /// Register read without side effects, for debuggers.
    #[must_use]
    pub fn read_debug(&self, addr: u16) -> u8 {
        match addr & 3 {
            0 => {
                if self.a.ctrl & NDDR != 0 {
                    self.a.pins()
                } else {
                    self.a.ddr
                }
            }
            1 => self.a.ctrl,
            2 => {
                if self.b.ctrl & NDDR != 0 {
                    self.b.pins()
                } else {
                    self.b.ddr
                }
            }
            _ => self.b.ctrl,
        }
    }

    pub fn read<IO: Pia6821Io>(&mut self, addr: u16, io: &mut IO) -> u8 {
        match addr & 3 {
            0 => {
                if self.a.ctrl & NDDR != 0 {
                    let sample = io.port_a_input(!self.a.ddr);
                    // unconnected lines are pulled up
                    self.a.input = (sample.value & sample.connections) | !sample.connections;
                    let val = self.a.pins();
                    self.a.ctrl &= !(IRQ1 | IRQ2);
                    self.update_irq(io);
                    if self.a.c2_is_output() && self.a.c2_is_strobe() {
                        self.a.c2_out = false;
                        io.ca2_output(false);
                        if self.a.c2_strobe_e_reset() {
                            self.a.c2_out = true;
                            io.ca2_output(true);
                        }
                    }
                    val
                } else {
                    self.a.ddr
                }
            }
            1 => {
                if let Some(level) = io.ca1_input() {
                    self.set_ca1(level, io);
                }
                if let Some(level) = io.ca2_input() {
                    self.set_ca2(level, io);
                }
                self.a.ctrl
            }
            2 => {
                if self.b.ctrl & NDDR != 0 {
                    self.b.input = io.port_b_input(!self.b.ddr);
                    let val = self.b.pins();
                    self.b.ctrl &= !(IRQ1 | IRQ2);
                    self.update_irq(io);
                    val
                } else {
                    self.b.ddr
                }
            }
            _ => {
                if let Some(level) = io.cb1_input() {
                    self.set_cb1(level, io);
                }
                if let Some(level) = io.cb2_input() {
                    self.set_cb2(level, io);
                }
                self.b.ctrl
            }
        }
    }

    pub fn write<IO: Pia6821Io>(&mut self, addr: u16, val: u8, io: &mut IO) {
        match addr & 3 {
            0 => {
                if self.a.ctrl & NDDR != 0 {
                    self.a.output = val;
                    io.port_a_output(self.a.output & self.a.ddr, self.a.ddr);
                } else if self.a.ddr != val {
                    self.a.ddr = val;
                    io.port_a_output(self.a.output & self.a.ddr, self.a.ddr);
                }
            }
            1 => {
                if val & C2C2 != 0 && val & C2C1 != 0 {
                    let level = val & C2C0 != 0;
                    if self.a.c2_out != level {
                        self.a.c2_out = level;
                        io.ca2_output(level);
                    }
                }
                self.a.ctrl = (self.a.ctrl & 0xC0) | (val & 0x3F);
                self.update_irq(io);
            }
            2 => {
                if self.b.ctrl & NDDR != 0 {
                    self.b.output = val;
                    io.port_b_output(self.b.output & self.b.ddr, self.b.ddr);
                    if self.b.c2_is_output() && self.b.c2_is_strobe() {
                        self.b.c2_out = false;
                        io.cb2_output(false);
                        if self.b.c2_strobe_e_reset() {
                            self.b.c2_out = true;
                            io.cb2_output(true);
                        }
                    }
                } else if self.b.ddr != val {
                    self.b.ddr = val;
                    io.port_b_output(self.b.output & self.b.ddr, self.b.ddr);
                }
            }
            _ => {
                if val & C2C2 != 0 && val & C2C1 != 0 {
                    let level = val & C2C0 != 0;
                    if self.b.c2_out != level {
                        self.b.c2_out = level;
                        io.cb2_output(level);
                    }
                }
                self.b.ctrl = (self.b.ctrl & 0xC0) | (val & 0x3F);
                self.update_irq(io);
            }
        }
    }

    /// Port A pin levels as seen by the peripheral.
    #[must_use]
    pub fn port_a(&self) -> u8 {
        self.a.output & self.a.ddr
    }

    /// Drive the input lines of port A from the peripheral side.
    pub fn set_port_a(&mut self, val: u8) {
        self.a.input = (self.a.input & self.a.ddr) | (val & !self.a.ddr);
    }

    #[must_use]
    pub fn port_b(&self) -> u8 {
        self.b.output & self.b.ddr
    }

    pub fn set_port_b(&mut self, val: u8) {
        self.b.input = (self.b.input & self.b.ddr) | (val & !self.b.ddr);
    }

    pub fn set_ca1<IO: Pia6821Io>(&mut self, level: bool, io: &mut IO) {
        if level != self.a.c1_in && level == self.a.c1_active_level() {
            self.a.ctrl |= IRQ1;
            self.update_irq(io);
            if self.a.c2_is_output()
                && self.a.c2_is_strobe()
                && !self.a.c2_strobe_e_reset()
                && !self.a.c2_out
            {
                self.a.c2_out = true;
                io.ca2_output(true);
            }
        }
        self.a.c1_in = level;
    }

    #[must_use]
    pub fn ca2(&self) -> bool {
        self.a.c2_out
    }

    pub fn set_ca2<IO: Pia6821Io>(&mut self, level: bool, io: &mut IO) {
        if !self.a.c2_is_output() && level != self.a.c2_in && level == self.a.c2_active_level() {
            self.a.ctrl |= IRQ2;
            self.update_irq(io);
        }
        self.a.c2_in = level;
    }

    pub fn set_cb1<IO: Pia6821Io>(&mut self, level: bool, io: &mut IO) {
        if level != self.b.c1_in && level == self.b.c1_active_level() {
            self.b.ctrl |= IRQ1;
            self.update_irq(io);
            if self.b.c2_is_output()
                && self.b.c2_is_strobe()
                && !self.b.c2_strobe_e_reset()
                && !self.b.c2_out
            {
                self.b.c2_out = true;
                io.cb2_output(true);
            }
        }
        self.b.c1_in = level;
    }

    #[must_use]
    pub fn cb2(&self) -> bool {
        self.b.c2_out
    }

    pub fn set_cb2<IO: Pia6821Io>(&mut self, level: bool, io: &mut IO) {
        if !self.b.c2_is_output() && level != self.b.c2_in && level == self.b.c2_active_level() {
            self.b.ctrl |= IRQ2;
            self.update_irq(io);
        }
        self.b.c2_in = level;
    }

    fn update_irq<IO: Pia6821Io>(&mut self, io: &mut IO) {
        let irq_a = self.a.irq_level();
        if self.a.irq != irq_a {
            self.a.irq = irq_a;
            io.irq_a(!irq_a);
        }
        let irq_b = self.b.irq_level();
        if self.b.irq != irq_b {
            self.b.irq = irq_b;
            io.irq_b(!irq_b);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct TestIo {
        keys: u8,
        port_a_writes: Vec<(u8, u8)>,
        irq_b_lows: usize,
    }

    impl Pia6821Io for TestIo {
        fn port_a_input(&mut self, mask: u8) -> PortInput {
            PortInput { value: self.keys & mask, connections: mask }
        }
        fn port_a_output(&mut self, data: u8, mask: u8) {
            self.port_a_writes.push((data, mask));
        }
        fn irq_b(&mut self, level: bool) {
            if !level {
                self.irq_b_lows += 1;
            }
        }
    }

    #[test]
    fn ddr_then_data_register_access() {
        let mut pia = Pia6821::new();
        let mut io = TestIo::default();
        // DDR A: low nibble outputs
        pia.write(0, 0x0F, &mut io);
        assert_eq!(pia.read_debug(0), 0x0F);
        // switch to the data register and write the port
        pia.write(1, NDDR, &mut io);
        pia.write(0, 0xA5, &mut io);
        assert_eq!(io.port_a_writes.last(), Some(&(0x05, 0x0F)));
        // reads merge outputs with sampled inputs
        io.keys = 0x30;
        assert_eq!(pia.read(0, &mut io), 0x35);
    }

    #[test]
    fn cb1_edge_raises_and_read_clears_irq() {
        let mut pia = Pia6821::new();
        let mut io = TestIo::default();
        // port B data register, CB1 IRQ enabled, rising edge active
        pia.write(3, NDDR | C1C0, &mut io);
        pia.set_cb1(true, &mut io);
        assert_eq!(io.irq_b_lows, 1);
        assert_ne!(pia.read_debug(3) & IRQ1, 0);
        // falling edge is inactive
        pia.set_cb1(false, &mut io);
        assert_eq!(io.irq_b_lows, 1);
        // reading the data register clears the flag
        pia.read(2, &mut io);
        assert_eq!(pia.read_debug(3) & IRQ1, 0);
    }

    #[test]
    fn masked_interrupt_sets_flag_without_irq_line() {
        let mut pia = Pia6821::new();
        let mut io = TestIo::default();
        pia.write(3, NDDR, &mut io); // C1C0 clear
        pia.set_cb1(true, &mut io);
        assert_ne!(pia.read_debug(3) & IRQ1, 0);
        assert_eq!(io.irq_b_lows, 0);
    }

    #[test]
    fn c2_manual_output() {
        let mut pia = Pia6821::new();
        let mut io = TestIo::default();
        pia.write(1, C2C2 | C2C1 | C2C0, &mut io);
        assert!(pia.ca2());
        pia.write(1, C2C2 | C2C1, &mut io);
        assert!(!pia.ca2());
    }

    #[test]
    fn control_write_preserves_flags() {
        let mut pia = Pia6821::new();
        let mut io = TestIo::default();
        pia.write(3, NDDR | C1C0, &mut io);
        pia.set_cb1(true, &mut io);
        pia.write(3, NDDR, &mut io);
        assert_ne!(pia.read_debug(3) & IRQ1, 0);
    }
}
