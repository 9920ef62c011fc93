//! DREAM6800 machine configuration.

use chip8_core::Properties;

use crate::rom;

/// Which monitor image sits in the 1KB ROM socket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonitorRom {
    /// The original 1978 CHIPOS.
    #[default]
    Chipos,
    /// CHIPOSLO, a CHIPOS build whose dispatcher adds the logical-operator
    /// opcodes (8xy1/8xy2/8xy3).
    ChiposLo,
}

impl MonitorRom {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            MonitorRom::Chipos => "CHIPOS",
            MonitorRom::ChiposLo => "CHIPOSLO",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<MonitorRom> {
        match name {
            "CHIPOS" => Some(MonitorRom::Chipos),
            "CHIPOSLO" => Some(MonitorRom::ChiposLo),
            _ => None,
        }
    }

    #[must_use]
    pub fn image(self) -> &'static [u8; 1024] {
        match self {
            MonitorRom::Chipos => &rom::CHIPOS,
            MonitorRom::ChiposLo => &rom::CHIPOSLO,
        }
    }
}

/// Board configuration. The clock is fixed at 1 MHz; the board shipped with
/// 2KB and took 4KB with the expansion fitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dream6800Options {
    pub ram_size: u32,
    /// Zero the RAM on reset instead of filling it with the power-on pattern.
    pub clean_ram: bool,
    pub rom: MonitorRom,
    /// Where `load_data` places a program when no address is given.
    pub start_address: u16,
}

impl Default for Dream6800Options {
    fn default() -> Self {
        Self { ram_size: 4096, clean_ram: false, rom: MonitorRom::Chipos, start_address: 0x200 }
    }
}

impl Dream6800Options {
    #[must_use]
    pub fn to_properties(&self) -> Properties {
        let mut props = Properties::new();
        props.set_int("ramSize", i64::from(self.ram_size));
        props.set_bool("cleanRam", self.clean_ram);
        props.set_str("romName", self.rom.name());
        props.set_int("startAddress", i64::from(self.start_address));
        props
    }

    /// Builds options from a property bag, starting from the defaults for
    /// anything absent.
    pub fn from_properties(props: &Properties) -> Result<Dream6800Options, String> {
        let mut options = Dream6800Options::default();
        if let Some(ram_size) = props.get_int("ramSize") {
            options.ram_size = u32::try_from(ram_size)
                .map_err(|_| format!("invalid ram size {ram_size}"))?;
        }
        if let Some(clean_ram) = props.get_bool("cleanRam") {
            options.clean_ram = clean_ram;
        }
        if let Some(name) = props.get_str("romName") {
            options.rom =
                MonitorRom::from_name(name).ok_or_else(|| format!("unknown rom '{name}'"))?;
        }
        if let Some(start) = props.get_int("startAddress") {
            options.start_address = u16::try_from(start)
                .map_err(|_| format!("invalid start address {start}"))?;
        }
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_survive_a_property_round_trip() {
        let options = Dream6800Options {
            ram_size: 2048,
            clean_ram: true,
            rom: MonitorRom::ChiposLo,
            start_address: 0,
        };
        let back = Dream6800Options::from_properties(&options.to_properties()).unwrap();
        assert_eq!(back, options);
    }

    #[test]
    fn missing_properties_fall_back_to_defaults() {
        let options = Dream6800Options::from_properties(&Properties::new()).unwrap();
        assert_eq!(options, Dream6800Options::default());
    }

    #[test]
    fn unknown_rom_names_are_rejected() {
        let mut props = Properties::new();
        props.set_str("romName", "MONITOR");
        assert!(Dream6800Options::from_properties(&props).is_err());
    }
}
