//! COSMAC VIP machine configuration.

use chip8_core::Properties;

/// Board configuration. The clock is fixed at 1.76064 MHz; the stock board
/// shipped with 2KB and took 4KB with the expansion fitted.
///
/// The CHIP-8 interpreter image is not part of the options: it is data, like
/// a program, and gets installed with [`crate::CosmacVip::patch_interpreter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CosmacVipOptions {
    pub ram_size: u32,
    /// Zero the RAM on reset instead of filling it with the power-on pattern.
    pub clean_ram: bool,
    /// Where `load_data` places a program when no address is given.
    pub start_address: u16,
}

impl Default for CosmacVipOptions {
    fn default() -> Self {
        Self { ram_size: 4096, clean_ram: false, start_address: 0x200 }
    }
}

impl CosmacVipOptions {
    #[must_use]
    pub fn to_properties(&self) -> Properties {
        let mut props = Properties::new();
        props.set_int("ramSize", i64::from(self.ram_size));
        props.set_bool("cleanRam", self.clean_ram);
        props.set_int("startAddress", i64::from(self.start_address));
        props
    }

    /// Builds options from a property bag, starting from the defaults for
    /// anything absent.
    pub fn from_properties(props: &Properties) -> Result<CosmacVipOptions, String> {
        let mut options = CosmacVipOptions::default();
        if let Some(ram_size) = props.get_int("ramSize") {
            options.ram_size =
                u32::try_from(ram_size).map_err(|_| format!("invalid ram size {ram_size}"))?;
        }
        if let Some(clean_ram) = props.get_bool("cleanRam") {
            options.clean_ram = clean_ram;
        }
        if let Some(start) = props.get_int("startAddress") {
            options.start_address =
                u16::try_from(start).map_err(|_| format!("invalid start address {start}"))?;
        }
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_survive_a_property_round_trip() {
        let options =
            CosmacVipOptions { ram_size: 2048, clean_ram: true, start_address: 0x300 };
        let back = CosmacVipOptions::from_properties(&options.to_properties()).unwrap();
        assert_eq!(back, options);
    }

    #[test]
    fn missing_properties_fall_back_to_defaults() {
        let options = CosmacVipOptions::from_properties(&Properties::new()).unwrap();
        assert_eq!(options, CosmacVipOptions::default());
    }

    #[test]
    fn negative_sizes_are_rejected() {
        let mut props = Properties::new();
        props.set_int("ramSize", -1);
        assert!(CosmacVipOptions::from_properties(&props).is_err());
    }
}
