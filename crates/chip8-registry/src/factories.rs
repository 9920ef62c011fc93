//! The built-in core factories.

use chip8_core::{Chip8Core, Properties};
use chip8_generic::{Chip8Generic, Preset, Quirks};
use emu_cosmac_vip::{CosmacVip, CosmacVipOptions};
use emu_dream6800::{Dream6800, Dream6800Options, MonitorRom};

use crate::registry::{CoreFactory, Variant, VariantMatch};

/// The quirk-parameterized interpreter, one variant per behavior preset.
pub struct GenericFactory;

impl CoreFactory for GenericFactory {
    fn name(&self) -> &'static str {
        "generic-chip-8"
    }

    fn prefix(&self) -> &'static str {
        ""
    }

    fn description(&self) -> &'static str {
        "Generic CHIP-8 interpreter covering the family variants"
    }

    fn variants(&self) -> Vec<Variant> {
        Preset::ALL
            .into_iter()
            .map(|p| Variant {
                name: p.name(),
                description: p.description(),
                properties: p.quirks().to_properties(),
            })
            .collect()
    }

    fn create(&self, _variant: usize, props: &Properties) -> Result<Box<dyn Chip8Core>, String> {
        let quirks = Quirks::from_properties(props)?;
        Ok(Box::new(Chip8Generic::new(quirks)?))
    }

    fn variant_index(&self, props: &Properties) -> VariantMatch {
        let preset = props
            .get_str("behaviorBase")
            .and_then(Preset::from_name)
            .unwrap_or(Preset::Chip8);
        let index = Preset::ALL
            .into_iter()
            .position(|p| p == preset)
            .unwrap_or(0);
        let is_custom = match Quirks::from_properties(props) {
            Ok(quirks) => quirks != preset.quirks(),
            Err(_) => true,
        };
        VariantMatch { index, is_custom }
    }
}

/// The DREAM6800 board with its CHIPOS monitor variants.
pub struct Dream6800Factory;

impl Dream6800Factory {
    fn variant_options() -> [(&'static str, &'static str, Dream6800Options); 3] {
        [
            (
                "NONE",
                "Raw DREAM6800 with 2KB and no program mapping",
                Dream6800Options {
                    ram_size: 2048,
                    start_address: 0,
                    ..Dream6800Options::default()
                },
            ),
            (
                "CHIP-8",
                "DREAM6800 running CHIP-8 under CHIPOS",
                Dream6800Options::default(),
            ),
            (
                "CHIP-8-LOP",
                "DREAM6800 running CHIP-8 under CHIPOSLO with logic opcodes",
                Dream6800Options { rom: MonitorRom::ChiposLo, ..Dream6800Options::default() },
            ),
        ]
    }
}

impl CoreFactory for Dream6800Factory {
    fn name(&self) -> &'static str {
        "dream6800"
    }

    fn prefix(&self) -> &'static str {
        "DREAM"
    }

    fn description(&self) -> &'static str {
        "Michael Bauer's DREAM6800 with a M6800 running CHIPOS"
    }

    fn variants(&self) -> Vec<Variant> {
        Self::variant_options()
            .into_iter()
            .map(|(name, description, options)| Variant {
                name,
                description,
                properties: options.to_properties(),
            })
            .collect()
    }

    fn create(&self, _variant: usize, props: &Properties) -> Result<Box<dyn Chip8Core>, String> {
        let options = Dream6800Options::from_properties(props)?;
        Ok(Box::new(Dream6800::new(options)?))
    }

    fn variant_index(&self, props: &Properties) -> VariantMatch {
        let Ok(options) = Dream6800Options::from_properties(props) else {
            return VariantMatch { index: 0, is_custom: true };
        };
        let index = if options.start_address != 0x200 {
            0
        } else if options.rom == MonitorRom::Chipos {
            1
        } else {
            2
        };
        let is_custom = options != Self::variant_options()[index].2;
        VariantMatch { index, is_custom }
    }
}

/// The COSMAC VIP board. The CHIP-8 variant needs an interpreter image,
/// which is not bundled; without one only the bare variant can be created.
pub struct CosmacVipFactory {
    interpreter: Option<Vec<u8>>,
}

impl CosmacVipFactory {
    #[must_use]
    pub fn new(interpreter: Option<Vec<u8>>) -> Self {
        Self { interpreter }
    }

    fn variant_options() -> [(&'static str, &'static str, CosmacVipOptions); 2] {
        [
            (
                "NONE",
                "Raw COSMAC VIP with no interpreter installed",
                CosmacVipOptions { start_address: 0, ..CosmacVipOptions::default() },
            ),
            (
                "CHIP-8",
                "COSMAC VIP running the CHIP-8 interpreter",
                CosmacVipOptions::default(),
            ),
        ]
    }
}

impl CoreFactory for CosmacVipFactory {
    fn name(&self) -> &'static str {
        "cosmac-vip"
    }

    fn prefix(&self) -> &'static str {
        "VIP"
    }

    fn description(&self) -> &'static str {
        "RCA's COSMAC VIP with a CDP1802 and CDP1861 pixie video"
    }

    fn variants(&self) -> Vec<Variant> {
        Self::variant_options()
            .into_iter()
            .map(|(name, description, options)| Variant {
                name,
                description,
                properties: options.to_properties(),
            })
            .collect()
    }

    fn create(&self, variant: usize, props: &Properties) -> Result<Box<dyn Chip8Core>, String> {
        let options = CosmacVipOptions::from_properties(props)?;
        let mut machine = CosmacVip::new(options)?;
        if variant == 1 {
            let image = self
                .interpreter
                .as_deref()
                .ok_or_else(|| "no CHIP-8 interpreter image registered".to_string())?;
            machine.patch_interpreter(image)?;
        }
        Ok(Box::new(machine))
    }

    fn variant_index(&self, props: &Properties) -> VariantMatch {
        let Ok(options) = CosmacVipOptions::from_properties(props) else {
            return VariantMatch { index: 0, is_custom: true };
        };
        let index = usize::from(options.start_address != 0);
        let is_custom = options != Self::variant_options()[index].2;
        VariantMatch { index, is_custom }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn the_generic_factory_offers_every_preset() {
        let variants = GenericFactory.variants();
        assert_eq!(variants.len(), Preset::ALL.len());
        assert_eq!(variants[0].name, "CHIP-8");
        assert_eq!(variants[10].name, "XO-CHIP");
    }

    #[test]
    fn dream_variants_map_back_from_their_own_properties() {
        for (index, variant) in Dream6800Factory.variants().iter().enumerate() {
            let m = Dream6800Factory.variant_index(&variant.properties);
            assert_eq!(m, VariantMatch { index, is_custom: false }, "{}", variant.name);
        }
    }

    #[test]
    fn modified_dream_properties_count_as_custom() {
        let mut props = Dream6800Options::default().to_properties();
        props.set_int("ramSize", 2048);
        let m = Dream6800Factory.variant_index(&props);
        assert_eq!(m, VariantMatch { index: 1, is_custom: true });
    }

    #[test]
    fn the_vip_chip8_variant_needs_an_interpreter() {
        let factory = CosmacVipFactory::new(None);
        let props = CosmacVipOptions::default().to_properties();
        assert!(factory.create(1, &props).is_err());
        let bare = CosmacVipOptions { start_address: 0, ..CosmacVipOptions::default() };
        assert!(factory.create(0, &bare.to_properties()).is_ok());
    }
}
