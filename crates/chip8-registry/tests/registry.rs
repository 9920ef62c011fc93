//! Creating every registered variant and mapping its properties back.

use chip8_core::Properties;
use chip8_registry::{CoreRegistry, PropertySelector, VariantMatch};

/// A minimal 1802 image that satisfies the COSMAC VIP boot contract: it
/// sets up the fetch-loop register and spins at the fetch-loop entry.
const VIP_STUB: &[u8] = &[
    0x71, 0x00, // 0000  DIS
    0xF8, 0x00, 0xB4, // 0002  R4.1 = 00
    0xF8, 0x1B, 0xA4, // 0005  R4.0 = 1B
    0xF8, 0x0E, 0xB2, // 0008  R2.1 = 0E
    0xF8, 0xCF, 0xA2, // 000B  R2.0 = CF
    0xD4, // 000E  SEP R4
    0xC4, 0xC4, 0xC4, 0xC4, 0xC4, 0xC4, // 000F  pad
    0xC4, 0xC4, 0xC4, 0xC4, 0xC4, 0xC4, // 0015  pad
    0x30, 0x1B, // 001B  BR 001B
];

#[test]
fn every_registered_variant_creates_and_maps_back() {
    let registry = CoreRegistry::with_vip_interpreter(VIP_STUB);
    for factory in registry.factories() {
        for (index, variant) in factory.variants().iter().enumerate() {
            let created = registry.create(
                factory.name(),
                variant.name,
                &variant.properties,
                PropertySelector::FromVariant,
            );
            let (name, core) = created.unwrap_or_else(|e| {
                panic!("{}/{}: {e}", factory.name(), variant.name);
            });
            assert_eq!(name, variant.name);
            assert!(!core.core_name().is_empty());
            assert_eq!(
                registry.variant_index(factory.name(), &variant.properties),
                Some(VariantMatch { index, is_custom: false }),
                "{}/{}",
                factory.name(),
                variant.name
            );
        }
    }
}

#[test]
fn names_resolve_loosely() {
    let registry = CoreRegistry::new();
    let props = Properties::new();
    let (name, core) = registry
        .create("Generic Chip 8", "xochip", &props, PropertySelector::FromVariant)
        .unwrap();
    assert_eq!(name, "XO-CHIP");
    assert_eq!(core.core_name(), "XO-CHIP");

    let (name, _) = registry
        .create("DREAM", "chip 8", &props, PropertySelector::FromVariant)
        .unwrap();
    assert_eq!(name, "CHIP-8");
}

#[test]
fn prefixed_variant_names_resolve() {
    let registry = CoreRegistry::new();
    let props = Properties::new();
    let (name, _) = registry
        .create("dream6800", "DREAM-CHIP-8-LOP", &props, PropertySelector::FromVariant)
        .unwrap();
    assert_eq!(name, "CHIP-8-LOP");
}

#[test]
fn given_properties_override_the_variant_preset() {
    let registry = CoreRegistry::new();
    let mut props = Properties::new();
    props.set_str("behaviorBase", "CHIP-8");
    props.set_int("instructionsPerFrame", 30);
    let (_, core) = registry
        .create("generic-chip-8", "CHIP-8", &props, PropertySelector::AsGiven)
        .unwrap();
    assert_eq!(core.core_name(), "CHIP-8");
    assert_eq!(
        registry.variant_index("generic-chip-8", &props),
        Some(VariantMatch { index: 0, is_custom: true })
    );
}

#[test]
fn unknown_names_are_reported() {
    let registry = CoreRegistry::new();
    let props = Properties::new();
    assert!(registry
        .create("gameboy", "NONE", &props, PropertySelector::FromVariant)
        .is_err());
    assert!(registry
        .create("dream6800", "SCHIP", &props, PropertySelector::FromVariant)
        .is_err());
    assert_eq!(registry.variant_index("gameboy", &props), None);
}

#[test]
fn the_vip_chip8_variant_needs_a_registered_interpreter() {
    let props = Properties::new();
    let bare = CoreRegistry::new();
    assert!(bare.create("VIP", "CHIP-8", &props, PropertySelector::FromVariant).is_err());
    assert!(bare.create("VIP", "NONE", &props, PropertySelector::FromVariant).is_ok());

    let loaded = CoreRegistry::with_vip_interpreter(VIP_STUB);
    let (name, core) = loaded
        .create("cosmac vip", "CHIP-8", &props, PropertySelector::FromVariant)
        .unwrap();
    assert_eq!(name, "CHIP-8");
    assert_eq!(core.core_name(), "COSMAC-VIP");
}
