//! The factory table and name resolution.

use chip8_core::{Chip8Core, Properties};

use crate::factories::{CosmacVipFactory, Dream6800Factory, GenericFactory};

/// Whether `create` configures the core from the chosen variant's preset or
/// from the property bag handed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertySelector {
    FromVariant,
    AsGiven,
}

/// One selectable preset of a core.
#[derive(Debug, Clone)]
pub struct Variant {
    pub name: &'static str,
    pub description: &'static str,
    pub properties: Properties,
}

/// Which variant a property bag corresponds to. `is_custom` is set when the
/// bag deviates from the variant's preset values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantMatch {
    pub index: usize,
    pub is_custom: bool,
}

/// A core implementation the registry can instantiate.
pub trait CoreFactory {
    /// Registry key, e.g. `generic-chip-8`.
    fn name(&self) -> &'static str;

    /// Short tag prepended to variant names for lookup (`DREAM-CHIP-8`);
    /// empty for cores whose variant names stand on their own.
    fn prefix(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn variants(&self) -> Vec<Variant>;

    fn create(
        &self,
        variant: usize,
        properties: &Properties,
    ) -> Result<Box<dyn Chip8Core>, String>;

    /// Maps a property bag back onto the variant list.
    fn variant_index(&self, properties: &Properties) -> VariantMatch;
}

/// Lookup names ignore case and punctuation, so `xo chip`, `XO-CHIP` and
/// `XoChip` all name the same thing.
fn option_name(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

pub(crate) fn fuzzy_eq(a: &str, b: &str) -> bool {
    option_name(a) == option_name(b)
}

/// The table of known cores.
pub struct CoreRegistry {
    factories: Vec<Box<dyn CoreFactory>>,
}

impl Default for CoreRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CoreRegistry {
    /// Registers the built-in factories. The COSMAC VIP is registered
    /// without an interpreter image and only offers its bare variant; use
    /// [`CoreRegistry::with_vip_interpreter`] to unlock the CHIP-8 variant.
    #[must_use]
    pub fn new() -> Self {
        Self {
            factories: vec![
                Box::new(GenericFactory),
                Box::new(Dream6800Factory),
                Box::new(CosmacVipFactory::new(None)),
            ],
        }
    }

    /// Like `new`, with a CHIP-8 interpreter image for the COSMAC VIP.
    #[must_use]
    pub fn with_vip_interpreter(image: &[u8]) -> Self {
        Self {
            factories: vec![
                Box::new(GenericFactory),
                Box::new(Dream6800Factory),
                Box::new(CosmacVipFactory::new(Some(image.to_vec()))),
            ],
        }
    }

    pub fn factories(&self) -> impl Iterator<Item = &dyn CoreFactory> {
        self.factories.iter().map(Box::as_ref)
    }

    #[must_use]
    pub fn factory(&self, name: &str) -> Option<&dyn CoreFactory> {
        self.factories
            .iter()
            .map(Box::as_ref)
            .find(|f| fuzzy_eq(f.name(), name))
            .or_else(|| {
                self.factories
                    .iter()
                    .map(Box::as_ref)
                    .find(|f| !f.prefix().is_empty() && fuzzy_eq(f.prefix(), name))
            })
    }

    /// Instantiates a core by (fuzzy) core and variant name. Returns the
    /// canonical variant name together with the core.
    pub fn create(
        &self,
        name: &str,
        variant: &str,
        properties: &Properties,
        selector: PropertySelector,
    ) -> Result<(String, Box<dyn Chip8Core>), String> {
        let factory = self.factory(name).ok_or_else(|| format!("unknown core '{name}'"))?;
        let variants = factory.variants();
        let index = variants
            .iter()
            .position(|v| {
                fuzzy_eq(v.name, variant)
                    || (!factory.prefix().is_empty()
                        && fuzzy_eq(&format!("{}-{}", factory.prefix(), v.name), variant))
            })
            .ok_or_else(|| {
                format!("unknown variant '{variant}' for core '{}'", factory.name())
            })?;
        let effective = match selector {
            PropertySelector::FromVariant => &variants[index].properties,
            PropertySelector::AsGiven => properties,
        };
        let core = factory.create(index, effective)?;
        Ok((variants[index].name.to_string(), core))
    }

    /// Maps a property bag onto a core's variant list.
    #[must_use]
    pub fn variant_index(&self, name: &str, properties: &Properties) -> Option<VariantMatch> {
        self.factory(name).map(|f| f.variant_index(properties))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_match_loosely() {
        assert!(fuzzy_eq("XO-CHIP", "xo chip"));
        assert!(fuzzy_eq("SCHIP-1.1", "schip11"));
        assert!(!fuzzy_eq("CHIP-8", "CHIP-10"));
    }

    #[test]
    fn cores_resolve_by_name_and_prefix() {
        let registry = CoreRegistry::new();
        assert!(registry.factory("generic-chip-8").is_some());
        assert!(registry.factory("Generic Chip 8").is_some());
        assert_eq!(registry.factory("DREAM").unwrap().name(), "dream6800");
        assert_eq!(registry.factory("vip").unwrap().name(), "cosmac-vip");
        assert!(registry.factory("gameboy").is_none());
    }
}
