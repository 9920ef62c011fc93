//! Registry of the CHIP-8 family cores.
//!
//! Frontends instantiate cores by name through a [`CoreRegistry`]: each
//! registered [`CoreFactory`] exposes a list of named [`Variant`] presets as
//! property bags, and [`CoreRegistry::create`] resolves loosely-written core
//! and variant names to a boxed [`chip8_core::Chip8Core`]. The reverse
//! mapping, from a property bag back to the closest preset, goes through
//! `variant_index`.

mod factories;
mod registry;

pub use factories::{CosmacVipFactory, Dream6800Factory, GenericFactory};
pub use registry::{CoreFactory, CoreRegistry, PropertySelector, Variant, VariantMatch};
