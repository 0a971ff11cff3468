//! Read-only collaborators the engine consults during an encounter.
//!
//! Mirrors the oracle pattern: the engine never owns catalog data, it asks
//! an oracle by identifier and copies the record it needs.

mod items;
mod rng;

pub use items::{
    ArmorDefinition, ArmorSlot, EquipmentOracle, StaticEquipment, WeaponCategory,
    WeaponDefinition, armor_slots, total_defense,
};
pub use rng::{PcgRng, RandomSource, SequenceRng};
