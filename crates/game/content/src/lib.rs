//! Data-driven combat content and the monster factory.
//!
//! This crate houses everything the engine treats as an external collaborator:
//! - Equipment catalog (data-driven via RON)
//! - Monster templates, weapon pools and armor rolls (data-driven via RON)
//! - Combat balance configuration (data-driven via TOML)
//! - [`MonsterFactory`]: randomized monster generation per level or tier
//!
//! Content is consumed through `combat-core` oracles and snapshots and never
//! appears inside an encounter by reference.

pub mod catalog;
pub mod factory;

#[cfg(feature = "loaders")]
pub mod builtin;
#[cfg(feature = "loaders")]
pub mod loaders;

pub use catalog::{
    ArmorRoll, BossTemplate, MonsterCatalog, MonsterTemplate, SpecialSpec, Spread, WeaponPool,
};
pub use factory::MonsterFactory;

#[cfg(feature = "loaders")]
pub use loaders::{
    ArmorRecord, ConfigLoader, ContentFactory, EquipmentCatalog, EquipmentLoader, LoadResult,
    MonsterLoader, WeaponRecord,
};
