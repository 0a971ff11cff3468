//! Content loaders for reading combat data from files.
//!
//! This module provides loaders that convert RON/TOML files into the records
//! `combat-core` consumes. Every loader also exposes a `parse` entry point so
//! embedded copies can share the same validation.

pub mod config;
pub mod equipment;
pub mod factory;
pub mod monsters;

pub use config::ConfigLoader;
pub use equipment::{ArmorRecord, EquipmentCatalog, EquipmentLoader, WeaponRecord};
pub use factory::ContentFactory;
pub use monsters::MonsterLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
