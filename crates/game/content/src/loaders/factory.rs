//! Content factory for building combat content from data files.

use std::path::{Path, PathBuf};

use combat_core::{CombatConfig, StaticEquipment};

use crate::catalog::MonsterCatalog;
use crate::loaders::{ConfigLoader, EquipmentLoader, LoadResult, MonsterLoader};

/// Content factory that loads all combat content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── combat.toml
/// ├── equipment.ron
/// └── monsters.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    ///
    /// # Arguments
    ///
    /// * `data_dir` - Path to the directory containing data files
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load combat configuration from `combat.toml`.
    pub fn load_config(&self) -> LoadResult<CombatConfig> {
        ConfigLoader::load(&self.data_dir.join("combat.toml"))
    }

    /// Load the equipment catalog from `equipment.ron`.
    pub fn load_equipment(&self) -> LoadResult<StaticEquipment> {
        EquipmentLoader::load(&self.data_dir.join("equipment.ron"))
    }

    /// Load the monster catalog from `monsters.ron`, checked against `equipment`.
    pub fn load_monsters(&self, equipment: &StaticEquipment) -> LoadResult<MonsterCatalog> {
        let catalog = MonsterLoader::load(&self.data_dir.join("monsters.ron"))?;
        MonsterLoader::check_equipment(&catalog, equipment)?;
        Ok(catalog)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
