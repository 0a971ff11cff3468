//! Equipment catalog loader.

use std::collections::HashSet;
use std::path::Path;

use combat_core::{ArmorDefinition, ArmorSlot, StaticEquipment, WeaponCategory, WeaponDefinition};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Weapon entry as authored in RON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponRecord {
    pub id: String,
    pub name: String,
    pub attack: u32,
    pub category: WeaponCategory,
}

/// Armor entry as authored in RON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArmorRecord {
    pub id: String,
    pub name: String,
    pub defense: u32,
    pub slot: ArmorSlot,
}

/// Equipment catalog structure for RON files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EquipmentCatalog {
    #[serde(default)]
    pub weapons: Vec<WeaponRecord>,
    #[serde(default)]
    pub armor: Vec<ArmorRecord>,
}

impl EquipmentCatalog {
    /// Converts the catalog into an oracle keyed by identifier.
    pub fn into_oracle(self) -> StaticEquipment {
        let mut equipment = StaticEquipment::new();
        for weapon in self.weapons {
            equipment.insert_weapon(
                weapon.id,
                WeaponDefinition::new(weapon.name, weapon.attack, weapon.category),
            );
        }
        for armor in self.armor {
            equipment.insert_armor(armor.id, ArmorDefinition::new(armor.name, armor.defense, armor.slot));
        }
        equipment
    }

    fn check_unique_ids(&self) -> LoadResult<()> {
        let mut seen = HashSet::new();
        for id in self
            .weapons
            .iter()
            .map(|w| w.id.as_str())
            .chain(self.armor.iter().map(|a| a.id.as_str()))
        {
            anyhow::ensure!(seen.insert(id), "Duplicate equipment id '{}'", id);
        }
        Ok(())
    }
}

/// Loader for the equipment catalog from RON files.
pub struct EquipmentLoader;

impl EquipmentLoader {
    /// Load equipment catalog from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing EquipmentCatalog
    ///
    /// # Returns
    ///
    /// Returns a StaticEquipment oracle.
    pub fn load(path: &Path) -> LoadResult<StaticEquipment> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse catalog RON. Identifiers must be unique across weapons and armor.
    pub fn parse(content: &str) -> LoadResult<StaticEquipment> {
        let catalog: EquipmentCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse equipment catalog RON: {}", e))?;
        catalog.check_unique_ids()?;
        Ok(catalog.into_oracle())
    }
}
