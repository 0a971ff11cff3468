//! Monster catalog loader.
//!
//! Loads templates, weapon pools, armor rolls and the boss from one RON file.

use std::collections::HashSet;
use std::path::Path;

use combat_core::{CombatConfig, EquipmentOracle, SnapshotError};

use crate::catalog::{MonsterCatalog, SpecialSpec};
use crate::loaders::{LoadResult, read_file};

/// Loader for the monster catalog from RON files.
pub struct MonsterLoader;

impl MonsterLoader {
    /// Load monster catalog from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing MonsterCatalog
    ///
    /// # Returns
    ///
    /// Returns the validated MonsterCatalog.
    pub fn load(path: &Path) -> LoadResult<MonsterCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse and validate catalog RON.
    ///
    /// Rejects an empty template list, duplicate template levels, special
    /// tables over capacity, zero HP and armor chances outside `[0, 1]`.
    pub fn parse(content: &str) -> LoadResult<MonsterCatalog> {
        let catalog: MonsterCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse monster catalog RON: {}", e))?;

        anyhow::ensure!(!catalog.templates.is_empty(), "Monster catalog has no templates");

        let mut levels = HashSet::new();
        for template in &catalog.templates {
            anyhow::ensure!(
                levels.insert(template.level),
                "Duplicate monster template for level {}",
                template.level
            );
            anyhow::ensure!(template.hp.base > 0, "Monster '{}' has zero base HP", template.name);
            check_specials(&template.name, &template.specials)?;
        }

        anyhow::ensure!(catalog.boss.hp > 0, "Boss '{}' has zero HP", catalog.boss.name);
        check_specials(&catalog.boss.name, &catalog.boss.specials)?;

        for roll in &catalog.armor_rolls {
            anyhow::ensure!(
                (0.0..=1.0).contains(&roll.chance),
                "Armor roll '{}' has chance {} outside [0, 1]",
                roll.armor,
                roll.chance
            );
        }

        Ok(catalog)
    }

    /// Checks every weapon and armor identifier against an equipment oracle.
    pub fn check_equipment(catalog: &MonsterCatalog, equipment: &dyn EquipmentOracle) -> LoadResult<()> {
        for pool in &catalog.weapon_pools {
            for id in &pool.weapons {
                anyhow::ensure!(
                    equipment.weapon(id).is_some(),
                    "Weapon pool (max level {}) references unknown weapon '{}'",
                    pool.max_level,
                    id
                );
            }
        }
        for roll in &catalog.armor_rolls {
            anyhow::ensure!(
                equipment.armor(&roll.armor).is_some(),
                "Armor roll references unknown armor '{}'",
                roll.armor
            );
        }
        Ok(())
    }
}

fn check_specials(owner: &str, specials: &[SpecialSpec]) -> LoadResult<()> {
    if specials.len() > CombatConfig::MAX_SPECIAL_ATTACKS {
        return Err(SnapshotError::TooManySpecials {
            name: owner.to_string(),
        }
        .into());
    }
    for special in specials {
        anyhow::ensure!(
            special.effects.len() <= CombatConfig::MAX_EFFECTS_PER_ATTACK,
            "'{}' special '{}' has too many effects",
            owner,
            special.name
        );
    }
    Ok(())
}
