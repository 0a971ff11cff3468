//! Content shipped inside the binary.
//!
//! The same files live under `data/` and can be overridden by pointing a
//! [`ContentFactory`](crate::ContentFactory) at another directory.

use combat_core::{CombatConfig, StaticEquipment};

use crate::catalog::MonsterCatalog;
use crate::loaders::{ConfigLoader, EquipmentLoader, LoadResult, MonsterLoader};

const COMBAT_TOML: &str = include_str!("../data/combat.toml");
const EQUIPMENT_RON: &str = include_str!("../data/equipment.ron");
const MONSTERS_RON: &str = include_str!("../data/monsters.ron");

pub fn config() -> LoadResult<CombatConfig> {
    ConfigLoader::parse(COMBAT_TOML)
}

pub fn equipment() -> LoadResult<StaticEquipment> {
    EquipmentLoader::parse(EQUIPMENT_RON)
}

pub fn monsters(equipment: &StaticEquipment) -> LoadResult<MonsterCatalog> {
    let catalog = MonsterLoader::parse(MONSTERS_RON)?;
    MonsterLoader::check_equipment(&catalog, equipment)?;
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use combat_core::{EquipmentOracle, StatusEffectKind, WeaponCategory};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::MonsterFactory;

    #[test]
    fn builtin_content_is_consistent() {
        let equipment = equipment().expect("equipment");
        let catalog = monsters(&equipment).expect("monsters");
        assert_eq!(config().expect("config"), CombatConfig::default());

        let levels: Vec<u32> = catalog.templates.iter().map(|t| t.level).collect();
        assert_eq!(levels, (1..=10).collect::<Vec<_>>());
        assert_eq!(catalog.boss.name, "Shapeshifter Mother");
        assert_eq!(
            equipment.weapon("iron_sword").map(|w| w.category),
            Some(WeaponCategory::Sword)
        );
    }

    #[test]
    fn builtin_monsters_spawn_for_every_tier() {
        let equipment = equipment().expect("equipment");
        let catalog = monsters(&equipment).expect("monsters");
        let factory = MonsterFactory::new(&catalog, &equipment);
        let mut rng = StdRng::seed_from_u64(42);

        for tier in 1..=5 {
            let monster = factory.spawn_for_tier(tier, &mut rng).expect("monster");
            assert!(monster.validate().is_ok());
            assert!(monster.level() >= tier * 2 - 1);
        }

        let rat = factory.spawn(1, &mut rng).expect("rat");
        assert_eq!(rat.name, "Giant Rat");
        let names: Vec<&str> = rat.specials.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Bite", "Venom Bite"]);

        let elemental = factory.spawn(8, &mut rng).expect("elemental");
        let stone_skin = elemental.specials.get(1).expect("stone skin");
        assert_eq!(stone_skin.name, "Stone Skin");
        assert_eq!(stone_skin.effects[0].kind, StatusEffectKind::Shield);

        // top-level monsters always wear the reinforced chest and boots
        let dragon = factory.spawn(10, &mut rng).expect("dragon");
        assert!(dragon.weapon.is_none());
        assert!(dragon.armored_defense() >= 30 + 8 + 4);
    }
}
