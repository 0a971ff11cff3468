//! Randomized monster generation.
//!
//! The factory is the only place randomness enters a monster snapshot. The
//! engine receives a finished [`Monster`] and never rolls template spreads
//! itself.

use combat_core::{EquipmentOracle, Monster};
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, warn};

use crate::catalog::{MonsterCatalog, MonsterTemplate, build_specials};

/// Levels a tier spans: tier `t` covers levels `2t - 1` and `2t`.
const LEVELS_PER_TIER: u32 = 2;

/// Builds monster snapshots from a catalog and an equipment oracle.
pub struct MonsterFactory<'a> {
    catalog: &'a MonsterCatalog,
    equipment: &'a dyn EquipmentOracle,
}

impl<'a> MonsterFactory<'a> {
    pub fn new(catalog: &'a MonsterCatalog, equipment: &'a dyn EquipmentOracle) -> Self {
        Self { catalog, equipment }
    }

    /// Rolls a level inside the tier's band, clamped to the catalog.
    pub fn level_for_tier(&self, tier: u32, rng: &mut impl Rng) -> u32 {
        let low = tier
            .saturating_sub(1)
            .saturating_mul(LEVELS_PER_TIER)
            .saturating_add(1);
        let high = low.saturating_add(LEVELS_PER_TIER - 1);
        let level = rng.gen_range(low..=high);
        level.min(self.catalog.max_level())
    }

    /// Generates a monster for a room of the given tier.
    pub fn spawn_for_tier(&self, tier: u32, rng: &mut impl Rng) -> Option<Monster> {
        let level = self.level_for_tier(tier, rng);
        self.spawn(level, rng)
    }

    /// Generates a monster of the given level.
    ///
    /// Returns `None` only when the catalog has no templates.
    pub fn spawn(&self, level: u32, rng: &mut impl Rng) -> Option<Monster> {
        let template = self.catalog.template(level)?;
        let level = level.max(1);
        let mut monster = Monster::new(
            template.name.clone(),
            level,
            template.hp.roll(rng),
            template.attack.roll(rng),
            template.defense,
        )
        .with_specials(build_specials(&template.name, &template.specials));

        if let Some(weapon) = self.roll_weapon(template, level, rng) {
            monster = monster.with_weapon(weapon);
        }
        for armor in self.roll_armor(level, rng) {
            monster = monster.with_armor(armor);
        }

        debug!(
            monster = %monster.name,
            level,
            hp = monster.max_hp(),
            attack = monster.base_damage(),
            defense = monster.armored_defense(),
            "monster spawned"
        );
        Some(monster)
    }

    /// The fixed boss. No spreads, no equipment rolls.
    pub fn boss(&self) -> Monster {
        let boss = &self.catalog.boss;
        Monster::new(boss.name.clone(), boss.level.max(1), boss.hp, boss.attack, boss.defense)
            .with_specials(build_specials(&boss.name, &boss.specials))
            .as_boss()
    }

    fn roll_weapon(
        &self,
        template: &MonsterTemplate,
        level: u32,
        rng: &mut impl Rng,
    ) -> Option<combat_core::WeaponDefinition> {
        if !template.armed {
            return None;
        }
        let id = self.catalog.weapon_pool(level)?.weapons.choose(rng)?;
        let weapon = self.equipment.weapon(id);
        if weapon.is_none() {
            warn!(weapon = %id, "monster weapon missing from equipment catalog");
        }
        weapon
    }

    fn roll_armor(&self, level: u32, rng: &mut impl Rng) -> Vec<combat_core::ArmorDefinition> {
        self.catalog
            .armor_rolls
            .iter()
            .filter(|roll| level >= roll.min_level)
            .filter(|roll| rng.gen_bool(roll.chance.clamp(0.0, 1.0)))
            .filter_map(|roll| {
                let armor = self.equipment.armor(&roll.armor);
                if armor.is_none() {
                    warn!(armor = %roll.armor, "monster armor missing from equipment catalog");
                }
                armor
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use combat_core::{ArmorDefinition, ArmorSlot, StaticEquipment, WeaponCategory, WeaponDefinition};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::catalog::{ArmorRoll, BossTemplate, SpecialSpec, Spread, WeaponPool};

    fn equipment() -> StaticEquipment {
        StaticEquipment::new()
            .with_weapon("brute_club", WeaponDefinition::new("Brute Club", 3, WeaponCategory::Unarmed))
            .with_armor("leather_cap", ArmorDefinition::new("Leather Cap", 2, ArmorSlot::Helmet))
            .with_armor("iron_boots", ArmorDefinition::new("Iron Boots", 4, ArmorSlot::Boots))
    }

    fn catalog() -> MonsterCatalog {
        MonsterCatalog {
            templates: vec![
                MonsterTemplate {
                    level: 1,
                    name: "Giant Rat".into(),
                    hp: Spread { base: 100, spread: 10 },
                    attack: Spread { base: 8, spread: 3 },
                    defense: 3,
                    armed: true,
                    specials: vec![
                        SpecialSpec {
                            name: "Bite".into(),
                            damage_delta: 0,
                            cooldown: 0,
                            effects: Vec::new(),
                        },
                    ],
                },
                MonsterTemplate {
                    level: 2,
                    name: "Stone Elemental".into(),
                    hp: Spread::fixed(210),
                    attack: Spread::fixed(33),
                    defense: 22,
                    armed: false,
                    specials: Vec::new(),
                },
            ],
            weapon_pools: vec![WeaponPool {
                max_level: 10,
                weapons: vec!["brute_club".into()],
            }],
            armor_rolls: vec![
                ArmorRoll { armor: "leather_cap".into(), min_level: 0, chance: 1.0 },
                ArmorRoll { armor: "iron_boots".into(), min_level: 2, chance: 1.0 },
            ],
            boss: BossTemplate {
                name: "Shapeshifter Mother".into(),
                level: 20,
                hp: 400,
                attack: 35,
                defense: 0,
                specials: Vec::new(),
            },
        }
    }

    #[test]
    fn spawned_monsters_follow_their_template() {
        let catalog = catalog();
        let equipment = equipment();
        let factory = MonsterFactory::new(&catalog, &equipment);
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..50 {
            let rat = factory.spawn(1, &mut rng).expect("template exists");
            assert_eq!(rat.name, "Giant Rat");
            assert!((100..110).contains(&rat.max_hp()));
            assert!((8..11).contains(&rat.attack));
            assert_eq!(rat.weapon.as_ref().map(|w| w.name.as_str()), Some("Brute Club"));
            // leather cap only: iron boots need level 2
            assert_eq!(rat.armored_defense(), 3 + 2);
            assert_eq!(rat.specials.len(), 1);
        }
    }

    #[test]
    fn unarmed_templates_never_get_weapons() {
        let catalog = catalog();
        let equipment = equipment();
        let factory = MonsterFactory::new(&catalog, &equipment);
        let mut rng = StdRng::seed_from_u64(2);
        let elemental = factory.spawn(2, &mut rng).expect("template exists");
        assert!(elemental.weapon.is_none());
        assert_eq!(elemental.armored_defense(), 22 + 2 + 4);
    }

    #[test]
    fn tier_levels_stay_in_band() {
        let catalog = catalog();
        let equipment = equipment();
        let factory = MonsterFactory::new(&catalog, &equipment);
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let level = factory.level_for_tier(1, &mut rng);
            assert!((1..=2).contains(&level));
            // catalog tops out at level 2
            assert_eq!(factory.level_for_tier(4, &mut rng), 2);
        }
    }

    #[test]
    fn huge_tiers_clamp_to_the_top_level() {
        let catalog = catalog();
        let equipment = equipment();
        let factory = MonsterFactory::new(&catalog, &equipment);
        let mut rng = StdRng::seed_from_u64(4);
        assert_eq!(factory.level_for_tier(u32::MAX, &mut rng), 2);
        assert!((1..=2).contains(&factory.level_for_tier(0, &mut rng)));
        let elemental = factory.spawn_for_tier(u32::MAX / 2, &mut rng).expect("monster");
        assert_eq!(elemental.name, "Stone Elemental");
    }

    #[test]
    fn boss_is_fixed() {
        let catalog = catalog();
        let equipment = equipment();
        let boss = MonsterFactory::new(&catalog, &equipment).boss();
        assert!(boss.boss);
        assert_eq!(boss.max_hp(), 400);
        assert_eq!(boss.base_damage(), 35);
        assert_eq!(boss.effective_defense(), 0);
    }
}
