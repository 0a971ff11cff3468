//! Effective attack and defense derivation.
//!
//! # Formulas
//!
//! ```text
//! attack  = floor((class_attack + (level - 1) * 2 + weapon + strength_buff) * form)
//! defense = class_defense + (level - 1) + armor + endurance_buff
//! form    = 1.5 for a transformed werewolf, 1.0 otherwise
//! ```
//!
//! Transformation is a pure function of the current HP snapshot and is never
//! cached; callers recompute after anything that changes HP.

use crate::action::ActionKind;
use crate::config::CombatConfig;
use crate::env::{ArmorDefinition, EquipmentOracle, WeaponDefinition, total_defense};
use crate::state::Combatant;

/// Attack multiplier while transformed, in tenths.
const TRANSFORMED_ATTACK_TENTHS: u64 = 15;

/// True if `hp / max_hp` is strictly below `threshold_percent`.
pub fn below_threshold(hp: u32, max_hp: u32, threshold_percent: u32) -> bool {
    max_hp > 0 && u64::from(hp) * 100 < u64::from(max_hp) * u64::from(threshold_percent)
}

/// Whether the combatant is currently in transformed form.
pub fn is_transformed(combatant: &Combatant, config: &CombatConfig) -> bool {
    combatant.class.capabilities().transforms()
        && below_threshold(
            combatant.hp(),
            combatant.max_hp(),
            config.transform_threshold_percent,
        )
}

/// Resolves the equipped weapon, falling back to the class unarmed profile
/// when nothing is equipped or the identifier is unknown.
pub fn resolve_weapon(
    combatant: &Combatant,
    equipment: &(impl EquipmentOracle + ?Sized),
    config: &CombatConfig,
) -> WeaponDefinition {
    combatant
        .loadout
        .weapon
        .as_deref()
        .and_then(|id| equipment.weapon(id))
        .unwrap_or_else(|| {
            combatant
                .class
                .capabilities()
                .unarmed(is_transformed(combatant, config))
        })
}

/// Resolves equipped armor pieces; unknown identifiers are skipped.
pub fn resolve_armor(
    combatant: &Combatant,
    equipment: &(impl EquipmentOracle + ?Sized),
) -> Vec<ArmorDefinition> {
    combatant
        .loadout
        .armor_ids()
        .filter_map(|id| equipment.armor(id))
        .collect()
}

/// Effective attack before action multiplier and class action bonus.
pub fn compute_attack(
    combatant: &Combatant,
    weapon: &WeaponDefinition,
    config: &CombatConfig,
) -> u32 {
    let transformed = is_transformed(combatant, config);
    let class = combatant.class.capabilities().base_attack(transformed);
    let level = combatant.level().saturating_sub(1) * 2;
    let sum = u64::from(class)
        + u64::from(level)
        + u64::from(weapon.attack)
        + u64::from(combatant.buffs().strength);

    let scaled = if transformed {
        sum * TRANSFORMED_ATTACK_TENTHS / 10
    } else {
        sum
    };
    scaled.min(u64::from(u32::MAX)) as u32
}

/// Effective defense before stances and status modifiers.
pub fn compute_defense(
    combatant: &Combatant,
    armor: &[ArmorDefinition],
    config: &CombatConfig,
) -> u32 {
    let transformed = is_transformed(combatant, config);
    combatant.class.capabilities().base_defense(transformed)
        + combatant.level().saturating_sub(1)
        + total_defense(armor)
        + combatant.buffs().endurance
}

/// Flat class bonus for an action, evaluated against the current form.
pub fn action_bonus(combatant: &Combatant, kind: ActionKind, config: &CombatConfig) -> u32 {
    combatant
        .class
        .capabilities()
        .action_bonus(kind, is_transformed(combatant, config))
}

/// Critical hit chance in percent: base plus total agility, capped.
pub fn crit_chance_percent(combatant: &Combatant, config: &CombatConfig) -> u32 {
    (config.crit_base_percent + combatant.total_agility()).min(config.crit_cap_percent)
}

/// Regeneration a transformed combatant receives at turn start, or 0.
pub fn transformation_regen(combatant: &Combatant, config: &CombatConfig) -> u32 {
    if !is_transformed(combatant, config) {
        return 0;
    }
    (combatant.max_hp() * config.transform_regen_percent / 100).max(1)
}

/// Point-in-time view of a combatant's derived combat stats.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub transformed: bool,
    pub weapon: WeaponDefinition,
    pub attack: u32,
    pub defense: u32,
}

impl StatsSnapshot {
    pub fn capture(
        combatant: &Combatant,
        equipment: &(impl EquipmentOracle + ?Sized),
        config: &CombatConfig,
    ) -> Self {
        let weapon = resolve_weapon(combatant, equipment, config);
        let armor = resolve_armor(combatant, equipment);
        Self {
            transformed: is_transformed(combatant, config),
            attack: compute_attack(combatant, &weapon, config),
            defense: compute_defense(combatant, &armor, config),
            weapon,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{ArmorSlot, StaticEquipment, WeaponCategory};
    use crate::state::{BuffStat, CharacterClass, Loadout};

    fn catalog() -> StaticEquipment {
        StaticEquipment::new()
            .with_weapon("iron_sword", WeaponDefinition::new("Iron Sword", 16, WeaponCategory::Sword))
            .with_armor("iron_helm", ArmorDefinition::new("Iron Helm", 5, ArmorSlot::Helmet))
    }

    #[test]
    fn unarmed_human_level_one_attacks_for_25() {
        let config = CombatConfig::default();
        let hero = Combatant::new("Aria", CharacterClass::Human);
        let stats = StatsSnapshot::capture(&hero, &catalog(), &config);
        assert_eq!(stats.attack, 25);
        assert_eq!(stats.weapon.category, WeaponCategory::Sword);
        assert_eq!(stats.defense, 8);
    }

    #[test]
    fn level_weapon_armor_and_buffs_add_up() {
        let config = CombatConfig::default();
        let mut hero = Combatant::new("Aria", CharacterClass::Lumberjack)
            .with_level(3)
            .with_loadout(
                Loadout::new()
                    .with_weapon("iron_sword")
                    .with_armor(ArmorSlot::Helmet, "iron_helm"),
            );
        hero.apply_tonic(BuffStat::Strength, 2, 3);

        let stats = StatsSnapshot::capture(&hero, &catalog(), &config);
        // 20 + 4 + 16 + 2
        assert_eq!(stats.attack, 42);
        // 10 + 2 + 5
        assert_eq!(stats.defense, 17);
    }

    #[test]
    fn unknown_weapon_falls_back_to_class_default() {
        let config = CombatConfig::default();
        let hero = Combatant::new("Aria", CharacterClass::Lumberjack)
            .with_loadout(Loadout::new().with_weapon("mythril_halberd"));
        let weapon = resolve_weapon(&hero, &catalog(), &config);
        assert_eq!(weapon.name, "Axe");
        assert_eq!(weapon.attack, 12);
    }

    #[test]
    fn transformation_is_strictly_below_thirty_percent() {
        let config = CombatConfig::default();
        let at = Combatant::new("Fen", CharacterClass::Werewolf).with_hp(30, 100);
        let below = Combatant::new("Fen", CharacterClass::Werewolf).with_hp(29, 100);
        assert!(!is_transformed(&at, &config));
        assert!(is_transformed(&below, &config));

        let human = Combatant::new("Aria", CharacterClass::Human).with_hp(1, 100);
        assert!(!is_transformed(&human, &config));
    }

    #[test]
    fn transformed_werewolf_gets_form_multiplier_and_claws() {
        let config = CombatConfig::default();
        let wolf = Combatant::new("Fen", CharacterClass::Werewolf).with_hp(10, 100);
        let stats = StatsSnapshot::capture(&wolf, &catalog(), &config);
        assert!(stats.transformed);
        assert_eq!(stats.weapon.name, "Claws");
        // (25 + 0 + 20) * 1.5 = 67.5
        assert_eq!(stats.attack, 67);
        assert_eq!(stats.defense, 12);
        assert_eq!(transformation_regen(&wolf, &config), 5);
    }

    #[test]
    fn crit_chance_is_capped() {
        let config = CombatConfig::default();
        let mut hero = Combatant::new("Aria", CharacterClass::Human);
        assert_eq!(crit_chance_percent(&hero, &config), 10);
        hero.stats.agility = 60;
        assert_eq!(crit_chance_percent(&hero, &config), 50);
    }
}
