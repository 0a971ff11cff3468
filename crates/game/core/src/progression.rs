//! Experience, leveling and encounter rewards.
//!
//! Runs after an encounter, never inside one.
//!
//! # Formulas
//!
//! ```text
//! threshold(level) = level * 50
//! reward(tier)     = 30, 60, 120, 240 for tiers 1-4; 30 * tier² beyond
//! reward(boss)     = 600
//! ```

use tracing::info;

use crate::engine::EncounterKind;
use crate::state::Combatant;

pub const XP_PER_LEVEL: u32 = 50;
pub const MAX_HP_PER_LEVEL: u32 = 3;
pub const BOSS_XP: u32 = 600;
pub const BOSS_REQUIRED_LEVEL: u32 = 20;

/// Stat growth granted by a single level-up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelUp {
    /// The level reached.
    pub level: u32,
    pub max_hp: u32,
    pub strength: u32,
    pub endurance: u32,
    pub agility: u32,
}

impl LevelUp {
    fn for_level(level: u32) -> Self {
        Self {
            level,
            max_hp: MAX_HP_PER_LEVEL,
            strength: 1,
            endurance: u32::from(level % 2 == 0),
            agility: u32::from(level % 3 == 0),
        }
    }
}

/// XP needed to advance from `level` to the next.
pub fn xp_threshold(level: u32) -> u32 {
    level.max(1).saturating_mul(XP_PER_LEVEL)
}

/// Adds XP and applies every level-up it pays for.
///
/// Each level consumes exactly its threshold; leftover XP carries over.
/// Every level-up fully heals.
pub fn gain_xp(combatant: &mut Combatant, amount: u32) -> Vec<LevelUp> {
    combatant.add_xp(amount);

    let mut gained = Vec::new();
    while combatant.xp() >= xp_threshold(combatant.level()) {
        combatant.spend_xp(xp_threshold(combatant.level()));

        let growth = LevelUp::for_level(combatant.level() + 1);
        combatant.raise_level(growth.max_hp);
        combatant.stats.strength += growth.strength;
        combatant.stats.endurance += growth.endurance;
        combatant.stats.agility += growth.agility;
        combatant.heal_full();

        info!(name = %combatant.name, level = growth.level, "level up");
        gained.push(growth);
    }
    gained
}

/// XP for clearing a room of the given tier. Tier 0 grants nothing.
pub fn xp_for_tier(tier: u32) -> u32 {
    match tier {
        0 => 0,
        1 => 30,
        2 => 60,
        3 => 120,
        4 => 240,
        n => n.saturating_mul(n).saturating_mul(30),
    }
}

/// XP for winning an encounter of the given kind.
pub fn reward_xp(kind: EncounterKind) -> u32 {
    match kind {
        EncounterKind::Room { tier } => xp_for_tier(tier),
        EncounterKind::Boss => BOSS_XP,
    }
}

/// Minimum character level allowed into a tier.
pub fn required_level_for_tier(tier: u32) -> u32 {
    match tier {
        0 | 1 => 1,
        2 => 5,
        3 => 10,
        4 => 15,
        n => 1 + (n - 1) * 5,
    }
}

/// Minimum character level allowed into an encounter of the given kind.
pub fn required_level(kind: EncounterKind) -> u32 {
    match kind {
        EncounterKind::Room { tier } => required_level_for_tier(tier),
        EncounterKind::Boss => BOSS_REQUIRED_LEVEL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::CharacterClass;

    #[test]
    fn thresholds_are_level_times_fifty() {
        let mut hero = Combatant::new("Aria", CharacterClass::Human);
        assert!(gain_xp(&mut hero, 49).is_empty());
        let ups = gain_xp(&mut hero, 1);
        assert_eq!(ups.len(), 1);
        assert_eq!(hero.level(), 2);
        assert_eq!(hero.xp(), 0);

        // 100 for level 2 -> 3, 150 for 3 -> 4, 20 left over
        let ups = gain_xp(&mut hero, 270);
        assert_eq!(ups.iter().map(|u| u.level).collect::<Vec<_>>(), vec![3, 4]);
        assert_eq!(hero.xp(), 20);
    }

    #[test]
    fn growth_follows_level_parity() {
        let mut hero = Combatant::new("Aria", CharacterClass::Human);
        let max_before = hero.max_hp();
        // levels 2 through 6: 50 + 100 + 150 + 200 + 250
        gain_xp(&mut hero, 750);
        assert_eq!(hero.level(), 6);
        assert_eq!(hero.max_hp(), max_before + 15);
        assert_eq!(hero.stats.strength, 5);
        // levels 2, 4, 6
        assert_eq!(hero.stats.endurance, 3);
        // levels 3, 6
        assert_eq!(hero.stats.agility, 2);
        assert_eq!(hero.hp(), hero.max_hp());
    }

    #[test]
    fn rewards_by_tier_and_boss() {
        let rewards: Vec<u32> = (1..=6).map(xp_for_tier).collect();
        assert_eq!(rewards, vec![30, 60, 120, 240, 750, 1080]);
        assert_eq!(reward_xp(EncounterKind::Boss), 600);
        assert_eq!(xp_for_tier(0), 0);
    }

    #[test]
    fn tier_gates() {
        let gates: Vec<u32> = (1..=6).map(required_level_for_tier).collect();
        assert_eq!(gates, vec![1, 5, 10, 15, 21, 26]);
        assert_eq!(required_level(EncounterKind::Boss), 20);
    }
}
