//! Hit chance and attack roll resolution.

use crate::config::CombatConfig;
use crate::env::RandomSource;

/// Result of a single attack roll.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitOutcome {
    /// Clamped hit probability used for the roll.
    pub chance: f64,
    /// Uniform draw in `[0, 1)`.
    pub roll: f64,
    pub hit: bool,
    /// Damage dealt: at least 1 on a hit, 0 on a miss.
    pub damage: u32,
}

impl HitOutcome {
    pub fn is_miss(&self) -> bool {
        !self.hit
    }
}

/// Calculate hit chance from the attack/defense differential.
///
/// # Formula
///
/// ```text
/// chance = base + per_point * (attack - defense) + hit_delta
/// clamped to [hit_min, hit_max]
/// ```
///
/// # Arguments
///
/// * `attack` - Attacker's damage value for this action
/// * `defense` - Defender's effective defense
/// * `hit_delta` - Action-specific accuracy adjustment
/// * `config` - Balance parameters
pub fn hit_chance(attack: u32, defense: u32, hit_delta: f64, config: &CombatConfig) -> f64 {
    let differential = f64::from(attack) - f64::from(defense);
    let raw = config.hit_base + config.hit_per_point * differential + hit_delta;
    // max/min instead of clamp: a misconfigured min > max must not panic,
    // and NaN collapses to the lower bound
    raw.max(config.hit_min).min(config.hit_max)
}

/// Damage dealt by a landed hit: the attack/defense gap, at least 1.
pub fn hit_damage(attack: u32, defense: u32) -> u32 {
    attack.saturating_sub(defense).max(1)
}

/// Roll an attack.
///
/// Draws exactly one value from `rng`; the attack hits iff the draw is below
/// the clamped chance.
pub fn resolve_hit(
    attack: u32,
    defense: u32,
    hit_delta: f64,
    rng: &mut (impl RandomSource + ?Sized),
    config: &CombatConfig,
) -> HitOutcome {
    let chance = hit_chance(attack, defense, hit_delta, config);
    let roll = rng.next_unit();
    let hit = roll < chance;
    HitOutcome {
        chance,
        roll,
        hit,
        damage: if hit { hit_damage(attack, defense) } else { 0 },
    }
}
