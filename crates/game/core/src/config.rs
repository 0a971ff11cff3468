/// Combat balance parameters and capacity constants.
///
/// Probabilities are expressed as `f64` in `[0, 1]`, percentages as whole
/// numbers. Every field has a default matching the shipped balance, so a
/// partial TOML file only needs to override what it changes.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Hit chance before the attack/defense differential is applied.
    pub hit_base: f64,
    /// Hit chance added per point of attack above defense.
    pub hit_per_point: f64,
    /// Lower clamp for any hit chance.
    pub hit_min: f64,
    /// Upper clamp for any hit chance.
    pub hit_max: f64,

    /// Werewolves transform while HP is strictly below this percentage of max.
    pub transform_threshold_percent: u32,
    /// Percentage of max HP regenerated per turn while transformed.
    pub transform_regen_percent: u32,

    /// Chance that a monster with an available special uses it.
    pub monster_special_chance: f64,
    /// Chance that a fear strike stuns the player.
    pub fear_stun_chance: f64,

    /// Crit chance in percent before agility is added.
    pub crit_base_percent: u32,
    /// Crit chance never exceeds this percentage.
    pub crit_cap_percent: u32,

    /// Selections rejected in a row before the auto-pilot takes over.
    pub max_reprompts: u32,
}

impl CombatConfig {
    // ===== compile-time constants used as type parameters =====
    /// Distinct status effects an actor can carry at once.
    pub const MAX_STATUS_EFFECTS: usize = 8;
    /// Entries in a special-attack table.
    pub const MAX_SPECIAL_ATTACKS: usize = 8;
    /// Effects a single special attack can inflict.
    pub const MAX_EFFECTS_PER_ATTACK: usize = 2;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_HIT_BASE: f64 = 0.75;
    pub const DEFAULT_HIT_PER_POINT: f64 = 0.01;
    pub const DEFAULT_HIT_MIN: f64 = 0.10;
    pub const DEFAULT_HIT_MAX: f64 = 0.95;
    pub const DEFAULT_TRANSFORM_THRESHOLD_PERCENT: u32 = 30;
    pub const DEFAULT_TRANSFORM_REGEN_PERCENT: u32 = 5;
    pub const DEFAULT_MONSTER_SPECIAL_CHANCE: f64 = 0.30;
    pub const DEFAULT_FEAR_STUN_CHANCE: f64 = 0.35;
    pub const DEFAULT_CRIT_BASE_PERCENT: u32 = 10;
    pub const DEFAULT_CRIT_CAP_PERCENT: u32 = 50;
    pub const DEFAULT_MAX_REPROMPTS: u32 = 16;

    pub fn new() -> Self {
        Self {
            hit_base: Self::DEFAULT_HIT_BASE,
            hit_per_point: Self::DEFAULT_HIT_PER_POINT,
            hit_min: Self::DEFAULT_HIT_MIN,
            hit_max: Self::DEFAULT_HIT_MAX,
            transform_threshold_percent: Self::DEFAULT_TRANSFORM_THRESHOLD_PERCENT,
            transform_regen_percent: Self::DEFAULT_TRANSFORM_REGEN_PERCENT,
            monster_special_chance: Self::DEFAULT_MONSTER_SPECIAL_CHANCE,
            fear_stun_chance: Self::DEFAULT_FEAR_STUN_CHANCE,
            crit_base_percent: Self::DEFAULT_CRIT_BASE_PERCENT,
            crit_cap_percent: Self::DEFAULT_CRIT_CAP_PERCENT,
            max_reprompts: Self::DEFAULT_MAX_REPROMPTS,
        }
    }

    /// Same balance with a different re-prompt bound.
    pub fn with_max_reprompts(mut self, max_reprompts: u32) -> Self {
        self.max_reprompts = max_reprompts;
        self
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}
