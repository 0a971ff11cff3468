//! Monster catalog records.
//!
//! Templates describe a monster per level; the [`MonsterFactory`] turns one
//! into a concrete [`Monster`] snapshot by rolling its spreads, weapon and
//! armor.
//!
//! [`MonsterFactory`]: crate::MonsterFactory
//! [`Monster`]: combat_core::Monster

use combat_core::{SpecialAttack, SpecialAttackTable, StatusEffect};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A base value plus a uniform random bonus in `[0, spread)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spread {
    pub base: u32,
    #[serde(default)]
    pub spread: u32,
}

impl Spread {
    pub const fn fixed(base: u32) -> Self {
        Self { base, spread: 0 }
    }

    pub fn roll(&self, rng: &mut impl Rng) -> u32 {
        if self.spread == 0 {
            self.base
        } else {
            self.base + rng.gen_range(0..self.spread)
        }
    }

    /// Largest value [`roll`](Self::roll) can produce.
    pub fn max(&self) -> u32 {
        self.base + self.spread.saturating_sub(1)
    }
}

/// Authored special attack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialSpec {
    pub name: String,
    #[serde(default)]
    pub damage_delta: i32,
    #[serde(default)]
    pub cooldown: u32,
    #[serde(default)]
    pub effects: Vec<StatusEffect>,
}

impl SpecialSpec {
    pub fn build(&self) -> SpecialAttack {
        self.effects.iter().fold(
            SpecialAttack::new(self.name.clone(), self.damage_delta, self.cooldown),
            |attack, effect| attack.with_effect(*effect),
        )
    }
}

/// Builds a special-attack table, dropping entries past capacity.
pub fn build_specials(owner: &str, specs: &[SpecialSpec]) -> SpecialAttackTable {
    let mut table = SpecialAttackTable::new();
    for spec in specs {
        if !table.push(spec.build()) {
            warn!(
                monster = owner,
                special = %spec.name,
                "special-attack table full, entry dropped"
            );
        }
    }
    table
}

/// Monster definition for one level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonsterTemplate {
    pub level: u32,
    pub name: String,
    pub hp: Spread,
    pub attack: Spread,
    pub defense: u32,
    /// Whether the monster draws a weapon from its level's pool.
    #[serde(default = "default_armed")]
    pub armed: bool,
    #[serde(default)]
    pub specials: Vec<SpecialSpec>,
}

fn default_armed() -> bool {
    true
}

/// Weapons available to monsters up to and including `max_level`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponPool {
    pub max_level: u32,
    /// Equipment identifiers.
    pub weapons: Vec<String>,
}

/// A piece of armor a monster of at least `min_level` wears with `chance`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArmorRoll {
    /// Equipment identifier.
    pub armor: String,
    #[serde(default)]
    pub min_level: u32,
    #[serde(default = "always")]
    pub chance: f64,
}

fn always() -> f64 {
    1.0
}

/// The fixed final encounter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BossTemplate {
    pub name: String,
    pub level: u32,
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
    #[serde(default)]
    pub specials: Vec<SpecialSpec>,
}

/// Everything the factory needs to generate monsters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonsterCatalog {
    pub templates: Vec<MonsterTemplate>,
    #[serde(default)]
    pub weapon_pools: Vec<WeaponPool>,
    #[serde(default)]
    pub armor_rolls: Vec<ArmorRoll>,
    pub boss: BossTemplate,
}

impl MonsterCatalog {
    /// Template for `level`, or the one with the closest level.
    pub fn template(&self, level: u32) -> Option<&MonsterTemplate> {
        self.templates
            .iter()
            .min_by_key(|template| (template.level.abs_diff(level), template.level))
    }

    /// Pool covering `level`: the first whose bound reaches it, else the last.
    pub fn weapon_pool(&self, level: u32) -> Option<&WeaponPool> {
        self.weapon_pools
            .iter()
            .filter(|pool| level <= pool.max_level)
            .min_by_key(|pool| pool.max_level)
            .or_else(|| self.weapon_pools.iter().max_by_key(|pool| pool.max_level))
    }

    /// Highest template level.
    pub fn max_level(&self) -> u32 {
        self.templates.iter().map(|t| t.level).max().unwrap_or(1)
    }
}
