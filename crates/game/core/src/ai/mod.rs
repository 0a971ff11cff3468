//! Monster decision-making.
//!
//! A monster with any special attack off cooldown uses one of them with
//! `monster_special_chance`, picked uniformly among the ready entries.
//! Otherwise it rolls in `[0, 100)`:
//!
//! | Roll   | Move         | Damage           |
//! |--------|--------------|------------------|
//! | 0..50  | standard     | base             |
//! | 50..80 | Heavy Strike | base × 12 / 10   |
//! | 80..   | Fear Strike  | base × 7 / 10, may stun the player |
//!
//! A special's shield effects protect the monster; everything else lands
//! on the player.

use arrayvec::ArrayVec;
use tracing::trace;

use crate::config::CombatConfig;
use crate::env::RandomSource;
use crate::state::Monster;
use crate::status::{StatusEffect, StatusEffectKind};

pub const HEAVY_STRIKE: &str = "Heavy Strike";
pub const FEAR_STRIKE: &str = "Fear Strike";

/// Which branch of the decision table a monster took.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MonsterMove {
    Standard,
    HeavyStrike,
    FearStrike,
    /// Index into the monster's special-attack table.
    Special(usize),
}

/// A monster's chosen action for this turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonsterDecision {
    pub kind: MonsterMove,
    /// Attack value fed to the hit roll, floored at 0.
    pub damage: u32,
    /// Display name for labeled moves; `None` for a standard attack.
    pub label: Option<String>,
    /// The player loses their next action if this attack lands.
    pub stuns_player: bool,
    /// Non-stun effects inflicted on the player if this attack lands.
    pub effects: ArrayVec<StatusEffect, { CombatConfig::MAX_EFFECTS_PER_ATTACK }>,
    /// Shields the monster grants itself before the attack is rolled.
    pub self_effects: ArrayVec<StatusEffect, { CombatConfig::MAX_EFFECTS_PER_ATTACK }>,
}

impl MonsterDecision {
    fn plain(kind: MonsterMove, damage: u32, label: Option<&str>, stuns_player: bool) -> Self {
        Self {
            kind,
            damage,
            label: label.map(str::to_owned),
            stuns_player,
            effects: ArrayVec::new(),
            self_effects: ArrayVec::new(),
        }
    }
}

/// Choose the monster's action, putting a chosen special on cooldown.
pub fn select_action(
    monster: &mut Monster,
    rng: &mut (impl RandomSource + ?Sized),
    config: &CombatConfig,
) -> MonsterDecision {
    let base = monster.base_damage();
    let available = monster.specials.available();

    if !available.is_empty() && rng.chance(config.monster_special_chance) {
        let pick = available[rng.below(available.len() as u32) as usize];
        if let Some(attack) = monster.specials.trigger(pick) {
            trace!(monster = %monster.name, special = %attack.name, "monster uses special");
            return MonsterDecision {
                kind: MonsterMove::Special(pick),
                damage: attack.damage_for(base),
                label: Some(attack.name.clone()),
                stuns_player: attack.inflicts_stun(),
                effects: attack
                    .effects
                    .iter()
                    .filter(|effect| !matches!(effect.kind, StatusEffectKind::Stun | StatusEffectKind::Shield))
                    .copied()
                    .collect(),
                self_effects: attack
                    .effects
                    .iter()
                    .filter(|effect| effect.kind == StatusEffectKind::Shield)
                    .copied()
                    .collect(),
            };
        }
    }

    let roll = rng.below(100);
    match roll {
        0..50 => MonsterDecision::plain(MonsterMove::Standard, base, None, false),
        50..80 => MonsterDecision::plain(
            MonsterMove::HeavyStrike,
            scale_tenths(base, 12),
            Some(HEAVY_STRIKE),
            false,
        ),
        _ => {
            let stuns = rng.chance(config.fear_stun_chance);
            MonsterDecision::plain(
                MonsterMove::FearStrike,
                scale_tenths(base, 7),
                Some(FEAR_STRIKE),
                stuns,
            )
        }
    }
}

fn scale_tenths(value: u32, tenths: u64) -> u32 {
    (u64::from(value) * tenths / 10).min(u64::from(u32::MAX)) as u32
}
