//! Weapon-category procs.
//!
//! A proc is rolled only after a weapon action lands. Which proc (if any)
//! is decided by the weapon's category and the action kind, never by name.

use super::ActionKind;
use crate::env::{RandomSource, WeaponCategory};
use crate::status::StatusEffect;

/// Secondary effect a proc inflicts on the target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProcEffect {
    /// Bleed at a fixed percent of max HP per tick.
    Bleed { magnitude: u32, duration: u32 },
    /// Armor shred sized from the target's armored defense:
    /// `max(floor, defense / divisor)`.
    ArmorShred {
        divisor: u32,
        floor: u32,
        duration: u32,
    },
    /// Target loses its next action.
    GuardBreak,
}

impl ProcEffect {
    /// Concrete status effect for a target with the given armored defense.
    pub fn status_for(self, target_defense: u32) -> StatusEffect {
        match self {
            Self::Bleed {
                magnitude,
                duration,
            } => StatusEffect::bleed(duration, magnitude),
            Self::ArmorShred {
                divisor,
                floor,
                duration,
            } => StatusEffect::armor_shred(duration, (target_defense / divisor.max(1)).max(floor)),
            Self::GuardBreak => StatusEffect::stun(1),
        }
    }
}

/// A probability-gated proc.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WeaponProc {
    pub chance: f64,
    pub effect: ProcEffect,
}

/// Proc attached to a category/action pair, if any.
pub fn proc_for(category: WeaponCategory, kind: ActionKind) -> Option<WeaponProc> {
    let (chance, effect) = match (category, kind) {
        (WeaponCategory::Axe, ActionKind::Heavy) => (
            0.60,
            ProcEffect::Bleed {
                magnitude: 5,
                duration: 3,
            },
        ),
        (WeaponCategory::Axe, ActionKind::Precise) => (
            0.35,
            ProcEffect::Bleed {
                magnitude: 3,
                duration: 2,
            },
        ),
        (WeaponCategory::Bow, ActionKind::Heavy) => (
            0.55,
            ProcEffect::ArmorShred {
                divisor: 5,
                floor: 2,
                duration: 2,
            },
        ),
        (WeaponCategory::Bow, ActionKind::Precise) => (
            0.35,
            ProcEffect::ArmorShred {
                divisor: 8,
                floor: 1,
                duration: 3,
            },
        ),
        (WeaponCategory::Sword, ActionKind::Heavy) => (0.40, ProcEffect::GuardBreak),
        _ => return None,
    };
    Some(WeaponProc { chance, effect })
}

/// Roll the proc for a landed hit.
///
/// Draws one value only when the pair has a proc.
pub fn roll_proc(
    category: WeaponCategory,
    kind: ActionKind,
    target_defense: u32,
    rng: &mut (impl RandomSource + ?Sized),
) -> Option<StatusEffect> {
    let proc = proc_for(category, kind)?;
    rng.chance(proc.chance)
        .then(|| proc.effect.status_for(target_defense))
}
