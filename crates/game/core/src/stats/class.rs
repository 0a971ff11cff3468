//! Per-class capability sets.
//!
//! Each [`CharacterClass`] variant is backed by a zero-sized type
//! implementing [`ClassCapabilities`]; stat derivation only ever asks the
//! capability set, never matches on the class directly.

use crate::action::ActionKind;
use crate::env::{WeaponCategory, WeaponDefinition};
use crate::state::CharacterClass;

/// What a class contributes to combat stats.
///
/// `transformed` is only ever true for classes whose
/// [`transforms`](Self::transforms) returns true.
pub trait ClassCapabilities {
    fn base_attack(&self, transformed: bool) -> u32;

    fn base_defense(&self, transformed: bool) -> u32;

    /// Weapon profile used when nothing (or nothing resolvable) is equipped.
    fn unarmed(&self, transformed: bool) -> WeaponDefinition;

    /// Flat bonus for an action: damage for attacks, defense for stances.
    fn action_bonus(&self, kind: ActionKind, transformed: bool) -> u32;

    /// Whether the class has a low-HP transformation.
    fn transforms(&self) -> bool {
        false
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Human;

#[derive(Clone, Copy, Debug, Default)]
pub struct Werewolf;

#[derive(Clone, Copy, Debug, Default)]
pub struct Lumberjack;

impl ClassCapabilities for Human {
    fn base_attack(&self, _transformed: bool) -> u32 {
        15
    }

    fn base_defense(&self, _transformed: bool) -> u32 {
        8
    }

    fn unarmed(&self, _transformed: bool) -> WeaponDefinition {
        WeaponDefinition::new("Sword", 10, WeaponCategory::Sword)
    }

    fn action_bonus(&self, kind: ActionKind, _transformed: bool) -> u32 {
        match kind {
            ActionKind::Precise => 2,
            _ => 0,
        }
    }
}

impl ClassCapabilities for Werewolf {
    fn base_attack(&self, transformed: bool) -> u32 {
        if transformed { 25 } else { 18 }
    }

    fn base_defense(&self, transformed: bool) -> u32 {
        if transformed { 12 } else { 6 }
    }

    fn unarmed(&self, transformed: bool) -> WeaponDefinition {
        if transformed {
            WeaponDefinition::new("Claws", 20, WeaponCategory::Unarmed)
        } else {
            WeaponDefinition::new("Sword (human form)", 8, WeaponCategory::Sword)
        }
    }

    fn action_bonus(&self, kind: ActionKind, transformed: bool) -> u32 {
        match (kind, transformed) {
            (ActionKind::Defensive, _) => 0,
            (ActionKind::Heavy, true) => 8,
            (ActionKind::Heavy, false) => 3,
            (ActionKind::Precise, true) => 5,
            (ActionKind::Precise, false) => 0,
        }
    }

    fn transforms(&self) -> bool {
        true
    }
}

impl ClassCapabilities for Lumberjack {
    fn base_attack(&self, _transformed: bool) -> u32 {
        20
    }

    fn base_defense(&self, _transformed: bool) -> u32 {
        10
    }

    fn unarmed(&self, _transformed: bool) -> WeaponDefinition {
        WeaponDefinition::new("Axe", 12, WeaponCategory::Axe)
    }

    fn action_bonus(&self, kind: ActionKind, _transformed: bool) -> u32 {
        match kind {
            ActionKind::Heavy => 4,
            ActionKind::Defensive => 2,
            ActionKind::Precise => 0,
        }
    }
}

impl CharacterClass {
    /// Capability set backing this class.
    pub fn capabilities(self) -> &'static dyn ClassCapabilities {
        match self {
            Self::Human => &Human,
            Self::Werewolf => &Werewolf,
            Self::Lumberjack => &Lumberjack,
        }
    }
}
