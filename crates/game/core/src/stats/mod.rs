//! Stat derivation for the player character.
//!
//! Everything here is a pure function over a [`Combatant`](crate::Combatant)
//! snapshot and resolved equipment. Class-specific numbers come from the
//! [`ClassCapabilities`] set of each class.

pub mod class;
pub mod compute;

pub use class::{ClassCapabilities, Human, Lumberjack, Werewolf};
pub use compute::{
    StatsSnapshot, action_bonus, below_threshold, compute_attack, compute_defense,
    crit_chance_percent, is_transformed, resolve_armor, resolve_weapon, transformation_regen,
};
