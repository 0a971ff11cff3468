//! Combat participants.
//!
//! A [`Combatant`] outlives encounters and is only mutated by the running
//! encounter; a [`Monster`] is built per encounter by an external factory and
//! dropped when the encounter ends.

mod combatant;
mod monster;

pub use combatant::{BaseStats, BuffStat, BuffState, CharacterClass, Combatant, Loadout};
pub use monster::{Monster, SpecialAttack, SpecialAttackTable};
