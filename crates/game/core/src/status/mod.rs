//! Timed status effects.
//!
//! Effects count remaining turns rather than absolute ticks: every combat
//! turn advances each actor's set by exactly one step via
//! [`StatusEffects::tick`], damage-over-time first, counters second.

mod effect;
mod set;

pub use effect::{StatusEffect, StatusEffectKind, StatusFlags};
pub use set::{DotTick, StatusEffects, TickReport};
