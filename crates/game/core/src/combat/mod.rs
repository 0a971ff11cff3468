//! Combat resolution system.
//!
//! Pure functions for resolving single interactions. The only side effect
//! anywhere in here is drawing from the injected [`RandomSource`].
//!
//! # Core Functions
//!
//! - `resolve_hit`: hit roll plus base damage for a landed hit
//! - `hit_chance`: attack vs defense differential, clamped
//! - `mitigate`: endurance and guard reduction of incoming monster damage
//! - `critical`: ×1.5 critical damage
//!
//! [`RandomSource`]: crate::env::RandomSource

pub mod damage;
pub mod hit;

pub use damage::{critical, mitigate, riposte, scale};
pub use hit::{HitOutcome, hit_chance, hit_damage, resolve_hit};
