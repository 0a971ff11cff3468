//! Player action catalog.
//!
//! - [`actions_for`]: the precise/heavy/defensive trio per weapon category
//! - [`roll_proc`]: category-keyed secondary effects on a landed hit
//! - [`player_specials`]: the fixed special-attack table
//! - [`Consumable`]: items usable in place of an attack

mod catalog;
mod consumables;
mod procs;
mod specials;

pub use catalog::{Action, ActionKind, actions_for, stance_bonus};
pub use consumables::{Consumable, ConsumableEffect, ConsumableOutcome};
pub use procs::{ProcEffect, WeaponProc, proc_for, roll_proc};
pub use specials::player_specials;
