//! Encounter state machine and its boundaries.
//!
//! The [`Encounter`] is the only thing that mutates combat state. It advances
//! one [`TurnPhase`] at a time, pulls player choices from an
//! [`ActionProvider`], pushes [`CombatEvent`]s into an [`EventSink`] and
//! draws every random value from a single injected
//! [`RandomSource`](crate::env::RandomSource).
//!
//! ```text
//! provider ──Selection──▶ Encounter ──CombatEvent──▶ sink
//!                            │
//!                   rng, equipment, config
//! ```

mod encounter;
mod events;
mod hook;
mod phase;
mod provider;

pub use encounter::{
    CombatEnv, CombatPorts, Encounter, EncounterKind, EncounterResult, Reward,
};
pub use events::{Actor, CombatEvent, EventSink, NullSink, Strike, Vitals};
pub use hook::{CombatantObserver, HpJournal};
pub use phase::{Outcome, TurnPhase};
pub use provider::{
    ActionProvider, ActionRequest, AutoPilot, MenuOption, ScriptedProvider, Selection,
};
