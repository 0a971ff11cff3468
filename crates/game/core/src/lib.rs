//! Deterministic turn-based combat rules for a single-player dungeon crawl.
//!
//! `combat-core` owns one thing: resolving a fight between the player's
//! [`Combatant`] and a single [`Monster`]. Everything outside a fight
//! (catalog data, monster generation, inventories, persistence, rendering)
//! is a collaborator reached through a trait:
//!
//! - [`EquipmentOracle`]: weapon and armor records by identifier
//! - [`RandomSource`]: every probabilistic roll
//! - [`ActionProvider`]: the player's menu choice
//! - [`EventSink`]: the narrated event stream
//! - [`CombatantObserver`]: per-turn persistence callbacks
//!
//! Progression (XP, levels, tier gates) runs between encounters through the
//! functions in [`progression`].
pub mod action;
pub mod ai;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod progression;
pub mod state;
pub mod stats;
pub mod status;

pub use action::{Action, ActionKind, Consumable, ConsumableEffect, ConsumableOutcome};
pub use config::CombatConfig;
pub use engine::{
    ActionProvider, ActionRequest, Actor, AutoPilot, CombatEnv, CombatEvent, CombatPorts,
    CombatantObserver, Encounter, EncounterKind, EncounterResult, EventSink, MenuOption,
    NullSink, Outcome, Reward, ScriptedProvider, Selection, Strike, TurnPhase, Vitals,
};
pub use env::{
    ArmorDefinition, ArmorSlot, EquipmentOracle, PcgRng, RandomSource, SequenceRng,
    StaticEquipment, WeaponCategory, WeaponDefinition,
};
pub use error::{ErrorSeverity, GameError, SelectionError, SnapshotError};
pub use progression::{LevelUp, gain_xp};
pub use state::{
    BaseStats, BuffStat, BuffState, CharacterClass, Combatant, Loadout, Monster, SpecialAttack,
    SpecialAttackTable,
};
pub use stats::StatsSnapshot;
pub use status::{StatusEffect, StatusEffectKind, StatusEffects, StatusFlags};
