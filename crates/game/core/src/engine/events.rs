//! Event stream emitted to the presentation layer.
//!
//! Events carry plain data only (labels, numbers, status bit sets), enough to
//! render an encounter without the engine knowing anything about rendering.

use super::phase::{Outcome, TurnPhase};
use crate::action::{Consumable, ConsumableOutcome};
use crate::error::SelectionError;
use crate::status::{StatusEffect, StatusEffectKind, StatusFlags};

/// Which side of the fight an event concerns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Actor {
    Player,
    Monster,
}

/// Resulting HP and status of an actor after an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vitals {
    pub hp: u32,
    pub max_hp: u32,
    pub status: StatusFlags,
}

/// How an attack roll went.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strike {
    Hit { damage: u32, critical: bool },
    Miss,
}

impl Strike {
    pub const fn damage(self) -> u32 {
        match self {
            Self::Hit { damage, .. } => damage,
            Self::Miss => 0,
        }
    }

    pub const fn is_hit(self) -> bool {
        matches!(self, Self::Hit { .. })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum CombatEvent {
    EncounterStarted {
        monster: String,
        level: u32,
        boss: bool,
        monster_vitals: Vitals,
        player_vitals: Vitals,
    },
    PhaseEntered {
        turn: u32,
        phase: TurnPhase,
    },
    StatusTick {
        actor: Actor,
        kind: StatusEffectKind,
        damage: u32,
        vitals: Vitals,
    },
    StatusExpired {
        actor: Actor,
        kind: StatusEffectKind,
    },
    Regenerated {
        amount: u32,
        vitals: Vitals,
    },
    /// A stunned actor lost its action.
    ActionForfeited {
        actor: Actor,
    },
    Attack {
        actor: Actor,
        label: String,
        strike: Strike,
        target: Vitals,
    },
    EffectApplied {
        target: Actor,
        effect: StatusEffect,
    },
    /// The player will lose their next action.
    PlayerStunned,
    Stance {
        label: &'static str,
        defense_bonus: u32,
        riposte_armed: bool,
    },
    Riposte {
        damage: u32,
        target: Vitals,
    },
    ConsumableUsed {
        item: Consumable,
        outcome: ConsumableOutcome,
        vitals: Vitals,
    },
    FleeRejected,
    SelectionRejected {
        error: SelectionError,
    },
    AutoPilotEngaged,
    EncounterEnded {
        outcome: Outcome,
        turns: u32,
    },
}

/// Receiver of the event stream.
pub trait EventSink {
    fn emit(&mut self, event: CombatEvent);
}

impl EventSink for Vec<CombatEvent> {
    fn emit(&mut self, event: CombatEvent) {
        self.push(event);
    }
}

/// Sink that discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: CombatEvent) {}
}
