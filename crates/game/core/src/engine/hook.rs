//! Persistence callbacks for the character collaborator.
//!
//! The encounter mutates the combatant in place; observers are told when a
//! turn or the whole encounter is done so they can persist HP, XP and buff
//! changes.

use super::encounter::EncounterResult;
use crate::state::Combatant;

/// Notified after each turn and once when the encounter ends.
pub trait CombatantObserver {
    fn on_turn_end(&mut self, _combatant: &Combatant, _turn: u32) {}

    fn on_encounter_end(&mut self, _combatant: &Combatant, _result: &EncounterResult) {}
}

/// Records the combatant's HP after every turn.
#[derive(Clone, Debug, Default)]
pub struct HpJournal {
    pub turns: Vec<(u32, u32)>,
    pub finished: bool,
}

impl CombatantObserver for HpJournal {
    fn on_turn_end(&mut self, combatant: &Combatant, turn: u32) {
        self.turns.push((turn, combatant.hp()));
    }

    fn on_encounter_end(&mut self, _combatant: &Combatant, _result: &EncounterResult) {
        self.finished = true;
    }
}
