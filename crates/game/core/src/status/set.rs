use arrayvec::ArrayVec;

use super::effect::{StatusEffect, StatusEffectKind, StatusFlags};
use crate::config::CombatConfig;

/// Active status effects on one actor.
///
/// At most one effect per kind is held. Only effects with a positive
/// duration are ever stored, so every stored effect is active.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    effects: ArrayVec<StatusEffect, { CombatConfig::MAX_STATUS_EFFECTS }>,
}

/// Damage dealt by one damage-over-time effect during a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DotTick {
    pub kind: StatusEffectKind,
    pub damage: u32,
}

/// What a single [`StatusEffects::tick`] did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub ticks: ArrayVec<DotTick, 3>,
    /// Kinds whose duration reached 0 during this tick.
    pub expired: StatusFlags,
}

impl TickReport {
    pub fn total_damage(&self) -> u32 {
        self.ticks.iter().map(|tick| tick.damage).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty() && self.expired.is_empty()
    }
}

impl StatusEffects {
    /// Creates an empty status effect set.
    pub fn empty() -> Self {
        Self {
            effects: ArrayVec::new(),
        }
    }

    /// Applies an effect.
    ///
    /// An effect of a kind already present replaces its duration and
    /// magnitude instead of stacking. Zero-duration effects are ignored.
    /// Returns false if the effect could not be stored.
    pub fn apply(&mut self, effect: StatusEffect) -> bool {
        if !effect.is_active() {
            return false;
        }

        if let Some(existing) = self.effects.iter_mut().find(|e| e.kind == effect.kind) {
            *existing = effect;
            return true;
        }

        self.effects.try_push(effect).is_ok()
    }

    pub fn get(&self, kind: StatusEffectKind) -> Option<&StatusEffect> {
        self.effects.iter().find(|e| e.kind == kind)
    }

    pub fn has(&self, kind: StatusEffectKind) -> bool {
        self.get(kind).is_some()
    }

    /// Removes an effect immediately, returning it if it was present.
    pub fn remove(&mut self, kind: StatusEffectKind) -> Option<StatusEffect> {
        let index = self.effects.iter().position(|e| e.kind == kind)?;
        Some(self.effects.remove(index))
    }

    /// Removes every damage-over-time effect.
    pub fn cleanse(&mut self) {
        self.effects.retain(|e| !e.kind.is_damage_over_time());
    }

    /// Net flat change to effective defense from shield, shred and buffs.
    pub fn defense_modifier(&self) -> i32 {
        self.effects
            .iter()
            .map(|e| e.kind.defense_modifier(e.magnitude))
            .sum()
    }

    pub fn flags(&self) -> StatusFlags {
        self.effects
            .iter()
            .fold(StatusFlags::empty(), |flags, e| flags | e.kind.flag())
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Advances every effect by one turn.
    ///
    /// Damage-over-time effects tick first (poison, burn, bleed), then the
    /// counters (stun, shield, armor shred, defense buff). Each effect loses
    /// one turn of duration and is removed exactly when it reaches 0. The
    /// returned damage is not applied here; the bearer owns its HP.
    pub fn tick(&mut self, max_hp: u32) -> TickReport {
        let mut report = TickReport::default();

        for kind in StatusEffectKind::DAMAGE_OVER_TIME {
            if let Some(effect) = self.get(kind).copied() {
                report.ticks.push(DotTick {
                    kind,
                    damage: effect.tick_damage(max_hp),
                });
                self.decrement(kind, &mut report);
            }
        }

        for kind in StatusEffectKind::COUNTERS {
            if self.has(kind) {
                self.decrement(kind, &mut report);
            }
        }

        report
    }

    fn decrement(&mut self, kind: StatusEffectKind, report: &mut TickReport) {
        let Some(index) = self.effects.iter().position(|e| e.kind == kind) else {
            return;
        };
        let effect = &mut self.effects[index];
        effect.duration = effect.duration.saturating_sub(1);
        if effect.duration == 0 {
            self.effects.remove(index);
            report.expired |= kind.flag();
        }
    }
}
