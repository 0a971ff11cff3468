use arrayvec::ArrayVec;

use crate::config::CombatConfig;
use crate::env::{ArmorDefinition, WeaponDefinition, total_defense};
use crate::error::SnapshotError;
use crate::status::{StatusEffect, StatusEffectKind, StatusEffects};

/// A named attack with a damage delta, inflicted effects and a cooldown.
///
/// `remaining` counts turns until the entry can be used again; 0 means ready.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpecialAttack {
    pub name: String,
    /// Signed adjustment added to the user's base damage.
    pub damage_delta: i32,
    pub effects: ArrayVec<StatusEffect, { CombatConfig::MAX_EFFECTS_PER_ATTACK }>,
    pub cooldown: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    remaining: u32,
}

impl SpecialAttack {
    pub fn new(name: impl Into<String>, damage_delta: i32, cooldown: u32) -> Self {
        Self {
            name: name.into(),
            damage_delta,
            effects: ArrayVec::new(),
            cooldown,
            remaining: 0,
        }
    }

    /// Adds an inflicted effect. Effects beyond capacity are dropped.
    pub fn with_effect(mut self, effect: StatusEffect) -> Self {
        let _ = self.effects.try_push(effect);
        self
    }

    pub fn is_ready(&self) -> bool {
        self.remaining == 0
    }

    pub fn remaining_cooldown(&self) -> u32 {
        self.remaining
    }

    pub fn inflicts_stun(&self) -> bool {
        self.effects.iter().any(|e| e.kind == StatusEffectKind::Stun)
    }

    /// Damage this attack deals for a given base damage, floored at 0.
    pub fn damage_for(&self, base: u32) -> u32 {
        let total = i64::from(base) + i64::from(self.damage_delta);
        total.clamp(0, i64::from(u32::MAX)) as u32
    }

    fn trigger(&mut self) {
        self.remaining = self.cooldown;
    }

    fn tick(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }
}

/// Fixed, indexed collection of special attacks.
///
/// Entries are referenced by their stable index; cooldown state lives on
/// each entry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpecialAttackTable {
    entries: ArrayVec<SpecialAttack, { CombatConfig::MAX_SPECIAL_ATTACKS }>,
}

impl SpecialAttackTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table, failing if there are more entries than capacity.
    pub fn try_from_attacks(
        attacks: impl IntoIterator<Item = SpecialAttack>,
    ) -> Result<Self, SpecialAttack> {
        let mut table = Self::new();
        for attack in attacks {
            table.entries.try_push(attack).map_err(|err| err.element())?;
        }
        Ok(table)
    }

    /// Appends an entry. Returns false if the table is full.
    pub fn push(&mut self, attack: SpecialAttack) -> bool {
        self.entries.try_push(attack).is_ok()
    }

    pub fn get(&self, index: usize) -> Option<&SpecialAttack> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpecialAttack> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Indices of entries currently off cooldown, in table order.
    pub fn available(&self) -> ArrayVec<usize, { CombatConfig::MAX_SPECIAL_ATTACKS }> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, attack)| attack.is_ready())
            .map(|(index, _)| index)
            .collect()
    }

    /// Puts an entry on cooldown and returns it.
    pub fn trigger(&mut self, index: usize) -> Option<&SpecialAttack> {
        let attack = self.entries.get_mut(index)?;
        attack.trigger();
        Some(attack)
    }

    /// Decrements every cooldown by one turn, never below 0.
    pub fn tick_cooldowns(&mut self) {
        self.entries.iter_mut().for_each(SpecialAttack::tick);
    }

    /// Clears every cooldown, as at the start of an encounter.
    pub fn reset_cooldowns(&mut self) {
        self.entries.iter_mut().for_each(|attack| attack.remaining = 0);
    }
}

/// An opponent, created fresh for one encounter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Monster {
    pub name: String,
    level: u32,
    hp: u32,
    max_hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub weapon: Option<WeaponDefinition>,
    pub armor: Vec<ArmorDefinition>,
    pub status: StatusEffects,
    pub specials: SpecialAttackTable,
    pub boss: bool,
}

impl Monster {
    /// Creates a monster at full HP with no equipment or specials.
    pub fn new(name: impl Into<String>, level: u32, max_hp: u32, attack: u32, defense: u32) -> Self {
        Self {
            name: name.into(),
            level,
            hp: max_hp,
            max_hp,
            attack,
            defense,
            weapon: None,
            armor: Vec::new(),
            status: StatusEffects::empty(),
            specials: SpecialAttackTable::new(),
            boss: false,
        }
    }

    pub fn with_weapon(mut self, weapon: WeaponDefinition) -> Self {
        self.weapon = Some(weapon);
        self
    }

    pub fn with_armor(mut self, armor: ArmorDefinition) -> Self {
        self.armor.push(armor);
        self
    }

    pub fn with_specials(mut self, specials: SpecialAttackTable) -> Self {
        self.specials = specials;
        self
    }

    /// Sets current HP, clamped to max.
    pub fn with_hp(mut self, hp: u32) -> Self {
        self.hp = hp.min(self.max_hp);
        self
    }

    pub fn as_boss(mut self) -> Self {
        self.boss = true;
        self
    }

    pub fn validate(&self) -> Result<(), SnapshotError> {
        if self.max_hp == 0 {
            return Err(SnapshotError::ZeroMaxHp {
                name: self.name.clone(),
            });
        }
        if self.level == 0 {
            return Err(SnapshotError::ZeroLevel {
                name: self.name.clone(),
            });
        }
        Ok(())
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn hp(&self) -> u32 {
        self.hp
    }

    pub fn max_hp(&self) -> u32 {
        self.max_hp
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Base attack plus the wielded weapon's attack value.
    pub fn base_damage(&self) -> u32 {
        self.attack + self.weapon.as_ref().map_or(0, |weapon| weapon.attack)
    }

    /// Base defense plus equipped armor, before status modifiers.
    pub fn armored_defense(&self) -> u32 {
        self.defense + total_defense(&self.armor)
    }

    /// Defense including shield and armor shred, never below 0.
    pub fn effective_defense(&self) -> u32 {
        let total = i64::from(self.armored_defense()) + i64::from(self.status.defense_modifier());
        total.clamp(0, i64::from(u32::MAX)) as u32
    }

    pub fn is_stunned(&self) -> bool {
        self.status.has(StatusEffectKind::Stun)
    }

    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.hp);
        self.hp -= lost;
        lost
    }
}
