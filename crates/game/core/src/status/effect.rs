use bitflags::bitflags;
use strum::{Display, EnumIter};

/// Types of timed status effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusEffectKind {
    // ========================================================================
    // Damage over time (magnitude = percent of max HP per tick)
    // ========================================================================
    Poison,
    Burn,
    Bleed,

    // ========================================================================
    // Counters
    // ========================================================================
    /// Bearer forfeits its next action.
    Stun,
    /// Raises effective defense by its magnitude. Monster specials carrying
    /// a shield grant it to the monster itself.
    Shield,
    /// Lowers effective defense by its magnitude.
    #[strum(serialize = "Armor Shred")]
    ArmorShred,
    /// One-turn defense bonus from a defensive stance.
    #[strum(serialize = "Defense Buff")]
    DefenseBuff,
}

impl StatusEffectKind {
    /// Damage-over-time kinds in the order they tick.
    pub const DAMAGE_OVER_TIME: [Self; 3] = [Self::Poison, Self::Burn, Self::Bleed];

    /// Counter kinds in the order they tick, after damage over time.
    pub const COUNTERS: [Self; 4] = [Self::Stun, Self::Shield, Self::ArmorShred, Self::DefenseBuff];

    pub const fn is_damage_over_time(self) -> bool {
        matches!(self, Self::Poison | Self::Burn | Self::Bleed)
    }

    /// Canonical per-tick magnitude (percent of max HP) for damage over time.
    pub const fn default_magnitude(self) -> u32 {
        match self {
            Self::Poison => 5,
            Self::Burn => 3,
            Self::Bleed => 4,
            _ => 0,
        }
    }

    /// Signed contribution to effective defense at the given magnitude.
    pub fn defense_modifier(self, magnitude: u32) -> i32 {
        let magnitude = magnitude.min(i32::MAX as u32) as i32;
        match self {
            Self::Shield | Self::DefenseBuff => magnitude,
            Self::ArmorShred => -magnitude,
            _ => 0,
        }
    }

    pub const fn flag(self) -> StatusFlags {
        match self {
            Self::Poison => StatusFlags::POISON,
            Self::Burn => StatusFlags::BURN,
            Self::Bleed => StatusFlags::BLEED,
            Self::Stun => StatusFlags::STUN,
            Self::Shield => StatusFlags::SHIELD,
            Self::ArmorShred => StatusFlags::ARMOR_SHRED,
            Self::DefenseBuff => StatusFlags::DEFENSE_BUFF,
        }
    }
}

bitflags! {
    /// Compact set of active status kinds, used in event snapshots.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct StatusFlags: u8 {
        const POISON       = 1 << 0;
        const BURN         = 1 << 1;
        const BLEED        = 1 << 2;
        const STUN         = 1 << 3;
        const SHIELD       = 1 << 4;
        const ARMOR_SHRED  = 1 << 5;
        const DEFENSE_BUFF = 1 << 6;
    }
}

/// A single timed effect.
///
/// `duration` counts remaining turns; an effect whose duration reaches 0 is
/// inactive and is removed from its set in the same step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub kind: StatusEffectKind,
    pub duration: u32,
    pub magnitude: u32,
}

impl StatusEffect {
    pub const fn new(kind: StatusEffectKind, duration: u32, magnitude: u32) -> Self {
        Self {
            kind,
            duration,
            magnitude,
        }
    }

    pub const fn poison(duration: u32) -> Self {
        Self::new(StatusEffectKind::Poison, duration, StatusEffectKind::Poison.default_magnitude())
    }

    pub const fn burn(duration: u32) -> Self {
        Self::new(StatusEffectKind::Burn, duration, StatusEffectKind::Burn.default_magnitude())
    }

    pub const fn bleed(duration: u32, magnitude: u32) -> Self {
        Self::new(StatusEffectKind::Bleed, duration, magnitude)
    }

    pub const fn stun(duration: u32) -> Self {
        Self::new(StatusEffectKind::Stun, duration, 0)
    }

    pub const fn shield(duration: u32, amount: u32) -> Self {
        Self::new(StatusEffectKind::Shield, duration, amount)
    }

    pub const fn armor_shred(duration: u32, amount: u32) -> Self {
        Self::new(StatusEffectKind::ArmorShred, duration, amount)
    }

    pub const fn is_active(&self) -> bool {
        self.duration > 0
    }

    /// Damage this effect deals on one tick to a bearer with `max_hp`.
    ///
    /// Zero for non damage-over-time kinds; otherwise at least 1.
    pub fn tick_damage(&self, max_hp: u32) -> u32 {
        if !self.kind.is_damage_over_time() {
            return 0;
        }
        let scaled = u64::from(max_hp) * u64::from(self.magnitude) / 100;
        (scaled as u32).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_damage_is_percent_of_max_with_floor() {
        assert_eq!(StatusEffect::poison(3).tick_damage(100), 5);
        assert_eq!(StatusEffect::burn(3).tick_damage(100), 3);
        assert_eq!(StatusEffect::bleed(2, 4).tick_damage(250), 10);
        // 5% of 10 rounds down to 0, floored to 1
        assert_eq!(StatusEffect::poison(1).tick_damage(10), 1);
        assert_eq!(StatusEffect::stun(1).tick_damage(100), 0);
    }

    #[test]
    fn defense_modifiers_are_signed() {
        assert_eq!(StatusEffect::shield(2, 4).kind.defense_modifier(4), 4);
        assert_eq!(StatusEffectKind::ArmorShred.defense_modifier(4), -4);
        assert_eq!(StatusEffectKind::Poison.defense_modifier(4), 0);
    }
}
