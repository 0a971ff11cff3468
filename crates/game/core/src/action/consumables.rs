use strum::{Display, EnumIter, EnumString};

use crate::state::{BuffStat, Combatant};
use crate::status::StatusEffects;

/// In-combat consumables. Ownership and stock live in the inventory; the
/// encounter only reports which ones were used.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter, EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum Consumable {
    Potion,
    #[strum(to_string = "Major Potion", serialize = "major_potion")]
    MajorPotion,
    #[strum(to_string = "Life Elixir", serialize = "life_elixir")]
    LifeElixir,
    #[strum(to_string = "Strength Tonic", serialize = "strength_tonic")]
    StrengthTonic,
    #[strum(to_string = "Agility Tonic", serialize = "agility_tonic")]
    AgilityTonic,
    #[strum(to_string = "Endurance Tonic", serialize = "endurance_tonic")]
    EnduranceTonic,
    Antidote,
}

/// What using a consumable does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConsumableEffect {
    Heal(u32),
    Tonic(BuffStat),
    /// Clears poison, burn and bleed.
    Cleanse,
}

/// Observable result of using a consumable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConsumableOutcome {
    pub healed: u32,
    pub buffed: Option<BuffStat>,
    pub cleansed: bool,
}

impl Consumable {
    /// Stat increase granted by a tonic.
    pub const TONIC_AMOUNT: u32 = 2;
    /// Encounters a tonic lasts.
    pub const TONIC_ENCOUNTERS: u32 = 3;

    pub const fn effect(self) -> ConsumableEffect {
        match self {
            Self::Potion => ConsumableEffect::Heal(20),
            Self::MajorPotion => ConsumableEffect::Heal(50),
            Self::LifeElixir => ConsumableEffect::Heal(100),
            Self::StrengthTonic => ConsumableEffect::Tonic(BuffStat::Strength),
            Self::AgilityTonic => ConsumableEffect::Tonic(BuffStat::Agility),
            Self::EnduranceTonic => ConsumableEffect::Tonic(BuffStat::Endurance),
            Self::Antidote => ConsumableEffect::Cleanse,
        }
    }

    /// Applies this consumable to the combatant and their status set.
    pub fn apply(self, combatant: &mut Combatant, status: &mut StatusEffects) -> ConsumableOutcome {
        match self.effect() {
            ConsumableEffect::Heal(amount) => ConsumableOutcome {
                healed: combatant.heal(amount),
                ..ConsumableOutcome::default()
            },
            ConsumableEffect::Tonic(stat) => {
                let before = combatant.hp();
                combatant.apply_tonic(stat, Self::TONIC_AMOUNT, Self::TONIC_ENCOUNTERS);
                ConsumableOutcome {
                    healed: combatant.hp().saturating_sub(before),
                    buffed: Some(stat),
                    cleansed: false,
                }
            }
            ConsumableEffect::Cleanse => {
                status.cleanse();
                ConsumableOutcome {
                    cleansed: true,
                    ..ConsumableOutcome::default()
                }
            }
        }
    }
}
