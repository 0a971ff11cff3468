use strum::{Display, EnumIter, EnumString};

use crate::env::ArmorSlot;
use crate::error::SnapshotError;

/// Player character class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum CharacterClass {
    Human,
    Werewolf,
    Lumberjack,
}

impl CharacterClass {
    /// Max HP a freshly created character of this class starts with.
    pub const fn starting_max_hp(self) -> u32 {
        match self {
            Self::Human => 120,
            Self::Werewolf => 100,
            Self::Lumberjack => 140,
        }
    }
}

/// Permanent attributes grown by leveling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaseStats {
    pub strength: u32,
    pub agility: u32,
    pub endurance: u32,
}

impl BaseStats {
    pub const fn new(strength: u32, agility: u32, endurance: u32) -> Self {
        Self {
            strength,
            agility,
            endurance,
        }
    }
}

/// Attribute a tonic raises.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BuffStat {
    Strength,
    Agility,
    Endurance,
}

/// Temporary stat bonuses from tonics.
///
/// All magnitudes share one remaining-encounter counter. While an endurance
/// bonus is active the bearer's max HP carries
/// [`BuffState::MAX_HP_PER_ENDURANCE`] extra points per magnitude.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuffState {
    pub strength: u32,
    pub agility: u32,
    pub endurance: u32,
    /// Encounters left before every magnitude resets to 0.
    pub remaining_encounters: u32,
}

impl BuffState {
    pub const MAX_HP_PER_ENDURANCE: u32 = 10;

    pub fn is_active(&self) -> bool {
        self.remaining_encounters > 0
    }

    pub fn get(&self, stat: BuffStat) -> u32 {
        match stat {
            BuffStat::Strength => self.strength,
            BuffStat::Agility => self.agility,
            BuffStat::Endurance => self.endurance,
        }
    }

    fn slot_mut(&mut self, stat: BuffStat) -> &mut u32 {
        match stat {
            BuffStat::Strength => &mut self.strength,
            BuffStat::Agility => &mut self.agility,
            BuffStat::Endurance => &mut self.endurance,
        }
    }

    /// Extra max HP granted by the current endurance bonus.
    pub fn max_hp_bonus(&self) -> u32 {
        self.endurance * Self::MAX_HP_PER_ENDURANCE
    }
}

/// Equipped item identifiers, resolved through an equipment oracle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Loadout {
    pub weapon: Option<String>,
    armor: [Option<String>; ArmorSlot::COUNT],
}

impl Loadout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weapon(mut self, id: impl Into<String>) -> Self {
        self.weapon = Some(id.into());
        self
    }

    pub fn with_armor(mut self, slot: ArmorSlot, id: impl Into<String>) -> Self {
        self.armor[slot.index()] = Some(id.into());
        self
    }

    pub fn equip_armor(&mut self, slot: ArmorSlot, id: impl Into<String>) -> Option<String> {
        self.armor[slot.index()].replace(id.into())
    }

    pub fn armor(&self, slot: ArmorSlot) -> Option<&str> {
        self.armor[slot.index()].as_deref()
    }

    /// Identifiers of every occupied armor slot, in slot order.
    pub fn armor_ids(&self) -> impl Iterator<Item = &str> {
        self.armor.iter().filter_map(|id| id.as_deref())
    }
}

/// The player character.
///
/// Persists across encounters. HP is kept within `[0, max_hp]` by every
/// mutator; level is always at least 1.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    pub name: String,
    pub class: CharacterClass,
    level: u32,
    xp: u32,
    hp: u32,
    max_hp: u32,
    pub stats: BaseStats,
    buffs: BuffState,
    pub loadout: Loadout,
}

impl Combatant {
    /// Creates a level 1 character at half of its class's starting max HP.
    pub fn new(name: impl Into<String>, class: CharacterClass) -> Self {
        let max_hp = class.starting_max_hp();
        Self {
            name: name.into(),
            class,
            level: 1,
            xp: 0,
            hp: max_hp / 2,
            max_hp,
            stats: BaseStats::default(),
            buffs: BuffState::default(),
            loadout: Loadout::new(),
        }
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    /// Sets current and max HP; current is clamped to max.
    pub fn with_hp(mut self, current: u32, max: u32) -> Self {
        self.max_hp = max;
        self.hp = current.min(max);
        self
    }

    pub fn with_stats(mut self, stats: BaseStats) -> Self {
        self.stats = stats;
        self
    }

    pub fn with_buffs(mut self, buffs: BuffState) -> Self {
        self.buffs = buffs;
        self
    }

    pub fn with_loadout(mut self, loadout: Loadout) -> Self {
        self.loadout = loadout;
        self
    }

    /// Checks that this snapshot can enter an encounter.
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

    pub fn xp(&self) -> u32 {
        self.xp
    }

    pub fn hp(&self) -> u32 {
        self.hp
    }

    pub fn max_hp(&self) -> u32 {
        self.max_hp
    }

    pub fn buffs(&self) -> &BuffState {
        &self.buffs
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Strength including the active tonic bonus.
    pub fn total_strength(&self) -> u32 {
        self.stats.strength + self.buffs.strength
    }

    pub fn total_agility(&self) -> u32 {
        self.stats.agility + self.buffs.agility
    }

    pub fn total_endurance(&self) -> u32 {
        self.stats.endurance + self.buffs.endurance
    }

    /// Removes up to `amount` HP, returning the HP actually lost.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.hp);
        self.hp -= lost;
        lost
    }

    /// Restores up to `amount` HP without exceeding max, returning the HP gained.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let gained = amount.min(self.max_hp - self.hp);
        self.hp += gained;
        gained
    }

    pub fn heal_full(&mut self) {
        self.hp = self.max_hp;
    }

    /// Applies a tonic: sets the stat's bonus and restarts the shared
    /// encounter counter. Endurance also raises max and current HP.
    pub fn apply_tonic(&mut self, stat: BuffStat, amount: u32, encounters: u32) {
        if stat == BuffStat::Endurance {
            let previous = self.buffs.max_hp_bonus();
            self.max_hp = self.max_hp.saturating_sub(previous);
            self.hp = self.hp.min(self.max_hp);
        }

        *self.buffs.slot_mut(stat) = amount;
        self.buffs.remaining_encounters = encounters;

        if stat == BuffStat::Endurance {
            let bonus = self.buffs.max_hp_bonus();
            self.max_hp += bonus;
            self.hp = (self.hp + bonus).min(self.max_hp);
        }
    }

    /// Counts one finished encounter against active buffs.
    ///
    /// When the counter reaches 0 every magnitude resets, the endurance max
    /// HP bonus is removed and current HP is clamped. Returns true if the
    /// buffs expired on this call.
    pub fn expire_buffs_after_encounter(&mut self) -> bool {
        if self.buffs.remaining_encounters == 0 {
            return false;
        }
        self.buffs.remaining_encounters -= 1;
        if self.buffs.remaining_encounters > 0 {
            return false;
        }

        let bonus = self.buffs.max_hp_bonus();
        // never drop to 0 max HP, even from a malformed buff snapshot
        self.max_hp = self.max_hp.saturating_sub(bonus).max(1);
        self.hp = self.hp.min(self.max_hp);
        self.buffs = BuffState::default();
        true
    }

    pub(crate) fn add_xp(&mut self, amount: u32) {
        self.xp = self.xp.saturating_add(amount);
    }

    pub(crate) fn spend_xp(&mut self, amount: u32) {
        self.xp -= amount.min(self.xp);
    }

    pub(crate) fn raise_level(&mut self, max_hp_gain: u32) {
        self.level += 1;
        self.max_hp += max_hp_gain;
    }
}
