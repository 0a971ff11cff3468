use std::collections::HashMap;

use strum::{Display, EnumIter, IntoEnumIterator};

/// Behavior family of a weapon.
///
/// Authored on each weapon definition; procs and action profiles are keyed on
/// this tag, never on the weapon's name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WeaponCategory {
    /// Fists, claws, crude monster weapons: neutral profile, no procs.
    Unarmed,
    /// Enables riposte on the defensive action and guard break on heavy hits.
    Sword,
    /// Bleed proc on hit.
    Axe,
    /// Armor-shred proc on hit.
    Bow,
}

/// Static weapon record from the equipment catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeaponDefinition {
    pub name: String,
    pub attack: u32,
    pub category: WeaponCategory,
}

impl WeaponDefinition {
    pub fn new(name: impl Into<String>, attack: u32, category: WeaponCategory) -> Self {
        Self {
            name: name.into(),
            attack,
            category,
        }
    }
}

/// Equipment slot an armor piece occupies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ArmorSlot {
    Helmet,
    Chest,
    Legs,
    Boots,
    Shield,
}

impl ArmorSlot {
    pub const COUNT: usize = 5;

    pub const fn index(self) -> usize {
        match self {
            Self::Helmet => 0,
            Self::Chest => 1,
            Self::Legs => 2,
            Self::Boots => 3,
            Self::Shield => 4,
        }
    }
}

/// Static armor record from the equipment catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArmorDefinition {
    pub name: String,
    pub defense: u32,
    pub slot: ArmorSlot,
}

impl ArmorDefinition {
    pub fn new(name: impl Into<String>, defense: u32, slot: ArmorSlot) -> Self {
        Self {
            name: name.into(),
            defense,
            slot,
        }
    }
}

/// Oracle resolving equipment identifiers into catalog records.
///
/// Unknown identifiers resolve to `None`; callers fall back to the class
/// unarmed profile (weapons) or skip the piece (armor).
pub trait EquipmentOracle {
    fn weapon(&self, id: &str) -> Option<WeaponDefinition>;
    fn armor(&self, id: &str) -> Option<ArmorDefinition>;
}

/// In-memory equipment catalog keyed by identifier.
#[derive(Clone, Debug, Default)]
pub struct StaticEquipment {
    weapons: HashMap<String, WeaponDefinition>,
    armors: HashMap<String, ArmorDefinition>,
}

impl StaticEquipment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weapon(mut self, id: impl Into<String>, weapon: WeaponDefinition) -> Self {
        self.weapons.insert(id.into(), weapon);
        self
    }

    pub fn with_armor(mut self, id: impl Into<String>, armor: ArmorDefinition) -> Self {
        self.armors.insert(id.into(), armor);
        self
    }

    pub fn insert_weapon(&mut self, id: impl Into<String>, weapon: WeaponDefinition) {
        self.weapons.insert(id.into(), weapon);
    }

    pub fn insert_armor(&mut self, id: impl Into<String>, armor: ArmorDefinition) {
        self.armors.insert(id.into(), armor);
    }

    pub fn weapon_ids(&self) -> impl Iterator<Item = &str> {
        self.weapons.keys().map(String::as_str)
    }

    /// Armor identifiers for one slot, sorted for stable presentation.
    pub fn armor_ids_for(&self, slot: ArmorSlot) -> Vec<&str> {
        let mut ids: Vec<&str> = self
            .armors
            .iter()
            .filter(|(_, armor)| armor.slot == slot)
            .map(|(id, _)| id.as_str())
            .collect();
        ids.sort_unstable();
        ids
    }

    pub fn is_empty(&self) -> bool {
        self.weapons.is_empty() && self.armors.is_empty()
    }
}

impl EquipmentOracle for StaticEquipment {
    fn weapon(&self, id: &str) -> Option<WeaponDefinition> {
        self.weapons.get(id).cloned()
    }

    fn armor(&self, id: &str) -> Option<ArmorDefinition> {
        self.armors.get(id).cloned()
    }
}

/// Sum of defense over a list of armor pieces.
pub fn total_defense<'a>(armors: impl IntoIterator<Item = &'a ArmorDefinition>) -> u32 {
    armors.into_iter().map(|armor| armor.defense).sum()
}

/// All slots in presentation order.
pub fn armor_slots() -> impl Iterator<Item = ArmorSlot> {
    ArmorSlot::iter()
}
