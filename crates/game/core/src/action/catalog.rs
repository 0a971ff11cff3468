use strum::{Display, EnumIter};

use crate::env::WeaponCategory;

/// Shape of a weapon action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionKind {
    /// Lower damage, better accuracy.
    Precise,
    /// Higher damage, worse accuracy.
    Heavy,
    /// Raises defense for the following enemy turn instead of attacking.
    Defensive,
}

/// One entry of a weapon's action menu.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Action {
    pub label: &'static str,
    pub kind: ActionKind,
    /// Applied to effective attack before the class bonus.
    pub attack_multiplier: f64,
    /// Added to hit chance before clamping.
    pub hit_delta: f64,
    /// Fraction of defense added as a one-turn buff. 0 for attacks.
    pub defense_multiplier: f64,
}

impl Action {
    const fn attack(label: &'static str, kind: ActionKind, attack_multiplier: f64, hit_delta: f64) -> Self {
        Self {
            label,
            kind,
            attack_multiplier,
            hit_delta,
            defense_multiplier: 0.0,
        }
    }

    const fn defend(label: &'static str, defense_multiplier: f64) -> Self {
        Self {
            label,
            kind: ActionKind::Defensive,
            attack_multiplier: 0.0,
            hit_delta: 0.0,
            defense_multiplier,
        }
    }

    pub const fn is_defensive(&self) -> bool {
        matches!(self.kind, ActionKind::Defensive)
    }
}

const UNARMED: [Action; 3] = [
    Action::attack("Quick Jab", ActionKind::Precise, 0.80, 0.05),
    Action::attack("Haymaker", ActionKind::Heavy, 1.30, -0.10),
    Action::defend("Dodge", 0.40),
];

const SWORD: [Action; 3] = [
    Action::attack("Quick Strike", ActionKind::Precise, 0.75, 0.10),
    Action::attack("Heavy Strike", ActionKind::Heavy, 1.50, -0.15),
    Action::defend("Parry", 0.60),
];

const AXE: [Action; 3] = [
    Action::attack("Precise Chop", ActionKind::Precise, 0.65, 0.15),
    Action::attack("Cleave", ActionKind::Heavy, 1.60, -0.20),
    Action::defend("Sidestep", 0.50),
];

const BOW: [Action; 3] = [
    Action::attack("Aimed Shot", ActionKind::Precise, 0.65, 0.15),
    Action::attack("Volley", ActionKind::Heavy, 1.60, -0.20),
    Action::defend("Evade", 0.50),
];

/// The three actions a weapon category offers: precise, heavy, defensive.
pub fn actions_for(category: WeaponCategory) -> &'static [Action; 3] {
    match category {
        WeaponCategory::Unarmed => &UNARMED,
        WeaponCategory::Sword => &SWORD,
        WeaponCategory::Axe => &AXE,
        WeaponCategory::Bow => &BOW,
    }
}

/// Defense granted by a defensive stance: `floor(defense * multiplier) + bonus`.
pub fn stance_bonus(defense: u32, multiplier: f64, class_bonus: u32) -> u32 {
    crate::combat::scale(defense, multiplier) + class_bonus
}
