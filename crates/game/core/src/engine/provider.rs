//! Synchronous input boundary.
//!
//! The engine never polls an input device. Each `PlayerActionSelect` phase
//! builds an [`ActionRequest`] listing every option by index and asks the
//! [`ActionProvider`] for a [`Selection`]. Rejected selections are
//! re-prompted; a provider that keeps failing is replaced by [`AutoPilot`].

use super::events::Vitals;
use crate::action::{Action, ActionKind, Consumable, ConsumableEffect};

/// One entry of the action menu.
#[derive(Clone, Debug, PartialEq)]
pub enum MenuOption {
    Weapon(Action),
    Special {
        /// Index into the player's special-attack table.
        index: usize,
        name: String,
        /// Turns until usable; 0 means ready.
        cooldown: u32,
    },
    Item {
        item: Consumable,
        count: u32,
    },
    Flee {
        /// False once the player has dealt damage this encounter.
        allowed: bool,
    },
}

impl MenuOption {
    pub fn label(&self) -> String {
        match self {
            Self::Weapon(action) => action.label.to_string(),
            Self::Special { name, cooldown: 0, .. } => name.clone(),
            Self::Special { name, cooldown, .. } => format!("{name} (cooldown {cooldown})"),
            Self::Item { item, count } => format!("{item} x{count}"),
            Self::Flee { .. } => "Flee".to_string(),
        }
    }

    /// Whether choosing this entry will be accepted without a re-prompt.
    pub fn is_selectable(&self) -> bool {
        match self {
            Self::Special { cooldown, .. } => *cooldown == 0,
            Self::Item { count, .. } => *count > 0,
            _ => true,
        }
    }
}

/// Everything a provider needs to pick an action.
#[derive(Clone, Debug, PartialEq)]
pub struct ActionRequest {
    pub turn: u32,
    /// Re-prompts so far for this selection; 0 on the first ask.
    pub attempt: u32,
    pub monster_name: String,
    pub player: Vitals,
    pub monster: Vitals,
    pub options: Vec<MenuOption>,
}

/// A provider's answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    /// Index into [`ActionRequest::options`].
    Index(usize),
    /// The player backed out of the menu.
    Cancel,
}

/// Presentation-layer hook that picks the player's action.
pub trait ActionProvider {
    fn choose(&mut self, request: &ActionRequest) -> Selection;
}

/// Built-in non-interactive provider.
///
/// Drinks a healing item below `heal_below_percent` HP, otherwise uses the
/// first ready special other than the basic punch, otherwise the weapon's
/// heavy action. Never flees and never picks an unselectable entry.
#[derive(Clone, Copy, Debug)]
pub struct AutoPilot {
    pub heal_below_percent: u32,
}

impl AutoPilot {
    pub const DEFAULT_HEAL_BELOW_PERCENT: u32 = 35;

    pub fn new() -> Self {
        Self {
            heal_below_percent: Self::DEFAULT_HEAL_BELOW_PERCENT,
        }
    }

    fn pick(&self, request: &ActionRequest) -> Option<usize> {
        let options = &request.options;
        let wounded = u64::from(request.player.hp) * 100
            < u64::from(request.player.max_hp) * u64::from(self.heal_below_percent);

        if wounded {
            let heal = options.iter().position(|option| {
                matches!(option, MenuOption::Item { item, count }
                    if *count > 0 && matches!(item.effect(), ConsumableEffect::Heal(_)))
            });
            if heal.is_some() {
                return heal;
            }
        }

        let special = options.iter().position(|option| {
            matches!(option, MenuOption::Special { index, cooldown: 0, .. } if *index > 0)
        });
        if let Some(position) = special {
            return Some(position);
        }

        options
            .iter()
            .position(|option| matches!(option, MenuOption::Weapon(a) if a.kind == ActionKind::Heavy))
            .or_else(|| options.iter().position(MenuOption::is_selectable))
    }
}

impl Default for AutoPilot {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionProvider for AutoPilot {
    fn choose(&mut self, request: &ActionRequest) -> Selection {
        self.pick(request).map_or(Selection::Cancel, Selection::Index)
    }
}

/// Replays a fixed list of selections, then cancels forever.
#[derive(Clone, Debug, Default)]
pub struct ScriptedProvider {
    selections: std::collections::VecDeque<Selection>,
    requests: u32,
}

impl ScriptedProvider {
    pub fn new(selections: impl IntoIterator<Item = Selection>) -> Self {
        Self {
            selections: selections.into_iter().collect(),
            requests: 0,
        }
    }

    /// Convenience for a script of plain indices.
    pub fn indices(indices: impl IntoIterator<Item = usize>) -> Self {
        Self::new(indices.into_iter().map(Selection::Index))
    }

    /// Number of requests received so far.
    pub fn requests(&self) -> u32 {
        self.requests
    }
}

impl ActionProvider for ScriptedProvider {
    fn choose(&mut self, _request: &ActionRequest) -> Selection {
        self.requests += 1;
        self.selections.pop_front().unwrap_or(Selection::Cancel)
    }
}
