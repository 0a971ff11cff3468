use strum::{Display, EnumIter};

/// Steps of the per-turn state machine.
///
/// ```text
/// TurnStart → StatusTick → PlayerActionSelect → PlayerActionResolve
///   → VictoryCheck → (MonsterActionSelect | SkipIfStunned)
///   → MonsterActionResolve → DefeatCheck → TurnEnd → TurnStart …
/// ```
///
/// `Victory`, `Defeat` and `Fled` are terminal. `StatusTick` can jump to a
/// terminal phase on a damage-over-time kill, `PlayerActionSelect` skips to
/// `VictoryCheck` when the player is stunned, and `PlayerActionResolve` ends
/// in `Fled` on an accepted flee.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnPhase {
    TurnStart,
    StatusTick,
    PlayerActionSelect,
    PlayerActionResolve,
    VictoryCheck,
    MonsterActionSelect,
    SkipIfStunned,
    MonsterActionResolve,
    DefeatCheck,
    TurnEnd,
    Victory,
    Defeat,
    Fled,
}

impl TurnPhase {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Victory | Self::Defeat | Self::Fled)
    }

    /// Terminal outcome for a terminal phase.
    pub const fn outcome(self) -> Option<Outcome> {
        match self {
            Self::Victory => Some(Outcome::Victory),
            Self::Defeat => Some(Outcome::Defeat),
            Self::Fled => Some(Outcome::Fled),
            _ => None,
        }
    }
}

/// How an encounter ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    Victory,
    Defeat,
    Fled,
}
