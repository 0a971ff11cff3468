//! Common error infrastructure for combat-core.
//!
//! The engine itself never fails mid-encounter: numeric edge cases are
//! clamped and bad input is re-prompted. Errors only surface at the edges,
//! when a snapshot handed in by a collaborator is malformed, or when the
//! input boundary returns something the engine has to reject.
//!
//! # Design Principles
//!
//! - **Type Safety**: Each boundary has its own error type with specific variants
//! - **Severity Classification**: Errors are categorized for recovery strategies

use crate::config::CombatConfig;

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - retry with the same or an alternative choice.
    ///
    /// Examples: special attack on cooldown, menu cancelled
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: zero max HP, level 0
    Validation,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Common trait for all combat-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// A combatant or monster snapshot that cannot enter an encounter.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    #[error("{name}: max HP must be at least 1")]
    ZeroMaxHp { name: String },

    #[error("{name}: level must be at least 1")]
    ZeroLevel { name: String },

    #[error(
        "{name}: special-attack table holds at most {} entries",
        CombatConfig::MAX_SPECIAL_ATTACKS
    )]
    TooManySpecials { name: String },
}

impl GameError for SnapshotError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ZeroMaxHp { .. } => "SNAPSHOT_ZERO_MAX_HP",
            Self::ZeroLevel { .. } => "SNAPSHOT_ZERO_LEVEL",
            Self::TooManySpecials { .. } => "SNAPSHOT_TOO_MANY_SPECIALS",
        }
    }
}

/// A selection returned by the input boundary that the engine refuses.
///
/// These never propagate out of an encounter; they trigger a re-prompt.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("selection cancelled")]
    Cancelled,

    #[error("option {index} out of range (menu has {len} entries)")]
    OutOfRange { index: usize, len: usize },

    #[error("{name} is on cooldown for {remaining} more turn(s)")]
    OnCooldown { name: String, remaining: u32 },

    #[error("no {0} left to use")]
    NotCarried(&'static str),
}

impl GameError for SelectionError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Cancelled => "SELECTION_CANCELLED",
            Self::OutOfRange { .. } => "SELECTION_OUT_OF_RANGE",
            Self::OnCooldown { .. } => "SELECTION_ON_COOLDOWN",
            Self::NotCarried(_) => "SELECTION_NOT_CARRIED",
        }
    }
}
