//! Error taxonomy for the round engine.
//!
//! Only configuration mistakes and misuse of the controller are errors.
//! Losing or winning a game is a normal state transition and never shows
//! up here.

use thiserror::Error;

use crate::game::GamePhase;

/// Errors reported by catalog/config construction and by the controller.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    /// Level outside the configured level table.
    #[error("Please enter level {valid}; got {level}")]
    InvalidLevel { level: u32, valid: String },

    /// `start` called while a game is running or awaiting acknowledgment.
    #[error("cannot start a game while {0}")]
    NotIdle(GamePhase),

    /// `acknowledge` called outside `Won`/`Lost`.
    #[error("nothing to acknowledge while {0}")]
    NotAcknowledgeable(GamePhase),

    /// A catalog needs between 2 and 255 signals.
    #[error("signal catalog must hold 2 to 255 signals, got {0}")]
    InvalidCatalogSize(usize),

    /// Two catalog entries share a name.
    #[error("duplicate signal name '{0}'")]
    DuplicateSignal(String),

    /// Activation would still be visible when the next one starts.
    #[error("activation of {activation_ms}ms overlaps inter-signal delay of {delay_ms}ms")]
    OverlappingActivations { activation_ms: u128, delay_ms: u128 },

    /// A delay beyond `Timing::MAX_DELAY`.
    #[error("delay of {delay_ms}ms exceeds the {max_ms}ms limit")]
    DelayTooLong { delay_ms: u128, max_ms: u128 },

    /// Input would open at the same instant as the last playback slot ends.
    #[error("input lead must be positive unless all delays are zero")]
    ZeroInputLead,

    /// A signal id or name that the catalog does not contain.
    #[error("unknown signal '{0}'")]
    UnknownSignal(String),

    /// A level table without any levels, or with a zero-round level.
    #[error("invalid level table: {0}")]
    InvalidLevelTable(String),
}

impl GameError {
    /// Whether this error was caused by configuration (as opposed to call order).
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        !matches!(self, GameError::NotIdle(_) | GameError::NotAcknowledgeable(_))
    }
}
