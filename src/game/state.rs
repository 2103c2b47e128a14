//! Phase, round counters, and serializable snapshots.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::sequence::Sequence;

/// Mutually exclusive game mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// No game running; `start` is accepted.
    #[default]
    Idle,
    /// The target sequence is being played (or about to be). Input is dropped.
    Playback,
    /// Participant input is accepted.
    AwaitingInput,
    /// The last game was won; waiting for acknowledgment.
    Won,
    /// The last game was lost; waiting for acknowledgment.
    Lost,
}

impl GamePhase {
    /// Whether a game is in progress.
    #[must_use]
    pub fn is_running(self) -> bool {
        matches!(self, GamePhase::Playback | GamePhase::AwaitingInput)
    }

    /// Whether the phase is a terminal result.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::Won | GamePhase::Lost)
    }
}

impl std::fmt::Display for GamePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GamePhase::Idle => "Idle",
            GamePhase::Playback => "Playback",
            GamePhase::AwaitingInput => "AwaitingInput",
            GamePhase::Won => "Won",
            GamePhase::Lost => "Lost",
        };
        f.write_str(name)
    }
}

/// Outcome of a finished game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    Won,
    Lost,
}

impl GameResult {
    #[must_use]
    pub fn is_win(self) -> bool {
        self == GameResult::Won
    }

    /// Phase the controller rests in until acknowledged.
    #[must_use]
    pub fn phase(self) -> GamePhase {
        match self {
            GameResult::Won => GamePhase::Won,
            GameResult::Lost => GamePhase::Lost,
        }
    }
}

/// Round counters.
///
/// `current_round` is 0 while idle and 1-based during a game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    pub current_round: u32,
    pub target_round_count: u32,
}

impl RoundState {
    /// Whether the current round is the last one.
    #[must_use]
    pub fn is_final_round(&self) -> bool {
        self.current_round > 0 && self.current_round >= self.target_round_count
    }
}

/// Full copy of a controller's observable state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub phase: GamePhase,
    pub round: RoundState,
    pub target: Sequence,
    pub participant: Sequence,
    pub last_result: Option<GameResult>,
    /// Virtual clock at capture time.
    pub clock: Duration,
    /// Timers still pending.
    pub pending_timers: usize,
    /// Seed that replays the target sequence, when the generator is random.
    pub seed: Option<u64>,
}
