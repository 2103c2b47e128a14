//! The round state machine and its outbound interface.
//!
//! - `RoundController`: owns phase, round counters, and both sequences
//! - `GameListener`: receives activations, status text, and game endings
//! - `GamePhase` / `RoundState` / `GameSnapshot`: observable state

mod controller;
mod listener;
mod state;

pub use controller::{presses_left_message, round_heading, RoundController};
pub use listener::{GameListener, ListenerEvent, NullListener, RecordingListener};
pub use state::{GamePhase, GameResult, GameSnapshot, RoundState};
