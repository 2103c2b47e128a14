//! # simon-says
//!
//! A timer-driven Simon Says round engine.
//!
//! The engine generates a growing random sequence of signals, plays it back
//! on a fixed schedule, and checks a participant's reproduction one signal at
//! a time. One mistake loses; reproducing the sequence at the level's target
//! length wins.
//!
//! ## Design Principles
//!
//! 1. **Host-Driven Time**: Nothing runs on its own. Playback and pacing are
//!    typed timers on a virtual clock that the host advances, so the same
//!    engine serves a real-time terminal, a GUI frame loop, or a test.
//!
//! 2. **Explicit Phase**: Input is only accepted in `AwaitingInput`; anything
//!    that arrives during playback or between rounds is dropped.
//!
//! 3. **No Rendering**: Lights, sounds, and text are the job of a
//!    `GameListener`. The engine only says what should be shown.
//!
//! ## Modules
//!
//! - `core`: Signals and catalog, RNG, configuration, errors
//! - `sequence`: Target sequence generators
//! - `timing`: Virtual-clock timer queue
//! - `playback`: Timed emission of the target sequence
//! - `input`: Participant input validation
//! - `game`: Round controller and listener interface

pub mod core;
pub mod game;
pub mod input;
pub mod playback;
pub mod sequence;
pub mod timing;

// Re-export commonly used types
pub use crate::core::{
    GameConfig, GameError, GameRng, Level, LevelTable, Signal, SignalCatalog, Timing,
};

pub use crate::game::{
    GameListener, GamePhase, GameResult, GameSnapshot, ListenerEvent, NullListener,
    RecordingListener, RoundController, RoundState,
};

pub use crate::input::{InputValidator, Outcome};
pub use crate::playback::PlaybackScheduler;
pub use crate::sequence::{RandomGenerator, ScriptedGenerator, Sequence, SequenceGenerator};
pub use crate::timing::{TimerEvent, TimerQueue};
