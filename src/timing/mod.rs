//! Timer abstraction for the round engine.
//!
//! The engine is single-threaded and cooperative: every deferred step
//! (playback activations, opening input, pacing between rounds) is a typed
//! `TimerEvent` on a `TimerQueue`. The host drives the clock; the controller
//! handles events one at a time in deadline order.

mod queue;

pub use queue::{ScheduledTimer, TimerId, TimerQueue};

use serde::{Deserialize, Serialize};

use crate::core::Signal;

/// Deferred steps the controller schedules for itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerEvent {
    /// Show/play one element of the target sequence.
    Activate {
        signal: Signal,
        /// Ordinal position within the playback (0-based).
        step: usize,
    },

    /// End of that element's visible duration.
    Deactivate { signal: Signal, step: usize },

    /// Playback is over; start accepting input for `round`.
    OpenInput { round: u32 },

    /// Pacing delay after a completed round is over; play `round`.
    NextRound { round: u32 },
}
