//! Timed playback of the target sequence.
//!
//! ## Schedule
//!
//! For a sequence of length `n` emitted at time `t`:
//! - element `i` activates at `t + i * inter_signal_delay`
//! - element `i` deactivates at `t + i * inter_signal_delay + activation_duration`
//!
//! Because `activation_duration < inter_signal_delay`, consecutive activations
//! never overlap. Emission only schedules timers and returns; the caller owns
//! the transition to input, which must come after `playback_duration(n)`.

use std::time::Duration;
use tracing::trace;

use crate::core::{GameError, Signal, Timing};
use crate::timing::{TimerEvent, TimerQueue};

/// Schedules activations for a sequence onto a `TimerQueue`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlaybackScheduler {
    inter_signal_delay: Duration,
    activation_duration: Duration,
}

impl PlaybackScheduler {
    /// Create a scheduler, rejecting timings where activations overlap.
    pub fn new(timing: &Timing) -> Result<Self, GameError> {
        timing.validate()?;
        Ok(Self {
            inter_signal_delay: timing.inter_signal_delay,
            activation_duration: timing.activation_duration,
        })
    }

    /// Offset of the activation at `step` from the emission time.
    #[must_use]
    pub fn activation_offset(&self, step: usize) -> Duration {
        self.inter_signal_delay.saturating_mul(step as u32)
    }

    /// Total playback length for `len` signals: `len * inter_signal_delay`.
    #[must_use]
    pub fn playback_duration(&self, len: usize) -> Duration {
        self.inter_signal_delay.saturating_mul(len as u32)
    }

    /// Schedule every element of `sequence`, fire-and-forget.
    ///
    /// Returns the playback duration.
    pub fn emit(&self, sequence: &[Signal], timers: &mut TimerQueue<TimerEvent>) -> Duration {
        for (step, &signal) in sequence.iter().enumerate() {
            let offset = self.activation_offset(step);
            timers.schedule(offset, TimerEvent::Activate { signal, step });
            timers.schedule(
                offset.saturating_add(self.activation_duration),
                TimerEvent::Deactivate { signal, step },
            );
            trace!(%signal, step, offset_ms = offset.as_millis() as u64, "scheduled activation");
        }
        self.playback_duration(sequence.len())
    }
}
