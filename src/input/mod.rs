//! Participant input validation.
//!
//! The validator compares each submitted signal against the target sequence
//! at the same position. A mismatch is checked before completion, so a wrong
//! signal in the last slot is still a mismatch.

use serde::{Deserialize, Serialize};

use crate::core::Signal;
use crate::sequence::Sequence;

/// Result of a single submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Correct so far; this many signals are still expected (always > 0).
    Continue(usize),
    /// The whole target sequence has been reproduced.
    RoundComplete,
    /// The signal differs from the target at its position.
    Mismatch,
}

impl Outcome {
    /// Remaining presses after this submission.
    #[must_use]
    pub fn remaining(&self) -> Option<usize> {
        match self {
            Outcome::Continue(n) => Some(*n),
            Outcome::RoundComplete => Some(0),
            Outcome::Mismatch => None,
        }
    }
}

/// Stateless checker over a target and a participant sequence.
///
/// ```
/// use simon_says::core::Signal;
/// use simon_says::input::{InputValidator, Outcome};
/// use simon_says::sequence::Sequence;
///
/// let red = Signal::new(0);
/// let blue = Signal::new(2);
/// let target: Sequence = [red, blue].into_iter().collect();
/// let mut entered = Sequence::new();
///
/// assert_eq!(InputValidator::submit(&target, &mut entered, red), Outcome::Continue(1));
/// assert_eq!(InputValidator::submit(&target, &mut entered, blue), Outcome::RoundComplete);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct InputValidator;

impl InputValidator {
    /// Append `signal` to `participant` and check it against `target`.
    pub fn submit(target: &[Signal], participant: &mut Sequence, signal: Signal) -> Outcome {
        participant.push(signal);
        let index = participant.len() - 1;

        if target.get(index) != Some(&signal) {
            return Outcome::Mismatch;
        }

        if participant.len() == target.len() {
            Outcome::RoundComplete
        } else {
            Outcome::Continue(target.len() - participant.len())
        }
    }

    /// Check that `participant` is a prefix of `target`.
    #[must_use]
    pub fn is_prefix(target: &[Signal], participant: &[Signal]) -> bool {
        participant.len() <= target.len() && target[..participant.len()] == *participant
    }
}
