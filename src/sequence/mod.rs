//! Target sequence generation.
//!
//! Generators are trait-based so hosts can swap the source of new signals:
//! - `RandomGenerator`: Uniform independent draws (the real game)
//! - `ScriptedGenerator`: Replays a fixed list (tests, demos, replays)

mod generator;

pub use generator::{RandomGenerator, ScriptedGenerator, SequenceGenerator};

use smallvec::SmallVec;

use crate::core::Signal;

/// An ordered run of signals.
///
/// The longest default level is 31 rounds, so sequences normally stay inline.
pub type Sequence = SmallVec<[Signal; 32]>;
