//! Sequence generators.

use crate::core::{GameRng, Signal, SignalCatalog};

/// Source of the next signal appended to the target sequence.
pub trait SequenceGenerator {
    /// Produce the next signal.
    ///
    /// The controller only calls this with a validated (non-empty) catalog;
    /// an empty catalog is a programming error and may panic.
    fn next_signal(&mut self, catalog: &SignalCatalog) -> Signal;

    /// Seed that reproduces this generator's draws, if it is random.
    fn replay_seed(&self) -> Option<u64> {
        None
    }
}

/// Uniform random draws: each signal has probability `1/C`, independent of
/// previous draws. Repeats are expected.
#[derive(Clone, Debug)]
pub struct RandomGenerator {
    rng: GameRng,
}

impl RandomGenerator {
    /// Deterministic generator from a seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
        }
    }

    /// Generator from an existing RNG stream.
    #[must_use]
    pub fn from_rng(rng: GameRng) -> Self {
        Self { rng }
    }

    /// The seed in use, for replaying a game.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }
}

impl SequenceGenerator for RandomGenerator {
    fn next_signal(&mut self, catalog: &SignalCatalog) -> Signal {
        assert!(!catalog.is_empty(), "Signal catalog must not be empty");
        let index = self.rng.pick_index(catalog.len());
        Signal::new(index as u8)
    }

    fn replay_seed(&self) -> Option<u64> {
        Some(self.rng.seed())
    }
}

/// Replays a fixed script, cycling when it runs out.
///
/// ```
/// use simon_says::core::{Signal, SignalCatalog};
/// use simon_says::sequence::{ScriptedGenerator, SequenceGenerator};
///
/// let catalog = SignalCatalog::classic();
/// let mut gen = ScriptedGenerator::new([Signal::new(0), Signal::new(2)]);
/// assert_eq!(gen.next_signal(&catalog), Signal::new(0));
/// assert_eq!(gen.next_signal(&catalog), Signal::new(2));
/// assert_eq!(gen.next_signal(&catalog), Signal::new(0));
/// ```
#[derive(Clone, Debug)]
pub struct ScriptedGenerator {
    script: Vec<Signal>,
    cursor: usize,
}

impl ScriptedGenerator {
    /// Create from a non-empty script.
    pub fn new(script: impl IntoIterator<Item = Signal>) -> Self {
        let script: Vec<Signal> = script.into_iter().collect();
        assert!(!script.is_empty(), "Script must contain at least one signal");
        Self { script, cursor: 0 }
    }

    /// Signals handed out so far.
    #[must_use]
    pub fn drawn(&self) -> usize {
        self.cursor
    }
}

impl SequenceGenerator for ScriptedGenerator {
    /// Scripted signals are not checked here; the controller rejects any
    /// that fall outside its catalog.
    fn next_signal(&mut self, _catalog: &SignalCatalog) -> Signal {
        let signal = self.script[self.cursor % self.script.len()];
        self.cursor += 1;
        signal
    }
}

impl<G: SequenceGenerator + ?Sized> SequenceGenerator for Box<G> {
    fn next_signal(&mut self, catalog: &SignalCatalog) -> Signal {
        (**self).next_signal(catalog)
    }

    fn replay_seed(&self) -> Option<u64> {
        (**self).replay_seed()
    }
}
