//! Round controller: the game state machine.
//!
//! ## Phases
//!
//! ```text
//! Idle --start--> Playback --timer--> AwaitingInput --input--+
//!                    ^                                        |
//!                    +------ pacing timer (next round) -------+
//!                                                             |
//!                                  Won / Lost <---------------+
//!                                      |
//!                     acknowledge (or automatic) --> Idle
//! ```
//!
//! The controller owns both sequences and the round counters. Time only
//! moves when the host calls `advance`; input is only accepted while the
//! phase is `AwaitingInput` and is dropped otherwise.

use std::time::Duration;
use tracing::{debug, error, info, trace, warn};

use crate::core::{GameConfig, GameError, GameRng, Signal, SignalCatalog};
use crate::input::{InputValidator, Outcome};
use crate::playback::PlaybackScheduler;
use crate::sequence::{RandomGenerator, Sequence, SequenceGenerator};
use crate::timing::{TimerEvent, TimerQueue};

use super::listener::{GameListener, NullListener};
use super::state::{GamePhase, GameResult, GameSnapshot, RoundState};

const TITLE: &str = "Simon Says";
const COMPUTER_TURN: &str = "The computer's turn...";
const ROUND_CLEARED: &str = "Nice! Keep going!";
const WON_MESSAGE: &str = "Congratulations! You won!";
const LOST_MESSAGE: &str = "Oh no, that's wrong. Game over.";

/// Status line shown while the participant is expected to press.
#[must_use]
pub fn presses_left_message(remaining: usize) -> String {
    format!(
        "Your turn... {} press{} left",
        remaining,
        if remaining > 1 { "es" } else { "" }
    )
}

/// Heading shown during a round.
#[must_use]
pub fn round_heading(round: RoundState) -> String {
    format!("Round {} of {}", round.current_round, round.target_round_count)
}

/// The game state machine.
///
/// ## Example
///
/// ```
/// use simon_says::core::{GameConfig, Signal, SignalCatalog};
/// use simon_says::game::{GamePhase, RecordingListener, RoundController};
/// use simon_says::input::Outcome;
/// use simon_says::sequence::ScriptedGenerator;
///
/// let red = Signal::new(0);
/// let mut game = RoundController::new(
///     GameConfig::default(),
///     SignalCatalog::classic(),
///     ScriptedGenerator::new([red]),
///     RecordingListener::new(),
/// )
/// .unwrap();
///
/// game.start(1).unwrap();
/// assert_eq!(game.phase(), GamePhase::Playback);
///
/// // Input during playback is dropped
/// assert_eq!(game.signal_received(red), None);
///
/// game.run_until_input();
/// assert_eq!(game.phase(), GamePhase::AwaitingInput);
/// assert_eq!(game.signal_received(red), Some(Outcome::RoundComplete));
/// assert_eq!(game.current_round(), 1);
///
/// game.run_until_input();
/// assert_eq!(game.current_round(), 2);
/// assert_eq!(game.target_sequence(), &[red, red]);
/// ```
pub struct RoundController<G = RandomGenerator, L = NullListener> {
    config: GameConfig,
    catalog: SignalCatalog,
    generator: G,
    listener: L,
    playback: PlaybackScheduler,
    timers: TimerQueue<TimerEvent>,

    phase: GamePhase,
    round: RoundState,
    target: Sequence,
    participant: Sequence,
    last_result: Option<GameResult>,
}

impl<L: GameListener> RoundController<RandomGenerator, L> {
    /// Classic four-color game with a random generator seeded from
    /// `config.seed` (or OS entropy).
    pub fn classic(config: GameConfig, listener: L) -> Result<Self, GameError> {
        let generator = RandomGenerator::from_rng(GameRng::from_seed_or_entropy(config.seed));
        Self::new(config, SignalCatalog::classic(), generator, listener)
    }
}

impl<G: SequenceGenerator, L: GameListener> RoundController<G, L> {
    /// Create an idle controller.
    ///
    /// Fails on an invalid configuration or a catalog outside 2 to 255
    /// signals.
    pub fn new(
        config: GameConfig,
        catalog: SignalCatalog,
        generator: G,
        listener: L,
    ) -> Result<Self, GameError> {
        config.validate()?;
        if !(SignalCatalog::MIN_SIGNALS..=SignalCatalog::MAX_SIGNALS).contains(&catalog.len()) {
            return Err(GameError::InvalidCatalogSize(catalog.len()));
        }
        let playback = PlaybackScheduler::new(&config.timing)?;

        Ok(Self {
            config,
            catalog,
            generator,
            listener,
            playback,
            timers: TimerQueue::new(),
            phase: GamePhase::Idle,
            round: RoundState::default(),
            target: Sequence::new(),
            participant: Sequence::new(),
            last_result: None,
        })
    }

    // === Accessors ===

    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    #[must_use]
    pub fn round(&self) -> RoundState {
        self.round
    }

    #[must_use]
    pub fn current_round(&self) -> u32 {
        self.round.current_round
    }

    #[must_use]
    pub fn target_round_count(&self) -> u32 {
        self.round.target_round_count
    }

    /// The computer-chosen sequence for the current round.
    #[must_use]
    pub fn target_sequence(&self) -> &[Signal] {
        &self.target
    }

    /// Signals entered so far this round.
    #[must_use]
    pub fn participant_sequence(&self) -> &[Signal] {
        &self.participant
    }

    /// Presses still expected, while awaiting input.
    #[must_use]
    pub fn remaining_presses(&self) -> Option<usize> {
        (self.phase == GamePhase::AwaitingInput)
            .then(|| self.target.len().saturating_sub(self.participant.len()))
    }

    /// Result of the most recent finished game.
    #[must_use]
    pub fn last_result(&self) -> Option<GameResult> {
        self.last_result
    }

    #[must_use]
    pub fn catalog(&self) -> &SignalCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Current virtual time.
    #[must_use]
    pub fn clock(&self) -> Duration {
        self.timers.now()
    }

    /// Time until the next scheduled step, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.until_next()
    }

    #[must_use]
    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    #[must_use]
    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Capture the full observable state.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            phase: self.phase,
            round: self.round,
            target: self.target.clone(),
            participant: self.participant.clone(),
            last_result: self.last_result,
            clock: self.timers.now(),
            pending_timers: self.timers.len(),
            seed: self.generator.replay_seed(),
        }
    }

    // === Inbound: start / input / time ===

    /// Begin a game at `level`.
    ///
    /// Only valid from `Idle`. An unknown level is reported without touching
    /// any state, including the previous target round count.
    pub fn start(&mut self, level: u32) -> Result<(), GameError> {
        if self.phase != GamePhase::Idle {
            warn!(phase = %self.phase, level, "start requested while not idle");
            return Err(GameError::NotIdle(self.phase));
        }

        let rounds = self.config.levels.rounds_for(level).map_err(|e| {
            warn!(level, "rejected start: {}", e);
            e
        })?;

        self.timers.clear();
        self.target.clear();
        self.participant.clear();
        self.last_result = None;
        self.round = RoundState {
            current_round: 1,
            target_round_count: rounds,
        };

        info!(level, rounds, "game started");
        self.enter_playback();
        Ok(())
    }

    /// A participant activated `signal`.
    ///
    /// Returns the validator outcome, or `None` when the signal was dropped
    /// because the controller is not awaiting input or the signal is not in
    /// the catalog.
    pub fn signal_received(&mut self, signal: Signal) -> Option<Outcome> {
        if self.phase != GamePhase::AwaitingInput {
            debug!(%signal, phase = %self.phase, "dropping input outside AwaitingInput");
            return None;
        }
        if !self.catalog.contains(signal) {
            warn!(%signal, "dropping signal not in catalog");
            return None;
        }
        if self.participant.len() >= self.target.len()
            || self.target.len() != self.round.current_round as usize
        {
            self.force_reset("input accepted with inconsistent round state");
            return None;
        }

        self.listener.on_activate(signal);
        let outcome = InputValidator::submit(&self.target, &mut self.participant, signal);
        trace!(%signal, ?outcome, "input checked");

        match outcome {
            Outcome::Mismatch => self.finish(GameResult::Lost),
            Outcome::RoundComplete if self.round.is_final_round() => self.finish(GameResult::Won),
            Outcome::RoundComplete => self.round_cleared(),
            Outcome::Continue(remaining) => {
                self.listener.on_status_changed(&presses_left_message(remaining));
            }
        }

        Some(outcome)
    }

    /// Move the clock forward by `delta`, firing every timer due in between
    /// in deadline order. The clock saturates at `Duration::MAX`.
    pub fn advance(&mut self, delta: Duration) {
        let horizon = self.timers.now().saturating_add(delta);
        while let Some(timer) = self.timers.pop_due(horizon) {
            let event = timer.event;
            trace!(id = %timer.id, due_ms = timer.due.as_millis() as u64, ?event, "timer fired");
            self.handle_timer(event);
        }
        self.timers.advance_to(horizon);
    }

    /// Fast-forward through pending timers until input is awaited or no
    /// timers remain. Returns the virtual time that passed.
    pub fn run_until_input(&mut self) -> Duration {
        let started = self.timers.now();
        while self.phase != GamePhase::AwaitingInput {
            match self.timers.until_next() {
                Some(wait) => self.advance(wait),
                None => break,
            }
        }
        self.timers.now() - started
    }

    /// Return a finished game to `Idle`.
    pub fn acknowledge(&mut self) -> Result<(), GameError> {
        if !self.phase.is_terminal() {
            return Err(GameError::NotAcknowledgeable(self.phase));
        }
        debug!(phase = %self.phase, "game acknowledged");
        self.phase = GamePhase::Idle;
        Ok(())
    }

    /// Full reset from any phase: sequences cleared, round 0, `Idle`, pending
    /// timers dropped. The target round count of the last game is kept.
    pub fn reset(&mut self) {
        let cancelled = self.timers.clear();
        self.target.clear();
        self.participant.clear();
        self.round.current_round = 0;
        self.phase = GamePhase::Idle;
        debug!(cancelled, "controller reset");
    }

    // === Transitions ===

    /// Extend the target by one signal and play it back.
    ///
    /// Expects `target.len() == current_round - 1`.
    fn enter_playback(&mut self) {
        self.phase = GamePhase::Playback;

        let signal = self.generator.next_signal(&self.catalog);
        if !self.catalog.contains(signal) {
            self.force_reset("generator produced a signal outside the catalog");
            return;
        }
        self.target.push(signal);

        self.listener.on_heading_changed(&round_heading(self.round));
        self.listener.on_status_changed(COMPUTER_TURN);

        let playback = self.playback.emit(&self.target, &mut self.timers);
        let round = self.round.current_round;
        self.timers.schedule(
            playback.saturating_add(self.config.timing.input_lead),
            TimerEvent::OpenInput { round },
        );

        debug!(
            round,
            length = self.target.len(),
            playback_ms = playback.as_millis() as u64,
            "playback scheduled"
        );
    }

    fn handle_timer(&mut self, event: TimerEvent) {
        match event {
            TimerEvent::Activate { signal, .. } => self.listener.on_activate(signal),
            TimerEvent::Deactivate { signal, .. } => self.listener.on_deactivate(signal),
            TimerEvent::OpenInput { round } => {
                if self.phase != GamePhase::Playback || round != self.round.current_round {
                    debug!(round, phase = %self.phase, "stale input timer ignored");
                    return;
                }
                self.participant.clear();
                self.phase = GamePhase::AwaitingInput;
                self.listener
                    .on_status_changed(&presses_left_message(self.target.len()));
                debug!(round, "awaiting input");
            }
            TimerEvent::NextRound { round } => {
                if self.phase != GamePhase::Playback || round != self.round.current_round + 1 {
                    debug!(round, phase = %self.phase, "stale round timer ignored");
                    return;
                }
                self.round.current_round = round;
                self.enter_playback();
            }
        }
    }

    /// Round reproduced and more rounds remain: pause, then play the next.
    ///
    /// Input is closed immediately; the round counter moves together with the
    /// target extension when the pacing timer fires.
    fn round_cleared(&mut self) {
        self.participant.clear();
        self.phase = GamePhase::Playback;
        self.listener.on_status_changed(ROUND_CLEARED);

        let next = self.round.current_round + 1;
        self.timers
            .schedule(self.config.timing.round_pacing, TimerEvent::NextRound { round: next });
        debug!(cleared = self.round.current_round, next, "round complete");
    }

    fn finish(&mut self, result: GameResult) {
        let reached = self.round.current_round;
        self.reset();
        self.phase = result.phase();
        self.last_result = Some(result);

        let message = match result {
            GameResult::Won => WON_MESSAGE,
            GameResult::Lost => LOST_MESSAGE,
        };
        info!(?result, round = reached, rounds = self.round.target_round_count, "game over");

        self.listener.on_game_ended(result.is_win(), message);
        self.listener.on_heading_changed(TITLE);

        if self.config.auto_acknowledge {
            self.phase = GamePhase::Idle;
        }
    }

    fn force_reset(&mut self, reason: &str) {
        error!(phase = %self.phase, round = self.round.current_round, "{}; forcing reset", reason);
        self.reset();
    }
}

impl<G, L> std::fmt::Debug for RoundController<G, L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoundController")
            .field("phase", &self.phase)
            .field("round", &self.round)
            .field("target", &self.target)
            .field("participant", &self.participant)
            .field("clock", &self.timers.now())
            .finish_non_exhaustive()
    }
}
