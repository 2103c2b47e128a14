//! Property tests for controller and timer invariants.
//!
//! Random interleavings of clock advances, correct presses, and arbitrary
//! presses must never break the round bookkeeping.

use std::time::Duration;

use proptest::prelude::*;

use simon_says::core::{GameConfig, Signal, SignalCatalog};
use simon_says::game::{GamePhase, NullListener, RoundController};
use simon_says::input::{InputValidator, Outcome};
use simon_says::sequence::{RandomGenerator, Sequence};
use simon_says::timing::TimerQueue;

#[derive(Clone, Debug)]
enum Step {
    Advance(u64),
    Press(u8),
    Echo,
    Reset,
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        3 => (0u64..3_000).prop_map(Step::Advance),
        2 => (0u8..6).prop_map(Step::Press),
        6 => Just(Step::Echo),
        1 => Just(Step::Reset),
    ]
}

fn game(seed: u64) -> RoundController<RandomGenerator, NullListener> {
    RoundController::new(
        GameConfig::default(),
        SignalCatalog::classic(),
        RandomGenerator::new(seed),
        NullListener,
    )
    .unwrap()
}

fn check_invariants(game: &RoundController<RandomGenerator, NullListener>) {
    let target = game.target_sequence();
    let participant = game.participant_sequence();

    if game.phase().is_running() {
        assert_eq!(target.len(), game.current_round() as usize);
        assert!(game.current_round() >= 1);
        assert!(game.current_round() <= game.target_round_count());
    } else {
        assert_eq!(game.current_round(), 0);
        assert!(target.is_empty());
        assert_eq!(game.next_deadline(), None);
    }

    assert!(InputValidator::is_prefix(target, participant));
    if game.phase() == GamePhase::AwaitingInput {
        assert!(participant.len() < target.len());
    } else {
        assert!(participant.is_empty());
    }
}

proptest! {
    #[test]
    fn prop_round_bookkeeping_holds(
        seed in any::<u64>(),
        level in 1u32..=4,
        steps in prop::collection::vec(step(), 1..200),
    ) {
        let mut game = game(seed);
        game.start(level).unwrap();
        check_invariants(&game);

        for step in steps {
            match step {
                Step::Advance(n) => game.advance(Duration::from_millis(n)),
                Step::Press(i) => {
                    game.signal_received(Signal::new(i));
                }
                Step::Echo => {
                    if let Some(&next) = game
                        .target_sequence()
                        .get(game.participant_sequence().len())
                    {
                        game.signal_received(next);
                    }
                }
                Step::Reset => game.reset(),
            }
            check_invariants(&game);

            if game.phase() == GamePhase::Idle {
                game.start(level).unwrap();
            }
        }
    }

    #[test]
    fn prop_target_only_grows_within_a_game(
        seed in any::<u64>(),
        rounds in 1usize..14,
    ) {
        let mut game = game(seed);
        game.start(2).unwrap();
        let mut previous: Vec<Signal> = Vec::new();

        for _ in 0..rounds {
            game.run_until_input();
            let target = game.target_sequence().to_vec();
            prop_assert_eq!(target.len(), previous.len() + 1);
            prop_assert_eq!(&target[..previous.len()], &previous[..]);

            for &signal in &target {
                game.signal_received(signal);
            }
            previous = target;
        }
    }

    #[test]
    fn prop_reset_is_idempotent(
        seed in any::<u64>(),
        advance_ms in 0u64..10_000,
    ) {
        let mut game = game(seed);
        game.start(1).unwrap();
        game.advance(Duration::from_millis(advance_ms));

        game.reset();
        let once = game.snapshot();
        game.reset();
        let twice = game.snapshot();
        prop_assert_eq!(once.phase, GamePhase::Idle);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_correct_reproduction_counts_down(
        raw in prop::collection::vec(0u8..4, 1..32),
    ) {
        let target: Vec<Signal> = raw.into_iter().map(Signal::new).collect();
        let mut participant = Sequence::new();

        for (i, &signal) in target.iter().enumerate() {
            let outcome = InputValidator::submit(&target, &mut participant, signal);
            let left = target.len() - i - 1;
            if left == 0 {
                prop_assert_eq!(outcome, Outcome::RoundComplete);
            } else {
                prop_assert_eq!(outcome, Outcome::Continue(left));
            }
        }
    }

    #[test]
    fn prop_timers_fire_in_deadline_order(
        delays in prop::collection::vec(0u64..50, 1..64),
    ) {
        let mut queue = TimerQueue::new();
        for (i, &delay) in delays.iter().enumerate() {
            queue.schedule(Duration::from_millis(delay), i);
        }

        let mut fired = Vec::new();
        while let Some(timer) = queue.pop_due(Duration::from_millis(1_000)) {
            fired.push((timer.due, timer.event));
        }

        prop_assert_eq!(fired.len(), delays.len());
        for pair in fired.windows(2) {
            let (due_a, index_a) = pair[0];
            let (due_b, index_b) = pair[1];
            prop_assert!(due_a < due_b || (due_a == due_b && index_a < index_b));
        }
    }
}
