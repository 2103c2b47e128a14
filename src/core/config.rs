//! Game configuration types.
//!
//! Hosts configure the engine at startup by providing:
//! - `Timing`: Playback pacing (inter-signal delay, activation length, ...)
//! - `LevelTable`: Level number to target round count
//! - `GameConfig`: Combines both with the RNG seed and acknowledgment mode
//!
//! Everything here is fixed for the lifetime of a controller. Only the level
//! picked at `start` varies between games.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::error::GameError;

/// Playback and pacing delays.
///
/// All delays are measured on the controller's virtual clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timing {
    /// Offset between consecutive playback activations.
    pub inter_signal_delay: Duration,

    /// How long a single activation stays visible.
    /// Must be shorter than `inter_signal_delay`.
    pub activation_duration: Duration,

    /// Extra wait after the last playback slot before input opens.
    /// Input opens at `len * inter_signal_delay + input_lead`.
    pub input_lead: Duration,

    /// Pause between a completed round and the next playback.
    pub round_pacing: Duration,
}

impl Timing {
    pub const INTER_SIGNAL_DELAY: Duration = Duration::from_millis(600);
    pub const ACTIVATION_DURATION: Duration = Duration::from_millis(500);
    pub const INPUT_LEAD: Duration = Duration::from_millis(1000);
    pub const ROUND_PACING: Duration = Duration::from_millis(1000);

    /// Longest accepted delay. Keeps every deadline of a 255-round playback
    /// far inside `Duration`'s range.
    pub const MAX_DELAY: Duration = Duration::from_secs(3600);

    /// Check that activations cannot overlap and that input opens strictly
    /// after playback ends.
    ///
    /// An all-zero timing is allowed: events due at the same instant fire in
    /// scheduling order, so activation `i` still ends before `i + 1` starts
    /// and input still opens after the last one.
    pub fn validate(&self) -> Result<(), GameError> {
        for delay in self.delays() {
            if delay > Self::MAX_DELAY {
                return Err(GameError::DelayTooLong {
                    delay_ms: delay.as_millis(),
                    max_ms: Self::MAX_DELAY.as_millis(),
                });
            }
        }
        if !self.activation_duration.is_zero()
            && self.activation_duration >= self.inter_signal_delay
        {
            return Err(GameError::OverlappingActivations {
                activation_ms: self.activation_duration.as_millis(),
                delay_ms: self.inter_signal_delay.as_millis(),
            });
        }
        if self.input_lead.is_zero() && self.delays().iter().any(|d| !d.is_zero()) {
            return Err(GameError::ZeroInputLead);
        }
        Ok(())
    }

    fn delays(&self) -> [Duration; 4] {
        [
            self.inter_signal_delay,
            self.activation_duration,
            self.input_lead,
            self.round_pacing,
        ]
    }

    /// Uniformly scale every delay, e.g. `0.0` for instant bot games.
    ///
    /// Results are capped at `MAX_DELAY`; a negative or NaN factor counts
    /// as zero.
    #[must_use]
    pub fn scaled(self, factor: f64) -> Self {
        let factor = factor.max(0.0);
        let scale = |d: Duration| {
            Duration::try_from_secs_f64(d.as_secs_f64() * factor)
                .map_or(Self::MAX_DELAY, |d| d.min(Self::MAX_DELAY))
        };
        Self {
            inter_signal_delay: scale(self.inter_signal_delay),
            activation_duration: scale(self.activation_duration),
            input_lead: scale(self.input_lead),
            round_pacing: scale(self.round_pacing),
        }
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            inter_signal_delay: Self::INTER_SIGNAL_DELAY,
            activation_duration: Self::ACTIVATION_DURATION,
            input_lead: Self::INPUT_LEAD,
            round_pacing: Self::ROUND_PACING,
        }
    }
}

/// One difficulty level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    /// Level number the host asks for.
    pub number: u32,
    /// Rounds to complete to win.
    pub rounds: u32,
}

/// Fixed table from level number to target round count.
///
/// ```
/// use simon_says::core::LevelTable;
///
/// let table = LevelTable::default();
/// assert_eq!(table.rounds_for(1).unwrap(), 8);
/// assert_eq!(table.rounds_for(4).unwrap(), 31);
/// assert!(table.rounds_for(5).is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelTable {
    levels: Vec<Level>,
}

impl LevelTable {
    /// Build a table from `(level, rounds)` pairs.
    pub fn new(levels: impl IntoIterator<Item = (u32, u32)>) -> Result<Self, GameError> {
        let levels: Vec<Level> = levels
            .into_iter()
            .map(|(number, rounds)| Level { number, rounds })
            .collect();

        if levels.is_empty() {
            return Err(GameError::InvalidLevelTable("no levels".to_string()));
        }
        for (i, level) in levels.iter().enumerate() {
            if level.rounds == 0 {
                return Err(GameError::InvalidLevelTable(format!(
                    "level {} has zero rounds",
                    level.number
                )));
            }
            if levels[..i].iter().any(|l| l.number == level.number) {
                return Err(GameError::InvalidLevelTable(format!(
                    "level {} listed twice",
                    level.number
                )));
            }
        }

        Ok(Self { levels })
    }

    /// Target round count for a level.
    pub fn rounds_for(&self, level: u32) -> Result<u32, GameError> {
        self.levels
            .iter()
            .find(|l| l.number == level)
            .map(|l| l.rounds)
            .ok_or_else(|| GameError::InvalidLevel {
                level,
                valid: self.describe_levels(),
            })
    }

    /// The smallest level number, used when a host has no preference.
    #[must_use]
    pub fn first_level(&self) -> u32 {
        self.levels.iter().map(|l| l.number).min().unwrap_or(1)
    }

    /// Human listing such as `1, 2, 3, or 4`.
    #[must_use]
    pub fn describe_levels(&self) -> String {
        let numbers: Vec<String> = self.levels.iter().map(|l| l.number.to_string()).collect();
        match numbers.as_slice() {
            [] => String::new(),
            [only] => only.clone(),
            [head @ .., last] => format!("{}, or {}", head.join(", "), last),
        }
    }
}

impl Default for LevelTable {
    fn default() -> Self {
        Self {
            levels: vec![
                Level { number: 1, rounds: 8 },
                Level { number: 2, rounds: 14 },
                Level { number: 3, rounds: 20 },
                Level { number: 4, rounds: 31 },
            ],
        }
    }
}

/// Complete controller configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Playback pacing.
    pub timing: Timing,

    /// Level to round-count table.
    pub levels: LevelTable,

    /// Seed for the default random generator.
    /// `None` seeds from OS entropy.
    pub seed: Option<u64>,

    /// Return to `Idle` right after the game-ended notification.
    /// When false the controller rests in `Won`/`Lost` until acknowledged.
    pub auto_acknowledge: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            timing: Timing::default(),
            levels: LevelTable::default(),
            seed: None,
            auto_acknowledge: true,
        }
    }
}

impl GameConfig {
    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Replace the timing.
    #[must_use]
    pub fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    /// Replace the level table.
    #[must_use]
    pub fn with_levels(mut self, levels: LevelTable) -> Self {
        self.levels = levels;
        self
    }

    /// Require an explicit `acknowledge()` after each game.
    #[must_use]
    pub fn with_manual_acknowledge(mut self) -> Self {
        self.auto_acknowledge = false;
        self
    }

    /// Validate everything that serde or field access could have bypassed.
    pub fn validate(&self) -> Result<(), GameError> {
        self.timing.validate()?;
        LevelTable::new(self.levels.levels.iter().map(|l| (l.number, l.rounds)))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timing() {
        let timing = Timing::default();
        assert_eq!(timing.inter_signal_delay, Duration::from_millis(600));
        assert_eq!(timing.activation_duration, Duration::from_millis(500));
        assert_eq!(timing.input_lead, Duration::from_millis(1000));
        assert_eq!(timing.round_pacing, Duration::from_millis(1000));
        assert!(timing.validate().is_ok());
    }

    #[test]
    fn test_overlapping_timing_rejected() {
        let timing = Timing {
            activation_duration: Duration::from_millis(600),
            ..Timing::default()
        };
        assert_eq!(
            timing.validate(),
            Err(GameError::OverlappingActivations {
                activation_ms: 600,
                delay_ms: 600
            })
        );
    }

    #[test]
    fn test_scaled_timing() {
        let fast = Timing::default().scaled(0.5);
        assert_eq!(fast.inter_signal_delay, Duration::from_millis(300));
        assert_eq!(fast.activation_duration, Duration::from_millis(250));

        let instant = Timing::default().scaled(0.0);
        assert_eq!(instant.input_lead, Duration::ZERO);
        assert!(instant.validate().is_ok());
    }

    #[test]
    fn test_scaled_timing_caps_extremes() {
        let slow = Timing::default().scaled(1e300);
        assert_eq!(slow.inter_signal_delay, Timing::MAX_DELAY);
        assert_eq!(slow.round_pacing, Timing::MAX_DELAY);

        let endless = Timing::default().scaled(f64::INFINITY);
        assert_eq!(endless.input_lead, Timing::MAX_DELAY);

        let nan = Timing::default().scaled(f64::NAN);
        assert_eq!(nan.inter_signal_delay, Duration::ZERO);
        assert!(nan.validate().is_ok());
    }

    #[test]
    fn test_long_delay_rejected() {
        let timing = Timing {
            round_pacing: Duration::MAX,
            ..Timing::default()
        };
        assert!(matches!(
            timing.validate(),
            Err(GameError::DelayTooLong { max_ms: 3_600_000, .. })
        ));

        let at_limit = Timing {
            inter_signal_delay: Timing::MAX_DELAY,
            ..Timing::default()
        };
        assert!(at_limit.validate().is_ok());
    }

    #[test]
    fn test_zero_input_lead_rejected() {
        let timing = Timing {
            input_lead: Duration::ZERO,
            ..Timing::default()
        };
        assert_eq!(timing.validate(), Err(GameError::ZeroInputLead));

        let instant = Timing::default().scaled(0.0);
        assert_eq!(instant.input_lead, Duration::ZERO);
        assert!(instant.validate().is_ok());
    }

    #[test]
    fn test_default_level_table() {
        let table = LevelTable::default();
        assert_eq!(table.rounds_for(1), Ok(8));
        assert_eq!(table.rounds_for(2), Ok(14));
        assert_eq!(table.rounds_for(3), Ok(20));
        assert_eq!(table.rounds_for(4), Ok(31));
        assert_eq!(table.first_level(), 1);
        assert_eq!(table.describe_levels(), "1, 2, 3, or 4");
    }

    #[test]
    fn test_invalid_level() {
        let table = LevelTable::default();
        for level in [0, 5, 99] {
            assert!(matches!(
                table.rounds_for(level),
                Err(GameError::InvalidLevel { level: l, .. }) if l == level
            ));
        }
    }

    #[test]
    fn test_custom_level_table() {
        let table = LevelTable::new([(1, 3), (2, 5)]).unwrap();
        assert_eq!(table.rounds_for(2), Ok(5));
        assert_eq!(table.describe_levels(), "1, or 2");

        assert!(LevelTable::new([]).is_err());
        assert!(LevelTable::new([(1, 0)]).is_err());
        assert!(LevelTable::new([(1, 3), (1, 4)]).is_err());
    }

    #[test]
    fn test_builder_pattern() {
        let config = GameConfig::default()
            .with_seed(123)
            .with_timing(Timing::default().scaled(0.0))
            .with_manual_acknowledge();

        assert_eq!(config.seed, Some(123));
        assert!(!config.auto_acknowledge);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_serialization() {
        let config = GameConfig::default().with_seed(7);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
