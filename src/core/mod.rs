//! Core engine types: signals, RNG, configuration, errors.
//!
//! These are the leaf building blocks shared by every other module.
//! Hosts configure them once via `GameConfig` and `SignalCatalog`.

pub mod config;
pub mod error;
pub mod rng;
pub mod signal;

pub use config::{GameConfig, Level, LevelTable, Timing};
pub use error::GameError;
pub use rng::GameRng;
pub use signal::{Signal, SignalCatalog};
