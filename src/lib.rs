//! Siege Duel - a turn-based two-player artillery game
//!
//! Core modules:
//! - `engine`: match simulation (ballistics, collisions, turn/victory state)
//! - `obstacle` / `projectile`: the destructible bunkers and the shell
//! - `duel`: fixed-step turn driver used by the window and headless modes
//! - `config`: game-balance constants and per-match tunables
//! - `logging`: topic-filtered console logger

pub mod config;
pub mod duel;
pub mod engine;
pub mod error;
pub mod logging;
pub mod obstacle;
pub mod projectile;
pub mod types;
pub mod utils;

pub use config::MatchConfig;
pub use duel::{Duel, TurnOutcome};
pub use engine::{MatchEngine, MatchEvent, MatchPhase};
pub use error::{ConfigError, SimError};
pub use obstacle::{CollisionSide, Obstacle, Rect};
pub use projectile::{Launch, Projectile};
pub use types::{Player, Point};
