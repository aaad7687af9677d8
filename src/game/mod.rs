//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! It is driven by the session state machine for both manual and autopilot play.

pub mod action;
pub mod config;
pub mod engine;
pub mod spawn;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use config::{ConfigError, GameConfig};
pub use engine::{GameEngine, StepResult};
pub use spawn::{RandomSpawner, ScanSpawner, TargetSpawner};
pub use state::{CollisionType, GameState, Position, Snake, StepOutcome};
