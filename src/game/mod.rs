//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Everything that changes the board goes through `GameEngine`.

pub mod action;
pub mod config;
pub mod difficulty;
pub mod engine;
pub mod placement;
pub mod snapshot;
pub mod state;

// Re-export commonly used types
pub use action::{Command, Direction};
pub use config::GameConfig;
pub use engine::{GameEngine, TickOutcome};
pub use snapshot::{Cell, GameSnapshot};
pub use state::{CollisionType, GameOverReason, GameState, Invincibility, Phase, Position, Snake};
