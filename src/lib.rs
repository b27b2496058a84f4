//! Grid Snake - a terminal Snake game with bombs and power-ups
//!
//! This library provides:
//! - Core game logic (game module), free of any I/O
//! - Keyboard mapping (input module)
//! - TUI rendering (render module)
//! - Session statistics (metrics module)
//! - The interactive play loop and its timers (modes module)

pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
