//! Core game logic module for Snake
//!
//! This module contains all the game logic without any terminal or timer
//! dependencies. Hosts drive it with [`Command`]s and `step()` calls and react
//! to the [`GameEvent`]s it queues.

pub mod action;
pub mod config;
pub mod engine;
pub mod event;
pub mod state;

// Re-export commonly used types
pub use action::{Axis, Command, Direction};
pub use config::{ConfigError, GameConfig};
pub use engine::{GameEngine, StepResult, FOOD_SCORE};
pub use event::GameEvent;
pub use state::{CollisionType, GamePhase, GameState, Position, Snake};
