//! Grid Snake - a terminal snake game driven by a fixed-tick engine
//!
//! This library provides:
//! - Core game logic with command dispatch and event output (game module)
//! - Keyboard mapping (input module)
//! - Cell canvas and TUI rendering (render module)
//! - Session statistics (metrics module)
//! - The interactive terminal session and its tick scheduler (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
