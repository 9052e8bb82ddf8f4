//! Snake Duel - a player and autonomous bots sharing one wrapping terminal grid
//!
//! This library provides:
//! - Core game logic: actors, trails, wraparound, collisions (game module)
//! - The concurrent engine: lifecycle flag, locked world, control loops (session module)
//! - Keyboard mapping and non-blocking key reads (input module)
//! - TUI rendering (render module)
//! - The terminal versus mode (modes module)

pub mod error;
pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod session;

pub use error::EngineError;
