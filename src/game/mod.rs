//! Core game logic for the snake duel
//!
//! Nothing in here touches the terminal or any synchronization primitive.
//! Actors draw into a [`Canvas`] and the session layer decides who runs when.

pub mod collision;
pub mod config;
pub mod heading;
pub mod policy;
pub mod state;
pub mod surface;
pub mod world;

// Re-export commonly used types
pub use collision::head_collides;
pub use config::GameConfig;
pub use heading::Heading;
pub use policy::{FixedPolicy, RandomPolicy, SteeringPolicy};
pub use state::{Actor, ActorKind, Position};
pub use surface::{Bounds, Canvas, Glyph, Surface};
pub use world::{ActorId, ActorReport, Collision, WorldState};
