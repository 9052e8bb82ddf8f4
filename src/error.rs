use std::io;

use thiserror::Error;

use crate::game::ActorId;

/// Failures the engine can report.
///
/// Collisions and quitting are normal endings, not errors.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("world state lock was poisoned by a panicking control loop")]
    LockPoisoned,
    #[error("control thread for actor {actor} panicked")]
    ControlThreadPanicked { actor: ActorId },
    #[error("failed to spawn control thread: {0}")]
    Spawn(#[source] io::Error),
    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
    #[error("terminal too small: need at least {min_width}x{min_height}, got {width}x{height}")]
    SurfaceTooSmall {
        width: u16,
        height: u16,
        min_width: u16,
        min_height: u16,
    },
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
