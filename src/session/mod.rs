//! Concurrency layer: the lifecycle flag, the locked world, per-actor
//! control loops and the coordinator that ties them together.

pub mod control;
pub mod coordinator;
pub mod lifecycle;
pub mod shared;

pub use control::ControlLoop;
pub use coordinator::{Session, SessionSummary};
pub use lifecycle::{Lifecycle, Phase, StopReason};
pub use shared::SharedWorld;
