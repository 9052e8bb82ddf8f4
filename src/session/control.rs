//! Per-actor tick loops.
//!
//! Every tick runs entirely under the world lock and the pause between
//! ticks happens after the lock is released. The lifecycle flag is read at
//! the top of each iteration, so a stop request is honoured within one tick
//! interval.

use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, info, warn};

use super::lifecycle::{Lifecycle, StopReason};
use super::shared::SharedWorld;
use crate::error::EngineError;
use crate::game::{ActorId, Collision, Heading, SteeringPolicy};

/// Drives one actor against the shared world
#[derive(Debug, Clone)]
pub struct ControlLoop {
    id: ActorId,
    world: SharedWorld,
    lifecycle: Lifecycle,
    tick_interval: Duration,
}

impl ControlLoop {
    pub fn new(id: ActorId, world: SharedWorld, lifecycle: Lifecycle, tick_interval: Duration) -> Self {
        Self {
            id,
            world,
            lifecycle,
            tick_interval,
        }
    }

    pub fn world(&self) -> &SharedWorld {
        &self.world
    }

    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    /// Execute one tick under exclusion.
    ///
    /// A detected collision moves the lifecycle to Stopping before the lock
    /// is released.
    pub fn tick(
        &self,
        steer: Option<Heading>,
        policy: Option<&mut dyn SteeringPolicy>,
    ) -> Result<Option<Collision>, EngineError> {
        self.world.with_exclusive(|world| {
            if let Some(heading) = steer {
                world.steer(self.id, heading);
            }

            let collision = world.tick_actor(self.id, policy);
            if let Some(collision) = collision {
                if self.lifecycle.request_stop(StopReason::Collision(collision)) {
                    info!(
                        actor = %collision.actor,
                        other = %collision.other,
                        x = collision.at.x,
                        y = collision.at.y,
                        "collision detected"
                    );
                }
            }
            collision
        })
    }

    /// Yielding pause between ticks
    pub fn pause(&self) {
        thread::sleep(self.tick_interval);
    }

    /// Record an engine error as the stop reason.
    ///
    /// A poisoned lock was caused by whichever loop panicked, not by the
    /// loop that noticed it.
    pub fn fault(&self, err: &EngineError) {
        warn!(actor = %self.id, error = %err, "control loop failed");
        let reason = match err {
            EngineError::LockPoisoned => StopReason::Poisoned,
            _ => StopReason::Fault { actor: self.id },
        };
        self.lifecycle.request_stop(reason);
    }

    /// Tick an autonomous actor until the session leaves Running.
    ///
    /// Returns the number of ticks this loop completed.
    pub fn run_autonomous(&self, policy: &mut dyn SteeringPolicy) -> Result<u64, EngineError> {
        let mut ticks = 0;

        while self.lifecycle.is_running() {
            if let Err(err) = self.tick(None, Some(&mut *policy)) {
                self.fault(&err);
                return Err(err);
            }
            ticks += 1;
            self.pause();
        }

        debug!(actor = %self.id, ticks, "autonomous loop exited");
        Ok(ticks)
    }

    /// Run [`ControlLoop::run_autonomous`] on a dedicated named thread
    pub fn spawn_autonomous(
        self,
        mut policy: Box<dyn SteeringPolicy>,
    ) -> Result<JoinHandle<Result<u64, EngineError>>, EngineError> {
        let name = format!("bot-{}", self.id.0);
        debug!(thread = %name, "spawning control thread");

        thread::Builder::new()
            .name(name)
            .spawn(move || self.run_autonomous(policy.as_mut()))
            .map_err(EngineError::Spawn)
    }
}
