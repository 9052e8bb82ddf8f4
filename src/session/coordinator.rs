//! Session coordinator: owns the world lock and the lifecycle flag, runs the
//! player loop on the calling thread and one control thread per bot, and
//! joins everything before reporting.

use std::thread::JoinHandle;
use std::time::Duration;

use tracing::{debug, error, info};

use super::control::ControlLoop;
use super::lifecycle::{Lifecycle, StopReason};
use super::shared::SharedWorld;
use crate::error::EngineError;
use crate::game::{
    ActorId, ActorReport, Bounds, Canvas, GameConfig, RandomPolicy, SteeringPolicy, WorldState,
};
use crate::input::{InputHandler, KeyAction, KeySource};
use crate::metrics::SessionMetrics;
use crate::render::Screen;

/// What a finished session reports
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub reason: Option<StopReason>,
    pub actors: Vec<ActorReport>,
    /// Ticks completed by every loop together
    pub ticks: u64,
    pub elapsed: Duration,
}

impl SessionSummary {
    pub fn player_len(&self) -> Option<usize> {
        self.actors
            .iter()
            .find(|a| a.id == ActorId::PLAYER)
            .map(|a| a.trail_len)
    }
}

type ControlHandle = (ActorId, JoinHandle<Result<u64, EngineError>>);

pub struct Session {
    config: GameConfig,
    world: SharedWorld,
    lifecycle: Lifecycle,
    policies: Vec<(ActorId, Box<dyn SteeringPolicy>)>,
    input_handler: InputHandler,
}

impl Session {
    /// Build the world for `bounds`. Each bot gets a [`RandomPolicy`],
    /// seeded per bot when the config carries a seed.
    pub fn new(config: GameConfig, bounds: Bounds) -> Result<Self, EngineError> {
        config.validate()?;

        let state = WorldState::new(&config, bounds);
        let policies = state
            .bot_ids()
            .into_iter()
            .map(|id| {
                let seed = config.seed.map(|seed| seed.wrapping_add(id.0 as u64));
                (id, Box::new(RandomPolicy::new(seed)) as Box<dyn SteeringPolicy>)
            })
            .collect();

        Ok(Self {
            config,
            world: SharedWorld::new(state),
            lifecycle: Lifecycle::new(),
            policies,
            input_handler: InputHandler::new(),
        })
    }

    /// Replace the steering policy of one bot
    pub fn with_policy(mut self, id: ActorId, policy: Box<dyn SteeringPolicy>) -> Self {
        if let Some(slot) = self.policies.iter_mut().find(|(bot, _)| *bot == id) {
            slot.1 = policy;
        }
        self
    }

    pub fn world(&self) -> &SharedWorld {
        &self.world
    }

    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    /// Play until quit or collision, then shut down and report.
    ///
    /// Blocks the calling thread, which drives the player.
    pub fn run<S, K>(self, screen: &mut S, keys: &mut K) -> Result<SessionSummary, EngineError>
    where
        S: Screen + ?Sized,
        K: KeySource + ?Sized,
    {
        let Session {
            config,
            world,
            lifecycle,
            policies,
            input_handler,
        } = self;
        let tick_interval = config.tick_interval();
        let bounds = world.with_exclusive(|w| w.bounds())?;

        info!(
            width = bounds.width,
            height = bounds.height,
            bots = policies.len(),
            tick_ms = config.tick_ms,
            "session starting"
        );

        let mut handles: Vec<ControlHandle> = Vec::with_capacity(policies.len());
        for (id, policy) in policies {
            let control = ControlLoop::new(id, world.clone(), lifecycle.clone(), tick_interval);
            match control.spawn_autonomous(policy) {
                Ok(handle) => handles.push((id, handle)),
                Err(err) => {
                    lifecycle.request_stop(StopReason::Fault { actor: id });
                    if let Err(join_err) = join_all(handles) {
                        error!(error = %join_err, "control thread failed while aborting startup");
                    }
                    lifecycle.mark_stopped();
                    return Err(err);
                }
            }
        }

        let player = ControlLoop::new(ActorId::PLAYER, world.clone(), lifecycle.clone(), tick_interval);
        let mut metrics = SessionMetrics::new();
        let played = drive_player(&player, &input_handler, screen, keys, &mut metrics);
        if let Err(err) = &played {
            player.fault(err);
        }

        // Normal endings already left Running; this only matters if the
        // player loop bailed out early.
        lifecycle.request_stop(StopReason::Quit);
        let joined = join_all(handles);
        lifecycle.mark_stopped();
        played?;
        joined?;

        metrics.update();
        let (actors, ticks) = world.with_exclusive(|w| (w.reports(), w.ticks()))?;
        let summary = SessionSummary {
            reason: lifecycle.reason(),
            actors,
            ticks,
            elapsed: metrics.elapsed_time,
        };

        for report in &summary.actors {
            info!(actor = %report.id, kind = ?report.kind, length = report.trail_len, "final length");
        }
        info!(reason = ?summary.reason, ticks = summary.ticks, "session over");

        screen.show_summary(&summary)?;
        Ok(summary)
    }
}

/// Player tick loop: poll one key outside the lock, tick under it, present
/// the surface, pause.
///
/// The iteration that reads the quit key still completes its tick; the loop
/// exits at the next top-of-loop check.
fn drive_player<S, K>(
    player: &ControlLoop,
    input_handler: &InputHandler,
    screen: &mut S,
    keys: &mut K,
    metrics: &mut SessionMetrics,
) -> Result<(), EngineError>
where
    S: Screen + ?Sized,
    K: KeySource + ?Sized,
{
    let lifecycle = player.lifecycle();

    while lifecycle.is_running() {
        let mut steer = None;
        if let Some(key) = keys.poll_key()? {
            match input_handler.handle_key_event(key) {
                KeyAction::Steer(heading) => steer = Some(heading),
                KeyAction::Quit => {
                    if lifecycle.request_stop(StopReason::Quit) {
                        info!("quit requested");
                    }
                }
                KeyAction::None => {}
            }
        }

        player.tick(steer, None)?;
        let canvas: Canvas = player.world().with_exclusive(|w| w.canvas().clone())?;
        metrics.on_player_tick();
        screen.present(&canvas, metrics)?;

        player.pause();
    }

    debug!(ticks = metrics.player_ticks, "player loop exited");
    Ok(())
}

fn join_all(handles: Vec<ControlHandle>) -> Result<(), EngineError> {
    let mut first_err = None;

    for (id, handle) in handles {
        match handle.join() {
            Ok(Ok(ticks)) => debug!(actor = %id, ticks, "control thread joined"),
            Ok(Err(err)) => {
                error!(actor = %id, error = %err, "control thread failed");
                first_err.get_or_insert(err);
            }
            Err(_) => {
                error!(actor = %id, "control thread panicked");
                first_err.get_or_insert(EngineError::ControlThreadPanicked { actor: id });
            }
        }
    }

    first_err.map_or(Ok(()), Err)
}
