use std::fmt;

use super::{
    config::GameConfig,
    heading::Heading,
    policy::SteeringPolicy,
    state::{Actor, ActorKind, Position},
    surface::{Bounds, Canvas, Surface},
};

/// Index of an actor in the world. The player is always `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActorId(pub usize);

impl ActorId {
    pub const PLAYER: ActorId = ActorId(0);
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A head landing on another actor's trail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collision {
    /// Actor whose head moved into the trail
    pub actor: ActorId,
    /// Actor owning the trail
    pub other: ActorId,
    pub at: Position,
}

/// Final trail length of one actor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActorReport {
    pub id: ActorId,
    pub kind: ActorKind,
    pub trail_len: usize,
}

/// Everything the control loops share: the surface and every actor.
///
/// Not synchronized itself; see `session::SharedWorld` for the exclusive
/// access wrapper.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldState {
    canvas: Canvas,
    actors: Vec<Actor>,
    ticks: u64,
}

impl WorldState {
    /// Place the player and one bot per configured start on the surface
    pub fn new(config: &GameConfig, bounds: Bounds) -> Self {
        let player = Actor::new(
            ActorKind::Player,
            config.player_start(),
            config.player_heading,
            config.initial_length,
            config.max_trail,
        );
        let bots = config.bot_starts().map(|start| {
            Actor::new(
                ActorKind::Bot,
                start,
                config.bot_heading,
                config.initial_length,
                config.max_trail,
            )
        });

        Self::from_actors(bounds, std::iter::once(player).chain(bots).collect())
    }

    /// Build a world from prepared actors; the first one is the player
    pub fn from_actors(bounds: Bounds, actors: Vec<Actor>) -> Self {
        let mut canvas = Canvas::new(bounds);
        for actor in &actors {
            canvas.draw_glyph(actor.head(), actor.kind().head_glyph());
        }

        Self {
            canvas,
            actors,
            ticks: 0,
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.canvas.bounds()
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.get(id.0)
    }

    /// Ids of every autonomous actor
    pub fn bot_ids(&self) -> Vec<ActorId> {
        self.actors
            .iter()
            .enumerate()
            .filter(|(_, actor)| actor.is_autonomous())
            .map(|(i, _)| ActorId(i))
            .collect()
    }

    /// Ticks completed across all actors
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn steer(&mut self, id: ActorId, heading: Heading) {
        if let Some(actor) = self.actors.get_mut(id.0) {
            actor.set_heading(heading);
        }
    }

    /// Run one tick for one actor: policy (bots only), move, trail advance,
    /// then test the new head against every other actor's trail.
    pub fn tick_actor(
        &mut self,
        id: ActorId,
        policy: Option<&mut dyn SteeringPolicy>,
    ) -> Option<Collision> {
        let canvas = &mut self.canvas;
        let actor = self.actors.get_mut(id.0)?;

        if let Some(policy) = policy {
            actor.steer_with(policy);
        }
        actor.step(&mut *canvas);
        actor.advance_trail(&mut *canvas);
        self.ticks += 1;

        self.collision_for(id)
    }

    /// First other actor whose trail contains `id`'s head
    pub fn collision_for(&self, id: ActorId) -> Option<Collision> {
        let actor = self.actor(id)?;

        self.actors
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != id.0)
            .find(|(_, other)| actor.overlaps_trail_of(other))
            .map(|(i, _)| Collision {
                actor: id,
                other: ActorId(i),
                at: actor.head(),
            })
    }

    pub fn reports(&self) -> Vec<ActorReport> {
        self.actors
            .iter()
            .enumerate()
            .map(|(i, actor)| ActorReport {
                id: ActorId(i),
                kind: actor.kind(),
                trail_len: actor.trail_len(),
            })
            .collect()
    }
}
