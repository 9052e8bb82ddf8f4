use super::heading::Heading;
use super::policy::SteeringPolicy;
use super::surface::{Bounds, Glyph, Surface};
use crate::game::collision::head_collides;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move one cell in a heading, re-entering from the opposite edge when
    /// the move would leave the surface.
    ///
    /// Only the axis being travelled along is wrapped.
    pub fn wrapped_step(&self, heading: Heading, bounds: Bounds) -> Self {
        let (dx, dy) = heading.delta();
        Self::new(
            wrap_axis(self.x, dx, bounds.width),
            wrap_axis(self.y, dy, bounds.height),
        )
    }
}

/// Apply a unit delta on one axis of length `len`
fn wrap_axis(value: i32, delta: i32, len: i32) -> i32 {
    let max = len - 1;
    match delta {
        0 => value,
        d if d < 0 => {
            if value <= 0 {
                max
            } else {
                value - 1
            }
        }
        _ => {
            if value >= max {
                0
            } else {
                value + 1
            }
        }
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Who decides an actor's heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActorKind {
    /// Steered by keyboard input on the main thread
    Player,
    /// Steered by a [`SteeringPolicy`] on its own control thread
    Bot,
}

impl ActorKind {
    pub fn head_glyph(&self) -> Glyph {
        match self {
            ActorKind::Player => Glyph::PlayerHead,
            ActorKind::Bot => Glyph::BotHead,
        }
    }
}

/// An actor on the surface: a head plus a fixed-length trail following it
#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    kind: ActorKind,
    position: Position,
    heading: Heading,
    /// Most recent first. Always exactly `trail_len` entries.
    trail: Vec<Position>,
}

impl Actor {
    /// Create an actor whose trail is coiled up on its starting cell.
    ///
    /// The trail holds `initial_length + 1` cells, capped at `max_trail`.
    pub fn new(
        kind: ActorKind,
        start: Position,
        heading: Heading,
        initial_length: usize,
        max_trail: usize,
    ) -> Self {
        let max_trail = max_trail.max(1);
        let trail_len = (initial_length + 1).min(max_trail);
        let mut trail = Vec::with_capacity(max_trail);
        trail.resize(trail_len, start);

        Self {
            kind,
            position: start,
            heading,
            trail,
        }
    }

    pub fn kind(&self) -> ActorKind {
        self.kind
    }

    pub fn is_autonomous(&self) -> bool {
        self.kind == ActorKind::Bot
    }

    /// Current head position
    pub fn head(&self) -> Position {
        self.position
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    /// Occupied trail cells, most recent first
    pub fn trail(&self) -> &[Position] {
        &self.trail
    }

    pub fn trail_len(&self) -> usize {
        self.trail.len()
    }

    pub fn set_heading(&mut self, heading: Heading) {
        self.heading = heading;
    }

    /// Let the policy pick a new heading. Player actors ignore the policy.
    pub fn steer_with(&mut self, policy: &mut dyn SteeringPolicy) {
        if self.is_autonomous() {
            self.heading = policy.choose(self.heading);
        }
    }

    /// Move the head one cell, wrapping at the surface edges
    pub fn step(&mut self, surface: &mut dyn Surface) {
        let bounds = surface.bounds();

        surface.clear_cell(self.position);
        self.position = self.position.wrapped_step(self.heading, bounds);
        surface.draw_glyph(self.position, self.kind.head_glyph());
    }

    /// Shift every trail cell one slot toward the tail and record the head
    /// in slot 0.
    ///
    /// The cell falling off the end is erased and the shifted cells are
    /// drawn as body.
    pub fn advance_trail(&mut self, surface: &mut dyn Surface) {
        if let Some(last) = self.trail.last() {
            surface.clear_cell(*last);
        }

        self.trail.rotate_right(1);
        self.trail[0] = self.position;

        for cell in &self.trail[1..] {
            surface.draw_glyph(*cell, Glyph::Body);
        }
        surface.draw_glyph(self.position, self.kind.head_glyph());
    }

    /// Check if this actor's head sits on any cell of `other`'s trail
    pub fn overlaps_trail_of(&self, other: &Actor) -> bool {
        head_collides(self.position, other.trail())
    }
}
