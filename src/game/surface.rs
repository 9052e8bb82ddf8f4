//! The drawing surface shared by every actor.
//!
//! Actors never talk to the terminal directly. They draw into a [`Canvas`],
//! which lives inside the shared world and is presented by the renderer
//! after a tick completes.

use super::state::Position;

/// Width and height of the playable surface, fixed for a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Check if a position lies within `[0, width) x [0, height)`
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    /// Number of cells on the surface
    pub fn area(&self) -> usize {
        (self.width.max(0) as usize) * (self.height.max(0) as usize)
    }
}

/// Symbol occupying a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Glyph {
    PlayerHead,
    BotHead,
    Body,
}

impl Glyph {
    pub fn symbol(&self) -> char {
        match self {
            Glyph::PlayerHead => '@',
            Glyph::BotHead => 'B',
            Glyph::Body => '*',
        }
    }
}

/// Draw/erase primitive over a bounded grid.
///
/// Both operations are idempotent. Coordinates outside the bounds are
/// ignored rather than reported, so callers never need an error path.
pub trait Surface {
    fn bounds(&self) -> Bounds;
    fn draw_glyph(&mut self, pos: Position, glyph: Glyph);
    fn clear_cell(&mut self, pos: Position);
}

/// In-memory surface backing the terminal display
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    bounds: Bounds,
    cells: Vec<Option<Glyph>>,
}

impl Canvas {
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            cells: vec![None; bounds.area()],
        }
    }

    /// Glyph at a position, `None` for empty or out-of-bounds cells
    pub fn glyph_at(&self, pos: Position) -> Option<Glyph> {
        self.index_of(pos).and_then(|i| self.cells[i])
    }

    /// One row of cells, left to right
    pub fn row(&self, y: i32) -> &[Option<Glyph>] {
        if y < 0 || y >= self.bounds.height {
            return &[];
        }
        let width = self.bounds.width as usize;
        let start = y as usize * width;
        &self.cells[start..start + width]
    }

    /// Number of cells currently holding a glyph
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    fn index_of(&self, pos: Position) -> Option<usize> {
        self.bounds
            .contains(pos)
            .then(|| pos.y as usize * self.bounds.width as usize + pos.x as usize)
    }
}

impl Surface for Canvas {
    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn draw_glyph(&mut self, pos: Position, glyph: Glyph) {
        if let Some(i) = self.index_of(pos) {
            self.cells[i] = Some(glyph);
        }
    }

    fn clear_cell(&mut self, pos: Position) {
        if let Some(i) = self.index_of(pos) {
            self.cells[i] = None;
        }
    }
}
