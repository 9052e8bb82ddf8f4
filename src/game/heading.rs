use serde::{Deserialize, Serialize};

/// Direction an actor's head travels in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Heading {
    Left,
    Up,
    Right,
    Down,
}

impl Heading {
    /// Every heading, in the order the autonomous policy samples from
    pub const ALL: [Heading; 4] = [Heading::Left, Heading::Up, Heading::Right, Heading::Down];

    /// Returns the delta (dx, dy) for moving in this heading
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Heading::Left => (-1, 0),
            Heading::Up => (0, -1),
            Heading::Right => (1, 0),
            Heading::Down => (0, 1),
        }
    }
}
