//! Presenting the surface on a terminal

pub mod renderer;
pub mod terminal;

pub use renderer::{MIN_SURFACE_HEIGHT, MIN_SURFACE_WIDTH, Renderer, stop_reason_text};
pub use terminal::TerminalScreen;

use crate::error::EngineError;
use crate::game::{Bounds, Canvas};
use crate::metrics::SessionMetrics;
use crate::session::SessionSummary;

/// Display collaborator consumed by the session
pub trait Screen {
    /// Surface size, fixed once the display is set up
    fn bounds(&self) -> Bounds;

    /// Show the surface after a player tick
    fn present(&mut self, canvas: &Canvas, metrics: &SessionMetrics) -> Result<(), EngineError>;

    /// Show the final report before the display is released
    fn show_summary(&mut self, summary: &SessionSummary) -> Result<(), EngineError>;
}
