use anyhow::{Context, Result};
use crossterm::{
    event, execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tracing::warn;

use super::{Renderer, Screen};
use crate::error::EngineError;
use crate::game::{Bounds, Canvas};
use crate::metrics::SessionMetrics;
use crate::session::SessionSummary;

/// How long the game-over screen waits for a key before tearing down
const SUMMARY_LINGER: Duration = Duration::from_secs(2);

/// Raw-mode alternate screen on stderr.
///
/// The terminal is restored by [`TerminalScreen::restore`] or, failing
/// that, on drop.
pub struct TerminalScreen {
    terminal: Terminal<CrosstermBackend<Stderr>>,
    renderer: Renderer,
    bounds: Bounds,
    active: bool,
}

impl TerminalScreen {
    /// Take over the terminal and size the surface to it
    pub fn enter() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        if let Err(err) = execute!(stderr, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(err).context("Failed to enter alternate screen");
        }

        let backend = CrosstermBackend::new(stderr);
        let terminal = match Terminal::new(backend) {
            Ok(terminal) => terminal,
            Err(err) => {
                let _ = execute!(std::io::stderr(), LeaveAlternateScreen);
                let _ = disable_raw_mode();
                return Err(err).context("Failed to create terminal");
            }
        };

        // From here on, drop restores the terminal
        let mut screen = Self {
            terminal,
            renderer: Renderer::new(),
            bounds: Bounds::new(0, 0),
            active: true,
        };
        screen.terminal.hide_cursor().context("Failed to hide cursor")?;
        screen.terminal.clear().context("Failed to clear terminal")?;

        let size = screen.terminal.size().context("Failed to query terminal size")?;
        screen.bounds = Renderer::surface_bounds(Rect::new(0, 0, size.width, size.height))?;

        Ok(screen)
    }

    /// Leave the alternate screen and raw mode. Safe to call twice.
    pub fn restore(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        self.terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

impl Screen for TerminalScreen {
    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn present(&mut self, canvas: &Canvas, metrics: &SessionMetrics) -> Result<(), EngineError> {
        self.terminal
            .draw(|frame| self.renderer.render(frame, canvas, metrics))?;
        Ok(())
    }

    fn show_summary(&mut self, summary: &SessionSummary) -> Result<(), EngineError> {
        self.terminal
            .draw(|frame| self.renderer.render_game_over(frame, summary))?;

        if event::poll(SUMMARY_LINGER)? {
            let _ = event::read()?;
        }
        Ok(())
    }
}

impl Drop for TerminalScreen {
    fn drop(&mut self) {
        if let Err(err) = self.restore() {
            warn!(error = %err, "failed to restore terminal");
        }
    }
}
