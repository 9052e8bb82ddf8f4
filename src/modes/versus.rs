use anyhow::{Context, Result};
use tracing::info;

use crate::game::GameConfig;
use crate::input::TerminalKeys;
use crate::render::{Screen, TerminalScreen};
use crate::session::{Session, SessionSummary};

/// Player against the bots on the real terminal
pub struct VersusMode {
    config: GameConfig,
}

impl VersusMode {
    pub fn new(config: GameConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Set up the terminal, play one session and restore the terminal.
    ///
    /// A display that cannot be set up aborts before any control thread
    /// starts.
    pub fn run(&self) -> Result<SessionSummary> {
        self.config.validate().context("Invalid configuration")?;

        let mut screen = TerminalScreen::enter()?;
        let bounds = screen.bounds();
        info!(width = bounds.width, height = bounds.height, "terminal ready");

        let session = Session::new(self.config.clone(), bounds)?;
        let result = session.run(&mut screen, &mut TerminalKeys::new());

        // Cleanup terminal
        screen.restore()?;

        Ok(result?)
    }
}
