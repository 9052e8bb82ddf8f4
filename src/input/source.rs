use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

use crate::error::EngineError;

/// Non-blocking key reads
pub trait KeySource {
    /// Next pending key press, or `None` when nothing is waiting
    fn poll_key(&mut self) -> Result<Option<KeyEvent>, EngineError>;
}

/// Reads key presses from the terminal through crossterm
#[derive(Debug, Default)]
pub struct TerminalKeys;

impl TerminalKeys {
    pub fn new() -> Self {
        Self
    }
}

impl KeySource for TerminalKeys {
    fn poll_key(&mut self) -> Result<Option<KeyEvent>, EngineError> {
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events, not release
                if key.kind == KeyEventKind::Press {
                    return Ok(Some(key));
                }
            }
        }
        Ok(None)
    }
}
