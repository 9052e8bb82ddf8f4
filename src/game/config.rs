use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use super::heading::Heading;
use super::state::Position;
use crate::error::EngineError;

/// Configuration for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Pause between two ticks of one control loop, in milliseconds
    pub tick_ms: u64,
    /// Body segments behind the head; the trail holds one more cell
    pub initial_length: usize,
    /// Upper bound on any trail
    pub max_trail: usize,

    /// Player spawn cell
    pub player_start: (i32, i32),
    pub player_heading: Heading,

    /// One autonomous actor, and one control thread, per entry
    pub bot_starts: Vec<(i32, i32)>,
    pub bot_heading: Heading,

    /// Seed for the autonomous policy; entropy when unset
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tick_ms: 120,
            initial_length: 3,
            max_trail: 1000,
            player_start: (2, 2),
            player_heading: Heading::Right,
            bot_starts: vec![(10, 10)],
            bot_heading: Heading::Right,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Load from a TOML file. Missing keys fall back to defaults.
    pub fn load(path: &Path) -> Result<Self, EngineError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            EngineError::InvalidConfig(format!("cannot read {}: {e}", path.display()))
        })?;
        let config: GameConfig = toml::from_str(&text).map_err(|e| {
            EngineError::InvalidConfig(format!("cannot parse {}: {e}", path.display()))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.tick_ms == 0 {
            return Err(EngineError::InvalidConfig("tick_ms must be positive".into()));
        }
        if self.max_trail == 0 {
            return Err(EngineError::InvalidConfig("max_trail must be positive".into()));
        }
        if self.initial_length + 1 > self.max_trail {
            return Err(EngineError::InvalidConfig(format!(
                "initial_length {} does not fit in max_trail {}",
                self.initial_length, self.max_trail
            )));
        }
        if self.bot_starts.is_empty() {
            return Err(EngineError::InvalidConfig(
                "at least one bot start is required".into(),
            ));
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn player_start(&self) -> Position {
        self.player_start.into()
    }

    pub fn bot_starts(&self) -> impl Iterator<Item = Position> + '_ {
        self.bot_starts.iter().copied().map(Position::from)
    }
}
