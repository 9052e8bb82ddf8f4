use std::sync::{Arc, Mutex};

use crate::error::EngineError;
use crate::game::WorldState;

/// The world state behind the single exclusion primitive.
///
/// All reads and writes go through [`SharedWorld::with_exclusive`]; the lock
/// is released when the closure returns, on every path.
#[derive(Debug, Clone)]
pub struct SharedWorld {
    inner: Arc<Mutex<WorldState>>,
}

impl SharedWorld {
    pub fn new(state: WorldState) -> Self {
        Self {
            inner: Arc::new(Mutex::new(state)),
        }
    }

    /// Run `f` with exclusive access to the world
    pub fn with_exclusive<R>(&self, f: impl FnOnce(&mut WorldState) -> R) -> Result<R, EngineError> {
        let mut guard = self.inner.lock().map_err(|_| EngineError::LockPoisoned)?;
        Ok(f(&mut guard))
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> Result<WorldState, EngineError> {
        self.with_exclusive(|world| world.clone())
    }
}
