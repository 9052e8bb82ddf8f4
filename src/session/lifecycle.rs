//! Shared run/stop signal for every control loop.

use std::sync::{
    Arc, OnceLock,
    atomic::{AtomicU8, Ordering},
};

use crate::game::{ActorId, Collision};

/// Lifecycle phase. Only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Phase {
    Running = 0,
    Stopping = 1,
    Stopped = 2,
}

impl Phase {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => Phase::Running,
            1 => Phase::Stopping,
            _ => Phase::Stopped,
        }
    }
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The quit key was pressed
    Quit,
    /// A head landed on another actor's trail
    Collision(Collision),
    /// A control loop hit an engine error
    Fault { actor: ActorId },
    /// A tick panicked while holding the world lock. The panicking loop
    /// cannot report itself, so no actor is named.
    Poisoned,
}

#[derive(Debug)]
struct Inner {
    phase: AtomicU8,
    reason: OnceLock<StopReason>,
}

/// Tri-state flag observed at the top of every tick, without the world lock.
///
/// Cloning shares the same flag.
#[derive(Debug, Clone)]
pub struct Lifecycle {
    inner: Arc<Inner>,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                phase: AtomicU8::new(Phase::Running as u8),
                reason: OnceLock::new(),
            }),
        }
    }

    pub fn phase(&self) -> Phase {
        Phase::from_u8(self.inner.phase.load(Ordering::Acquire))
    }

    pub fn is_running(&self) -> bool {
        self.phase() == Phase::Running
    }

    /// Move from Running to Stopping.
    ///
    /// Returns `true` only for the call that made the transition; its reason
    /// is the one kept. Later calls change nothing.
    pub fn request_stop(&self, reason: StopReason) -> bool {
        let won = self
            .inner
            .phase
            .compare_exchange(
                Phase::Running as u8,
                Phase::Stopping as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok();

        if won {
            let _ = self.inner.reason.set(reason);
        }
        won
    }

    /// Final transition, once every control thread has been joined
    pub fn mark_stopped(&self) {
        self.inner.phase.store(Phase::Stopped as u8, Ordering::Release);
    }

    /// Reason recorded by the winning `request_stop`
    pub fn reason(&self) -> Option<StopReason> {
        self.inner.reason.get().copied()
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_starts_running() {
        let lifecycle = Lifecycle::new();
        assert_eq!(lifecycle.phase(), Phase::Running);
        assert!(lifecycle.is_running());
        assert_eq!(lifecycle.reason(), None);
    }

    #[test]
    fn test_request_stop_is_idempotent() {
        let lifecycle = Lifecycle::new();

        assert!(lifecycle.request_stop(StopReason::Quit));
        assert!(!lifecycle.request_stop(StopReason::Fault { actor: ActorId(1) }));
        assert!(!lifecycle.request_stop(StopReason::Quit));

        assert_eq!(lifecycle.phase(), Phase::Stopping);
        assert_eq!(lifecycle.reason(), Some(StopReason::Quit));
    }

    #[test]
    fn test_mark_stopped() {
        let lifecycle = Lifecycle::new();
        lifecycle.request_stop(StopReason::Quit);
        lifecycle.mark_stopped();

        assert_eq!(lifecycle.phase(), Phase::Stopped);
        assert!(!lifecycle.request_stop(StopReason::Quit));
        assert_eq!(lifecycle.phase(), Phase::Stopped);
    }

    #[test]
    fn test_clones_share_state() {
        let lifecycle = Lifecycle::new();
        let other = lifecycle.clone();

        other.request_stop(StopReason::Quit);
        assert!(!lifecycle.is_running());
    }

    #[test]
    fn test_exactly_one_winner_across_threads() {
        let lifecycle = Lifecycle::new();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let lifecycle = lifecycle.clone();
                thread::spawn(move || lifecycle.request_stop(StopReason::Fault { actor: ActorId(i) }))
            })
            .collect();

        let winners = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|won| *won)
            .count();

        assert_eq!(winners, 1);
        assert!(matches!(lifecycle.reason(), Some(StopReason::Fault { .. })));
    }
}
