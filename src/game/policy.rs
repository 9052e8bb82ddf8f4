//! Heading selection for autonomous actors.

use rand::{Rng, SeedableRng, rngs::StdRng};

use super::heading::Heading;

/// Chooses the next heading for an autonomous actor once per tick
pub trait SteeringPolicy: Send {
    fn choose(&mut self, current: Heading) -> Heading;
}

/// Picks uniformly among all four headings every tick.
///
/// The current heading is ignored, so an immediate reversal into the
/// actor's own trail is as likely as any other turn.
pub struct RandomPolicy {
    rng: StdRng,
}

impl RandomPolicy {
    /// Seeded for reproducible runs, or from OS entropy when `seed` is `None`
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }
}

impl SteeringPolicy for RandomPolicy {
    fn choose(&mut self, _current: Heading) -> Heading {
        Heading::ALL[self.rng.gen_range(0..Heading::ALL.len())]
    }
}

/// Always returns the same heading
#[derive(Debug, Clone, Copy)]
pub struct FixedPolicy {
    heading: Heading,
}

impl FixedPolicy {
    pub fn new(heading: Heading) -> Self {
        Self { heading }
    }
}

impl SteeringPolicy for FixedPolicy {
    fn choose(&mut self, _current: Heading) -> Heading {
        self.heading
    }
}
