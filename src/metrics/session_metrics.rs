use std::time::{Duration, Instant};

/// Wall-clock and tick counters for the running session
pub struct SessionMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub player_ticks: u64,
}

impl SessionMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            player_ticks: 0,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    pub fn on_player_tick(&mut self) {
        self.player_ticks += 1;
        self.update();
    }

    pub fn format_time(&self) -> String {
        format_duration(self.elapsed_time)
    }
}

impl Default for SessionMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// `MM:SS`, minutes unbounded
pub fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    let minutes = total_secs / 60;
    let seconds = total_secs % 60;
    format!("{:02}:{:02}", minutes, seconds)
}
