pub mod session_metrics;

pub use session_metrics::{SessionMetrics, format_duration};
