use crate::config::DelayRange;
use rand::Rng;
use std::time::Duration;

/// Width of the line written between chapters
pub const SEPARATOR_WIDTH: usize = 50;

/// The line written after every chapter
pub fn separator_line() -> String {
    "=".repeat(SEPARATOR_WIDTH)
}

/// Draw a pause uniformly from the delay range
pub fn sample_delay(range: &DelayRange) -> Duration {
    if range.max_ms <= range.min_ms {
        return Duration::from_millis(range.min_ms);
    }
    let ms = rand::rng().random_range(range.min_ms..=range.max_ms);
    Duration::from_millis(ms)
}
