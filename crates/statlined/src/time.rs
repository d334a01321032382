//! Time report source: timezone, serving-session duration, wall clock.

use std::time::{Duration, Instant};

use chrono::Local;

use crate::broadcast::ReportSource;

/// Source behind the time server (default port 8080).
///
/// Reports the local timezone and how long this server has been up. The
/// duration changes every second, so in practice a report goes out on
/// every tick.
pub struct TimeSource {
    started: Instant,
}

impl TimeSource {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }
}

impl Default for TimeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportSource for TimeSource {
    fn name(&self) -> &'static str {
        "time"
    }

    fn labels(&self) -> [&'static str; 2] {
        ["Current Timezone", "Session Duration"]
    }

    fn sample(&mut self) -> [String; 2] {
        [
            Local::now().format("%Z").to_string(),
            format_duration(self.started.elapsed()),
        ]
    }
}

/// Formats a duration as `Hh Mm Ss`, hours uncapped.
fn format_duration(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    format!("{hours}h {minutes}m {seconds}s")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_secs(0)), "0h 0m 0s");
        assert_eq!(format_duration(Duration::from_secs(65)), "0h 1m 5s");
        assert_eq!(format_duration(Duration::from_secs(3661)), "1h 1m 1s");
        // Hours keep counting past a day.
        assert_eq!(format_duration(Duration::from_secs(90_000)), "25h 0m 0s");
    }

    #[test]
    fn test_sample_shape() {
        let mut source = TimeSource::new();
        let [timezone, duration] = source.sample();

        assert!(!timezone.is_empty());
        assert!(duration.ends_with('s'));
    }

    #[test]
    fn test_duration_advances_between_samples() {
        let mut source = TimeSource {
            started: Instant::now() - Duration::from_secs(120),
        };
        let [_, duration] = source.sample();
        assert_eq!(duration, "0h 2m 0s");
    }
}
