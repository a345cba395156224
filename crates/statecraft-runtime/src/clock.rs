//! Wall-clock play time with pause/resume.
//!
//! The clock measures how long the player has actually been playing;
//! simulated time advances separately, one day per scheduler tick.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Source of monotonic instants. Injectable so tests control time.
pub trait TimeSource: Send + Sync {
    fn now(&self) -> Instant;
}

/// The real monotonic clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A hand-advanced time source for tests.
#[derive(Clone)]
pub struct ManualTimeSource {
    now: Arc<Mutex<Instant>>,
}

impl ManualTimeSource {
    pub fn new() -> Self {
        Self {
            now: Arc::new(Mutex::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        if let Ok(mut now) = self.now.lock() {
            *now += by;
        }
    }
}

impl Default for ManualTimeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for ManualTimeSource {
    fn now(&self) -> Instant {
        self.now.lock().map(|now| *now).unwrap_or_else(|_| Instant::now())
    }
}

/// Accumulating play clock. Elapsed time only grows while running.
pub struct Clock {
    source: Arc<dyn TimeSource>,
    accumulated: Duration,
    running_since: Option<Instant>,
}

impl Clock {
    pub fn new(source: Arc<dyn TimeSource>) -> Self {
        Self {
            source,
            accumulated: Duration::ZERO,
            running_since: None,
        }
    }

    pub fn system() -> Self {
        Self::new(Arc::new(SystemTimeSource))
    }

    pub fn is_running(&self) -> bool {
        self.running_since.is_some()
    }

    /// Starts or resumes accumulation. Idempotent while running.
    pub fn resume(&mut self) {
        if self.running_since.is_none() {
            self.running_since = Some(self.source.now());
        }
    }

    /// Pauses accumulation. Idempotent while paused.
    pub fn pause(&mut self) {
        if let Some(since) = self.running_since.take() {
            self.accumulated += self.source.now() - since;
        }
    }

    /// Total running time so far, including the current stretch.
    pub fn elapsed(&self) -> Duration {
        let current = self
            .running_since
            .map_or(Duration::ZERO, |since| self.source.now() - since);
        self.accumulated + current
    }

    /// Elapsed play time as `HH:MM:SS`.
    pub fn format_elapsed(&self) -> String {
        let secs = self.elapsed().as_secs();
        format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pause_stops_accumulation() {
        let source = ManualTimeSource::new();
        let mut clock = Clock::new(Arc::new(source.clone()));
        clock.resume();
        source.advance(Duration::from_secs(5));
        clock.pause();
        source.advance(Duration::from_secs(60));
        assert_eq!(clock.elapsed(), Duration::from_secs(5));
        clock.resume();
        source.advance(Duration::from_secs(2));
        assert_eq!(clock.elapsed(), Duration::from_secs(7));
    }

    #[test]
    fn resume_is_idempotent() {
        let source = ManualTimeSource::new();
        let mut clock = Clock::new(Arc::new(source.clone()));
        clock.resume();
        source.advance(Duration::from_secs(3));
        clock.resume();
        assert_eq!(clock.elapsed(), Duration::from_secs(3));
        assert!(clock.is_running());
    }

    #[test]
    fn formats_as_hours_minutes_seconds() {
        let source = ManualTimeSource::new();
        let mut clock = Clock::new(Arc::new(source.clone()));
        assert_eq!(clock.format_elapsed(), "00:00:00");
        clock.resume();
        source.advance(Duration::from_secs(3 * 3600 + 25 * 60 + 7));
        assert_eq!(clock.format_elapsed(), "03:25:07");
    }
}
