//! Progress reporting and end-of-track detection
//!
//! Polling stand-in for a completion callback: the engine feeds frame deltas
//! in and asks whether a report is due or the clip is close enough to its end.
//! Detection is approximate, accurate to one frame plus the threshold.

use std::time::Duration;

/// Countdown timer for progress notifications
#[derive(Debug, Clone)]
pub struct ProgressTracker {
    interval: Duration,
    threshold: Duration,
    timer: Duration,
}

impl ProgressTracker {
    /// Create a tracker that reports every `interval` and treats the last
    /// `threshold` of a clip as finished
    pub fn new(interval: Duration, threshold: Duration) -> Self {
        Self {
            interval,
            threshold,
            timer: Duration::ZERO,
        }
    }

    /// Make the next `advance` report immediately
    pub fn reset(&mut self) {
        self.timer = Duration::ZERO;
    }

    /// Count down by `delta`
    ///
    /// Returns true when the timer lapsed; it is then re-armed with the interval.
    pub fn advance(&mut self, delta: Duration) -> bool {
        self.timer = self.timer.saturating_sub(delta);
        if self.timer.is_zero() {
            self.timer = self.interval;
            true
        } else {
            false
        }
    }

    /// Normalized position, 0 for a zero-length clip
    pub fn fraction(elapsed: Duration, duration: Duration) -> f32 {
        if duration.is_zero() {
            return 0.0;
        }
        (elapsed.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0) as f32
    }

    /// True once `elapsed` is within the threshold of `duration`
    pub fn near_end(&self, elapsed: Duration, duration: Duration) -> bool {
        elapsed >= duration.saturating_sub(self.threshold)
    }
}
