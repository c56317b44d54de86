//! Step timing for generator invocations.

use std::time::{Duration, Instant};

/// Runs slower than this are reported, never aborted.
pub const DEFAULT_SLOW_STEP: Duration = Duration::from_secs(1);

/// Measures how long one generation step takes.
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    /// Time when the step started.
    start: Instant,
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::start()
    }
}

impl Stopwatch {
    /// Start timing now.
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Elapsed time as a Duration.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Elapsed time in milliseconds.
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed().as_secs_f64() * 1000.0
    }
}

/// Whether a step that took `elapsed` counts as abnormally slow.
pub fn is_slow(elapsed: Duration, threshold: Duration) -> bool {
    elapsed > threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stopwatch_is_monotonic() {
        let watch = Stopwatch::start();
        let first = watch.elapsed();
        let second = watch.elapsed();
        assert!(second >= first);
        assert!(watch.elapsed_ms() >= 0.0);
    }

    #[test]
    fn slow_threshold_is_exclusive() {
        assert!(!is_slow(Duration::from_millis(1000), DEFAULT_SLOW_STEP));
        assert!(is_slow(Duration::from_millis(1001), DEFAULT_SLOW_STEP));
    }
}
