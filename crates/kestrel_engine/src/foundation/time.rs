//! Time management utilities

use std::time::Instant;

/// High-precision timer for frame timing
///
/// `Input::mouse_delta` reports per-frame displacement, not velocity; callers
/// that want velocity scale by `delta_time` from this timer.
pub struct Timer {
    last_frame: Instant,
    delta_time: f32,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a new timer
    #[must_use]
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            delta_time: 0.0,
        }
    }

    /// Update the timer (should be called once per frame)
    pub fn update(&mut self) {
        let now = Instant::now();
        self.delta_time = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
    }

    /// Get the time since the last frame in seconds
    #[must_use]
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_timer_starts_at_zero() {
        let timer = Timer::new();
        assert_eq!(timer.delta_time(), 0.0);
    }

    #[test]
    fn test_timer_measures_frame_gap() {
        let mut timer = Timer::new();
        thread::sleep(Duration::from_millis(5));
        timer.update();
        // sleep guarantees at least the requested duration elapsed
        assert!(timer.delta_time() >= 0.005);
    }
}
