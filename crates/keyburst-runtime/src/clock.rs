//! Frame clock

use std::time::Instant;

/// Longest frame step handed to the simulation, in seconds
pub const MAX_DELTA: f64 = 0.25;

/// Tracks elapsed time and the delta between rendered frames
pub struct GameClock {
    /// Total elapsed time in seconds
    pub total_time: f64,
    /// Time since last frame in seconds
    pub delta_time: f64,
    /// Frame count since the first tick
    pub frame: u64,
    last_instant: Option<Instant>,
}

impl Default for GameClock {
    fn default() -> Self {
        Self {
            total_time: 0.0,
            delta_time: 0.0,
            frame: 0,
            last_instant: None,
        }
    }
}

impl GameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock. Call once per frame.
    pub fn tick(&mut self) -> f64 {
        self.tick_at(Instant::now())
    }

    /// Advance the clock to `now`, returning the clamped delta
    pub fn tick_at(&mut self, now: Instant) -> f64 {
        let Some(last) = self.last_instant.replace(now) else {
            self.delta_time = 0.0;
            return 0.0;
        };

        // A stalled window (drag, breakpoint) should not fling particles in one step
        let elapsed = now.saturating_duration_since(last).as_secs_f64();
        self.delta_time = elapsed.min(MAX_DELTA);
        self.total_time += self.delta_time;
        self.frame += 1;
        self.delta_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_clock_defaults() {
        let clock = GameClock::new();
        assert_eq!(clock.total_time, 0.0);
        assert_eq!(clock.delta_time, 0.0);
        assert_eq!(clock.frame, 0);
    }

    #[test]
    fn test_first_tick_zero_delta() {
        let mut clock = GameClock::new();
        assert_eq!(clock.tick(), 0.0);
        assert_eq!(clock.frame, 0);
    }

    #[test]
    fn test_delta_between_ticks() {
        let mut clock = GameClock::new();
        let start = Instant::now();
        clock.tick_at(start);
        let dt = clock.tick_at(start + Duration::from_millis(16));
        assert!((dt - 0.016).abs() < 1e-9);
        clock.tick_at(start + Duration::from_millis(32));
        assert!((clock.total_time - 0.032).abs() < 1e-9);
        assert_eq!(clock.frame, 2);
    }

    #[test]
    fn test_stall_is_clamped() {
        let mut clock = GameClock::new();
        let start = Instant::now();
        clock.tick_at(start);
        let dt = clock.tick_at(start + Duration::from_secs(3));
        assert_eq!(dt, MAX_DELTA);
    }

    #[test]
    fn test_backwards_instant_gives_zero() {
        let mut clock = GameClock::new();
        let start = Instant::now() + Duration::from_secs(1);
        clock.tick_at(start);
        assert_eq!(clock.tick_at(start - Duration::from_millis(500)), 0.0);
    }
}
