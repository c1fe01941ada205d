use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Seconds since the previous tick, clamped.
    pub dt: f32,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Milliseconds between clock creation and this tick. Unclamped, never decreases.
    pub elapsed_ms: f64,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Produces `FrameTime` snapshots.
///
/// `dt` is clamped so a debugger pause or a minimised window does not hand a
/// huge step to downstream code. `elapsed_ms` is not clamped.
#[derive(Debug, Clone)]
pub struct FrameClock {
    origin: Instant,
    last: Instant,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    /// Clock with default clamps (0.1 ms .. 250 ms).
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(100), Duration::from_millis(250))
    }

    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        let now = Instant::now();
        Self {
            origin: now,
            last: now,
            frame_index: 0,
            dt_min,
            dt_max,
        }
    }

    /// Resets the `dt` baseline, e.g. after the surface was reconfigured.
    ///
    /// `elapsed_ms` keeps counting from the clock origin.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    /// Advances the clock.
    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max);

        self.last = now;

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            now,
            elapsed_ms: now.saturating_duration_since(self.origin).as_secs_f64() * 1_000.0,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_index_counts_up() {
        let mut c = FrameClock::new();
        assert_eq!(c.tick().frame_index, 0);
        assert_eq!(c.tick().frame_index, 1);
        assert_eq!(c.tick().frame_index, 2);
    }

    #[test]
    fn dt_is_clamped() {
        let mut c = FrameClock::new();
        let start = c.origin;

        let ft = c.tick_at(start);
        assert!((ft.dt - 0.0001).abs() < 1e-6);

        let ft = c.tick_at(start + Duration::from_secs(5));
        assert!((ft.dt - 0.25).abs() < 1e-6);
    }

    #[test]
    fn elapsed_is_unclamped_and_monotonic() {
        let mut c = FrameClock::new();
        let start = c.origin;

        let a = c.tick_at(start + Duration::from_millis(16));
        let b = c.tick_at(start + Duration::from_secs(3));
        assert!((a.elapsed_ms - 16.0).abs() < 1e-6);
        assert!((b.elapsed_ms - 3_000.0).abs() < 1e-6);

        c.reset();
        let d = c.tick();
        assert!(d.elapsed_ms >= 0.0);
    }
}
