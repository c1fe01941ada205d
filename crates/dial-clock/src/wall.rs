use std::cell::Cell;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::angle::WallTime;

/// Source of wall-clock instants.
///
/// Needle angles are always derived from this clock, never from frame deltas,
/// so a slow or stalled frame rate cannot make the dial drift.
pub trait WallClock {
    fn now(&self) -> WallTime;
}

impl<W: WallClock + ?Sized> WallClock for &W {
    #[inline]
    fn now(&self) -> WallTime {
        (**self).now()
    }
}

/// Operating-system real-time clock.
#[derive(Debug, Copy, Clone, Default)]
pub struct SystemWallClock;

impl WallClock for SystemWallClock {
    fn now(&self) -> WallTime {
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(since) => WallTime::from_unix_ms(since.as_secs_f64() * 1_000.0),
            // System clock set before 1970.
            Err(err) => WallTime::from_unix_ms(-err.duration().as_secs_f64() * 1_000.0),
        }
    }
}

/// Manually driven clock.
#[derive(Debug, Default)]
pub struct FixedWallClock {
    now: Cell<WallTime>,
}

impl FixedWallClock {
    pub fn new(now: WallTime) -> Self {
        Self { now: Cell::new(now) }
    }

    pub fn set(&self, now: WallTime) {
        self.now.set(now);
    }

    pub fn advance_ms(&self, ms: f64) {
        let t = self.now.get();
        self.now.set(WallTime::from_unix_ms(t.unix_ms + ms));
    }
}

impl WallClock for FixedWallClock {
    #[inline]
    fn now(&self) -> WallTime {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_is_after_2020() {
        // 2020-01-01T00:00:00Z
        assert!(SystemWallClock.now().unix_ms > 1_577_836_800_000.0);
    }

    #[test]
    fn fixed_clock_set_and_advance() {
        let clock = FixedWallClock::new(WallTime::from_unix_secs(10.0));
        assert_eq!(clock.now().unix_secs(), 10.0);

        clock.advance_ms(1_500.0);
        assert_eq!(clock.now().unix_ms, 11_500.0);

        clock.set(WallTime::from_unix_ms(0.0));
        assert_eq!(clock.now(), WallTime::default());
    }

    #[test]
    fn borrowed_clock_forwards() {
        let clock = FixedWallClock::new(WallTime::from_unix_ms(42.0));
        let by_ref: &FixedWallClock = &clock;
        assert_eq!(WallClock::now(&by_ref).unix_ms, 42.0);
    }
}
