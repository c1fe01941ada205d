//! Wall-clock instant to needle angles.
//!
//! Angles are radians about the face normal (+Z, pointing at the viewer).
//! They are negative so that a growing reading sweeps clockwise when the face
//! is read head-on.

const MS_PER_SECOND: f64 = 1_000.0;
const MS_PER_MINUTE: f64 = 60_000.0;
const MS_PER_HOUR: f64 = 3_600_000.0;

/// One sixtieth of a turn.
const DIAL_STEP_DEG: f64 = 6.0;
/// One twelfth of a turn.
const HOUR_STEP_DEG: f64 = 30.0;
/// Constant bias added to every hour reading.
const HOUR_OFFSET_DEG: f64 = 30.0;

/// Wall-clock instant in milliseconds since the Unix epoch.
#[derive(Debug, Copy, Clone, Default, PartialEq, PartialOrd)]
pub struct WallTime {
    pub unix_ms: f64,
}

impl WallTime {
    #[inline]
    pub const fn from_unix_ms(unix_ms: f64) -> Self {
        Self { unix_ms }
    }

    #[inline]
    pub fn from_unix_secs(secs: f64) -> Self {
        Self::from_unix_ms(secs * MS_PER_SECOND)
    }

    #[inline]
    pub fn unix_secs(self) -> f64 {
        self.unix_ms / MS_PER_SECOND
    }
}

/// Clock hand identifier.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Needle {
    Seconds,
    Minutes,
    Hours,
}

impl Needle {
    pub const ALL: [Needle; 3] = [Needle::Seconds, Needle::Minutes, Needle::Hours];
}

/// Needle angles derived from a single wall-clock sample.
///
/// A reading is never edited in place; each throttle tick replaces it.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ClockReading {
    pub seconds: f32,
    pub minutes: f32,
    pub hours: f32,
}

impl ClockReading {
    /// All needles at twelve o'clock.
    pub const ZERO: Self = Self {
        seconds: 0.0,
        minutes: 0.0,
        hours: 0.0,
    };

    /// Computes the reading for `time`.
    ///
    /// - seconds snap once per whole second
    /// - minutes creep continuously (fractional minutes are kept)
    /// - hours snap to the *nearest* whole hour and carry a fixed +30° bias
    pub fn at(time: WallTime) -> Self {
        let seconds = (time.unix_ms / MS_PER_SECOND).floor().rem_euclid(60.0) * DIAL_STEP_DEG;
        let minutes = (time.unix_ms / MS_PER_MINUTE).rem_euclid(60.0) * DIAL_STEP_DEG;
        let hours = round_half_up(time.unix_ms / MS_PER_HOUR).rem_euclid(12.0) * HOUR_STEP_DEG
            + HOUR_OFFSET_DEG;

        Self {
            seconds: clockwise(seconds),
            minutes: clockwise(minutes),
            hours: clockwise(hours),
        }
    }

    /// Angle of `needle` in radians.
    #[inline]
    pub fn angle(&self, needle: Needle) -> f32 {
        match needle {
            Needle::Seconds => self.seconds,
            Needle::Minutes => self.minutes,
            Needle::Hours => self.hours,
        }
    }

    /// Angle of `needle` in degrees.
    #[inline]
    pub fn degrees(&self, needle: Needle) -> f32 {
        self.angle(needle).to_degrees()
    }
}

/// Rounds `.5` towards positive infinity, so `-0.5` becomes `0` rather than `-1`.
#[inline]
fn round_half_up(v: f64) -> f64 {
    (v + 0.5).floor()
}

#[inline]
fn clockwise(deg: f64) -> f32 {
    (-deg).to_radians() as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-3;

    fn at_secs(s: f64) -> ClockReading {
        ClockReading::at(WallTime::from_unix_secs(s))
    }

    fn assert_deg(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < EPS,
            "expected {expected} deg, got {actual} deg"
        );
    }

    // ── seconds ───────────────────────────────────────────────────────────

    #[test]
    fn seconds_zero_on_minute_boundaries() {
        for m in [0.0, 60.0, 120.0, 1_700_000_040.0] {
            assert_deg(at_secs(m).degrees(Needle::Seconds), 0.0);
        }
    }

    #[test]
    fn seconds_ninety_is_half_turn_clockwise() {
        assert_deg(at_secs(90.0).degrees(Needle::Seconds), -180.0);
    }

    #[test]
    fn seconds_snap_to_whole_seconds() {
        let a = at_secs(1_000.0).seconds;
        let b = at_secs(1_000.999).seconds;
        assert_eq!(a, b);
        assert_deg(at_secs(1_001.0).degrees(Needle::Seconds) - a.to_degrees(), -6.0);
    }

    #[test]
    fn seconds_period_is_one_minute() {
        for s in [3.0, 17.5, 59.0, 1_234_567.0] {
            assert_deg(at_secs(s).seconds.to_degrees(), at_secs(s + 60.0).seconds.to_degrees());
        }
    }

    #[test]
    fn seconds_before_epoch_stay_in_range() {
        // -1s is 59s into the previous minute.
        assert_deg(at_secs(-1.0).degrees(Needle::Seconds), -354.0);
    }

    // ── minutes ───────────────────────────────────────────────────────────

    #[test]
    fn minutes_creep_with_fractional_seconds() {
        assert_deg(at_secs(90.0).degrees(Needle::Minutes), -9.0);
        assert_deg(at_secs(30.0).degrees(Needle::Minutes), -3.0);
    }

    #[test]
    fn minutes_continuous_across_minute_boundary() {
        let before = at_secs(599.9).degrees(Needle::Minutes);
        let after = at_secs(600.1).degrees(Needle::Minutes);
        assert!((before - after).abs() < 0.05);
    }

    #[test]
    fn minutes_monotonic_within_an_hour() {
        let mut prev = at_secs(3_600.0).minutes;
        let mut s = 3_600.0;
        while s + 7.0 < 7_200.0 {
            s += 7.0;
            let cur = at_secs(s).minutes;
            assert!(cur < prev, "clockwise sweep must grow in magnitude");
            prev = cur;
        }
    }

    #[test]
    fn minutes_wrap_each_hour() {
        assert_deg(at_secs(7_200.0).degrees(Needle::Minutes), 0.0);
    }

    // ── hours ─────────────────────────────────────────────────────────────

    #[test]
    fn hours_one_hour_is_sixty_degrees() {
        assert_deg(at_secs(3_600.0).degrees(Needle::Hours), -60.0);
    }

    #[test]
    fn hours_epoch_carries_offset_only() {
        assert_deg(at_secs(0.0).degrees(Needle::Hours), -30.0);
    }

    #[test]
    fn hours_constant_within_rounding_bucket() {
        // Bucket for hour 1 is [0.5h, 1.5h).
        let a = at_secs(1_800.0).hours;
        let b = at_secs(3_600.0).hours;
        let c = at_secs(5_399.0).hours;
        assert_eq!(a, b);
        assert_eq!(b, c);
    }

    #[test]
    fn hours_jump_thirty_degrees_at_bucket_edge() {
        let before = at_secs(5_399.999).degrees(Needle::Hours);
        let after = at_secs(5_400.0).degrees(Needle::Hours);
        assert_deg(after - before, -30.0);
    }

    #[test]
    fn hours_twelve_hour_face() {
        assert_deg(at_secs(12.0 * 3_600.0).degrees(Needle::Hours), -30.0);
        assert_deg(at_secs(11.0 * 3_600.0).degrees(Needle::Hours), -360.0);
    }

    #[test]
    fn hours_half_rounds_up_before_epoch() {
        // -0.5h rounds to 0, not -1.
        assert_deg(at_secs(-1_800.0).degrees(Needle::Hours), -30.0);
    }

    // ── accessors ─────────────────────────────────────────────────────────

    #[test]
    fn angle_matches_fields() {
        let r = at_secs(12_345.0);
        assert_eq!(r.angle(Needle::Seconds), r.seconds);
        assert_eq!(r.angle(Needle::Minutes), r.minutes);
        assert_eq!(r.angle(Needle::Hours), r.hours);
    }

    #[test]
    fn zero_reading_is_default() {
        assert_eq!(ClockReading::ZERO, ClockReading::default());
    }
}
