use glam::Vec2;

use crate::angle::ClockReading;

/// Mutable state carried between loop ticks for the lifetime of a view.
///
/// Writers:
/// - `last_update_ms`, `reading`: the render loop only
/// - `pointer_offset`: the pointer observer only
#[derive(Debug, Clone, Default)]
pub struct AnimationState {
    /// Tick timestamp of the last needle refresh, in milliseconds. Never decreases.
    last_update_ms: f64,

    /// Pointer position relative to the viewport centre, in logical pixels (+Y down).
    pointer_offset: Vec2,

    /// Reading currently applied to the needles.
    reading: ClockReading,
}

impl AnimationState {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn last_update_ms(&self) -> f64 {
        self.last_update_ms
    }

    #[inline]
    pub fn pointer_offset(&self) -> Vec2 {
        self.pointer_offset
    }

    #[inline]
    pub fn reading(&self) -> ClockReading {
        self.reading
    }

    #[inline]
    pub fn set_pointer_offset(&mut self, offset: Vec2) {
        self.pointer_offset = offset;
    }

    /// Records a pointer position given in the same space as `viewport_size`.
    pub fn pointer_moved(&mut self, position: Vec2, viewport_size: Vec2) {
        self.set_pointer_offset(position - viewport_size * 0.5);
    }

    /// Throttle gate.
    ///
    /// Returns `true` and records `now_ms` when at least `interval_ms` has passed
    /// since the last refresh. Timestamps that go backwards never pass the gate,
    /// so `last_update_ms` only advances.
    pub(crate) fn advance(&mut self, now_ms: f64, interval_ms: f64) -> bool {
        if now_ms - self.last_update_ms < interval_ms {
            return false;
        }
        self.last_update_ms = now_ms;
        true
    }

    pub(crate) fn replace_reading(&mut self, reading: ClockReading) {
        self.reading = reading;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_zeroed() {
        let s = AnimationState::new();
        assert_eq!(s.last_update_ms(), 0.0);
        assert_eq!(s.pointer_offset(), Vec2::ZERO);
        assert_eq!(s.reading(), ClockReading::ZERO);
    }

    #[test]
    fn gate_holds_until_interval_elapses() {
        let mut s = AnimationState::new();
        assert!(!s.advance(0.0, 1_000.0));
        assert!(!s.advance(999.9, 1_000.0));
        assert!(s.advance(1_000.0, 1_000.0));
        assert_eq!(s.last_update_ms(), 1_000.0);
        assert!(!s.advance(1_500.0, 1_000.0));
        assert!(s.advance(2_250.0, 1_000.0));
        assert_eq!(s.last_update_ms(), 2_250.0);
    }

    #[test]
    fn gate_never_moves_backwards() {
        let mut s = AnimationState::new();
        assert!(s.advance(5_000.0, 1_000.0));
        assert!(!s.advance(3_000.0, 1_000.0));
        assert_eq!(s.last_update_ms(), 5_000.0);
    }

    #[test]
    fn pointer_offset_is_relative_to_centre() {
        let mut s = AnimationState::new();
        s.pointer_moved(Vec2::new(700.0, 200.0), Vec2::new(1_280.0, 720.0));
        assert_eq!(s.pointer_offset(), Vec2::new(60.0, -160.0));

        s.pointer_moved(Vec2::new(640.0, 360.0), Vec2::new(1_280.0, 720.0));
        assert_eq!(s.pointer_offset(), Vec2::ZERO);
    }
}
