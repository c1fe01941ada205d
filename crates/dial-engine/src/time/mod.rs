//! Frame timing.
//!
//! One `FrameClock` per window; `tick()` once per presented frame yields the
//! `FrameTime` handed to the app. `FrameTime::elapsed_ms` is the monotonic
//! timestamp render loops throttle against.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
