//! Dial clock core.
//!
//! Maps wall-clock instants to needle angles and drives the per-frame loop that
//! applies them. Rendering is reached only through the [`ClockStage`] trait, so
//! this crate never touches a window or a GPU.

pub mod angle;
pub mod parallax;
pub mod render_loop;
pub mod stage;
pub mod state;
pub mod wall;

pub use angle::{ClockReading, Needle, WallTime};
pub use parallax::Parallax;
pub use render_loop::{LoopConfig, RenderLoop, Tick};
pub use stage::ClockStage;
pub use state::AnimationState;
pub use wall::{FixedWallClock, SystemWallClock, WallClock};
