use glam::{Vec2, Vec3};

use crate::angle::{ClockReading, Needle};
use crate::parallax::Parallax;
use crate::stage::ClockStage;
use crate::state::AnimationState;
use crate::wall::{SystemWallClock, WallClock};

/// Loop tuning.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LoopConfig {
    /// Minimum tick-clock time between two needle refreshes, in milliseconds.
    pub throttle_interval_ms: f64,

    /// Camera lag behind the pointer.
    pub parallax: Parallax,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            throttle_interval_ms: 1_000.0,
            parallax: Parallax::default(),
        }
    }
}

/// Outcome of one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick<F> {
    /// Whatever the stage returned from `draw`.
    pub frame: F,

    /// Whether the needles were refreshed during this tick.
    pub refreshed: bool,
}

/// Per-frame driver of the dial.
///
/// The host calls [`tick`](Self::tick) once per display refresh. Every call
/// re-arms the next one through the stage, refreshes the needles at most once
/// per throttle interval and always redraws, so the parallax stays smooth
/// while the hands move in discrete steps.
#[derive(Debug)]
pub struct RenderLoop<W = SystemWallClock> {
    state: AnimationState,
    config: LoopConfig,
    wall: W,
    refreshes: u64,
}

impl RenderLoop<SystemWallClock> {
    pub fn new(config: LoopConfig) -> Self {
        Self::with_wall_clock(config, SystemWallClock)
    }
}

impl<W: WallClock> RenderLoop<W> {
    pub fn with_wall_clock(config: LoopConfig, wall: W) -> Self {
        Self {
            state: AnimationState::new(),
            config,
            wall,
            refreshes: 0,
        }
    }

    #[inline]
    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    #[inline]
    pub fn config(&self) -> &LoopConfig {
        &self.config
    }

    #[inline]
    pub fn wall_clock(&self) -> &W {
        &self.wall
    }

    /// Pointer observer. Positions and `viewport_size` share one space.
    pub fn pointer_moved(&mut self, position: Vec2, viewport_size: Vec2) {
        self.state.pointer_moved(position, viewport_size);
    }

    /// Runs one frame.
    ///
    /// `tick_ms` comes from the host's monotonic frame clock and only feeds the
    /// throttle gate. Needle angles are computed from a fresh wall-clock sample
    /// so dropped frames cannot put the hands behind.
    pub fn tick<S: ClockStage>(&mut self, tick_ms: f64, stage: &mut S) -> Tick<S::Frame> {
        stage.request_next_tick();

        let refreshed = self.state.advance(tick_ms, self.config.throttle_interval_ms);
        if refreshed {
            let reading = ClockReading::at(self.wall.now());
            for needle in Needle::ALL {
                stage.set_needle_angle(needle, reading.angle(needle));
            }
            self.state.replace_reading(reading);

            if self.refreshes == 0 {
                log::debug!("first dial refresh at tick {tick_ms:.0}ms: {reading:?}");
            } else {
                log::trace!("dial refresh at tick {tick_ms:.0}ms: {reading:?}");
            }
            self.refreshes += 1;
        }

        let camera = stage.camera_position();
        let xy = self
            .config
            .parallax
            .step(camera.truncate(), self.state.pointer_offset());
        stage.set_camera_position(Vec3::new(xy.x, xy.y, camera.z));
        stage.look_at_origin();

        Tick {
            frame: stage.draw(),
            refreshed,
        }
    }
}
