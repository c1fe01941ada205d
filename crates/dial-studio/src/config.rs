use glam::Vec3;

use dial_clock::LoopConfig;
use dial_engine::camera::PerspectiveCamera;
use dial_engine::device::GpuInit;
use dial_engine::paint::Color;
use dial_engine::window::{RedrawMode, RuntimeConfig};
use winit::dpi::LogicalSize;

/// Everything the studio needs to start.
#[derive(Debug, Clone)]
pub struct StudioConfig {
    pub title: String,
    /// Initial window size in logical pixels.
    pub size: (f64, f64),
    pub face: FaceConfig,
    pub loop_config: LoopConfig,
    pub camera: PerspectiveCamera,
    pub gpu: GpuInit,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            title: "dial".to_string(),
            size: (1280.0, 720.0),
            face: FaceConfig::default(),
            loop_config: LoopConfig::default(),
            camera: PerspectiveCamera::default(),
            gpu: GpuInit::default(),
        }
    }
}

impl StudioConfig {
    /// The loop re-arms every frame itself, so the runtime only redraws on request.
    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            title: self.title.clone(),
            initial_size: LogicalSize::new(self.size.0, self.size.1),
            redraw: RedrawMode::OnRequest,
        }
    }
}

/// Wireframe band around the face.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RimStyle {
    pub height: f32,
    pub segments: usize,
    pub color: Color,
}

/// Rainbow disc behind the markers.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CoverStyle {
    pub segments: usize,
    pub opacity: f32,
    /// Offset along the face normal.
    pub z: f32,
}

/// Minute ticks. Every `major_every`-th tick is longer and wider.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MarkerStyle {
    /// Ticks are placed at `0..=count`, one per `360 / count` degrees.
    pub count: u32,
    pub major_every: u32,
    pub major_length: f32,
    pub major_width: f32,
    pub minor_length: f32,
    pub minor_width: f32,
    pub color: Color,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct NeedleStyle {
    /// Distance between the needle tip and the face edge.
    pub inset: f32,
    pub width: f32,
    pub color: Color,
}

/// Geometry and colours of the clock face.
///
/// Lengths are world units. Stroke widths are in screen-pixel terms and are
/// multiplied by `stroke_scale` to get ribbon widths.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FaceConfig {
    pub radius: f32,
    /// Translation of the whole clock.
    pub offset: Vec3,
    /// Offset of markers and needles along the face normal.
    pub dial_z: f32,
    pub stroke_scale: f32,
    pub background: Color,

    pub rim: RimStyle,
    pub cover: CoverStyle,
    pub markers: MarkerStyle,

    pub seconds: NeedleStyle,
    pub minutes: NeedleStyle,
    pub hours: NeedleStyle,
}

impl Default for FaceConfig {
    fn default() -> Self {
        Self {
            radius: 75.0,
            offset: Vec3::new(0.0, -50.0, 0.0),
            dial_z: 8.0,
            stroke_scale: 0.7,
            background: Color::WHITE,

            rim: RimStyle {
                height: 15.0,
                segments: 12,
                color: Color::BLACK.with_opacity(0.1),
            },
            cover: CoverStyle {
                segments: 220,
                opacity: 0.5,
                z: -8.0,
            },
            markers: MarkerStyle {
                count: 60,
                major_every: 5,
                major_length: 7.0,
                major_width: 3.0,
                minor_length: 4.0,
                minor_width: 1.0,
                color: Color::BLACK,
            },

            seconds: NeedleStyle {
                inset: 10.0,
                width: 1.0,
                color: Color::from_hex(0xff0000),
            },
            minutes: NeedleStyle {
                inset: 25.0,
                width: 1.0,
                color: Color::from_hex(0x00ff00),
            },
            hours: NeedleStyle {
                inset: 40.0,
                width: 2.0,
                color: Color::from_hex(0x0000ff),
            },
        }
    }
}
