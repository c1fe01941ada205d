use anyhow::Result;
use winit::window::WindowId;

use dial_clock::RenderLoop;
use dial_engine::core::{App, AppControl, FrameCtx};
use dial_engine::input::Key;
use dial_engine::render::MeshRenderer;
use dial_engine::window::Runtime;

use crate::config::StudioConfig;
use crate::stage::{DialScene, FrameStage};

/// The dial as an engine application.
pub struct ClockApp {
    dial: DialScene,
    renderer: MeshRenderer,
    clock: RenderLoop,
}

impl ClockApp {
    pub fn new(config: &StudioConfig) -> Self {
        Self {
            dial: DialScene::new(&config.face, config.camera),
            renderer: MeshRenderer::new(),
            clock: RenderLoop::new(config.loop_config),
        }
    }
}

impl App for ClockApp {
    fn on_resize(&mut self, _window_id: WindowId, width: f32, height: f32) {
        self.dial.camera.set_aspect(width / height);
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if ctx.input_frame.key_pressed(Key::Escape) {
            log::info!("escape pressed, closing");
            return AppControl::Exit;
        }

        if let Some(position) = ctx.input_frame.pointer_moved {
            let viewport = ctx.window.viewport();
            if viewport.is_valid() {
                self.clock.pointer_moved(position, viewport.size());
            }
        }

        let tick_ms = ctx.time.elapsed_ms;
        let mut stage = FrameStage::new(&mut self.dial, &mut self.renderer, ctx);
        self.clock.tick(tick_ms, &mut stage).frame
    }
}

/// Opens the window and runs the dial until it is closed.
pub fn run(config: StudioConfig) -> Result<()> {
    let app = ClockApp::new(&config);
    Runtime::run(config.runtime_config(), config.gpu.clone(), app)
}
