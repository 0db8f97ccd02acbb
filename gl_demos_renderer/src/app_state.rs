use std::time::{Duration, Instant};

use fps_counter::FPSCounter;
use gl::types::GLsizei;
use glutin::event::{ElementState, Event, KeyboardInput, VirtualKeyCode, WindowEvent};
use glutin::event_loop::{ControlFlow, EventLoop};
use glutin::platform::run_return::EventLoopExtRunReturn;

use gl_demos_shared::config::DemoConfig;
use gl_demos_shared::projection::{CameraIntrinsics, projection_matrix};

use crate::context::GlWindow;
use crate::scene::Scene;

const FPS_LOG_INTERVAL: Duration = Duration::from_secs(1);

/// Everything the render loop touches. Only the loop mutates it.
pub struct AppState {
    // Declared before `window`: GL objects must be deleted while the context is alive.
    scene: Scene,
    window: GlWindow,
    camera: CameraIntrinsics,
    fps_counter: FPSCounter,
    last_fps_log: Instant,
    skipped_frames: u64,
}

impl AppState {
    pub fn new(window: GlWindow, scene: Scene, config: &DemoConfig) -> Self {
        Self {
            scene,
            window,
            camera: config.camera,
            fps_counter: FPSCounter::new(),
            last_fps_log: Instant::now(),
            skipped_frames: 0,
        }
    }

    /// Blocks until the window is closed or a frame fails to render.
    pub fn run(&mut self, event_loop: &mut EventLoop<()>) -> anyhow::Result<()> {
        self.scene.init_render()?;

        unsafe {
            gl::Enable(gl::DEPTH_TEST);
        }

        let mut result = Ok(());

        event_loop.run_return(|event, _, control_flow| {
            *control_flow = ControlFlow::Poll;

            match event {
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::CloseRequested
                    | WindowEvent::KeyboardInput {
                        input:
                            KeyboardInput {
                                state: ElementState::Pressed,
                                virtual_keycode: Some(VirtualKeyCode::Escape),
                                ..
                            },
                        ..
                    } => {
                        tracing::info!("Closing {}", self.scene.title());
                        *control_flow = ControlFlow::Exit;
                    }
                    WindowEvent::Resized(size) => self.window.resize(size),
                    _ => {}
                },
                Event::MainEventsCleared => self.window.request_redraw(),
                Event::RedrawRequested(_) => {
                    if let Err(err) = self.render_frame() {
                        tracing::error!("Failed to render frame: {:#}", err);
                        result = Err(err);
                        *control_flow = ControlFlow::Exit;
                    }
                }
                _ => {}
            }
        });

        if self.skipped_frames > 0 {
            tracing::debug!("Skipped {} frames with an empty framebuffer", self.skipped_frames);
        }

        result
    }

    fn render_frame(&mut self) -> anyhow::Result<()> {
        let (width, height) = self.window.framebuffer_size();

        let projection = match projection_matrix(width, height, &self.camera) {
            Ok(projection) => projection,
            Err(err) => {
                self.skipped_frames += 1;
                tracing::debug!("Skipping frame: {}", err);
                return Ok(());
            }
        };

        let [r, g, b, a] = self.scene.clear_color();
        unsafe {
            gl::Viewport(0, 0, width as GLsizei, height as GLsizei);
            gl::ClearColor(r, g, b, a);
            gl::Clear(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);
        }

        self.scene.render(projection)?;
        self.window.swap_buffers()?;

        let fps = self.fps_counter.tick();
        if self.last_fps_log.elapsed() >= FPS_LOG_INTERVAL {
            self.last_fps_log = Instant::now();
            tracing::debug!("{} : {} FPS", self.scene.title(), fps);
        }

        Ok(())
    }
}
