use std::ffi::{CStr, c_char};

use anyhow::{Context, anyhow};
use glutin::dpi::PhysicalSize;
use glutin::event_loop::EventLoop;
use glutin::window::WindowBuilder;
use glutin::{Api, ContextBuilder, GlProfile, GlRequest, PossiblyCurrent, WindowedContext};

use gl_demos_shared::config::WindowConfig;

const GL_VERSION: (u8, u8) = (3, 3);
const DEPTH_BITS: u8 = 24;

/// A window with its OpenGL context made current on the calling thread.
pub struct GlWindow {
    context: WindowedContext<PossiblyCurrent>,
}

impl GlWindow {
    pub fn new(
        event_loop: &EventLoop<()>,
        title: &str,
        config: &WindowConfig,
    ) -> anyhow::Result<Self> {
        let window_builder = WindowBuilder::new()
            .with_title(title)
            .with_inner_size(PhysicalSize::new(config.width, config.height));

        let context = ContextBuilder::new()
            .with_gl(GlRequest::Specific(Api::OpenGl, GL_VERSION))
            .with_gl_profile(GlProfile::Core)
            .with_depth_buffer(DEPTH_BITS)
            .with_vsync(config.vsync)
            .build_windowed(window_builder, event_loop)
            .context("Failed to create window and OpenGL context")?;

        let context = unsafe { context.make_current() }
            .map_err(|(_, err)| anyhow!("Couldn't make the OpenGL context current: {err}"))?;

        gl::load_with(|symbol| context.get_proc_address(symbol) as *const _);

        tracing::info!(
            "Created OpenGL context (version: {}, renderer: {})",
            gl_string(gl::VERSION),
            gl_string(gl::RENDERER)
        );

        Ok(Self { context })
    }

    /// Size of the drawable area in pixels, can be 0x0 while minimized.
    pub fn framebuffer_size(&self) -> (u32, u32) {
        let size = self.context.window().inner_size();
        (size.width, size.height)
    }

    pub fn resize(&self, size: PhysicalSize<u32>) {
        tracing::debug!("New Size : {}x{}", size.width, size.height);
        self.context.resize(size);
    }

    pub fn request_redraw(&self) {
        self.context.window().request_redraw();
    }

    pub fn swap_buffers(&self) -> anyhow::Result<()> {
        self.context
            .swap_buffers()
            .context("Couldn't swap buffers")
    }
}

fn gl_string(name: gl::types::GLenum) -> String {
    unsafe {
        let ptr = gl::GetString(name);
        if ptr.is_null() {
            return String::from("unknown");
        }
        CStr::from_ptr(ptr as *const c_char)
            .to_string_lossy()
            .into_owned()
    }
}
