use glutin::event_loop::EventLoop;

use gl_demos_shared::config::DemoConfig;

use crate::app_state::AppState;
use crate::context::GlWindow;
use crate::scene::Scene;

pub mod app_state;
pub mod context;
pub mod drawable;
pub mod drawables;
pub mod gl_utils;
pub mod scene;

pub use scene::SceneKind;

/// Opens a window for `kind` and renders it until the window is closed.
pub fn run(kind: SceneKind, config: &DemoConfig) -> anyhow::Result<()> {
    let mut event_loop = EventLoop::new();
    let scene = Scene::new(kind, config);
    let window = GlWindow::new(&event_loop, scene.title(), &config.window)?;

    tracing::info!(
        "Rendering {:?} with a {:?} ({}x{}, vsync: {})",
        kind,
        scene.drawable_kind(),
        config.window.width,
        config.window.height,
        config.window.vsync
    );

    let mut app = AppState::new(window, scene, config);
    app.run(&mut event_loop)
}
