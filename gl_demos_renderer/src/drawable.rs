use cgmath::{Matrix4, SquareMatrix};

/// Per-frame state handed to a drawable. Rebuilt by the render loop every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameUniforms {
    pub projection: Matrix4<f32>,
    pub model_view: Matrix4<f32>,
}

impl FrameUniforms {
    pub fn new(projection: Matrix4<f32>, model_view: Matrix4<f32>) -> Self {
        Self {
            projection,
            model_view,
        }
    }
}

impl Default for FrameUniforms {
    fn default() -> Self {
        Self::new(Matrix4::identity(), Matrix4::identity())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawableKind {
    StaticMesh,
    ImmediateGeometry,
}

pub trait Drawable {
    /// Creates the GL objects. Needs a current context.
    fn init_render(&mut self) -> anyhow::Result<()>;

    fn draw(&mut self, uniforms: &FrameUniforms) -> anyhow::Result<()>;

    fn kind(&self) -> DrawableKind;
}
