use anyhow::Context;
use gl::types::GLsizei;

use gl_demos_shared::geometry::{cross_lines, cube_triangles, triangle_colored_vertices};

use crate::drawable::{Drawable, DrawableKind, FrameUniforms};
use crate::drawables::shader_consts::{COLOR_FRAGMENT_SHADER_SRC, TRANSFORM_VERTEX_SHADER_SRC};
use crate::drawables::{POSITION_3D_COLOR, Primitive};
use crate::gl_utils::{Shader, VertexArray, VertexBuffer};

const CROSS_LINE_WIDTH: f32 = 3.0;

/// CPU-side geometry that is re-submitted to the GPU on every draw.
///
/// Vertices are `POSITION_3D_COLOR` and go through the projection and
/// model-view uniforms.
pub struct ImmediateGeometry {
    primitive: Primitive,
    vertices: Vec<f32>,
    line_width: f32,
    render_context: Option<RenderContext>,
}

struct RenderContext {
    shader: Shader,
    vao: VertexArray,
}

impl ImmediateGeometry {
    pub fn new(primitive: Primitive, vertices: Vec<f32>) -> Self {
        Self {
            primitive,
            vertices,
            line_width: 1.0,
            render_context: None,
        }
    }

    pub fn with_line_width(mut self, line_width: f32) -> Self {
        self.line_width = line_width;
        self
    }

    pub fn cube() -> Self {
        Self::new(Primitive::Triangles, cube_triangles())
    }

    pub fn triangle() -> Self {
        Self::new(Primitive::Triangles, triangle_colored_vertices())
    }

    pub fn cross() -> Self {
        Self::new(Primitive::Lines, cross_lines()).with_line_width(CROSS_LINE_WIDTH)
    }

    pub fn primitive(&self) -> Primitive {
        self.primitive
    }

    pub fn vertex_count(&self) -> usize {
        POSITION_3D_COLOR.vertex_count(&self.vertices)
    }
}

impl Drawable for ImmediateGeometry {
    fn init_render(&mut self) -> anyhow::Result<()> {
        let mut vao = VertexArray::new();
        let mut vbo = VertexBuffer::with_capacity(size_of_val(self.vertices.as_slice()));

        for attribute in POSITION_3D_COLOR.attributes() {
            vbo.add_vertex_attribute(attribute);
        }

        vao.bind();
        vao.bind_vertex_buffer(vbo);
        vao.unbind();

        let shader = Shader::new(TRANSFORM_VERTEX_SHADER_SRC, COLOR_FRAGMENT_SHADER_SRC)
            .context("Couldn't build immediate geometry shader")?;

        self.render_context = Some(RenderContext { shader, vao });

        Ok(())
    }

    fn draw(&mut self, uniforms: &FrameUniforms) -> anyhow::Result<()> {
        let count = self.vertex_count() as GLsizei;
        let ctx = self
            .render_context
            .as_ref()
            .context("Immediate geometry drawn before init_render")?;
        let vbo = ctx
            .vao
            .vertex_buffer(0)
            .context("Immediate geometry has no vertex buffer")?;

        ctx.shader.use_program();
        ctx.shader.set_mat4(c"projection", &uniforms.projection);
        ctx.shader.set_mat4(c"model_view", &uniforms.model_view);
        ctx.vao.bind();

        vbo.bind();
        let upload = vbo.buffer_sub_data(0, &self.vertices);
        vbo.unbind();

        if upload.is_ok() {
            unsafe {
                if self.primitive == Primitive::Lines {
                    gl::Hint(gl::LINE_SMOOTH_HINT, gl::NICEST);
                    gl::LineWidth(self.line_width);
                }

                gl::DrawArrays(self.primitive.gl_mode(), 0, count);
            }
        }

        ctx.vao.unbind();
        ctx.shader.unbind();

        upload
    }

    fn kind(&self) -> DrawableKind {
        DrawableKind::ImmediateGeometry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_is_a_triangle_list() {
        let cube = ImmediateGeometry::cube();

        assert_eq!(cube.primitive(), Primitive::Triangles);
        assert_eq!(cube.vertex_count(), 36);
        assert_eq!(cube.kind(), DrawableKind::ImmediateGeometry);
    }

    #[test]
    fn cross_is_thick_lines() {
        let cross = ImmediateGeometry::cross();

        assert_eq!(cross.primitive(), Primitive::Lines);
        assert_eq!(cross.vertex_count(), 4);
        assert_eq!(cross.line_width, CROSS_LINE_WIDTH);
    }

    #[test]
    fn triangle_matches_static_triangle_vertex_count() {
        assert_eq!(ImmediateGeometry::triangle().vertex_count(), 3);
    }

    #[test]
    fn draw_before_init_is_an_error() {
        let mut cube = ImmediateGeometry::cube();
        assert!(cube.draw(&FrameUniforms::default()).is_err());
    }
}
