use anyhow::Context;
use gl::types::GLsizei;

use gl_demos_shared::geometry::TRIANGLE_VERTICES;

use crate::drawable::{Drawable, DrawableKind, FrameUniforms};
use crate::drawables::shader_consts::{COLOR_FRAGMENT_SHADER_SRC, PASSTHROUGH_VERTEX_SHADER_SRC};
use crate::drawables::{POSITION_2D_COLOR, Primitive, VertexLayout};
use crate::gl_utils::{Shader, VertexArray, VertexBuffer};

/// Vertices uploaded once at init and drawn from the same buffer every frame.
pub struct StaticMesh {
    vertices: Vec<f32>,
    layout: VertexLayout,
    primitive: Primitive,
    vertex_shader_src: &'static str,
    fragment_shader_src: &'static str,
    render_context: Option<RenderContext>,
}

struct RenderContext {
    shader: Shader,
    vao: VertexArray,
}

impl StaticMesh {
    pub fn new(
        vertices: Vec<f32>,
        layout: VertexLayout,
        primitive: Primitive,
        vertex_shader_src: &'static str,
        fragment_shader_src: &'static str,
    ) -> Self {
        Self {
            vertices,
            layout,
            primitive,
            vertex_shader_src,
            fragment_shader_src,
            render_context: None,
        }
    }

    /// The red clip-space triangle, ignores the projection.
    pub fn triangle() -> Self {
        Self::new(
            TRIANGLE_VERTICES.to_vec(),
            POSITION_2D_COLOR,
            Primitive::Triangles,
            PASSTHROUGH_VERTEX_SHADER_SRC,
            COLOR_FRAGMENT_SHADER_SRC,
        )
    }

    pub fn vertex_count(&self) -> usize {
        self.layout.vertex_count(&self.vertices)
    }
}

impl Drawable for StaticMesh {
    fn init_render(&mut self) -> anyhow::Result<()> {
        let mut vao = VertexArray::new();
        let mut vbo = VertexBuffer::new(&self.vertices);

        for attribute in self.layout.attributes() {
            vbo.add_vertex_attribute(attribute);
        }

        vao.bind();
        vao.bind_vertex_buffer(vbo);
        vao.unbind();

        let shader = Shader::new(self.vertex_shader_src, self.fragment_shader_src)
            .context("Couldn't build static mesh shader")?;

        self.render_context = Some(RenderContext { shader, vao });

        Ok(())
    }

    fn draw(&mut self, uniforms: &FrameUniforms) -> anyhow::Result<()> {
        let count = self.vertex_count() as GLsizei;
        let ctx = self
            .render_context
            .as_ref()
            .context("Static mesh drawn before init_render")?;

        ctx.shader.use_program();
        ctx.shader.set_mat4(c"projection", &uniforms.projection);
        ctx.shader.set_mat4(c"model_view", &uniforms.model_view);
        ctx.vao.bind();

        unsafe {
            gl::DrawArrays(self.primitive.gl_mode(), 0, count);
        }

        ctx.vao.unbind();
        ctx.shader.unbind();

        Ok(())
    }

    fn kind(&self) -> DrawableKind {
        DrawableKind::StaticMesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangle_mesh_has_three_vertices() {
        let mesh = StaticMesh::triangle();

        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.kind(), DrawableKind::StaticMesh);
    }

    #[test]
    fn draw_before_init_is_an_error() {
        let mut mesh = StaticMesh::triangle();
        let err = mesh.draw(&FrameUniforms::default()).unwrap_err();

        assert!(err.to_string().contains("before init_render"));
    }
}
