use gl::types::GLenum;

use crate::gl_utils::VertexAttribute;

pub mod immediate_geometry;
pub mod shader_consts;
pub mod static_mesh;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Triangles,
    Lines,
}

impl Primitive {
    pub(crate) fn gl_mode(self) -> GLenum {
        match self {
            Primitive::Triangles => gl::TRIANGLES,
            Primitive::Lines => gl::LINES,
        }
    }
}

/// Interleaved float attributes, bound to locations 0, 1, ... in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexLayout {
    pub components: &'static [i32],
}

pub const POSITION_2D_COLOR: VertexLayout = VertexLayout {
    components: &[2, 3],
};

pub const POSITION_3D_COLOR: VertexLayout = VertexLayout {
    components: &[3, 3],
};

impl VertexLayout {
    /// Floats per vertex
    pub fn stride(&self) -> usize {
        self.components.iter().map(|&size| size as usize).sum()
    }

    pub fn vertex_count(&self, data: &[f32]) -> usize {
        data.len() / self.stride()
    }

    pub fn attributes(&self) -> Vec<VertexAttribute> {
        let stride = self.stride();
        let mut offset = 0;

        self.components
            .iter()
            .enumerate()
            .map(|(index, &size)| {
                let attribute = VertexAttribute::float(index as u32, size, stride, offset);
                offset += size as usize;
                attribute
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use gl_demos_shared::geometry::{
        COLORED_VERTEX_STRIDE, TRIANGLE_STRIDE, TRIANGLE_VERTICES, cube_triangles,
    };

    use super::*;

    #[test]
    fn layouts_match_geometry_tables() {
        assert_eq!(POSITION_2D_COLOR.stride(), TRIANGLE_STRIDE);
        assert_eq!(POSITION_3D_COLOR.stride(), COLORED_VERTEX_STRIDE);
    }

    #[test]
    fn vertex_count_uses_stride() {
        assert_eq!(POSITION_2D_COLOR.vertex_count(&TRIANGLE_VERTICES), 3);
        assert_eq!(POSITION_3D_COLOR.vertex_count(&cube_triangles()), 36);
    }

    #[test]
    fn attributes_are_interleaved() {
        let attributes = POSITION_2D_COLOR.attributes();

        assert_eq!(attributes.len(), 2);
        assert_eq!(attributes[0].index, 0);
        assert_eq!(attributes[0].size, 2);
        assert_eq!(attributes[0].offset, 0);
        assert_eq!(attributes[1].index, 1);
        assert_eq!(attributes[1].size, 3);
        assert_eq!(attributes[1].offset, 2 * size_of::<f32>());
        assert!(attributes.iter().all(|attr| attr.stride == 20));
    }
}
