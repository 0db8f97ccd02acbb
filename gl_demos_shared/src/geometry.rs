//! Vertex tables for the demo scenes.
//!
//! Vertices are interleaved: a position followed by an RGB color.

pub type Color = [f32; 3];

pub const RED: Color = [1.0, 0.0, 0.0];
pub const GREEN: Color = [0.0, 1.0, 0.0];
pub const BLUE: Color = [0.0, 0.0, 1.0];
pub const YELLOW: Color = [1.0, 1.0, 0.0];
pub const MAGENTA: Color = [1.0, 0.0, 1.0];
pub const CYAN: Color = [0.0, 1.0, 1.0];

/// 2D position + color
pub const TRIANGLE_STRIDE: usize = 5;

#[rustfmt::skip]
pub const TRIANGLE_VERTICES: [f32; 15] = [
     0.0,  0.5,    1.0, 0.0, 0.0,
    -0.5, -0.5,    1.0, 0.0, 0.0,
     0.5, -0.5,    1.0, 0.0, 0.0,
];

/// 3D position + color
pub const COLORED_VERTEX_STRIDE: usize = 6;

pub struct CubeFace {
    pub name: &'static str,
    pub color: Color,
    /// Counter-clockwise when seen from outside the cube.
    pub corners: [[f32; 3]; 4],
}

pub const CUBE_FACES: [CubeFace; 6] = [
    CubeFace {
        name: "front",
        color: RED,
        corners: [[-1.0, -1.0, 1.0], [1.0, -1.0, 1.0], [1.0, 1.0, 1.0], [-1.0, 1.0, 1.0]],
    },
    CubeFace {
        name: "back",
        color: GREEN,
        corners: [[-1.0, -1.0, -1.0], [-1.0, 1.0, -1.0], [1.0, 1.0, -1.0], [1.0, -1.0, -1.0]],
    },
    CubeFace {
        name: "top",
        color: BLUE,
        corners: [[-1.0, 1.0, -1.0], [-1.0, 1.0, 1.0], [1.0, 1.0, 1.0], [1.0, 1.0, -1.0]],
    },
    CubeFace {
        name: "bottom",
        color: YELLOW,
        corners: [[-1.0, -1.0, -1.0], [1.0, -1.0, -1.0], [1.0, -1.0, 1.0], [-1.0, -1.0, 1.0]],
    },
    CubeFace {
        name: "right",
        color: MAGENTA,
        corners: [[1.0, -1.0, -1.0], [1.0, 1.0, -1.0], [1.0, 1.0, 1.0], [1.0, -1.0, 1.0]],
    },
    CubeFace {
        name: "left",
        color: CYAN,
        corners: [[-1.0, -1.0, -1.0], [-1.0, -1.0, 1.0], [-1.0, 1.0, 1.0], [-1.0, 1.0, -1.0]],
    },
];

fn push_vertex(out: &mut Vec<f32>, position: [f32; 3], color: Color) {
    out.extend_from_slice(&position);
    out.extend_from_slice(&color);
}

/// Splits every quad into two triangles (0, 1, 2) and (0, 2, 3).
pub fn cube_triangles() -> Vec<f32> {
    let mut out = Vec::with_capacity(CUBE_FACES.len() * 6 * COLORED_VERTEX_STRIDE);

    for face in &CUBE_FACES {
        for corner in [0, 1, 2, 0, 2, 3] {
            push_vertex(&mut out, face.corners[corner], face.color);
        }
    }

    out
}

/// Two diagonals forming an X, as a line list.
pub fn cross_lines() -> Vec<f32> {
    let mut out = Vec::with_capacity(4 * COLORED_VERTEX_STRIDE);

    for position in [[-0.5, -0.5], [0.5, 0.5], [0.5, -0.5], [-0.5, 0.5]] {
        push_vertex(&mut out, [position[0], position[1], 0.0], RED);
    }

    out
}

/// The triangle table widened to 3D positions so it can go through the
/// same pipeline as the other per-frame geometry.
pub fn triangle_colored_vertices() -> Vec<f32> {
    let mut out = Vec::with_capacity(3 * COLORED_VERTEX_STRIDE);

    for vertex in TRIANGLE_VERTICES.chunks_exact(TRIANGLE_STRIDE) {
        push_vertex(
            &mut out,
            [vertex[0], vertex[1], 0.0],
            [vertex[2], vertex[3], vertex[4]],
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_has_two_triangles_per_face() {
        let vertices = cube_triangles();
        assert_eq!(vertices.len(), 36 * COLORED_VERTEX_STRIDE);
    }

    #[test]
    fn cube_faces_keep_their_colors() {
        let vertices = cube_triangles();

        for (face_index, face) in CUBE_FACES.iter().enumerate() {
            let face_vertices = &vertices
                [face_index * 6 * COLORED_VERTEX_STRIDE..(face_index + 1) * 6 * COLORED_VERTEX_STRIDE];

            for vertex in face_vertices.chunks_exact(COLORED_VERTEX_STRIDE) {
                assert_eq!(&vertex[3..], &face.color, "face {}", face.name);
            }
        }
    }

    #[test]
    fn cube_faces_are_planar_on_their_axis() {
        for face in &CUBE_FACES {
            let axis = (0..3)
                .find(|&axis| face.corners.iter().all(|c| c[axis] == face.corners[0][axis]))
                .unwrap_or_else(|| panic!("face {} is not axis aligned", face.name));

            assert_eq!(face.corners[0][axis].abs(), 1.0);
        }
    }

    #[test]
    fn cube_winding_faces_outward() {
        for face in &CUBE_FACES {
            let [a, b, c, _] = face.corners;
            let u = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
            let v = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
            let normal = [
                u[1] * v[2] - u[2] * v[1],
                u[2] * v[0] - u[0] * v[2],
                u[0] * v[1] - u[1] * v[0],
            ];
            let center: Vec<f32> = (0..3)
                .map(|axis| face.corners.iter().map(|c| c[axis]).sum::<f32>() / 4.0)
                .collect();
            let outward: f32 = (0..3).map(|axis| normal[axis] * center[axis]).sum();

            assert!(outward > 0.0, "face {} winds inward", face.name);
        }
    }

    #[test]
    fn triangle_is_red() {
        for vertex in TRIANGLE_VERTICES.chunks_exact(TRIANGLE_STRIDE) {
            assert_eq!(&vertex[2..], &RED);
        }
    }

    #[test]
    fn triangle_widened_keeps_positions() {
        let vertices = triangle_colored_vertices();

        assert_eq!(vertices.len(), 3 * COLORED_VERTEX_STRIDE);
        assert_eq!(&vertices[0..3], &[0.0, 0.5, 0.0]);
        assert_eq!(&vertices[6..9], &[-0.5, -0.5, 0.0]);
        assert_eq!(&vertices[12..15], &[0.5, -0.5, 0.0]);
    }

    #[test]
    fn cross_is_two_segments() {
        let vertices = cross_lines();

        assert_eq!(vertices.len(), 4 * COLORED_VERTEX_STRIDE);
        assert_eq!(&vertices[0..2], &[-0.5, -0.5]);
        assert_eq!(&vertices[6..8], &[0.5, 0.5]);
    }
}
