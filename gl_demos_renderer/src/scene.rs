use cgmath::{Angle, Deg, Matrix4, Rad, vec3};

use gl_demos_shared::config::DemoConfig;
use gl_demos_shared::projection::CameraIntrinsics;

use crate::drawable::{Drawable, DrawableKind, FrameUniforms};
use crate::drawables::immediate_geometry::ImmediateGeometry;
use crate::drawables::static_mesh::StaticMesh;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneKind {
    /// Static mesh through the pass-through shader
    Triangle,
    /// Same triangle, re-submitted every frame through the projection
    ImmediateTriangle,
    SpinningCube,
    Cross,
}

impl SceneKind {
    pub fn title(&self) -> &'static str {
        match self {
            SceneKind::Triangle => "Triangle",
            SceneKind::ImmediateTriangle => "Triangle (immediate)",
            SceneKind::SpinningCube => "Spinning Cube",
            SceneKind::Cross => "Cross",
        }
    }
}

/// Where the model sits in eye space, and how it moves between frames.
#[derive(Debug, Clone, PartialEq)]
pub enum Motion {
    Static {
        distance: f32,
    },
    Spin {
        distance: f32,
        step_degrees: f32,
        angle_x: f32,
        angle_y: f32,
    },
}

impl Motion {
    pub fn spin(distance: f32, step_degrees: f32) -> Self {
        Motion::Spin {
            distance,
            step_degrees,
            angle_x: 0.0,
            angle_y: 0.0,
        }
    }

    pub fn model_view(&self) -> Matrix4<f32> {
        match *self {
            Motion::Static { distance } => Matrix4::from_translation(vec3(0.0, 0.0, -distance)),
            Motion::Spin {
                distance,
                angle_x,
                angle_y,
                ..
            } => {
                Matrix4::from_translation(vec3(0.0, 0.0, -distance))
                    * Matrix4::from_angle_x(Deg(angle_x))
                    * Matrix4::from_angle_y(Deg(angle_y))
            }
        }
    }

    /// Angles are kept in [0, 360).
    pub fn advance(&mut self) {
        if let Motion::Spin {
            step_degrees,
            angle_x,
            angle_y,
            ..
        } = self
        {
            *angle_x = (*angle_x + *step_degrees).rem_euclid(360.0);
            *angle_y = (*angle_y + *step_degrees).rem_euclid(360.0);
        }
    }
}

/// Eye-space distance at which one unit spans half the vertical field of
/// view, so flat geometry keeps its clip-space height.
pub fn unit_height_distance(camera: &CameraIntrinsics) -> f32 {
    let half_fov: Rad<f32> = Deg(camera.fov_degrees * 0.5).into();
    half_fov.cot()
}

pub struct Scene {
    kind: SceneKind,
    drawable: Box<dyn Drawable>,
    drawable_initialized: bool,
    motion: Motion,
    clear_color: [f32; 4],
}

impl Scene {
    pub fn new(kind: SceneKind, config: &DemoConfig) -> Self {
        let flat_distance = unit_height_distance(&config.camera);

        let (drawable, motion): (Box<dyn Drawable>, Motion) = match kind {
            SceneKind::Triangle => (
                Box::new(StaticMesh::triangle()),
                Motion::Static { distance: 0.0 },
            ),
            SceneKind::ImmediateTriangle => (
                Box::new(ImmediateGeometry::triangle()),
                Motion::Static {
                    distance: flat_distance,
                },
            ),
            SceneKind::SpinningCube => (
                Box::new(ImmediateGeometry::cube()),
                Motion::spin(config.cube.distance, config.cube.rotation_step_degrees),
            ),
            SceneKind::Cross => (
                Box::new(ImmediateGeometry::cross()),
                Motion::Static {
                    distance: flat_distance,
                },
            ),
        };

        Self {
            kind,
            drawable,
            drawable_initialized: false,
            motion,
            clear_color: config.clear_color,
        }
    }

    pub fn kind(&self) -> SceneKind {
        self.kind
    }

    pub fn title(&self) -> &'static str {
        self.kind.title()
    }

    pub fn drawable_kind(&self) -> DrawableKind {
        self.drawable.kind()
    }

    pub fn motion(&self) -> &Motion {
        &self.motion
    }

    pub fn clear_color(&self) -> [f32; 4] {
        self.clear_color
    }

    pub fn init_render(&mut self) -> anyhow::Result<()> {
        if !self.drawable_initialized {
            self.drawable.init_render()?;
            self.drawable_initialized = true;
            tracing::debug!(
                "Initialized {:?} for scene {:?}",
                self.drawable.kind(),
                self.kind
            );
        }

        Ok(())
    }

    /// Draws one frame with `projection`, then advances the motion.
    pub fn render(&mut self, projection: Matrix4<f32>) -> anyhow::Result<()> {
        let uniforms = FrameUniforms::new(projection, self.motion.model_view());
        self.drawable.draw(&uniforms)?;
        self.motion.advance();

        Ok(())
    }
}
