use std::error::Error;
use std::fmt;

use cgmath::{Angle, Deg, Matrix4, Rad};
use serde::{Deserialize, Serialize};

pub const DEFAULT_FOV_DEGREES: f32 = 45.0;
pub const DEFAULT_NEAR: f32 = 0.1;
pub const DEFAULT_FAR: f32 = 100.0;

#[derive(Debug, Clone, PartialEq)]
pub enum ProjectionError {
    /// Width or height of zero, the aspect ratio would be Inf or NaN.
    InvalidViewport { width: u32, height: u32 },
    InvalidFieldOfView(f32),
    InvalidClipPlanes { near: f32, far: f32 },
}

impl fmt::Display for ProjectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectionError::InvalidViewport { width, height } => {
                write!(f, "invalid viewport dimensions: {width}x{height}")
            }
            ProjectionError::InvalidFieldOfView(fov) => write!(
                f,
                "invalid field of view: {fov} degrees (expected between 0 and 180)"
            ),
            ProjectionError::InvalidClipPlanes { near, far } => write!(
                f,
                "invalid clip planes: near {near}, far {far} (expected 0 < near < far)"
            ),
        }
    }
}

impl Error for ProjectionError {}

/// Framebuffer dimensions, both guaranteed non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    width: u32,
    height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Result<Self, ProjectionError> {
        if width == 0 || height == 0 {
            return Err(ProjectionError::InvalidViewport { width, height });
        }

        Ok(Self { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraIntrinsics {
    /// Vertical field of view
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl CameraIntrinsics {
    pub fn new(fov_degrees: f32, near: f32, far: f32) -> Result<Self, ProjectionError> {
        let intrinsics = Self {
            fov_degrees,
            near,
            far,
        };
        intrinsics.validate()?;

        Ok(intrinsics)
    }

    pub fn validate(&self) -> Result<(), ProjectionError> {
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(ProjectionError::InvalidFieldOfView(self.fov_degrees));
        }

        if !(self.near > 0.0 && self.far > self.near && self.far.is_finite()) {
            return Err(ProjectionError::InvalidClipPlanes {
                near: self.near,
                far: self.far,
            });
        }

        Ok(())
    }
}

impl Default for CameraIntrinsics {
    fn default() -> Self {
        Self {
            fov_degrees: DEFAULT_FOV_DEGREES,
            near: DEFAULT_NEAR,
            far: DEFAULT_FAR,
        }
    }
}

/// The six planes of a symmetric perspective frustum, in eye space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrustumBounds {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    pub near: f32,
    pub far: f32,
}

impl FrustumBounds {
    pub fn perspective(viewport: &Viewport, camera: &CameraIntrinsics) -> Self {
        let half_fov: Rad<f32> = Deg(camera.fov_degrees * 0.5).into();

        let top = camera.near * half_fov.tan();
        let bottom = -top;
        let right = top * viewport.aspect_ratio();
        let left = -right;

        Self {
            left,
            right,
            bottom,
            top,
            near: camera.near,
            far: camera.far,
        }
    }

    /// Column-major, same layout as `glFrustum`.
    pub fn to_matrix(&self) -> Matrix4<f32> {
        cgmath::frustum(
            self.left,
            self.right,
            self.bottom,
            self.top,
            self.near,
            self.far,
        )
    }
}

/// Builds the projection for the current framebuffer size. Called once per frame.
pub fn projection_matrix(
    width: u32,
    height: u32,
    camera: &CameraIntrinsics,
) -> Result<Matrix4<f32>, ProjectionError> {
    let viewport = Viewport::new(width, height)?;
    Ok(FrustumBounds::perspective(&viewport, camera).to_matrix())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < EPSILON,
            "expected {expected}, got {actual}"
        );
    }

    fn bounds_for(width: u32, height: u32) -> FrustumBounds {
        let viewport = Viewport::new(width, height).unwrap();
        FrustumBounds::perspective(&viewport, &CameraIntrinsics::default())
    }

    #[test]
    fn frustum_is_symmetric_for_many_viewports() {
        for (width, height) in [(1, 1), (800, 600), (600, 800), (1920, 1080), (3, 1000)] {
            let bounds = bounds_for(width, height);

            assert_eq!(bounds.top, -bounds.bottom);
            assert_eq!(bounds.left, -bounds.right);
            assert_close(bounds.right / bounds.top, width as f32 / height as f32);
        }
    }

    #[test]
    fn bounds_for_800x600() {
        let bounds = bounds_for(800, 600);

        assert!((bounds.top - 0.0414).abs() < 1e-4);
        assert!((bounds.bottom + 0.0414).abs() < 1e-4);
        assert!((bounds.right - 0.0552).abs() < 1e-4);
        assert!((bounds.left + 0.0552).abs() < 1e-4);
        assert_eq!(bounds.near, 0.1);
        assert_eq!(bounds.far, 100.0);
    }

    #[test]
    fn square_viewport_gives_equal_magnitudes() {
        let bounds = bounds_for(600, 600);

        assert_eq!(bounds.left, -bounds.right);
        assert_eq!(bounds.bottom, -bounds.top);
        assert_eq!(bounds.right, bounds.top);
    }

    #[test]
    fn zero_height_is_rejected() {
        assert_eq!(
            Viewport::new(800, 0),
            Err(ProjectionError::InvalidViewport {
                width: 800,
                height: 0
            })
        );
        assert!(projection_matrix(800, 0, &CameraIntrinsics::default()).is_err());
    }

    #[test]
    fn zero_width_is_rejected() {
        assert!(Viewport::new(0, 600).is_err());
        assert!(projection_matrix(0, 0, &CameraIntrinsics::default()).is_err());
    }

    #[test]
    fn invalid_viewport_error_message() {
        let err = Viewport::new(640, 0).unwrap_err();
        assert_eq!(err.to_string(), "invalid viewport dimensions: 640x0");
    }

    #[test]
    fn matrix_matches_frustum_formula() {
        let bounds = bounds_for(800, 600);
        let m = bounds.to_matrix();
        let FrustumBounds {
            left: l,
            right: r,
            bottom: b,
            top: t,
            near: n,
            far: f,
        } = bounds;

        // cgmath indexes as m[column][row]
        assert_close(m[0][0], 2.0 * n / (r - l));
        assert_close(m[1][1], 2.0 * n / (t - b));
        assert_close(m[2][0], (r + l) / (r - l));
        assert_close(m[2][1], (t + b) / (t - b));
        assert_close(m[2][2], -(f + n) / (f - n));
        assert_close(m[3][2], -2.0 * f * n / (f - n));
        assert_close(m[2][3], -1.0);
        assert_close(m[3][3], 0.0);
        assert_close(m[0][1], 0.0);
        assert_close(m[1][0], 0.0);
    }

    #[test]
    fn matrix_is_finite_for_valid_input() {
        let m = projection_matrix(1, 4096, &CameraIntrinsics::default()).unwrap();
        let values: &[f32; 16] = m.as_ref();

        assert!(values.iter().all(|value| value.is_finite()));
    }

    #[test]
    fn custom_intrinsics_are_validated() {
        assert!(CameraIntrinsics::new(60.0, 0.5, 50.0).is_ok());
        assert_eq!(
            CameraIntrinsics::new(0.0, 0.1, 100.0),
            Err(ProjectionError::InvalidFieldOfView(0.0))
        );
        assert!(CameraIntrinsics::new(180.0, 0.1, 100.0).is_err());
        assert!(CameraIntrinsics::new(45.0, 0.0, 100.0).is_err());
        assert!(CameraIntrinsics::new(45.0, 10.0, 1.0).is_err());
        assert!(CameraIntrinsics::new(f32::NAN, 0.1, 100.0).is_err());
    }

    #[test]
    fn wider_fov_widens_the_frustum() {
        let viewport = Viewport::new(800, 600).unwrap();
        let narrow = FrustumBounds::perspective(&viewport, &CameraIntrinsics::default());
        let wide = FrustumBounds::perspective(
            &viewport,
            &CameraIntrinsics::new(90.0, DEFAULT_NEAR, DEFAULT_FAR).unwrap(),
        );

        assert!(wide.top > narrow.top);
        // tan(45 deg) == 1
        assert_close(wide.top, DEFAULT_NEAR);
    }
}
