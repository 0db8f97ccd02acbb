use std::error::Error;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::projection::{CameraIntrinsics, ProjectionError};

const CONFIG_DIR: &str = ".config/gl_demos";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse(serde_json::Error),
    InvalidWindowSize { width: u32, height: u32 },
    InvalidCamera(ProjectionError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "couldn't read config file {}: {source}", path.display())
            }
            ConfigError::Parse(err) => write!(f, "couldn't parse config: {err}"),
            ConfigError::InvalidWindowSize { width, height } => {
                write!(f, "invalid window size {width}x{height}")
            }
            ConfigError::InvalidCamera(err) => write!(f, "invalid camera settings: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse(err) => Some(err),
            ConfigError::InvalidCamera(err) => Some(err),
            ConfigError::InvalidWindowSize { .. } => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            vsync: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CubeConfig {
    /// How far the cube is pushed away from the camera.
    pub distance: f32,
    /// Added to both rotation angles after every frame.
    pub rotation_step_degrees: f32,
}

impl Default for CubeConfig {
    fn default() -> Self {
        Self {
            distance: 5.0,
            rotation_step_degrees: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub window: WindowConfig,
    pub clear_color: [f32; 4],
    pub camera: CameraIntrinsics,
    pub cube: CubeConfig,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            clear_color: [0.0, 0.0, 0.0, 1.0],
            camera: CameraIntrinsics::default(),
            cube: CubeConfig::default(),
        }
    }
}

impl DemoConfig {
    /// Reads `path` if given, otherwise the user config file if it exists,
    /// otherwise falls back to the defaults.
    pub fn load(path: Option<&Path>) -> Result<DemoConfig, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match default_config_path() {
                Some(path) if path.is_file() => path,
                _ => return Ok(DemoConfig::default()),
            },
        };

        let file = File::open(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        let config: DemoConfig = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;

        Ok(config)
    }

    pub fn from_json_str(json: &str) -> Result<DemoConfig, ConfigError> {
        let config: DemoConfig = serde_json::from_str(json)?;
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::InvalidWindowSize {
                width: self.window.width,
                height: self.window.height,
            });
        }

        self.camera.validate().map_err(ConfigError::InvalidCamera)
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    let home = std::env::var_os("HOME")?;
    Some(PathBuf::from(home).join(CONFIG_DIR).join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn empty_json_gives_defaults() {
        let config = DemoConfig::from_json_str("{}").unwrap();
        assert_eq!(config, DemoConfig::default());
        assert_eq!(config.camera.fov_degrees, 45.0);
        assert_eq!(config.window.width, 800);
        assert_eq!(config.window.height, 600);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = DemoConfig::from_json_str(
            r#"{ "window": { "width": 1024 }, "camera": { "far": 50.0 } }"#,
        )
        .unwrap();

        assert_eq!(config.window.width, 1024);
        assert_eq!(config.window.height, 600);
        assert!(config.window.vsync);
        assert_eq!(config.camera.far, 50.0);
        assert_eq!(config.camera.near, 0.1);
        assert_eq!(config.cube, CubeConfig::default());
    }

    #[test]
    fn zero_window_size_is_rejected() {
        let err = DemoConfig::from_json_str(r#"{ "window": { "height": 0 } }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidWindowSize {
                width: 800,
                height: 0
            }
        ));
    }

    #[test]
    fn bad_camera_is_rejected() {
        let err =
            DemoConfig::from_json_str(r#"{ "camera": { "near": 5.0, "far": 1.0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidCamera(_)));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = DemoConfig::from_json_str("{ window: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn load_reads_explicit_path() {
        let path = std::env::temp_dir().join(format!(
            "gl_demos_config_test_{}.json",
            std::process::id()
        ));
        fs::write(&path, r#"{ "clear_color": [0.2, 0.3, 0.3, 1.0] }"#).unwrap();

        let config = DemoConfig::load(Some(&path));
        fs::remove_file(&path).unwrap();

        assert_eq!(config.unwrap().clear_color, [0.2, 0.3, 0.3, 1.0]);
    }

    #[test]
    fn load_missing_explicit_path_fails() {
        let path = Path::new("/nonexistent/gl_demos/config.json");
        let err = DemoConfig::load(Some(path)).unwrap_err();

        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/gl_demos/config.json"));
    }
}
