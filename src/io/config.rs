use crate::error::Result;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub fog: FogConfig,
    #[serde(default)]
    pub lights: Vec<LightConfig>,
    #[serde(default)]
    pub objects: Vec<ObjectConfig>,
    pub sky: Option<SkyConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            render: RenderConfig::default(),
            camera: CameraConfig::default(),
            fog: FogConfig::default(),
            lights: vec![LightConfig {
                r#type: "directional".to_string(),
                direction: Some([-1.0, -2.0, -1.0]),
                ..LightConfig::default()
            }],
            objects: vec![ObjectConfig {
                path: "builtin:quad".to_string(),
                ..ObjectConfig::default()
            }],
            sky: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "default_width")]
    pub width: usize,
    #[serde(default = "default_height")]
    pub height: usize,
    /// Rendering hint: lit (Phong) or constant shading.
    #[serde(default = "default_true")]
    pub lighting: bool,
    /// Shade with mesh vertex colors where the mesh provides them.
    #[serde(default)]
    pub vertex_colors: bool,
    /// Worker threads for the shading pass; rayon's default when absent.
    pub threads: Option<usize>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            lighting: true,
            vertex_colors: false,
            threads: None,
        }
    }
}

fn default_width() -> usize {
    800
}
fn default_height() -> usize {
    600
}
fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct CameraConfig {
    #[serde(default = "default_camera_position")]
    pub position: [f64; 3],
    #[serde(default)]
    pub target: [f64; 3],
    #[serde(default = "default_up")]
    pub up: [f64; 3],
    /// Vertical field of view in degrees.
    #[serde(default = "default_fov")]
    pub fov: f64,
    #[serde(default = "default_near")]
    pub near: f64,
    #[serde(default = "default_far")]
    pub far: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: default_camera_position(),
            target: [0.0, 0.0, 0.0],
            up: default_up(),
            fov: default_fov(),
            near: default_near(),
            far: default_far(),
        }
    }
}

fn default_camera_position() -> [f64; 3] {
    [0.0, 0.0, 5.0]
}
fn default_up() -> [f64; 3] {
    [0.0, 1.0, 0.0]
}
fn default_fov() -> f64 {
    45.0
}
fn default_near() -> f64 {
    0.1
}
fn default_far() -> f64 {
    100.0
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FogConfig {
    /// Exponential density; 0.0 disables fog.
    #[serde(default)]
    pub factor: f64,
    #[serde(default)]
    pub color: [f64; 3],
}

/// A light in world space. `direction` is the direction the light travels.
#[derive(Debug, Clone, Deserialize)]
pub struct LightConfig {
    pub r#type: String,
    pub position: Option<[f64; 3]>,
    pub direction: Option<[f64; 3]>,
    #[serde(default = "default_white")]
    pub color: [f64; 3],
    #[serde(default = "default_intensity")]
    pub intensity: f64,
    /// Spot cone half-angle in degrees.
    pub cone_angle: Option<f64>,
    /// Width of the soft spot edge in degrees.
    #[serde(default)]
    pub cone_delta_angle: f64,
    pub attenuation: Option<[f64; 3]>,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            r#type: "directional".to_string(),
            position: None,
            direction: None,
            color: default_white(),
            intensity: default_intensity(),
            cone_angle: None,
            cone_delta_angle: 0.0,
            attenuation: None,
        }
    }
}

fn default_white() -> [f64; 3] {
    [1.0, 1.0, 1.0]
}
fn default_intensity() -> f64 {
    1.0
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObjectConfig {
    /// OBJ file, or `builtin:quad` / `builtin:triangle`.
    pub path: String,
    #[serde(default)]
    pub name: Option<String>,

    // --- Transform ---
    #[serde(default)]
    pub position: [f64; 3],
    #[serde(default)]
    pub rotation: [f64; 3],
    #[serde(default = "default_scale")]
    pub scale: [f64; 3],

    #[serde(default)]
    pub material: MaterialConfig,
}

impl Default for ObjectConfig {
    fn default() -> Self {
        Self {
            path: String::new(),
            name: None,
            position: [0.0; 3],
            rotation: [0.0; 3],
            scale: default_scale(),
            material: MaterialConfig::default(),
        }
    }
}

fn default_scale() -> [f64; 3] {
    [1.0, 1.0, 1.0]
}

/// Material table of an object. Unset values fall back to the surface defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct MaterialConfig {
    #[serde(default = "default_shader")]
    pub shader: String,
    pub diffuse_color: Option<[f64; 3]>,
    pub diffuse_coefficient: Option<f64>,
    pub specular_coefficient: Option<f64>,
    pub specular_exponent: Option<f64>,
    pub transparency: Option<f64>,
    pub smooth_shading: Option<bool>,
    pub texture: Option<String>,
    /// Six cube faces: +X, -X, +Y, -Y, +Z, -Z.
    pub reflection_map: Option<Vec<String>>,
    pub front: Option<Box<MaterialConfig>>,
    pub back: Option<Box<MaterialConfig>>,
}

impl Default for MaterialConfig {
    fn default() -> Self {
        Self {
            shader: default_shader(),
            diffuse_color: None,
            diffuse_coefficient: None,
            specular_coefficient: None,
            specular_exponent: None,
            transparency: None,
            smooth_shading: None,
            texture: None,
            reflection_map: None,
            front: None,
            back: None,
        }
    }
}

fn default_shader() -> String {
    "default".to_string()
}

/// Sky-box drawn behind everything else, following the camera.
#[derive(Debug, Clone, Deserialize)]
pub struct SkyConfig {
    /// Six cube faces: +X, -X, +Y, -Y, +Z, -Z.
    pub faces: Vec<String>,
    /// Half edge length of the cube around the viewer.
    #[serde(default = "default_sky_size")]
    pub size: f64,
}

fn default_sky_size() -> f64 {
    1.0
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}
