use crate::core::math::transform::translation_of;
use crate::scene::camera::Camera;
use crate::scene::light::{DirectionalLight, SpotLight};
use nalgebra::{Matrix4, Vector3};

/// Lighting and camera state for one shading pass.
///
/// Built once per frame, then only borrowed immutably while polygons are
/// shaded, so it can be shared across worker threads.
#[derive(Debug, Clone)]
pub struct Environment {
    pub directional_lights: Vec<DirectionalLight>,
    pub spot_lights: Vec<SpotLight>,
    /// Exponential fog density; 0.0 disables fog.
    pub fog_factor: f64,
    pub fog_color: Vector3<f64>,
    /// Rotation from the lighting (camera) frame back to world space.
    pub camera_rotation: Matrix4<f64>,
    /// Current model matrix of the camera; its translation re-centers sky-boxes.
    pub model_matrix: Matrix4<f64>,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            directional_lights: Vec::new(),
            spot_lights: Vec::new(),
            fog_factor: 0.0,
            fog_color: Vector3::zeros(),
            camera_rotation: Matrix4::identity(),
            model_matrix: Matrix4::identity(),
        }
    }
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes camera rotation and model matrix from `camera`.
    pub fn from_camera(camera: &Camera) -> Self {
        Self {
            camera_rotation: camera.camera_rotation(),
            model_matrix: camera.model_matrix(),
            ..Self::default()
        }
    }

    pub fn add_directional_light(&mut self, light: DirectionalLight) {
        self.directional_lights.push(light);
    }

    pub fn add_spot_light(&mut self, light: SpotLight) {
        self.spot_lights.push(light);
    }

    pub fn with_fog(mut self, factor: f64, color: Vector3<f64>) -> Self {
        self.fog_factor = factor;
        self.fog_color = color;
        self
    }

    pub fn camera_translation(&self) -> Vector3<f64> {
        translation_of(&self.model_matrix)
    }

    pub fn light_count(&self) -> usize {
        self.directional_lights.len() + self.spot_lights.len()
    }
}
