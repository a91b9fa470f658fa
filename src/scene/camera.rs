use crate::core::math::transform::TransformFactory;
use nalgebra::{Matrix4, Point3, Vector3};

/// Perspective look-at camera.
///
/// Besides view and projection it exposes the two matrices the shading
/// environment needs: the camera-to-world rotation and the camera model matrix.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Point3<f64>,
    pub target: Point3<f64>,
    pub up: Vector3<f64>,
    pub fov_y_rad: f64,
    pub aspect_ratio: f64,
    pub near: f64,
    pub far: f64,

    // --- Cached Matrices ---
    view_matrix: Matrix4<f64>,
    projection_matrix: Matrix4<f64>,
    rotation: Matrix4<f64>,
}

impl Camera {
    pub fn new_perspective(
        position: Point3<f64>,
        target: Point3<f64>,
        up: Vector3<f64>,
        fov_y_rad: f64,
        aspect_ratio: f64,
        near: f64,
        far: f64,
    ) -> Self {
        let mut cam = Self {
            position,
            target,
            up,
            fov_y_rad,
            aspect_ratio,
            near,
            far,
            view_matrix: Matrix4::identity(),
            projection_matrix: Matrix4::identity(),
            rotation: Matrix4::identity(),
        };
        cam.update_matrices();
        cam
    }

    /// Recalculates the cached matrices from the current parameters.
    pub fn update_matrices(&mut self) {
        let look = TransformFactory::look_rotation(&self.position, &self.target, &self.up);
        // Orthonormal, so the inverse is the transpose.
        self.rotation = look.transpose();
        self.view_matrix = look * TransformFactory::translation(&-self.position.coords);
        self.projection_matrix =
            TransformFactory::perspective(self.aspect_ratio, self.fov_y_rad, self.near, self.far);
    }

    pub fn view_matrix(&self) -> Matrix4<f64> {
        self.view_matrix
    }

    pub fn projection_matrix(&self) -> Matrix4<f64> {
        self.projection_matrix
    }

    /// Camera-to-world rotation (no translation).
    pub fn camera_rotation(&self) -> Matrix4<f64> {
        self.rotation
    }

    /// Camera-to-world transform: rotation followed by the eye translation.
    pub fn model_matrix(&self) -> Matrix4<f64> {
        TransformFactory::translation(&self.position.coords) * self.rotation
    }
}
