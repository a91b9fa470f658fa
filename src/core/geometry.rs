use nalgebra::{Point3, Vector2, Vector3, Vector4};

/// Represents a single mesh vertex in object space.
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    /// Position in local object space.
    pub position: Point3<f64>,
    /// Normal vector for lighting calculations.
    pub normal: Vector3<f64>,
    /// Texture coordinates (UV).
    pub texcoord: Vector2<f64>,
    /// Per-vertex RGBA color, if the source mesh carried one.
    /// Alpha follows the pipeline convention: 0.0 is opaque.
    pub color: Option<Vector4<f64>>,
}

impl Vertex {
    pub fn new(position: Point3<f64>, normal: Vector3<f64>, texcoord: Vector2<f64>) -> Self {
        Self {
            position,
            normal,
            texcoord,
            color: None,
        }
    }

    pub fn with_color(mut self, color: Vector4<f64>) -> Self {
        self.color = Some(color);
        self
    }
}
