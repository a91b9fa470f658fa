use crate::core::vertex::VertexRecord;
use crate::scene::material::SurfaceMaterial;
use nalgebra::Vector3;

/// Writes a fixed material color, ignoring lights and fog.
#[derive(Debug, Clone)]
pub struct ConstantVertexShader {
    pub color: Vector3<f64>,
    pub transparency: f64,
}

impl ConstantVertexShader {
    pub fn new(color: Vector3<f64>, transparency: f64) -> Self {
        Self {
            color,
            transparency,
        }
    }

    pub fn from_material(material: &SurfaceMaterial) -> Self {
        Self::new(material.base_color(), material.transparency)
    }

    /// Opaque white, used for sky-boxes whose look comes from the texture.
    pub fn white() -> Self {
        Self::new(Vector3::repeat(1.0), 0.0)
    }

    /// Leaves the vertex untouched when its own colors are requested.
    #[inline]
    pub fn shade(&self, vertex: &mut VertexRecord, vertex_colors: bool) {
        if vertex_colors {
            return;
        }
        vertex.set_color(self.color);
        vertex.set_alpha(self.transparency);
    }
}
