use crate::core::polygon::Polygon;
use crate::pipeline::shaders::PolygonShader;

/// Polygons sharing one material, ready for a shading pass.
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub name: String,
    pub polygons: Vec<Polygon>,
    pub shader: PolygonShader,
    /// Shade with the polygons' own vertex colors instead of the material color.
    pub vertex_colors: bool,
}

impl SceneObject {
    pub fn new(name: &str, polygons: Vec<Polygon>, shader: PolygonShader, vertex_colors: bool) -> Self {
        Self {
            name: name.to_string(),
            polygons,
            shader,
            vertex_colors,
        }
    }
}
