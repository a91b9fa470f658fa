use crate::scene::camera::Camera;
use crate::scene::environment::Environment;
use crate::scene::material::RenderingHints;
use crate::scene::scene_object::SceneObject;

/// Holds all scene resources required for a shading pass.
pub struct ShadingContext {
    pub camera: Camera,
    pub environment: Environment,
    pub hints: RenderingHints,
    pub objects: Vec<SceneObject>,
}

impl ShadingContext {
    pub fn polygon_count(&self) -> usize {
        self.objects.iter().map(|o| o.polygons.len()).sum()
    }
}
