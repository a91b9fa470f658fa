use crate::core::polygon::Polygon;
use crate::pipeline::shaders::surface::SurfaceShader;
use crate::pipeline::shaders::unlit::ConstantVertexShader;
use crate::pipeline::shaders::{ShadeOutcome, VertexShader};
use crate::scene::environment::Environment;
use crate::scene::texture::Texture;
use std::sync::Arc;

/// Background geometry that travels with the camera.
///
/// Vertices are shifted by the negated camera translation before shading, so
/// the box stays centered on the viewer. Always opaque and unlit.
#[derive(Debug, Clone)]
pub struct SkyBoxShader {
    pub surface: SurfaceShader,
}

impl SkyBoxShader {
    pub fn new(texture: Option<Arc<Texture>>) -> Self {
        let surface = SurfaceShader::new(VertexShader::Constant(ConstantVertexShader::white()), true)
            .with_texture(texture);
        Self { surface }
    }

    pub fn shade_polygon(
        &self,
        polygon: &mut Polygon,
        environment: &Environment,
        vertex_colors: bool,
    ) -> ShadeOutcome {
        let offset = -environment.camera_translation();
        for vertex in polygon.vertices_mut() {
            let mut w = vertex.world();
            let weight = w.w;
            w.x += offset.x * weight;
            w.y += offset.y * weight;
            w.z += offset.z * weight;
            vertex.set_world(w);
        }

        let shaded = self.surface.shade_polygon(polygon, environment, vertex_colors);

        polygon.interpolate_alpha = self.interpolate_alpha();
        polygon.needs_sorting = self.needs_sorting();
        polygon.skybox = true;
        ShadeOutcome {
            interpolate_color: shaded.interpolate_color,
            needs_sorting: self.needs_sorting(),
        }
    }

    pub fn interpolate_color(&self, vertex_colors: bool) -> bool {
        self.surface.interpolate_color(vertex_colors)
    }

    pub fn interpolate_alpha(&self) -> bool {
        false
    }

    pub fn needs_sorting(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::transform::TransformFactory;
    use crate::core::vertex::VertexRecord;
    use approx::assert_relative_eq;
    use image::{DynamicImage, Rgba, RgbaImage};
    use nalgebra::{Vector3, Vector4};

    fn env_at(t: Vector3<f64>) -> Environment {
        let mut env = Environment::new();
        env.model_matrix = TransformFactory::translation(&t);
        env
    }

    #[test]
    fn test_vertices_follow_camera() {
        let t = Vector3::new(1.0, 2.0, 3.0);
        let vertices = vec![
            VertexRecord::new().with_world(nalgebra::Point3::new(10.0, 0.0, 0.0)),
            VertexRecord::new().with_world(nalgebra::Point3::new(0.0, 10.0, 0.0)),
            {
                // Homogeneous weight 2: the shift scales with it.
                let mut v = VertexRecord::new();
                v.set_world(Vector4::new(0.0, 0.0, 20.0, 2.0));
                v
            },
        ];
        let mut polygon = Polygon::new(vertices).unwrap();

        let outcome = SkyBoxShader::new(None).shade_polygon(&mut polygon, &env_at(t), false);

        assert_relative_eq!(polygon.vertex(0).world(), Vector4::new(9.0, -2.0, -3.0, 1.0));
        assert_relative_eq!(polygon.vertex(1).world(), Vector4::new(-1.0, 8.0, -3.0, 1.0));
        assert_relative_eq!(polygon.vertex(2).world(), Vector4::new(-2.0, -4.0, 14.0, 2.0));
        assert!(!outcome.needs_sorting);
        assert!(!polygon.interpolate_alpha);
        assert!(polygon.skybox);
    }

    #[test]
    fn test_translucent_texture_still_opaque() {
        let img = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 0]));
        let texture = Arc::new(Texture::from_image(DynamicImage::ImageRgba8(img)));
        let shader = SkyBoxShader::new(Some(texture));
        let mut polygon = Polygon::new(vec![VertexRecord::new(); 3]).unwrap();

        let outcome = shader.shade_polygon(&mut polygon, &Environment::new(), true);

        assert!(!outcome.needs_sorting);
        assert!(!polygon.needs_sorting);
        assert!(!polygon.interpolate_alpha);
        assert!(polygon.texture.is_some());
    }

    #[test]
    fn test_unlit_white() {
        let mut polygon = Polygon::new(vec![VertexRecord::new(); 3]).unwrap();
        SkyBoxShader::new(None).shade_polygon(&mut polygon, &Environment::new(), false);
        for v in polygon.vertices() {
            assert_eq!(v.color(), Vector3::repeat(1.0));
            assert_eq!(v.alpha(), 0.0);
        }
    }
}
