use crate::core::math::transform::transform_direction;
use crate::core::polygon::{Polygon, RasterEffect};
use crate::core::vertex::VertexRecord;
use crate::pipeline::shaders::phong::PhongVertexShader;
use crate::pipeline::shaders::unlit::ConstantVertexShader;
use crate::pipeline::shaders::{ShadeOutcome, VertexShader};
use crate::scene::environment::Environment;
use crate::scene::material::SurfaceMaterial;
use crate::scene::texture::{CubeMap, Texture};
use nalgebra::Matrix4;
use std::sync::Arc;

/// Single-sided surface shading: flat or smooth evaluation of a vertex shader,
/// plus texture, reflection-map and transparency bookkeeping.
///
/// Backs both the lit ([`VertexShader::Phong`]) and the unlit
/// ([`VertexShader::Constant`]) polygon shaders.
#[derive(Debug, Clone)]
pub struct SurfaceShader {
    pub vertex_shader: VertexShader,
    pub smooth_shading: bool,
    pub texture: Option<Arc<Texture>>,
    pub reflection_map: Option<Arc<CubeMap>>,
    pub effect: RasterEffect,
}

impl SurfaceShader {
    pub fn new(vertex_shader: VertexShader, smooth_shading: bool) -> Self {
        Self {
            vertex_shader,
            smooth_shading,
            texture: None,
            reflection_map: None,
            effect: RasterEffect::None,
        }
    }

    /// Lit surface for `material`, with its texture and reflection map attached.
    pub fn lit(material: &SurfaceMaterial) -> Self {
        Self::new(
            VertexShader::Phong(PhongVertexShader::from_material(material)),
            material.smooth_shading,
        )
        .with_attachments(material)
    }

    /// Unlit surface for `material`, with its texture and reflection map attached.
    pub fn constant(material: &SurfaceMaterial) -> Self {
        Self::new(
            VertexShader::Constant(ConstantVertexShader::from_material(material)),
            material.smooth_shading,
        )
        .with_attachments(material)
    }

    fn with_attachments(mut self, material: &SurfaceMaterial) -> Self {
        self.texture = material.texture.clone();
        self.reflection_map = material.reflection_map.clone();
        self
    }

    pub fn with_texture(mut self, texture: Option<Arc<Texture>>) -> Self {
        self.texture = texture;
        self
    }

    pub fn with_effect(mut self, effect: RasterEffect) -> Self {
        self.effect = effect;
        self
    }

    pub fn shade_polygon(
        &self,
        polygon: &mut Polygon,
        environment: &Environment,
        vertex_colors: bool,
    ) -> ShadeOutcome {
        let reflecting = self.smooth_shading && self.reflection_map.is_some();

        if self.smooth_shading {
            for vertex in polygon.vertices_mut() {
                self.vertex_shader.shade(vertex, environment, vertex_colors);
                if reflecting {
                    write_reflection_vector(vertex, &environment.camera_rotation);
                }
            }
        } else {
            polygon.update_center();
            self.vertex_shader
                .shade(polygon.center_mut(), environment, vertex_colors);
            let rgb = polygon.center().color();
            for vertex in polygon.vertices_mut() {
                vertex.set_color(rgb);
            }
        }

        polygon.transparency = self.vertex_shader.transparency();
        polygon.texture = self.texture.clone();
        polygon.interpolate_alpha = self.vertex_shader.interpolate_alpha(vertex_colors);
        polygon.skybox = false;
        polygon.reflection_vectors = reflecting;
        polygon.effect = self.effect;

        let outcome = ShadeOutcome {
            interpolate_color: self.interpolate_color(vertex_colors),
            needs_sorting: self.needs_sorting(vertex_colors),
        };
        polygon.interpolate_color = outcome.interpolate_color;
        polygon.needs_sorting = outcome.needs_sorting;
        outcome
    }

    pub fn interpolate_color(&self, vertex_colors: bool) -> bool {
        self.smooth_shading || vertex_colors
    }

    /// Translucent material, translucent texture or per-vertex alpha all
    /// require back-to-front ordering.
    pub fn needs_sorting(&self, vertex_colors: bool) -> bool {
        self.vertex_shader.transparency() != 0.0
            || self.texture.as_ref().is_some_and(|t| t.is_transparent())
            || self.vertex_shader.interpolate_alpha(vertex_colors)
    }
}

/// Mirrors the view ray at the surface and rotates it into world space.
/// A zero-length normal yields NaN.
#[inline]
fn write_reflection_vector(vertex: &mut VertexRecord, camera_rotation: &Matrix4<f64>) {
    let n = vertex.normal();
    let w = vertex.world().xyz();
    let ff = w.dot(&n) / n.dot(&n);
    let reflected = n * (-2.0 * ff) + w;
    vertex.set_reflection(transform_direction(camera_rotation, &reflected));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::transform::TransformFactory;
    use crate::scene::light::DirectionalLight;
    use approx::assert_relative_eq;
    use image::{DynamicImage, Rgba, RgbaImage};
    use nalgebra::{Point3, Vector3};
    use std::f64::consts::FRAC_PI_2;

    fn material(rgb: [f64; 3], smooth: bool) -> SurfaceMaterial {
        SurfaceMaterial {
            diffuse_color: Vector3::from(rgb),
            specular_coefficient: 0.0,
            smooth_shading: smooth,
            ..SurfaceMaterial::default()
        }
    }

    fn head_on_light() -> Environment {
        let mut env = Environment::new();
        env.add_directional_light(DirectionalLight::new(
            Vector3::new(0.0, 0.0, -1.0),
            Vector3::repeat(1.0),
            1.0,
        ));
        env
    }

    fn triangle(normals: [Vector3<f64>; 3]) -> Polygon {
        let positions = [
            Point3::new(-1.0, -1.0, -5.0),
            Point3::new(1.0, -1.0, -5.0),
            Point3::new(0.0, 1.0, -5.0),
        ];
        let vertices = positions
            .iter()
            .zip(normals.iter())
            .map(|(p, n)| VertexRecord::new().with_world(*p).with_normal(*n))
            .collect();
        Polygon::new(vertices).unwrap()
    }

    fn texture(alpha: u8) -> Arc<Texture> {
        let img = RgbaImage::from_pixel(1, 1, Rgba([255, 255, 255, alpha]));
        Arc::new(Texture::from_image(DynamicImage::ImageRgba8(img)))
    }

    fn reflection_map() -> Arc<CubeMap> {
        Arc::new(CubeMap::new(std::array::from_fn(|_| texture(255))))
    }

    #[test]
    fn test_flat_broadcasts_center_color() {
        let shader = SurfaceShader::lit(&material([0.8, 0.6, 0.4], false));
        let tilted = Vector3::new(0.6, 0.0, 0.8);
        let mut polygon = triangle([Vector3::z(), tilted, -tilted]);
        polygon.set_face_normal(Vector3::z());

        let outcome = shader.shade_polygon(&mut polygon, &head_on_light(), false);

        for v in polygon.vertices() {
            assert_relative_eq!(v.color(), Vector3::new(0.8, 0.6, 0.4), epsilon = 1e-12);
        }
        // Per-vertex geometry is left alone.
        assert_eq!(polygon.vertex(1).normal(), tilted);
        assert!(!outcome.interpolate_color);
        assert!(!polygon.interpolate_color);
    }

    #[test]
    fn test_smooth_uniform_lighting_converges() {
        let shader = SurfaceShader::lit(&material([0.8, 0.6, 0.4], true));
        let mut polygon = triangle([Vector3::z(); 3]);

        let outcome = shader.shade_polygon(&mut polygon, &head_on_light(), false);

        let first = polygon.vertex(0).color();
        for v in polygon.vertices() {
            assert_relative_eq!(v.color(), first, epsilon = 1e-12);
        }
        assert_relative_eq!(first, Vector3::new(0.8, 0.6, 0.4), epsilon = 1e-12);
        assert!(outcome.interpolate_color);
    }

    #[test]
    fn test_smooth_follows_vertex_normals() {
        let shader = SurfaceShader::lit(&material([1.0, 1.0, 1.0], true));
        let tilted = Vector3::new(0.6, 0.0, 0.8);
        let mut polygon = triangle([Vector3::z(), tilted, tilted]);

        shader.shade_polygon(&mut polygon, &head_on_light(), false);

        assert_relative_eq!(polygon.vertex(0).color().x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(polygon.vertex(1).color().x, 0.8, epsilon = 1e-12);
    }

    #[test]
    fn test_reflection_vectors_use_separate_slots() {
        let mut m = material([1.0, 1.0, 1.0], true);
        m.reflection_map = Some(reflection_map());
        let shader = SurfaceShader::lit(&m);
        let mut polygon = triangle([Vector3::z(); 3]);
        let mut env = head_on_light();
        env.camera_rotation = TransformFactory::rotation_y(FRAC_PI_2);

        shader.shade_polygon(&mut polygon, &env, false);

        assert!(polygon.reflection_vectors);
        let v = polygon.vertex(0);
        assert_eq!(v.normal(), Vector3::z());
        // w = (-1, -1, -5): mirrored at the z = const plane gives (-1, -1, 5),
        // then rotated by 90 degrees around y.
        assert_relative_eq!(v.reflection(), Vector3::new(5.0, -1.0, 1.0), epsilon = 1e-12);
    }

    #[test]
    fn test_flat_shading_skips_reflection_vectors() {
        let mut m = material([1.0, 1.0, 1.0], false);
        m.reflection_map = Some(reflection_map());
        let mut polygon = triangle([Vector3::z(); 3]);
        SurfaceShader::lit(&m).shade_polygon(&mut polygon, &head_on_light(), false);
        assert!(!polygon.reflection_vectors);
    }

    #[test]
    fn test_sorting_policy() {
        let env = head_on_light();

        let opaque = SurfaceShader::lit(&material([1.0, 1.0, 1.0], true));
        assert!(!opaque.needs_sorting(false));
        assert!(opaque.needs_sorting(true));

        let mut glassy = material([1.0, 1.0, 1.0], true);
        glassy.transparency = 0.5;
        let mut polygon = triangle([Vector3::z(); 3]);
        let outcome = SurfaceShader::lit(&glassy).shade_polygon(&mut polygon, &env, false);
        assert!(outcome.needs_sorting);
        assert!(polygon.needs_sorting);
        assert_relative_eq!(polygon.transparency, 0.5);

        let textured = opaque.clone().with_texture(Some(texture(128)));
        assert!(textured.needs_sorting(false));
        let solid_texture = opaque.with_texture(Some(texture(255)));
        assert!(!solid_texture.needs_sorting(false));
    }

    #[test]
    fn test_metadata_written() {
        let mut m = material([1.0, 1.0, 1.0], false);
        let tex = texture(255);
        m.texture = Some(tex.clone());
        let shader = SurfaceShader::constant(&m).with_effect(RasterEffect::Etch);
        let mut polygon = triangle([Vector3::z(); 3]);
        polygon.skybox = true;

        let outcome = shader.shade_polygon(&mut polygon, &Environment::new(), true);

        assert!(!polygon.skybox);
        assert!(polygon.interpolate_alpha);
        assert!(outcome.interpolate_color);
        assert_eq!(polygon.effect, RasterEffect::Etch);
        assert!(polygon.texture.as_ref().is_some_and(|t| Arc::ptr_eq(t, &tex)));
    }

    #[test]
    fn test_constant_flat_ignores_lights() {
        let shader = SurfaceShader::constant(&material([0.3, 0.2, 0.1], false));
        let mut polygon = triangle([Vector3::z(); 3]);
        shader.shade_polygon(&mut polygon, &Environment::new(), false);
        for v in polygon.vertices() {
            assert_relative_eq!(v.color(), Vector3::new(0.3, 0.2, 0.1), epsilon = 1e-12);
        }
    }
}
