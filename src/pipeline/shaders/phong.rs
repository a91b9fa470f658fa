use crate::core::vertex::VertexRecord;
use crate::scene::environment::Environment;
use crate::scene::material::SurfaceMaterial;
use nalgebra::Vector3;

/// Multi-light diffuse + specular vertex shader with exponential distance fog.
///
/// There is no ambient term: a vertex that no light reaches is black (or the
/// fog color, once fog is applied). Colors are not clamped here.
#[derive(Debug, Clone)]
pub struct PhongVertexShader {
    /// Diffuse color already scaled by the diffuse coefficient.
    pub base_color: Vector3<f64>,
    pub specular_coefficient: f64,
    pub specular_exponent: f64,
    /// 0.0 = opaque.
    pub transparency: f64,
}

impl PhongVertexShader {
    pub fn new(
        base_color: Vector3<f64>,
        specular_coefficient: f64,
        specular_exponent: f64,
        transparency: f64,
    ) -> Self {
        Self {
            base_color,
            specular_coefficient,
            specular_exponent,
            transparency,
        }
    }

    pub fn from_material(material: &SurfaceMaterial) -> Self {
        Self::new(
            material.base_color(),
            material.specular_coefficient,
            material.specular_exponent,
            material.transparency,
        )
    }

    pub fn shade(&self, vertex: &mut VertexRecord, environment: &Environment, vertex_colors: bool) {
        let n = vertex.normal();
        let w = vertex.world();
        let p = w.xyz();

        // Light the side of the surface that faces the viewer at the origin,
        // whatever the authored winding of the normal.
        let normalflip = if p.dot(&n) * w.w <= 0.0 { 1.0 } else { -1.0 };

        let mut diffuse = Vector3::zeros();
        let mut specular = Vector3::zeros();

        for light in &environment.directional_lights {
            self.accumulate(
                &n,
                &light.to_light(),
                normalflip,
                &(light.color * light.intensity),
                &mut diffuse,
                &mut specular,
            );
        }

        let point = p / w.w;
        for spot in &environment.spot_lights {
            let to_light = spot.source.coords - point;
            let dst = to_light.norm();
            let l = to_light / dst;

            let cone = spot.cone_factor(-l.dot(&spot.direction));
            if cone <= 0.0 {
                continue;
            }
            let intensity = spot.attenuated_intensity(dst) * cone;
            self.accumulate(
                &n,
                &l,
                normalflip,
                &(spot.color * intensity),
                &mut diffuse,
                &mut specular,
            );
        }

        let (base, alpha) = if vertex_colors {
            (vertex.color(), vertex.alpha())
        } else {
            (self.base_color, self.transparency)
        };
        let mut color = base.component_mul(&diffuse) + specular * self.specular_coefficient;

        if environment.fog_factor != 0.0 {
            let blend = (-point.norm() * environment.fog_factor).exp();
            color = color * blend + environment.fog_color * (1.0 - blend);
        }

        vertex.set_color(color);
        vertex.set_alpha(alpha);
    }

    /// Adds one light's contribution. `l` points from the surface to the light
    /// and `radiance` is the light color already scaled by its intensity.
    #[inline]
    fn accumulate(
        &self,
        n: &Vector3<f64>,
        l: &Vector3<f64>,
        normalflip: f64,
        radiance: &Vector3<f64>,
        diffuse: &mut Vector3<f64>,
        specular: &mut Vector3<f64>,
    ) {
        let ntl = n.dot(l);
        let fac = normalflip * ntl;
        if fac < 0.0 {
            return;
        }
        *diffuse += radiance * fac;

        // z of the mirrored light vector: the viewer looks along the z axis.
        let t = 2.0 * ntl * n.z - l.z;
        if t > 0.0 {
            *specular += radiance * t.powf(self.specular_exponent);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::light::{DirectionalLight, SpotLight};
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    fn matte(rgb: [f64; 3]) -> PhongVertexShader {
        PhongVertexShader::new(Vector3::from(rgb), 0.0, 60.0, 0.0)
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

    fn facing_vertex(z: f64) -> VertexRecord {
        VertexRecord::new()
            .with_world(Point3::new(0.0, 0.0, z))
            .with_normal(Vector3::z())
    }

    #[test]
    fn test_head_on_directional_light() {
        let shader = matte([0.4, 0.4, 0.6]);
        let mut v = facing_vertex(-5.0);
        shader.shade(&mut v, &head_on_light(), false);

        assert_relative_eq!(v.color(), Vector3::new(0.4, 0.4, 0.6), epsilon = 1e-12);
        assert_relative_eq!(v.alpha(), 0.0);
    }

    #[test]
    fn test_light_from_hidden_side_adds_nothing() {
        let mut env = Environment::new();
        env.add_directional_light(DirectionalLight::new(Vector3::z(), Vector3::repeat(1.0), 1.0));

        let shader = PhongVertexShader::new(Vector3::repeat(1.0), 1.0, 1.0, 0.0);
        let mut v = facing_vertex(-5.0);
        shader.shade(&mut v, &env, false);

        assert_eq!(v.color(), Vector3::zeros());
    }

    #[test]
    fn test_normal_pointing_away_is_flipped() {
        let shader = matte([1.0, 0.5, 0.25]);
        let mut v = facing_vertex(-5.0).with_normal(-Vector3::z());
        shader.shade(&mut v, &head_on_light(), false);

        assert_relative_eq!(v.color(), Vector3::new(1.0, 0.5, 0.25), epsilon = 1e-12);
    }

    #[test]
    fn test_specular_highlight_head_on() {
        let shader = PhongVertexShader::new(Vector3::new(0.2, 0.2, 0.2), 0.5, 60.0, 0.0);
        let mut v = facing_vertex(-5.0);
        shader.shade(&mut v, &head_on_light(), false);

        // t = 2 * 1 * 1 - 1 = 1, so the highlight is the full coefficient.
        assert_relative_eq!(v.color(), Vector3::repeat(0.7), epsilon = 1e-12);
    }

    #[test]
    fn test_no_lights_is_black() {
        let shader = matte([0.4, 0.4, 0.6]);
        let mut v = facing_vertex(-5.0);
        shader.shade(&mut v, &Environment::new(), false);
        assert_eq!(v.color(), Vector3::zeros());
    }

    #[test]
    fn test_fog_at_origin_keeps_color() {
        let env = head_on_light().with_fog(0.5, Vector3::new(1.0, 0.0, 0.0));
        let shader = matte([0.4, 0.4, 0.6]);
        let mut v = facing_vertex(0.0);
        shader.shade(&mut v, &env, false);

        assert_relative_eq!(v.color(), Vector3::new(0.4, 0.4, 0.6), epsilon = 1e-12);
    }

    #[test]
    fn test_fog_far_away_converges_to_fog_color() {
        let fog = Vector3::new(0.7, 0.8, 0.9);
        let env = head_on_light().with_fog(0.5, fog);
        let shader = matte([0.4, 0.4, 0.6]);
        let mut v = facing_vertex(-1.0e4);
        shader.shade(&mut v, &env, false);

        assert_relative_eq!(v.color(), fog, epsilon = 1e-9);
    }

    #[test]
    fn test_fog_blend_is_exponential() {
        let env = head_on_light().with_fog(0.1, Vector3::zeros());
        let shader = matte([1.0, 1.0, 1.0]);
        let mut v = facing_vertex(-2.0);
        shader.shade(&mut v, &env, false);

        assert_relative_eq!(v.color().x, (-0.2f64).exp(), epsilon = 1e-12);
    }

    /// Vertex at `angle_deg` off the axis of a spot at the origin pointing down -Z,
    /// with its normal facing the light.
    fn spot_vertex(angle_deg: f64) -> VertexRecord {
        let a = angle_deg.to_radians();
        let p = Point3::new(a.sin(), 0.0, -a.cos());
        VertexRecord::new().with_world(p).with_normal(-p.coords)
    }

    fn spot_env(cone_deg: f64, delta_deg: f64) -> Environment {
        let mut env = Environment::new();
        env.add_spot_light(SpotLight::new(
            Point3::origin(),
            -Vector3::z(),
            cone_deg.to_radians(),
            delta_deg.to_radians(),
            Vector3::repeat(1.0),
            1.0,
        ));
        env
    }

    #[test]
    fn test_spot_outside_cone_contributes_nothing() {
        let env = spot_env(30.0, 0.0);
        let shader = matte([1.0, 1.0, 1.0]);

        let mut inside = spot_vertex(29.0);
        shader.shade(&mut inside, &env, false);
        assert_relative_eq!(inside.color().x, 1.0, epsilon = 1e-12);

        let mut outside = spot_vertex(30.5);
        shader.shade(&mut outside, &env, false);
        assert_eq!(outside.color(), Vector3::zeros());
    }

    #[test]
    fn test_spot_soft_edge_scales_linearly() {
        let env = spot_env(30.0, 10.0);
        let shader = matte([1.0, 1.0, 1.0]);

        let mut core = spot_vertex(5.0);
        shader.shade(&mut core, &env, false);
        assert_relative_eq!(core.color().x, 1.0, epsilon = 1e-12);

        let mut edge = spot_vertex(25.0);
        shader.shade(&mut edge, &env, false);
        assert_relative_eq!(edge.color().x, 0.5, epsilon = 1e-9);

        let mut rim = spot_vertex(27.5);
        shader.shade(&mut rim, &env, false);
        assert_relative_eq!(rim.color().x, 0.25, epsilon = 1e-9);
    }

    #[test]
    fn test_spot_distance_attenuation() {
        let mut env = Environment::new();
        env.add_spot_light(
            SpotLight::new_point(Point3::new(0.0, 0.0, 2.0), Vector3::repeat(1.0), 1.0)
                .with_attenuation(0.0, 0.0, 1.0),
        );
        let shader = matte([1.0, 1.0, 1.0]);
        let mut v = VertexRecord::new()
            .with_world(Point3::origin())
            .with_normal(Vector3::z());
        shader.shade(&mut v, &env, false);

        assert_relative_eq!(v.color().x, 0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_vertex_colors_replace_material() {
        let shader = PhongVertexShader::new(Vector3::repeat(1.0), 0.0, 1.0, 0.3);
        let mut v = facing_vertex(-5.0).with_color(Vector3::new(0.1, 0.2, 0.3), 0.6);
        shader.shade(&mut v, &head_on_light(), true);

        assert_relative_eq!(v.color(), Vector3::new(0.1, 0.2, 0.3), epsilon = 1e-12);
        assert_relative_eq!(v.alpha(), 0.6);
    }

    #[test]
    fn test_material_transparency_written_to_alpha() {
        let shader = PhongVertexShader::new(Vector3::repeat(1.0), 0.0, 1.0, 0.3);
        let mut v = facing_vertex(-5.0).with_color(Vector3::zeros(), 0.9);
        shader.shade(&mut v, &head_on_light(), false);
        assert_relative_eq!(v.alpha(), 0.3);
    }
}
