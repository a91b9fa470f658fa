use crate::core::math::transform::{TransformFactory, transform_direction};
use crate::error::Result;
use crate::io::config::{Config, LightConfig, MaterialConfig, ObjectConfig};
use crate::io::obj_loader::load_obj;
use crate::pipeline::factory::ShaderFactory;
use crate::scene::camera::Camera;
use crate::scene::context::ShadingContext;
use crate::scene::environment::Environment;
use crate::scene::light::{DirectionalLight, SpotLight};
use crate::scene::material::{Appearance, RenderingHints, SurfaceMaterial};
use crate::scene::mesh::{Mesh, ProjectionSetup};
use crate::scene::scene_object::SceneObject;
use crate::scene::sky::build_sky;
use crate::scene::texture::{CubeMap, Texture};
use log::{debug, error, info, warn};
use nalgebra::{Matrix4, Point3, Vector3};
use std::collections::HashMap;
use std::sync::Arc;

const DEFAULT_SPOT_CONE_DEG: f64 = 30.0;

/// Textures already decoded during this load, keyed by path.
#[derive(Default)]
pub struct TextureCache {
    textures: HashMap<String, Arc<Texture>>,
}

impl TextureCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Failed loads are logged and yield `None`.
    pub fn get(&mut self, path: &str) -> Option<Arc<Texture>> {
        if let Some(texture) = self.textures.get(path) {
            return Some(Arc::clone(texture));
        }
        match Texture::load(path) {
            Ok(texture) => {
                let texture = Arc::new(texture);
                self.textures.insert(path.to_string(), Arc::clone(&texture));
                Some(texture)
            }
            Err(e) => {
                warn!("Failed to load texture '{}': {}", path, e);
                None
            }
        }
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

pub fn build_camera(config: &Config) -> Camera {
    let aspect_ratio = config.render.width as f64 / config.render.height.max(1) as f64;
    Camera::new_perspective(
        Point3::from(config.camera.position),
        Point3::from(config.camera.target),
        Vector3::from(config.camera.up),
        config.camera.fov.to_radians(),
        aspect_ratio,
        config.camera.near,
        config.camera.far,
    )
}

/// Lights from the config, moved from world space into the camera frame.
pub fn build_environment(config: &Config, camera: &Camera) -> Environment {
    let view = camera.view_matrix();
    let mut environment = Environment::from_camera(camera)
        .with_fog(config.fog.factor, Vector3::from(config.fog.color));

    for light in &config.lights {
        add_light(&mut environment, light, &view);
    }

    debug!(
        "Environment: {} directional, {} spot/point lights, fog {}",
        environment.directional_lights.len(),
        environment.spot_lights.len(),
        environment.fog_factor
    );
    environment
}

fn add_light(environment: &mut Environment, light: &LightConfig, view: &Matrix4<f64>) {
    let color = Vector3::from(light.color);
    let to_eye = |p: [f64; 3]| Point3::from((view * Point3::from(p).to_homogeneous()).xyz());

    match light.r#type.as_str() {
        "directional" => match light.direction {
            Some(dir) => {
                let direction = transform_direction(view, &Vector3::from(dir));
                environment.add_directional_light(DirectionalLight::new(direction, color, light.intensity));
            }
            None => warn!("Directional light without direction ignored."),
        },
        "spot" => match (light.position, light.direction) {
            (Some(pos), Some(dir)) => {
                let direction = transform_direction(view, &Vector3::from(dir));
                let cone = light.cone_angle.unwrap_or(DEFAULT_SPOT_CONE_DEG).to_radians();
                let spot = SpotLight::new(
                    to_eye(pos),
                    direction,
                    cone,
                    light.cone_delta_angle.to_radians(),
                    color,
                    light.intensity,
                );
                environment.add_spot_light(with_attenuation(spot, light.attenuation));
            }
            _ => warn!("Spot light needs both position and direction; ignored."),
        },
        "point" => match light.position {
            Some(pos) => {
                let point = SpotLight::new_point(to_eye(pos), color, light.intensity);
                environment.add_spot_light(with_attenuation(point, light.attenuation));
            }
            None => warn!("Point light without position ignored."),
        },
        other => warn!("Unknown light type '{}' ignored.", other),
    }
}

fn with_attenuation(light: SpotLight, attenuation: Option<[f64; 3]>) -> SpotLight {
    match attenuation {
        Some([a0, a1, a2]) => light.with_attenuation(a0, a1, a2),
        None => light,
    }
}

/// Numeric surface values of a material table, without textures.
fn surface_constants(config: &MaterialConfig) -> SurfaceMaterial {
    let defaults = SurfaceMaterial::default();
    SurfaceMaterial {
        diffuse_color: config.diffuse_color.map(Vector3::from).unwrap_or(defaults.diffuse_color),
        diffuse_coefficient: config.diffuse_coefficient.unwrap_or(defaults.diffuse_coefficient),
        specular_coefficient: config.specular_coefficient.unwrap_or(defaults.specular_coefficient),
        specular_exponent: config.specular_exponent.unwrap_or(defaults.specular_exponent),
        transparency: config.transparency.unwrap_or(defaults.transparency),
        smooth_shading: config.smooth_shading.unwrap_or(defaults.smooth_shading),
        ..defaults
    }
}

fn surface_material(config: &MaterialConfig, textures: &mut TextureCache) -> SurfaceMaterial {
    let reflection_map = config.reflection_map.as_ref().and_then(|paths| {
        CubeMap::load(paths)
            .map(Arc::new)
            .map_err(|e| warn!("Failed to load reflection map: {}", e))
            .ok()
    });

    SurfaceMaterial {
        texture: config.texture.as_deref().and_then(|p| textures.get(p)),
        reflection_map,
        ..surface_constants(config)
    }
}

/// Turns a material table into a declarative appearance.
///
/// A `twoSide` side without its own table inherits the outer values.
pub fn resolve_appearance(config: &MaterialConfig, textures: &mut TextureCache) -> Appearance {
    match config.shader.as_str() {
        "default" => Appearance::Default(surface_material(config, textures)),
        "hatch" => Appearance::Hatch(surface_material(config, textures)),
        "invert" => Appearance::Invert(surface_material(config, textures)),
        "etch" => Appearance::Etch(surface_material(config, textures)),
        "twoSide" => {
            let mut side = |child: &Option<Box<MaterialConfig>>| match child {
                Some(c) => resolve_appearance(c, textures),
                None => Appearance::Default(surface_material(config, textures)),
            };
            let front = side(&config.front);
            let back = side(&config.back);
            Appearance::two_sided(front, back)
        }
        other => Appearance::Custom(other.to_string()),
    }
}

fn load_mesh(object: &ObjectConfig) -> Mesh {
    match object.path.as_str() {
        "builtin:quad" => Mesh::create_test_quad(),
        "builtin:triangle" => Mesh::create_test_triangle(),
        path => load_obj(path).unwrap_or_else(|e| {
            error!("Error loading model '{}': {}. Using fallback mesh.", path, e);
            Mesh::create_test_triangle()
        }),
    }
}

/// Loads meshes and materials and assembles everything a shading pass needs.
///
/// Objects whose material has no polygon shader are skipped with a warning.
pub fn init_shading_context(config: &Config) -> Result<ShadingContext> {
    let camera = build_camera(config);
    let environment = build_environment(config, &camera);
    let hints = RenderingHints {
        lighting_enabled: config.render.lighting,
    };

    let mut textures = TextureCache::new();
    let mut objects = Vec::with_capacity(config.objects.len());

    for object in &config.objects {
        let name = object.name.clone().unwrap_or_else(|| object.path.clone());
        let appearance = resolve_appearance(&object.material, &mut textures);
        let Some(shader) = ShaderFactory::create_from(&appearance, &hints) else {
            warn!(
                "Object '{}': unsupported material shader '{}', skipped.",
                name, object.material.shader
            );
            continue;
        };

        let mesh = load_mesh(object);
        let setup = ProjectionSetup {
            model: TransformFactory::model(
                &Vector3::from(object.position),
                &Vector3::from(object.rotation),
                &Vector3::from(object.scale),
            ),
            view: camera.view_matrix(),
            projection: camera.projection_matrix(),
            width: config.render.width as f64,
            height: config.render.height as f64,
        };
        let base = surface_constants(&object.material);
        let default_color = base.base_color().push(base.transparency);
        let polygons = mesh.to_polygons(&setup, &default_color)?;

        let vertex_colors = config.render.vertex_colors && mesh.has_vertex_colors();
        if config.render.vertex_colors && !vertex_colors {
            debug!("Object '{}' has no vertex colors; using material color.", name);
        }

        objects.push(SceneObject::new(&name, polygons, shader, vertex_colors));
    }

    if let Some(sky) = &config.sky {
        match CubeMap::load(&sky.faces) {
            Ok(cube) => objects.extend(build_sky(
                &cube,
                sky.size,
                &camera,
                config.render.width as f64,
                config.render.height as f64,
            )?),
            Err(e) => warn!("Failed to load sky-box, drawing without it: {}", e),
        }
    }

    info!(
        "Scene initialized with {} objects, {} textures.",
        objects.len(),
        textures.len()
    );

    Ok(ShadingContext {
        camera,
        environment,
        hints,
        objects,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::shaders::ShaderKind;
    use approx::assert_relative_eq;

    fn parse(toml_src: &str) -> Config {
        toml::from_str(toml_src).unwrap()
    }

    #[test]
    fn test_lights_move_into_camera_frame() {
        let config = parse(
            r#"
            [camera]
            position = [0.0, 0.0, 5.0]

            [[lights]]
            type = "directional"
            direction = [0.0, 0.0, -1.0]

            [[lights]]
            type = "point"
            position = [0.0, 0.0, 3.0]
            attenuation = [1.0, 0.5, 0.0]
            "#,
        );
        let camera = build_camera(&config);
        let env = build_environment(&config, &camera);

        assert_eq!(env.light_count(), 2);
        assert_relative_eq!(env.directional_lights[0].direction, -Vector3::z(), epsilon = 1e-12);
        let point = &env.spot_lights[0];
        assert_relative_eq!(point.source, Point3::new(0.0, 0.0, -2.0), epsilon = 1e-12);
        assert_eq!(point.attenuation, (1.0, 0.5, 0.0));
        assert_relative_eq!(env.camera_translation(), Vector3::new(0.0, 0.0, 5.0), epsilon = 1e-12);
    }

    #[test]
    fn test_appearance_resolution() {
        let mut textures = TextureCache::new();
        let config: MaterialConfig = toml::from_str(
            r#"
            shader = "twoSide"
            diffuse_color = [0.0, 1.0, 0.0]
            [back]
            shader = "etch"
            "#,
        )
        .unwrap();

        let Appearance::TwoSided { front, back } = resolve_appearance(&config, &mut textures) else {
            panic!("expected two-sided appearance");
        };
        let Appearance::Default(front) = *front else {
            panic!("front side should inherit a default surface");
        };
        assert_eq!(front.diffuse_color, Vector3::new(0.0, 1.0, 0.0));
        assert!(matches!(*back, Appearance::Etch(_)));

        let custom = MaterialConfig {
            shader: "toon".into(),
            ..MaterialConfig::default()
        };
        assert!(matches!(resolve_appearance(&custom, &mut textures), Appearance::Custom(_)));
    }

    #[test]
    fn test_missing_texture_is_dropped() {
        let mut textures = TextureCache::new();
        assert!(textures.get("no/such/texture.png").is_none());
        assert!(textures.is_empty());
    }

    #[test]
    fn test_context_skips_unsupported_objects() {
        let config = parse(
            r#"
            [render]
            lighting = false

            [[objects]]
            name = "floor"
            path = "builtin:quad"

            [[objects]]
            path = "builtin:triangle"
            [objects.material]
            shader = "toon"
            "#,
        );
        let context = init_shading_context(&config).unwrap();

        assert_eq!(context.objects.len(), 1);
        assert_eq!(context.objects[0].name, "floor");
        assert_eq!(context.objects[0].shader.kind(), ShaderKind::Constant);
        assert_eq!(context.polygon_count(), 2);
        assert!(!context.hints.lighting_enabled);
    }
}
