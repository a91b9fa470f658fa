use crate::scene::texture::{CubeMap, Texture};
use nalgebra::Vector3;
use std::sync::Arc;

/// Declarative description of how a surface should be shaded.
///
/// Only the shader factory interprets it; shading itself never looks at it.
#[derive(Debug, Clone)]
pub enum Appearance {
    Default(SurfaceMaterial),
    Hatch(SurfaceMaterial),
    Invert(SurfaceMaterial),
    Etch(SurfaceMaterial),
    TwoSided {
        front: Box<Appearance>,
        back: Box<Appearance>,
    },
    /// A shader name this engine does not know about.
    Custom(String),
}

impl Default for Appearance {
    fn default() -> Self {
        Appearance::Default(SurfaceMaterial::default())
    }
}

impl Appearance {
    pub fn two_sided(front: Appearance, back: Appearance) -> Self {
        Appearance::TwoSided {
            front: Box::new(front),
            back: Box::new(back),
        }
    }
}

/// Per-material constants of a polygon surface.
#[derive(Debug, Clone)]
pub struct SurfaceMaterial {
    pub diffuse_color: Vector3<f64>,
    pub diffuse_coefficient: f64,
    pub specular_coefficient: f64,
    pub specular_exponent: f64,
    /// 0.0 = opaque.
    pub transparency: f64,
    pub smooth_shading: bool,
    pub texture: Option<Arc<Texture>>,
    pub reflection_map: Option<Arc<CubeMap>>,
}

impl Default for SurfaceMaterial {
    fn default() -> Self {
        Self {
            diffuse_color: Vector3::new(0.0, 0.0, 1.0),
            diffuse_coefficient: 1.0,
            specular_coefficient: 0.7,
            specular_exponent: 60.0,
            transparency: 0.0,
            smooth_shading: true,
            texture: None,
            reflection_map: None,
        }
    }
}

impl SurfaceMaterial {
    /// Diffuse color scaled by its coefficient.
    pub fn base_color(&self) -> Vector3<f64> {
        self.diffuse_color * self.diffuse_coefficient
    }
}

/// Renderer-wide switches consulted when shaders are built.
#[derive(Debug, Clone, Copy)]
pub struct RenderingHints {
    pub lighting_enabled: bool,
}

impl Default for RenderingHints {
    fn default() -> Self {
        Self {
            lighting_enabled: true,
        }
    }
}
