pub mod phong;
pub mod skybox;
pub mod surface;
pub mod two_sided;
pub mod unlit;

use crate::core::polygon::Polygon;
use crate::core::vertex::VertexRecord;
use crate::scene::environment::Environment;
use phong::PhongVertexShader;
use skybox::SkyBoxShader;
use surface::SurfaceShader;
use two_sided::TwoSidedShader;
use unlit::ConstantVertexShader;

/// Computes the final color and alpha of a single vertex.
#[derive(Debug, Clone)]
pub enum VertexShader {
    /// Diffuse + specular multi-light model with exponential fog.
    Phong(PhongVertexShader),
    /// Fixed material color, no lights, no fog.
    Constant(ConstantVertexShader),
}

impl VertexShader {
    #[inline]
    pub fn shade(&self, vertex: &mut VertexRecord, environment: &Environment, vertex_colors: bool) {
        match self {
            VertexShader::Phong(s) => s.shade(vertex, environment, vertex_colors),
            VertexShader::Constant(s) => s.shade(vertex, vertex_colors),
        }
    }

    pub fn transparency(&self) -> f64 {
        match self {
            VertexShader::Phong(s) => s.transparency,
            VertexShader::Constant(s) => s.transparency,
        }
    }

    /// Alpha varies per vertex only when it comes from the vertex colors.
    pub fn interpolate_alpha(&self, vertex_colors: bool) -> bool {
        vertex_colors
    }
}

/// Flags the rasterizer must honor after a polygon has been shaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShadeOutcome {
    pub interpolate_color: bool,
    pub needs_sorting: bool,
}

/// Discriminant of the polygon shader variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderKind {
    Constant,
    Default,
    TwoSided,
    SkyBox,
}

/// Orchestrates the shading of one polygon.
///
/// The set of strategies is closed; the factory picks one at material
/// construction time and the renderer only calls [`PolygonShader::shade_polygon`].
#[derive(Debug, Clone)]
pub enum PolygonShader {
    /// Unlit surface: always backed by a [`VertexShader::Constant`].
    Constant(SurfaceShader),
    /// Lit surface: backed by a [`VertexShader::Phong`].
    Default(SurfaceShader),
    TwoSided(TwoSidedShader),
    SkyBox(SkyBoxShader),
}

impl PolygonShader {
    pub fn kind(&self) -> ShaderKind {
        match self {
            PolygonShader::Constant(_) => ShaderKind::Constant,
            PolygonShader::Default(_) => ShaderKind::Default,
            PolygonShader::TwoSided(_) => ShaderKind::TwoSided,
            PolygonShader::SkyBox(_) => ShaderKind::SkyBox,
        }
    }

    /// Shades every vertex of `polygon` in place and fills in its rasterizer metadata.
    pub fn shade_polygon(
        &self,
        polygon: &mut Polygon,
        environment: &Environment,
        vertex_colors: bool,
    ) -> ShadeOutcome {
        match self {
            PolygonShader::Constant(s) | PolygonShader::Default(s) => {
                s.shade_polygon(polygon, environment, vertex_colors)
            }
            PolygonShader::TwoSided(s) => s.shade_polygon(polygon, environment, vertex_colors),
            PolygonShader::SkyBox(s) => s.shade_polygon(polygon, environment, vertex_colors),
        }
    }

    pub fn interpolate_color(&self, vertex_colors: bool) -> bool {
        match self {
            PolygonShader::Constant(s) | PolygonShader::Default(s) => {
                s.interpolate_color(vertex_colors)
            }
            PolygonShader::TwoSided(s) => s.interpolate_color(),
            PolygonShader::SkyBox(s) => s.interpolate_color(vertex_colors),
        }
    }

    pub fn needs_sorting(&self, vertex_colors: bool) -> bool {
        match self {
            PolygonShader::Constant(s) | PolygonShader::Default(s) => s.needs_sorting(vertex_colors),
            PolygonShader::TwoSided(s) => s.needs_sorting(),
            PolygonShader::SkyBox(s) => s.needs_sorting(),
        }
    }
}
