use crate::core::polygon::RasterEffect;
use crate::pipeline::shaders::skybox::SkyBoxShader;
use crate::pipeline::shaders::surface::SurfaceShader;
use crate::pipeline::shaders::two_sided::TwoSidedShader;
use crate::pipeline::shaders::PolygonShader;
use crate::scene::material::{Appearance, RenderingHints, SurfaceMaterial};
use crate::scene::texture::Texture;
use log::debug;
use std::sync::Arc;

/// Maps declarative appearances onto concrete polygon shaders.
pub struct ShaderFactory;

impl ShaderFactory {
    /// Returns `None` for appearances this engine cannot shade; the caller
    /// decides whether to fall back or report it.
    pub fn create_from(appearance: &Appearance, hints: &RenderingHints) -> Option<PolygonShader> {
        match appearance {
            Appearance::Default(m) => Some(Self::surface(m, hints, RasterEffect::None)),
            Appearance::Hatch(m) => Some(Self::surface(m, hints, RasterEffect::Hatch)),
            Appearance::Invert(m) => Some(Self::surface(m, hints, RasterEffect::Invert)),
            Appearance::Etch(m) => Some(Self::surface(m, hints, RasterEffect::Etch)),
            Appearance::TwoSided { front, back } => {
                let front = Self::create_from(front, hints)?;
                let back = Self::create_from(back, hints)?;
                Some(PolygonShader::TwoSided(TwoSidedShader::new(front, back)))
            }
            Appearance::Custom(name) => {
                debug!("No polygon shader for appearance '{}'", name);
                None
            }
        }
    }

    /// Sky-boxes are set up by the renderer, not through appearances.
    pub fn skybox(texture: Option<Arc<Texture>>) -> PolygonShader {
        PolygonShader::SkyBox(SkyBoxShader::new(texture))
    }

    fn surface(material: &SurfaceMaterial, hints: &RenderingHints, effect: RasterEffect) -> PolygonShader {
        if hints.lighting_enabled {
            PolygonShader::Default(SurfaceShader::lit(material).with_effect(effect))
        } else {
            PolygonShader::Constant(SurfaceShader::constant(material).with_effect(effect))
        }
    }
}
