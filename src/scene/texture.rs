use crate::error::{Result, ShadeError};
use image::DynamicImage;
use log::info;
use std::path::Path;
use std::sync::Arc;

/// A decoded 2D texture as seen by the shading stage.
///
/// Shading only needs to know whether the texture carries transparency; the
/// pixels themselves are kept for the rasterizer.
#[derive(Debug, Clone)]
pub struct Texture {
    pub image: Arc<DynamicImage>,
    pub width: u32,
    pub height: u32,
    transparent: bool,
}

impl Texture {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        if !path_ref.exists() {
            return Err(ShadeError::NotFound(path_ref.display().to_string()));
        }
        let img = image::open(path_ref).map_err(|source| ShadeError::Texture {
            path: path_ref.display().to_string(),
            source,
        })?;

        let texture = Self::from_image(img);
        info!(
            "Loaded texture: {:?} ({}x{}, transparent: {})",
            path_ref, texture.width, texture.height, texture.transparent
        );
        Ok(texture)
    }

    pub fn from_image(img: DynamicImage) -> Self {
        let transparent = img.color().has_alpha() && img.to_rgba8().pixels().any(|p| p[3] < 255);
        Self {
            width: img.width(),
            height: img.height(),
            image: Arc::new(img),
            transparent,
        }
    }

    /// True if any texel is not fully opaque.
    pub fn is_transparent(&self) -> bool {
        self.transparent
    }
}

/// Cube face order of a [`CubeMap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CubeFace {
    PositiveX,
    NegativeX,
    PositiveY,
    NegativeY,
    PositiveZ,
    NegativeZ,
}

/// Six face textures, used for reflection lookups and sky-boxes.
#[derive(Debug, Clone)]
pub struct CubeMap {
    faces: [Arc<Texture>; 6],
}

impl CubeMap {
    pub fn new(faces: [Arc<Texture>; 6]) -> Self {
        Self { faces }
    }

    /// Loads faces in `+X, -X, +Y, -Y, +Z, -Z` order.
    pub fn load<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let faces = paths
            .iter()
            .map(|p| Texture::load(p).map(Arc::new))
            .collect::<Result<Vec<_>>>()?;
        let count = faces.len();
        let faces: [Arc<Texture>; 6] = faces
            .try_into()
            .map_err(|_| ShadeError::CubeFaces(count))?;
        Ok(Self::new(faces))
    }

    pub fn face(&self, face: CubeFace) -> &Arc<Texture> {
        &self.faces[face as usize]
    }

    /// Face hit by a lookup direction (major axis selection).
    pub fn face_for(direction: &nalgebra::Vector3<f64>) -> CubeFace {
        let (ax, ay, az) = (direction.x.abs(), direction.y.abs(), direction.z.abs());
        if ax >= ay && ax >= az {
            if direction.x >= 0.0 {
                CubeFace::PositiveX
            } else {
                CubeFace::NegativeX
            }
        } else if ay >= az {
            if direction.y >= 0.0 {
                CubeFace::PositiveY
            } else {
                CubeFace::NegativeY
            }
        } else if direction.z >= 0.0 {
            CubeFace::PositiveZ
        } else {
            CubeFace::NegativeZ
        }
    }
}
