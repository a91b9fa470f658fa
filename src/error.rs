use thiserror::Error;

/// Errors raised while loading scene resources or assembling geometry.
///
/// Shading itself never fails: malformed numeric input propagates as NaN/Inf.
#[derive(Debug, Error)]
pub enum ShadeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Failed to load texture '{path}': {source}")]
    Texture {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to load OBJ: {0}")]
    Obj(#[from] tobj::LoadError),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("A polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),

    #[error("A cube map needs exactly 6 faces, got {0}")]
    CubeFaces(usize),
}

pub type Result<T> = std::result::Result<T, ShadeError>;
