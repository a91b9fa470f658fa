pub mod camera;
pub mod context;
pub mod environment;
pub mod light;
pub mod loader;
pub mod material;
pub mod mesh;
pub mod scene_object;
pub mod sky;
pub mod texture;
