pub mod factory;
pub mod renderer;
pub mod shaders;
pub mod stats;
