pub mod geometry;
pub mod math;
pub mod polygon;
pub mod vertex;
