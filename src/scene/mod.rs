pub mod build;
pub mod camera;
pub mod geometry;
