//! # Primitives
//!
//! Mesh generation for simple test and preview shapes.

pub mod cuboid;
pub mod plane;

pub use cuboid::create_cuboid;
pub use plane::create_grid_plane;
