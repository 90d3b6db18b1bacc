//! # Marker Mesh
//!
//! Geometry primitives for marker placement: a triangle mesh with
//! per-face queries, the face adjacency graph used by flat-region
//! clustering, and 2D helpers for working in a flattened patch plane.
//!
//! ## Usage
//!
//! ```rust
//! use marker_mesh::primitives::create_cuboid;
//! use marker_mesh::{FaceGraph, FaceTopology};
//! use glam::DVec3;
//!
//! let mesh = create_cuboid(DVec3::new(4.0, 2.0, 1.0), true).unwrap();
//! let topology = FaceTopology::from_mesh(&mesh);
//! assert_eq!(topology.normal(2), DVec3::Z);
//! ```

pub mod error;
pub mod geometry;
pub mod mesh;
pub mod primitives;
pub mod topology;

pub use error::{MeshError, MeshResult};
pub use geometry::{angle_between_norms, Bounds2};
pub use mesh::Mesh;
pub use topology::{FaceGraph, FaceTopology};
