//! # Marker Placement
//!
//! Finds where square fiducial markers can be embedded flush beneath the
//! surface of a triangle mesh.
//!
//! ## Pipeline
//!
//! ```text
//! Mesh
//!   │
//!   ▼ cluster     connected near-coplanar faces, largest first
//!   ▼ flatten     patch moved into the local XY plane
//!   ▼ raster      boolean occupancy grid from downward rays
//!   ▼ square      largest all-occupied square (DP)
//!   ▼ site        world-space corners, normal and pocket center
//! EmbedPlan
//! ```
//!
//! ## Example
//!
//! ```rust
//! use config::embed::EmbedConfig;
//! use marker_mesh::primitives::create_cuboid;
//! use marker_placement::plan_embedding;
//! use glam::DVec3;
//!
//! let slab = create_cuboid(DVec3::new(4.0, 2.0, 1.0), true).unwrap();
//! let plan = plan_embedding(&slab, &EmbedConfig::default().with_codes(3)).unwrap();
//! assert_eq!(plan.sites.len(), 3);
//! ```

pub mod cluster;
pub mod error;
pub mod flatten;
pub mod raster;
pub mod site;
pub mod square;

pub use cluster::{find_flat_clusters, ClusterParams, FlatCluster};
pub use error::{PlacementError, PlacementResult};
pub use flatten::{FlattenedPatch, MeshFlattener, Orientation, PatchFlattener, SurfaceQuery};
pub use raster::{rasterize, OccupancyGrid};
pub use site::{plan_embedding, plan_embedding_with, plan_manual_embedding, EmbedPlan, EmbedSite, SkipReason};
pub use square::{largest_inscribed_square, InscribedSquare};
