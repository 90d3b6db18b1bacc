//! # Face Topology
//!
//! Read-only face/adjacency/normal access used by flat-region clustering.
//!
//! [`FaceGraph`] is the seam through which a host mesh is exposed to the
//! clustering code; [`FaceTopology`] is the implementation built from a
//! [`Mesh`] by matching shared edges.

use std::collections::HashMap;

use glam::DVec3;

use crate::mesh::Mesh;

/// Per-face accessor over a polygon mesh.
///
/// Faces are identified by dense indices `0..face_count()`. Neighbor lists
/// must be symmetric: if `b` is in `neighbors(a)`, `a` is in `neighbors(b)`.
pub trait FaceGraph {
    /// Number of faces.
    fn face_count(&self) -> usize;

    /// Unit normal of a face (zero for degenerate faces).
    fn normal(&self, face: usize) -> DVec3;

    /// Area of a face.
    fn area(&self, face: usize) -> f64;

    /// Centroid of a face.
    fn centroid(&self, face: usize) -> DVec3;

    /// Faces sharing an edge with `face`, in ascending order.
    fn neighbors(&self, face: usize) -> &[usize];
}

/// Precomputed face normals, areas, centroids and edge adjacency.
///
/// # Example
///
/// ```rust
/// use marker_mesh::primitives::create_cuboid;
/// use marker_mesh::{FaceGraph, FaceTopology};
/// use glam::DVec3;
///
/// let cube = create_cuboid(DVec3::splat(2.0), true).unwrap();
/// let topology = FaceTopology::from_mesh(&cube);
/// assert_eq!(topology.face_count(), 12);
/// // Every face of a closed triangulated box has three edge neighbors
/// assert!((0..12).all(|f| topology.neighbors(f).len() == 3));
/// ```
#[derive(Debug, Clone)]
pub struct FaceTopology {
    normals: Vec<DVec3>,
    areas: Vec<f64>,
    centroids: Vec<DVec3>,
    neighbors: Vec<Vec<usize>>,
}

impl FaceTopology {
    /// Builds the topology of a mesh.
    ///
    /// Two faces are adjacent when they share an undirected edge. Edges
    /// shared by more than two faces connect all of them.
    pub fn from_mesh(mesh: &Mesh) -> Self {
        let face_count = mesh.triangle_count();
        let edge_to_faces = build_edge_to_faces(mesh.triangles());

        let mut neighbors = vec![Vec::new(); face_count];
        for faces in edge_to_faces.values() {
            for &a in faces {
                for &b in faces {
                    if a != b {
                        neighbors[a].push(b);
                    }
                }
            }
        }
        for list in &mut neighbors {
            list.sort_unstable();
            list.dedup();
        }

        Self {
            normals: (0..face_count).map(|f| mesh.face_normal(f)).collect(),
            areas: (0..face_count).map(|f| mesh.face_area(f)).collect(),
            centroids: (0..face_count).map(|f| mesh.face_centroid(f)).collect(),
            neighbors,
        }
    }

    /// Total area of a set of faces.
    pub fn total_area(&self, faces: &[usize]) -> f64 {
        faces.iter().map(|&f| self.areas[f]).sum()
    }
}

impl FaceGraph for FaceTopology {
    fn face_count(&self) -> usize {
        self.normals.len()
    }

    fn normal(&self, face: usize) -> DVec3 {
        self.normals[face]
    }

    fn area(&self, face: usize) -> f64 {
        self.areas[face]
    }

    fn centroid(&self, face: usize) -> DVec3 {
        self.centroids[face]
    }

    fn neighbors(&self, face: usize) -> &[usize] {
        &self.neighbors[face]
    }
}

/// Build a map from undirected edges to the faces that contain them.
fn build_edge_to_faces(triangles: &[[u32; 3]]) -> HashMap<(u32, u32), Vec<usize>> {
    let mut edge_to_faces: HashMap<(u32, u32), Vec<usize>> = HashMap::new();

    for (face, tri) in triangles.iter().enumerate() {
        let edges = [
            normalize_edge(tri[0], tri[1]),
            normalize_edge(tri[1], tri[2]),
            normalize_edge(tri[2], tri[0]),
        ];
        for edge in edges {
            edge_to_faces.entry(edge).or_default().push(face);
        }
    }

    edge_to_faces
}

/// Normalize an edge so the smaller vertex index comes first.
fn normalize_edge(v0: u32, v1: u32) -> (u32, u32) {
    if v0 < v1 {
        (v0, v1)
    } else {
        (v1, v0)
    }
}
