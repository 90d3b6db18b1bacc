//! # Mesh Data Structure
//!
//! Triangle mesh with per-face geometric queries used by flat-region
//! clustering and patch flattening.

use config::constants::DEGENERATE_AREA_EPSILON;
use glam::DVec3;

use crate::error::{MeshError, MeshResult};

/// A triangle mesh with vertices and indices.
///
/// All geometry calculations use f64.
///
/// # Example
///
/// ```rust
/// use marker_mesh::Mesh;
/// use glam::DVec3;
///
/// let mut mesh = Mesh::new();
/// mesh.add_vertex(DVec3::new(0.0, 0.0, 0.0));
/// mesh.add_vertex(DVec3::new(1.0, 0.0, 0.0));
/// mesh.add_vertex(DVec3::new(0.0, 1.0, 0.0));
/// mesh.add_triangle(0, 1, 2);
/// assert_eq!(mesh.face_normal(0), DVec3::Z);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    /// Vertex positions
    vertices: Vec<DVec3>,
    /// Triangle indices (3 indices per triangle)
    triangles: Vec<[u32; 3]>,
}

impl Mesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mesh with pre-allocated capacity.
    pub fn with_capacity(vertex_count: usize, triangle_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            triangles: Vec::with_capacity(triangle_count),
        }
    }

    /// Builds a mesh from flat `[x, y, z, ...]` and `[i0, i1, i2, ...]` buffers.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::MalformedBuffer`] when a buffer length is not a
    /// multiple of three or a coordinate is NaN or infinite, and
    /// [`MeshError::InvalidIndex`] when an index is out of range.
    ///
    /// # Example
    ///
    /// ```rust
    /// use marker_mesh::Mesh;
    ///
    /// let mesh = Mesh::from_buffers(&[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0], &[0, 1, 2])
    ///     .unwrap();
    /// assert_eq!(mesh.triangle_count(), 1);
    /// ```
    pub fn from_buffers(positions: &[f64], indices: &[u32]) -> MeshResult<Self> {
        if positions.len() % 3 != 0 {
            return Err(MeshError::malformed(format!(
                "vertex buffer length {} is not a multiple of 3",
                positions.len()
            )));
        }
        if indices.len() % 3 != 0 {
            return Err(MeshError::malformed(format!(
                "index buffer length {} is not a multiple of 3",
                indices.len()
            )));
        }

        if let Some(at) = positions.iter().position(|c| !c.is_finite()) {
            return Err(MeshError::malformed(format!(
                "vertex {} has non-finite coordinate {}",
                at / 3,
                positions[at]
            )));
        }

        let mut mesh = Self::with_capacity(positions.len() / 3, indices.len() / 3);
        for p in positions.chunks_exact(3) {
            mesh.add_vertex(DVec3::new(p[0], p[1], p[2]));
        }
        for t in indices.chunks_exact(3) {
            mesh.add_triangle(t[0], t[1], t[2]);
        }
        mesh.check_indices()?;
        Ok(mesh)
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Returns true if the mesh has no triangles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Adds a vertex and returns its index.
    pub fn add_vertex(&mut self, position: DVec3) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(position);
        index
    }

    /// Adds a triangle by vertex indices.
    pub fn add_triangle(&mut self, v0: u32, v1: u32, v2: u32) {
        self.triangles.push([v0, v1, v2]);
    }

    /// Returns a reference to the vertices.
    #[inline]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Returns a reference to the triangles.
    #[inline]
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Returns the vertex at the given index.
    #[inline]
    pub fn vertex(&self, index: u32) -> DVec3 {
        self.vertices[index as usize]
    }

    /// Returns the three corner positions of a face.
    #[inline]
    pub fn face_corners(&self, face: usize) -> [DVec3; 3] {
        let [a, b, c] = self.triangles[face];
        [self.vertex(a), self.vertex(b), self.vertex(c)]
    }

    /// Returns the unit normal of a face, or zero for a degenerate face.
    pub fn face_normal(&self, face: usize) -> DVec3 {
        let [v0, v1, v2] = self.face_corners(face);
        let cross = (v1 - v0).cross(v2 - v0);
        if cross.length() * 0.5 < DEGENERATE_AREA_EPSILON {
            DVec3::ZERO
        } else {
            cross.normalize()
        }
    }

    /// Returns the area of a face.
    pub fn face_area(&self, face: usize) -> f64 {
        let [v0, v1, v2] = self.face_corners(face);
        (v1 - v0).cross(v2 - v0).length() * 0.5
    }

    /// Returns the centroid of a face.
    pub fn face_centroid(&self, face: usize) -> DVec3 {
        let [v0, v1, v2] = self.face_corners(face);
        (v0 + v1 + v2) / 3.0
    }

    fn check_indices(&self) -> MeshResult<()> {
        let vertex_count = self.vertices.len();
        for (triangle, tri) in self.triangles.iter().enumerate() {
            if let Some(&vertex) = tri.iter().find(|&&v| v as usize >= vertex_count) {
                return Err(MeshError::InvalidIndex {
                    triangle,
                    vertex,
                    vertex_count,
                });
            }
        }
        Ok(())
    }
}
