//! # Patch Flattening
//!
//! Moves a flat cluster into a local frame where it lies in the XY plane
//! with its average normal along `+Z`, so the rasterizer can sample it
//! with straight downward rays.
//!
//! [`PatchFlattener`] is the seam for host environments that already
//! have a mesh editing toolkit. [`MeshFlattener`] is the built-in
//! implementation over [`Mesh`]: it projects member triangles onto the
//! average plane and answers ray queries from a bucket grid.

mod planar;

#[cfg(test)]
mod tests;

use config::constants::DEGENERATE_AREA_EPSILON;
use glam::{DQuat, DVec3};
use marker_mesh::{Bounds2, Mesh};

use crate::error::{PlacementError, PlacementResult};

pub use planar::PlanarPatch;

/// Answers whether a ray hits the patch surface.
pub trait SurfaceQuery: Sync {
    /// True when a ray cast from `origin` along `direction` hits the patch.
    fn occupied(&self, origin: DVec3, direction: DVec3) -> bool;
}

/// Rigid transform from the flattened frame back to world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orientation {
    /// World position of the local origin.
    pub origin: DVec3,
    /// Rotation taking local axes to world axes.
    pub rotation: DQuat,
}

impl Orientation {
    /// Identity frame.
    pub const IDENTITY: Self = Self {
        origin: DVec3::ZERO,
        rotation: DQuat::IDENTITY,
    };

    /// Maps a local point into world space.
    #[inline]
    pub fn to_world(&self, local: DVec3) -> DVec3 {
        self.origin + self.rotation * local
    }

    /// World direction of local `+Z`, the patch normal.
    #[inline]
    pub fn normal(&self) -> DVec3 {
        self.rotation * DVec3::Z
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// A cluster after flattening.
#[derive(Debug, Clone)]
pub struct FlattenedPatch<S> {
    /// Ray query over the flattened surface.
    pub surface: S,
    /// Local XY extent of the surface.
    pub bounds: Bounds2,
    /// Frame taking local coordinates back to world space.
    pub orientation: Orientation,
}

/// Produces a flattened copy of a set of faces.
pub trait PatchFlattener {
    /// Surface type answering ray queries.
    type Surface: SurfaceQuery;

    /// Flattens the given faces.
    ///
    /// # Errors
    ///
    /// Returns [`PlacementError::DegenerateInput`] when the faces have no
    /// area or no usable average normal.
    fn flatten(&self, faces: &[usize]) -> PlacementResult<FlattenedPatch<Self::Surface>>;
}

/// Built-in flattener over a [`Mesh`].
///
/// # Example
///
/// ```rust
/// use marker_mesh::primitives::create_cuboid;
/// use marker_placement::flatten::{MeshFlattener, PatchFlattener};
/// use glam::DVec3;
///
/// let cube = create_cuboid(DVec3::new(4.0, 2.0, 1.0), true).unwrap();
/// // Faces 2 and 3 form the top side
/// let patch = MeshFlattener::new(&cube).flatten(&[2, 3]).unwrap();
/// assert!((patch.bounds.width() * patch.bounds.height() - 8.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct MeshFlattener<'a> {
    mesh: &'a Mesh,
}

impl<'a> MeshFlattener<'a> {
    /// Creates a flattener over `mesh`.
    pub fn new(mesh: &'a Mesh) -> Self {
        Self { mesh }
    }

    /// Area-weighted centroid and normal of the faces.
    fn average_frame(&self, faces: &[usize]) -> PlacementResult<(DVec3, DVec3)> {
        let mut total_area = 0.0;
        let mut centroid = DVec3::ZERO;
        let mut normal = DVec3::ZERO;

        for &face in faces {
            let area = self.mesh.face_area(face);
            total_area += area;
            centroid += self.mesh.face_centroid(face) * area;
            normal += self.mesh.face_normal(face) * area;
        }

        if total_area <= DEGENERATE_AREA_EPSILON {
            return Err(PlacementError::degenerate("cluster has zero area"));
        }
        let normal = normal
            .try_normalize()
            .ok_or_else(|| PlacementError::degenerate("cluster normals cancel out"))?;

        Ok((centroid / total_area, normal))
    }
}

impl PatchFlattener for MeshFlattener<'_> {
    type Surface = PlanarPatch;

    fn flatten(&self, faces: &[usize]) -> PlacementResult<FlattenedPatch<PlanarPatch>> {
        if faces.is_empty() {
            return Err(PlacementError::degenerate("empty face selection"));
        }
        let face_count = self.mesh.triangle_count();
        if let Some(&face) = faces.iter().find(|&&f| f >= face_count) {
            return Err(PlacementError::InvalidFace { face, face_count });
        }

        let (centroid, normal) = self.average_frame(faces)?;
        let orientation = Orientation {
            origin: centroid,
            rotation: DQuat::from_rotation_arc(DVec3::Z, normal),
        };
        let to_local = orientation.rotation.inverse();

        let triangles = faces.iter().map(|&face| {
            self.mesh
                .face_corners(face)
                .map(|corner| (to_local * (corner - centroid)).truncate())
        });
        let surface = PlanarPatch::new(triangles.collect())?;
        let bounds = surface.bounds();

        Ok(FlattenedPatch {
            surface,
            bounds,
            orientation,
        })
    }
}
