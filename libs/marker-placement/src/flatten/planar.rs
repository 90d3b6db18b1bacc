//! Projected triangles with a uniform bucket grid for point queries.

use config::constants::{EPSILON, MAX_BUCKETS_PER_AXIS, TRIANGLES_PER_BUCKET};
use glam::{DVec2, DVec3};
use marker_mesh::geometry::point_in_triangle;
use marker_mesh::Bounds2;

use super::SurfaceQuery;
use crate::error::{PlacementError, PlacementResult};

/// A flattened patch lying in the local `z = 0` plane.
#[derive(Debug, Clone)]
pub struct PlanarPatch {
    triangles: Vec<[DVec2; 3]>,
    bounds: Bounds2,
    buckets_per_axis: usize,
    buckets: Vec<Vec<u32>>,
}

impl PlanarPatch {
    /// Indexes a set of 2D triangles.
    ///
    /// # Errors
    ///
    /// Returns [`PlacementError::DegenerateInput`] for an empty set.
    pub fn new(triangles: Vec<[DVec2; 3]>) -> PlacementResult<Self> {
        let bounds = Bounds2::from_points(triangles.iter().flatten().copied())
            .ok_or_else(|| PlacementError::degenerate("patch has no triangles"))?;

        let per_axis = ((triangles.len() / TRIANGLES_PER_BUCKET) as f64)
            .sqrt()
            .ceil()
            .clamp(1.0, MAX_BUCKETS_PER_AXIS as f64) as usize;

        let mut patch = Self {
            triangles,
            bounds,
            buckets_per_axis: per_axis,
            buckets: vec![Vec::new(); per_axis * per_axis],
        };
        patch.fill_buckets();
        Ok(patch)
    }

    /// Local XY extent.
    pub fn bounds(&self) -> Bounds2 {
        self.bounds
    }

    /// Projected triangles.
    pub fn triangles(&self) -> &[[DVec2; 3]] {
        &self.triangles
    }

    /// True when the point lies on any triangle.
    pub fn contains(&self, point: DVec2) -> bool {
        if !self.bounds.contains(point) {
            return false;
        }
        let (bx, by) = self.bucket_of(point);
        self.buckets[by * self.buckets_per_axis + bx]
            .iter()
            .any(|&t| {
                let [a, b, c] = self.triangles[t as usize];
                point_in_triangle(point, a, b, c)
            })
    }

    fn fill_buckets(&mut self) {
        for (index, tri) in self.triangles.iter().enumerate() {
            let lo = tri[0].min(tri[1]).min(tri[2]);
            let hi = tri[0].max(tri[1]).max(tri[2]);
            let (x0, y0) = self.bucket_of(lo);
            let (x1, y1) = self.bucket_of(hi);
            for by in y0..=y1 {
                for bx in x0..=x1 {
                    self.buckets[by * self.buckets_per_axis + bx].push(index as u32);
                }
            }
        }
    }

    fn bucket_of(&self, p: DVec2) -> (usize, usize) {
        let n = self.buckets_per_axis;
        let axis = |value: f64, min: f64, extent: f64| -> usize {
            if extent <= EPSILON {
                return 0;
            }
            let t = ((value - min) / extent * n as f64).floor();
            t.clamp(0.0, (n - 1) as f64) as usize
        };
        (
            axis(p.x, self.bounds.min.x, self.bounds.width()),
            axis(p.y, self.bounds.min.y, self.bounds.height()),
        )
    }
}

impl SurfaceQuery for PlanarPatch {
    fn occupied(&self, origin: DVec3, direction: DVec3) -> bool {
        if direction.z.abs() <= EPSILON {
            return false;
        }
        let t = -origin.z / direction.z;
        if t < 0.0 {
            return false;
        }
        self.contains((origin + direction * t).truncate())
    }
}
