//! # Geometry Helpers
//!
//! Small vector utilities shared by clustering and rasterization.

use config::constants::EPSILON;
use glam::{DVec2, DVec3};

/// Angle in radians between two unit normals.
///
/// The dot product is clamped to `[-1, 1]` first, so slightly
/// non-normalized inputs never produce `NaN`.
///
/// # Example
///
/// ```rust
/// use marker_mesh::geometry::angle_between_norms;
/// use glam::DVec3;
///
/// let right = angle_between_norms(DVec3::X, DVec3::Y);
/// assert!((right - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
/// assert_eq!(angle_between_norms(DVec3::Z, DVec3::Z), 0.0);
/// ```
#[inline]
pub fn angle_between_norms(a: DVec3, b: DVec3) -> f64 {
    a.dot(b).clamp(-1.0, 1.0).acos()
}

/// Axis-aligned 2D bounds in a patch's local XY plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds2 {
    /// Minimum corner.
    pub min: DVec2,
    /// Maximum corner.
    pub max: DVec2,
}

impl Bounds2 {
    /// Creates bounds from two corners (any order).
    pub fn new(a: DVec2, b: DVec2) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Smallest bounds containing every point, or `None` for no points.
    ///
    /// # Example
    ///
    /// ```rust
    /// use marker_mesh::geometry::Bounds2;
    /// use glam::DVec2;
    ///
    /// let b = Bounds2::from_points([DVec2::new(1.0, 3.0), DVec2::new(-1.0, 0.0)]).unwrap();
    /// assert_eq!(b.width(), 2.0);
    /// assert_eq!(b.height(), 3.0);
    /// ```
    pub fn from_points(points: impl IntoIterator<Item = DVec2>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
        Some(Self { min, max })
    }

    /// Extent along X.
    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Extent along Y.
    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// The `(min_x, max_y)` corner where raster sampling starts.
    #[inline]
    pub fn top_left(&self) -> DVec2 {
        DVec2::new(self.min.x, self.max.y)
    }

    /// True when either extent is within [`EPSILON`] of zero.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.width() <= EPSILON || self.height() <= EPSILON
    }

    /// Inclusive containment test.
    #[inline]
    pub fn contains(&self, p: DVec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// Barycentric point-in-triangle test in 2D, inclusive of edges.
///
/// Degenerate triangles contain nothing.
pub fn point_in_triangle(p: DVec2, a: DVec2, b: DVec2, c: DVec2) -> bool {
    let v0 = c - a;
    let v1 = b - a;
    let v2 = p - a;

    let denom = v0.perp_dot(v1);
    if denom.abs() <= EPSILON * EPSILON {
        return false;
    }

    let u = v2.perp_dot(v1) / denom;
    let v = v0.perp_dot(v2) / denom;
    let tol = -EPSILON;
    u >= tol && v >= tol && u + v <= 1.0 - tol
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_angle_opposite_normals() {
        assert_relative_eq!(angle_between_norms(DVec3::Z, -DVec3::Z), std::f64::consts::PI);
    }

    #[test]
    fn test_angle_clamps_overshoot() {
        let almost = DVec3::new(0.0, 0.0, 1.0 + 1e-15);
        assert_eq!(angle_between_norms(almost, DVec3::Z), 0.0);
    }

    #[test]
    fn test_bounds_empty() {
        assert!(Bounds2::from_points(std::iter::empty()).is_none());
    }

    #[test]
    fn test_bounds_degenerate() {
        let flat = Bounds2::new(DVec2::ZERO, DVec2::new(5.0, 0.0));
        assert!(flat.is_degenerate());
        let ok = Bounds2::new(DVec2::ZERO, DVec2::new(5.0, 1.0));
        assert!(!ok.is_degenerate());
        assert_eq!(ok.top_left(), DVec2::new(0.0, 1.0));
    }

    #[test]
    fn test_point_in_triangle() {
        let (a, b, c) = (DVec2::ZERO, DVec2::new(1.0, 0.0), DVec2::new(0.0, 1.0));
        assert!(point_in_triangle(DVec2::new(0.25, 0.25), a, b, c));
        assert!(point_in_triangle(DVec2::new(0.5, 0.0), a, b, c));
        assert!(!point_in_triangle(DVec2::new(0.75, 0.75), a, b, c));
        // Winding does not matter
        assert!(point_in_triangle(DVec2::new(0.25, 0.25), a, c, b));
    }

    #[test]
    fn test_point_in_degenerate_triangle() {
        let a = DVec2::ZERO;
        assert!(!point_in_triangle(a, a, DVec2::X, DVec2::X * 2.0));
    }
}
