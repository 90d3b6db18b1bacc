//! # Cuboid Primitive
//!
//! Closed box meshes used as planner fixtures.

use crate::error::{MeshError, MeshResult};
use crate::mesh::Mesh;
use glam::DVec3;

/// Box corners as `(x, y, z)` picks between the min (0) and max (1) corner.
/// Indices 0..4 are the bottom ring, 4..8 the top ring.
const CORNERS: [[u8; 3]; 8] = [
    [0, 0, 0],
    [1, 0, 0],
    [1, 1, 0],
    [0, 1, 0],
    [0, 0, 1],
    [1, 0, 1],
    [1, 1, 1],
    [0, 1, 1],
];

/// Two outward-wound triangles per side, in the order
/// bottom, top, front (-Y), back (+Y), left (-X), right (+X).
const TRIANGLES: [[u32; 3]; 12] = [
    [0, 2, 1],
    [0, 3, 2],
    [4, 5, 6],
    [4, 6, 7],
    [0, 1, 5],
    [0, 5, 4],
    [2, 3, 7],
    [2, 7, 6],
    [3, 0, 4],
    [3, 4, 7],
    [1, 2, 6],
    [1, 6, 5],
];

/// Creates an axis-aligned box of the given `size`.
///
/// With `center` the box is centered on the origin, otherwise its min
/// corner sits there. Face `2k` and `2k + 1` form one side.
///
/// # Example
///
/// ```rust
/// use marker_mesh::primitives::create_cuboid;
/// use glam::DVec3;
///
/// let mesh = create_cuboid(DVec3::splat(10.0), false).unwrap();
/// assert_eq!(mesh.vertex_count(), 8);
/// assert_eq!(mesh.triangle_count(), 12);
/// ```
pub fn create_cuboid(size: DVec3, center: bool) -> MeshResult<Mesh> {
    if !(size.x > 0.0 && size.y > 0.0 && size.z > 0.0) {
        return Err(MeshError::degenerate(format!("Cuboid size must be positive: {size:?}")));
    }

    let min = if center { -size / 2.0 } else { DVec3::ZERO };
    let mut mesh = Mesh::with_capacity(CORNERS.len(), TRIANGLES.len());
    for pick in CORNERS {
        let unit = DVec3::new(pick[0] as f64, pick[1] as f64, pick[2] as f64);
        mesh.add_vertex(min + unit * size);
    }
    for [a, b, c] in TRIANGLES {
        mesh.add_triangle(a, b, c);
    }
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extent(mesh: &Mesh) -> (DVec3, DVec3) {
        mesh.vertices()
            .iter()
            .fold((DVec3::INFINITY, DVec3::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)))
    }

    #[test]
    fn test_cuboid_placement() {
        let corner = create_cuboid(DVec3::new(4.0, 2.0, 1.0), false).unwrap();
        assert_eq!(extent(&corner), (DVec3::ZERO, DVec3::new(4.0, 2.0, 1.0)));

        let centered = create_cuboid(DVec3::new(4.0, 2.0, 1.0), true).unwrap();
        assert_eq!(extent(&centered), (DVec3::new(-2.0, -1.0, -0.5), DVec3::new(2.0, 1.0, 0.5)));
    }

    #[test]
    fn test_cuboid_side_order() {
        let mesh = create_cuboid(DVec3::splat(2.0), true).unwrap();
        let sides = [DVec3::NEG_Z, DVec3::Z, DVec3::NEG_Y, DVec3::Y, DVec3::NEG_X, DVec3::X];
        for (side, normal) in sides.iter().enumerate() {
            assert_eq!(mesh.face_normal(2 * side), *normal, "face {}", 2 * side);
            assert_eq!(mesh.face_normal(2 * side + 1), *normal, "face {}", 2 * side + 1);
        }
    }

    #[test]
    fn test_cuboid_invalid_size() {
        assert!(create_cuboid(DVec3::new(0.0, 10.0, 10.0), false).is_err());
        assert!(create_cuboid(DVec3::new(-5.0, 10.0, 10.0), false).is_err());
        assert!(create_cuboid(DVec3::new(f64::NAN, 1.0, 1.0), false).is_err());
    }
}
