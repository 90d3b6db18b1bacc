//! # Grid Plane Primitive
//!
//! A flat, triangulated rectangle in the XY plane with upward normals.

use crate::error::{MeshError, MeshResult};
use crate::mesh::Mesh;
use glam::DVec3;

/// Creates a `width × height` rectangle at `z = 0`, corner at the origin,
/// split into `cells_x × cells_y` quads of two triangles each.
///
/// # Example
///
/// ```rust
/// use marker_mesh::primitives::create_grid_plane;
///
/// let plane = create_grid_plane(4.0, 2.0, 4, 2).unwrap();
/// assert_eq!(plane.vertex_count(), 15);
/// assert_eq!(plane.triangle_count(), 16);
/// ```
pub fn create_grid_plane(
    width: f64,
    height: f64,
    cells_x: usize,
    cells_y: usize,
) -> MeshResult<Mesh> {
    if width <= 0.0 || height <= 0.0 {
        return Err(MeshError::degenerate(format!(
            "Plane size must be positive: {width} x {height}"
        )));
    }
    if cells_x == 0 || cells_y == 0 {
        return Err(MeshError::degenerate("Plane needs at least one cell per axis"));
    }

    let stride = cells_x + 1;
    let mut mesh = Mesh::with_capacity(stride * (cells_y + 1), cells_x * cells_y * 2);

    for j in 0..=cells_y {
        for i in 0..=cells_x {
            mesh.add_vertex(DVec3::new(
                width * i as f64 / cells_x as f64,
                height * j as f64 / cells_y as f64,
                0.0,
            ));
        }
    }

    for j in 0..cells_y {
        for i in 0..cells_x {
            let a = (j * stride + i) as u32;
            let b = a + 1;
            let c = a + stride as u32 + 1;
            let d = a + stride as u32;
            mesh.add_triangle(a, b, c);
            mesh.add_triangle(a, c, d);
        }
    }

    Ok(mesh)
}
