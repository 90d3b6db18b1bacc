use super::*;
use approx::assert_relative_eq;
use glam::DVec2;
use marker_mesh::geometry::point_in_triangle;
use marker_mesh::primitives::{create_cuboid, create_grid_plane};

fn slab() -> Mesh {
    create_cuboid(DVec3::new(4.0, 2.0, 1.0), true).unwrap()
}

#[test]
fn test_flatten_top_keeps_extent() {
    let mesh = slab();
    let patch = MeshFlattener::new(&mesh).flatten(&[2, 3]).unwrap();

    assert_relative_eq!(patch.bounds.width(), 4.0, epsilon = 1e-9);
    assert_relative_eq!(patch.bounds.height(), 2.0, epsilon = 1e-9);
    assert_relative_eq!(patch.orientation.origin.z, 0.5, epsilon = 1e-12);
    assert!(patch.orientation.normal().abs_diff_eq(DVec3::Z, 1e-12));
}

#[test]
fn test_flatten_side_maps_back_to_world() {
    let mesh = slab();
    // Front side, normal -Y
    let patch = MeshFlattener::new(&mesh).flatten(&[4, 5]).unwrap();
    assert!(patch.orientation.normal().abs_diff_eq(DVec3::NEG_Y, 1e-12));
    assert_relative_eq!(
        patch.bounds.width() * patch.bounds.height(),
        4.0,
        epsilon = 1e-9
    );

    // Every local corner lands on the world plane y = -1
    for corner in [patch.bounds.min, patch.bounds.max] {
        let world = patch.orientation.to_world(corner.extend(0.0));
        assert_relative_eq!(world.y, -1.0, epsilon = 1e-9);
    }
}

#[test]
fn test_flatten_bottom_faces_down() {
    let mesh = slab();
    let patch = MeshFlattener::new(&mesh).flatten(&[0, 1]).unwrap();
    assert!(patch.orientation.normal().abs_diff_eq(DVec3::NEG_Z, 1e-9));
    assert_relative_eq!(
        patch.bounds.width() * patch.bounds.height(),
        8.0,
        epsilon = 1e-9
    );
}

#[test]
fn test_flatten_rejects_empty_selection() {
    let mesh = slab();
    let err = MeshFlattener::new(&mesh).flatten(&[]).unwrap_err();
    assert!(matches!(err, PlacementError::DegenerateInput(_)));
}

#[test]
fn test_flatten_rejects_unknown_face() {
    let mesh = slab();
    let err = MeshFlattener::new(&mesh).flatten(&[2, 40]).unwrap_err();
    assert!(matches!(err, PlacementError::InvalidFace { face: 40, .. }));
}

#[test]
fn test_flatten_rejects_zero_area() {
    let mut mesh = Mesh::new();
    let a = mesh.add_vertex(DVec3::ZERO);
    let b = mesh.add_vertex(DVec3::X);
    let c = mesh.add_vertex(DVec3::X * 2.0);
    mesh.add_triangle(a, b, c);
    let err = MeshFlattener::new(&mesh).flatten(&[0]).unwrap_err();
    assert!(matches!(err, PlacementError::DegenerateInput(_)));
}

#[test]
fn test_surface_query_ray_cases() {
    let mesh = slab();
    let patch = MeshFlattener::new(&mesh).flatten(&[2, 3]).unwrap();
    let down = DVec3::NEG_Z;

    assert!(patch.surface.occupied(DVec3::new(0.0, 0.0, 1.0), down));
    assert!(!patch.surface.occupied(DVec3::new(5.0, 0.0, 1.0), down));
    // Parallel to the patch
    assert!(!patch.surface.occupied(DVec3::new(0.0, 0.0, 1.0), DVec3::X));
    // Pointing away from the patch
    assert!(!patch.surface.occupied(DVec3::new(0.0, 0.0, 1.0), DVec3::Z));
}

#[test]
fn test_bucketed_lookup_matches_brute_force() {
    let plane = create_grid_plane(3.0, 2.0, 12, 8).unwrap();
    let triangles: Vec<[DVec2; 3]> = (0..plane.triangle_count())
        .map(|f| plane.face_corners(f).map(|p| p.truncate()))
        .collect();
    // Punch a hole by dropping every fifth triangle
    let kept: Vec<[DVec2; 3]> = triangles
        .iter()
        .enumerate()
        .filter(|(i, _)| i % 5 != 0)
        .map(|(_, t)| *t)
        .collect();
    let patch = PlanarPatch::new(kept.clone()).unwrap();

    let bounds = patch.bounds();
    for iy in 0..40 {
        for ix in 0..60 {
            let p = DVec2::new(
                bounds.min.x + (ix as f64 + 0.37) * bounds.width() / 60.0,
                bounds.min.y + (iy as f64 + 0.61) * bounds.height() / 40.0,
            );
            let brute = kept.iter().any(|&[a, b, c]| point_in_triangle(p, a, b, c));
            assert_eq!(patch.contains(p), brute, "mismatch at {p:?}");
        }
    }
}

#[test]
fn test_planar_patch_requires_triangles() {
    assert!(PlanarPatch::new(Vec::new()).is_err());
}
