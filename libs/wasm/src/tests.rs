//! Tests for the WASM-facing helpers.

use super::*;
use approx::assert_relative_eq;
use marker_mesh::primitives::create_cuboid;

/// Flat buffers for a 4 x 2 x 1 box centered on the origin.
fn slab_buffers() -> (Vec<f64>, Vec<u32>) {
    let mesh = create_cuboid(glam::DVec3::new(4.0, 2.0, 1.0), true).expect("valid box");
    let vertices = mesh.vertices().iter().flat_map(|v| v.to_array()).collect();
    let indices = mesh.triangles().iter().flatten().copied().collect();
    (vertices, indices)
}

/// Compiling a 2 x 2 black square yields one path with four cells.
#[test]
fn compile_two_by_two_marker() {
    let svg = r#"<svg><rect x="0" y="0" width="2" height="2" fill="black"/></svg>"#;
    let out = compile_marker_svg_internal(svg, "{}").expect("compiles");
    assert_eq!(out.matches("<path").count(), 1);
    for cell in ["M0,0h1v1h-1z", "M1,0h1v1h-1z", "M0,1h1v1h-1z", "M1,1h1v1h-1z"] {
        assert!(out.contains(cell), "missing {cell}");
    }
}

#[test]
fn compile_honors_row_grouping() {
    let svg = r#"<svg><rect width="3" height="3" fill="black"/></svg>"#;
    let out = compile_marker_svg_internal(svg, r#"{"grouping": {"mode": "rows"}}"#).expect("compiles");
    assert_eq!(out.matches("<path").count(), 3);
}

#[test]
fn compile_reports_bad_input() {
    let err = compile_marker_svg_internal("<svg></svg>", "{}").unwrap_err();
    assert!(matches!(err, WasmError::Marker(MarkerError::EmptyInput)));

    let err = compile_marker_svg_internal("<svg></svg>", "{\"colour\": 1}").unwrap_err();
    assert!(matches!(err, WasmError::Request(_)));
}

/// Default request places one marker on the top of the slab.
#[test]
fn plan_default_request() {
    let (vertices, indices) = slab_buffers();
    let plan = plan_sites_internal(&vertices, &indices, r#"{"ignoreBottom": true}"#).expect("plans");

    assert_eq!(plan.sites.len(), 1);
    assert_eq!(plan.shortfall, 0);
    let site = &plan.sites[0];
    assert_relative_eq!(site.normal.z, 1.0, epsilon = 1e-9);
    assert!((site.side_length - 2.0).abs() < 0.05);
}

#[test]
fn plan_reports_shortfall_and_skips() {
    let (vertices, indices) = slab_buffers();
    let request = r#"{"codes": 8, "maxSideLength": 1.5}"#;
    let plan = plan_sites_internal(&vertices, &indices, request).expect("plans");

    assert_eq!(plan.requested, 8);
    assert_eq!(plan.available, 6);
    assert_eq!(plan.shortfall, 2);
    // Top and bottom squares are about 2 wide
    assert_eq!(plan.skipped.len(), 2);
    assert!(plan.skipped.iter().all(|s| s.reason == "tooLarge"));
}

#[test]
fn plan_with_selected_faces() {
    let (vertices, indices) = slab_buffers();
    let request = r#"{"selectedFaces": [4], "oversize": "shrinkToMax", "maxSideLength": 0.5}"#;
    let plan = plan_sites_internal(&vertices, &indices, request).expect("plans");

    assert_eq!(plan.sites.len(), 1);
    let site = &plan.sites[0];
    assert_eq!(site.seed_face, 4);
    assert!(site.shrunk);
    assert_relative_eq!(site.side_length, 0.5);
}

#[test]
fn plan_rejects_invalid_requests() {
    let (vertices, indices) = slab_buffers();
    let err = plan_sites_internal(&vertices, &indices, r#"{"codes": 0}"#).unwrap_err();
    assert!(matches!(err, WasmError::Config(_)));

    let err = plan_sites_internal(&vertices, &indices, r#"{"selectedFaces": [99]}"#).unwrap_err();
    assert!(matches!(err, WasmError::Placement(PlacementError::InvalidFace { .. })));

    let err = plan_sites_internal(&vertices[..5], &indices, "{}").unwrap_err();
    assert!(matches!(err, WasmError::Mesh(_)));
}

/// NaN coordinates are refused before any planning happens.
#[test]
fn non_finite_vertices_are_rejected() {
    let mut vertices = Vec::new();
    let mut indices = Vec::new();
    for t in 0..40u32 {
        let z = if t % 3 == 0 { f64::NAN } else { 0.0 };
        let x = t as f64 * 2.0;
        vertices.extend_from_slice(&[x, 0.0, z, x + 1.0, 0.0, z, x, 1.0, z]);
        indices.extend_from_slice(&[3 * t, 3 * t + 1, 3 * t + 2]);
    }
    let err = plan_sites_internal(&vertices, &indices, r#"{"codes": 3}"#).unwrap_err();
    assert!(matches!(err, WasmError::Mesh(_)));
}

#[test]
fn alignment_request_maps_to_config() {
    let request: EmbedRequest =
        serde_json::from_str(r#"{"alignment": {"plane": "xz", "angleDegrees": 45}}"#).expect("parses");
    let config = request.to_config().expect("valid");
    let alignment = config.alignment.expect("alignment set");
    assert_eq!(alignment.plane, config::embed::AlignPlane::Xz);
    assert_eq!(alignment.angle_degrees, 45.0);
}

#[test]
fn default_request_round_trips() {
    let json = default_request_json();
    let request: EmbedRequest = serde_json::from_str(&json).expect("parses");
    let config = request.to_config().expect("valid");
    assert_eq!(config, config::embed::EmbedConfig::default());
}

#[test]
fn response_serializes_vectors_as_arrays() {
    let (vertices, indices) = slab_buffers();
    let plan = plan_sites_internal(&vertices, &indices, "{}").expect("plans");
    let json = serde_json::to_value(&plan).expect("serializes");
    let center = &json["sites"][0]["center"];
    assert_eq!(center.as_array().map(Vec::len), Some(3));
    assert_eq!(json["sites"][0]["rotation"].as_array().map(Vec::len), Some(4));
}
