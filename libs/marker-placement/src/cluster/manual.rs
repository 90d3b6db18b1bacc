//! Manual patch selection.
//!
//! The user picks one or more faces; each pick grows into a flat region
//! which is then trimmed to faces near the pick, both in normal direction
//! and in distance, and reduced to the part still connected to the pick.

use config::constants::MANUAL_MAX_NORMAL_DEVIATION;
use config::embed::EmbedConfig;
use marker_mesh::{angle_between_norms, FaceGraph};

use super::{grow_flat_region, grow_into, FlatCluster};
use crate::error::{PlacementError, PlacementResult};

/// Limits applied around a picked face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ManualSelection {
    /// Flatness threshold for the initial walk.
    pub sharpness: f64,
    /// Maximum angle between a member normal and the picked normal.
    pub max_normal_deviation: f64,
    /// Maximum centroid distance from the picked face.
    pub max_distance: f64,
}

impl From<&EmbedConfig> for ManualSelection {
    fn from(config: &EmbedConfig) -> Self {
        Self {
            sharpness: config.sharpness,
            max_normal_deviation: MANUAL_MAX_NORMAL_DEVIATION,
            max_distance: config.max_side_length,
        }
    }
}

/// Grows and trims a patch around a picked face.
///
/// # Errors
///
/// Returns [`PlacementError::InvalidFace`] when `seed` is out of range.
pub fn select_manual_region<G: FaceGraph + ?Sized>(
    graph: &G,
    seed: usize,
    selection: ManualSelection,
) -> PlacementResult<FlatCluster> {
    let face_count = graph.face_count();
    if seed >= face_count {
        return Err(PlacementError::InvalidFace { face: seed, face_count });
    }

    let seed_normal = graph.normal(seed);
    let seed_centroid = graph.centroid(seed);

    let mut keep = vec![false; face_count];
    for face in grow_flat_region(graph, seed, selection.sharpness) {
        let close_normal = angle_between_norms(graph.normal(face), seed_normal) <= selection.max_normal_deviation;
        let close_centroid = graph.centroid(face).distance(seed_centroid) <= selection.max_distance;
        keep[face] = close_normal && close_centroid;
    }

    // Trimming can split the region; only the part touching the pick stays
    let mut visited = vec![false; face_count];
    let faces = grow_into(graph, seed, selection.sharpness, &mut visited, |f| keep[f]);
    let area = faces.iter().map(|&f| graph.area(f)).sum();

    Ok(FlatCluster { seed, faces, area })
}
