//! # Flat Region Clustering
//!
//! Groups mesh faces into connected flat regions and ranks them by area.
//!
//! Two edge-adjacent faces belong to the same region when the angle
//! between their normals is at most the sharpness threshold. Every face
//! is claimed by at most one cluster: a face already absorbed by a larger
//! walk is never used as a seed again, so the result is a partition of
//! the non-excluded faces into connected components.

mod manual;


use std::collections::VecDeque;

use config::constants::{BOTTOM_EXCLUSION_ANGLE, DOWN};
use config::embed::EmbedConfig;
use glam::DVec3;
use marker_mesh::{angle_between_norms, FaceGraph};
use tracing::debug;

pub use manual::{select_manual_region, ManualSelection};

/// Parameters for automatic clustering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterParams {
    /// Maximum angle in radians between adjacent normals in one cluster.
    pub sharpness: f64,
    /// Skip seeds whose normal points within ~15° of straight down.
    pub ignore_bottom: bool,
}

impl From<&EmbedConfig> for ClusterParams {
    fn from(config: &EmbedConfig) -> Self {
        Self {
            sharpness: config.sharpness,
            ignore_bottom: config.ignore_bottom,
        }
    }
}

/// A connected set of near-coplanar faces.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatCluster {
    /// Face the region was grown from.
    pub seed: usize,
    /// Member faces in ascending order.
    pub faces: Vec<usize>,
    /// Sum of member face areas.
    pub area: f64,
}

impl FlatCluster {
    /// Number of member faces.
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// True when the cluster has no faces.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
}

/// True when two normals are close enough to share a region.
///
/// Degenerate faces carry a zero normal and never join a neighbor.
#[inline]
pub(crate) fn is_flat_edge(a: DVec3, b: DVec3, sharpness: f64) -> bool {
    if a == DVec3::ZERO || b == DVec3::ZERO {
        return false;
    }
    angle_between_norms(a, b) <= sharpness
}

/// True when a normal points within [`BOTTOM_EXCLUSION_ANGLE`] of `-Z`.
#[inline]
pub fn is_bottom_facing(normal: DVec3) -> bool {
    normal != DVec3::ZERO && angle_between_norms(normal, DVec3::from_array(DOWN)) < BOTTOM_EXCLUSION_ANGLE
}

/// Breadth-first walk from `seed` across flat edges.
///
/// Returns the member faces in ascending order. The seed is always a
/// member, even when it is degenerate.
///
/// # Example
///
/// ```rust
/// use marker_mesh::primitives::create_cuboid;
/// use marker_mesh::FaceTopology;
/// use marker_placement::cluster::grow_flat_region;
/// use glam::DVec3;
///
/// let cube = create_cuboid(DVec3::splat(1.0), true).unwrap();
/// let topology = FaceTopology::from_mesh(&cube);
/// // Each side of a cube is two coplanar triangles
/// assert_eq!(grow_flat_region(&topology, 0, 0.1).len(), 2);
/// ```
pub fn grow_flat_region<G: FaceGraph + ?Sized>(graph: &G, seed: usize, sharpness: f64) -> Vec<usize> {
    let mut visited = vec![false; graph.face_count()];
    grow_into(graph, seed, sharpness, &mut visited, |_| true)
}

/// Flood fill shared by automatic and manual selection.
///
/// `visited` is updated in place; `accept` filters which faces may be
/// entered besides the seed.
pub(crate) fn grow_into<G, F>(
    graph: &G,
    seed: usize,
    sharpness: f64,
    visited: &mut [bool],
    accept: F,
) -> Vec<usize>
where
    G: FaceGraph + ?Sized,
    F: Fn(usize) -> bool,
{
    let mut region = Vec::new();
    let mut queue = VecDeque::new();

    visited[seed] = true;
    queue.push_back(seed);

    while let Some(face) = queue.pop_front() {
        region.push(face);
        let normal = graph.normal(face);

        for &neighbor in graph.neighbors(face) {
            if visited[neighbor] || !accept(neighbor) {
                continue;
            }
            if is_flat_edge(normal, graph.normal(neighbor), sharpness) {
                visited[neighbor] = true;
                queue.push_back(neighbor);
            }
        }
    }

    region.sort_unstable();
    region
}

/// Partitions a mesh into flat clusters sorted by descending area.
///
/// Seeds are visited in ascending face order. Ties in area keep that
/// order, so the ranking is fully deterministic. An empty mesh yields
/// an empty list.
pub fn find_flat_clusters<G: FaceGraph + ?Sized>(graph: &G, params: ClusterParams) -> Vec<FlatCluster> {
    let face_count = graph.face_count();
    let mut visited = vec![false; face_count];
    let mut clusters = Vec::new();
    let mut excluded = 0usize;

    for seed in 0..face_count {
        if visited[seed] {
            continue;
        }
        if params.ignore_bottom && is_bottom_facing(graph.normal(seed)) {
            excluded += 1;
            continue;
        }

        let faces = grow_into(graph, seed, params.sharpness, &mut visited, |_| true);
        let area = faces.iter().map(|&f| graph.area(f)).sum();
        clusters.push(FlatCluster { seed, faces, area });
    }

    clusters.sort_by(|a, b| b.area.total_cmp(&a.area));

    debug!(
        faces = face_count,
        clusters = clusters.len(),
        excluded_seeds = excluded,
        "Clustered flat regions"
    );

    clusters
}
