//! # Embedding Site Planner
//!
//! Drives the full placement pipeline and turns each found square into
//! world-space instructions for cutting a marker pocket.
//!
//! ## Pipeline
//!
//! ```text
//! clusters (largest first) → flatten → rasterize → inscribed square
//!   → side-length limits → optional alignment twist → EmbedSite
//! ```
//!
//! Squares outside the configured side limits are reported as skipped,
//! never as errors. Asking for more codes than there are flat regions is
//! not an error either: the plan records both counts.

mod align;


use config::constants::resolution_for_accuracy;
use config::embed::{EmbedConfig, OversizePolicy};
use glam::{DQuat, DVec2, DVec3};
use marker_mesh::{Bounds2, FaceGraph, FaceTopology, Mesh};
use tracing::{debug, info, warn};

use crate::cluster::{find_flat_clusters, select_manual_region, FlatCluster, ManualSelection};
use crate::error::{PlacementError, PlacementResult};
use crate::flatten::{FlattenedPatch, MeshFlattener, Orientation, PatchFlattener, SurfaceQuery};
use crate::raster::rasterize;
use crate::square::{largest_inscribed_square, InscribedSquare};

pub use align::alignment_twist;

// =============================================================================
// PLAN TYPES
// =============================================================================

/// World-space corners of a placed square.
///
/// Named after their position in the flattened patch before any
/// alignment twist: top is local `+Y`, right is local `+X`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SquareCorners {
    pub top_left: DVec3,
    pub top_right: DVec3,
    pub bottom_left: DVec3,
    pub bottom_right: DVec3,
}

impl SquareCorners {
    /// Corners in `[top_left, top_right, bottom_left, bottom_right]` order.
    pub fn to_array(&self) -> [DVec3; 4] {
        [self.top_left, self.top_right, self.bottom_left, self.bottom_right]
    }
}

/// Placement instructions for one marker.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbedSite {
    /// Rank of the source region, 0 for the largest.
    pub index: usize,
    /// Face the region was grown from.
    pub cluster_seed: usize,
    /// Area of the region.
    pub cluster_area: f64,
    /// Square found in the occupancy grid.
    pub square: InscribedSquare,
    /// Grid cell size the square was measured with.
    pub interval: f64,
    /// Marker edge length in world units.
    pub side_length: f64,
    /// True when an oversize square was scaled down to the maximum.
    pub shrunk: bool,
    /// Square corners on the surface.
    pub corners: SquareCorners,
    /// Square center on the surface.
    pub center: DVec3,
    /// Outward unit normal of the region.
    pub normal: DVec3,
    /// Rotation taking marker-local axes (marker plane XY, normal `+Z`)
    /// to world axes.
    pub rotation: DQuat,
    /// Alignment twist applied about the normal, in radians.
    pub twist: f64,
    /// Center of the pocket: `center - normal * offset`.
    pub embed_center: DVec3,
    /// Pocket depth.
    pub thickness: f64,
}

/// Why a region produced no marker.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// Square side below the configured minimum.
    TooSmall { side_length: f64, min: f64 },
    /// Square side above the configured maximum under [`OversizePolicy::Reject`].
    TooLarge { side_length: f64, max: f64 },
    /// The region could not be flattened or sampled.
    Degenerate(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooSmall { side_length, min } => {
                write!(f, "side {side_length} is below minimum {min}")
            }
            Self::TooLarge { side_length, max } => {
                write!(f, "side {side_length} is above maximum {max}")
            }
            Self::Degenerate(message) => write!(f, "degenerate region: {message}"),
        }
    }
}

/// A region that produced no marker.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedSite {
    pub index: usize,
    pub cluster_seed: usize,
    pub cluster_area: f64,
    pub reason: SkipReason,
}

/// Result of planning a batch of markers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmbedPlan {
    /// Placed markers in region rank order.
    pub sites: Vec<EmbedSite>,
    /// Regions that were tried but rejected.
    pub skipped: Vec<SkippedSite>,
    /// Number of markers asked for.
    pub requested: usize,
    /// Number of regions that could be tried.
    pub available: usize,
}

impl EmbedPlan {
    /// How many requested markers had no region to try.
    pub fn shortfall(&self) -> usize {
        self.requested.saturating_sub(self.available)
    }
}

// =============================================================================
// ENTRY POINTS
// =============================================================================

/// Plans markers on the largest flat regions of a mesh.
///
/// # Errors
///
/// Fails on an invalid configuration. Degenerate or out-of-range regions
/// are reported in [`EmbedPlan::skipped`].
///
/// # Example
///
/// ```rust
/// use config::embed::EmbedConfig;
/// use marker_mesh::primitives::create_cuboid;
/// use marker_placement::site::plan_embedding;
/// use glam::DVec3;
///
/// let slab = create_cuboid(DVec3::new(4.0, 2.0, 1.0), true).unwrap();
/// let config = EmbedConfig::default().with_ignore_bottom(true);
/// let plan = plan_embedding(&slab, &config).unwrap();
///
/// let site = &plan.sites[0];
/// assert!(site.normal.abs_diff_eq(DVec3::Z, 1e-9));
/// assert!((site.side_length - 2.0).abs() < 0.05);
/// ```
pub fn plan_embedding(mesh: &Mesh, config: &EmbedConfig) -> PlacementResult<EmbedPlan> {
    let topology = FaceTopology::from_mesh(mesh);
    plan_embedding_with(&topology, &MeshFlattener::new(mesh), config)
}

/// Plans markers through caller-supplied mesh collaborators.
pub fn plan_embedding_with<G, F>(graph: &G, flattener: &F, config: &EmbedConfig) -> PlacementResult<EmbedPlan>
where
    G: FaceGraph + ?Sized,
    F: PatchFlattener,
{
    config.validate()?;

    let clusters = find_flat_clusters(graph, config.into());
    let requested = config.codes;
    let available = clusters.len();
    if available < requested {
        warn!(requested, available, "Fewer flat regions than requested markers");
    }

    let mut plan = EmbedPlan {
        requested,
        available,
        ..EmbedPlan::default()
    };
    for (index, cluster) in clusters.iter().take(requested).enumerate() {
        plan_cluster(&mut plan, index, cluster, flattener, config)?;
    }

    log_summary(&plan);
    Ok(plan)
}

/// Plans one marker per picked face, growing each pick into a patch.
///
/// # Errors
///
/// Fails on an invalid configuration, an empty selection or a face
/// index outside the mesh.
pub fn plan_manual_embedding(mesh: &Mesh, selected: &[usize], config: &EmbedConfig) -> PlacementResult<EmbedPlan> {
    config.validate()?;
    if selected.is_empty() {
        return Err(PlacementError::degenerate("no faces selected"));
    }

    let topology = FaceTopology::from_mesh(mesh);
    let flattener = MeshFlattener::new(mesh);
    let selection = ManualSelection::from(config);

    let mut plan = EmbedPlan {
        requested: selected.len(),
        available: selected.len(),
        ..EmbedPlan::default()
    };
    for (index, &face) in selected.iter().enumerate() {
        let cluster = select_manual_region(&topology, face, selection)?;
        debug!(face, members = cluster.len(), area = cluster.area, "Grew manual patch");
        plan_cluster(&mut plan, index, &cluster, &flattener, config)?;
    }

    log_summary(&plan);
    Ok(plan)
}

// =============================================================================
// PER-REGION PLACEMENT
// =============================================================================

fn plan_cluster<F: PatchFlattener>(
    plan: &mut EmbedPlan,
    index: usize,
    cluster: &FlatCluster,
    flattener: &F,
    config: &EmbedConfig,
) -> PlacementResult<()> {
    let outcome = match flattener.flatten(&cluster.faces) {
        Ok(patch) => place_on_patch(&patch, config)?,
        Err(PlacementError::DegenerateInput(message)) => Err(SkipReason::Degenerate(message)),
        Err(err) => return Err(err),
    };

    match outcome {
        Ok(placed) => {
            debug!(
                index,
                seed = cluster.seed,
                side_length = placed.side_length,
                "Placed marker"
            );
            plan.sites.push(placed.into_site(index, cluster, config));
        }
        Err(reason) => {
            info!(index, seed = cluster.seed, %reason, "Skipped region");
            plan.skipped.push(SkippedSite {
                index,
                cluster_seed: cluster.seed,
                cluster_area: cluster.area,
                reason,
            });
        }
    }
    Ok(())
}

/// Square chosen on a flattened patch, still in patch-local terms.
struct PlacedSquare {
    square: InscribedSquare,
    interval: f64,
    side_length: f64,
    shrunk: bool,
    local: Bounds2,
    orientation: Orientation,
}

fn place_on_patch<S: SurfaceQuery>(
    patch: &FlattenedPatch<S>,
    config: &EmbedConfig,
) -> PlacementResult<Result<PlacedSquare, SkipReason>> {
    let dimx = resolution_for_accuracy(config.accuracy);
    let grid = match rasterize(&patch.surface, &patch.bounds, dimx) {
        Ok(grid) => grid,
        Err(PlacementError::DegenerateInput(message)) => return Ok(Err(SkipReason::Degenerate(message))),
        Err(err) => return Err(err),
    };

    let square = largest_inscribed_square(&grid);
    let Some(mut local) = square.local_bounds(&grid) else {
        return Ok(Err(SkipReason::Degenerate("no occupied cells".to_string())));
    };

    let mut side_length = square.side_length(grid.interval());
    let mut shrunk = false;
    if side_length > config.max_side_length {
        match config.oversize {
            OversizePolicy::Reject => {
                return Ok(Err(SkipReason::TooLarge {
                    side_length,
                    max: config.max_side_length,
                }));
            }
            OversizePolicy::ShrinkToMax => {
                local = shrink_about_center(&local, config.max_side_length);
                side_length = config.max_side_length;
                shrunk = true;
            }
        }
    }
    if side_length < config.min_side_length {
        return Ok(Err(SkipReason::TooSmall {
            side_length,
            min: config.min_side_length,
        }));
    }

    Ok(Ok(PlacedSquare {
        square,
        interval: grid.interval(),
        side_length,
        shrunk,
        local,
        orientation: patch.orientation,
    }))
}

fn shrink_about_center(bounds: &Bounds2, side: f64) -> Bounds2 {
    let center = (bounds.min + bounds.max) * 0.5;
    let half = DVec2::splat(side * 0.5);
    Bounds2::new(center - half, center + half)
}

impl PlacedSquare {
    fn into_site(self, index: usize, cluster: &FlatCluster, config: &EmbedConfig) -> EmbedSite {
        let normal = self.orientation.normal();
        let twist = config.alignment.as_ref().map_or(0.0, |alignment| {
            alignment_twist(normal, self.orientation.rotation * DVec3::X, alignment)
        });
        let rotation = self.orientation.rotation * DQuat::from_rotation_z(twist);

        let center_local = (self.local.min + self.local.max) * 0.5;
        let center = self.orientation.to_world(center_local.extend(0.0));
        let corner = |local: DVec2| center + rotation * (local - center_local).extend(0.0);

        let Bounds2 { min, max } = self.local;
        let corners = SquareCorners {
            top_left: corner(DVec2::new(min.x, max.y)),
            top_right: corner(max),
            bottom_left: corner(min),
            bottom_right: corner(DVec2::new(max.x, min.y)),
        };

        EmbedSite {
            index,
            cluster_seed: cluster.seed,
            cluster_area: cluster.area,
            square: self.square,
            interval: self.interval,
            side_length: self.side_length,
            shrunk: self.shrunk,
            corners,
            center,
            normal,
            rotation,
            twist,
            embed_center: center - normal * config.offset,
            thickness: config.thickness,
        }
    }
}

fn log_summary(plan: &EmbedPlan) {
    info!(
        requested = plan.requested,
        available = plan.available,
        placed = plan.sites.len(),
        skipped = plan.skipped.len(),
        "Planned marker sites"
    );
}
