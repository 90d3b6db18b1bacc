//! JSON response records returned to JavaScript.
//!
//! Vectors serialize as `[x, y, z]` and rotations as `[x, y, z, w]`.

use glam::{DQuat, DVec3};
use marker_placement::site::{EmbedPlan, EmbedSite, SkipReason, SkippedSite};
use serde::Serialize;

/// Planned marker sites.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanResponse {
    pub sites: Vec<SiteRecord>,
    pub skipped: Vec<SkippedRecord>,
    pub requested: usize,
    pub available: usize,
    pub shortfall: usize,
}

/// One placed marker.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteRecord {
    pub index: usize,
    pub seed_face: usize,
    pub region_area: f64,
    pub side_length: f64,
    pub shrunk: bool,
    /// `[top_left, top_right, bottom_left, bottom_right]`.
    pub corners: [DVec3; 4],
    pub center: DVec3,
    pub normal: DVec3,
    pub rotation: DQuat,
    pub twist: f64,
    pub embed_center: DVec3,
    pub thickness: f64,
}

/// One rejected region.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedRecord {
    pub index: usize,
    pub seed_face: usize,
    /// `tooSmall`, `tooLarge` or `degenerate`.
    pub reason: &'static str,
    pub message: String,
}

impl From<&EmbedPlan> for PlanResponse {
    fn from(plan: &EmbedPlan) -> Self {
        Self {
            sites: plan.sites.iter().map(SiteRecord::from).collect(),
            skipped: plan.skipped.iter().map(SkippedRecord::from).collect(),
            requested: plan.requested,
            available: plan.available,
            shortfall: plan.shortfall(),
        }
    }
}

impl From<&EmbedSite> for SiteRecord {
    fn from(site: &EmbedSite) -> Self {
        Self {
            index: site.index,
            seed_face: site.cluster_seed,
            region_area: site.cluster_area,
            side_length: site.side_length,
            shrunk: site.shrunk,
            corners: site.corners.to_array(),
            center: site.center,
            normal: site.normal,
            rotation: site.rotation,
            twist: site.twist,
            embed_center: site.embed_center,
            thickness: site.thickness,
        }
    }
}

impl From<&SkippedSite> for SkippedRecord {
    fn from(skipped: &SkippedSite) -> Self {
        let reason = match skipped.reason {
            SkipReason::TooSmall { .. } => "tooSmall",
            SkipReason::TooLarge { .. } => "tooLarge",
            SkipReason::Degenerate(_) => "degenerate",
        };
        Self {
            index: skipped.index,
            seed_face: skipped.cluster_seed,
            reason,
            message: skipped.reason.to_string(),
        }
    }
}
