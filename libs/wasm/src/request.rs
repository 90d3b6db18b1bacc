//! JSON request records accepted from JavaScript.
//!
//! Every field is optional; missing fields take the [`EmbedConfig`]
//! defaults. Field names follow JavaScript casing.

use config::embed::{AlignPlane, Alignment, ConfigError, EmbedConfig, OversizePolicy};
use marker_svg::PathGrouping;
use serde::{Deserialize, Serialize};

/// Site planning request.
///
/// ```json
/// { "sharpness": 0.1, "accuracy": 1.0, "ignoreBottom": true, "codes": 3,
///   "maxSideLength": 20.0, "oversize": "shrinkToMax",
///   "alignment": { "plane": "xy", "angleDegrees": 0.0 },
///   "selectedFaces": [12, 40] }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct EmbedRequest {
    pub sharpness: Option<f64>,
    pub accuracy: Option<f64>,
    pub ignore_bottom: Option<bool>,
    pub codes: Option<usize>,
    pub min_side_length: Option<f64>,
    pub max_side_length: Option<f64>,
    pub offset: Option<f64>,
    pub thickness: Option<f64>,
    pub oversize: Option<OversizeRequest>,
    pub alignment: Option<AlignmentRequest>,
    /// Picked faces; when present, sites grow from these instead of the
    /// largest flat regions.
    pub selected_faces: Option<Vec<usize>>,
}

/// Oversize handling choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OversizeRequest {
    Reject,
    ShrinkToMax,
}

/// Alignment choice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AlignmentRequest {
    pub plane: PlaneRequest,
    #[serde(default)]
    pub angle_degrees: f64,
}

/// World plane whose normal the marker is leveled against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaneRequest {
    Xy,
    Yz,
    Xz,
}

impl EmbedRequest {
    /// Builds and validates the configuration record.
    pub fn to_config(&self) -> Result<EmbedConfig, ConfigError> {
        let defaults = EmbedConfig::default();
        let config = EmbedConfig::new(
            self.sharpness.unwrap_or(defaults.sharpness),
            self.accuracy.unwrap_or(defaults.accuracy),
            self.ignore_bottom.unwrap_or(defaults.ignore_bottom),
            self.codes.unwrap_or(defaults.codes),
        )?
        .with_side_limits(
            self.min_side_length.unwrap_or(defaults.min_side_length),
            self.max_side_length.unwrap_or(defaults.max_side_length),
        )
        .with_depth(
            self.offset.unwrap_or(defaults.offset),
            self.thickness.unwrap_or(defaults.thickness),
        )
        .with_oversize(match self.oversize {
            Some(OversizeRequest::ShrinkToMax) => OversizePolicy::ShrinkToMax,
            Some(OversizeRequest::Reject) | None => OversizePolicy::Reject,
        })
        .with_alignment(self.alignment.map(|a| Alignment {
            plane: match a.plane {
                PlaneRequest::Xy => AlignPlane::Xy,
                PlaneRequest::Yz => AlignPlane::Yz,
                PlaneRequest::Xz => AlignPlane::Xz,
            },
            angle_degrees: a.angle_degrees,
        }));

        config.validate()?;
        Ok(config)
    }
}

impl From<&EmbedConfig> for EmbedRequest {
    fn from(config: &EmbedConfig) -> Self {
        Self {
            sharpness: Some(config.sharpness),
            accuracy: Some(config.accuracy),
            ignore_bottom: Some(config.ignore_bottom),
            codes: Some(config.codes),
            min_side_length: Some(config.min_side_length),
            max_side_length: Some(config.max_side_length),
            offset: Some(config.offset),
            thickness: Some(config.thickness),
            oversize: Some(match config.oversize {
                OversizePolicy::Reject => OversizeRequest::Reject,
                OversizePolicy::ShrinkToMax => OversizeRequest::ShrinkToMax,
            }),
            alignment: config.alignment.map(|a| AlignmentRequest {
                plane: match a.plane {
                    AlignPlane::Xy => PlaneRequest::Xy,
                    AlignPlane::Yz => PlaneRequest::Yz,
                    AlignPlane::Xz => PlaneRequest::Xz,
                },
                angle_degrees: a.angle_degrees,
            }),
            selected_faces: None,
        }
    }
}

/// Marker compilation request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct MarkerRequest {
    /// Path grouping; `{"mode": "chunks", "max_cells": 32}` or `{"mode": "rows"}`.
    pub grouping: Option<PathGrouping>,
}
