//! Marker alignment about the patch normal.
//!
//! A square has four-fold symmetry, so leveling it only needs a twist in
//! `[-45°, 45°]`. After leveling, the edge joining the two corners lowest
//! along the alignment axis is perpendicular to that axis.

use std::f64::consts::FRAC_PI_2;

use config::constants::EPSILON;
use config::embed::Alignment;
use glam::DVec3;

/// Twist in radians about `normal` that levels an edge running along
/// `edge`, plus the user angle from `alignment`.
///
/// When the normal is parallel to the alignment axis every edge is
/// already level and only the user angle applies.
pub fn alignment_twist(normal: DVec3, edge: DVec3, alignment: &Alignment) -> f64 {
    let user = alignment.angle_degrees.to_radians();
    let axis = DVec3::from_array(alignment.plane.normal());

    let Some(level) = normal.cross(axis).try_normalize() else {
        return user;
    };
    if edge.length_squared() <= EPSILON * EPSILON {
        return user;
    }

    let signed = normal.dot(edge.cross(level)).atan2(edge.dot(level));
    let quarter_turns = (signed / FRAC_PI_2).round();
    signed - quarter_turns * FRAC_PI_2 + user
}
