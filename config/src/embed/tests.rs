//! Tests for the embedding request record.

use super::*;

/// Ensures the defaults mirror the host dialog and validate.
#[test]
fn default_config_is_valid() {
    let cfg = EmbedConfig::default();
    assert!(cfg.validate().is_ok());
    assert_eq!(cfg.codes, 1);
    assert_eq!(cfg.sharpness, 0.1);
    assert_eq!(cfg.max_side_length, 100.0);
    assert_eq!(cfg.oversize, OversizePolicy::Reject);
    assert!(cfg.alignment.is_none());
}

#[test]
fn new_validates_inputs() {
    assert_eq!(
        EmbedConfig::new(-0.1, 1.0, false, 1).unwrap_err(),
        ConfigError::InvalidSharpness(-0.1)
    );
    assert_eq!(
        EmbedConfig::new(0.1, 2.5, false, 1).unwrap_err(),
        ConfigError::InvalidAccuracy(2.5)
    );
    assert_eq!(
        EmbedConfig::new(0.1, 1.0, false, 11).unwrap_err(),
        ConfigError::InvalidCodes(11)
    );
}

#[test]
fn rejects_non_finite_values() {
    let cfg = EmbedConfig::default().with_sharpness(f64::NAN);
    assert!(matches!(cfg.validate(), Err(ConfigError::InvalidSharpness(_))));

    let cfg = EmbedConfig::default().with_depth(f64::INFINITY, 0.1);
    assert!(matches!(cfg.validate(), Err(ConfigError::InvalidOffset(_))));
}

#[test]
fn rejects_inverted_side_limits() {
    let cfg = EmbedConfig::default().with_side_limits(5.0, 1.0);
    assert_eq!(
        cfg.validate().unwrap_err(),
        ConfigError::InvalidSideLimits { min: 5.0, max: 1.0 }
    );
}

#[test]
fn rejects_zero_max_side() {
    let cfg = EmbedConfig::default().with_side_limits(0.0, 0.0);
    assert!(cfg.validate().is_err());
}

#[test]
fn rejects_negative_thickness() {
    let cfg = EmbedConfig::default().with_depth(0.1, -1.0);
    assert_eq!(cfg.validate().unwrap_err(), ConfigError::InvalidThickness(-1.0));
}

#[test]
fn alignment_angle_is_checked() {
    let ok = EmbedConfig::default().with_alignment(Some(Alignment {
        plane: AlignPlane::Xz,
        angle_degrees: 90.0,
    }));
    assert!(ok.validate().is_ok());

    let bad = EmbedConfig::default().with_alignment(Some(Alignment {
        plane: AlignPlane::Xy,
        angle_degrees: 400.0,
    }));
    assert_eq!(bad.validate().unwrap_err(), ConfigError::InvalidAlignAngle(400.0));
}

#[test]
fn align_plane_normals_are_unit_axes() {
    for plane in [AlignPlane::Xy, AlignPlane::Yz, AlignPlane::Xz] {
        let n = plane.normal();
        let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
        assert_eq!(len, 1.0);
    }
}

#[test]
fn error_messages_name_the_field() {
    assert!(ConfigError::InvalidCodes(0).to_string().contains("codes"));
    assert!(ConfigError::InvalidAccuracy(3.0).to_string().contains("accuracy"));
}
