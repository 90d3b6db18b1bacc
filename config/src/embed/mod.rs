//! Embedding request record shared by the placement pipeline and its callers.
//!
//! An [`EmbedConfig`] is an explicit value owned by the caller and passed by
//! reference into every call; nothing in the pipeline keeps a copy between
//! invocations.

use std::fmt;

use crate::constants::{
    DEFAULT_ACCURACY, DEFAULT_CODES, DEFAULT_MAX_SIDE_LENGTH, DEFAULT_MIN_SIDE_LENGTH,
    DEFAULT_OFFSET, DEFAULT_SHARPNESS, DEFAULT_THICKNESS, MAX_ACCURACY, MAX_ALIGN_ANGLE_DEGREES,
    MAX_CODES, MAX_SHARPNESS,
};

/// What to do with a square whose side exceeds `max_side_length`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OversizePolicy {
    /// Drop the site and continue with the next one.
    #[default]
    Reject,
    /// Scale the square about its center down to `max_side_length`.
    ShrinkToMax,
}

/// World plane a marker edge is aligned against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignPlane {
    /// The XY plane (normal +Z).
    Xy,
    /// The YZ plane (normal +X).
    Yz,
    /// The XZ plane (normal +Y).
    Xz,
}

impl AlignPlane {
    /// Unit normal of the plane.
    ///
    /// # Examples
    /// ```
    /// use config::embed::AlignPlane;
    /// assert_eq!(AlignPlane::Yz.normal(), [1.0, 0.0, 0.0]);
    /// ```
    pub fn normal(self) -> [f64; 3] {
        match self {
            AlignPlane::Xy => [0.0, 0.0, 1.0],
            AlignPlane::Yz => [1.0, 0.0, 0.0],
            AlignPlane::Xz => [0.0, 1.0, 0.0],
        }
    }
}

/// Fixed local-Z twist applied to every accepted marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Alignment {
    /// Plane the reference edge is measured against.
    pub plane: AlignPlane,
    /// Extra rotation about the marker normal, in degrees.
    pub angle_degrees: f64,
}

/// Request record for one embedding job.
///
/// # Examples
/// ```
/// use config::embed::EmbedConfig;
///
/// let cfg = EmbedConfig::default()
///     .with_codes(3)
///     .with_side_limits(0.5, 20.0);
/// assert!(cfg.validate().is_ok());
/// assert_eq!(cfg.codes, 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmbedConfig {
    /// Maximum normal angle (radians) between adjacent faces of one cluster.
    pub sharpness: f64,
    /// Sampling resolution multiplier for the occupancy grid.
    pub accuracy: f64,
    /// Skip cluster seeds facing straight down.
    pub ignore_bottom: bool,
    /// Number of embedding sites requested.
    pub codes: usize,
    /// Smallest accepted world-space side length.
    pub min_side_length: f64,
    /// Largest accepted world-space side length.
    pub max_side_length: f64,
    /// Depth below the surface at which the marker is placed.
    pub offset: f64,
    /// Marker thickness.
    pub thickness: f64,
    /// Handling of squares larger than `max_side_length`.
    pub oversize: OversizePolicy,
    /// Optional fixed twist about the marker normal.
    pub alignment: Option<Alignment>,
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            sharpness: DEFAULT_SHARPNESS,
            accuracy: DEFAULT_ACCURACY,
            ignore_bottom: false,
            codes: DEFAULT_CODES,
            min_side_length: DEFAULT_MIN_SIDE_LENGTH,
            max_side_length: DEFAULT_MAX_SIDE_LENGTH,
            offset: DEFAULT_OFFSET,
            thickness: DEFAULT_THICKNESS,
            oversize: OversizePolicy::Reject,
            alignment: None,
        }
    }
}

impl EmbedConfig {
    /// Builds a configuration from the core request fields, validating them.
    ///
    /// # Examples
    /// ```
    /// use config::embed::{ConfigError, EmbedConfig};
    ///
    /// let cfg = EmbedConfig::new(0.2, 1.0, true, 2).expect("valid config");
    /// assert!(cfg.ignore_bottom);
    /// assert_eq!(
    ///     EmbedConfig::new(0.2, 1.0, true, 0).unwrap_err(),
    ///     ConfigError::InvalidCodes(0)
    /// );
    /// ```
    pub fn new(
        sharpness: f64,
        accuracy: f64,
        ignore_bottom: bool,
        codes: usize,
    ) -> Result<Self, ConfigError> {
        let cfg = Self {
            sharpness,
            accuracy,
            ignore_bottom,
            codes,
            ..Self::default()
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Checks every field against its accepted range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.sharpness.is_finite() || !(0.0..=MAX_SHARPNESS).contains(&self.sharpness) {
            return Err(ConfigError::InvalidSharpness(self.sharpness));
        }
        if !self.accuracy.is_finite() || !(0.0..=MAX_ACCURACY).contains(&self.accuracy) {
            return Err(ConfigError::InvalidAccuracy(self.accuracy));
        }
        if !(1..=MAX_CODES).contains(&self.codes) {
            return Err(ConfigError::InvalidCodes(self.codes));
        }
        if !self.min_side_length.is_finite()
            || !self.max_side_length.is_finite()
            || self.min_side_length < 0.0
            || self.max_side_length <= 0.0
            || self.min_side_length > self.max_side_length
        {
            return Err(ConfigError::InvalidSideLimits {
                min: self.min_side_length,
                max: self.max_side_length,
            });
        }
        if !self.offset.is_finite() || self.offset < 0.0 {
            return Err(ConfigError::InvalidOffset(self.offset));
        }
        if !self.thickness.is_finite() || self.thickness < 0.0 {
            return Err(ConfigError::InvalidThickness(self.thickness));
        }
        if let Some(alignment) = self.alignment {
            let angle = alignment.angle_degrees;
            if !angle.is_finite() || !(0.0..=MAX_ALIGN_ANGLE_DEGREES).contains(&angle) {
                return Err(ConfigError::InvalidAlignAngle(angle));
            }
        }
        Ok(())
    }

    /// Sets the number of requested sites.
    pub fn with_codes(mut self, codes: usize) -> Self {
        self.codes = codes;
        self
    }

    /// Sets the flatness threshold.
    pub fn with_sharpness(mut self, sharpness: f64) -> Self {
        self.sharpness = sharpness;
        self
    }

    /// Sets the sampling accuracy multiplier.
    pub fn with_accuracy(mut self, accuracy: f64) -> Self {
        self.accuracy = accuracy;
        self
    }

    /// Enables or disables bottom-facing seed exclusion.
    pub fn with_ignore_bottom(mut self, ignore_bottom: bool) -> Self {
        self.ignore_bottom = ignore_bottom;
        self
    }

    /// Sets the accepted side length range.
    pub fn with_side_limits(mut self, min: f64, max: f64) -> Self {
        self.min_side_length = min;
        self.max_side_length = max;
        self
    }

    /// Sets the embedding depth and marker thickness.
    pub fn with_depth(mut self, offset: f64, thickness: f64) -> Self {
        self.offset = offset;
        self.thickness = thickness;
        self
    }

    /// Sets the oversize policy.
    pub fn with_oversize(mut self, oversize: OversizePolicy) -> Self {
        self.oversize = oversize;
        self
    }

    /// Sets the alignment twist.
    pub fn with_alignment(mut self, alignment: Option<Alignment>) -> Self {
        self.alignment = alignment;
        self
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// Sharpness is negative, too large or not finite.
    InvalidSharpness(f64),
    /// Accuracy is negative, too large or not finite.
    InvalidAccuracy(f64),
    /// Site count is zero or above the maximum.
    InvalidCodes(usize),
    /// Side limits are negative, inverted or not finite.
    InvalidSideLimits {
        /// Requested minimum.
        min: f64,
        /// Requested maximum.
        max: f64,
    },
    /// Offset is negative or not finite.
    InvalidOffset(f64),
    /// Thickness is negative or not finite.
    InvalidThickness(f64),
    /// Alignment angle is outside 0..=360 degrees.
    InvalidAlignAngle(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidSharpness(value) => {
                write!(f, "sharpness must be within 0..={MAX_SHARPNESS}: {value}")
            }
            ConfigError::InvalidAccuracy(value) => {
                write!(f, "accuracy must be within 0..={MAX_ACCURACY}: {value}")
            }
            ConfigError::InvalidCodes(value) => {
                write!(f, "codes must be within 1..={MAX_CODES}: {value}")
            }
            ConfigError::InvalidSideLimits { min, max } => {
                write!(f, "side limits must satisfy 0 <= min <= max, max > 0: {min}..{max}")
            }
            ConfigError::InvalidOffset(value) => write!(f, "offset must be >= 0: {value}"),
            ConfigError::InvalidThickness(value) => write!(f, "thickness must be >= 0: {value}"),
            ConfigError::InvalidAlignAngle(value) => {
                write!(f, "alignment angle must be within 0..={MAX_ALIGN_ANGLE_DEGREES}: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests;
