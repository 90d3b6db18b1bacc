//! # Configuration Constants
//!
//! Centralized constants for the marker embedding pipeline. All geometry
//! tolerances, sampling parameters and request defaults are defined here.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Clustering**: Flat-region thresholds
//! - **Rasterization**: Occupancy grid sampling parameters
//! - **Request Defaults**: Default values and bounds for `EmbedConfig`
//! - **Marker Paths**: SVG output parameters

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for floating-point comparisons.
///
/// Used for degenerate-extent checks (zero-width patches, zero-length
/// normals) and general approximate equality.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn approximately_equal(a: f64, b: f64) -> bool {
///     (a - b).abs() < EPSILON
/// }
///
/// assert!(approximately_equal(1.0, 1.0 + 1e-11));
/// ```
pub const EPSILON: f64 = 1e-10;

/// Minimum triangle area considered non-degenerate.
///
/// Faces below this area still participate in adjacency but carry a zero
/// normal, so they never pass a flatness test.
pub const DEGENERATE_AREA_EPSILON: f64 = 1e-12;

// =============================================================================
// CLUSTERING CONSTANTS
// =============================================================================

/// Angle (radians) within which a face counts as bottom-facing.
///
/// When `ignore_bottom` is set, faces whose normal lies within this angle of
/// [`DOWN`] are never used as cluster seeds. 0.26 rad is roughly 15 degrees.
pub const BOTTOM_EXCLUSION_ANGLE: f64 = 0.26;

/// World "down" direction used by the bottom-exclusion test.
pub const DOWN: [f64; 3] = [0.0, 0.0, -1.0];

/// Maximum normal deviation (radians) from the seed face kept by manual
/// site selection.
pub const MANUAL_MAX_NORMAL_DEVIATION: f64 = 1.0;

// =============================================================================
// RASTERIZATION CONSTANTS
// =============================================================================

/// Horizontal sample count at accuracy 1.0 (before the `+ 1`).
///
/// # Example
///
/// ```rust
/// use config::constants::BASE_RESOLUTION;
///
/// let dimx = (BASE_RESOLUTION as f64 * 0.5).floor() as usize + 1;
/// assert_eq!(dimx, 151);
/// ```
pub const BASE_RESOLUTION: usize = 300;

/// Height above the flattened patch from which occupancy rays start.
pub const RAY_START_CLEARANCE: f64 = 1.0;

/// Target number of triangles per bucket in the occupancy acceleration grid.
pub const TRIANGLES_PER_BUCKET: usize = 4;

/// Upper bound on buckets per axis in the occupancy acceleration grid.
pub const MAX_BUCKETS_PER_AXIS: usize = 256;

/// Upper bound on `dimx * dimy` for one occupancy grid.
///
/// Sliver patches whose aspect ratio would exceed this are treated as
/// degenerate rather than sampled.
pub const MAX_GRID_CELLS: usize = 4_000_000;

// =============================================================================
// REQUEST DEFAULTS AND BOUNDS
// =============================================================================

/// Default flatness threshold (radians).
pub const DEFAULT_SHARPNESS: f64 = 0.1;

/// Largest accepted flatness threshold (radians).
pub const MAX_SHARPNESS: f64 = 2.0;

/// Default sampling accuracy multiplier.
pub const DEFAULT_ACCURACY: f64 = 1.0;

/// Largest accepted sampling accuracy multiplier.
pub const MAX_ACCURACY: f64 = 2.0;

/// Default number of embedding sites.
pub const DEFAULT_CODES: usize = 1;

/// Largest accepted number of embedding sites.
pub const MAX_CODES: usize = 10;

/// Default embedding depth below the surface.
pub const DEFAULT_OFFSET: f64 = 0.1;

/// Default marker thickness.
pub const DEFAULT_THICKNESS: f64 = 0.1;

/// Default minimum accepted square side length.
pub const DEFAULT_MIN_SIDE_LENGTH: f64 = 0.0;

/// Default maximum accepted square side length.
pub const DEFAULT_MAX_SIDE_LENGTH: f64 = 100.0;

/// Largest accepted alignment angle (degrees).
pub const MAX_ALIGN_ANGLE_DEGREES: f64 = 360.0;

// =============================================================================
// MARKER PATH CONSTANTS
// =============================================================================

/// Default number of unit cells emitted per output path.
pub const DEFAULT_CELLS_PER_PATH: usize = 32;

/// SVG namespace written on the output root element.
pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Fill color name for marked rectangles.
pub const MARK_FILL: &str = "black";

/// Fill color name for background rectangles.
pub const BACKGROUND_FILL: &str = "white";

/// Largest accepted rectangle coordinate magnitude or extent, in cells.
pub const MAX_MARKER_GRID: i64 = 1024;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Horizontal occupancy grid resolution for an accuracy multiplier.
///
/// `dimx = floor(BASE_RESOLUTION * accuracy) + 1`, so the result is never
/// zero. Negative or non-finite accuracies are treated as zero.
///
/// # Example
///
/// ```rust
/// use config::constants::resolution_for_accuracy;
///
/// assert_eq!(resolution_for_accuracy(1.0), 301);
/// assert_eq!(resolution_for_accuracy(0.0), 1);
/// assert_eq!(resolution_for_accuracy(0.75), 226);
/// ```
pub fn resolution_for_accuracy(accuracy: f64) -> usize {
    let accuracy = if accuracy.is_finite() { accuracy.max(0.0) } else { 0.0 };
    (BASE_RESOLUTION as f64 * accuracy).floor() as usize + 1
}
