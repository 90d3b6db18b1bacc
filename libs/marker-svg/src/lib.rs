//! # Marker SVG
//!
//! Turns marker artwork drawn with black and white rectangles into an
//! SVG whose paths trace each marked unit cell.
//!
//! ## Usage
//!
//! ```rust
//! use marker_svg::{compile_marker, read_compiled_svg, PathGrouping};
//!
//! let artwork = r#"<svg viewBox="0 0 6 6">
//!     <rect x="0" y="0" width="6" height="6" fill="black"/>
//!     <rect x="1" y="1" width="4" height="4" fill="white"/>
//!     <rect x="2" y="2" width="1" height="1" fill="black"/>
//! </svg>"#;
//!
//! let marker = compile_marker(artwork, PathGrouping::default()).unwrap();
//! assert_eq!(marker.cells.len(), 21);
//!
//! let svg = marker.to_svg().unwrap();
//! assert_eq!(read_compiled_svg(&svg).unwrap(), marker.cells);
//! ```

pub mod cells;
pub mod error;
pub mod path;
pub mod rect;
pub mod svg;

pub use cells::UnitSquareSet;
pub use error::{MarkerError, MarkerResult};
pub use path::{group_cells, PathGroup, PathGrouping};
pub use rect::{parse_marker_svg, MarkerColor, MarkerDocument, MarkerRect, ViewBox};
pub use svg::{compile_marker, read_compiled_svg, write_svg, CompiledMarker};
