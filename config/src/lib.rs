//! # Config Crate
//!
//! Centralized configuration for the marker embedding pipeline.
//! All magic numbers and tunable parameters are defined here so the
//! clustering, rasterization and marker compilation crates agree on them.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{BASE_RESOLUTION, EPSILON};
//! use config::embed::EmbedConfig;
//!
//! let cfg = EmbedConfig::default();
//! assert!(cfg.validate().is_ok());
//!
//! // Horizontal sample count for the default accuracy
//! let dimx = (BASE_RESOLUTION as f64 * cfg.accuracy).floor() as usize + 1;
//! assert_eq!(dimx, 301);
//! assert!(EPSILON < 1e-6);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Explicit Configuration**: Requests are plain values passed by the caller
//! - **Validated**: `EmbedConfig` rejects out-of-range values on construction

pub mod constants;
pub mod embed;
