//! WASM-facing entry points for marker embedding.
//!
//! This crate is compiled to a `cdylib` and consumed from JavaScript via
//! `wasm-bindgen`. Each exported function has an `*_internal` twin that
//! returns Rust error types, so native tests run without a JS host.
//!
//! ```
//! let svg = r#"<svg><rect width="2" height="2" fill="black"/></svg>"#;
//! let out = marker_wasm::compile_marker_svg_internal(svg, "{}").unwrap();
//! assert!(out.contains("M0,0h1v1h-1z"));
//! ```

mod request;
mod response;

use marker_mesh::{Mesh, MeshError};
use marker_placement::site::{plan_embedding, plan_manual_embedding};
use marker_placement::PlacementError;
use marker_svg::{compile_marker, MarkerError};
use thiserror::Error;
use wasm_bindgen::prelude::*;

pub use request::{AlignmentRequest, EmbedRequest, MarkerRequest, OversizeRequest, PlaneRequest};
pub use response::{PlanResponse, SiteRecord, SkippedRecord};

/// Errors surfaced to JavaScript as messages.
#[derive(Debug, Error)]
pub enum WasmError {
    #[error("Invalid request: {0}")]
    Request(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] config::embed::ConfigError),

    #[error(transparent)]
    Mesh(#[from] MeshError),

    #[error(transparent)]
    Placement(#[from] PlacementError),

    #[error(transparent)]
    Marker(#[from] MarkerError),
}

impl From<WasmError> for JsValue {
    fn from(err: WasmError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Installs a panic hook that forwards Rust panics to the browser console.
///
/// # Examples
/// ```no_run
/// // In JavaScript: import and call once at startup.
/// // import { init_panic_hook } from "marker-wasm";
/// // init_panic_hook();
/// ```
#[wasm_bindgen]
pub fn init_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Returns the default planning request as JSON.
#[wasm_bindgen]
pub fn default_request_json() -> String {
    let request = EmbedRequest::from(&config::embed::EmbedConfig::default());
    serde_json::to_string(&request).unwrap_or_else(|_| "{}".to_string())
}

/// Compiles rectangle marker artwork into unit-cell path SVG.
///
/// `options_json` is a [`MarkerRequest`]; pass `"{}"` for defaults.
///
/// # Errors
/// Returns a JavaScript error value with a human-readable message when
/// the artwork or options cannot be read.
///
/// # Examples
/// ```no_run
/// // In JavaScript: const svg = compile_marker_svg(text, "{}");
/// ```
#[wasm_bindgen]
pub fn compile_marker_svg(svg: &str, options_json: &str) -> Result<String, JsValue> {
    compile_marker_svg_internal(svg, options_json).map_err(JsValue::from)
}

/// Host-only twin of [`compile_marker_svg`].
pub fn compile_marker_svg_internal(svg: &str, options_json: &str) -> Result<String, WasmError> {
    let options: MarkerRequest = serde_json::from_str(options_json)?;
    let marker = compile_marker(svg, options.grouping.unwrap_or_default())?;
    Ok(marker.to_svg()?)
}

/// Plans marker sites on a mesh given as flat buffers.
///
/// `vertices` holds `x, y, z` triples and `indices` holds triangle
/// corner indices. `request_json` is an [`EmbedRequest`]. The result is
/// a JSON [`PlanResponse`].
///
/// # Errors
/// Returns a JavaScript error for malformed buffers or requests, and for
/// invalid picked faces.
///
/// # Examples
/// ```no_run
/// // In JavaScript:
/// // const plan = JSON.parse(plan_sites(positions, indices, '{"codes": 3}'));
/// // plan.sites.forEach(site => console.log(site.center, site.sideLength));
/// ```
#[wasm_bindgen]
pub fn plan_sites(vertices: Vec<f64>, indices: Vec<u32>, request_json: &str) -> Result<String, JsValue> {
    let response = plan_sites_internal(&vertices, &indices, request_json)?;
    serde_json::to_string(&response).map_err(|e| JsValue::from(WasmError::from(e)))
}

/// Host-only twin of [`plan_sites`] returning the structured response.
pub fn plan_sites_internal(vertices: &[f64], indices: &[u32], request_json: &str) -> Result<PlanResponse, WasmError> {
    let request: EmbedRequest = serde_json::from_str(request_json)?;
    let config = request.to_config()?;
    let mesh = Mesh::from_buffers(vertices, indices)?;

    let plan = match &request.selected_faces {
        Some(faces) => plan_manual_embedding(&mesh, faces, &config)?,
        None => plan_embedding(&mesh, &config)?,
    };
    Ok(PlanResponse::from(&plan))
}

#[cfg(test)]
mod tests;
