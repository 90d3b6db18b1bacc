//! # Occupancy Rasterization
//!
//! Samples a flattened patch on a regular grid by casting a ray straight
//! down through the center of every cell.
//!
//! Row 0 is the top of the patch (largest local Y) and column 0 its left
//! edge (smallest local X). The horizontal resolution comes from the
//! accuracy setting; the vertical one follows the patch aspect ratio so
//! cells are square.


use config::constants::{EPSILON, MAX_GRID_CELLS, RAY_START_CLEARANCE};
use glam::{DVec2, DVec3};
use marker_mesh::Bounds2;
use rayon::prelude::*;
use tracing::debug;

use crate::error::{PlacementError, PlacementResult};
use crate::flatten::SurfaceQuery;

/// Row-major boolean occupancy grid over a patch.
///
/// # Example
///
/// ```rust
/// use marker_placement::raster::OccupancyGrid;
/// use glam::DVec2;
///
/// let grid = OccupancyGrid::from_rows(
///     &[vec![true, false], vec![true, true]],
///     DVec2::ZERO,
///     1.0,
/// ).unwrap();
/// assert_eq!(grid.occupied_count(), 3);
/// assert!(!grid.is_occupied(0, 1));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct OccupancyGrid {
    dimx: usize,
    dimy: usize,
    origin: DVec2,
    interval: f64,
    cells: Vec<bool>,
}

impl OccupancyGrid {
    /// Wraps row-major cells.
    ///
    /// # Errors
    ///
    /// Fails when the cell count does not match the dimensions or the
    /// interval is not positive.
    pub fn new(dimx: usize, dimy: usize, origin: DVec2, interval: f64, cells: Vec<bool>) -> PlacementResult<Self> {
        if cells.len() != dimx * dimy {
            return Err(PlacementError::degenerate(format!(
                "grid of {dimx}x{dimy} needs {} cells, got {}",
                dimx * dimy,
                cells.len()
            )));
        }
        if !(interval.is_finite() && interval > 0.0) {
            return Err(PlacementError::degenerate(format!("cell interval {interval}")));
        }
        Ok(Self {
            dimx,
            dimy,
            origin,
            interval,
            cells,
        })
    }

    /// Builds a grid from equally long rows, top row first.
    ///
    /// # Errors
    ///
    /// Fails on ragged rows or a non-positive interval.
    pub fn from_rows(rows: &[Vec<bool>], origin: DVec2, interval: f64) -> PlacementResult<Self> {
        let dimx = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != dimx) {
            return Err(PlacementError::degenerate("ragged occupancy rows"));
        }
        Self::new(dimx, rows.len(), origin, interval, rows.concat())
    }

    /// Number of columns.
    #[inline]
    pub fn dimx(&self) -> usize {
        self.dimx
    }

    /// Number of rows.
    #[inline]
    pub fn dimy(&self) -> usize {
        self.dimy
    }

    /// Local `(min_x, max_y)` corner of cell `(0, 0)`.
    #[inline]
    pub fn origin(&self) -> DVec2 {
        self.origin
    }

    /// Cell edge length.
    #[inline]
    pub fn interval(&self) -> f64 {
        self.interval
    }

    /// Whether cell `(row, col)` hit the surface. Out of range is empty.
    #[inline]
    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        row < self.dimy && col < self.dimx && self.cells[row * self.dimx + col]
    }

    /// One row of cells.
    pub fn row(&self, row: usize) -> &[bool] {
        &self.cells[row * self.dimx..(row + 1) * self.dimx]
    }

    /// Count of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Local center of a cell, where its sample ray was cast.
    #[inline]
    pub fn cell_center(&self, row: usize, col: usize) -> DVec2 {
        self.origin + DVec2::new((col as f64 + 0.5) * self.interval, -(row as f64 + 0.5) * self.interval)
    }
}

/// Grid shape for a patch: `(dimx, dimy, interval)`.
///
/// # Errors
///
/// Returns [`PlacementError::DegenerateInput`] for zero-width or
/// zero-height bounds, a zero column count, or a grid larger than
/// [`MAX_GRID_CELLS`] (sliver patches).
pub fn grid_dimensions(bounds: &Bounds2, dimx: usize) -> PlacementResult<(usize, usize, f64)> {
    if bounds.is_degenerate() {
        return Err(PlacementError::degenerate(format!(
            "patch extent {} x {}",
            bounds.width(),
            bounds.height()
        )));
    }
    if dimx == 0 {
        return Err(PlacementError::degenerate("zero grid columns"));
    }

    let interval = bounds.width() / dimx as f64;
    // Absorb rounding so an exact fit does not grow an extra empty row
    let rows = (bounds.height() / interval - EPSILON).ceil().max(1.0);
    let too_large = || {
        PlacementError::degenerate(format!(
            "grid of {dimx} x {rows} cells exceeds {MAX_GRID_CELLS} for patch extent {} x {}",
            bounds.width(),
            bounds.height()
        ))
    };
    if !rows.is_finite() || rows > MAX_GRID_CELLS as f64 {
        return Err(too_large());
    }
    let dimy = rows as usize;
    match dimx.checked_mul(dimy) {
        Some(cells) if cells <= MAX_GRID_CELLS => Ok((dimx, dimy, interval)),
        _ => Err(too_large()),
    }
}

/// Samples `surface` over `bounds` with `dimx` columns.
///
/// Rows are sampled in parallel; the result does not depend on the
/// thread count.
pub fn rasterize<S: SurfaceQuery + ?Sized>(surface: &S, bounds: &Bounds2, dimx: usize) -> PlacementResult<OccupancyGrid> {
    let (dimx, dimy, interval) = grid_dimensions(bounds, dimx)?;
    let origin = bounds.top_left();

    let cells: Vec<bool> = (0..dimy)
        .into_par_iter()
        .flat_map_iter(|row| {
            (0..dimx).map(move |col| {
                let x = origin.x + (col as f64 + 0.5) * interval;
                let y = origin.y - (row as f64 + 0.5) * interval;
                surface.occupied(DVec3::new(x, y, RAY_START_CLEARANCE), DVec3::NEG_Z)
            })
        })
        .collect();

    let grid = OccupancyGrid::new(dimx, dimy, origin, interval, cells)?;
    debug!(
        dimx,
        dimy,
        interval,
        occupied = grid.occupied_count(),
        "Rasterized patch"
    );
    Ok(grid)
}
