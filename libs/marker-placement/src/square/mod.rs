//! # Largest Inscribed Square
//!
//! Dynamic-programming search for the largest all-occupied axis-aligned
//! square in an [`OccupancyGrid`].
//!
//! `S[i][j]` is the side of the largest square whose bottom-right cell is
//! `(i, j)`: zero for an empty cell, otherwise one more than the minimum
//! of the top, left and top-left neighbors. Cells on the first row or
//! column have no such neighbors and score one when occupied.


use glam::DVec2;
use marker_mesh::Bounds2;

use crate::raster::OccupancyGrid;

/// Largest square found in a grid, anchored at its bottom-right cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InscribedSquare {
    /// Row of the bottom-right cell.
    pub row: usize,
    /// Column of the bottom-right cell.
    pub col: usize,
    /// Side length in cells, zero when the grid has no occupied cell.
    pub side: usize,
}

impl InscribedSquare {
    /// True when no occupied cell exists.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.side == 0
    }

    /// First row covered by the square.
    #[inline]
    pub fn top_row(&self) -> usize {
        self.row + 1 - self.side
    }

    /// First column covered by the square.
    #[inline]
    pub fn left_col(&self) -> usize {
        self.col + 1 - self.side
    }

    /// Side length in patch units.
    #[inline]
    pub fn side_length(&self, interval: f64) -> f64 {
        self.side as f64 * interval
    }

    /// Local-plane extent of the square's cells, `None` when empty.
    ///
    /// Edges sit on cell boundaries: the square spans
    /// `[x0 + (col + 1 - side) * iv, x0 + (col + 1) * iv]` horizontally
    /// and `[y0 - (row + 1) * iv, y0 - (row + 1 - side) * iv]` vertically,
    /// where `(x0, y0)` is the grid origin.
    pub fn local_bounds(&self, grid: &OccupancyGrid) -> Option<Bounds2> {
        if self.is_empty() {
            return None;
        }
        let origin = grid.origin();
        let iv = grid.interval();
        let left = origin.x + self.left_col() as f64 * iv;
        let right = origin.x + (self.col + 1) as f64 * iv;
        let top = origin.y - self.top_row() as f64 * iv;
        let bottom = origin.y - (self.row + 1) as f64 * iv;
        Some(Bounds2::new(DVec2::new(left, bottom), DVec2::new(right, top)))
    }
}

/// Finds the largest all-occupied square.
///
/// Scans rows top to bottom and columns left to right; a later square
/// replaces the best only when strictly larger, so ties resolve to the
/// first bottom-right cell in row-major order. Uses two rolling rows of
/// scratch space.
///
/// # Example
///
/// ```rust
/// use marker_placement::raster::OccupancyGrid;
/// use marker_placement::square::largest_inscribed_square;
/// use glam::DVec2;
///
/// let rows = vec![
///     vec![false, true, true],
///     vec![true, true, true],
///     vec![true, true, false],
/// ];
/// let grid = OccupancyGrid::from_rows(&rows, DVec2::ZERO, 1.0).unwrap();
/// let square = largest_inscribed_square(&grid);
/// assert_eq!((square.row, square.col, square.side), (1, 2, 2));
/// ```
pub fn largest_inscribed_square(grid: &OccupancyGrid) -> InscribedSquare {
    let dimx = grid.dimx();
    let mut prev = vec![0usize; dimx];
    let mut curr = vec![0usize; dimx];
    let mut best = InscribedSquare::default();

    for row in 0..grid.dimy() {
        let cells = grid.row(row);
        for col in 0..dimx {
            curr[col] = if !cells[col] {
                0
            } else if row == 0 || col == 0 {
                1
            } else {
                1 + prev[col].min(curr[col - 1]).min(prev[col - 1])
            };

            if curr[col] > best.side {
                best = InscribedSquare {
                    row,
                    col,
                    side: curr[col],
                };
            }
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    best
}
