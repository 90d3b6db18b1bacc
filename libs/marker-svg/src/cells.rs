//! # Unit Square Set
//!
//! The marked 1×1 cells of a marker after rectangle algebra.
//!
//! Rectangles are folded in paint order: black ones are unioned in,
//! white ones subtracted. A cell therefore ends up marked exactly when
//! the last rectangle covering it is black.

use std::collections::BTreeSet;

use crate::rect::{MarkerColor, MarkerRect};

/// Ordered set of marked cells.
///
/// Cells are stored by `(y, x)` so iteration runs row by row, left to
/// right, independent of insertion order.
///
/// # Example
///
/// ```rust
/// use marker_svg::cells::UnitSquareSet;
/// use marker_svg::rect::{MarkerColor, MarkerRect};
///
/// let set = UnitSquareSet::from_rects(&[
///     MarkerRect::new(0, 0, 4, 4, MarkerColor::Mark),
///     MarkerRect::new(1, 1, 2, 2, MarkerColor::Background),
/// ]);
/// assert_eq!(set.len(), 12);
/// assert!(!set.contains(1, 1));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnitSquareSet {
    cells: BTreeSet<(i64, i64)>,
}

impl UnitSquareSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds rectangles in order.
    pub fn from_rects(rects: &[MarkerRect]) -> Self {
        let mut set = Self::new();
        for rect in rects {
            set.apply(rect);
        }
        set
    }

    /// Paints one rectangle onto the set.
    pub fn apply(&mut self, rect: &MarkerRect) {
        match rect.color {
            MarkerColor::Mark => {
                for (x, y) in rect.cells() {
                    self.cells.insert((y, x));
                }
            }
            MarkerColor::Background => {
                for (x, y) in rect.cells() {
                    self.cells.remove(&(y, x));
                }
            }
        }
    }

    /// Marks one cell.
    pub fn insert(&mut self, x: i64, y: i64) -> bool {
        self.cells.insert((y, x))
    }

    /// Whether cell `(x, y)` is marked.
    pub fn contains(&self, x: i64, y: i64) -> bool {
        self.cells.contains(&(y, x))
    }

    /// Number of marked cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True when nothing is marked.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Marked cells as `(x, y)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, i64)> + '_ {
        self.cells.iter().map(|&(y, x)| (x, y))
    }
}

impl FromIterator<(i64, i64)> for UnitSquareSet {
    fn from_iter<I: IntoIterator<Item = (i64, i64)>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().map(|(x, y)| (y, x)).collect(),
        }
    }
}
