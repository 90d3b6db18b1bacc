//! # Unit-Cell Paths
//!
//! Every marked cell becomes the closed subpath `M{x},{y}h1v1h-1z`.
//! Subpaths are split into groups, one `<path>` element each, so no
//! single path grows without bound.

use config::constants::DEFAULT_CELLS_PER_PATH;
use serde::{Deserialize, Serialize};

use crate::cells::UnitSquareSet;
use crate::error::{MarkerError, MarkerResult};

/// How marked cells are split into path elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PathGrouping {
    /// Consecutive runs of at most `max_cells` cells in row-major order.
    Chunks { max_cells: usize },
    /// One path per marked row, top to bottom.
    Rows,
}

impl Default for PathGrouping {
    fn default() -> Self {
        Self::Chunks {
            max_cells: DEFAULT_CELLS_PER_PATH,
        }
    }
}

/// Subpaths drawn by one `<path>` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathGroup {
    /// Position of the group in output order.
    pub key: usize,
    /// Unit-cell subpaths, sorted lexicographically.
    pub subpaths: Vec<String>,
}

impl PathGroup {
    /// Path data for the `d` attribute.
    pub fn data(&self) -> String {
        self.subpaths.join(" ")
    }

    /// Number of cells drawn.
    pub fn len(&self) -> usize {
        self.subpaths.len()
    }

    /// True when the group draws nothing.
    pub fn is_empty(&self) -> bool {
        self.subpaths.is_empty()
    }
}

/// Closed unit-square subpath anchored at `(x, y)`.
///
/// ```rust
/// use marker_svg::path::cell_subpath;
///
/// assert_eq!(cell_subpath(3, 0), "M3,0h1v1h-1z");
/// ```
pub fn cell_subpath(x: i64, y: i64) -> String {
    format!("M{x},{y}h1v1h-1z")
}

/// Splits a cell set into path groups.
///
/// An empty set yields no groups. A `Chunks` size of zero is treated as
/// one cell per group.
///
/// # Example
///
/// ```rust
/// use marker_svg::cells::UnitSquareSet;
/// use marker_svg::path::{group_cells, PathGrouping};
///
/// let set: UnitSquareSet = [(0, 0), (1, 0), (0, 1)].into_iter().collect();
/// let groups = group_cells(&set, PathGrouping::Rows);
/// assert_eq!(groups.len(), 2);
/// assert_eq!(groups[0].data(), "M0,0h1v1h-1z M1,0h1v1h-1z");
/// ```
pub fn group_cells(cells: &UnitSquareSet, grouping: PathGrouping) -> Vec<PathGroup> {
    let mut runs: Vec<Vec<String>> = Vec::new();

    match grouping {
        PathGrouping::Chunks { max_cells } => {
            let size = max_cells.max(1);
            let all: Vec<(i64, i64)> = cells.iter().collect();
            for chunk in all.chunks(size) {
                runs.push(chunk.iter().map(|&(x, y)| cell_subpath(x, y)).collect());
            }
        }
        PathGrouping::Rows => {
            let mut current_row = None;
            for (x, y) in cells.iter() {
                if current_row != Some(y) {
                    runs.push(Vec::new());
                    current_row = Some(y);
                }
                if let Some(run) = runs.last_mut() {
                    run.push(cell_subpath(x, y));
                }
            }
        }
    }

    runs.into_iter()
        .enumerate()
        .map(|(key, mut subpaths)| {
            subpaths.sort();
            PathGroup { key, subpaths }
        })
        .collect()
}

/// Reads unit-cell path data back into cells.
///
/// Accepts only the subpath form written by [`cell_subpath`], separated
/// by optional whitespace.
///
/// # Errors
///
/// Returns [`MarkerError::MalformedPath`] for anything else.
pub fn parse_path_data(data: &str) -> MarkerResult<Vec<(i64, i64)>> {
    let mut cells = Vec::new();
    let mut rest = data.trim_start();

    while !rest.is_empty() {
        let body = rest
            .strip_prefix('M')
            .ok_or_else(|| MarkerError::MalformedPath(format!("expected 'M' at '{}'", preview(rest))))?;
        let end = body
            .find("h1v1h-1z")
            .ok_or_else(|| MarkerError::MalformedPath(format!("unterminated cell at '{}'", preview(rest))))?;

        let (x, y) = body[..end]
            .split_once(',')
            .ok_or_else(|| MarkerError::MalformedPath(format!("missing ',' in '{}'", &body[..end])))?;
        let parse = |text: &str| {
            text.trim()
                .parse::<i64>()
                .map_err(|e| MarkerError::MalformedPath(format!("bad coordinate '{text}': {e}")))
        };
        cells.push((parse(x)?, parse(y)?));

        rest = body[end + "h1v1h-1z".len()..].trim_start();
    }

    Ok(cells)
}

fn preview(text: &str) -> &str {
    let end = text.char_indices().nth(16).map_or(text.len(), |(i, _)| i);
    &text[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(w: i64, h: i64) -> UnitSquareSet {
        (0..h).flat_map(|y| (0..w).map(move |x| (x, y))).collect()
    }

    #[test]
    fn test_two_by_two_is_one_group() {
        let groups = group_cells(&block(2, 2), PathGrouping::default());
        assert_eq!(groups.len(), 1);
        assert_eq!(
            groups[0].subpaths,
            vec!["M0,0h1v1h-1z", "M0,1h1v1h-1z", "M1,0h1v1h-1z", "M1,1h1v1h-1z"]
        );
    }

    #[test]
    fn test_chunks_cap_group_size() {
        let groups = group_cells(&block(6, 6), PathGrouping::Chunks { max_cells: 10 });
        let sizes: Vec<usize> = groups.iter().map(PathGroup::len).collect();
        assert_eq!(sizes, vec![10, 10, 10, 6]);
        assert_eq!(groups.iter().map(|g| g.key).collect::<Vec<_>>(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_zero_chunk_size_means_one_cell() {
        let groups = group_cells(&block(2, 1), PathGrouping::Chunks { max_cells: 0 });
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn test_rows_skip_empty_rows() {
        let set: UnitSquareSet = [(0, 0), (5, 0), (2, 3)].into_iter().collect();
        let groups = group_cells(&set, PathGrouping::Rows);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[1].subpaths, vec!["M2,3h1v1h-1z"]);
    }

    #[test]
    fn test_group_sort_is_lexicographic() {
        let set: UnitSquareSet = [(2, 0), (10, 0)].into_iter().collect();
        let groups = group_cells(&set, PathGrouping::Rows);
        assert_eq!(groups[0].subpaths, vec!["M10,0h1v1h-1z", "M2,0h1v1h-1z"]);
    }

    #[test]
    fn test_empty_set_has_no_groups() {
        assert!(group_cells(&UnitSquareSet::new(), PathGrouping::default()).is_empty());
    }

    #[test]
    fn test_parse_path_data() {
        let cells = parse_path_data(" M0,0h1v1h-1z M-3,12h1v1h-1zM4,5h1v1h-1z ").unwrap();
        assert_eq!(cells, vec![(0, 0), (-3, 12), (4, 5)]);
        assert!(parse_path_data("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_path_rejects_other_commands() {
        assert!(matches!(
            parse_path_data("M0,0h2v1h-2z"),
            Err(MarkerError::MalformedPath(_))
        ));
        assert!(parse_path_data("L0,0").is_err());
        assert!(parse_path_data("M0 0h1v1h-1z").is_err());
        assert!(parse_path_data("Mx,0h1v1h-1z").is_err());
    }
}
