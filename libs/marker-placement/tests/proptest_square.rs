//! Property-based tests for the inscribed square search.
//!
//! Compares the dynamic-programming result with an exhaustive search on
//! small random grids.

use glam::DVec2;
use marker_placement::raster::OccupancyGrid;
use marker_placement::square::largest_inscribed_square;
use proptest::prelude::*;

fn all_occupied(grid: &OccupancyGrid, top: usize, left: usize, side: usize) -> bool {
    (top..top + side).all(|r| (left..left + side).all(|c| grid.is_occupied(r, c)))
}

fn brute_force_side(grid: &OccupancyGrid) -> usize {
    let mut best = 0;
    for top in 0..grid.dimy() {
        for left in 0..grid.dimx() {
            let limit = (grid.dimy() - top).min(grid.dimx() - left);
            for side in (best + 1)..=limit {
                if all_occupied(grid, top, left, side) {
                    best = side;
                }
            }
        }
    }
    best
}

fn arb_grid() -> impl Strategy<Value = OccupancyGrid> {
    (1usize..9, 1usize..9, 0.2f64..0.95).prop_flat_map(|(dimx, dimy, density)| {
        prop::collection::vec(prop::bool::weighted(density), dimx * dimy)
            .prop_map(move |cells| OccupancyGrid::new(dimx, dimy, DVec2::ZERO, 1.0, cells).unwrap())
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// The reported square is fully occupied.
    #[test]
    fn square_is_occupied(grid in arb_grid()) {
        let s = largest_inscribed_square(&grid);
        if !s.is_empty() {
            prop_assert!(all_occupied(&grid, s.top_row(), s.left_col(), s.side));
        }
    }

    /// No larger occupied square exists anywhere in the grid.
    #[test]
    fn square_is_maximal(grid in arb_grid()) {
        let s = largest_inscribed_square(&grid);
        prop_assert_eq!(s.side, brute_force_side(&grid));
    }

    /// An empty result means the grid has no occupied cell.
    #[test]
    fn empty_only_for_empty_grid(grid in arb_grid()) {
        let s = largest_inscribed_square(&grid);
        prop_assert_eq!(s.is_empty(), grid.occupied_count() == 0);
    }
}
