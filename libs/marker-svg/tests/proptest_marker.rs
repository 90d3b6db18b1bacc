//! Property-based tests for the marker path compiler.
//!
//! Random rectangle stacks are compiled, written, and read back; the
//! result is compared with a direct "last paint wins" evaluation.

use marker_svg::{group_cells, read_compiled_svg, write_svg, MarkerColor, MarkerRect, PathGrouping, UnitSquareSet, ViewBox};
use proptest::prelude::*;

fn arb_rect() -> impl Strategy<Value = MarkerRect> {
    (0i64..8, 0i64..8, 0i64..5, 0i64..5, any::<bool>()).prop_map(|(x, y, w, h, black)| {
        let color = if black { MarkerColor::Mark } else { MarkerColor::Background };
        MarkerRect::new(x, y, w, h, color)
    })
}

fn arb_grouping() -> impl Strategy<Value = PathGrouping> {
    prop_oneof![
        (1usize..20).prop_map(|max_cells| PathGrouping::Chunks { max_cells }),
        Just(PathGrouping::Rows),
    ]
}

/// Color of the last rectangle covering a cell.
fn last_paint(rects: &[MarkerRect], x: i64, y: i64) -> bool {
    rects
        .iter()
        .rev()
        .find(|r| x >= r.x && x < r.right() && y >= r.y && y < r.bottom())
        .is_some_and(|r| r.color == MarkerColor::Mark)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// A cell is marked exactly when the last rectangle over it is black.
    #[test]
    fn set_matches_last_paint(rects in prop::collection::vec(arb_rect(), 1..12)) {
        let set = UnitSquareSet::from_rects(&rects);
        for y in 0..13 {
            for x in 0..13 {
                prop_assert_eq!(set.contains(x, y), last_paint(&rects, x, y), "cell ({}, {})", x, y);
            }
        }
    }

    /// Writing the groups and reading them back yields the same cells.
    #[test]
    fn svg_round_trip(
        rects in prop::collection::vec(arb_rect(), 1..12),
        grouping in arb_grouping(),
    ) {
        let set = UnitSquareSet::from_rects(&rects);
        let groups = group_cells(&set, grouping);
        let svg = write_svg(&groups, &ViewBox::enclosing(&rects)).unwrap();
        prop_assert_eq!(read_compiled_svg(&svg).unwrap(), set);
    }

    /// Every cell appears in exactly one group.
    #[test]
    fn groups_partition_cells(
        rects in prop::collection::vec(arb_rect(), 1..12),
        grouping in arb_grouping(),
    ) {
        let set = UnitSquareSet::from_rects(&rects);
        let groups = group_cells(&set, grouping);
        let total: usize = groups.iter().map(|g| g.len()).sum();
        prop_assert_eq!(total, set.len());
        prop_assert!(groups.iter().all(|g| !g.is_empty()));
    }
}
