//! Unit tests for grid construction and square containment.

use sweepmap::models::grid::new_grid;
use sweepmap::AppError;

#[test]
fn grid_10000_by_12000_with_500_cells_has_480_squares() {
    let grid = new_grid(10_000, 12_000, 500).expect("valid grid");
    assert_eq!(grid.len(), 480);
}

#[test]
fn grid_is_row_major_with_one_based_order() {
    let grid = new_grid(1_500, 1_000, 500).expect("valid grid");
    assert_eq!(grid.len(), 6);

    assert_eq!((grid[0].x, grid[0].y, grid[0].order), (0, 0, 1));
    assert_eq!((grid[1].x, grid[1].y, grid[1].order), (500, 0, 2));
    assert_eq!((grid[2].x, grid[2].y, grid[2].order), (1_000, 0, 3));
    // Second row starts after the first row is exhausted.
    assert_eq!((grid[3].x, grid[3].y, grid[3].order), (0, 500, 4));
}

#[test]
fn grid_emits_partial_trailing_squares_with_declared_size() {
    // 1050 / 500 and 900 / 500 both leave a remainder; a partial square
    // is still emitted at the last representable origin.
    let grid = new_grid(1_050, 900, 500).expect("valid grid");
    assert_eq!(grid.len(), 3 * 2);

    let last = grid.last().expect("non-empty grid");
    assert_eq!((last.x, last.y), (1_000, 500));
    assert_eq!(last.size, 500, "declared size is unchanged on partial squares");
}

#[test]
fn grid_rejects_non_positive_dimensions() {
    for (x, y, cell) in [(0, 10, 5), (10, 0, 5), (10, 10, 0), (-10, 10, 5), (10, 10, -5)] {
        let err = new_grid(x, y, cell).expect_err("dimensions must be positive");
        assert!(
            matches!(err, AppError::Validation(_)),
            "expected validation error, got: {err}"
        );
    }
}

#[test]
fn square_containment_is_half_open_on_both_axes() {
    let grid = new_grid(1_000, 1_000, 500).expect("valid grid");
    let first = &grid[0];

    assert!(first.contains(0, 0));
    assert!(first.contains(499, 499));
    // A point on the shared upper boundary belongs to the next square.
    assert!(!first.contains(500, 0));
    assert!(!first.contains(0, 500));
    assert!(grid[1].contains(500, 0));
    assert!(grid[2].contains(0, 500));
}

#[test]
fn square_containment_rejects_points_outside_the_grid() {
    let grid = new_grid(1_000, 1_000, 500).expect("valid grid");
    assert!(grid.iter().all(|s| !s.contains(-1, 0)));
    assert!(grid.iter().all(|s| !s.contains(1_000, 1_000)));
}
