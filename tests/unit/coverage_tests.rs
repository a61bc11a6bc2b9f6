//! Unit tests for the coverage engine: edge-triggered pass counting and
//! the completion metric.

use sweepmap::models::{Area, CoverageGrid, Robot};

fn small_grid(passes_needed: u32) -> CoverageGrid {
    // 2 x 2 grid of 500mm squares.
    let area = Area::new("Test Room", 1_000, 1_000, passes_needed);
    let robot = Robot::new("Testbot", 500);
    CoverageGrid::new(&area, &robot).expect("valid coverage grid")
}

#[test]
fn completion_is_zero_right_after_creation() {
    let coverage = small_grid(1);
    assert_eq!(coverage.completion(), "0.00");
}

#[test]
fn dwelling_in_the_same_square_never_double_counts() {
    let mut coverage = small_grid(3);

    assert!(coverage.record_visit(250, 250), "first entry registers a pass");
    assert!(!coverage.record_visit(250, 250), "stationary robot does not");
    assert!(!coverage.record_visit(100, 400), "moving within the square does not");

    assert_eq!(coverage.grid[0].passes, 1);
}

#[test]
fn re_entering_a_square_registers_a_new_pass() {
    let mut coverage = small_grid(3);

    assert!(coverage.record_visit(250, 250));
    assert!(coverage.record_visit(750, 250), "moved to the next square");
    assert!(coverage.record_visit(250, 250), "came back");

    assert_eq!(coverage.grid[0].passes, 2);
    assert_eq!(coverage.grid[1].passes, 1);
}

#[test]
fn leaving_a_square_clears_its_presence_flag() {
    let mut coverage = small_grid(3);

    coverage.record_visit(250, 250);
    assert!(coverage.grid[0].has_robot_present);

    coverage.record_visit(750, 250);
    assert!(!coverage.grid[0].has_robot_present);
    assert!(coverage.grid[1].has_robot_present);
}

#[test]
fn cleaned_at_is_set_exactly_when_passes_reach_the_threshold() {
    let mut coverage = small_grid(2);

    coverage.record_visit(250, 250);
    assert!(coverage.grid[0].cleaned_at.is_none(), "one pass of two");

    coverage.record_visit(750, 250);
    coverage.record_visit(250, 250);
    let cleaned_at = coverage.grid[0].cleaned_at;
    assert!(cleaned_at.is_some(), "second pass cleans the square");

    // Further passes never touch the timestamp again.
    coverage.record_visit(750, 250);
    coverage.record_visit(250, 250);
    assert_eq!(coverage.grid[0].passes, 3);
    assert_eq!(coverage.grid[0].cleaned_at, cleaned_at);
}

#[test]
fn passes_never_decrease() {
    let mut coverage = small_grid(2);
    let points = [
        (250, 250),
        (750, 250),
        (250, 750),
        (-50, -50),
        (250, 250),
        (2_000, 2_000),
        (750, 750),
    ];

    let mut previous = vec![0u32; coverage.grid.len()];
    for (x, y) in points {
        coverage.record_visit(x, y);
        for (square, prev) in coverage.grid.iter().zip(&mut previous) {
            assert!(square.passes >= *prev, "passes decreased for square {}", square.order);
            *prev = square.passes;
        }
    }
}

#[test]
fn out_of_bounds_report_is_a_silent_no_op() {
    let mut coverage = small_grid(1);

    assert!(!coverage.record_visit(-10, 250));
    assert!(!coverage.record_visit(250, 1_000));
    assert!(coverage.grid.iter().all(|s| s.passes == 0));
    assert_eq!(coverage.completion(), "0.00");
}

#[test]
fn out_of_bounds_report_still_clears_presence() {
    // Wandering off the grid counts as leaving the current square, so
    // coming back registers a fresh pass.
    let mut coverage = small_grid(3);

    coverage.record_visit(250, 250);
    coverage.record_visit(-500, -500);
    assert!(!coverage.grid[0].has_robot_present);
    assert!(coverage.record_visit(250, 250));
    assert_eq!(coverage.grid[0].passes, 2);
}

#[test]
fn sweeping_the_top_row_yields_4_17_percent() {
    // 480-square grid, passes_needed = 3. 120 position reports sweeping
    // the top row with alternating direction pass over its 20 squares
    // three times each: 20/480 squares cleaned.
    let area = Area::new("Work Room #1", 10_000, 12_000, 3);
    let robot = Robot::new("Johnny 5", 500);
    let mut coverage = CoverageGrid::new(&area, &robot).expect("valid coverage grid");

    let mut direction_x = true;
    let mut x_pos = 0;
    let mut passes_increased = 0;
    for _ in 0..120 {
        if direction_x {
            x_pos += robot.size;
        } else {
            x_pos -= robot.size;
        }
        if x_pos >= area.size_x || x_pos <= 0 {
            direction_x = !direction_x;
        }
        if coverage.record_visit(x_pos + robot.size / 2, robot.size / 2) {
            passes_increased += 1;
        }
    }

    assert!(passes_increased > 0);
    assert_eq!(coverage.completion(), "4.17");
}

#[test]
fn visiting_every_square_center_passes_needed_times_completes_the_area() {
    let mut coverage = small_grid(2);
    let centers: Vec<(i64, i64)> = coverage
        .grid
        .iter()
        .map(|s| (s.x + s.size / 2, s.y + s.size / 2))
        .collect();

    for _ in 0..2 {
        for &(x, y) in &centers {
            coverage.record_visit(x, y);
        }
    }

    assert_eq!(coverage.completion(), "100.00");
    assert!(coverage.grid.iter().all(|s| s.cleaned_at.is_some()));
}

#[test]
fn completion_rounds_to_two_decimals() {
    // 1 of 3 squares cleaned: 33.333..% rounds to "33.33".
    let area = Area::new("Strip", 1_500, 500, 1);
    let robot = Robot::new("Testbot", 500);
    let mut coverage = CoverageGrid::new(&area, &robot).expect("valid coverage grid");

    coverage.record_visit(250, 250);
    assert_eq!(coverage.completion(), "33.33");
}

#[test]
fn render_shows_progress_per_row() {
    let mut coverage = small_grid(1);
    coverage.record_visit(250, 250);

    let rendered = coverage.render();
    assert_eq!(rendered, "*_ 1\n__ 2\n");
}

#[test]
fn render_shows_pass_counts_below_threshold() {
    let mut coverage = small_grid(3);
    coverage.record_visit(250, 250);
    coverage.record_visit(750, 250);
    coverage.record_visit(250, 250);

    assert_eq!(coverage.render(), "21 1\n__ 2\n");
}
