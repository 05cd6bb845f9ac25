// Test-only maze fixtures for `mazeroute-lib` unit tests
#![allow(dead_code)]

use crate::maze::{MazeGrid, Point};

/// Two rows by three columns; the top row boundaries are closed so the only
/// way from `(0, 0)` to `(0, 2)` runs through the bottom row.
pub fn corridor_maze() -> MazeGrid {
    let right = vec![vec![true, true, true], vec![false, false, true]];
    let bottom = vec![vec![false, true, false], vec![true, true, true]];
    MazeGrid::from_wall_matrices(&right, &bottom).expect("valid corridor fixture")
}

/// One row by three columns with `(0, 2)` cut off from the rest.
pub fn split_maze() -> MazeGrid {
    let right = vec![vec![false, true, true]];
    let bottom = vec![vec![true, true, true]];
    MazeGrid::from_wall_matrices(&right, &bottom).expect("valid split fixture")
}

/// Open 3x3 maze whose centre cell `(1, 1)` is walled on all four sides.
pub fn enclosed_goal_maze() -> MazeGrid {
    let right = vec![
        vec![false, false, true],
        vec![true, true, true],
        vec![false, false, true],
    ];
    let bottom = vec![
        vec![false, true, false],
        vec![false, true, false],
        vec![true, true, true],
    ];
    MazeGrid::from_wall_matrices(&right, &bottom).expect("valid enclosed fixture")
}

/// Assert that `path` is a contiguous walk of passable doubled nodes from the
/// doubled goal back to the doubled start.
pub fn assert_valid_path(maze: &MazeGrid, path: &[Point], start: Point, goal: Point) {
    assert_eq!(path.first(), Some(&goal.doubled()), "path must begin at goal");
    assert_eq!(path.last(), Some(&start.doubled()), "path must end at start");
    for point in path {
        assert!(maze.is_passable(*point), "{point} is not passable");
    }
    for pair in path.windows(2) {
        assert_eq!(
            pair[0].manhattan(pair[1]),
            1,
            "{} and {} are not adjacent",
            pair[0],
            pair[1]
        );
    }
}
