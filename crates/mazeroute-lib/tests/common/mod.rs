//! Common test utilities and maze fixtures.
//!
//! Mazes are generated with a seeded recursive backtracker so every test run
//! sees the same layouts. A breadth-first distance oracle written directly
//! against [`MazeGrid::is_passable`] is used to check search results.

use std::collections::VecDeque;

use mazeroute_lib::{MazeGrid, Point};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Per-cell wall flags: `(right, bottom)`.
pub type WallMatrices = (Vec<Vec<bool>>, Vec<Vec<bool>>);

/// Carve a perfect maze, then knock out extra walls with probability
/// `extra_openings` to create loops.
#[allow(dead_code)]
pub fn generate_walls(rows: usize, cols: usize, seed: u64, extra_openings: f64) -> WallMatrices {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut right = vec![vec![true; cols]; rows];
    let mut bottom = vec![vec![true; cols]; rows];
    let mut visited = vec![vec![false; cols]; rows];

    let mut stack = vec![(0usize, 0usize)];
    visited[0][0] = true;

    while let Some(&(r, c)) = stack.last() {
        let mut options = Vec::with_capacity(4);
        if r > 0 && !visited[r - 1][c] {
            options.push((r - 1, c));
        }
        if c > 0 && !visited[r][c - 1] {
            options.push((r, c - 1));
        }
        if r + 1 < rows && !visited[r + 1][c] {
            options.push((r + 1, c));
        }
        if c + 1 < cols && !visited[r][c + 1] {
            options.push((r, c + 1));
        }

        match options.choose(&mut rng) {
            None => {
                stack.pop();
            }
            Some(&(nr, nc)) => {
                if nr == r {
                    right[r][c.min(nc)] = false;
                } else {
                    bottom[r.min(nr)][c] = false;
                }
                visited[nr][nc] = true;
                stack.push((nr, nc));
            }
        }
    }

    for r in 0..rows {
        for c in 0..cols {
            if c + 1 < cols && rng.gen_bool(extra_openings) {
                right[r][c] = false;
            }
            if r + 1 < rows && rng.gen_bool(extra_openings) {
                bottom[r][c] = false;
            }
        }
    }

    (right, bottom)
}

#[allow(dead_code)]
pub fn generate_maze(rows: usize, cols: usize, seed: u64, extra_openings: f64) -> MazeGrid {
    let (right, bottom) = generate_walls(rows, cols, seed, extra_openings);
    MazeGrid::from_wall_matrices(&right, &bottom).expect("generated walls are rectangular")
}

/// Two independently generated mazes side by side, separated by a solid
/// wall right of column `split`. Each side is connected internally.
#[allow(dead_code)]
pub fn partitioned_maze(rows: usize, cols: usize, split: usize, seed: u64) -> MazeGrid {
    let (mut right, mut bottom) = generate_walls(rows, split + 1, seed, 0.2);
    let (far_right, far_bottom) = generate_walls(rows, cols - split - 1, seed + 1, 0.2);
    for r in 0..rows {
        right[r].extend_from_slice(&far_right[r]);
        bottom[r].extend_from_slice(&far_bottom[r]);
    }
    MazeGrid::from_wall_matrices(&right, &bottom).expect("generated walls are rectangular")
}

/// Random logical cell inside the maze.
#[allow(dead_code)]
pub fn random_cell(maze: &MazeGrid, rng: &mut StdRng) -> Point {
    Point::new(
        rng.gen_range(0..maze.logical_rows()) as i32,
        rng.gen_range(0..maze.logical_cols()) as i32,
    )
}

/// Shortest number of doubled-grid steps between two logical cells.
#[allow(dead_code)]
pub fn bfs_distance(maze: &MazeGrid, start: Point, goal: Point) -> Option<usize> {
    let start = start.doubled();
    let goal = goal.doubled();
    let mut dist = vec![usize::MAX; maze.rows() * maze.cols()];
    let index = |p: Point| p.row as usize * maze.cols() + p.col as usize;

    dist[index(start)] = 0;
    let mut queue = VecDeque::from([start]);
    while let Some(current) = queue.pop_front() {
        if current == goal {
            return Some(dist[index(current)]);
        }
        for (dr, dc) in [(0, -1), (-1, 0), (0, 1), (1, 0)] {
            let next = Point::new(current.row + dr, current.col + dc);
            if maze.is_passable(next) && dist[index(next)] == usize::MAX {
                dist[index(next)] = dist[index(current)] + 1;
                queue.push_back(next);
            }
        }
    }
    None
}

/// Assert that `path` is a contiguous walk of passable doubled nodes from the
/// doubled goal back to the doubled start.
#[allow(dead_code)]
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
