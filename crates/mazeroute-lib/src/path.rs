use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet, VecDeque};

use tracing::debug;

use crate::error::{Error, NotFoundReason, Result};
use crate::maze::{MazeGrid, Point};

/// Walk predecessor links back from `end` to `start`.
///
/// The result is ordered goal first and start last. If a node on the way has
/// no predecessor the walk stops and whatever was collected is returned.
pub fn reconstruct_path(parents: &HashMap<Point, Point>, start: Point, end: Point) -> Vec<Point> {
    let mut path = Vec::new();
    let mut current = end;
    while current != start {
        let Some(&parent) = parents.get(&current) else {
            return path;
        };
        path.push(current);
        current = parent;
    }
    path.push(start);
    path
}

/// Run A* between two logical cells, returning the doubled-coordinate path
/// ordered goal to start.
///
/// Every move is a single step along one axis and costs 1; the heuristic is
/// the Manhattan distance to the goal. Nodes are marked visited when they are
/// first pushed and never reopened. Equal `f` scores are ordered by lower `g`,
/// which keeps discovery-time marking optimal on a unit-cost grid.
pub fn find_route_a_star(maze: &MazeGrid, start: Point, goal: Point) -> Result<Vec<Point>> {
    let start_node = start.doubled();
    let goal_node = goal.doubled();
    if !maze.is_passable(start_node) || !maze.is_passable(goal_node) {
        return Err(isolated(start, goal));
    }

    let mut visited: HashSet<Point> = HashSet::new();
    let mut parents: HashMap<Point, Point> = HashMap::new();
    let mut queue = BinaryHeap::new();

    visited.insert(start_node);
    queue.push(AStarEntry::new(start_node, 0, start_node.manhattan(goal_node)));

    let mut expanded = 0usize;
    while let Some(entry) = queue.pop() {
        if entry.node == goal_node {
            let path = reconstruct_path(&parents, start_node, goal_node);
            debug!(
                %start,
                %goal,
                expanded,
                steps = path.len().saturating_sub(1),
                "a-star found route"
            );
            return Ok(path);
        }
        expanded += 1;

        for next in maze.neighbours(entry.node) {
            if !visited.insert(next) {
                continue;
            }
            let tentative_g = entry.cost + 1;
            parents.insert(next, entry.node);
            queue.push(AStarEntry::new(next, tentative_g, next.manhattan(goal_node)));
        }
    }

    debug!(%start, %goal, expanded, "a-star exhausted frontier");
    Err(isolated(start, goal))
}

/// Breadth-first search between two logical cells. Same path shape as
/// [`find_route_a_star`]; on a unit-cost grid it always yields a shortest path.
pub fn find_route_bfs(maze: &MazeGrid, start: Point, goal: Point) -> Result<Vec<Point>> {
    let start_node = start.doubled();
    let goal_node = goal.doubled();
    if !maze.is_passable(start_node) || !maze.is_passable(goal_node) {
        return Err(isolated(start, goal));
    }
    if start_node == goal_node {
        return Ok(vec![start_node]);
    }

    let mut parents: HashMap<Point, Point> = HashMap::new();
    let mut visited: HashSet<Point> = HashSet::from([start_node]);
    let mut queue = VecDeque::from([start_node]);

    while let Some(current) = queue.pop_front() {
        for next in maze.neighbours(current) {
            if !visited.insert(next) {
                continue;
            }
            parents.insert(next, current);
            if next == goal_node {
                return Ok(reconstruct_path(&parents, start_node, goal_node));
            }
            queue.push_back(next);
        }
    }

    Err(isolated(start, goal))
}

fn isolated(start: Point, goal: Point) -> Error {
    Error::PathNotFound {
        start,
        goal,
        reason: NotFoundReason::Isolated,
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct AStarEntry {
    node: Point,
    cost: i32,
    estimate: i32,
}

impl AStarEntry {
    fn new(node: Point, cost: i32, heuristic: i32) -> Self {
        Self {
            node,
            cost,
            estimate: cost + heuristic,
        }
    }
}

impl Ord for AStarEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by estimate.
        other
            .estimate
            .cmp(&self.estimate)
            .then_with(|| other.cost.cmp(&self.cost))
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for AStarEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{corridor_maze, enclosed_goal_maze, split_maze};

    #[test]
    fn reconstruct_walks_goal_to_start() {
        let parents = HashMap::from([
            (Point::new(0, 1), Point::new(0, 0)),
            (Point::new(0, 2), Point::new(0, 1)),
        ]);
        let path = reconstruct_path(&parents, Point::new(0, 0), Point::new(0, 2));
        assert_eq!(
            path,
            vec![Point::new(0, 2), Point::new(0, 1), Point::new(0, 0)]
        );
    }

    #[test]
    fn reconstruct_stops_at_missing_link() {
        let parents = HashMap::from([(Point::new(0, 2), Point::new(0, 1))]);
        let path = reconstruct_path(&parents, Point::new(0, 0), Point::new(0, 2));
        assert_eq!(path, vec![Point::new(0, 2)]);
    }

    #[test]
    fn reconstruct_start_equals_end() {
        let path = reconstruct_path(&HashMap::new(), Point::new(2, 2), Point::new(2, 2));
        assert_eq!(path, vec![Point::new(2, 2)]);
    }

    #[test]
    fn a_star_open_five_by_five_takes_sixteen_steps() {
        let maze = MazeGrid::open(5, 5);
        let path = find_route_a_star(&maze, Point::new(0, 0), Point::new(4, 4)).unwrap();
        assert_eq!(path.len(), 17);
        assert_eq!(path.first(), Some(&Point::new(8, 8)));
        assert_eq!(path.last(), Some(&Point::new(0, 0)));
    }

    #[test]
    fn a_star_same_cell_is_single_point() {
        let maze = MazeGrid::open(3, 3);
        let path = find_route_a_star(&maze, Point::new(1, 1), Point::new(1, 1)).unwrap();
        assert_eq!(path, vec![Point::new(2, 2)]);
    }

    #[test]
    fn a_star_follows_the_only_corridor() {
        let maze = corridor_maze();
        let path = find_route_a_star(&maze, Point::new(0, 0), Point::new(0, 2)).unwrap();
        let bfs = find_route_bfs(&maze, Point::new(0, 0), Point::new(0, 2)).unwrap();
        assert_eq!(path.len(), bfs.len());
        // the direct boundaries are closed, so the route dips into row 1
        assert!(path.iter().any(|p| p.row > 0));
    }

    #[test]
    fn a_star_reports_isolated_regions() {
        let maze = split_maze();
        let error = find_route_a_star(&maze, Point::new(0, 0), Point::new(0, 2)).unwrap_err();
        assert!(matches!(
            error,
            Error::PathNotFound {
                reason: NotFoundReason::Isolated,
                ..
            }
        ));
    }

    #[test]
    fn enclosed_goal_is_unreachable() {
        let maze = enclosed_goal_maze();
        let error = find_route_a_star(&maze, Point::new(0, 0), Point::new(1, 1)).unwrap_err();
        assert!(error.is_not_found());
        let error = find_route_bfs(&maze, Point::new(0, 0), Point::new(1, 1)).unwrap_err();
        assert!(error.is_not_found());
    }

    #[test]
    fn same_point_outside_the_maze_is_not_a_route() {
        let maze = MazeGrid::open(3, 3);
        let outside = Point::new(-1, -1);
        assert!(find_route_a_star(&maze, outside, outside)
            .unwrap_err()
            .is_not_found());
        assert!(find_route_bfs(&maze, outside, outside)
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn extreme_coordinates_report_not_found() {
        let maze = MazeGrid::open(3, 3);
        let far = Point::new(i32::MAX, i32::MIN);
        for (start, goal) in [(far, far), (Point::new(0, 0), far), (far, Point::new(0, 0))] {
            assert!(find_route_a_star(&maze, start, goal)
                .unwrap_err()
                .is_not_found());
            assert!(find_route_bfs(&maze, start, goal)
                .unwrap_err()
                .is_not_found());
        }
    }

    #[test]
    fn heap_pops_lowest_estimate_then_lowest_cost() {
        let mut heap = BinaryHeap::new();
        heap.push(AStarEntry::new(Point::new(0, 0), 4, 2));
        heap.push(AStarEntry::new(Point::new(0, 1), 2, 4));
        heap.push(AStarEntry::new(Point::new(0, 2), 1, 1));

        assert_eq!(heap.pop().map(|e| e.node), Some(Point::new(0, 2)));
        assert_eq!(heap.pop().map(|e| e.node), Some(Point::new(0, 1)));
        assert_eq!(heap.pop().map(|e| e.node), Some(Point::new(0, 0)));
    }
}
