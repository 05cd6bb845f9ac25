//! Route planning strategies implementing the Strategy pattern.
//!
//! This module provides the `RoutePlanner` trait and implementations for the
//! supported search algorithms (A*, BFS, Q-learning). The strategy pattern
//! lets the `PathFinder` orchestrator and the CLI dispatch on a
//! [`RouteAlgorithm`] without knowing how each search works.

use crate::error::Result;
use crate::learning::{find_route_q_learning, QLearningConfig};
use crate::maze::{MazeGrid, Point};
use crate::path::{find_route_a_star, find_route_bfs};

use super::RouteAlgorithm;

/// Trait for route planning strategies.
///
/// Each implementation encapsulates a specific search algorithm and the
/// configuration it needs.
pub trait RoutePlanner: Send + Sync {
    /// The algorithm identifier for this planner.
    fn algorithm(&self) -> RouteAlgorithm;

    /// Search between two logical cells.
    ///
    /// Returns the doubled-coordinate path ordered goal to start.
    fn find_path(&self, maze: &MazeGrid, start: Point, goal: Point) -> Result<Vec<Point>>;

    /// Whether repeated calls may return different routes.
    fn is_stochastic(&self) -> bool {
        false
    }
}

/// A* planner with a Manhattan heuristic.
#[derive(Debug, Clone, Default)]
pub struct AStarPlanner;

impl RoutePlanner for AStarPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::AStar
    }

    fn find_path(&self, maze: &MazeGrid, start: Point, goal: Point) -> Result<Vec<Point>> {
        find_route_a_star(maze, start, goal)
    }
}

/// Breadth-first search planner.
///
/// Explores more nodes than A* but needs no heuristic; handy as a
/// correctness reference.
#[derive(Debug, Clone, Default)]
pub struct BfsPlanner;

impl RoutePlanner for BfsPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::Bfs
    }

    fn find_path(&self, maze: &MazeGrid, start: Point, goal: Point) -> Result<Vec<Point>> {
        find_route_bfs(maze, start, goal)
    }
}

/// Q-learning planner. Each call trains a fresh policy with its own RNG,
/// seeded from the configuration when a seed is set.
#[derive(Debug, Clone, Default)]
pub struct QLearningPlanner {
    config: QLearningConfig,
}

impl QLearningPlanner {
    pub fn new(config: QLearningConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &QLearningConfig {
        &self.config
    }
}

impl RoutePlanner for QLearningPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::QLearning
    }

    fn find_path(&self, maze: &MazeGrid, start: Point, goal: Point) -> Result<Vec<Point>> {
        let mut rng = self.config.rng();
        find_route_q_learning(maze, start, goal, &self.config, &mut rng)
    }

    fn is_stochastic(&self) -> bool {
        self.config.seed.is_none()
    }
}

/// Select the planner for `algorithm`. `config` only matters for Q-learning.
pub fn select_planner(algorithm: RouteAlgorithm, config: &QLearningConfig) -> Box<dyn RoutePlanner> {
    match algorithm {
        RouteAlgorithm::AStar => Box::new(AStarPlanner),
        RouteAlgorithm::Bfs => Box::new(BfsPlanner),
        RouteAlgorithm::QLearning => Box::new(QLearningPlanner::new(*config)),
    }
}
