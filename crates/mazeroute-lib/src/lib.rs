//! Maze route-finding library entry points.
//!
//! This crate exposes the doubled-resolution maze grid, a deterministic A*
//! search, a breadth-first search and a tabular Q-learning search, plus the
//! [`PathFinder`] orchestrator that owns the current maze, endpoints and path.
//! Higher-level consumers (the CLI, a GUI view) should only depend on the
//! items exported here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod error;
pub mod learning;
pub mod maze;
pub mod output;
pub mod path;
pub mod routing;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use error::{Error, NotFoundReason, Result};
pub use learning::{episode_count, find_route_q_learning, Action, QLearningConfig, QTable};
pub use maze::{Cell, MazeGrid, Point};
pub use output::{RouteStep, RouteSummary};
pub use path::{find_route_a_star, find_route_bfs, reconstruct_path};
pub use routing::{
    select_planner, AStarPlanner, BfsPlanner, PathFinder, QLearningPlanner, RouteAlgorithm,
    RoutePlanner, SearchOutcome,
};
