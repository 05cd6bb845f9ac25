//! Route planning module for maze path search.
//!
//! This module provides:
//! - [`RouteAlgorithm`] - Supported search algorithms (A*, BFS, Q-learning)
//! - [`RoutePlanner`] - Strategy trait implemented per algorithm
//! - [`SearchOutcome`] - Success flag plus message for callers that branch on a flag
//! - [`PathFinder`] - Stateful orchestrator owning the maze, endpoints and path
//!
//! # Example
//!
//! ```
//! use mazeroute_lib::{MazeGrid, PathFinder, Point};
//!
//! let mut finder = PathFinder::new();
//! finder.set_maze(MazeGrid::open(5, 5));
//! finder.set_start(Point::new(0, 0)).unwrap();
//! finder.set_end(Point::new(4, 4)).unwrap();
//! assert_eq!(finder.path().len(), 17);
//! ```

mod planner;

pub use planner::{select_planner, AStarPlanner, BfsPlanner, QLearningPlanner, RoutePlanner};

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::learning::{find_route_q_learning, QLearningConfig};
use crate::maze::{MazeGrid, Point};
use crate::path::find_route_a_star;

/// Supported search algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RouteAlgorithm {
    /// A* search (Manhattan heuristic).
    #[default]
    AStar,
    /// Breadth-first search.
    Bfs,
    /// Tabular Q-learning with greedy policy extraction.
    QLearning,
}

impl fmt::Display for RouteAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            RouteAlgorithm::AStar => "a-star",
            RouteAlgorithm::Bfs => "bfs",
            RouteAlgorithm::QLearning => "q-learning",
        };
        f.write_str(value)
    }
}

impl FromStr for RouteAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "a-star" | "astar" | "a*" => Ok(RouteAlgorithm::AStar),
            "bfs" => Ok(RouteAlgorithm::Bfs),
            "q-learning" | "qlearning" | "q" => Ok(RouteAlgorithm::QLearning),
            other => Err(format!("unknown algorithm '{other}'")),
        }
    }
}

/// Explicit success/failure result of a search, with a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchOutcome {
    pub success: bool,
    pub message: String,
}

impl SearchOutcome {
    pub fn success() -> Self {
        Self {
            success: true,
            message: String::new(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }

    /// Collapse any library result into an outcome.
    pub fn from_result<T>(result: &Result<T>) -> Self {
        match result {
            Ok(_) => Self::success(),
            Err(error) => Self::failure(error.to_string()),
        }
    }
}

/// Which endpoint an update targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Endpoint {
    Start,
    End,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Endpoint::Start => "start",
            Endpoint::End => "end",
        })
    }
}

/// Stateful route finder for one maze at a time.
///
/// Holds the current maze, the logical start and end cells, and the last
/// computed path (doubled coordinates, goal first). Endpoint updates are
/// transactional: when the follow-up search fails the endpoint reverts and
/// the stored path is left as it was.
///
/// Not meant for concurrent mutation; give each thread its own instance.
#[derive(Debug, Clone, Default)]
pub struct PathFinder {
    maze: MazeGrid,
    start: Option<Point>,
    end: Option<Point>,
    path: Vec<Point>,
    learning: QLearningConfig,
}

impl PathFinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `config` for subsequent Q-learning searches.
    pub fn with_learning_config(mut self, config: QLearningConfig) -> Self {
        self.learning = config;
        self
    }

    pub fn learning_config(&self) -> &QLearningConfig {
        &self.learning
    }

    /// Replace the maze and forget endpoints and path.
    pub fn set_maze(&mut self, maze: MazeGrid) {
        self.reset();
        self.maze = maze;
        debug!(
            rows = self.maze.logical_rows(),
            cols = self.maze.logical_cols(),
            "maze replaced"
        );
    }

    fn reset(&mut self) {
        self.start = None;
        self.end = None;
        self.path.clear();
    }

    /// Set the start cell and, if the end is already set, recompute the path
    /// with A*. On failure the start reverts to its previous value.
    pub fn set_start(&mut self, point: Point) -> Result<()> {
        self.update_endpoint(Endpoint::Start, point)
    }

    /// Set the end cell and, if the start is already set, recompute the path
    /// with A*. On failure the end reverts to its previous value.
    pub fn set_end(&mut self, point: Point) -> Result<()> {
        self.update_endpoint(Endpoint::End, point)
    }

    fn update_endpoint(&mut self, which: Endpoint, point: Point) -> Result<()> {
        self.validate_point(point)?;

        let slot = match which {
            Endpoint::Start => &mut self.start,
            Endpoint::End => &mut self.end,
        };
        let previous = slot.replace(point);

        let (Some(start), Some(end)) = (self.start, self.end) else {
            return Ok(());
        };

        match find_route_a_star(&self.maze, start, end) {
            Ok(path) => {
                self.path = path;
                Ok(())
            }
            Err(error) => {
                warn!(endpoint = %which, %point, "search failed, rolling endpoint back");
                match which {
                    Endpoint::Start => self.start = previous,
                    Endpoint::End => self.end = previous,
                }
                Err(error)
            }
        }
    }

    /// Recompute the A* path for the current endpoints. Does nothing until a
    /// maze is loaded and both endpoints are set.
    pub fn find_path(&mut self) -> Result<()> {
        if self.maze.is_empty() {
            return Ok(());
        }
        let (Some(start), Some(end)) = (self.start, self.end) else {
            return Ok(());
        };
        self.path = find_route_a_star(&self.maze, start, end)?;
        Ok(())
    }

    /// Record `start`/`end` as the current endpoints and search with
    /// Q-learning, using a fresh RNG built from the learning configuration.
    pub fn q_find_path(&mut self, start: Point, end: Point) -> SearchOutcome {
        let mut rng = self.learning.rng();
        self.q_find_path_with_rng(start, end, &mut rng)
    }

    /// Same as [`Self::q_find_path`] with a caller-supplied RNG.
    pub fn q_find_path_with_rng<R: Rng + ?Sized>(
        &mut self,
        start: Point,
        end: Point,
        rng: &mut R,
    ) -> SearchOutcome {
        if let Err(error) = self
            .validate_point(start)
            .and_then(|()| self.validate_point(end))
        {
            return SearchOutcome::failure(error.to_string());
        }

        self.start = Some(start);
        self.end = Some(end);

        let result = find_route_q_learning(&self.maze, start, end, &self.learning, rng);
        let outcome = SearchOutcome::from_result(&result);
        match result {
            Ok(path) => self.path = path,
            Err(error) => {
                warn!(%start, %end, %error, "q-learning search failed");
                self.path.clear();
            }
        }
        outcome
    }

    /// One-shot search with any algorithm. Leaves the finder's state alone.
    pub fn plan(&self, algorithm: RouteAlgorithm, start: Point, end: Point) -> Result<Vec<Point>> {
        self.validate_point(start)?;
        self.validate_point(end)?;
        select_planner(algorithm, &self.learning).find_path(&self.maze, start, end)
    }

    fn validate_point(&self, point: Point) -> Result<()> {
        if self.maze.is_empty() {
            return Err(Error::EmptyMaze);
        }
        if !self.maze.contains_logical(point) {
            return Err(Error::InvalidPoint {
                point,
                rows: self.maze.logical_rows(),
                cols: self.maze.logical_cols(),
            });
        }
        Ok(())
    }

    /// Last computed path in doubled coordinates, goal first. Empty until a
    /// search succeeds.
    pub fn path(&self) -> &[Point] {
        &self.path
    }

    pub fn maze(&self) -> &MazeGrid {
        &self.maze
    }

    /// Logical start cell.
    pub fn start(&self) -> Option<Point> {
        self.start
    }

    /// Logical end cell.
    pub fn end(&self) -> Option<Point> {
        self.end
    }

    pub fn start_doubled(&self) -> Option<Point> {
        self.start.map(Point::doubled)
    }

    pub fn end_doubled(&self) -> Option<Point> {
        self.end.map(Point::doubled)
    }
}
