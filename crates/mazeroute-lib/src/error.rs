use std::fmt;

use thiserror::Error;

use crate::maze::Point;

/// Convenient result alias for the maze route library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when no route could be found between two points.
    #[error("Path not found. Probably the labyrinth has isolated study areas ({start} -> {goal}: {reason})")]
    PathNotFound {
        start: Point,
        goal: Point,
        reason: NotFoundReason,
    },

    /// Raised when an endpoint lies outside the logical bounds of the maze.
    #[error("Incorrect point {point}: maze is {rows}x{cols} cells")]
    InvalidPoint { point: Point, rows: usize, cols: usize },

    /// Raised when a search is requested before any maze was loaded.
    #[error("no maze loaded")]
    EmptyMaze,

    /// Raised when grid data cannot describe a doubled-resolution maze.
    #[error("invalid maze: {message}")]
    InvalidMaze { message: String },

    /// Raised when a computed route lacks any points.
    #[error("route plan was empty")]
    EmptyRoutePlan,

    /// Wrapper for JSON (de)serialisation errors.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// `true` for the "no reachable path" family of failures.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::PathNotFound { .. })
    }
}

/// Why a search gave up without a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundReason {
    /// The goal is not reachable from the start (frontier exhausted, or the
    /// learned policy walks into a wall or a loop).
    Isolated,
    /// Greedy policy rollout exceeded its step cap.
    StepLimit { limit: usize },
}

impl fmt::Display for NotFoundReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotFoundReason::Isolated => f.write_str("goal unreachable"),
            NotFoundReason::StepLimit { limit } => {
                write!(f, "policy rollout exceeded {limit} steps")
            }
        }
    }
}
