use std::fmt::Write;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::maze::Point;
use crate::routing::RouteAlgorithm;

/// Logical cell visited along a route.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct RouteStep {
    pub index: usize,
    pub cell: Point,
}

/// Structured representation of a found route that higher-level consumers
/// can serialise. Steps run start to goal.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RouteSummary {
    pub algorithm: RouteAlgorithm,
    pub start: Point,
    pub goal: Point,
    /// Moves between neighbouring logical cells.
    pub hops: usize,
    pub steps: Vec<RouteStep>,
    /// Raw doubled-grid nodes, boundaries included, start to goal.
    pub doubled_steps: Vec<Point>,
}

impl RouteSummary {
    /// Build a summary from a doubled path ordered goal to start, as returned
    /// by the search functions.
    pub fn from_path(algorithm: RouteAlgorithm, path: &[Point]) -> Result<Self> {
        if path.is_empty() {
            return Err(Error::EmptyRoutePlan);
        }

        let doubled_steps: Vec<Point> = path.iter().rev().copied().collect();
        let steps: Vec<RouteStep> = doubled_steps
            .iter()
            .filter(|node| node.is_cell_node())
            .enumerate()
            .map(|(index, node)| RouteStep {
                index,
                cell: node.logical(),
            })
            .collect();

        let start = doubled_steps
            .first()
            .map(|node| node.logical())
            .ok_or(Error::EmptyRoutePlan)?;
        let goal = doubled_steps
            .last()
            .map(|node| node.logical())
            .ok_or(Error::EmptyRoutePlan)?;

        Ok(Self {
            algorithm,
            start,
            goal,
            hops: steps.len().saturating_sub(1),
            steps,
            doubled_steps,
        })
    }

    /// Plain-text listing of the visited cells.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "Route from {} to {} ({} hops; algorithm: {}):",
            self.start, self.goal, self.hops, self.algorithm
        );
        for step in &self.steps {
            let _ = writeln!(out, " - {}", step.cell);
        }
        out
    }

    /// Pretty-printed JSON document.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
