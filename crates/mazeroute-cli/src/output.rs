//! Output formatting for routes and maze descriptions.
//!
//! Renderers write to any [`Write`] sink so the binary can target stdout and
//! tests can capture into a buffer.

use std::io::{self, Write};

use clap::ValueEnum;
use mazeroute_lib::{MazeGrid, RouteSummary};
use serde::Serialize;

use crate::terminal::ColorPalette;

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable listing with colored START/GOAL tags.
    #[default]
    Text,
    /// Pretty-printed JSON document.
    Json,
}

/// Write any serialisable value as pretty JSON followed by a newline.
pub fn render_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).map_err(io::Error::other)?;
    out.write_all(b"\n")
}

/// Render a route summary in the requested format.
pub fn render_route<W: Write>(
    out: &mut W,
    summary: &RouteSummary,
    format: OutputFormat,
    palette: ColorPalette,
) -> io::Result<()> {
    match format {
        OutputFormat::Text => RouteRenderer::new(palette).render(out, summary),
        OutputFormat::Json => render_json(out, summary),
    }
}

/// Renderer for the text route view.
pub struct RouteRenderer {
    palette: ColorPalette,
}

impl RouteRenderer {
    #[must_use]
    pub const fn new(palette: ColorPalette) -> Self {
        Self { palette }
    }

    pub fn render<W: Write>(&self, out: &mut W, summary: &RouteSummary) -> io::Result<()> {
        let p = &self.palette;
        writeln!(
            out,
            "Route from {}{}{} to {}{}{} ({} hops; algorithm: {}):",
            p.white_bold,
            summary.start,
            p.reset,
            p.white_bold,
            summary.goal,
            p.reset,
            summary.hops,
            summary.algorithm
        )?;

        let len = summary.steps.len();
        for (i, step) in summary.steps.iter().enumerate() {
            let (tag_color, tag_text) = self.step_tag(i == 0, i + 1 == len);
            writeln!(
                out,
                "{}{}{} {}{}{}",
                tag_color, tag_text, p.reset, p.white_bold, step.cell, p.reset
            )?;
        }

        writeln!(
            out,
            "\n{}{} doubled-grid nodes{}",
            p.gray,
            summary.doubled_steps.len(),
            p.reset
        )
    }

    fn step_tag(&self, is_first: bool, is_last: bool) -> (&str, &str) {
        let p = &self.palette;
        if is_first {
            (p.tag_start, " START ")
        } else if is_last {
            (p.tag_goal, " GOAL  ")
        } else {
            (p.gray, "   |   ")
        }
    }
}

/// Description of a maze file for the `info` command.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MazeInfo {
    pub logical_rows: usize,
    pub logical_cols: usize,
    pub doubled_rows: usize,
    pub doubled_cols: usize,
    pub open_nodes: usize,
    pub q_learning_episodes: usize,
}

impl MazeInfo {
    pub fn new(maze: &MazeGrid) -> Self {
        Self {
            logical_rows: maze.logical_rows(),
            logical_cols: maze.logical_cols(),
            doubled_rows: maze.rows(),
            doubled_cols: maze.cols(),
            open_nodes: maze.open_count(),
            q_learning_episodes: mazeroute_lib::episode_count(maze.largest_logical_dimension()),
        }
    }
}

pub fn render_info<W: Write>(out: &mut W, info: &MazeInfo, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Json => render_json(out, info),
        OutputFormat::Text => {
            writeln!(
                out,
                "Maze: {}x{} cells ({}x{} doubled grid)",
                info.logical_rows, info.logical_cols, info.doubled_rows, info.doubled_cols
            )?;
            writeln!(out, "Open nodes: {}", info.open_nodes)?;
            writeln!(out, "Q-learning episodes: {}", info.q_learning_episodes)
        }
    }
}
