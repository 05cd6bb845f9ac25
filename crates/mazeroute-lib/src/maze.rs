//! Doubled-resolution maze grid and its addressing scheme.
//!
//! A maze of `R x C` logical cells is stored as a `2R x 2C` grid. Logical cell
//! `(r, c)` lives at doubled position `(2r, 2c)`; the node at `(2r, 2c + 1)` is
//! the boundary to the cell on its right and `(2r + 1, 2c)` the boundary to the
//! cell below. A boundary node is open exactly when the two cells it separates
//! are connected. Nodes at `(odd, odd)` never connect anything and are walls.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Single-axis unit moves in the fixed order left, up, right, down.
pub(crate) const STEP_OFFSETS: [(i32, i32); 4] = [(0, -1), (-1, 0), (0, 1), (1, 0)];

/// Integer grid coordinate, either logical or doubled depending on context.
///
/// Ordering is row-major so points can key sorted containers.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Point {
    pub row: i32,
    pub col: i32,
}

impl Point {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Map a logical cell to its node in the doubled grid.
    ///
    /// Coordinates saturate at the `i32` range, so an extreme cell lands on a
    /// node that no maze contains.
    pub const fn doubled(self) -> Self {
        Self {
            row: self.row.saturating_mul(2),
            col: self.col.saturating_mul(2),
        }
    }

    /// Map a doubled node back to the logical cell that owns it.
    pub const fn logical(self) -> Self {
        Self {
            row: self.row.div_euclid(2),
            col: self.col.div_euclid(2),
        }
    }

    /// `true` when the doubled node is a cell node rather than a boundary.
    pub const fn is_cell_node(self) -> bool {
        self.row % 2 == 0 && self.col % 2 == 0
    }

    pub fn manhattan(self, other: Point) -> i32 {
        (self.row - other.row).abs() + (self.col - other.col).abs()
    }

    pub const fn offset(self, drow: i32, dcol: i32) -> Self {
        Self {
            row: self.row.saturating_add(drow),
            col: self.col.saturating_add(dcol),
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl FromStr for Point {
    type Err = String;

    /// Parse `"row,col"`.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (row, col) = s
            .split_once(',')
            .ok_or_else(|| format!("expected ROW,COL but got '{s}'"))?;
        let row = row
            .trim()
            .parse()
            .map_err(|_| format!("invalid row in '{s}'"))?;
        let col = col
            .trim()
            .parse()
            .map_err(|_| format!("invalid column in '{s}'"))?;
        Ok(Point::new(row, col))
    }
}

/// Content of one doubled-grid node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cell {
    Open,
    Wall,
}

impl Cell {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '0' | '.' => Some(Cell::Open),
            '1' | '#' => Some(Cell::Wall),
            _ => None,
        }
    }

    fn as_char(self) -> char {
        match self {
            Cell::Open => '0',
            Cell::Wall => '1',
        }
    }
}

/// Maze stored at doubled resolution.
///
/// The grid is never mutated after construction; a new maze replaces the old
/// one wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MazeGrid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl MazeGrid {
    /// Build a grid from raw doubled-resolution cells in row-major order.
    pub fn new(rows: usize, cols: usize, cells: Vec<Cell>) -> Result<Self> {
        if rows % 2 != 0 || cols % 2 != 0 {
            return Err(Error::InvalidMaze {
                message: format!("doubled dimensions must be even, got {rows}x{cols}"),
            });
        }
        if cells.len() != rows * cols {
            return Err(Error::InvalidMaze {
                message: format!(
                    "expected {} cells for a {rows}x{cols} grid, got {}",
                    rows * cols,
                    cells.len()
                ),
            });
        }
        Ok(Self { rows, cols, cells })
    }

    /// Maze with every neighbouring pair of logical cells connected.
    pub fn open(logical_rows: usize, logical_cols: usize) -> Self {
        let right = (0..logical_rows)
            .map(|_| (0..logical_cols).map(|c| c + 1 == logical_cols).collect())
            .collect::<Vec<Vec<bool>>>();
        let bottom = (0..logical_rows)
            .map(|r| vec![r + 1 == logical_rows; logical_cols])
            .collect::<Vec<Vec<bool>>>();
        Self::build_from_walls(logical_rows, logical_cols, &right, &bottom)
    }

    /// Build a maze from per-cell wall flags.
    ///
    /// `right[r][c]` closes the boundary between `(r, c)` and `(r, c + 1)`,
    /// `bottom[r][c]` the boundary between `(r, c)` and `(r + 1, c)`.
    pub fn from_wall_matrices(right: &[Vec<bool>], bottom: &[Vec<bool>]) -> Result<Self> {
        let logical_rows = right.len();
        let logical_cols = right.first().map_or(0, Vec::len);

        if bottom.len() != logical_rows {
            return Err(Error::InvalidMaze {
                message: format!(
                    "right-wall matrix has {logical_rows} rows but bottom-wall matrix has {}",
                    bottom.len()
                ),
            });
        }
        for (r, (right_row, bottom_row)) in right.iter().zip(bottom).enumerate() {
            if right_row.len() != logical_cols || bottom_row.len() != logical_cols {
                return Err(Error::InvalidMaze {
                    message: format!("wall matrix row {r} does not have {logical_cols} columns"),
                });
            }
        }

        Ok(Self::build_from_walls(
            logical_rows,
            logical_cols,
            right,
            bottom,
        ))
    }

    fn build_from_walls(
        logical_rows: usize,
        logical_cols: usize,
        right: &[Vec<bool>],
        bottom: &[Vec<bool>],
    ) -> Self {
        let rows = logical_rows * 2;
        let cols = logical_cols * 2;
        let mut cells = vec![Cell::Wall; rows * cols];

        let wall = |closed: bool| if closed { Cell::Wall } else { Cell::Open };
        for r in 0..logical_rows {
            for c in 0..logical_cols {
                let base = 2 * r * cols + 2 * c;
                cells[base] = Cell::Open;
                cells[base + 1] = wall(right[r][c]);
                cells[base + cols] = wall(bottom[r][c]);
            }
        }

        Self { rows, cols, cells }
    }

    /// Parse a doubled grid, one text line per row.
    ///
    /// `0` or `.` is open, `1` or `#` is a wall. Whitespace inside a line is
    /// ignored and blank lines are skipped.
    pub fn parse(text: &str) -> Result<Self> {
        let mut rows = 0usize;
        let mut cols = None;
        let mut cells = Vec::new();

        for (line_no, line) in text.lines().enumerate() {
            let before = cells.len();
            for c in line.chars().filter(|c| !c.is_whitespace()) {
                let cell = Cell::from_char(c).ok_or_else(|| Error::InvalidMaze {
                    message: format!("unexpected character '{c}' on line {}", line_no + 1),
                })?;
                cells.push(cell);
            }
            let width = cells.len() - before;
            if width == 0 {
                continue;
            }
            match cols {
                None => cols = Some(width),
                Some(expected) if expected != width => {
                    return Err(Error::InvalidMaze {
                        message: format!(
                            "line {} has {width} cells, expected {expected}",
                            line_no + 1
                        ),
                    });
                }
                Some(_) => {}
            }
            rows += 1;
        }

        let Some(cols) = cols else {
            return Err(Error::InvalidMaze {
                message: "maze text contains no rows".to_string(),
            });
        };
        Self::new(rows, cols, cells)
    }

    /// Read and parse a doubled-grid maze file.
    pub fn load(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading maze");
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Doubled row count.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Doubled column count.
    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn logical_rows(&self) -> usize {
        self.rows / 2
    }

    pub fn logical_cols(&self) -> usize {
        self.cols / 2
    }

    /// Larger of the two logical dimensions.
    pub fn largest_logical_dimension(&self) -> usize {
        self.logical_rows().max(self.logical_cols())
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Number of open nodes in the doubled grid.
    pub fn open_count(&self) -> usize {
        self.cells.iter().filter(|c| **c == Cell::Open).count()
    }

    pub(crate) fn index(&self, point: Point) -> Option<usize> {
        if point.row < 0 || point.col < 0 {
            return None;
        }
        let (row, col) = (point.row as usize, point.col as usize);
        (row < self.rows && col < self.cols).then_some(row * self.cols + col)
    }

    /// Cell at a doubled coordinate, `None` outside the grid.
    pub fn cell(&self, point: Point) -> Option<Cell> {
        self.index(point).map(|idx| self.cells[idx])
    }

    /// Whether the doubled node can be entered. Anything outside the grid is
    /// impassable.
    pub fn is_passable(&self, point: Point) -> bool {
        self.cell(point) == Some(Cell::Open)
    }

    /// Whether a logical point lies within the maze.
    pub fn contains_logical(&self, point: Point) -> bool {
        point.row >= 0
            && point.col >= 0
            && (point.row as usize) < self.logical_rows()
            && (point.col as usize) < self.logical_cols()
    }

    /// Passable single-axis neighbours of a doubled node, in the order left,
    /// up, right, down.
    pub fn neighbours(&self, point: Point) -> impl Iterator<Item = Point> + '_ {
        STEP_OFFSETS
            .iter()
            .map(move |&(drow, dcol)| point.offset(drow, dcol))
            .filter(|next| self.is_passable(*next))
    }
}

impl FromStr for MazeGrid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for MazeGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.cols.max(1)) {
            let line: String = row.iter().map(|c| c.as_char()).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
