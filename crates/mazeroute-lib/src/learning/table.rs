use crate::maze::{MazeGrid, Point, STEP_OFFSETS};

/// Number of actions available in every state.
pub const ACTION_COUNT: usize = 4;

/// Cardinal move of the learning agent. The discriminant is the action's
/// column in the [`QTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Left = 0,
    Up = 1,
    Right = 2,
    Down = 3,
}

impl Action {
    pub const ALL: [Action; ACTION_COUNT] = [Action::Left, Action::Up, Action::Right, Action::Down];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Node reached by taking this action from `from`, ignoring walls.
    pub fn apply(self, from: Point) -> Point {
        let (drow, dcol) = STEP_OFFSETS[self.index()];
        from.offset(drow, dcol)
    }
}

/// Tabular action-value function over the doubled grid.
///
/// Lookups outside the grid read as all-zero and updates there are ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct QTable {
    rows: usize,
    cols: usize,
    values: Vec<[f64; ACTION_COUNT]>,
}

impl QTable {
    /// Zero-initialised table covering `rows x cols` doubled nodes.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            values: vec![[0.0; ACTION_COUNT]; rows * cols],
        }
    }

    pub fn for_maze(maze: &MazeGrid) -> Self {
        Self::new(maze.rows(), maze.cols())
    }

    fn index(&self, state: Point) -> Option<usize> {
        if state.row < 0 || state.col < 0 {
            return None;
        }
        let (row, col) = (state.row as usize, state.col as usize);
        (row < self.rows && col < self.cols).then_some(row * self.cols + col)
    }

    pub fn values(&self, state: Point) -> [f64; ACTION_COUNT] {
        self.index(state)
            .map_or([0.0; ACTION_COUNT], |idx| self.values[idx])
    }

    pub fn value(&self, state: Point, action: Action) -> f64 {
        self.values(state)[action.index()]
    }

    /// Highest action-value in `state`.
    pub fn max_value(&self, state: Point) -> f64 {
        self.values(state)
            .into_iter()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Greedy action in `state`; ties go to the lowest-indexed action.
    pub fn best_action(&self, state: Point) -> Action {
        let values = self.values(state);
        let mut best = 0;
        for (idx, value) in values.iter().enumerate().skip(1) {
            if *value > values[best] {
                best = idx;
            }
        }
        Action::ALL[best]
    }

    /// Temporal-difference update
    /// `Q(s,a) += alpha * (reward + gamma * max Q(next) - Q(s,a))`.
    pub fn update(
        &mut self,
        state: Point,
        action: Action,
        reward: f64,
        next: Point,
        alpha: f64,
        gamma: f64,
    ) {
        let target = reward + gamma * self.max_value(next);
        if let Some(idx) = self.index(state) {
            let current = &mut self.values[idx][action.index()];
            *current += alpha * (target - *current);
        }
    }
}
