//! Tabular Q-learning search.
//!
//! A session trains a fresh [`QTable`] over the doubled grid by running
//! simulated episodes from the start node, then extracts a route by greedy
//! rollout of the learned policy. Nothing survives the call: the table is
//! dropped once the path has been reconstructed.
//!
//! - [`QLearningConfig`] - rewards, learning rates and caps
//! - [`episode_count`] - size-derived training budget
//! - [`step_reward`] - environment dynamics for one transition
//! - [`train`] / [`extract_path`] - the two phases
//! - [`find_route_q_learning`] - both phases behind one call

mod config;
mod table;

pub use config::{
    QLearningConfig, DEFAULT_ALPHA, DEFAULT_EPSILON_DECAY, DEFAULT_EPSILON_INITIAL,
    DEFAULT_GAMMA, GOAL_REWARD, MAX_EPISODE_STEPS, MAX_EXTRACTION_STEPS, STEP_PENALTY,
    WALL_PENALTY,
};
pub use table::{Action, QTable, ACTION_COUNT};

use std::collections::{HashMap, HashSet};

use rand::Rng;
use tracing::{debug, info, trace, warn};

use crate::error::{Error, NotFoundReason, Result};
use crate::maze::{MazeGrid, Point};
use crate::path::reconstruct_path;

/// Number of training episodes for a maze whose larger logical side is
/// `dimension`.
///
/// The budget grows in three bands: `155` episodes per unit up to 30, `200`
/// per unit up to 40, and `200` per unit plus a flat `500` above that.
pub fn episode_count(dimension: usize) -> usize {
    if dimension <= 30 {
        dimension * 155
    } else if dimension <= 40 {
        dimension * 200
    } else {
        dimension * 200 + 500
    }
}

/// Result of applying one action in the environment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    /// State the agent ends up in. A blocked move leaves it in place.
    pub next: Point,
    pub reward: f64,
    /// Episode ends after this transition.
    pub done: bool,
}

/// Environment dynamics: reward and successor for moving from `current` to
/// `candidate` while heading for `goal` (all doubled coordinates).
pub fn step_reward(
    maze: &MazeGrid,
    current: Point,
    candidate: Point,
    goal: Point,
    config: &QLearningConfig,
) -> Transition {
    if candidate == goal {
        Transition {
            next: candidate,
            reward: config.goal_reward,
            done: true,
        }
    } else if !maze.is_passable(candidate) {
        Transition {
            next: current,
            reward: config.wall_penalty,
            done: true,
        }
    } else {
        Transition {
            next: candidate,
            reward: config.step_penalty,
            done: false,
        }
    }
}

fn select_action<R: Rng + ?Sized>(
    table: &QTable,
    state: Point,
    epsilon: f64,
    rng: &mut R,
) -> Action {
    if rng.gen::<f64>() < epsilon {
        Action::ALL[rng.gen_range(0..ACTION_COUNT)]
    } else {
        table.best_action(state)
    }
}

/// Train a fresh Q-table for `episodes` episodes between two doubled nodes.
///
/// The first episode is fully greedy; afterwards exploration follows
/// [`QLearningConfig::epsilon_after`]. Episodes end on the goal, on a wall,
/// or after `max_episode_steps` transitions.
pub fn train<R: Rng + ?Sized>(
    maze: &MazeGrid,
    start: Point,
    goal: Point,
    episodes: usize,
    config: &QLearningConfig,
    rng: &mut R,
) -> QTable {
    let mut table = QTable::for_maze(maze);
    let mut epsilon = 0.0;
    let mut truncated = 0usize;

    for episode in 0..episodes {
        let mut state = start;
        let mut steps = 0usize;
        let mut reached_goal = false;

        loop {
            let action = select_action(&table, state, epsilon, rng);
            let transition = step_reward(maze, state, action.apply(state), goal, config);
            table.update(
                state,
                action,
                transition.reward,
                transition.next,
                config.alpha,
                config.gamma,
            );
            state = transition.next;
            steps += 1;

            if transition.done {
                reached_goal = state == goal;
                break;
            }
            if steps >= config.max_episode_steps {
                truncated += 1;
                break;
            }
        }

        trace!(episode, steps, epsilon, reached_goal, "episode finished");
        epsilon = config.epsilon_after(episode);
    }

    if truncated > 0 {
        warn!(
            truncated,
            cap = config.max_episode_steps,
            "training episodes hit the per-episode step cap"
        );
    }

    table
}

/// Follow the greedy policy from `start` to `goal` (logical cells) and return
/// the doubled path ordered goal to start.
///
/// A greedy rollout is deterministic, so walking into a wall or revisiting a
/// node means the goal will never be reached; both fail immediately.
/// Otherwise the rollout gives up after `max_extraction_steps` moves.
pub fn extract_path(
    maze: &MazeGrid,
    table: &QTable,
    start: Point,
    goal: Point,
    config: &QLearningConfig,
) -> Result<Vec<Point>> {
    let start_node = start.doubled();
    let goal_node = goal.doubled();

    let mut parents: HashMap<Point, Point> = HashMap::new();
    let mut seen: HashSet<Point> = HashSet::from([start_node]);
    let mut current = start_node;
    let mut steps = 0usize;

    while current != goal_node {
        if steps >= config.max_extraction_steps {
            return Err(Error::PathNotFound {
                start,
                goal,
                reason: NotFoundReason::StepLimit {
                    limit: config.max_extraction_steps,
                },
            });
        }

        let next = table.best_action(current).apply(current);
        if !maze.is_passable(next) || !seen.insert(next) {
            debug!(%start, %goal, %next, steps, "greedy policy is stuck");
            return Err(Error::PathNotFound {
                start,
                goal,
                reason: NotFoundReason::Isolated,
            });
        }

        parents.insert(next, current);
        current = next;
        steps += 1;
    }

    Ok(reconstruct_path(&parents, start_node, goal_node))
}

/// Train a policy between two logical cells and extract its route.
///
/// Both endpoints must lie inside the maze. The episode budget comes from
/// [`episode_count`] unless the configuration overrides it.
pub fn find_route_q_learning<R: Rng + ?Sized>(
    maze: &MazeGrid,
    start: Point,
    goal: Point,
    config: &QLearningConfig,
    rng: &mut R,
) -> Result<Vec<Point>> {
    if maze.is_empty() {
        return Err(Error::EmptyMaze);
    }
    for point in [start, goal] {
        if !maze.contains_logical(point) {
            return Err(Error::InvalidPoint {
                point,
                rows: maze.logical_rows(),
                cols: maze.logical_cols(),
            });
        }
    }

    let episodes = config
        .episodes
        .unwrap_or_else(|| episode_count(maze.largest_logical_dimension()));
    info!(
        episodes,
        rows = maze.logical_rows(),
        cols = maze.logical_cols(),
        %start,
        %goal,
        "training q-learning policy"
    );

    let table = train(maze, start.doubled(), goal.doubled(), episodes, config, rng);
    let path = extract_path(maze, &table, start, goal, config)?;
    debug!(%start, %goal, steps = path.len().saturating_sub(1), "q-learning found route");
    Ok(path)
}
