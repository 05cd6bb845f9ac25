//! Tuning knobs for the Q-learning search.

use std::fs;
use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Learning rate applied to every temporal-difference update.
pub const DEFAULT_ALPHA: f64 = 0.9;
/// Discount factor for the bootstrapped next-state value.
pub const DEFAULT_GAMMA: f64 = 0.98;
/// Exploration rate the decay schedule starts from.
pub const DEFAULT_EPSILON_INITIAL: f64 = 1.0;
/// Exponential decay rate of exploration per episode.
pub const DEFAULT_EPSILON_DECAY: f64 = 0.01;
/// Terminal reward for stepping onto the goal.
pub const GOAL_REWARD: f64 = 10.0;
/// Terminal reward for bumping into a wall or the maze edge.
pub const WALL_PENALTY: f64 = -10.0;
/// Reward for any other step.
pub const STEP_PENALTY: f64 = -0.1;
/// Greedy rollout cap when extracting the learned path.
pub const MAX_EXTRACTION_STEPS: usize = 40_000;
/// Transition cap for a single training episode.
pub const MAX_EPISODE_STEPS: usize = 40_000;

/// Configuration for a Q-learning training session.
///
/// Every field has a default, so a JSON file only needs to list the values it
/// overrides.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QLearningConfig {
    pub alpha: f64,
    pub gamma: f64,
    pub epsilon_initial: f64,
    pub epsilon_decay: f64,
    pub goal_reward: f64,
    pub wall_penalty: f64,
    pub step_penalty: f64,
    pub max_extraction_steps: usize,
    pub max_episode_steps: usize,
    /// Overrides the size-derived episode budget when set.
    pub episodes: Option<usize>,
    /// Seed for the exploration RNG; `None` draws fresh entropy per session.
    pub seed: Option<u64>,
}

impl Default for QLearningConfig {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            gamma: DEFAULT_GAMMA,
            epsilon_initial: DEFAULT_EPSILON_INITIAL,
            epsilon_decay: DEFAULT_EPSILON_DECAY,
            goal_reward: GOAL_REWARD,
            wall_penalty: WALL_PENALTY,
            step_penalty: STEP_PENALTY,
            max_extraction_steps: MAX_EXTRACTION_STEPS,
            max_episode_steps: MAX_EPISODE_STEPS,
            episodes: None,
            seed: None,
        }
    }
}

impl QLearningConfig {
    /// Parse a JSON configuration document.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read a JSON configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_episodes(mut self, episodes: usize) -> Self {
        self.episodes = Some(episodes);
        self
    }

    /// Fresh RNG for one training session.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Exploration rate used by the episode that follows `episode`.
    ///
    /// The very first episode runs fully greedy (rate 0); this schedule only
    /// applies from the second episode on.
    pub fn epsilon_after(&self, episode: usize) -> f64 {
        self.epsilon_initial * (-self.epsilon_decay * episode as f64).exp()
    }
}
