//! Route command handler for searching between two maze cells.

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use tracing::debug;

use mazeroute_lib::{MazeGrid, PathFinder, Point, QLearningConfig, RouteAlgorithm, RouteSummary};
use mazeroute_cli::output::{render_route, OutputFormat};
use mazeroute_cli::terminal::ColorPalette;

/// Search algorithm selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum AlgorithmArg {
    #[default]
    AStar,
    Bfs,
    QLearning,
}

impl From<AlgorithmArg> for RouteAlgorithm {
    fn from(value: AlgorithmArg) -> Self {
        match value {
            AlgorithmArg::AStar => RouteAlgorithm::AStar,
            AlgorithmArg::Bfs => RouteAlgorithm::Bfs,
            AlgorithmArg::QLearning => RouteAlgorithm::QLearning,
        }
    }
}

/// Arguments for the route command.
#[derive(Args, Debug, Clone)]
pub struct RouteArgs {
    /// Maze file in doubled-grid text form.
    #[arg(long)]
    pub maze: PathBuf,
    /// Start cell as ROW,COL.
    #[arg(long = "from", allow_hyphen_values = true)]
    pub from: Point,
    /// Goal cell as ROW,COL.
    #[arg(long = "to", allow_hyphen_values = true)]
    pub to: Point,
    /// Algorithm to use when searching.
    #[arg(long, value_enum, default_value_t = AlgorithmArg::AStar)]
    pub algorithm: AlgorithmArg,
    /// Seed for Q-learning exploration.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Override the Q-learning episode budget.
    #[arg(long)]
    pub episodes: Option<usize>,
    /// JSON file with Q-learning parameters.
    #[arg(long = "learning-config")]
    pub learning_config: Option<PathBuf>,
}

impl RouteArgs {
    /// Learning parameters from the config file, with flag overrides applied.
    pub fn to_learning_config(&self) -> Result<QLearningConfig> {
        let mut config = match &self.learning_config {
            Some(path) => QLearningConfig::load(path).with_context(|| {
                format!("failed to load learning config from {}", path.display())
            })?,
            None => QLearningConfig::default(),
        };
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if let Some(episodes) = self.episodes {
            config = config.with_episodes(episodes);
        }
        Ok(config)
    }
}

pub(crate) fn load_maze(path: &Path) -> Result<MazeGrid> {
    MazeGrid::load(path).with_context(|| format!("failed to load maze from {}", path.display()))
}

/// Handle the route subcommand.
pub fn handle_route_command(args: &RouteArgs, format: OutputFormat) -> Result<()> {
    let maze = load_maze(&args.maze)?;
    let config = args.to_learning_config()?;
    let algorithm = RouteAlgorithm::from(args.algorithm);
    debug!(%algorithm, from = %args.from, to = %args.to, "route requested");

    let mut finder = PathFinder::new().with_learning_config(config);
    finder.set_maze(maze);
    let path = finder.plan(algorithm, args.from, args.to)?;
    let summary = RouteSummary::from_path(algorithm, &path)?;

    let mut stdout = io::stdout().lock();
    render_route(&mut stdout, &summary, format, ColorPalette::detect())
        .context("failed to write route output")
}
