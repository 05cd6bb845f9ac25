use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use mazeroute_cli::output::{render_info, MazeInfo, OutputFormat};

use super::route::load_maze;

/// Arguments for the info command.
#[derive(Args, Debug, Clone)]
pub struct InfoArgs {
    /// Maze file in doubled-grid text form.
    #[arg(long)]
    pub maze: PathBuf,
}

/// Handle the info subcommand: print dimensions, open node count and the
/// Q-learning episode budget for a maze file.
pub fn handle_info_command(args: &InfoArgs, format: OutputFormat) -> Result<()> {
    let maze = load_maze(&args.maze)?;
    let info = MazeInfo::new(&maze);

    let mut stdout = io::stdout().lock();
    render_info(&mut stdout, &info, format).context("failed to write maze info")
}
