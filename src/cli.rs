use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;

/// Schedule-to-sprint-plan CLI.
/// Configuration defaults to ./sprintplan.json or a path passed via --config.
#[derive(Parser)]
#[command(name = "sprintplan", version, about = "Turn a markdown schedule into sprints and kanban boards")]
pub struct Cli {
    /// Path to the project configuration JSON.
    #[arg(long, global = true, default_value = "sprintplan.json")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}
