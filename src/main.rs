//! # sprintplan - Schedule to Sprint Plan CLI
//!
//! Turns a free-form project schedule (a markdown table of dated activities)
//! into a structured sprint plan and kanban board layout, then optionally
//! pushes the plan to a project-tracking backend.
//!
//! ## Pipeline
//!
//! 1. Parse the schedule table into typed tasks
//! 2. Classify priority and estimate story points on a fixed scale
//! 3. Bucket tasks into capacity-bounded sprints with computed date windows
//! 4. Materialize one kanban board per sprint (columns + cards)
//! 5. Assemble a run report (totals, per-sprint stats)
//!
//! ## Quick Start
//!
//! ```bash
//! # Write a starter configuration
//! sprintplan init
//!
//! # Build the plan and print a summary
//! sprintplan plan --report-dir reports
//!
//! # Inspect the full allocation
//! sprintplan preview
//!
//! # Push to a backend (demo mode without credentials)
//! sprintplan publish --backend github
//! ```
//!
//! The schedule document is markdown containing five-column pipe tables of
//! `| Day | Activity | Duration | Deliverable | Priority |`; rows that do not
//! match are skipped. All planning parameters (capacity, point scale, column
//! template, text templates) live in the JSON configuration file.

use clap::Parser;

pub mod board;
pub mod cli;
pub mod cmd;
pub mod config;
pub mod error;
pub mod fields;
pub mod plan;
pub mod points;
pub mod publish;
pub mod report;
pub mod schedule;
pub mod sprint;
pub mod task;

use cli::Cli;
use cmd::*;

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Plan { report_dir, out } => cmd_plan(&cli.config, report_dir, out),
        Commands::Preview => cmd_preview(&cli.config),
        Commands::Publish { backend, report_dir } => {
            cmd_publish(&cli.config, backend, report_dir)
        }
        Commands::Init => cmd_init(&cli.config),
        Commands::Completions { shell } => cmd_completions(shell),
    }
}
