//! Command implementations for the CLI interface.
//!
//! Each handler loads the configuration, runs the pipeline, and narrates the
//! result. Errors propagate as `Result` below this layer; the handlers print
//! them and exit non-zero.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use crate::cli::Cli;
use crate::config::Config;
use crate::error::Result;
use crate::fields::{format_priority, Backend};
use crate::plan::{build_plan, Plan};
use crate::publish::publisher_for;
use crate::report::save_report;

#[derive(Subcommand)]
pub enum Commands {
    /// Run the pipeline and print a plan summary.
    Plan {
        /// Write the run report JSON into this directory.
        #[arg(long)]
        report_dir: Option<PathBuf>,
        /// Write the full plan (sprints, boards, report) to this file.
        #[arg(long, short)]
        out: Option<PathBuf>,
    },

    /// Parse and allocate, then print sprints and boards in detail.
    Preview,

    /// Run the pipeline and push the plan to a tracker backend.
    Publish {
        /// Backend to publish to: github | gitproject.
        #[arg(long, value_enum)]
        backend: Backend,
        /// Write the run report JSON into this directory.
        #[arg(long)]
        report_dir: Option<PathBuf>,
    },

    /// Write a starter configuration file.
    Init,

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for.
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Load the configuration, locate the schedule, and build the plan.
fn load_and_build(config_path: &Path) -> Result<Plan> {
    let config = Config::load(config_path)?;
    let schedule_path = config.resolve_schedule(config_path)?;
    println!("Schedule: {}", schedule_path.display());
    let text = fs::read_to_string(&schedule_path)?;
    build_plan(&config, &text)
}

fn print_summary(plan: &Plan) {
    println!("Project: {}", plan.project.name);
    println!(
        "{} tasks, {} sprints, {} points",
        plan.report.totals.tasks, plan.report.totals.sprints, plan.report.totals.points
    );
    if plan.sprints.is_empty() {
        println!("No tasks parsed; nothing to plan.");
        return;
    }
    println!(
        "{:<4} {:<18} {:<7} {:<6} {:<12} {:<12}",
        "No", "Name", "Points", "Tasks", "Start", "End"
    );
    for s in &plan.sprints {
        println!(
            "{:<4} {:<18} {:<7} {:<6} {:<12} {:<12}",
            s.number,
            s.name,
            s.total_points,
            s.tasks.len(),
            s.start_date.to_string(),
            s.end_date.to_string()
        );
    }
}

/// Run the pipeline, print the summary, optionally persist report and plan.
pub fn cmd_plan(config_path: &Path, report_dir: Option<PathBuf>, out: Option<PathBuf>) {
    if let Err(e) = run_plan(config_path, report_dir, out) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run_plan(config_path: &Path, report_dir: Option<PathBuf>, out: Option<PathBuf>) -> Result<()> {
    let plan = load_and_build(config_path)?;
    print_summary(&plan);
    if let Some(dir) = report_dir {
        let path = save_report(&plan.report, &dir)?;
        println!("Report saved: {}", path.display());
    }
    if let Some(path) = out {
        let data = serde_json::to_string_pretty(&plan)?;
        fs::write(&path, data)?;
        println!("Plan written: {}", path.display());
    }
    Ok(())
}

/// Print sprints and boards in full detail without persisting anything.
pub fn cmd_preview(config_path: &Path) {
    if let Err(e) = run_preview(config_path) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run_preview(config_path: &Path) -> Result<()> {
    let plan = load_and_build(config_path)?;
    print_summary(&plan);
    for sprint in &plan.sprints {
        println!();
        println!("{} ({} to {})", sprint.name, sprint.start_date, sprint.end_date);
        println!("  goal: {}", sprint.goal);
        for task in &sprint.tasks {
            println!(
                "  {} [{} pts, {}] {} -> {}",
                task.id,
                task.points,
                format_priority(task.priority),
                task.title,
                task.deliverable
            );
        }
    }
    for board in &plan.boards {
        println!();
        println!("{}", board.name);
        for column in &board.columns {
            let wip = match column.wip_limit {
                Some(limit) => format!(" (WIP {limit})"),
                None => String::new(),
            };
            println!("  {}{}: {} cards", column.name, wip, column.cards.len());
        }
    }
    Ok(())
}

/// Run the pipeline and push the plan through the selected publisher.
pub fn cmd_publish(config_path: &Path, backend: Backend, report_dir: Option<PathBuf>) {
    if let Err(e) = run_publish(config_path, backend, report_dir) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run_publish(config_path: &Path, backend: Backend, report_dir: Option<PathBuf>) -> Result<()> {
    let plan = load_and_build(config_path)?;
    print_summary(&plan);
    let publisher = publisher_for(backend);
    let summary = publisher.publish(&plan)?;
    if summary.demo {
        println!("Publish skipped (demo mode), backend: {}", summary.backend);
    } else {
        println!(
            "Published to {}: {} created, {} skipped",
            summary.backend, summary.created, summary.skipped
        );
    }
    if let Some(dir) = report_dir {
        let path = save_report(&plan.report, &dir)?;
        println!("Report saved: {}", path.display());
    }
    Ok(())
}

/// Write a starter configuration, refusing to overwrite an existing one.
pub fn cmd_init(config_path: &Path) {
    if config_path.exists() {
        eprintln!("Refusing to overwrite {}", config_path.display());
        std::process::exit(1);
    }
    let config = Config::starter();
    let data = match serde_json::to_string_pretty(&config) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };
    let write = File::create(config_path).and_then(|mut f| f.write_all(data.as_bytes()));
    if let Err(e) = write {
        eprintln!("Failed to write {}: {e}", config_path.display());
        std::process::exit(1);
    }
    println!("Wrote starter config to {}", config_path.display());
}

/// Generate shell completion scripts for the CLI.
pub fn cmd_completions(shell: Shell) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "sprintplan", &mut io::stdout());
}
