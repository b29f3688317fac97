//! The end-to-end planning pipeline.
//!
//! `build_plan` threads explicit inputs through the stages: parse the
//! schedule, allocate sprints, materialize boards, assemble the report. The
//! resulting `Plan` is the single backend-agnostic artifact handed to the
//! publishers and to persistence; no state survives between runs.

use serde::{Deserialize, Serialize};

use crate::board::{build_board, Board};
use crate::config::{Config, ProjectConfig};
use crate::error::Result;
use crate::report::{assemble_report, Report};
use crate::schedule::parse_schedule;
use crate::sprint::{allocate_sprints, Sprint};

/// Complete output of one planning run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    pub project: ProjectConfig,
    pub sprints: Vec<Sprint>,
    pub boards: Vec<Board>,
    pub report: Report,
}

/// Run the full pipeline over the schedule text.
pub fn build_plan(config: &Config, schedule_text: &str) -> Result<Plan> {
    let tasks = parse_schedule(schedule_text, &config.scoring);
    let sprints = allocate_sprints(tasks, &config.sprints, &config.templates);
    let boards = sprints
        .iter()
        .map(|s| build_board(s, &config.kanban, &config.templates))
        .collect::<Result<Vec<_>>>()?;
    let report = assemble_report(&config.project.name, &sprints, &boards);
    Ok(Plan {
        project: config.project.clone(),
        sprints,
        boards,
        report,
    })
}
