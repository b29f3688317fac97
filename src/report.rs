//! Run report assembly and persistence.
//!
//! Pure aggregation over the sprint and board sequences: overall totals plus
//! a one-line summary per sprint. Persisting the report is a separate step
//! that writes timestamped pretty JSON into a reports directory.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::error::Result;
use crate::sprint::Sprint;

/// Summary of one planning run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// RFC 3339 timestamp of the run.
    pub generated_at: String,
    pub project: String,
    pub totals: Totals,
    pub sprints: Vec<SprintSummary>,
}

/// Overall counts for the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Totals {
    pub tasks: usize,
    pub sprints: usize,
    pub boards: usize,
    pub cards: usize,
    pub points: u32,
}

/// Per-sprint statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SprintSummary {
    pub name: String,
    pub points: u32,
    pub tasks: usize,
    /// "start to end" date range.
    pub period: String,
}

/// Fold sprints and boards into a report.
pub fn assemble_report(project: &str, sprints: &[Sprint], boards: &[Board]) -> Report {
    let cards = boards
        .iter()
        .flat_map(|b| b.columns.iter())
        .map(|c| c.cards.len())
        .sum();
    Report {
        generated_at: Utc::now().to_rfc3339(),
        project: project.to_string(),
        totals: Totals {
            tasks: sprints.iter().map(|s| s.tasks.len()).sum(),
            sprints: sprints.len(),
            boards: boards.len(),
            cards,
            points: sprints.iter().map(|s| s.total_points).sum(),
        },
        sprints: sprints
            .iter()
            .map(|s| SprintSummary {
                name: s.name.clone(),
                points: s.total_points,
                tasks: s.tasks.len(),
                period: format!("{} to {}", s.start_date, s.end_date),
            })
            .collect(),
    }
}

/// Write the report as pretty JSON into `dir`, creating it if needed.
///
/// Returns the path of the written file. Uses a temp + rename write so a
/// failed run never leaves a truncated report behind.
pub fn save_report(report: &Report, dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("report-{}.json", Utc::now().timestamp_millis()));
    let tmp = path.with_extension("json.tmp");
    let data = serde_json::to_string_pretty(report)?;
    let mut f = File::create(&tmp)?;
    f.write_all(data.as_bytes())?;
    f.flush()?;
    fs::rename(&tmp, &path)?;
    Ok(path)
}
