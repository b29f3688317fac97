//! Project configuration loading and validation.
//!
//! The configuration is a single JSON document describing the project, the
//! schedule location, sprint parameters, the scoring model, the kanban column
//! template, and the text templates used when generating goals and cards.
//! Missing or inconsistent required fields are fatal; nothing downstream runs
//! on a half-valid configuration.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{PlanError, Result};
use crate::fields::Priority;

/// Top-level project configuration document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub project: ProjectConfig,
    pub schedule: ScheduleConfig,
    pub sprints: SprintConfig,
    pub scoring: Scoring,
    pub kanban: KanbanConfig,
    pub templates: Templates,
}

/// Project identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Where to find the schedule document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Primary schedule path, resolved relative to the config file.
    pub file: PathBuf,
    /// Additional candidate locations tried in order when the primary path
    /// does not exist.
    #[serde(default)]
    pub fallbacks: Vec<PathBuf>,
}

/// Sprint sizing and calendar parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SprintConfig {
    /// Point capacity per sprint.
    pub capacity_points: u32,
    /// Sprint length in calendar days.
    pub duration_days: u32,
    /// Start date of sprint 1.
    pub start_date: NaiveDate,
    /// Sprint name prefix ("Sprint" yields "Sprint 1", "Sprint 2", ...).
    pub prefix: String,
}

/// Story point estimation parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scoring {
    /// Hours of work per raw story point.
    pub hours_per_point: u32,
    /// Ascending point scale; estimates are rounded up onto it.
    pub scale: Vec<u32>,
    /// Signed per-priority adjustments applied before scale rounding.
    pub adjustments: Adjustments,
}

/// Signed point adjustment per priority level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Adjustments {
    pub high: i32,
    pub medium: i32,
    pub low: i32,
}

impl Scoring {
    /// Adjustment for a given priority level.
    pub fn adjustment(&self, priority: Priority) -> i32 {
        match priority {
            Priority::High => self.adjustments.high,
            Priority::Medium => self.adjustments.medium,
            Priority::Low => self.adjustments.low,
        }
    }
}

/// Kanban column template for generated boards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KanbanConfig {
    pub columns: Vec<ColumnTemplate>,
}

impl KanbanConfig {
    /// Index of the column flagged as the intake (backlog) column.
    pub fn intake_index(&self) -> Option<usize> {
        self.columns.iter().position(|c| c.intake)
    }
}

/// One column in the board template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnTemplate {
    pub name: String,
    /// Display color, e.g. "#e0e0e0".
    pub color: String,
    #[serde(default)]
    pub wip_limit: Option<u32>,
    /// Newly generated cards land in the column with this flag set.
    #[serde(default)]
    pub intake: bool,
}

/// Text templates with named placeholders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Templates {
    /// Sprint goal template; `{features}` receives the top title keywords.
    pub sprint_goal: String,
    /// Card description template; `{deliverable}`, `{sprint}` and `{points}`
    /// are substituted per task.
    pub card_description: String,
    /// Checklist copied by value onto every generated card.
    #[serde(default)]
    pub checklist: Vec<String>,
}

impl Config {
    /// Load and validate the configuration document at `path`.
    pub fn load(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Err(PlanError::config(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        let text = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&text).map_err(|e| {
            PlanError::config(format!("invalid config {}: {e}", path.display()))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check field-level invariants that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.project.name.trim().is_empty() {
            return Err(PlanError::config("project.name must not be empty"));
        }
        if self.sprints.capacity_points == 0 {
            return Err(PlanError::config("sprints.capacity_points must be at least 1"));
        }
        if self.sprints.duration_days == 0 {
            return Err(PlanError::config("sprints.duration_days must be at least 1"));
        }
        if self.sprints.prefix.trim().is_empty() {
            return Err(PlanError::config("sprints.prefix must not be empty"));
        }
        if self.scoring.hours_per_point == 0 {
            return Err(PlanError::config("scoring.hours_per_point must be at least 1"));
        }
        if self.scoring.scale.is_empty() {
            return Err(PlanError::config("scoring.scale must not be empty"));
        }
        if self.scoring.scale.iter().any(|&p| p == 0) {
            return Err(PlanError::config("scoring.scale values must be at least 1"));
        }
        if !self.scoring.scale.windows(2).all(|w| w[0] < w[1]) {
            return Err(PlanError::config("scoring.scale must be strictly ascending"));
        }
        if self.kanban.columns.is_empty() {
            return Err(PlanError::config("kanban.columns must not be empty"));
        }
        match self.kanban.columns.iter().filter(|c| c.intake).count() {
            0 => {
                return Err(PlanError::config(
                    "kanban.columns must flag exactly one column as intake",
                ))
            }
            1 => {}
            _ => {
                return Err(PlanError::config(
                    "kanban.columns flags more than one intake column",
                ))
            }
        }
        Ok(())
    }

    /// Resolve the schedule document against the candidate locations.
    ///
    /// Relative paths are tried against the config file's directory first,
    /// then against the working directory. The first existing candidate wins.
    pub fn resolve_schedule(&self, config_path: &Path) -> Result<PathBuf> {
        let base = config_path.parent().unwrap_or_else(|| Path::new("."));
        let mut candidates = Vec::new();
        for raw in std::iter::once(&self.schedule.file).chain(self.schedule.fallbacks.iter()) {
            if raw.is_absolute() {
                candidates.push(raw.clone());
            } else {
                candidates.push(base.join(raw));
                candidates.push(raw.clone());
            }
        }
        for candidate in &candidates {
            if candidate.exists() {
                return Ok(candidate.clone());
            }
        }
        Err(PlanError::ScheduleNotFound(
            candidates
                .iter()
                .map(|c| c.display().to_string())
                .collect::<Vec<_>>()
                .join(", "),
        ))
    }

    /// A starter configuration for `sprintplan init`.
    pub fn starter() -> Config {
        Config {
            project: ProjectConfig {
                name: "My Project".into(),
                description: Some("Describe the project here".into()),
            },
            schedule: ScheduleConfig {
                file: "SCHEDULE.md".into(),
                fallbacks: vec!["docs/SCHEDULE.md".into()],
            },
            sprints: SprintConfig {
                capacity_points: 20,
                duration_days: 14,
                start_date: Local::now().date_naive(),
                prefix: "Sprint".into(),
            },
            scoring: Scoring {
                hours_per_point: 4,
                scale: vec![1, 2, 3, 5, 8, 13],
                adjustments: Adjustments {
                    high: 1,
                    medium: 0,
                    low: -1,
                },
            },
            kanban: KanbanConfig {
                columns: vec![
                    ColumnTemplate {
                        name: "Backlog".into(),
                        color: "#e0e0e0".into(),
                        wip_limit: None,
                        intake: true,
                    },
                    ColumnTemplate {
                        name: "To Do".into(),
                        color: "#f9d71c".into(),
                        wip_limit: Some(5),
                        intake: false,
                    },
                    ColumnTemplate {
                        name: "In Progress".into(),
                        color: "#f97316".into(),
                        wip_limit: Some(3),
                        intake: false,
                    },
                    ColumnTemplate {
                        name: "Review".into(),
                        color: "#8b5cf6".into(),
                        wip_limit: Some(3),
                        intake: false,
                    },
                    ColumnTemplate {
                        name: "Done".into(),
                        color: "#22c55e".into(),
                        wip_limit: None,
                        intake: false,
                    },
                ],
            },
            templates: Templates {
                sprint_goal: "Deliver {features}".into(),
                card_description: "Deliverable: {deliverable}\nSprint: {sprint}\nPoints: {points}"
                    .into(),
                checklist: vec![
                    "Code implemented".into(),
                    "Tests written".into(),
                    "Code reviewed".into(),
                    "Deployed to staging".into(),
                ],
            },
        }
    }
}
