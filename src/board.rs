//! Kanban board materialization.
//!
//! One board per sprint: the configured column template is cloned (order,
//! name, color, WIP limit preserved) and one card per task is appended to the
//! intake column, in task order. Cards hold a read-only snapshot of the task
//! fields needed for display, plus a checklist copied by value so cards never
//! share checklist state.

use serde::{Deserialize, Serialize};

use crate::config::{KanbanConfig, Templates};
use crate::error::{PlanError, Result};
use crate::fields::Priority;
use crate::sprint::Sprint;
use crate::task::Task;

/// Kanban board generated for one sprint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    /// `KB_01`, `KB_02`, ...
    pub id: String,
    pub name: String,
    pub sprint_number: u32,
    pub columns: Vec<Column>,
}

/// One column of a board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Column {
    /// Derived from the column name, e.g. `COL_IN_PROGRESS`.
    pub id: String,
    pub name: String,
    pub color: String,
    pub wip_limit: Option<u32>,
    pub intake: bool,
    pub cards: Vec<Card>,
}

/// A card wrapping one task's display snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    /// `CARD_<task id>`.
    pub id: String,
    pub title: String,
    pub description: String,
    pub points: u32,
    pub priority: Priority,
    pub checklist: Vec<String>,
}

/// Build the board for a sprint.
///
/// The intake column is the template column carrying the `intake` flag;
/// configuration validation guarantees exactly one, so a missing flag here is
/// reported as a configuration error rather than silently producing an empty
/// board.
pub fn build_board(sprint: &Sprint, kanban: &KanbanConfig, templates: &Templates) -> Result<Board> {
    let mut columns: Vec<Column> = kanban
        .columns
        .iter()
        .map(|template| Column {
            id: column_id(&template.name),
            name: template.name.clone(),
            color: template.color.clone(),
            wip_limit: template.wip_limit,
            intake: template.intake,
            cards: Vec::new(),
        })
        .collect();

    let intake = kanban
        .intake_index()
        .ok_or_else(|| PlanError::config("kanban.columns has no intake column"))?;
    for task in &sprint.tasks {
        let card = build_card(task, &sprint.name, templates);
        columns[intake].cards.push(card);
    }

    Ok(Board {
        id: format!("KB_{:02}", sprint.number),
        name: format!("{} - Kanban", sprint.name),
        sprint_number: sprint.number,
        columns,
    })
}

/// Derive a stable column id from its display name.
fn column_id(name: &str) -> String {
    let upper = name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_uppercase();
    format!("COL_{upper}")
}

fn build_card(task: &Task, sprint_name: &str, templates: &Templates) -> Card {
    let description = templates
        .card_description
        .replace("{deliverable}", &task.deliverable)
        .replace("{sprint}", sprint_name)
        .replace("{points}", &task.points.to_string());
    Card {
        id: format!("CARD_{}", task.id),
        title: task.title.clone(),
        description,
        points: task.points,
        priority: task.priority,
        checklist: templates.checklist.clone(),
    }
}
