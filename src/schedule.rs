//! Schedule document parsing.
//!
//! The schedule is free-form markdown containing one or more pipe tables with
//! the fixed five-column shape `| Day | Activity | Duration | Deliverable |
//! Priority |`. Parsing is lenient: rows that do not match the shape, header
//! rows, and separator rows are skipped without error. An empty result is
//! valid and simply yields zero sprints downstream.

use crate::config::Scoring;
use crate::fields::classify_priority;
use crate::points::estimate_points;
use crate::task::Task;

/// Hours assumed when the duration cell is missing or unparsable.
const DEFAULT_DURATION_HOURS: u32 = 4;

/// Minimum activity length (in characters, after trimming) for a row to be
/// accepted.
const MIN_ACTIVITY_CHARS: usize = 4;

/// Extract tasks from the schedule text, in document order.
///
/// Ids are assigned sequentially (`T001`, `T002`, ...) over accepted rows,
/// independent of the day column.
pub fn parse_schedule(content: &str, scoring: &Scoring) -> Vec<Task> {
    let mut tasks = Vec::new();
    for line in content.lines() {
        let line = line.trim();
        if !line.starts_with('|') {
            continue;
        }
        let cells: Vec<&str> = line
            .trim_matches('|')
            .split('|')
            .map(str::trim)
            .collect();
        if cells.len() != 5 {
            continue;
        }
        // The day cell must be a plain integer; this also rejects the header
        // row ("Dia"/"Day") and dash separator rows.
        let day: u32 = match cells[0].parse() {
            Ok(d) => d,
            Err(_) => continue,
        };
        let activity = cells[1];
        if !is_activity(activity) {
            continue;
        }
        let duration_hours = parse_duration(cells[2]);
        let priority = classify_priority(cells[4]);
        let points = estimate_points(duration_hours, priority, scoring);
        tasks.push(Task {
            id: Task::make_id(tasks.len() + 1),
            title: activity.to_string(),
            duration_hours,
            deliverable: cells[3].to_string(),
            priority,
            points,
            day_index: day,
            sprint_number: None,
        });
    }
    tasks
}

/// Accept an activity cell: non-trivial text that is not a header label or a
/// dash separator.
fn is_activity(cell: &str) -> bool {
    if cell.chars().count() < MIN_ACTIVITY_CHARS {
        return false;
    }
    if cell.contains("---") {
        return false;
    }
    let lower = cell.to_lowercase();
    lower != "atividade" && lower != "activity"
}

/// Parse the duration cell: leading integer with an optional trailing unit
/// letter ("8h" -> 8). Unparsable cells fall back to the default.
fn parse_duration(cell: &str) -> u32 {
    let digits: String = cell
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(DEFAULT_DURATION_HOURS)
}
