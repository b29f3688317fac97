//! Sprint allocation.
//!
//! Greedy, priority-first bin packing: tasks are stably sorted by descending
//! priority rank (ties keep parse order) and walked once, closing the current
//! sprint whenever the next task would push it over capacity. A task whose
//! own points exceed capacity is still placed, alone, in its own sprint.
//!
//! Date windows use the slot-index convention: sprint N starts at
//! `project_start + (N-1) * duration_days` and ends `duration_days - 1` days
//! later, so consecutive windows are contiguous and never overlap.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::config::{SprintConfig, Templates};
use crate::task::Task;

/// A capacity-bounded, time-boxed bucket of tasks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sprint {
    /// 1-based, sequential, no gaps.
    pub number: u32,
    pub name: String,
    pub goal: String,
    /// Insertion order is allocation order, not document order.
    pub tasks: Vec<Task>,
    pub total_points: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Bucket tasks into sprints. Consumes the tasks; each ends up owned by
/// exactly one sprint, with `sprint_number` set.
pub fn allocate_sprints(
    mut tasks: Vec<Task>,
    config: &SprintConfig,
    templates: &Templates,
) -> Vec<Sprint> {
    // Stable sort: ties preserve original parse order.
    tasks.sort_by(|a, b| b.priority.rank().cmp(&a.priority.rank()));

    let mut sprints = Vec::new();
    let mut current: Vec<Task> = Vec::new();
    let mut current_points = 0u32;

    for task in tasks {
        if current_points + task.points > config.capacity_points && !current.is_empty() {
            let number = sprints.len() as u32 + 1;
            sprints.push(close_sprint(number, current, current_points, config, templates));
            current = Vec::new();
            current_points = 0;
        }
        current_points += task.points;
        current.push(task);
    }
    if !current.is_empty() {
        let number = sprints.len() as u32 + 1;
        sprints.push(close_sprint(number, current, current_points, config, templates));
    }
    sprints
}

/// Materialize one sprint from the accumulated tasks.
fn close_sprint(
    number: u32,
    mut tasks: Vec<Task>,
    total_points: u32,
    config: &SprintConfig,
    templates: &Templates,
) -> Sprint {
    for task in tasks.iter_mut() {
        task.sprint_number = Some(number);
    }
    let (start_date, end_date) = sprint_window(config, number);
    let name = format!("{} {}", config.prefix, number);
    let goal = sprint_goal(&templates.sprint_goal, &tasks);
    Sprint {
        number,
        name,
        goal,
        tasks,
        total_points,
        start_date,
        end_date,
    }
}

/// Date window for sprint `number` (slot-index convention).
pub fn sprint_window(config: &SprintConfig, number: u32) -> (NaiveDate, NaiveDate) {
    let offset = (number as i64 - 1) * config.duration_days as i64;
    let start = config.start_date + Duration::days(offset);
    let end = start + Duration::days(config.duration_days as i64 - 1);
    (start, end)
}

/// Generate a goal statement from the sprint's task titles.
///
/// Words longer than 4 characters are counted across the lowercased titles;
/// the top 3 by frequency (ties by first appearance) are joined and
/// substituted for `{features}` in the template.
pub fn sprint_goal(template: &str, tasks: &[Task]) -> String {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for title in tasks.iter().map(|t| t.title.to_lowercase()) {
        for word in title.split_whitespace() {
            if word.chars().count() <= 4 {
                continue;
            }
            match counts.iter_mut().find(|(w, _)| w.as_str() == word) {
                Some(entry) => entry.1 += 1,
                None => counts.push((word.to_string(), 1)),
            }
        }
    }
    // Stable sort keeps first-appearance order among equal counts.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    let features = counts
        .iter()
        .take(3)
        .map(|(w, _)| w.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    template.replace("{features}", &features)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::Priority;

    fn sprint_config(capacity: u32) -> SprintConfig {
        SprintConfig {
            capacity_points: capacity,
            duration_days: 14,
            start_date: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
            prefix: "Sprint".into(),
        }
    }

    fn templates() -> Templates {
        Templates {
            sprint_goal: "Deliver {features}".into(),
            card_description: "{deliverable} / {sprint} / {points}".into(),
            checklist: vec![],
        }
    }

    fn task(id: &str, title: &str, priority: Priority, points: u32) -> Task {
        Task {
            id: id.into(),
            title: title.into(),
            duration_hours: points * 4,
            deliverable: format!("{title} done"),
            priority,
            points,
            day_index: 1,
            sprint_number: None,
        }
    }

    #[test]
    fn test_round_trip_allocation() {
        // 3pt high + 2pt medium fill capacity 5; the 1pt low opens sprint 2.
        let tasks = vec![
            task("T001", "Setup ambiente de desenvolvimento", Priority::High, 3),
            task("T002", "Escrever testes unitários", Priority::Medium, 2),
            task("T003", "Revisar documentação", Priority::Low, 1),
        ];
        let sprints = allocate_sprints(tasks, &sprint_config(5), &templates());
        assert_eq!(sprints.len(), 2);
        assert_eq!(
            sprints[0].tasks.iter().map(|t| t.id.as_str()).collect::<Vec<_>>(),
            vec!["T001", "T002"]
        );
        assert_eq!(sprints[0].total_points, 5);
        assert_eq!(
            sprints[1].tasks.iter().map(|t| t.id.as_str()).collect::<Vec<_>>(),
            vec!["T003"]
        );
        assert_eq!(sprints[1].total_points, 1);
    }

    #[test]
    fn test_capacity_respected_for_multi_task_sprints() {
        let tasks: Vec<Task> = (1..=8)
            .map(|i| task(&format!("T{i:03}"), "some activity here", Priority::Medium, 3))
            .collect();
        let sprints = allocate_sprints(tasks, &sprint_config(7), &templates());
        for sprint in &sprints {
            if sprint.tasks.len() > 1 {
                assert!(sprint.total_points <= 7);
            }
        }
    }

    #[test]
    fn test_oversized_task_gets_its_own_sprint() {
        let tasks = vec![
            task("T001", "small warmup task", Priority::High, 2),
            task("T002", "enormous migration effort", Priority::High, 13),
            task("T003", "small cleanup task", Priority::High, 2),
        ];
        let sprints = allocate_sprints(tasks, &sprint_config(5), &templates());
        assert_eq!(sprints.len(), 3);
        assert_eq!(sprints[1].tasks.len(), 1);
        assert_eq!(sprints[1].tasks[0].id, "T002");
        assert_eq!(sprints[1].total_points, 13);
    }

    #[test]
    fn test_priority_order_with_stable_ties() {
        let tasks = vec![
            task("T001", "first low priority", Priority::Low, 1),
            task("T002", "first high priority", Priority::High, 1),
            task("T003", "second low priority", Priority::Low, 1),
            task("T004", "second high priority", Priority::High, 1),
        ];
        let sprints = allocate_sprints(tasks, &sprint_config(100), &templates());
        assert_eq!(sprints.len(), 1);
        let order: Vec<&str> = sprints[0].tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(order, vec!["T002", "T004", "T001", "T003"]);
    }

    #[test]
    fn test_numbering_and_assignment() {
        let tasks: Vec<Task> = (1..=5)
            .map(|i| task(&format!("T{i:03}"), "some activity here", Priority::Medium, 5))
            .collect();
        let sprints = allocate_sprints(tasks, &sprint_config(5), &templates());
        for (i, sprint) in sprints.iter().enumerate() {
            assert_eq!(sprint.number, i as u32 + 1);
            assert_eq!(sprint.name, format!("Sprint {}", i + 1));
            for t in &sprint.tasks {
                assert_eq!(t.sprint_number, Some(sprint.number));
            }
        }
    }

    #[test]
    fn test_windows_contiguous_and_non_overlapping() {
        let config = sprint_config(5);
        for n in 1..6 {
            let (start, end) = sprint_window(&config, n);
            assert_eq!(end - start, Duration::days(13));
            let (next_start, _) = sprint_window(&config, n + 1);
            assert_eq!(next_start - end, Duration::days(1));
        }
        let (start, _) = sprint_window(&config, 1);
        assert_eq!(start, config.start_date);
    }

    #[test]
    fn test_empty_input_yields_no_sprints() {
        let sprints = allocate_sprints(Vec::new(), &sprint_config(5), &templates());
        assert!(sprints.is_empty());
    }

    #[test]
    fn test_goal_uses_frequent_significant_words() {
        let tasks = vec![
            task("T001", "Implementar cadastro de usuários", Priority::High, 2),
            task("T002", "Implementar login de usuários", Priority::High, 2),
            task("T003", "Ajustar layout", Priority::Low, 1),
        ];
        let goal = sprint_goal("Deliver {features}", &tasks);
        // "implementar" and "usuários" appear twice; short words are ignored.
        assert!(goal.starts_with("Deliver implementar, usuários"));
        assert!(!goal.contains(" de "));
    }

    #[test]
    fn test_goal_with_no_significant_words() {
        let tasks = vec![task("T001", "do it now", Priority::High, 1)];
        assert_eq!(sprint_goal("Deliver {features}", &tasks), "Deliver ");
    }
}
