//! Plan publishers for the supported tracker backends.
//!
//! The pipeline produces a backend-agnostic `Plan`; each publisher translates
//! it into its backend's create calls. Requests are sequential blocking HTTP,
//! one at a time, with no retry or backoff. Credentials come from the
//! environment; when they are missing the publisher runs in demo mode,
//! printing what would be created instead of calling the network.

use std::env;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde_json::{json, Value};

use crate::board::Board;
use crate::error::{PlanError, Result};
use crate::fields::{format_priority, Backend};
use crate::plan::Plan;
use crate::sprint::Sprint;
use crate::task::Task;

/// Outcome of a publish run.
#[derive(Debug, Clone)]
pub struct PublishSummary {
    pub backend: &'static str,
    /// True when credentials were missing and nothing was sent.
    pub demo: bool,
    /// Objects created on the backend.
    pub created: u32,
    /// Objects skipped because they already existed.
    pub skipped: u32,
}

/// A tracker backend that can receive a plan.
pub trait Publisher {
    fn name(&self) -> &'static str;
    fn publish(&self, plan: &Plan) -> Result<PublishSummary>;
}

/// Select the publisher for a backend choice.
pub fn publisher_for(backend: Backend) -> Box<dyn Publisher> {
    match backend {
        Backend::Github => Box::new(GitHubPublisher::from_env()),
        Backend::Gitproject => Box::new(GitProjectPublisher::from_env()),
    }
}

fn http_err(e: reqwest::Error) -> PlanError {
    PlanError::Http(e.to_string())
}

// ---------------------------------------------------------------------------
// GitHub: one milestone per sprint, one issue per task.
// ---------------------------------------------------------------------------

struct GitHubCreds {
    token: String,
    owner: String,
    repo: String,
}

impl GitHubCreds {
    fn from_env() -> Option<GitHubCreds> {
        Some(GitHubCreds {
            token: env::var("GITHUB_TOKEN").ok()?,
            owner: env::var("GITHUB_OWNER").ok()?,
            repo: env::var("GITHUB_REPO").ok()?,
        })
    }
}

/// Publishes sprints as milestones and tasks as issues via the REST v3 API.
pub struct GitHubPublisher {
    creds: Option<GitHubCreds>,
    client: Client,
}

impl GitHubPublisher {
    pub fn from_env() -> GitHubPublisher {
        GitHubPublisher {
            creds: GitHubCreds::from_env(),
            client: Client::new(),
        }
    }

    fn post(&self, creds: &GitHubCreds, url: &str, payload: &Value) -> Result<reqwest::blocking::Response> {
        self.client
            .post(url)
            .header("Authorization", format!("token {}", creds.token))
            .header("Accept", "application/vnd.github.v3+json")
            .header("User-Agent", "sprintplan")
            .json(payload)
            .send()
            .map_err(http_err)
    }

    fn print_demo(&self, plan: &Plan) {
        println!("Demo mode: GITHUB_TOKEN / GITHUB_OWNER / GITHUB_REPO not all set.");
        println!("Milestones that would be created:");
        for sprint in &plan.sprints {
            println!(
                "  {}: {} points, {} tasks, {} to {}",
                sprint.name,
                sprint.total_points,
                sprint.tasks.len(),
                sprint.start_date,
                sprint.end_date
            );
            println!("    goal: {}", sprint.goal);
        }
        println!("Issues that would be created:");
        for task in plan.sprints.iter().flat_map(|s| s.tasks.iter()) {
            println!(
                "  {}: {} ({} pts, {})",
                task.id,
                task.title,
                task.points,
                format_priority(task.priority)
            );
        }
    }
}

/// Milestone payload for a sprint.
pub fn milestone_payload(sprint: &Sprint) -> Value {
    json!({
        "title": sprint.name,
        "description": format!(
            "{}\n\n{} points | {} tasks",
            sprint.goal, sprint.total_points, sprint.tasks.len()
        ),
        "due_on": format!("{}T23:59:59Z", sprint.end_date),
        "state": "open",
    })
}

/// Issue payload for a task, linked to its sprint's milestone.
pub fn issue_payload(task: &Task, milestone_number: Option<&Value>) -> Value {
    let mut payload = json!({
        "title": format!("{}: {}", task.id, task.title),
        "body": format!(
            "Deliverable: {}\n\nPoints: {} | Priority: {}",
            task.deliverable, task.points, format_priority(task.priority)
        ),
        "labels": [
            format!("priority:{}", task.priority.as_str()),
            format!("points:{}", task.points),
        ],
    });
    if let Some(number) = milestone_number {
        payload["milestone"] = number.clone();
    }
    payload
}

impl Publisher for GitHubPublisher {
    fn name(&self) -> &'static str {
        "github"
    }

    fn publish(&self, plan: &Plan) -> Result<PublishSummary> {
        let Some(creds) = self.creds.as_ref() else {
            self.print_demo(plan);
            return Ok(PublishSummary {
                backend: self.name(),
                demo: true,
                created: 0,
                skipped: 0,
            });
        };

        let mut created = 0;
        let mut skipped = 0;
        let base = format!(
            "https://api.github.com/repos/{}/{}",
            creds.owner, creds.repo
        );

        for sprint in &plan.sprints {
            let resp = self.post(creds, &format!("{base}/milestones"), &milestone_payload(sprint))?;
            // 422 means the milestone already exists; keep going.
            let milestone_number = if resp.status() == StatusCode::UNPROCESSABLE_ENTITY {
                skipped += 1;
                None
            } else {
                let body: Value = resp.error_for_status().map_err(http_err)?.json().map_err(http_err)?;
                created += 1;
                println!("Milestone created: {}", sprint.name);
                body.get("number").cloned()
            };

            for task in &sprint.tasks {
                let resp = self.post(
                    creds,
                    &format!("{base}/issues"),
                    &issue_payload(task, milestone_number.as_ref()),
                )?;
                resp.error_for_status().map_err(http_err)?;
                created += 1;
            }
        }

        Ok(PublishSummary {
            backend: self.name(),
            demo: false,
            created,
            skipped,
        })
    }
}

// ---------------------------------------------------------------------------
// GitProject: create project, then one sprint and one board per entry.
// ---------------------------------------------------------------------------

struct GitProjectCreds {
    token: String,
    base_url: String,
    workspace_id: Option<String>,
}

impl GitProjectCreds {
    fn from_env() -> Option<GitProjectCreds> {
        Some(GitProjectCreds {
            token: env::var("GITPROJECT_TOKEN").ok()?,
            base_url: env::var("GITPROJECT_URL").ok()?,
            workspace_id: env::var("GITPROJECT_WORKSPACE_ID").ok(),
        })
    }
}

/// Publishes the plan to a generic GitProject-style tracker.
pub struct GitProjectPublisher {
    creds: Option<GitProjectCreds>,
    client: Client,
}

impl GitProjectPublisher {
    pub fn from_env() -> GitProjectPublisher {
        GitProjectPublisher {
            creds: GitProjectCreds::from_env(),
            client: Client::new(),
        }
    }

    fn post(&self, creds: &GitProjectCreds, path: &str, payload: &Value) -> Result<Value> {
        let resp = self
            .client
            .post(format!("{}{}", creds.base_url.trim_end_matches('/'), path))
            .header("Authorization", format!("Bearer {}", creds.token))
            .json(payload)
            .send()
            .map_err(http_err)?
            .error_for_status()
            .map_err(http_err)?;
        resp.json().map_err(http_err)
    }

    fn print_demo(&self, plan: &Plan) {
        println!("Demo mode: GITPROJECT_TOKEN / GITPROJECT_URL not set.");
        println!("Project that would be created: {}", plan.project.name);
        for sprint in &plan.sprints {
            println!(
                "  {}: {} points, {} to {}",
                sprint.name, sprint.total_points, sprint.start_date, sprint.end_date
            );
        }
        for board in &plan.boards {
            let cards: usize = board.columns.iter().map(|c| c.cards.len()).sum();
            println!("  {}: {} columns, {cards} cards", board.name, board.columns.len());
        }
    }
}

/// Project creation payload.
pub fn project_payload(plan: &Plan, workspace_id: Option<&str>) -> Value {
    let sprint_duration = plan
        .sprints
        .first()
        .map(|s| (s.end_date - s.start_date).num_days() + 1);
    json!({
        "name": plan.project.name,
        "description": plan.project.description,
        "workspace_id": workspace_id,
        "settings": { "sprint_duration": sprint_duration },
    })
}

/// Sprint creation payload.
pub fn sprint_payload(sprint: &Sprint, project_id: &Value) -> Value {
    json!({
        "project_id": project_id,
        "name": sprint.name,
        "goal": sprint.goal,
        "start_date": sprint.start_date,
        "end_date": sprint.end_date,
        "planned_points": sprint.total_points,
    })
}

/// Kanban board creation payload, with cards flattened per column.
pub fn board_payload(board: &Board, project_id: &Value) -> Value {
    json!({
        "project_id": project_id,
        "name": board.name,
        "columns": board.columns.iter().map(|c| json!({
            "name": c.name,
            "color": c.color,
            "wip_limit": c.wip_limit,
        })).collect::<Vec<_>>(),
        "cards": board.columns.iter().flat_map(|c| {
            c.cards.iter().map(move |card| json!({
                "title": card.title,
                "description": card.description,
                "story_points": card.points,
                "priority": card.priority.as_str(),
                "column_name": c.name,
            }))
        }).collect::<Vec<_>>(),
    })
}

impl Publisher for GitProjectPublisher {
    fn name(&self) -> &'static str {
        "gitproject"
    }

    fn publish(&self, plan: &Plan) -> Result<PublishSummary> {
        let Some(creds) = self.creds.as_ref() else {
            self.print_demo(plan);
            return Ok(PublishSummary {
                backend: self.name(),
                demo: true,
                created: 0,
                skipped: 0,
            });
        };

        let mut created = 0;
        let project = self.post(
            creds,
            "/projects",
            &project_payload(plan, creds.workspace_id.as_deref()),
        )?;
        let project_id = project.get("id").cloned().unwrap_or(Value::Null);
        created += 1;
        println!("Project created: {}", plan.project.name);

        for sprint in &plan.sprints {
            self.post(creds, "/sprints", &sprint_payload(sprint, &project_id))?;
            created += 1;
            println!("Sprint created: {}", sprint.name);
        }
        for board in &plan.boards {
            self.post(creds, "/kanban-boards", &board_payload(board, &project_id))?;
            created += 1;
            println!("Board created: {}", board.name);
        }

        Ok(PublishSummary {
            backend: self.name(),
            demo: false,
            created,
            skipped: 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::plan::build_plan;

    fn sample_plan() -> Plan {
        let config = Config::starter();
        let text = "\
| 1 | Setup ambiente de desenvolvimento | 4h | Ambiente configurado | Alta |
| 2 | Escrever testes unitários | 8h | Suite de testes | Média |
";
        build_plan(&config, text).unwrap()
    }

    #[test]
    fn test_milestone_payload_shape() {
        let plan = sample_plan();
        let payload = milestone_payload(&plan.sprints[0]);
        assert_eq!(payload["title"], plan.sprints[0].name);
        assert_eq!(payload["state"], "open");
        assert!(payload["due_on"].as_str().unwrap().ends_with("T23:59:59Z"));
        assert!(payload["description"].as_str().unwrap().contains("points"));
    }

    #[test]
    fn test_issue_payload_shape() {
        let plan = sample_plan();
        let task = &plan.sprints[0].tasks[0];
        let number = json!(7);
        let payload = issue_payload(task, Some(&number));
        assert!(payload["title"].as_str().unwrap().starts_with("T001: "));
        assert_eq!(payload["milestone"], json!(7));
        let labels = payload["labels"].as_array().unwrap();
        assert!(labels.iter().any(|l| l == "priority:high"));

        let without = issue_payload(task, None);
        assert!(without.get("milestone").is_none());
    }

    #[test]
    fn test_board_payload_flattens_cards() {
        let plan = sample_plan();
        let payload = board_payload(&plan.boards[0], &json!("p-1"));
        let columns = payload["columns"].as_array().unwrap();
        assert_eq!(columns.len(), plan.boards[0].columns.len());
        let cards = payload["cards"].as_array().unwrap();
        let total: usize = plan.boards[0].columns.iter().map(|c| c.cards.len()).sum();
        assert_eq!(cards.len(), total);
        assert_eq!(cards[0]["column_name"], "Backlog");
        assert_eq!(payload["project_id"], json!("p-1"));
    }

    #[test]
    fn test_sprint_payload_shape() {
        let plan = sample_plan();
        let payload = sprint_payload(&plan.sprints[0], &json!(3));
        assert_eq!(payload["planned_points"], json!(plan.sprints[0].total_points));
        assert_eq!(payload["goal"], json!(plan.sprints[0].goal));
    }

    #[test]
    fn test_project_payload_derives_duration() {
        let plan = sample_plan();
        let payload = project_payload(&plan, Some("ws-1"));
        assert_eq!(payload["settings"]["sprint_duration"], json!(14));
        assert_eq!(payload["workspace_id"], json!("ws-1"));
    }

    #[test]
    fn test_publisher_selection() {
        assert_eq!(publisher_for(Backend::Github).name(), "github");
        assert_eq!(publisher_for(Backend::Gitproject).name(), "gitproject");
    }

    #[test]
    fn test_missing_creds_runs_demo() {
        // No network: a publisher constructed without credentials reports a
        // demo run and creates nothing.
        let publisher = GitHubPublisher {
            creds: None,
            client: Client::new(),
        };
        let summary = publisher.publish(&sample_plan()).unwrap();
        assert!(summary.demo);
        assert_eq!(summary.created, 0);

        let publisher = GitProjectPublisher {
            creds: None,
            client: Client::new(),
        };
        let summary = publisher.publish(&sample_plan()).unwrap();
        assert!(summary.demo);
    }
}
