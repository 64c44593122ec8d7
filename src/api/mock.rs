use chrono::Utc;
use futures::future::BoxFuture;
use once_cell::sync::Lazy;
use serde_json::{Value, json};

use super::{ApiError, Backend};

/// Deterministic in-process responder used when no live backend is
/// configured. Lets every view run against the same async contract during
/// local development.
///
/// Responses are synthesized from the supplied arguments; nothing is
/// persisted between calls. An operation name with no handler resolves
/// (never rejects) with `success: false`.
#[derive(Debug, Default)]
pub struct MockBackend;

/// Fresh server-style id derived from the current time.
fn fresh_id() -> String {
    Utc::now().timestamp_millis().to_string()
}

static SAMPLE_PROJECTS: Lazy<Value> = Lazy::new(|| {
    json!([
        { "id": "1", "name": "Website Redesign" },
        { "id": "2", "name": "Mobile App Development" },
        { "id": "3", "name": "Marketing Campaign" },
    ])
});

static SAMPLE_PROJECT_TASKS: Lazy<Value> = Lazy::new(|| {
    json!([
        {
            "project_id": "1",
            "project_name": "Website Redesign",
            "milestone_id": "2",
            "milestone_name": "Phase 2",
            "task_id": "1",
            "task_name": "Design homepage mockup",
            "description": "Create wireframes and visual design",
        },
        {
            "project_id": "1",
            "project_name": "Website Redesign",
            "milestone_id": "2",
            "milestone_name": "Phase 2",
            "task_id": "2",
            "task_name": "Implement responsive layout",
            "description": "Make design mobile-friendly",
        },
        {
            "project_id": "1",
            "project_name": "Website Redesign",
            "milestone_id": "1",
            "milestone_name": "Phase 1",
            "task_id": "3",
            "task_name": "Research competitors",
            "description": "Analyze 5 competitor websites",
        },
        {
            "project_id": "2",
            "project_name": "Mobile App Development",
            "milestone_id": "3",
            "milestone_name": "MVP",
            "task_id": "4",
            "task_name": "Setup development environment",
            "description": "Install tools and dependencies",
        },
    ])
});

fn sample_inbox_tasks() -> Value {
    let now = Utc::now().to_rfc3339();
    json!([
        { "id": "1", "name": "Review project proposal", "done": false, "created_on": now },
        { "id": "2", "name": "Update documentation", "done": false, "created_on": now },
        { "id": "3", "name": "Schedule team meeting", "done": false, "created_on": now },
    ])
}

impl MockBackend {
    pub fn new() -> Self {
        Self
    }

    fn respond(&self, name: &str, args: &[Value]) -> Value {
        let arg = |i: usize| args.get(i).cloned().unwrap_or(Value::Null);

        match name {
            "getInboxTasks" => json!({ "success": true, "data": sample_inbox_tasks() }),
            "createInboxTask" => json!({
                "success": true,
                "data": {
                    "id": fresh_id(),
                    "name": arg(0),
                    "done": false,
                    "created_on": Utc::now().to_rfc3339(),
                },
            }),
            "updateInboxTask" => json!({
                "success": true,
                "data": { "id": arg(0), "done": arg(1) },
            }),
            "deleteInboxTask" => json!({
                "success": true,
                "data": { "id": arg(0) },
            }),
            "setSomedayInboxTask" => json!({
                "success": true,
                "data": { "id": arg(0) },
            }),
            "getProjects" => json!({ "success": true, "data": SAMPLE_PROJECTS.clone() }),
            "createProject" => json!({
                "success": true,
                "data": { "id": fresh_id(), "name": arg(0) },
            }),
            "getProjectTasks" => {
                json!({ "success": true, "data": SAMPLE_PROJECT_TASKS.clone() })
            }
            "updateProjectName" | "updateMilestoneName" | "updateTaskName" => json!({
                "success": true,
                "data": { "id": arg(0), "name": arg(1) },
            }),
            "updateTaskDescription" => json!({
                "success": true,
                "data": { "id": arg(0), "description": arg(1) },
            }),
            "updateTaskDone" => json!({
                "success": true,
                "data": { "id": arg(0), "done": arg(1) },
            }),
            _ => json!({ "success": false, "error": "Unknown function" }),
        }
    }
}

impl Backend for MockBackend {
    fn call(&self, name: &str, args: Vec<Value>) -> BoxFuture<'_, Result<Value, ApiError>> {
        log::debug!("[mock] {}({})", name, Value::Array(args.clone()));
        let resp = self.respond(name, &args);
        Box::pin(futures::future::ready(Ok(resp)))
    }
}
