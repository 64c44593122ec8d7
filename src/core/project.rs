use serde::{Deserialize, Serialize};

/// A multi-step outcome. Projects are created and renamed from the UI but
/// never deleted there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
}

/// One denormalized row of the project/milestone/task listing.
///
/// The backend returns these pre-sorted and contiguously grouped by
/// `project_id`, then `milestone_id`; the client relies on that contiguity
/// and never re-sorts. Several rows can share a `project_id` or
/// `milestone_id`, which is what lets a single rename patch all of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectTask {
    pub project_id: String,
    pub project_name: String,
    pub milestone_id: Option<String>,
    pub milestone_name: Option<String>,
    pub task_id: String,
    pub task_name: String,
    pub description: Option<String>,
    /// Older backend payloads omit this field.
    #[serde(default)]
    pub done: bool,
}

/// Tasks of one milestone (or the milestone-less remainder of a project).
#[derive(Debug, Clone, PartialEq)]
pub struct MilestoneGroup {
    pub id: Option<String>,
    pub name: Option<String>,
    pub tasks: Vec<ProjectTask>,
}

/// One project's slice of the flat listing, nested for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectGroup {
    pub id: String,
    pub name: String,
    pub milestones: Vec<MilestoneGroup>,
}

/// Folds the flat, contiguously grouped rows into
/// `Project -> Milestone? -> Task` nesting.
///
/// Pure pass over the input order: a change in `project_id` opens a new
/// project group, a change in `milestone_id` within a project opens a new
/// milestone group. Rows are cloned into the groups unmodified, so display
/// order is exactly the backend's order.
pub fn group_tasks(rows: &[ProjectTask]) -> Vec<ProjectGroup> {
    let mut projects: Vec<ProjectGroup> = Vec::new();

    for row in rows {
        let same_project = projects
            .last()
            .is_some_and(|p| p.id == row.project_id);
        if !same_project {
            projects.push(ProjectGroup {
                id: row.project_id.clone(),
                name: row.project_name.clone(),
                milestones: Vec::new(),
            });
        }

        let project = projects.last_mut().expect("pushed above");
        let same_milestone = project
            .milestones
            .last()
            .is_some_and(|m| m.id == row.milestone_id);
        if !same_milestone {
            project.milestones.push(MilestoneGroup {
                id: row.milestone_id.clone(),
                name: row.milestone_name.clone(),
                tasks: Vec::new(),
            });
        }

        let milestone = project.milestones.last_mut().expect("pushed above");
        milestone.tasks.push(row.clone());
    }

    projects
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(project: &str, milestone: Option<&str>, task: &str) -> ProjectTask {
        ProjectTask {
            project_id: project.to_string(),
            project_name: format!("Project {}", project),
            milestone_id: milestone.map(str::to_string),
            milestone_name: milestone.map(|m| format!("Milestone {}", m)),
            task_id: task.to_string(),
            task_name: format!("Task {}", task),
            description: None,
            done: false,
        }
    }

    #[test]
    fn groups_contiguous_rows() {
        let rows = vec![
            row("1", Some("2"), "1"),
            row("1", Some("2"), "2"),
            row("1", Some("1"), "3"),
            row("2", Some("3"), "4"),
        ];

        let grouped = group_tasks(&rows);
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].id, "1");
        assert_eq!(grouped[0].milestones.len(), 2);
        assert_eq!(grouped[0].milestones[0].tasks.len(), 2);
        assert_eq!(grouped[0].milestones[1].tasks.len(), 1);
        assert_eq!(grouped[1].milestones[0].tasks[0].task_id, "4");
    }

    #[test]
    fn preserves_backend_order() {
        let rows = vec![
            row("1", Some("2"), "10"),
            row("1", Some("2"), "5"),
        ];

        let grouped = group_tasks(&rows);
        let tasks: Vec<&str> = grouped[0].milestones[0]
            .tasks
            .iter()
            .map(|t| t.task_id.as_str())
            .collect();
        assert_eq!(tasks, vec!["10", "5"]);
    }

    #[test]
    fn milestone_less_rows_form_their_own_group() {
        let rows = vec![row("1", None, "1"), row("1", Some("2"), "2")];

        let grouped = group_tasks(&rows);
        assert_eq!(grouped[0].milestones.len(), 2);
        assert_eq!(grouped[0].milestones[0].id, None);
        assert_eq!(grouped[0].milestones[1].id.as_deref(), Some("2"));
    }

    #[test]
    fn empty_input_yields_no_groups() {
        assert!(group_tasks(&[]).is_empty());
    }

    #[test]
    fn non_adjacent_same_project_stays_split() {
        // Contiguity is the backend's contract; if it is violated we do not
        // merge across the gap.
        let rows = vec![
            row("1", Some("1"), "1"),
            row("2", Some("2"), "2"),
            row("1", Some("1"), "3"),
        ];
        assert_eq!(group_tasks(&rows).len(), 3);
    }
}
