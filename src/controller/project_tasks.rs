use crate::api::Api;
use crate::core::project::{ProjectGroup, ProjectTask, group_tasks};

use super::ListController;

/// Which field of the denormalized listing is being edited, and therefore
/// which correlating id locates the affected rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    Project,
    Milestone,
    Task,
    Description,
}

/// The single in-progress field edit. Exists only between `begin_edit` and
/// commit/cancel; keystrokes touch `pending` only, never the rows.
#[derive(Debug, Clone, PartialEq)]
pub struct EditTarget {
    pub kind: EditKind,
    pub id: String,
    pub pending: String,
}

/// Project detail view state: the flat task listing plus at most one open
/// edit.
///
/// Unlike the inbox, completing a task here keeps the row visible and
/// patches its `done` field; the detail view renders completed work.
pub struct ProjectTasksController {
    api: Api,
    list: ListController<ProjectTask>,
    editing: Option<EditTarget>,
}

impl ProjectTasksController {
    pub fn new(api: Api) -> Self {
        Self {
            api,
            list: ListController::new(|t: &ProjectTask| t.task_id.as_str()),
            editing: None,
        }
    }

    pub fn rows(&self) -> &[ProjectTask] {
        self.list.items()
    }

    pub fn is_loading(&self) -> bool {
        self.list.is_loading()
    }

    /// The listing folded into `Project -> Milestone? -> Task` nesting for
    /// rendering. Pure function of the rows.
    pub fn grouped(&self) -> Vec<ProjectGroup> {
        group_tasks(self.list.items())
    }

    pub fn editing(&self) -> Option<&EditTarget> {
        self.editing.as_ref()
    }

    pub async fn load(&mut self) {
        self.list.begin_load();
        let outcome = self.api.get_project_tasks().await;
        self.list.finish_load(outcome);
    }

    /// Opens an edit on one field, capturing its current value as the
    /// pending text. Only one edit can be open; starting another discards
    /// the previous one unsaved.
    pub fn begin_edit(&mut self, kind: EditKind, id: impl Into<String>, current: impl Into<String>) {
        if self.editing.is_some() {
            log::debug!("replacing open edit target");
        }
        self.editing = Some(EditTarget {
            kind,
            id: id.into(),
            pending: current.into(),
        });
    }

    /// Updates the pending value of the open edit. Rows are untouched until
    /// a successful commit.
    pub fn set_pending(&mut self, value: impl Into<String>) {
        if let Some(target) = self.editing.as_mut() {
            target.pending = value.into();
        }
    }

    /// Escape: drop the edit without calling the backend. The collection is
    /// left exactly as it was.
    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Commit gesture: issues the update matching the edit kind and, on a
    /// positive envelope, patches every row sharing the correlating id. The
    /// edit target is discarded either way; an unconfirmed commit simply
    /// leaves the rows as they were.
    pub async fn commit_edit(&mut self) {
        let Some(target) = self.editing.take() else {
            return;
        };
        let EditTarget { kind, id, pending } = target;

        let outcome = match kind {
            EditKind::Project => self.api.update_project_name(&id, &pending).await,
            EditKind::Milestone => self.api.update_milestone_name(&id, &pending).await,
            EditKind::Task => self.api.update_task_name(&id, &pending).await,
            EditKind::Description => self.api.update_task_description(&id, &pending).await,
        };

        match outcome {
            Ok(env) if env.success => match kind {
                EditKind::Project => self.list.patch_where(
                    |row| row.project_id == id,
                    |row| row.project_name = pending.clone(),
                ),
                EditKind::Milestone => self.list.patch_where(
                    |row| row.milestone_id.as_deref() == Some(id.as_str()),
                    |row| row.milestone_name = Some(pending.clone()),
                ),
                EditKind::Task => self.list.patch_where(
                    |row| row.task_id == id,
                    |row| row.task_name = pending.clone(),
                ),
                EditKind::Description => self.list.patch_where(
                    |row| row.task_id == id,
                    |row| row.description = Some(pending.clone()),
                ),
            },
            Ok(env) => log::warn!("edit of {} not confirmed: {:?}", id, env.error),
            Err(e) => log::warn!("edit of {} failed: {}", id, e),
        }
    }

    /// Flips a task's done flag in place once the backend confirms; the row
    /// stays visible.
    pub async fn set_task_done(&mut self, task_id: &str, done: bool) {
        match self.api.update_task_done(task_id, done).await {
            Ok(env) if env.success => {
                self.list
                    .patch_where(|row| row.task_id == task_id, |row| row.done = done);
            }
            Ok(env) => log::warn!("done update of {} not confirmed: {:?}", task_id, env.error),
            Err(e) => log::warn!("done update of {} failed: {}", task_id, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockBackend;
    use std::sync::Arc;

    async fn loaded() -> ProjectTasksController {
        let mut ctrl = ProjectTasksController::new(Api::new(Arc::new(MockBackend::new())));
        ctrl.load().await;
        ctrl
    }

    #[tokio::test]
    async fn load_fills_rows_in_backend_order() {
        let ctrl = loaded().await;
        let ids: Vec<&str> = ctrl.rows().iter().map(|r| r.task_id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4"]);

        let grouped = ctrl.grouped();
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].name, "Website Redesign");
        assert_eq!(grouped[0].milestones.len(), 2);
    }

    #[tokio::test]
    async fn project_rename_patches_every_row_of_that_project() {
        let mut ctrl = loaded().await;
        ctrl.begin_edit(EditKind::Project, "1", "Website Redesign");
        ctrl.set_pending("Website Relaunch");
        ctrl.commit_edit().await;

        assert!(ctrl.editing().is_none());
        for row in ctrl.rows() {
            if row.project_id == "1" {
                assert_eq!(row.project_name, "Website Relaunch");
            } else {
                assert_eq!(row.project_name, "Mobile App Development");
            }
        }
    }

    #[tokio::test]
    async fn milestone_rename_patches_only_matching_rows() {
        let mut ctrl = loaded().await;
        ctrl.begin_edit(EditKind::Milestone, "2", "Phase 2");
        ctrl.set_pending("Phase 2 (revised)");
        ctrl.commit_edit().await;

        let renamed: Vec<&str> = ctrl
            .rows()
            .iter()
            .filter(|r| r.milestone_name.as_deref() == Some("Phase 2 (revised)"))
            .map(|r| r.task_id.as_str())
            .collect();
        assert_eq!(renamed, vec!["1", "2"]);
    }

    #[tokio::test]
    async fn task_name_and_description_edits_hit_one_task() {
        let mut ctrl = loaded().await;
        ctrl.begin_edit(EditKind::Task, "3", "Research competitors");
        ctrl.set_pending("Research the market");
        ctrl.commit_edit().await;

        ctrl.begin_edit(EditKind::Description, "3", "Analyze 5 competitor websites");
        ctrl.set_pending("Analyze 10 competitor websites");
        ctrl.commit_edit().await;

        let row = ctrl.rows().iter().find(|r| r.task_id == "3").unwrap();
        assert_eq!(row.task_name, "Research the market");
        assert_eq!(row.description.as_deref(), Some("Analyze 10 competitor websites"));
        assert!(ctrl.rows().iter().filter(|r| r.task_id != "3").all(|r| {
            r.task_name != "Research the market"
        }));
    }

    #[tokio::test]
    async fn cancel_discards_dirty_edit_without_touching_rows() {
        let mut ctrl = loaded().await;
        let before = ctrl.rows().to_vec();

        ctrl.begin_edit(EditKind::Project, "1", "Website Redesign");
        ctrl.set_pending("Scribbled over");
        ctrl.cancel_edit();

        assert!(ctrl.editing().is_none());
        assert_eq!(ctrl.rows(), before.as_slice());
    }

    #[tokio::test]
    async fn beginning_a_new_edit_replaces_the_open_one() {
        let mut ctrl = loaded().await;
        ctrl.begin_edit(EditKind::Task, "1", "Design homepage mockup");
        ctrl.set_pending("half-typed");
        ctrl.begin_edit(EditKind::Task, "2", "Implement responsive layout");

        let editing = ctrl.editing().unwrap();
        assert_eq!(editing.id, "2");
        assert_eq!(editing.pending, "Implement responsive layout");
    }

    #[tokio::test]
    async fn done_toggle_patches_in_place_and_keeps_the_row() {
        let mut ctrl = loaded().await;
        ctrl.set_task_done("4", true).await;

        let row = ctrl.rows().iter().find(|r| r.task_id == "4").unwrap();
        assert!(row.done);
        assert_eq!(ctrl.rows().len(), 4);
    }

    #[tokio::test]
    async fn commit_without_open_edit_is_a_no_op() {
        let mut ctrl = loaded().await;
        let before = ctrl.rows().to_vec();
        ctrl.commit_edit().await;
        assert_eq!(ctrl.rows(), before.as_slice());
    }
}
