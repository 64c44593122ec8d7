use crate::api::Api;
use crate::core::task::InboxTask;

use super::ListController;

/// Inbox view state: quick-capture input plus the visible task list.
///
/// "Done", "someday" and "delete" are all filters-out-of-view here; whatever
/// the backend persists, a confirmed call just removes the task from the
/// visible set. A failed call leaves it in place.
pub struct InboxController {
    api: Api,
    list: ListController<InboxTask>,
    input: String,
}

impl InboxController {
    pub fn new(api: Api) -> Self {
        Self {
            api,
            list: ListController::new(|t: &InboxTask| t.id.as_str()),
            input: String::new(),
        }
    }

    pub fn tasks(&self) -> &[InboxTask] {
        self.list.items()
    }

    pub fn is_loading(&self) -> bool {
        self.list.is_loading()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, value: impl Into<String>) {
        self.input = value.into();
    }

    /// Replaces the visible list with the backend's current ordering.
    pub async fn load(&mut self) {
        self.list.begin_load();
        let outcome = self.api.get_inbox_tasks().await;
        self.list.finish_load(outcome);
    }

    /// Commit gesture on the capture input. A name that is empty after
    /// trimming never reaches the dispatcher; on confirmed creation the new
    /// task is prepended and the input cleared, otherwise the input is left
    /// as typed.
    pub async fn submit(&mut self) {
        let name = self.input.trim().to_string();
        if name.is_empty() {
            return;
        }

        let outcome = self.api.create_inbox_task(&name).await;
        if self.list.apply_create(outcome) {
            self.input.clear();
        }
    }

    /// Toggles the done flag remotely; on confirmation the task leaves the
    /// visible inbox regardless of which way it toggled.
    pub async fn toggle_done(&mut self, id: &str, done: bool) {
        let outcome = self.api.update_inbox_task(id, !done).await;
        self.list.apply_remove(id, outcome);
    }

    pub async fn delete(&mut self, id: &str) {
        let outcome = self.api.delete_inbox_task(id).await;
        self.list.apply_remove(id, outcome);
    }

    /// Reclassifies a task as someday/maybe, which removes it from the
    /// actionable inbox once the backend confirms.
    pub async fn set_someday(&mut self, id: &str) {
        let outcome = self.api.set_someday_inbox_task(id).await;
        self.list.apply_remove(id, outcome);
    }
}
