use crate::api::Api;
use crate::core::project::Project;

use super::ListController;

/// Projects list view state. Projects can be created and (elsewhere)
/// renamed, but never deleted from this UI.
pub struct ProjectsController {
    api: Api,
    list: ListController<Project>,
    input: String,
}

impl ProjectsController {
    pub fn new(api: Api) -> Self {
        Self {
            api,
            list: ListController::new(|p: &Project| p.id.as_str()),
            input: String::new(),
        }
    }

    pub fn projects(&self) -> &[Project] {
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

    pub async fn load(&mut self) {
        self.list.begin_load();
        let outcome = self.api.get_projects().await;
        self.list.finish_load(outcome);
    }

    /// Creates a project from the input buffer. Empty-after-trim names
    /// short-circuit locally; the dispatcher is never called.
    pub async fn create(&mut self) {
        let name = self.input.trim().to_string();
        if name.is_empty() {
            return;
        }

        let outcome = self.api.create_project(&name).await;
        if self.list.apply_create(outcome) {
            self.input.clear();
        }
    }
}
