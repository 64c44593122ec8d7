//! Remote call dispatch.
//!
//! Every backend operation goes through one async contract: a named
//! operation plus positional JSON arguments in, an [`Envelope`] out. Which
//! backend answers is decided exactly once at startup ([`crate::config`])
//! and injected as `Arc<dyn Backend>`; nothing probes for an ambient
//! environment after that.

pub mod live;
pub mod mock;

use std::sync::Arc;

use futures::future::BoxFuture;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use thiserror::Error;

use crate::core::project::{Project, ProjectTask};
use crate::core::task::InboxTask;

pub use live::LiveBackend;
pub use mock::MockBackend;

/// The wrapper every remote call resolves to.
///
/// Domain-level failures ("not found", "unknown function") travel inside the
/// envelope with `success: false`; only transport-level problems become an
/// [`ApiError`]. `data` is meaningful only on success, `error` only on
/// failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn fail(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }

    /// The payload, if the backend reported success and included one.
    pub fn into_data(self) -> Option<T> {
        if self.success { self.data } else { None }
    }
}

/// Transport-level dispatch failures. Domain failures stay in the envelope.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("backend rejected call: {0}")]
    Backend(String),
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// One remote dispatch target.
///
/// `call` resolves with the backend's raw JSON response. Implementations
/// must not reject for expected domain failures; those come back as
/// `success: false` envelopes.
pub trait Backend: Send + Sync {
    fn call(&self, name: &str, args: Vec<Value>) -> BoxFuture<'_, Result<Value, ApiError>>;
}

/// Typed facade over a dispatch target, one method per remote operation.
///
/// Cloning shares the underlying backend, so every view works against the
/// same process-wide selection.
#[derive(Clone)]
pub struct Api {
    backend: Arc<dyn Backend>,
}

impl Api {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }

    async fn request<T: DeserializeOwned>(
        &self,
        name: &str,
        args: Vec<Value>,
    ) -> Result<Envelope<T>, ApiError> {
        let raw = self.backend.call(name, args).await?;
        Ok(serde_json::from_value(raw)?)
    }

    pub async fn get_inbox_tasks(&self) -> Result<Envelope<Vec<InboxTask>>, ApiError> {
        self.request("getInboxTasks", vec![]).await
    }

    pub async fn create_inbox_task(&self, name: &str) -> Result<Envelope<InboxTask>, ApiError> {
        self.request("createInboxTask", vec![json!(name)]).await
    }

    pub async fn update_inbox_task(
        &self,
        id: &str,
        done: bool,
    ) -> Result<Envelope<Value>, ApiError> {
        self.request("updateInboxTask", vec![json!(id), json!(done)])
            .await
    }

    pub async fn delete_inbox_task(&self, id: &str) -> Result<Envelope<Value>, ApiError> {
        self.request("deleteInboxTask", vec![json!(id)]).await
    }

    pub async fn set_someday_inbox_task(&self, id: &str) -> Result<Envelope<Value>, ApiError> {
        self.request("setSomedayInboxTask", vec![json!(id)]).await
    }

    pub async fn get_projects(&self) -> Result<Envelope<Vec<Project>>, ApiError> {
        self.request("getProjects", vec![]).await
    }

    pub async fn create_project(&self, name: &str) -> Result<Envelope<Project>, ApiError> {
        self.request("createProject", vec![json!(name)]).await
    }

    pub async fn get_project_tasks(&self) -> Result<Envelope<Vec<ProjectTask>>, ApiError> {
        self.request("getProjectTasks", vec![]).await
    }

    pub async fn update_project_name(
        &self,
        id: &str,
        name: &str,
    ) -> Result<Envelope<Value>, ApiError> {
        self.request("updateProjectName", vec![json!(id), json!(name)])
            .await
    }

    pub async fn update_milestone_name(
        &self,
        id: &str,
        name: &str,
    ) -> Result<Envelope<Value>, ApiError> {
        self.request("updateMilestoneName", vec![json!(id), json!(name)])
            .await
    }

    pub async fn update_task_name(
        &self,
        id: &str,
        name: &str,
    ) -> Result<Envelope<Value>, ApiError> {
        self.request("updateTaskName", vec![json!(id), json!(name)])
            .await
    }

    pub async fn update_task_description(
        &self,
        id: &str,
        description: &str,
    ) -> Result<Envelope<Value>, ApiError> {
        self.request("updateTaskDescription", vec![json!(id), json!(description)])
            .await
    }

    pub async fn update_task_done(
        &self,
        id: &str,
        done: bool,
    ) -> Result<Envelope<Value>, ApiError> {
        self.request("updateTaskDone", vec![json!(id), json!(done)])
            .await
    }
}
