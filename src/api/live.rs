use futures::future::BoxFuture;
use reqwest::Client;
use serde_json::{Value, json};

use super::{ApiError, Backend};

/// Dispatch target backed by a deployed backend over HTTP.
///
/// Operations are posted as `{ "function": name, "args": [...] }` to the
/// configured base URL. The response body is handed back as raw JSON,
/// un-validated: the backend is trusted to already emit the envelope shape.
pub struct LiveBackend {
    base_url: String,
    http: Client,
}

impl LiveBackend {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let http = Client::builder()
            .build()
            .map_err(|e| ApiError::Transport(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    async fn post(&self, name: String, args: Vec<Value>) -> Result<Value, ApiError> {
        let resp = self
            .http
            .post(&self.base_url)
            .json(&json!({ "function": name, "args": args }))
            .send()
            .await
            .map_err(|e| ApiError::Transport(format!("POST {} failed: {}", name, e)))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::Backend(format!(
                "{} returned {}: {}",
                name, status, body
            )));
        }

        resp.json::<Value>()
            .await
            .map_err(|e| ApiError::Transport(format!("Failed to read {} response: {}", name, e)))
    }
}

impl Backend for LiveBackend {
    fn call(&self, name: &str, args: Vec<Value>) -> BoxFuture<'_, Result<Value, ApiError>> {
        let name = name.to_string();
        Box::pin(self.post(name, args))
    }
}
