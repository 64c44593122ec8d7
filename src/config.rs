use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::api::{ApiError, Backend, LiveBackend, MockBackend};

/// Which backend answers remote calls. Resolved exactly once at startup and
/// passed down; nothing re-detects the environment afterwards.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum BackendMode {
    /// POST operations to a deployed backend at this URL.
    Live { base_url: String },
    /// Answer from the deterministic in-process responder.
    Mock,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
pub struct SlateConfig {
    pub backend: BackendMode,
}

impl Default for SlateConfig {
    fn default() -> Self {
        Self {
            backend: BackendMode::Mock,
        }
    }
}

fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("~/.config"))
        .join("slate")
        .join("config.json")
}

impl SlateConfig {
    /// Loads the config file, falling back to defaults (mock backend) when
    /// it is absent or unreadable.
    pub fn load() -> Self {
        let path = config_path();
        match std::fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                log::warn!("Ignoring malformed config {}: {}", path.display(), e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Builds the process-wide dispatch target from the configured mode.
    pub fn backend(&self) -> Result<Arc<dyn Backend>, ApiError> {
        match &self.backend {
            BackendMode::Live { base_url } => {
                log::info!("Using live backend at {}", base_url);
                Ok(Arc::new(LiveBackend::new(base_url)?))
            }
            BackendMode::Mock => {
                log::info!("No live backend configured; using mock responder");
                Ok(Arc::new(MockBackend::new()))
            }
        }
    }
}
