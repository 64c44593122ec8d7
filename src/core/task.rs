use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A captured-but-unprocessed task in the GTD inbox.
///
/// The backend owns these: it assigns `id` and `created_on` at creation time,
/// and the client never invents either field. `created_on` round-trips as an
/// RFC 3339 timestamp on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InboxTask {
    pub id: String,
    pub name: String,
    pub done: bool,
    pub created_on: DateTime<Utc>,
}

impl InboxTask {
    pub fn is_open(&self) -> bool {
        !self.done
    }
}
