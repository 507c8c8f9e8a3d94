use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted video row, owned by the external record store. The application
/// only inserts and reads these; it never updates or deletes them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoRecord {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub url: String,
    #[serde(default)]
    pub file_path: String,
    pub created_at: DateTime<Utc>,
}

/// Fields persisted per upload: title, description, resolved public URL, and
/// the storage path. Nothing else.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewVideoRecord {
    pub title: String,
    pub description: String,
    pub url: String,
    pub file_path: String,
}
