use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Document {
    pub id: i64,
    pub dossier_id: i64,
    pub title: String,
    /// Stored media path, if a file is attached
    pub file: Option<String>,
    pub uploaded_at: DateTime<Utc>,
}
