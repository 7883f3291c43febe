use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Dossier {
    pub id: i64,
    pub case_id: i64,
    pub number: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
}
