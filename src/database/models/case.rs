use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Case {
    pub id: i64,
    pub client_id: i64,
    pub title: String,
    pub status: String,
    pub opened_at: DateTime<Utc>,
}
