use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One recorded like. `visitor_id` is the natural key: the table carries a
/// UNIQUE constraint on it, so a visitor can be recorded at most once.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct LikeRecord {
    pub id: Uuid,
    pub visitor_id: String,
    pub created_at: DateTime<Utc>,
}
