use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InterviewSessionRow {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub candidate_name: String,
    pub company: String,
    pub role: String,
    /// Ordered question list, a JSON array of strings.
    pub questions: Value,
    /// Serialized `ConversationState`.
    pub state: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
