use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeAnalysisRow {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub industry: Option<String>,
    pub has_job_description: bool,
    pub base_score: i32,
    pub final_score: i32,
    /// The full `MergedAnalysis` as returned to the client.
    pub result: Value,
    pub created_at: DateTime<Utc>,
}
