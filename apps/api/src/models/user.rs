use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A user plus their analysis count, as selected for the admin CSV export.
/// The `users` table itself is written by the auth provider's sync job.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserExportRow {
    pub email: String,
    pub full_name: Option<String>,
    pub plan: String,
    pub created_at: DateTime<Utc>,
    pub analysis_count: i64,
}
