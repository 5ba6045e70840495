use serde::Serialize;
use sqlx::{FromRow, PgPool};

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AdminAnalytics {
    pub total_users: i64,
    pub total_analyses: i64,
    pub total_interview_sessions: i64,
    /// `None` until the first analysis is stored.
    pub average_final_score: Option<f64>,
    pub analyses_last_7_days: i64,
}

pub async fn load_analytics(pool: &PgPool) -> Result<AdminAnalytics, sqlx::Error> {
    sqlx::query_as::<_, AdminAnalytics>(
        r#"
        SELECT
            (SELECT COUNT(*) FROM users) AS total_users,
            (SELECT COUNT(*) FROM resume_analyses) AS total_analyses,
            (SELECT COUNT(*) FROM interview_sessions) AS total_interview_sessions,
            (SELECT AVG(final_score)::FLOAT8 FROM resume_analyses) AS average_final_score,
            (SELECT COUNT(*) FROM resume_analyses
                WHERE created_at >= NOW() - INTERVAL '7 days') AS analyses_last_7_days
        "#,
    )
    .fetch_one(pool)
    .await
}
