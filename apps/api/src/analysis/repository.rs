use anyhow::{Context, Result};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::analysis::merge::MergedAnalysis;
use crate::analysis::models::AnalysisRequest;
use crate::models::analysis::ResumeAnalysisRow;

/// Stores a merged analysis. Resume text itself is not persisted.
pub async fn save_analysis(
    pool: &PgPool,
    request: &AnalysisRequest,
    merged: &MergedAnalysis,
) -> Result<Uuid> {
    let id = Uuid::new_v4();
    let result = serde_json::to_value(merged).context("Failed to serialize analysis")?;

    sqlx::query(
        r#"
        INSERT INTO resume_analyses
            (id, user_id, industry, has_job_description, base_score, final_score, result)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(id)
    .bind(request.user_id)
    .bind(request.industry())
    .bind(request.job_description().is_some())
    .bind(merged.base_score as i32)
    .bind(merged.final_score as i32)
    .bind(&result)
    .execute(pool)
    .await
    .context("Failed to insert resume analysis")?;

    info!("Stored analysis {id} (final score {})", merged.final_score);
    Ok(id)
}

/// Most recent analyses for a user, newest first.
pub async fn list_analyses(pool: &PgPool, user_id: Uuid, limit: i64) -> Result<Vec<ResumeAnalysisRow>> {
    let rows = sqlx::query_as::<_, ResumeAnalysisRow>(
        "SELECT * FROM resume_analyses WHERE user_id = $1 ORDER BY created_at DESC LIMIT $2",
    )
    .bind(user_id)
    .bind(limit)
    .fetch_all(pool)
    .await
    .context("Failed to load resume analyses")?;
    Ok(rows)
}
