use anyhow::{Context, Result};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::interview::conversation::InterviewContext;
use crate::interview::phase::ConversationState;
use crate::models::interview::InterviewSessionRow;

/// Raw `sqlx::Error` is returned so an unknown `user_id` surfaces as a
/// foreign-key violation.
pub async fn create_session(
    pool: &PgPool,
    user_id: Option<Uuid>,
    ctx: &InterviewContext,
    state: &ConversationState,
) -> Result<Uuid, sqlx::Error> {
    let id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO interview_sessions
            (id, user_id, candidate_name, company, role, questions, state)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(&ctx.candidate)
    .bind(&ctx.company)
    .bind(&ctx.role)
    .bind(Json(&ctx.questions))
    .bind(Json(state))
    .execute(pool)
    .await?;
    Ok(id)
}

pub async fn delete_session(pool: &PgPool, id: Uuid) -> Result<()> {
    sqlx::query("DELETE FROM interview_sessions WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .context("Failed to delete interview session")?;
    Ok(())
}

pub async fn load_session(pool: &PgPool, id: Uuid) -> Result<Option<InterviewSessionRow>> {
    let row = sqlx::query_as::<_, InterviewSessionRow>("SELECT * FROM interview_sessions WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("Failed to load interview session")?;
    Ok(row)
}

/// Last write wins; sessions are driven by a single client.
pub async fn update_state(pool: &PgPool, id: Uuid, state: &ConversationState) -> Result<()> {
    sqlx::query("UPDATE interview_sessions SET state = $1, updated_at = NOW() WHERE id = $2")
        .bind(serde_json::to_value(state)?)
        .bind(id)
        .execute(pool)
        .await
        .context("Failed to update interview session")?;
    Ok(())
}

impl InterviewSessionRow {
    /// Decodes the JSON columns back into the conversation types.
    pub fn decode(&self) -> Result<(InterviewContext, ConversationState)> {
        let questions: Vec<String> =
            serde_json::from_value(self.questions.clone()).context("Corrupt questions column")?;
        let state: ConversationState =
            serde_json::from_value(self.state.clone()).context("Corrupt state column")?;
        Ok((
            InterviewContext {
                candidate: self.candidate_name.clone(),
                company: self.company.clone(),
                role: self.role.clone(),
                questions,
            },
            state,
        ))
    }
}
