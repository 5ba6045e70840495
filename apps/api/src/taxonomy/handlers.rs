use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::state::AppState;
use crate::taxonomy::examples::{generate_examples, ExamplesRequest, ExamplesResponse};
use crate::taxonomy::job_titles::{suggest, JobTitle};

const DEFAULT_SUGGESTION_LIMIT: usize = 10;
const MAX_SUGGESTION_LIMIT: usize = 50;

#[derive(Deserialize)]
pub struct JobTitleQuery {
    #[serde(default)]
    pub q: String,
    pub limit: Option<usize>,
}

#[derive(Serialize)]
pub struct JobTitleSuggestions {
    pub titles: Vec<&'static JobTitle>,
}

/// GET /api/taxonomy/job-titles
pub async fn handle_job_titles(Query(params): Query<JobTitleQuery>) -> Json<JobTitleSuggestions> {
    let limit = params
        .limit
        .unwrap_or(DEFAULT_SUGGESTION_LIMIT)
        .clamp(1, MAX_SUGGESTION_LIMIT);
    Json(JobTitleSuggestions {
        titles: suggest(&params.q, limit),
    })
}

/// POST /api/resume/examples
pub async fn handle_examples(
    State(state): State<AppState>,
    Json(req): Json<ExamplesRequest>,
) -> Result<Json<ExamplesResponse>, AppError> {
    let response = generate_examples(&state.llm, &req).await?;
    Ok(Json(response))
}
