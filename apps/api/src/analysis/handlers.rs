use axum::{
    extract::{Multipart, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::analysis::analyzer::{analyze_resume, AnalysisError};
use crate::analysis::extract::extract_resume_text;
use crate::analysis::merge::{run_heuristics, HeuristicReport, MergedAnalysis};
use crate::analysis::models::AnalysisRequest;
use crate::analysis::optimizer::{optimize_bullets, OptimizeRequest, OptimizeResponse};
use crate::analysis::repository::{list_analyses, save_analysis};
use crate::db::ensure_user_exists;
use crate::errors::AppError;
use crate::models::analysis::ResumeAnalysisRow;
use crate::state::AppState;

const UPLOAD_FIELD: &str = "file";
const DEFAULT_HISTORY_LIMIT: i64 = 20;
const MAX_HISTORY_LIMIT: i64 = 100;

#[derive(Serialize)]
pub struct AnalyzeResponse {
    /// `None` when the result could not be stored.
    pub analysis_id: Option<Uuid>,
    #[serde(flatten)]
    pub analysis: MergedAnalysis,
}

#[derive(Serialize)]
pub struct ExtractTextResponse {
    pub text: String,
    pub char_count: usize,
}

#[derive(Deserialize)]
pub struct AnalysesQuery {
    pub user_id: Uuid,
    pub limit: Option<i64>,
}

/// POST /api/resume/analyze
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(req): Json<AnalysisRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    // Checked up front so an unknown account fails before the model is paid for.
    ensure_user_exists(&state.db, req.user_id).await?;
    let analysis = analyze_resume(&state.llm, &req).await?;

    // Storage is best-effort; the caller still gets the analysis.
    let analysis_id = match save_analysis(&state.db, &req, &analysis).await {
        Ok(id) => Some(id),
        Err(e) => {
            warn!("Failed to store analysis: {e:#}");
            None
        }
    };

    Ok(Json(AnalyzeResponse {
        analysis_id,
        analysis,
    }))
}

/// POST /api/resume/heuristics
pub async fn handle_heuristics(Json(req): Json<AnalysisRequest>) -> Result<Json<HeuristicReport>, AppError> {
    if req.resume_text.trim().is_empty() {
        return Err(AnalysisError::EmptyResume.into());
    }
    Ok(Json(run_heuristics(&req.resume_text, req.industry())))
}

/// POST /api/resume/optimize-ai
pub async fn handle_optimize(
    State(state): State<AppState>,
    Json(req): Json<OptimizeRequest>,
) -> Result<Json<OptimizeResponse>, AppError> {
    let response = optimize_bullets(&state.llm, &req).await?;
    Ok(Json(response))
}

/// POST /api/resume/extract-text
pub async fn handle_extract_text(mut multipart: Multipart) -> Result<Json<ExtractTextResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let content_type = field.content_type().map(str::to_string);
        let file_name = field.file_name().unwrap_or("resume").to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;

        info!("Extracting text from upload '{file_name}' ({} bytes)", data.len());
        let text = extract_resume_text(data, content_type.as_deref()).await?;
        let char_count = text.chars().count();
        return Ok(Json(ExtractTextResponse { text, char_count }));
    }

    Err(AppError::Validation(format!(
        "Multipart field '{UPLOAD_FIELD}' is required"
    )))
}

/// GET /api/resume/analyses
pub async fn handle_list_analyses(
    State(state): State<AppState>,
    Query(params): Query<AnalysesQuery>,
) -> Result<Json<Vec<ResumeAnalysisRow>>, AppError> {
    let limit = params
        .limit
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .clamp(1, MAX_HISTORY_LIMIT);
    let rows = list_analyses(&state.db, params.user_id, limit).await?;
    Ok(Json(rows))
}
