pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::admin::handlers as admin;
use crate::analysis::extract::MAX_UPLOAD_BYTES;
use crate::analysis::handlers as analysis;
use crate::interview::handlers as interview;
use crate::interview::handlers::MAX_AUDIO_BYTES;
use crate::state::AppState;
use crate::taxonomy::handlers as taxonomy;

/// Headroom for multipart boundaries and part headers.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume analysis
        .route("/api/resume/analyze", post(analysis::handle_analyze))
        .route("/api/resume/heuristics", post(analysis::handle_heuristics))
        .route("/api/resume/optimize-ai", post(analysis::handle_optimize))
        .route(
            "/api/resume/extract-text",
            post(analysis::handle_extract_text)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + MULTIPART_OVERHEAD_BYTES)),
        )
        .route("/api/resume/analyses", get(analysis::handle_list_analyses))
        // Taxonomy
        .route("/api/resume/examples", post(taxonomy::handle_examples))
        .route("/api/taxonomy/job-titles", get(taxonomy::handle_job_titles))
        // Mock interview
        .route("/api/interview/start", post(interview::handle_start))
        .route("/api/interview/:id/next", post(interview::handle_next))
        .route("/api/interview/backchannel", get(interview::handle_backchannel))
        .route(
            "/api/interview/transcribe",
            post(interview::handle_transcribe).layer(DefaultBodyLimit::max(MAX_AUDIO_BYTES)),
        )
        // Admin
        .route("/api/admin/analytics", get(admin::handle_analytics))
        .route("/api/admin/users/export", get(admin::handle_users_export))
        .with_state(state)
}
