use axum::{
    extract::State,
    http::{header, HeaderMap},
    response::IntoResponse,
    Json,
};
use tracing::info;

use crate::admin::analytics::{load_analytics, AdminAnalytics};
use crate::admin::auth::authorize_admin;
use crate::admin::export::{load_export_rows, write_users_csv};
use crate::errors::AppError;
use crate::state::AppState;

/// GET /api/admin/analytics
pub async fn handle_analytics(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<AdminAnalytics>, AppError> {
    authorize_admin(&headers, state.config.admin_api_token.as_deref())?;
    Ok(Json(load_analytics(&state.db).await?))
}

/// GET /api/admin/users/export
pub async fn handle_users_export(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    authorize_admin(&headers, state.config.admin_api_token.as_deref())?;
    let rows = load_export_rows(&state.db).await?;
    let body = write_users_csv(&rows)?;
    info!("Exported {} users", rows.len());

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"users.csv\""),
        ],
        body,
    ))
}
