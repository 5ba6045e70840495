use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;
use crate::speech::SpeechError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden")]
    Forbidden,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Speech provider error: {0}")]
    Speech(#[from] SpeechError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Authentication required".to_string(),
            ),
            AppError::Forbidden => (
                StatusCode::FORBIDDEN,
                "FORBIDDEN",
                "Access denied".to_string(),
            ),
            AppError::Database(e) if is_foreign_key_violation(e) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                "Referenced record does not exist".to_string(),
            ),
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Llm(e) => llm_parts(e),
            AppError::Speech(e) => speech_parts(e),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        }
    }
}

/// Client-supplied ids such as `user_id` reach the database unchecked.
fn is_foreign_key_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .is_some_and(|db| db.is_foreign_key_violation())
}

fn llm_parts(e: &LlmError) -> (StatusCode, &'static str, String) {
    match e {
        LlmError::QuotaExceeded => (StatusCode::TOO_MANY_REQUESTS, "LLM_QUOTA_EXCEEDED", e.to_string()),
        LlmError::RateLimited => (StatusCode::TOO_MANY_REQUESTS, "LLM_RATE_LIMITED", e.to_string()),
        LlmError::InvalidApiKey => (StatusCode::BAD_GATEWAY, "LLM_AUTH_ERROR", e.to_string()),
        LlmError::ServerError { .. } => (StatusCode::BAD_GATEWAY, "LLM_UNAVAILABLE", e.to_string()),
        LlmError::EmptyContent | LlmError::Parse(_) | LlmError::Schema(_) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            "LLM_BAD_OUTPUT",
            "The AI returned a response that could not be used. Please try again.".to_string(),
        ),
        LlmError::Http(_) | LlmError::Api { .. } => {
            tracing::error!("LLM error: {e}");
            (
                StatusCode::BAD_GATEWAY,
                "LLM_ERROR",
                "An AI processing error occurred".to_string(),
            )
        }
    }
}

fn speech_parts(e: &SpeechError) -> (StatusCode, &'static str, String) {
    match e {
        SpeechError::EmptyInput(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        SpeechError::RateLimited { .. } => {
            (StatusCode::TOO_MANY_REQUESTS, "SPEECH_RATE_LIMITED", e.to_string())
        }
        _ => {
            tracing::error!("Speech provider error: {e}");
            (
                StatusCode::BAD_GATEWAY,
                "SPEECH_ERROR",
                "A voice processing error occurred".to_string(),
            )
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::error::{DatabaseError, ErrorKind};
    use std::error::Error as StdError;
    use std::fmt;

    #[test]
    fn test_validation_maps_to_400() {
        let (status, code, message) = AppError::Validation("resume_text cannot be empty".into()).parts();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(code, "VALIDATION_ERROR");
        assert!(message.contains("resume_text"));
    }

    #[test]
    fn test_quota_and_rate_limit_have_distinct_messages() {
        let (quota_status, quota_code, quota_msg) = AppError::Llm(LlmError::QuotaExceeded).parts();
        let (rate_status, rate_code, rate_msg) = AppError::Llm(LlmError::RateLimited).parts();
        assert_eq!(quota_status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(rate_status, StatusCode::TOO_MANY_REQUESTS);
        assert_ne!(quota_code, rate_code);
        assert_ne!(quota_msg, rate_msg);
    }

    #[test]
    fn test_bad_llm_output_maps_to_422() {
        let (status, code, _) = AppError::Llm(LlmError::Schema("missing ats_score".into())).parts();
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(code, "LLM_BAD_OUTPUT");
    }

    #[test]
    fn test_invalid_key_and_server_error_map_to_502() {
        assert_eq!(AppError::Llm(LlmError::InvalidApiKey).parts().0, StatusCode::BAD_GATEWAY);
        assert_eq!(
            AppError::Llm(LlmError::ServerError { status: 500 }).parts().0,
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_auth_errors() {
        assert_eq!(AppError::Unauthorized.parts().0, StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::Forbidden.parts().0, StatusCode::FORBIDDEN);
    }

    struct FakeDbError(ErrorKind);

    impl fmt::Debug for FakeDbError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("FakeDbError")
        }
    }

    impl fmt::Display for FakeDbError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.message())
        }
    }

    impl StdError for FakeDbError {}

    impl DatabaseError for FakeDbError {
        fn message(&self) -> &str {
            "insert or update violates a constraint"
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> ErrorKind {
            match self.0 {
                ErrorKind::ForeignKeyViolation => ErrorKind::ForeignKeyViolation,
                _ => ErrorKind::Other,
            }
        }
    }

    fn db_error(kind: ErrorKind) -> AppError {
        AppError::Database(sqlx::Error::Database(Box::new(FakeDbError(kind))))
    }

    #[test]
    fn test_unknown_reference_is_bad_request() {
        let (status, code, _) = db_error(ErrorKind::ForeignKeyViolation).parts();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(code, "VALIDATION_ERROR");
    }

    #[test]
    fn test_other_database_errors_stay_500() {
        assert_eq!(db_error(ErrorKind::Other).parts().0, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            AppError::Database(sqlx::Error::RowNotFound).parts().0,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_empty_audio_is_bad_request() {
        let (status, _, _) = AppError::Speech(SpeechError::EmptyInput("audio is empty".into())).parts();
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
