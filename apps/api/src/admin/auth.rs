use axum::http::HeaderMap;

use crate::errors::AppError;

pub const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

/// Checks the admin token header against the configured token.
/// Missing header is 401, a wrong token is 403, and with no token configured
/// every request is 403.
pub fn authorize_admin(headers: &HeaderMap, configured: Option<&str>) -> Result<(), AppError> {
    let Some(expected) = configured.filter(|t| !t.is_empty()) else {
        return Err(AppError::Forbidden);
    };
    let provided = headers
        .get(ADMIN_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(AppError::Unauthorized)?;

    if !constant_time_eq(provided.as_bytes(), expected.as_bytes()) {
        return Err(AppError::Forbidden);
    }
    Ok(())
}

/// Byte comparison that does not stop at the first difference. Only the
/// length is observable through timing.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(token: Option<&'static str>) -> HeaderMap {
        let mut map = HeaderMap::new();
        if let Some(t) = token {
            map.insert(ADMIN_TOKEN_HEADER, HeaderValue::from_static(t));
        }
        map
    }

    #[test]
    fn test_missing_token_is_unauthorized() {
        assert!(matches!(
            authorize_admin(&headers(None), Some("secret")),
            Err(AppError::Unauthorized)
        ));
    }

    #[test]
    fn test_wrong_token_is_forbidden() {
        assert!(matches!(
            authorize_admin(&headers(Some("guess")), Some("secret")),
            Err(AppError::Forbidden)
        ));
    }

    #[test]
    fn test_unconfigured_token_always_forbidden() {
        assert!(matches!(
            authorize_admin(&headers(Some("secret")), None),
            Err(AppError::Forbidden)
        ));
        assert!(matches!(
            authorize_admin(&headers(None), Some("")),
            Err(AppError::Forbidden)
        ));
    }

    #[test]
    fn test_matching_token() {
        assert!(authorize_admin(&headers(Some("secret")), Some("secret")).is_ok());
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"secret", b"secret"));
        assert!(!constant_time_eq(b"secret", b"secreT"));
        assert!(!constant_time_eq(b"secret", b"secret2"));
        assert!(!constant_time_eq(b"", b"s"));
        assert!(constant_time_eq(b"", b""));
    }

    #[test]
    fn test_token_differing_in_last_byte_is_forbidden() {
        assert!(matches!(
            authorize_admin(&headers(Some("secreu")), Some("secret")),
            Err(AppError::Forbidden)
        ));
    }
}
