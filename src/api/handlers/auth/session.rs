//! Session cookie handling plus the logout and check endpoints.

use axum::{
    Json,
    extract::Extension,
    http::{
        HeaderMap, HeaderValue, StatusCode,
        header::{COOKIE, InvalidHeaderValue, SET_COOKIE},
    },
    response::IntoResponse,
};
use std::sync::Arc;
use tracing::{error, instrument};

use super::{
    error::AuthError,
    middleware::CurrentUser,
    state::{AuthConfig, AuthState},
    types::{AuthResponse, ErrorResponse, MessageResponse},
};

pub const SESSION_COOKIE_NAME: &str = "session-token";

#[utoipa::path(
    post,
    path = "/auth/logout",
    responses(
        (status = 200, description = "Session cookie cleared", body = MessageResponse)
    ),
    tag = "auth"
)]
#[instrument(skip(auth_state))]
pub async fn logout(auth_state: Extension<Arc<AuthState>>) -> impl IntoResponse {
    // Tokens are stateless; clearing the cookie is all logout can do, and it
    // always succeeds whether or not a session was present.
    let mut headers = HeaderMap::new();
    match clear_session_cookie(auth_state.config()) {
        Ok(cookie) => {
            headers.insert(SET_COOKIE, cookie);
        }
        Err(err) => error!("Failed to build clear-session cookie: {err}"),
    }

    let body = MessageResponse {
        success: true,
        message: "Logged out successfully".to_string(),
    };
    (StatusCode::OK, headers, Json(body))
}

#[utoipa::path(
    get,
    path = "/auth/check",
    responses(
        (status = 200, description = "Session is valid", body = AuthResponse),
        (status = 401, description = "Missing, invalid or expired session token", body = ErrorResponse),
        (status = 404, description = "Session identity no longer exists", body = ErrorResponse)
    ),
    security(("session_cookie" = [])),
    tag = "auth"
)]
pub async fn check(Extension(CurrentUser(user)): Extension<CurrentUser>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(AuthResponse::new("User is authenticated", user)),
    )
}

/// Response headers carrying a fresh session cookie.
pub(super) fn session_headers(config: &AuthConfig, token: &str) -> Result<HeaderMap, AuthError> {
    let cookie = session_cookie(config, token)
        .map_err(|err| anyhow::Error::new(err).context("failed to build session cookie"))?;
    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, cookie);
    Ok(headers)
}

/// Build the `HttpOnly` session cookie.
pub(super) fn session_cookie(
    config: &AuthConfig,
    token: &str,
) -> Result<HeaderValue, InvalidHeaderValue> {
    HeaderValue::from_str(&format!(
        "{SESSION_COOKIE_NAME}={token}; {}",
        cookie_attributes(config, config.session_ttl_seconds())
    ))
}

/// Build an expired cookie; browsers only drop it when the attributes match.
pub(super) fn clear_session_cookie(config: &AuthConfig) -> Result<HeaderValue, InvalidHeaderValue> {
    HeaderValue::from_str(&format!(
        "{SESSION_COOKIE_NAME}=; {}",
        cookie_attributes(config, 0)
    ))
}

fn cookie_attributes(config: &AuthConfig, max_age: u64) -> String {
    let mut attributes = format!("Path=/; HttpOnly; SameSite=Strict; Max-Age={max_age}");
    if config.session_cookie_secure() {
        attributes.push_str("; Secure");
    }
    attributes
}

/// Read the session token from the `Cookie` header(s). Empty values count as missing.
pub(super) fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|header| header.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| {
            let (key, val) = pair.trim().split_once('=')?;
            (key.trim() == SESSION_COOKIE_NAME).then(|| val.trim().to_string())
        })
        .find(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::handlers::auth::state::Environment;

    fn cookie_str(value: &HeaderValue) -> &str {
        value.to_str().unwrap_or_default()
    }

    #[test]
    fn session_cookie_has_strict_attributes() -> Result<(), InvalidHeaderValue> {
        let config = AuthConfig::new();
        let cookie = session_cookie(&config, "abc.def.ghi")?;
        assert_eq!(
            cookie_str(&cookie),
            "session-token=abc.def.ghi; Path=/; HttpOnly; SameSite=Strict; Max-Age=604800; Secure"
        );
        Ok(())
    }

    #[test]
    fn development_mode_drops_secure() -> Result<(), InvalidHeaderValue> {
        let config = AuthConfig::new().with_environment(Environment::Development);
        let cookie = session_cookie(&config, "t")?;
        assert!(!cookie_str(&cookie).contains("Secure"));
        Ok(())
    }

    #[test]
    fn clear_cookie_matches_set_attributes() -> Result<(), InvalidHeaderValue> {
        for config in [
            AuthConfig::new(),
            AuthConfig::new().with_environment(Environment::Development),
        ] {
            let set = session_cookie(&config, "t")?;
            let clear = clear_session_cookie(&config)?;
            let set_attrs = cookie_str(&set)
                .split_once("; ")
                .map(|(_, attrs)| attrs.replace("Max-Age=604800", "Max-Age=0"));
            let clear_attrs = cookie_str(&clear)
                .split_once("; ")
                .map(|(_, attrs)| attrs.to_string());
            assert_eq!(set_attrs, clear_attrs);
            assert!(cookie_str(&clear).starts_with("session-token=;"));
        }
        Ok(())
    }

    #[test]
    fn extract_session_token_finds_cookie_among_others() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; session-token=abc ; lang=en"),
        );
        assert_eq!(extract_session_token(&headers), Some("abc".to_string()));
    }

    #[test]
    fn extract_session_token_reads_multiple_cookie_headers() {
        let mut headers = HeaderMap::new();
        headers.append(COOKIE, HeaderValue::from_static("theme=dark"));
        headers.append(COOKIE, HeaderValue::from_static("session-token=xyz"));
        assert_eq!(extract_session_token(&headers), Some("xyz".to_string()));
    }

    #[test]
    fn extract_session_token_ignores_missing_or_empty() {
        let mut headers = HeaderMap::new();
        assert_eq!(extract_session_token(&headers), None);

        headers.insert(COOKIE, HeaderValue::from_static("session-token="));
        assert_eq!(extract_session_token(&headers), None);

        headers.insert(COOKIE, HeaderValue::from_static("other-token=abc"));
        assert_eq!(extract_session_token(&headers), None);
    }
}
