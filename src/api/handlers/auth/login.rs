//! Login endpoint.

use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};
use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::{
    error::{AuthError, INVALID_CREDENTIALS, MISSING_PAYLOAD, USER_NOT_FOUND},
    session::session_headers,
    state::AuthState,
    types::{AuthResponse, ErrorResponse, LoginRequest},
    utils::validate_login,
};
use crate::identity::UserView;

#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 400, description = "Invalid payload", body = ErrorResponse),
        (status = 401, description = "Unknown email or wrong password", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "auth"
)]
#[instrument(skip(auth_state, payload))]
pub async fn login(
    auth_state: Extension<Arc<AuthState>>,
    payload: Option<Json<LoginRequest>>,
) -> Result<impl IntoResponse, AuthError> {
    let Some(Json(request)) = payload else {
        return Err(AuthError::BadRequest(MISSING_PAYLOAD));
    };
    let request = validate_login(request)?;

    let user = check_credentials(&auth_state, &request).await?;

    let token = auth_state
        .tokens()
        .issue(user.id)
        .map_err(anyhow::Error::new)?;
    let headers = session_headers(auth_state.config(), &token)?;

    info!(user_id = %user.id, "User logged in");

    Ok((
        StatusCode::OK,
        headers,
        Json(AuthResponse::new("Login successful", user)),
    ))
}

// Unknown email and wrong password are reported with different messages.
async fn check_credentials(
    auth_state: &AuthState,
    request: &LoginRequest,
) -> Result<UserView, AuthError> {
    let Some(identity) = auth_state.store().find_by_email(&request.email).await? else {
        debug!("Login for unknown email");
        return Err(AuthError::Unauthorized(USER_NOT_FOUND));
    };

    let matches = auth_state
        .hasher()
        .verify(&request.password, &identity.password_hash)
        .await?;
    if !matches {
        debug!(user_id = %identity.id, "Login with wrong password");
        return Err(AuthError::Unauthorized(INVALID_CREDENTIALS));
    }

    Ok(identity.view())
}
