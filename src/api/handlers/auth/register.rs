//! Registration endpoint.
//!
//! Flow Overview:
//! 1) Reject emails that already exist (fast path).
//! 2) Hash the password and create the identity with the base role.
//! 3) Mint a session token and set the cookie.
//!
//! The email pre-check races with concurrent registrations; the store's
//! unique constraint is what actually guarantees one identity per email.

use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{
    error::{AuthError, MISSING_PAYLOAD},
    session::session_headers,
    state::AuthState,
    types::{AuthResponse, ErrorResponse, RegisterRequest},
    utils::validate_register,
};
use crate::identity::{CreateOutcome, NewIdentity, Role, UserView};

#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Registration successful", body = AuthResponse),
        (status = 400, description = "Invalid payload or user already exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "auth"
)]
#[instrument(skip(auth_state, payload))]
pub async fn register(
    auth_state: Extension<Arc<AuthState>>,
    payload: Option<Json<RegisterRequest>>,
) -> Result<impl IntoResponse, AuthError> {
    let Some(Json(request)) = payload else {
        return Err(AuthError::BadRequest(MISSING_PAYLOAD));
    };
    let request = validate_register(request)?;

    let user = create_identity(&auth_state, request).await?;

    let token = auth_state
        .tokens()
        .issue(user.id)
        .map_err(anyhow::Error::new)?;
    let headers = session_headers(auth_state.config(), &token)?;

    info!(user_id = %user.id, "User registered");

    Ok((
        StatusCode::CREATED,
        headers,
        Json(AuthResponse::new("User registered successfully", user)),
    ))
}

async fn create_identity(
    auth_state: &AuthState,
    request: RegisterRequest,
) -> Result<UserView, AuthError> {
    if auth_state
        .store()
        .find_by_email(&request.email)
        .await?
        .is_some()
    {
        return Err(AuthError::Conflict);
    }

    let password_hash = auth_state.hasher().hash(&request.password).await?;

    let outcome = auth_state
        .store()
        .create(NewIdentity {
            email: request.email,
            name: request.name,
            password_hash,
            role: Role::User,
        })
        .await?;

    match outcome {
        CreateOutcome::Created(user) => Ok(user),
        CreateOutcome::Conflict => Err(AuthError::Conflict),
    }
}
