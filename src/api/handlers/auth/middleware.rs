//! Route gating.
//!
//! Flow Overview: read the session cookie, verify the token, resolve the
//! identity from the store, and attach it to the request for the wrapped
//! handler. Every failure short-circuits with a fixed status, so the wrapped
//! handler only ever runs for a resolved identity.

use axum::{
    extract::{Extension, Request},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{Span, debug};
use uuid::Uuid;

use super::{
    error::{AuthError, INVALID_TOKEN, NO_TOKEN},
    session::extract_session_token,
    state::AuthState,
};
use crate::identity::UserView;

/// Identity resolved by [`require_session`], available to gated handlers.
#[derive(Clone, Debug)]
pub struct CurrentUser(pub UserView);

/// Middleware for routes that need an authenticated identity.
pub async fn require_session(
    auth_state: Extension<Arc<AuthState>>,
    mut request: Request,
    next: Next,
) -> Response {
    match resolve_session(&auth_state, request.headers()).await {
        Ok(user) => {
            Span::current().record("user_id", tracing::field::display(user.id));
            request.extensions_mut().insert(CurrentUser(user));
            next.run(request).await
        }
        Err(err) => err.into_response(),
    }
}

/// Resolve the session cookie into the identity it names.
///
/// # Errors
/// - `Unauthorized` when the cookie is missing or the token fails verification.
/// - `NotFound` when the token names an identity that no longer resolves.
/// - `Internal` when the store fails.
pub(crate) async fn resolve_session(
    auth_state: &AuthState,
    headers: &HeaderMap,
) -> Result<UserView, AuthError> {
    let token = extract_session_token(headers).ok_or(AuthError::Unauthorized(NO_TOKEN))?;

    let claims = auth_state.tokens().verify(&token).map_err(|err| {
        debug!("Rejected session token: {err}");
        AuthError::Unauthorized(INVALID_TOKEN)
    })?;

    let Ok(user_id) = Uuid::parse_str(&claims.sub) else {
        debug!("Session token subject is not a valid id");
        return Err(AuthError::NotFound);
    };

    auth_state
        .store()
        .find_view_by_id(user_id)
        .await?
        .ok_or(AuthError::NotFound)
}
