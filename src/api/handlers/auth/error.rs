//! Auth failure taxonomy and its HTTP mapping.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use super::types::ErrorResponse;
use crate::identity::StoreError;

pub(super) const MISSING_PAYLOAD: &str = "Missing payload";
pub(super) const NO_TOKEN: &str = "No token provided";
pub(super) const INVALID_TOKEN: &str = "Invalid token";
pub(super) const INVALID_CREDENTIALS: &str = "Invalid credentials";
pub(super) const USER_NOT_FOUND: &str = "User not found";
const INTERNAL: &str = "Internal server error";

#[derive(Debug, Error)]
pub enum AuthError {
    /// Duplicate identity. Reported as 400, not 409, by convention of this API.
    #[error("User already exists")]
    Conflict,
    #[error("{0}")]
    BadRequest(&'static str),
    #[error("{0}")]
    Unauthorized(&'static str),
    /// The token was valid but its identity no longer resolves.
    #[error("User not found")]
    NotFound,
    #[error("internal error: {0:#}")]
    Internal(#[from] anyhow::Error),
}

impl AuthError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Conflict | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn public_message(&self) -> String {
        match self {
            Self::Internal(_) => INTERNAL.to_string(),
            other => other.to_string(),
        }
    }
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        Self::Internal(anyhow::Error::new(err).context("credential store failure"))
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        if let Self::Internal(err) = &self {
            error!("{err:#}");
        }
        let body = ErrorResponse {
            error: self.public_message(),
        };
        (self.status(), Json(body)).into_response()
    }
}
