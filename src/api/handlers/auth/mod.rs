//! Auth handlers and supporting modules.
//!
//! Sessions are stateless: a signed, time-bounded token naming the identity id
//! is carried in the `session-token` cookie. There is no server-side session
//! table and no revocation list, so logout only clears the cookie and a copied
//! token stays valid until it expires.
//!
//! ## Error conventions
//!
//! - Duplicate registration is `400 User already exists` (not `409`).
//! - Login distinguishes `401 User not found` from `401 Invalid credentials`.
//! - A valid token whose identity has since disappeared is `404 User not found`.
//! - Anything unexpected is logged and returned as a bare `500`.

mod error;
pub mod login;
pub mod middleware;
mod password;
pub mod register;
pub mod session;
mod state;
pub mod token;
pub mod types;
mod utils;

pub use error::AuthError;
pub use middleware::{CurrentUser, require_session};
pub use password::PasswordHasher;
pub use state::{AuthConfig, AuthState, Environment};
pub use token::{SessionClaims, TokenCodec, TokenError};
