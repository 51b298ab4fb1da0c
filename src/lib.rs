//! # Authgate
//!
//! Email/password authentication over HTTP with stateless cookie sessions.
//!
//! - **Register / login** validate the payload, hash or verify the password
//!   with bcrypt, and answer with the public user view plus a `session-token`
//!   cookie (`HttpOnly`, `SameSite=Strict`, `Secure` outside development).
//! - **Sessions** are HS256 tokens naming the identity id. Nothing is stored
//!   server side, so logout only expires the cookie.
//! - **Gating** resolves the cookie into the current identity before a
//!   protected handler runs; see [`api::handlers::auth::require_session`].
//!
//! Identities live in Postgres behind the [`identity::CredentialStore`] seam,
//! which also has an in-memory implementation for tests and local runs.

pub mod api;
pub mod cli;
pub mod identity;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
