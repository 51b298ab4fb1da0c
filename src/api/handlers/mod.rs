//! Route handlers.
//!
//! `auth` holds the register/login/logout/check flow and the gating
//! middleware; `health` reports credential store reachability.

pub mod auth;
pub mod health;
