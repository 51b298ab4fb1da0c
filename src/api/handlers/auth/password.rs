//! bcrypt password hashing.
//!
//! bcrypt is CPU bound, so both operations run on the blocking pool to keep
//! request workers responsive.

use anyhow::{Context, Result};

#[derive(Clone, Copy, Debug)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    #[must_use]
    pub const fn new(cost: u32) -> Self {
        Self { cost }
    }

    #[must_use]
    pub const fn cost(&self) -> u32 {
        self.cost
    }

    /// # Errors
    /// Returns an error if the cost is out of range or the task fails.
    pub async fn hash(&self, password: &str) -> Result<String> {
        let password = password.to_owned();
        let cost = self.cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .context("password hashing task failed")?
            .context("failed to hash password")
    }

    /// Constant-time comparison of `password` against a stored bcrypt hash.
    ///
    /// # Errors
    /// Returns an error if the stored hash is malformed or the task fails.
    pub async fn verify(&self, password: &str, hash: &str) -> Result<bool> {
        let password = password.to_owned();
        let hash = hash.to_owned();
        tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .context("password verification task failed")?
            .context("failed to verify password hash")
    }
}
