use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use super::models::{Identity, NewIdentity, UserView};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

/// Outcome of creating an identity.
///
/// `Conflict` is reported when the store's unique email constraint rejects the
/// insert, which covers registrations racing past the handler's pre-check.
#[derive(Debug)]
pub enum CreateOutcome {
    Created(UserView),
    Conflict,
}

/// Persistence seam for identities.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Look up the full record (hash included) by exact email.
    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, StoreError>;

    /// Insert a new identity.
    async fn create(&self, identity: NewIdentity) -> Result<CreateOutcome, StoreError>;

    /// Look up the public projection by id. Implementations must not load the
    /// password hash.
    async fn find_view_by_id(&self, id: Uuid) -> Result<Option<UserView>, StoreError>;

    /// Cheap liveness probe used by `/health`.
    async fn ping(&self) -> Result<(), StoreError>;
}
