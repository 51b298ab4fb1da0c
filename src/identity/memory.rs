//! In-process credential store for tests and local development.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::models::{Identity, NewIdentity, UserView};
use super::repo::{CreateOutcome, CredentialStore, StoreError};

#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    identities: RwLock<HashMap<Uuid, Identity>>,
}

impl MemoryCredentialStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop an identity, returning whether it existed.
    pub async fn remove(&self, id: Uuid) -> bool {
        self.identities.write().await.remove(&id).is_some()
    }

    pub async fn len(&self) -> usize {
        self.identities.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.identities.read().await.is_empty()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, StoreError> {
        let identities = self.identities.read().await;
        Ok(identities
            .values()
            .find(|identity| identity.email == email)
            .cloned())
    }

    async fn create(&self, identity: NewIdentity) -> Result<CreateOutcome, StoreError> {
        // Uniqueness is checked under the write lock, mirroring a unique index.
        let mut identities = self.identities.write().await;
        if identities.values().any(|stored| stored.email == identity.email) {
            return Ok(CreateOutcome::Conflict);
        }

        let stored = Identity {
            id: Uuid::new_v4(),
            email: identity.email,
            name: identity.name,
            password_hash: identity.password_hash,
            role: identity.role,
            image: None,
        };
        let view = stored.view();
        identities.insert(stored.id, stored);

        Ok(CreateOutcome::Created(view))
    }

    async fn find_view_by_id(&self, id: Uuid) -> Result<Option<UserView>, StoreError> {
        Ok(self.identities.read().await.get(&id).map(Identity::view))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
