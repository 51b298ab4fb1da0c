//! Credential store: persisted identities and the storage seam the auth flow
//! talks to.
//!
//! The store owns its connection pool. Callers hold it behind
//! `Arc<dyn CredentialStore>` and only issue single logical reads or creates.

pub mod memory;
pub mod models;
pub mod postgres;
pub mod repo;

pub use memory::MemoryCredentialStore;
pub use models::{Identity, NewIdentity, Role, UserView};
pub use postgres::PgCredentialStore;
pub use repo::{CreateOutcome, CredentialStore, StoreError};
