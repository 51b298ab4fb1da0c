//! Postgres-backed credential store.

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{Connection, PgPool, postgres::PgPoolOptions};
use std::time::Duration;
use tracing::{Instrument, info_span};
use uuid::Uuid;

use super::models::{Identity, NewIdentity, UserView};
use super::repo::{CreateOutcome, CredentialStore, StoreError};

const UNIQUE_VIOLATION: &str = "23505";

#[derive(Clone, Debug)]
pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Build the shared connection pool once at startup.
    ///
    /// # Errors
    /// Returns an error if the database is unreachable.
    pub async fn connect(dsn: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .min_connections(1)
            .max_connections(5)
            .max_lifetime(Duration::from_secs(60 * 2))
            .test_before_acquire(true)
            .connect(dsn)
            .await
            .context("Failed to connect to database")?;

        Ok(Self::new(pool))
    }

    /// Apply the bundled `migrations/` directory.
    ///
    /// # Errors
    /// Returns an error if a migration fails to apply.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, StoreError> {
        let query = "SELECT id, email, name, password_hash, role, image FROM users WHERE email = $1";
        let span = info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "SELECT",
            db.statement = query
        );
        let identity = sqlx::query_as::<_, Identity>(query)
            .bind(email)
            .fetch_optional(&self.pool)
            .instrument(span)
            .await?;

        Ok(identity)
    }

    async fn create(&self, identity: NewIdentity) -> Result<CreateOutcome, StoreError> {
        let query = r"
            INSERT INTO users (email, name, password_hash, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id, email, name, role, image
        ";
        let span = info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "INSERT",
            db.statement = query
        );
        let result = sqlx::query_as::<_, UserView>(query)
            .bind(&identity.email)
            .bind(&identity.name)
            .bind(&identity.password_hash)
            .bind(identity.role.as_str())
            .fetch_one(&self.pool)
            .instrument(span)
            .await;

        match result {
            Ok(view) => Ok(CreateOutcome::Created(view)),
            Err(err) if is_unique_violation(&err) => Ok(CreateOutcome::Conflict),
            Err(err) => Err(err.into()),
        }
    }

    async fn find_view_by_id(&self, id: Uuid) -> Result<Option<UserView>, StoreError> {
        // Projection happens in SQL so the hash never leaves the database here.
        let query = "SELECT id, image, name, email, role FROM users WHERE id = $1";
        let span = info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "SELECT",
            db.statement = query
        );
        let view = sqlx::query_as::<_, UserView>(query)
            .bind(id)
            .fetch_optional(&self.pool)
            .instrument(span)
            .await?;

        Ok(view)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let acquire_span = info_span!(
            "db.acquire",
            db.system = "postgresql",
            db.operation = "ACQUIRE"
        );
        let mut conn = self.pool.acquire().instrument(acquire_span).await?;
        let ping_span = info_span!("db.ping", db.system = "postgresql", db.operation = "PING");
        conn.ping().instrument(ping_span).await?;
        Ok(())
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err
            .code()
            .is_some_and(|code| code.as_ref() == UNIQUE_VIOLATION),
        _ => false,
    }
}
