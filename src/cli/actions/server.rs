use crate::{
    api::{
        self,
        handlers::auth::{AuthConfig, AuthState, Environment},
    },
    identity::PgCredentialStore,
};
use anyhow::{Context, Result, anyhow};
use secrecy::SecretString;
use std::{fmt, sync::Arc};
use tracing::info;
use url::Url;

pub struct Args {
    pub port: u16,
    pub dsn: String,
    pub jwt_secret: SecretString,
    pub session_ttl_seconds: u64,
    pub bcrypt_cost: u32,
    pub environment: Environment,
}

// The DSN may embed credentials.
impl fmt::Debug for Args {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Args")
            .field("port", &self.port)
            .field("dsn", &"***")
            .field("jwt_secret", &self.jwt_secret)
            .field("session_ttl_seconds", &self.session_ttl_seconds)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("environment", &self.environment)
            .finish()
    }
}

impl Args {
    fn auth_config(&self) -> AuthConfig {
        AuthConfig::new()
            .with_session_ttl_seconds(self.session_ttl_seconds)
            .with_bcrypt_cost(self.bcrypt_cost)
            .with_environment(self.environment)
    }
}

/// `host:port/database` of a Postgres DSN, without credentials.
fn dsn_target(dsn: &str) -> Result<String> {
    let parsed = Url::parse(dsn).context("Invalid database connection string")?;
    if !matches!(parsed.scheme(), "postgres" | "postgresql") {
        return Err(anyhow!(
            "Database connection string must use postgres://, got {}://",
            parsed.scheme()
        ));
    }
    let host = parsed.host_str().unwrap_or("localhost");
    let port = parsed.port().unwrap_or(5432);
    Ok(format!("{host}:{port}{}", parsed.path()))
}

/// Connect the credential store, apply migrations and serve the API.
/// # Errors
/// Returns an error if the database is unreachable, migrations fail, the
/// signing secret is unusable, or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    let target = dsn_target(&args.dsn)?;
    info!(database = %target, "Connecting to credential store");
    let store = PgCredentialStore::connect(&args.dsn).await?;
    store
        .migrate()
        .await
        .context("Failed to apply database migrations")?;

    let config = args.auth_config();
    info!(
        environment = %config.environment(),
        session_ttl_seconds = config.session_ttl_seconds(),
        "Starting authgate"
    );

    let auth_state = AuthState::new(config, &args.jwt_secret, Arc::new(store))?;

    api::new(args.port, Arc::new(auth_state)).await
}
