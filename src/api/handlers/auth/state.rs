//! Auth state and configuration.

use anyhow::{Context, Result};
use secrecy::SecretString;
use std::{fmt, str::FromStr, sync::Arc};

use super::{password::PasswordHasher, token::TokenCodec};
use crate::identity::CredentialStore;

const DEFAULT_SESSION_TTL_SECONDS: u64 = 7 * 24 * 60 * 60;
const DEFAULT_BCRYPT_COST: u32 = 12;

/// Deployment mode. Only `Development` relaxes the cookie `Secure` attribute.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Environment {
    #[default]
    Production,
    Development,
}

impl Environment {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Development => "development",
        }
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "production" | "prod" => Ok(Self::Production),
            "development" | "dev" => Ok(Self::Development),
            _ => Err(format!("invalid environment: {value}")),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug)]
pub struct AuthConfig {
    session_ttl_seconds: u64,
    bcrypt_cost: u32,
    environment: Environment,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthConfig {
    #[must_use]
    pub fn new() -> Self {
        Self {
            session_ttl_seconds: DEFAULT_SESSION_TTL_SECONDS,
            bcrypt_cost: DEFAULT_BCRYPT_COST,
            environment: Environment::Production,
        }
    }

    #[must_use]
    pub fn with_session_ttl_seconds(mut self, seconds: u64) -> Self {
        self.session_ttl_seconds = seconds;
        self
    }

    #[must_use]
    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    #[must_use]
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    #[must_use]
    pub fn session_ttl_seconds(&self) -> u64 {
        self.session_ttl_seconds
    }

    #[must_use]
    pub fn bcrypt_cost(&self) -> u32 {
        self.bcrypt_cost
    }

    #[must_use]
    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub(super) fn session_cookie_secure(&self) -> bool {
        self.environment != Environment::Development
    }
}

/// Immutable per-process auth context shared by every request.
pub struct AuthState {
    config: AuthConfig,
    tokens: TokenCodec,
    hasher: PasswordHasher,
    store: Arc<dyn CredentialStore>,
}

impl AuthState {
    /// Build the auth context from the signing secret and the store handle.
    ///
    /// # Errors
    /// Returns an error if the signing secret is empty.
    pub fn new(
        config: AuthConfig,
        signing_secret: &SecretString,
        store: Arc<dyn CredentialStore>,
    ) -> Result<Self> {
        let tokens = TokenCodec::new(signing_secret, config.session_ttl_seconds())
            .context("Invalid session signing secret")?;
        let hasher = PasswordHasher::new(config.bcrypt_cost());

        Ok(Self {
            config,
            tokens,
            hasher,
            store,
        })
    }

    #[must_use]
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    #[must_use]
    pub fn tokens(&self) -> &TokenCodec {
        &self.tokens
    }

    pub(super) fn hasher(&self) -> &PasswordHasher {
        &self.hasher
    }

    #[must_use]
    pub fn store(&self) -> &dyn CredentialStore {
        self.store.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::{AuthConfig, AuthState, Environment};
    use crate::identity::MemoryCredentialStore;
    use secrecy::SecretString;
    use std::sync::Arc;

    #[test]
    fn auth_config_defaults_and_overrides() {
        let config = AuthConfig::new();

        assert_eq!(config.session_ttl_seconds(), 604_800);
        assert_eq!(config.bcrypt_cost(), super::DEFAULT_BCRYPT_COST);
        assert_eq!(config.environment(), Environment::Production);
        assert!(config.session_cookie_secure());

        let config = config
            .with_session_ttl_seconds(60)
            .with_bcrypt_cost(4)
            .with_environment(Environment::Development);

        assert_eq!(config.session_ttl_seconds(), 60);
        assert_eq!(config.bcrypt_cost(), 4);
        assert!(!config.session_cookie_secure());
    }

    #[test]
    fn environment_parses_aliases() {
        assert_eq!("production".parse(), Ok(Environment::Production));
        assert_eq!("Prod".parse(), Ok(Environment::Production));
        assert_eq!("development".parse(), Ok(Environment::Development));
        assert_eq!("dev".parse(), Ok(Environment::Development));
        assert!("staging".parse::<Environment>().is_err());
    }

    #[test]
    fn auth_state_rejects_empty_secret() {
        let store = Arc::new(MemoryCredentialStore::new());
        let result = AuthState::new(AuthConfig::new(), &SecretString::from(""), store);
        assert!(result.is_err());
    }

    #[test]
    fn auth_state_constructs_with_memory_store() {
        let store = Arc::new(MemoryCredentialStore::new());
        let state = AuthState::new(
            AuthConfig::new().with_bcrypt_cost(4),
            &SecretString::from("test-secret"),
            store,
        );
        assert!(state.is_ok_and(|state| state.hasher().cost() == 4));
    }
}
