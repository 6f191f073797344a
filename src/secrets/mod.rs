//! Secret parameter lookup.
//!
//! Handlers resolve the Riot API key by parameter name on every
//! invocation, so deployments can rotate the key without a restart.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when resolving a secret.
#[derive(Debug, Error)]
pub enum SecretError {
    #[error("secret parameter not found: {0}")]
    NotFound(String),
}

/// Opaque get-by-name secret store.
#[async_trait]
pub trait SecretStore: Send + Sync {
    async fn get(&self, name: &str) -> Result<String, SecretError>;
}

/// Secret store backed by process environment variables.
///
/// The last segment of the parameter path becomes the variable name:
/// `/rift-rewind/riot-api-key` reads `RIOT_API_KEY`.
pub struct EnvSecretStore;

impl EnvSecretStore {
    fn env_key_for(name: &str) -> String {
        name.rsplit('/')
            .next()
            .unwrap_or(name)
            .replace('-', "_")
            .to_ascii_uppercase()
    }
}

#[async_trait]
impl SecretStore for EnvSecretStore {
    async fn get(&self, name: &str) -> Result<String, SecretError> {
        let key = Self::env_key_for(name);
        match std::env::var(&key) {
            Ok(value) if !value.trim().is_empty() => Ok(value),
            _ => Err(SecretError::NotFound(name.to_string())),
        }
    }
}

/// Fixed-value secret store for tests.
#[cfg(test)]
#[derive(Default)]
pub struct StaticSecretStore {
    values: std::collections::HashMap<String, String>,
}

#[cfg(test)]
impl StaticSecretStore {
    pub fn with(name: &str, value: &str) -> Self {
        let mut values = std::collections::HashMap::new();
        values.insert(name.to_string(), value.to_string());
        Self { values }
    }
}

#[cfg(test)]
#[async_trait]
impl SecretStore for StaticSecretStore {
    async fn get(&self, name: &str) -> Result<String, SecretError> {
        self.values
            .get(name)
            .cloned()
            .ok_or_else(|| SecretError::NotFound(name.to_string()))
    }
}
