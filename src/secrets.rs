use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::debug;

use crate::db::postgres::PostgresDatabase;

/// Source of credentials such as the RPC access key.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// `Ok(None)` when the secret is not configured.
    async fn get_secret(&self, name: &str) -> Result<Option<String>>;
}

/// Reads secrets through the `get_secret(name)` SQL function.
pub struct PostgresSecretStore {
    db: Arc<PostgresDatabase>,
}

impl PostgresSecretStore {
    pub fn new(db: Arc<PostgresDatabase>) -> Self {
        PostgresSecretStore { db }
    }
}

#[async_trait]
impl SecretStore for PostgresSecretStore {
    async fn get_secret(&self, name: &str) -> Result<Option<String>> {
        debug!("Fetching secret {} from database", name);
        let value: Option<String> = sqlx::query_scalar("SELECT get_secret($1)")
            .bind(name)
            .fetch_one(&self.db.pool)
            .await
            .with_context(|| format!("Failed to fetch secret {}", name))?;
        Ok(value)
    }
}

/// Reads secrets from environment variables of the same name.
#[derive(Default)]
pub struct EnvSecretStore;

#[async_trait]
impl SecretStore for EnvSecretStore {
    async fn get_secret(&self, name: &str) -> Result<Option<String>> {
        Ok(std::env::var(name).ok())
    }
}
