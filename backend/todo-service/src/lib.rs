// Todo Service Library

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod security;
pub mod services;

pub use error::{AppError, Result};

use crate::config::Config;
use crate::db::{MemoryStore, PgStore, TaskStore, UserStore};
use crate::security::HashingPool;
use crate::services::AuthService;
use anyhow::{bail, Context};
use crypto_core::{CredentialManager, TokenService};
use std::sync::Arc;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub tasks: Arc<dyn TaskStore>,
    pub tokens: Arc<TokenService>,
}

impl AppState {
    /// Wire services over the given stores
    pub fn new(
        config: &Config,
        users: Arc<dyn UserStore>,
        tasks: Arc<dyn TaskStore>,
    ) -> anyhow::Result<Self> {
        let ttl = config.access_token_ttl()?;
        let tokens = Arc::new(
            TokenService::new(&config.jwt_secret, ttl).context("Failed to build token service")?,
        );

        let credentials =
            CredentialManager::new(config.bcrypt_cost, config.password_overlong_policy)
                .context("Invalid BCRYPT_COST")?;
        let hashing = HashingPool::new(credentials, config.password_hash_concurrency);

        let auth = AuthService::new(users, hashing, tokens.clone())
            .context("Failed to initialize auth service")?;

        Ok(Self {
            auth: Arc::new(auth),
            tasks,
            tokens,
        })
    }

    /// Pick the store from configuration: Postgres when `DATABASE_URL` is set,
    /// in-memory otherwise (refused in production)
    pub async fn from_config(config: &Config) -> anyhow::Result<Self> {
        match config.database_url.as_deref() {
            Some(url) => {
                let pool = db::create_pool(url, config.database_max_connections)
                    .await
                    .context("Failed to connect to database")?;
                db::run_migrations(&pool)
                    .await
                    .context("Failed to run database migrations")?;
                tracing::info!("Database pool ready, migrations applied");

                let store = Arc::new(PgStore::new(pool));
                Self::new(config, store.clone(), store)
            }
            None if config.is_production() => {
                bail!("DATABASE_URL is required in production")
            }
            None => {
                tracing::warn!("DATABASE_URL not set; using in-memory store, data is lost on exit");
                let store = Arc::new(MemoryStore::new());
                Self::new(config, store.clone(), store)
            }
        }
    }
}
