/// Configuration management
///
/// Flat environment variables (optionally from `.env`), deserialized with envy.
use anyhow::bail;
use chrono::Duration;
use crypto_core::{validate_secret_strength, OverlongPasswordPolicy, SecretStrength};
use serde::Deserialize;

/// Longest accepted access token lifetime (7 days)
pub const MAX_ACCESS_TOKEN_TTL_MINUTES: i64 = 7 * 24 * 60;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_app_env")]
    pub app_env: String,

    #[serde(default = "default_app_host")]
    pub app_host: String,

    #[serde(default = "default_app_port")]
    pub app_port: u16,

    /// Unset selects the in-memory store
    #[serde(default)]
    pub database_url: Option<String>,

    #[serde(default = "default_db_max_connections")]
    pub database_max_connections: u32,

    pub jwt_secret: String,

    #[serde(default = "default_access_token_ttl_minutes")]
    pub jwt_access_token_ttl_minutes: i64,

    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,

    #[serde(default)]
    pub password_overlong_policy: OverlongPasswordPolicy,

    #[serde(default = "default_hash_concurrency")]
    pub password_hash_concurrency: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenv::dotenv().ok();
        envy::from_env()
    }

    pub fn is_production(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("production")
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.app_host.clone(), self.app_port)
    }

    /// Access token lifetime, bounded to 1..=[`MAX_ACCESS_TOKEN_TTL_MINUTES`]
    pub fn access_token_ttl(&self) -> anyhow::Result<Duration> {
        let minutes = self.jwt_access_token_ttl_minutes;
        if !(1..=MAX_ACCESS_TOKEN_TTL_MINUTES).contains(&minutes) {
            bail!(
                "JWT_ACCESS_TOKEN_TTL_MINUTES must be between 1 and {}, got {}",
                MAX_ACCESS_TOKEN_TTL_MINUTES,
                minutes
            );
        }
        Ok(Duration::minutes(minutes))
    }

    /// Startup gate for the signing secret
    ///
    /// Empty is always fatal. Weak is fatal in production and a warning elsewhere.
    pub fn check_jwt_secret(&self) -> anyhow::Result<SecretStrength> {
        if self.jwt_secret.is_empty() {
            bail!("JWT_SECRET must not be empty");
        }

        let strength = validate_secret_strength(&self.jwt_secret);
        match strength {
            SecretStrength::Weak if self.is_production() => {
                bail!("JWT_SECRET is too weak for production (need 32+ random bytes)");
            }
            SecretStrength::Weak => {
                tracing::warn!("JWT_SECRET is weak; acceptable only outside production");
            }
            SecretStrength::Acceptable => {
                tracing::warn!("JWT_SECRET is acceptable; 64+ random bytes recommended");
            }
            SecretStrength::Strong => {}
        }
        Ok(strength)
    }
}

// Default value functions
fn default_app_env() -> String {
    "development".to_string()
}

fn default_app_host() -> String {
    "0.0.0.0".to_string()
}

fn default_app_port() -> u16 {
    8080
}

fn default_db_max_connections() -> u32 {
    10
}

fn default_access_token_ttl_minutes() -> i64 {
    crypto_core::jwt::DEFAULT_ACCESS_TOKEN_TTL_MINUTES
}

fn default_bcrypt_cost() -> u32 {
    12
}

fn default_hash_concurrency() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}
