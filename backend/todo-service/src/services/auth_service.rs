use crate::db::UserStore;
use crate::error::{AppError, Result};
use crate::models::user::normalize_email;
use crate::models::User;
use crate::security::HashingPool;
use crypto_core::TokenService;
use serde::Serialize;
use std::sync::Arc;

/// Verified against when the email is unknown, so both login failures cost one bcrypt run
const DUMMY_PASSWORD: &str = "dummy-password-for-timing";

/// OAuth2 bearer token response
#[derive(Debug, Serialize, serde::Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

pub struct AuthService {
    users: Arc<dyn UserStore>,
    hashing: HashingPool,
    tokens: Arc<TokenService>,
    dummy_hash: String,
}

impl AuthService {
    /// Hashes the timing placeholder once with the configured cost
    pub fn new(
        users: Arc<dyn UserStore>,
        hashing: HashingPool,
        tokens: Arc<TokenService>,
    ) -> Result<Self> {
        let dummy_hash = hashing.credentials().hash(DUMMY_PASSWORD)?;
        Ok(Self {
            users,
            hashing,
            tokens,
            dummy_hash,
        })
    }

    pub fn tokens(&self) -> &Arc<TokenService> {
        &self.tokens
    }

    pub async fn signup(&self, email: &str, password: &str) -> Result<User> {
        let email = normalize_email(email);
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::DuplicateIdentity);
        }

        let password_hash = self.hashing.hash(password.to_string()).await?;
        // The store's unique constraint still decides concurrent signups
        let user = self.users.create_user(&email, &password_hash).await?;

        tracing::info!(user_id = user.id, "user registered");
        Ok(user)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AccessToken> {
        let email = normalize_email(email);
        let user = self.users.find_by_email(&email).await?;

        let stored_hash = user
            .as_ref()
            .map(|u| u.password_hash.clone())
            .unwrap_or_else(|| self.dummy_hash.clone());
        let verified = self
            .hashing
            .verify(password.to_string(), stored_hash)
            .await?;

        let user = match user {
            Some(user) if verified => user,
            _ => {
                tracing::debug!("login rejected");
                return Err(AppError::InvalidCredentials);
            }
        };

        let issued = self.tokens.issue(user.id)?;
        tracing::info!(user_id = user.id, "user logged in");

        Ok(AccessToken {
            access_token: issued.token,
            token_type: "bearer".to_string(),
            expires_in: issued.expires_in,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use crypto_core::{CredentialManager, OverlongPasswordPolicy};

    const SECRET: &str = "J8Kq2mPvRx4TnZs9YwLcGf7DhBe3Xa6W";

    fn service() -> AuthService {
        let credentials =
            CredentialManager::new(4, OverlongPasswordPolicy::Truncate).expect("valid cost");
        AuthService::new(
            Arc::new(MemoryStore::new()),
            HashingPool::new(credentials, 2),
            Arc::new(TokenService::with_default_ttl(SECRET).expect("secret")),
        )
        .expect("service")
    }

    #[tokio::test]
    async fn test_signup_stores_hash_not_password() {
        let service = service();
        let user = service
            .signup("alice@example.com", "correct-password")
            .await
            .expect("signup");

        assert_ne!(user.password_hash, "correct-password");
        assert!(user.password_hash.starts_with("$2"));
    }

    #[tokio::test]
    async fn test_signup_normalizes_email() {
        let service = service();
        let user = service
            .signup("  Alice@Example.com ", "pw")
            .await
            .expect("signup");
        assert_eq!(user.email, "alice@example.com");

        let err = service
            .signup("ALICE@example.com", "pw")
            .await
            .expect_err("duplicate");
        assert!(matches!(err, AppError::DuplicateIdentity));
    }

    #[tokio::test]
    async fn test_login_issues_token_for_identity() {
        let service = service();
        let user = service
            .signup("bob@example.com", "correct-password")
            .await
            .expect("signup");

        let token = service
            .login("bob@example.com", "correct-password")
            .await
            .expect("login");

        assert_eq!(token.token_type, "bearer");
        assert_eq!(
            service.tokens().verify(&token.access_token).expect("verify"),
            user.id
        );
    }

    #[tokio::test]
    async fn test_login_failures_are_uniform() {
        let service = service();
        service
            .signup("carol@example.com", "correct-password")
            .await
            .expect("signup");

        let wrong_password = service
            .login("carol@example.com", "Correct-Password")
            .await
            .expect_err("wrong password");
        let unknown_email = service
            .login("nobody@example.com", "correct-password")
            .await
            .expect_err("unknown email");

        assert!(matches!(wrong_password, AppError::InvalidCredentials));
        assert!(matches!(unknown_email, AppError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }

    #[tokio::test]
    async fn test_dummy_password_does_not_log_in_unknown_user() {
        let service = service();
        let err = service
            .login("ghost@example.com", DUMMY_PASSWORD)
            .await
            .expect_err("no such user");
        assert!(matches!(err, AppError::InvalidCredentials));
    }
}
