//! Shared credential and token primitives for the todo backend.
//!
//! - `password`: bcrypt hashing and verification of user passwords
//! - `jwt`: HS256 bearer token issuance and validation
//! - `secret`: strength checks for the token signing secret

pub mod jwt;
pub mod password;
pub mod secret;

pub use jwt::{Claims, IssuedToken, TokenService};
pub use password::{CredentialManager, OverlongPasswordPolicy, MAX_PASSWORD_BYTES};
pub use secret::{generate_secure_secret, validate_secret_strength, SecretStrength};

#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    /// Password exceeds the hashing ceiling and the policy rejects it.
    #[error("password exceeds {MAX_PASSWORD_BYTES} bytes")]
    PasswordTooLong,

    #[error("password hashing failed: {0}")]
    Hashing(String),

    #[error("signing secret must not be empty")]
    EmptySecret,

    #[error("secret must be at least {0} bytes")]
    SecretTooShort(usize),

    /// Token lifetime is not positive or pushes the expiry out of range.
    #[error("token lifetime out of range")]
    InvalidLifetime,

    #[error("token encoding failed: {0}")]
    TokenEncoding(String),

    /// Uniform verification failure. Expired, forged and malformed tokens all map here.
    #[error("invalid token")]
    InvalidToken,
}

pub type Result<T> = std::result::Result<T, CryptoError>;
