/// Bearer token issuance and validation
///
/// Tokens are HS256-signed JWTs whose claims carry the identity id (`sub`),
/// the issue time and an absolute expiry. Nothing is stored server-side: a
/// token is accepted exactly when its signature matches the configured secret
/// and its expiry has not passed.
///
/// ## Security Design
///
/// - **One algorithm**: validation only accepts HS256, so tokens re-signed
///   with another algorithm (or `none`) are rejected
/// - **Injected secret**: the key is handed to [`TokenService::new`] once at
///   startup and never mutated afterwards
/// - **Uniform failure**: every rejection surfaces as
///   [`CryptoError::InvalidToken`]; the concrete cause is only logged
use crate::{CryptoError, Result};
use chrono::{DateTime, Duration, SubsecRound, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt;

const JWT_ALGORITHM: Algorithm = Algorithm::HS256;

pub const DEFAULT_ACCESS_TOKEN_TTL_MINUTES: i64 = 30;

/// JWT claim set
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject (identity id as decimal string)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// A freshly signed token and when it stops being accepted
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    /// Lifetime in seconds at the moment of issue
    pub expires_in: i64,
}

#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    default_ttl: Duration,
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("algorithm", &JWT_ALGORITHM)
            .field("default_ttl", &self.default_ttl)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    /// Build a token service around a signing secret
    ///
    /// ## Errors
    ///
    /// Returns `CryptoError::EmptySecret` if `secret` is empty and
    /// `CryptoError::InvalidLifetime` if `default_ttl` is not positive. Strength
    /// is checked separately by [`crate::secret::validate_secret_strength`].
    pub fn new(secret: &str, default_ttl: Duration) -> Result<Self> {
        if secret.is_empty() {
            return Err(CryptoError::EmptySecret);
        }
        if default_ttl <= Duration::zero() {
            return Err(CryptoError::InvalidLifetime);
        }

        let mut validation = Validation::new(JWT_ALGORITHM);
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            default_ttl,
        })
    }

    /// Token service with the standard 30 minute lifetime
    pub fn with_default_ttl(secret: &str) -> Result<Self> {
        Self::new(secret, Duration::minutes(DEFAULT_ACCESS_TOKEN_TTL_MINUTES))
    }

    /// Issue a token for `identity_id` that expires after the default lifetime
    pub fn issue(&self, identity_id: i64) -> Result<IssuedToken> {
        self.issue_with_ttl(identity_id, self.default_ttl)
    }

    /// Issue a token with an explicit lifetime
    ///
    /// `exp` has whole-second granularity, so both the issue time and the
    /// expiry are rounded down to the second and `expires_at` reports the
    /// rounded expiry. A zero lifetime yields a token that is rejected as soon
    /// as the current second has passed.
    ///
    /// ## Errors
    ///
    /// `CryptoError::InvalidLifetime` if `now + ttl` is out of range.
    pub fn issue_with_ttl(&self, identity_id: i64, ttl: Duration) -> Result<IssuedToken> {
        let now = Utc::now().trunc_subsecs(0);
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or(CryptoError::InvalidLifetime)?
            .trunc_subsecs(0);

        let claims = Claims {
            sub: identity_id.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(JWT_ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| CryptoError::TokenEncoding(e.to_string()))?;

        Ok(IssuedToken {
            token,
            expires_at,
            expires_in: (expires_at - now).num_seconds(),
        })
    }

    /// Validate a token and return its claims
    ///
    /// ## Errors
    ///
    /// `CryptoError::InvalidToken` for a bad signature, a foreign algorithm,
    /// malformed structure, missing claims or an expired token.
    pub fn decode_claims(&self, token: &str) -> Result<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(reason = ?e.kind(), "token rejected");
                CryptoError::InvalidToken
            })
    }

    /// Validate a token and return the identity id it was issued for
    pub fn verify(&self, token: &str) -> Result<i64> {
        let claims = self.decode_claims(token)?;
        claims.sub.parse::<i64>().map_err(|_| {
            tracing::debug!("token subject is not an identity id");
            CryptoError::InvalidToken
        })
    }
}
