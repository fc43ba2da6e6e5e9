/// Password hashing and verification using bcrypt
use crate::{CryptoError, Result};
use serde::Deserialize;

/// bcrypt only reads the first 72 bytes of its input.
pub const MAX_PASSWORD_BYTES: usize = 72;

const MIN_COST: u32 = 4;
const MAX_COST: u32 = 31;

/// What to do with a password longer than [`MAX_PASSWORD_BYTES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlongPasswordPolicy {
    /// Hash only the first 72 bytes. Passwords sharing that prefix are equivalent.
    #[default]
    Truncate,
    /// Refuse to hash; the caller surfaces a validation error.
    Reject,
}

/// Hashes raw passwords into self-describing bcrypt strings and checks them later.
///
/// Every call blocks for the duration of the configured work factor. Async
/// callers should run it on a blocking pool.
#[derive(Debug, Clone)]
pub struct CredentialManager {
    cost: u32,
    policy: OverlongPasswordPolicy,
}

impl CredentialManager {
    /// ## Errors
    ///
    /// Returns `CryptoError::Hashing` when `cost` is outside bcrypt's 4..=31 range.
    pub fn new(cost: u32, policy: OverlongPasswordPolicy) -> Result<Self> {
        if !(MIN_COST..=MAX_COST).contains(&cost) {
            return Err(CryptoError::Hashing(format!(
                "bcrypt cost {cost} outside {MIN_COST}..={MAX_COST}"
            )));
        }
        Ok(Self { cost, policy })
    }

    /// Hash a password with a fresh random salt
    ///
    /// The returned string embeds algorithm version, cost and salt, so hashing
    /// the same password twice yields two different strings that both verify.
    pub fn hash(&self, raw_password: &str) -> Result<String> {
        let input = self.effective_input(raw_password)?;
        bcrypt::hash(input, self.cost).map_err(|e| CryptoError::Hashing(e.to_string()))
    }

    /// Check a password against a stored hash
    ///
    /// Malformed hashes and internal errors read as a mismatch.
    pub fn verify(&self, raw_password: &str, stored_hash: &str) -> bool {
        let Ok(input) = self.effective_input(raw_password) else {
            return false;
        };

        match bcrypt::verify(input, stored_hash) {
            Ok(matches) => matches,
            Err(e) => {
                tracing::debug!(error = %e, "stored password hash could not be checked");
                false
            }
        }
    }

    fn effective_input<'a>(&self, raw_password: &'a str) -> Result<&'a [u8]> {
        let bytes = raw_password.as_bytes();
        if bytes.len() <= MAX_PASSWORD_BYTES {
            return Ok(bytes);
        }
        match self.policy {
            OverlongPasswordPolicy::Truncate => Ok(&bytes[..MAX_PASSWORD_BYTES]),
            OverlongPasswordPolicy::Reject => Err(CryptoError::PasswordTooLong),
        }
    }
}
