//! Signing secret strength checks
//!
//! HS256 is only as strong as its shared key, so the service grades
//! `JWT_SECRET` at startup before building a [`crate::TokenService`].

use crate::{CryptoError, Result};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::{rngs::OsRng, RngCore};

pub const MIN_SECRET_LENGTH: usize = 32; // 256 bits
const RECOMMENDED_SECRET_LENGTH: usize = 64;

const MIN_ENTROPY: f64 = 4.0;
const STRONG_ENTROPY: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretStrength {
    /// Refused in production
    Weak,
    /// Usable, logged as a warning
    Acceptable,
    Strong,
}

/// Grade a signing secret
///
/// **Criteria**:
/// - At least 32 bytes, 64 recommended
/// - Shannon entropy of at least 4 bits/byte (5 for `Strong`)
/// - No runs of four repeated or ascending bytes
pub fn validate_secret_strength(secret: &str) -> SecretStrength {
    let bytes = secret.as_bytes();

    if bytes.len() < MIN_SECRET_LENGTH {
        return SecretStrength::Weak;
    }

    let entropy = shannon_entropy(bytes);
    if entropy < MIN_ENTROPY || has_obvious_patterns(bytes) {
        return SecretStrength::Weak;
    }

    if bytes.len() >= RECOMMENDED_SECRET_LENGTH && entropy >= STRONG_ENTROPY {
        SecretStrength::Strong
    } else {
        SecretStrength::Acceptable
    }
}

/// Bits per byte, 0..=8
fn shannon_entropy(data: &[u8]) -> f64 {
    let mut freq = [0u32; 256];
    for &byte in data {
        freq[byte as usize] += 1;
    }

    let len = data.len() as f64;
    freq.iter()
        .filter(|&&count| count > 0)
        .map(|&count| {
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

fn has_obvious_patterns(data: &[u8]) -> bool {
    let mut same_run = 1;
    let mut seq_run = 1;

    for pair in data.windows(2) {
        same_run = if pair[0] == pair[1] { same_run + 1 } else { 1 };
        seq_run = if pair[1] as i16 - pair[0] as i16 == 1 {
            seq_run + 1
        } else {
            1
        };

        if same_run >= 4 || seq_run >= 4 {
            return true;
        }
    }

    false
}

/// Random secret for local setups and tests, base64url encoded
///
/// `length` is the number of random bytes before encoding.
pub fn generate_secure_secret(length: usize) -> Result<String> {
    if length < MIN_SECRET_LENGTH {
        return Err(CryptoError::SecretTooShort(MIN_SECRET_LENGTH));
    }

    let mut buffer = vec![0u8; length];
    OsRng.fill_bytes(&mut buffer);
    Ok(URL_SAFE_NO_PAD.encode(&buffer))
}
