/// Integration tests for crypto-core token and credential handling
///
/// This test module covers:
/// - Token issuance and validation
/// - Expiry without leeway
/// - Rejection of forged, re-signed and malformed tokens
/// - The signup/login credential lifecycle end to end
use chrono::{Duration, Utc};
use crypto_core::jwt::Claims;
use crypto_core::{
    generate_secure_secret, CredentialManager, CryptoError, OverlongPasswordPolicy, TokenService,
};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};

const TEST_SECRET: &str = "J8Kq2mPvRx4TnZs9YwLcGf7DhBe3Xa6W";

fn token_service() -> TokenService {
    TokenService::with_default_ttl(TEST_SECRET).expect("Failed to build token service")
}

fn assert_invalid(result: Result<i64, CryptoError>) {
    assert!(
        matches!(result, Err(CryptoError::InvalidToken)),
        "expected InvalidToken, got {result:?}"
    );
}

// ============================================================================
// Validation Tests
// ============================================================================

#[test]
fn test_validate_valid_token() {
    let service = token_service();
    let issued = service.issue(42).expect("Should issue token");

    assert_eq!(service.verify(&issued.token).expect("Should verify"), 42);
}

#[test]
fn test_token_signed_with_other_secret_rejected() {
    let issuer = token_service();
    let other_secret = generate_secure_secret(48).expect("Should generate secret");
    let verifier = TokenService::with_default_ttl(&other_secret).expect("Should build");

    let issued = issuer.issue(42).expect("Should issue token");
    assert_invalid(verifier.verify(&issued.token));
}

#[test]
fn test_validate_tampered_token() {
    let service = token_service();
    let token = service.issue(42).expect("Should issue token").token;

    // Flip the first character of the claims segment.
    let payload_start = token.find('.').expect("three-part token") + 1;
    let original = token.as_bytes()[payload_start] as char;
    let replacement = if original == 'f' { "e" } else { "f" };
    let mut tampered = token.clone();
    tampered.replace_range(payload_start..payload_start + 1, replacement);

    assert_ne!(tampered, token);
    assert_invalid(service.verify(&tampered));
}

#[test]
fn test_validate_malformed_token() {
    let service = token_service();

    for malformed in ["", "invalid", "invalid.token", "invalid.token.here", "a.b.c.d"] {
        assert_invalid(service.verify(malformed));
    }
}

#[test]
fn test_other_algorithm_rejected() {
    let service = token_service();
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: "42".to_string(),
        iat: now,
        exp: now + 600,
    };

    let resigned = encode(
        &Header::new(Algorithm::HS512),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .expect("Should encode");

    assert_invalid(service.verify(&resigned));
}

#[test]
fn test_missing_subject_rejected() {
    #[derive(serde::Serialize)]
    struct NoSubject {
        iat: i64,
        exp: i64,
    }

    let service = token_service();
    let now = Utc::now().timestamp();
    let token = encode(
        &Header::new(Algorithm::HS256),
        &NoSubject {
            iat: now,
            exp: now + 600,
        },
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .expect("Should encode");

    assert_invalid(service.verify(&token));
}

// ============================================================================
// Expiration Tests
// ============================================================================

#[test]
fn test_zero_ttl_token_rejected_after_one_second() {
    let service = token_service();
    let issued = service
        .issue_with_ttl(42, Duration::zero())
        .expect("Should issue token");

    std::thread::sleep(std::time::Duration::from_millis(1100));

    assert_invalid(service.verify(&issued.token));
}

#[test]
fn test_token_accepted_before_expiry() {
    let service = TokenService::new(TEST_SECRET, Duration::seconds(5)).expect("Should build");
    let issued = service.issue(9).expect("Should issue token");

    assert!(issued.expires_at > Utc::now());
    assert_eq!(service.verify(&issued.token).expect("Should verify"), 9);
}

// ============================================================================
// Lifecycle Tests
// ============================================================================

#[test]
fn test_complete_credential_lifecycle() {
    let credentials = CredentialManager::new(4, OverlongPasswordPolicy::Truncate)
        .expect("Should build credential manager");
    let tokens = token_service();

    // Signup stores only the hash
    let stored_hash = credentials.hash("correct-password").expect("Should hash");
    assert_ne!(stored_hash, "correct-password");

    // Login succeeds only with the exact password
    assert!(!credentials.verify("Correct-Password", &stored_hash));
    assert!(credentials.verify("correct-password", &stored_hash));

    // The token identifies the user on later requests
    let issued = tokens.issue(1001).expect("Should issue token");
    assert_eq!(tokens.verify(&issued.token).expect("Should verify"), 1001);
}
