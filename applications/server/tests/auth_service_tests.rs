/// Authentication service tests
/// Tests JWT generation, password hashing, token validation
use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use musicapp_server::services::{AuthService, Claims};

fn create_test_auth_service() -> AuthService {
    AuthService::new("test-secret-key".to_string(), 1, 4)
}

/// Test password hashing produces valid bcrypt hashes
#[test]
fn test_password_hashing() {
    let auth_service = create_test_auth_service();

    let password = "MySecurePassword123!";
    let hash = auth_service.hash_password(password).unwrap();

    // Verify hash format (bcrypt starts with $2b$ or $2a$)
    assert!(hash.starts_with("$2b$") || hash.starts_with("$2a$"));
    assert_eq!(hash.len(), 60);

    // Verify the hash is different each time (salt is random)
    let hash2 = auth_service.hash_password(password).unwrap();
    assert_ne!(hash, hash2, "Hashes should differ due to random salt");
}

/// The configured cost is encoded in the hash
#[test]
fn test_password_hash_uses_configured_cost() {
    let auth_service = create_test_auth_service();

    let hash = auth_service.hash_password("password123").unwrap();
    assert_eq!(&hash[4..7], "04$");
}

#[test]
fn test_password_verification() {
    let auth_service = create_test_auth_service();

    let hash = auth_service.hash_password("MySecurePassword123!").unwrap();

    assert!(auth_service
        .verify_password("MySecurePassword123!", &hash)
        .unwrap());
    assert!(!auth_service.verify_password("WrongPassword", &hash).unwrap());
}

/// Test password verification with invalid hash format
#[test]
fn test_password_verification_invalid_hash() {
    let auth_service = create_test_auth_service();

    let result = auth_service.verify_password("password", "not-a-valid-hash");
    assert!(result.is_err(), "Invalid hash should return error");
}

/// Test JWT access token generation and validation
#[test]
fn test_access_token_generation_and_validation() {
    let auth_service = create_test_auth_service();

    let issued = auth_service.create_access_token(7).unwrap();
    assert!(!issued.token.is_empty(), "Token should not be empty");

    let claims = auth_service.verify_access_token(&issued.token).unwrap();
    assert_eq!(claims.user_id().unwrap(), 7);
    assert_eq!(claims.jti, issued.jti);

    // One hour lifetime
    assert_eq!(claims.exp - claims.iat, 3600);
}

#[test]
fn test_tokens_get_distinct_ids() {
    let auth_service = create_test_auth_service();

    let a = auth_service.create_access_token(1).unwrap();
    let b = auth_service.create_access_token(1).unwrap();
    assert_ne!(a.jti, b.jti);
    assert_ne!(a.token, b.token);
}

/// Test token signed with a different secret is rejected
#[test]
fn test_token_with_wrong_secret_rejected() {
    let issuer = AuthService::new("secret-one".to_string(), 1, 4);
    let verifier = AuthService::new("secret-two".to_string(), 1, 4);

    let issued = issuer.create_access_token(1).unwrap();
    assert!(verifier.verify_access_token(&issued.token).is_err());
}

/// Test expired token is rejected
#[test]
fn test_expired_token_rejected() {
    let auth_service = create_test_auth_service();

    // Past the default 60s leeway
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: "1".to_string(),
        exp: now - 3600,
        iat: now - 7200,
        jti: "expired".to_string(),
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"test-secret-key"),
    )
    .unwrap();

    assert!(auth_service.verify_access_token(&token).is_err());
}

#[test]
fn test_malformed_token_rejected() {
    let auth_service = create_test_auth_service();

    assert!(auth_service.verify_access_token("").is_err());
    assert!(auth_service.verify_access_token("a.b.c").is_err());
}

/// A token whose subject is not a user id cannot authenticate
#[test]
fn test_non_numeric_subject_rejected() {
    let claims = Claims {
        sub: "not-a-number".to_string(),
        exp: 0,
        iat: 0,
        jti: "x".to_string(),
    };
    assert!(claims.user_id().is_err());
}
