//! JWT token issuance and validation for the ads backend
//!
//! HS256 with a single shared secret loaded from the environment. The
//! service issues short-lived access tokens plus long-lived refresh tokens;
//! both carry the user id, email, and role so that handlers never need a
//! database round-trip to authorize a request.
//!
//! ## Usage
//!
//! Call `initialize_jwt_secret()` once during startup before any JWT
//! operations:
//!
//! ```rust,no_run
//! use auth_core::jwt;
//!
//! let secret = std::env::var("JWT_SECRET").expect("JWT_SECRET required");
//! jwt::initialize_jwt_secret(&secret).expect("Failed to initialize JWT secret");
//! ```
use anyhow::{anyhow, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, Algorithm, DecodingKey, EncodingKey, Header, TokenData, Validation,
};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::role::UserRole;

// ============================================================================
// Constants
// ============================================================================

pub const ACCESS_TOKEN_EXPIRY_HOURS: i64 = 1;
pub const REFRESH_TOKEN_EXPIRY_DAYS: i64 = 30;

const JWT_ALGORITHM: Algorithm = Algorithm::HS256;

// ============================================================================
// Data Structures
// ============================================================================

/// JWT claims: standard claims plus the fields handlers authorize with
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID as UUID string)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Token type: "access" or "refresh"
    pub token_type: String,
    /// Email address
    pub email: String,
    /// Role name ("User" or "Administrator")
    pub role: String,
}

/// Token pair response structure
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

// ============================================================================
// Key Storage
// ============================================================================

// Keys are derived once from the secret at startup and never modified.
static JWT_ENCODING_KEY: OnceCell<EncodingKey> = OnceCell::new();
static JWT_DECODING_KEY: OnceCell<DecodingKey> = OnceCell::new();

// ============================================================================
// Initialization
// ============================================================================

/// Initialize JWT keys from the shared secret
///
/// MUST be called during application startup before any JWT operations.
/// Subsequent calls return an error.
pub fn initialize_jwt_secret(secret: &str) -> Result<()> {
    if secret.is_empty() {
        return Err(anyhow!("JWT secret must not be empty"));
    }

    JWT_ENCODING_KEY
        .set(EncodingKey::from_secret(secret.as_bytes()))
        .map_err(|_| anyhow!("JWT encoding key already initialized"))?;

    JWT_DECODING_KEY
        .set(DecodingKey::from_secret(secret.as_bytes()))
        .map_err(|_| anyhow!("JWT decoding key already initialized"))?;

    Ok(())
}

fn get_encoding_key() -> Result<&'static EncodingKey> {
    JWT_ENCODING_KEY.get().ok_or_else(|| {
        anyhow!("JWT secret not initialized. Call initialize_jwt_secret() during startup.")
    })
}

fn get_decoding_key() -> Result<&'static DecodingKey> {
    JWT_DECODING_KEY.get().ok_or_else(|| {
        anyhow!("JWT secret not initialized. Call initialize_jwt_secret() during startup.")
    })
}

// ============================================================================
// Token Generation
// ============================================================================

/// Generate a new access token (1 hour lifetime)
pub fn generate_access_token(user_id: Uuid, email: &str, role: UserRole) -> Result<String> {
    let now = Utc::now();
    let expiry = now + Duration::hours(ACCESS_TOKEN_EXPIRY_HOURS);

    let claims = Claims {
        sub: user_id.to_string(),
        iat: now.timestamp(),
        exp: expiry.timestamp(),
        token_type: "access".to_string(),
        email: email.to_string(),
        role: role.as_str().to_string(),
    };

    let encoding_key = get_encoding_key()?;
    encode(&Header::new(JWT_ALGORITHM), &claims, encoding_key)
        .map_err(|e| anyhow!("Failed to generate access token: {e}"))
}

/// Generate a new refresh token (30 day lifetime)
///
/// Refresh tokens are only accepted by the refresh endpoint; the extractor
/// rejects them for API access.
pub fn generate_refresh_token(user_id: Uuid, email: &str, role: UserRole) -> Result<String> {
    let now = Utc::now();
    let expiry = now + Duration::days(REFRESH_TOKEN_EXPIRY_DAYS);

    let claims = Claims {
        sub: user_id.to_string(),
        iat: now.timestamp(),
        exp: expiry.timestamp(),
        token_type: "refresh".to_string(),
        email: email.to_string(),
        role: role.as_str().to_string(),
    };

    let encoding_key = get_encoding_key()?;
    encode(&Header::new(JWT_ALGORITHM), &claims, encoding_key)
        .map_err(|e| anyhow!("Failed to generate refresh token: {e}"))
}

/// Generate both access and refresh tokens in one call
pub fn generate_token_pair(user_id: Uuid, email: &str, role: UserRole) -> Result<TokenPair> {
    let access_token = generate_access_token(user_id, email, role)?;
    let refresh_token = generate_refresh_token(user_id, email, role)?;

    Ok(TokenPair {
        access_token,
        refresh_token,
        token_type: "Bearer".to_string(),
        expires_in: ACCESS_TOKEN_EXPIRY_HOURS * 3600,
    })
}

// ============================================================================
// Token Validation
// ============================================================================

/// Validate and decode a JWT token
///
/// Verifies the HS256 signature and the expiration claim. Callers that need
/// an access token specifically must also check `claims.token_type`.
pub fn validate_token(token: &str) -> Result<TokenData<Claims>> {
    let decoding_key = get_decoding_key()?;

    let mut validation = Validation::new(JWT_ALGORITHM);
    validation.validate_exp = true;

    decode::<Claims>(token, decoding_key, &validation)
        .map_err(|e| anyhow!("Token validation failed: {e}"))
}

/// Extract user ID from a validated token
pub fn get_user_id_from_token(token: &str) -> Result<Uuid> {
    let token_data = validate_token(token)?;
    Uuid::parse_str(&token_data.claims.sub)
        .map_err(|e| anyhow!("Invalid user ID format in token: {e}"))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // Other test modules in this crate may have initialized the keys
    // already, so tolerate a prior initialization instead of unwrapping.
    pub(crate) fn init_test_secret() {
        if JWT_ENCODING_KEY.get().is_none() {
            let _ = initialize_jwt_secret("test-secret-for-unit-tests");
        }
    }

    #[test]
    fn test_generate_access_token() {
        init_test_secret();

        let user_id = Uuid::new_v4();
        let token = generate_access_token(user_id, "test@example.com", UserRole::User);

        assert!(token.is_ok());
        let token_str = token.unwrap();
        assert_eq!(token_str.matches('.').count(), 2); // JWT has 3 parts
    }

    #[test]
    fn test_validate_valid_token() {
        init_test_secret();

        let user_id = Uuid::new_v4();
        let token = generate_access_token(user_id, "test@example.com", UserRole::Administrator)
            .expect("Failed to generate token");

        let token_data = validate_token(&token).expect("token should validate");
        assert_eq!(token_data.claims.sub, user_id.to_string());
        assert_eq!(token_data.claims.email, "test@example.com");
        assert_eq!(token_data.claims.token_type, "access");
        assert_eq!(token_data.claims.role, "Administrator");
    }

    #[test]
    fn test_validate_invalid_token() {
        init_test_secret();

        let result = validate_token("invalid.token.here");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_tampered_token() {
        init_test_secret();

        let user_id = Uuid::new_v4();
        let token = generate_access_token(user_id, "test@example.com", UserRole::User)
            .expect("Failed to generate token");

        // Flip the first character of the signature segment. A blanket
        // `replace('a', "b")` is a no-op whenever the token happens to
        // contain no 'a', which made this test flaky.
        let sig_start = token.rfind('.').expect("JWT has a signature segment") + 1;
        let mut tampered = token.clone();
        let replacement = if &tampered[sig_start..=sig_start] == "A" { "B" } else { "A" };
        tampered.replace_range(sig_start..=sig_start, replacement);
        let result = validate_token(&tampered);
        assert!(result.is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        init_test_secret();

        let now = Utc::now();
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            iat: (now - Duration::hours(2)).timestamp(),
            exp: (now - Duration::hours(1)).timestamp(),
            token_type: "access".to_string(),
            email: "test@example.com".to_string(),
            role: "User".to_string(),
        };
        let token = encode(
            &Header::new(JWT_ALGORITHM),
            &claims,
            &EncodingKey::from_secret(b"test-secret-for-unit-tests"),
        )
        .unwrap();

        assert!(validate_token(&token).is_err());
    }

    #[test]
    fn test_extract_user_id() {
        init_test_secret();

        let user_id = Uuid::new_v4();
        let token = generate_access_token(user_id, "test@example.com", UserRole::User)
            .expect("Failed to generate token");

        let extracted = get_user_id_from_token(&token);
        assert_eq!(extracted.unwrap(), user_id);
    }

    #[test]
    fn test_token_pair_generation() {
        init_test_secret();

        let user_id = Uuid::new_v4();
        let tokens = generate_token_pair(user_id, "test@example.com", UserRole::User)
            .expect("Failed to generate token pair");

        assert!(!tokens.access_token.is_empty());
        assert!(!tokens.refresh_token.is_empty());
        assert_eq!(tokens.token_type, "Bearer");
        assert_eq!(tokens.expires_in, 3600);

        let access_claims = validate_token(&tokens.access_token).unwrap().claims;
        let refresh_claims = validate_token(&tokens.refresh_token).unwrap().claims;
        assert_eq!(access_claims.token_type, "access");
        assert_eq!(refresh_claims.token_type, "refresh");
        assert!(refresh_claims.exp > access_claims.exp);
    }

    #[test]
    fn test_empty_secret_rejected() {
        assert!(initialize_jwt_secret("").is_err());
    }

    #[test]
    fn test_init_helper_tolerates_prior_initialization() {
        // Simulate another module having set the keys first
        let _ = initialize_jwt_secret("test-secret-for-unit-tests");
        init_test_secret();
        init_test_secret();

        let token = generate_access_token(Uuid::new_v4(), "test@example.com", UserRole::User);
        assert!(token.is_ok());
    }
}
