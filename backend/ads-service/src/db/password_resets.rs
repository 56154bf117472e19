/// Password reset token operations
///
/// Raw tokens are only ever held in memory and mailed to the user; the
/// database stores SHA-256 hashes. Tokens are single-use and expire after
/// 24 hours.
use chrono::{DateTime, Duration, Utc};
use rand::{distributions::Alphanumeric, Rng};
use sha2::{Digest, Sha256};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppError;

const TOKEN_EXPIRY_HOURS: i64 = 24;

/// Token length (before hashing)
const TOKEN_LENGTH: usize = 32;

/// Result of creating a password reset token
#[derive(Debug)]
pub struct CreateTokenResult {
    /// The raw token, to be sent to the user via email
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

fn generate_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

/// Create a new reset token for a user, invalidating any unused prior tokens
pub async fn create_reset_token(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<CreateTokenResult, AppError> {
    invalidate_user_tokens(pool, user_id).await?;

    let raw_token = generate_token();
    let token_hash = hash_token(&raw_token);
    let expires_at = Utc::now() + Duration::hours(TOKEN_EXPIRY_HOURS);

    sqlx::query(
        r#"
        INSERT INTO password_reset_tokens (user_id, token_hash, expires_at)
        VALUES ($1, $2, $3)
        "#,
    )
    .bind(user_id)
    .bind(&token_hash)
    .bind(expires_at)
    .execute(pool)
    .await?;

    Ok(CreateTokenResult {
        token: raw_token,
        expires_at,
    })
}

/// Validate a reset token, returning the associated user id
///
/// `None` means unknown, already used, or expired; callers must not
/// distinguish these cases in responses.
pub async fn validate_reset_token(pool: &PgPool, token: &str) -> Result<Option<Uuid>, AppError> {
    let token_hash = hash_token(token);

    let result = sqlx::query_as::<_, (Uuid,)>(
        r#"
        SELECT user_id FROM password_reset_tokens
        WHERE token_hash = $1
          AND is_used = FALSE
          AND expires_at > NOW()
        "#,
    )
    .bind(&token_hash)
    .fetch_optional(pool)
    .await?;

    Ok(result.map(|(user_id,)| user_id))
}

/// Mark a reset token as used after the password change succeeded
pub async fn mark_token_used(pool: &PgPool, token: &str) -> Result<bool, AppError> {
    let token_hash = hash_token(token);

    let result = sqlx::query(
        r#"
        UPDATE password_reset_tokens
        SET is_used = TRUE, used_at = NOW()
        WHERE token_hash = $1
          AND is_used = FALSE
          AND expires_at > NOW()
        "#,
    )
    .bind(&token_hash)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

async fn invalidate_user_tokens(pool: &PgPool, user_id: Uuid) -> Result<(), AppError> {
    sqlx::query(
        r#"
        UPDATE password_reset_tokens
        SET is_used = TRUE, used_at = NOW()
        WHERE user_id = $1 AND is_used = FALSE
        "#,
    )
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_tokens_are_unique_and_sized() {
        let a = generate_token();
        let b = generate_token();
        assert_eq!(a.len(), TOKEN_LENGTH);
        assert_eq!(b.len(), TOKEN_LENGTH);
        assert_ne!(a, b);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_token_hash_is_stable_hex() {
        let token = "abcDEF123";
        let h1 = hash_token(token);
        let h2 = hash_token(token);
        assert_eq!(h1, h2);
        assert_eq!(h1.len(), 64);
        assert!(h1.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(h1, hash_token("abcDEF124"));
    }
}
