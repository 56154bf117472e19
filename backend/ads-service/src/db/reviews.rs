/// Review database operations
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::review::Review;

const REVIEW_COLUMNS: &str = "id, content, ad_id, author_id, created_at, updated_at";

pub async fn insert(
    pool: &PgPool,
    content: &str,
    ad_id: Uuid,
    author_id: Uuid,
) -> Result<Review, AppError> {
    let review = sqlx::query_as::<_, Review>(&format!(
        r#"
        INSERT INTO reviews (content, ad_id, author_id)
        VALUES ($1, $2, $3)
        RETURNING {REVIEW_COLUMNS}
        "#
    ))
    .bind(content)
    .bind(ad_id)
    .bind(author_id)
    .fetch_one(pool)
    .await?;

    Ok(review)
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Review>, AppError> {
    let review = sqlx::query_as::<_, Review>(&format!(
        "SELECT {REVIEW_COLUMNS} FROM reviews WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(review)
}

/// Newest-first page of reviews for one advertisement
pub async fn list_for_ad(
    pool: &PgPool,
    ad_id: Uuid,
    limit: i64,
    offset: i64,
) -> Result<Vec<Review>, AppError> {
    let reviews = sqlx::query_as::<_, Review>(&format!(
        r#"
        SELECT {REVIEW_COLUMNS} FROM reviews
        WHERE ad_id = $1
        ORDER BY created_at DESC
        LIMIT $2 OFFSET $3
        "#
    ))
    .bind(ad_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(reviews)
}

pub async fn count_for_ad(pool: &PgPool, ad_id: Uuid) -> Result<i64, AppError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reviews WHERE ad_id = $1")
        .bind(ad_id)
        .fetch_one(pool)
        .await?;

    Ok(count)
}

pub async fn update(pool: &PgPool, id: Uuid, content: &str) -> Result<Option<Review>, AppError> {
    let review = sqlx::query_as::<_, Review>(&format!(
        r#"
        UPDATE reviews
        SET content = $1, updated_at = NOW()
        WHERE id = $2
        RETURNING {REVIEW_COLUMNS}
        "#
    ))
    .bind(content)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(review)
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
