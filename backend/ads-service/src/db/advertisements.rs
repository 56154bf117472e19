/// Advertisement database operations
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::advertisement::Advertisement;

const AD_COLUMNS: &str = "id, title, description, price, author_id, created_at, updated_at";

pub async fn insert(
    pool: &PgPool,
    title: &str,
    description: &str,
    price: i64,
    author_id: Uuid,
) -> Result<Advertisement, AppError> {
    let ad = sqlx::query_as::<_, Advertisement>(&format!(
        r#"
        INSERT INTO advertisements (title, description, price, author_id)
        VALUES ($1, $2, $3, $4)
        RETURNING {AD_COLUMNS}
        "#
    ))
    .bind(title)
    .bind(description)
    .bind(price)
    .bind(author_id)
    .fetch_one(pool)
    .await?;

    Ok(ad)
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Advertisement>, AppError> {
    let ad = sqlx::query_as::<_, Advertisement>(&format!(
        "SELECT {AD_COLUMNS} FROM advertisements WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(ad)
}

/// Newest-first page of advertisements
pub async fn list(
    pool: &PgPool,
    limit: i64,
    offset: i64,
) -> Result<Vec<Advertisement>, AppError> {
    let ads = sqlx::query_as::<_, Advertisement>(&format!(
        r#"
        SELECT {AD_COLUMNS} FROM advertisements
        ORDER BY created_at DESC
        LIMIT $1 OFFSET $2
        "#
    ))
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(ads)
}

pub async fn count(pool: &PgPool) -> Result<i64, AppError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM advertisements")
        .fetch_one(pool)
        .await?;

    Ok(count)
}

/// Partial update; `created_at` is never rewritten
pub async fn update(
    pool: &PgPool,
    id: Uuid,
    title: Option<&str>,
    description: Option<&str>,
    price: Option<i64>,
) -> Result<Option<Advertisement>, AppError> {
    let ad = sqlx::query_as::<_, Advertisement>(&format!(
        r#"
        UPDATE advertisements
        SET title = COALESCE($1, title),
            description = COALESCE($2, description),
            price = COALESCE($3, price),
            updated_at = NOW()
        WHERE id = $4
        RETURNING {AD_COLUMNS}
        "#
    ))
    .bind(title)
    .bind(description)
    .bind(price)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(ad)
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM advertisements WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
