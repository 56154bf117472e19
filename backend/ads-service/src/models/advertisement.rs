use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Advertisement row
///
/// `author_id` goes NULL when the author account is deleted; the listing
/// itself survives. `created_at` is set once on insert and never updated.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, utoipa::ToSchema)]
pub struct Advertisement {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub price: i64,
    pub author_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, utoipa::ToSchema)]
pub struct CreateAdvertisementRequest {
    #[validate(length(min = 1, max = 100))]
    pub title: String,
    #[validate(length(min = 1, max = 255))]
    pub description: String,
    #[validate(range(min = 0))]
    pub price: i64,
}

/// Partial update; absent fields keep their stored values
#[derive(Debug, Deserialize, Validate, utoipa::ToSchema)]
pub struct UpdateAdvertisementRequest {
    #[validate(length(min = 1, max = 100))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub description: Option<String>,
    #[validate(range(min = 0))]
    pub price: Option<i64>,
}
