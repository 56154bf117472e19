/// Review handlers
///
/// Reviews hang off an advertisement. Reading requires authentication;
/// mutation follows the same author-or-admin rule as advertisements.
use actix_web::{web, HttpResponse};
use auth_core::AuthenticatedUser;
use uuid::Uuid;
use validator::Validate;

use crate::{
    db,
    error::AppError,
    models::review::{CreateReviewRequest, UpdateReviewRequest},
    pagination::{Page, PageQuery},
    permissions::ensure_can_modify,
    services::content_filter::ModeratedField,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/v1/ads/{ad_id}/reviews",
    tag = "Reviews",
    params(PageQuery),
    responses(
        (status = 200, description = "Paginated reviews for the advertisement, newest first"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_reviews(
    state: web::Data<AppState>,
    _user: AuthenticatedUser,
    path: web::Path<Uuid>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    let ad_id = path.into_inner();
    let count = db::reviews::count_for_ad(&state.db, ad_id).await?;
    let reviews =
        db::reviews::list_for_ad(&state.db, ad_id, query.limit(), query.offset()).await?;

    Ok(HttpResponse::Ok().json(Page::new(count, &query, reviews)))
}

#[utoipa::path(
    post,
    path = "/api/v1/ads/{ad_id}/reviews",
    tag = "Reviews",
    request_body = CreateReviewRequest,
    responses(
        (status = 201, description = "Review created", body = crate::models::Review),
        (status = 400, description = "Invalid input or blocked content"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Advertisement not found")
    )
)]
pub async fn create_review(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    payload: web::Json<CreateReviewRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;
    state
        .content_filter
        .validate(ModeratedField::Content, &payload.content)?;

    let ad_id = path.into_inner();
    if db::advertisements::find_by_id(&state.db, ad_id)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound("Advertisement not found".to_string()));
    }

    let review = db::reviews::insert(&state.db, &payload.content, ad_id, user.id).await?;
    tracing::info!(review_id = %review.id, ad_id = %ad_id, "review created");

    Ok(HttpResponse::Created().json(review))
}

#[utoipa::path(
    get,
    path = "/api/v1/reviews/{id}",
    tag = "Reviews",
    responses(
        (status = 200, description = "Review", body = crate::models::Review),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_review(
    state: web::Data<AppState>,
    _user: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let review = db::reviews::find_by_id(&state.db, path.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Review not found".to_string()))?;

    Ok(HttpResponse::Ok().json(review))
}

#[utoipa::path(
    patch,
    path = "/api/v1/reviews/{id}",
    tag = "Reviews",
    request_body = UpdateReviewRequest,
    responses(
        (status = 200, description = "Updated review", body = crate::models::Review),
        (status = 400, description = "Invalid input or blocked content"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not the author or an administrator"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_review(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    payload: web::Json<UpdateReviewRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let existing = db::reviews::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Review not found".to_string()))?;

    ensure_can_modify(&user, existing.author_id)?;

    payload.validate()?;
    state
        .content_filter
        .validate(ModeratedField::Content, &payload.content)?;

    let updated = db::reviews::update(&state.db, id, &payload.content)
        .await?
        .ok_or_else(|| AppError::NotFound("Review not found".to_string()))?;

    Ok(HttpResponse::Ok().json(updated))
}

#[utoipa::path(
    delete,
    path = "/api/v1/reviews/{id}",
    tag = "Reviews",
    responses(
        (status = 204, description = "Deleted"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not the author or an administrator"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_review(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let existing = db::reviews::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Review not found".to_string()))?;

    ensure_can_modify(&user, existing.author_id)?;

    db::reviews::delete(&state.db, id).await?;
    tracing::info!(review_id = %id, actor_id = %user.id, "review deleted");

    Ok(HttpResponse::NoContent().finish())
}
