/// Advertisement handlers
///
/// Listing is public; every other operation requires authentication, and
/// mutation additionally requires authorship or the administrator role.
use actix_web::{web, HttpResponse};
use auth_core::AuthenticatedUser;
use uuid::Uuid;
use validator::Validate;

use crate::{
    db,
    error::AppError,
    models::advertisement::{CreateAdvertisementRequest, UpdateAdvertisementRequest},
    pagination::{Page, PageQuery},
    permissions::ensure_can_modify,
    services::content_filter::ModeratedField,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/v1/ads",
    tag = "Advertisements",
    params(PageQuery),
    responses(
        (status = 200, description = "Paginated advertisements, newest first")
    )
)]
pub async fn list_ads(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    let count = db::advertisements::count(&state.db).await?;
    let ads = db::advertisements::list(&state.db, query.limit(), query.offset()).await?;

    Ok(HttpResponse::Ok().json(Page::new(count, &query, ads)))
}

#[utoipa::path(
    post,
    path = "/api/v1/ads",
    tag = "Advertisements",
    request_body = CreateAdvertisementRequest,
    responses(
        (status = 201, description = "Advertisement created", body = crate::models::Advertisement),
        (status = 400, description = "Invalid input or blocked content"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn create_ad(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    payload: web::Json<CreateAdvertisementRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;
    state
        .content_filter
        .validate_advertisement(&payload.title, &payload.description)?;

    let ad = db::advertisements::insert(
        &state.db,
        &payload.title,
        &payload.description,
        payload.price,
        user.id,
    )
    .await?;

    tracing::info!(ad_id = %ad.id, author_id = %user.id, "advertisement created");

    Ok(HttpResponse::Created().json(ad))
}

#[utoipa::path(
    get,
    path = "/api/v1/ads/{id}",
    tag = "Advertisements",
    responses(
        (status = 200, description = "Advertisement", body = crate::models::Advertisement),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_ad(
    state: web::Data<AppState>,
    _user: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let ad = db::advertisements::find_by_id(&state.db, path.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Advertisement not found".to_string()))?;

    Ok(HttpResponse::Ok().json(ad))
}

#[utoipa::path(
    patch,
    path = "/api/v1/ads/{id}",
    tag = "Advertisements",
    request_body = UpdateAdvertisementRequest,
    responses(
        (status = 200, description = "Updated advertisement", body = crate::models::Advertisement),
        (status = 400, description = "Invalid input or blocked content"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not the author or an administrator"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_ad(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    payload: web::Json<UpdateAdvertisementRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let existing = db::advertisements::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Advertisement not found".to_string()))?;

    ensure_can_modify(&user, existing.author_id)?;

    payload.validate()?;
    if let Some(title) = &payload.title {
        state.content_filter.validate(ModeratedField::Title, title)?;
    }
    if let Some(description) = &payload.description {
        state
            .content_filter
            .validate(ModeratedField::Description, description)?;
    }

    let updated = db::advertisements::update(
        &state.db,
        id,
        payload.title.as_deref(),
        payload.description.as_deref(),
        payload.price,
    )
    .await?
    .ok_or_else(|| AppError::NotFound("Advertisement not found".to_string()))?;

    Ok(HttpResponse::Ok().json(updated))
}

#[utoipa::path(
    delete,
    path = "/api/v1/ads/{id}",
    tag = "Advertisements",
    responses(
        (status = 204, description = "Deleted"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not the author or an administrator"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_ad(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let existing = db::advertisements::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Advertisement not found".to_string()))?;

    ensure_can_modify(&user, existing.author_id)?;

    db::advertisements::delete(&state.db, id).await?;
    tracing::info!(ad_id = %id, actor_id = %user.id, "advertisement deleted");

    Ok(HttpResponse::NoContent().finish())
}
