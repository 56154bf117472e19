/// Profile handlers
use actix_web::{web, HttpResponse};
use auth_core::AuthenticatedUser;
use validator::Validate;

use crate::{
    db,
    error::AppError,
    models::user::{PublicUser, UpdateProfileRequest},
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    tag = "Users",
    responses(
        (status = 200, description = "Current user profile", body = PublicUser),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn get_me(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let user = db::users::find_by_id(&state.db, user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(HttpResponse::Ok().json(PublicUser::from(user)))
}

#[utoipa::path(
    patch,
    path = "/api/v1/users/me",
    tag = "Users",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated profile", body = PublicUser),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn update_me(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    payload: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let updated = db::users::update_profile(
        &state.db,
        user.id,
        payload.first_name.as_deref(),
        payload.last_name.as_deref(),
        payload.phone.as_deref(),
        payload.avatar_url.as_deref(),
    )
    .await?
    .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(HttpResponse::Ok().json(PublicUser::from(updated)))
}
