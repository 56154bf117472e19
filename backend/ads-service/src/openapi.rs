/// OpenAPI documentation
use actix_web::HttpResponse;
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Ads Service API",
        description = "Classifieds marketplace backend: advertisements, reviews, users",
        version = "0.1.0"
    ),
    paths(
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::refresh,
        handlers::auth::request_password_reset,
        handlers::auth::confirm_password_reset,
        handlers::users::get_me,
        handlers::users::update_me,
        handlers::ads::list_ads,
        handlers::ads::create_ad,
        handlers::ads::get_ad,
        handlers::ads::update_ad,
        handlers::ads::delete_ad,
        handlers::reviews::list_reviews,
        handlers::reviews::create_review,
        handlers::reviews::get_review,
        handlers::reviews::update_review,
        handlers::reviews::delete_review,
    ),
    components(schemas(
        models::user::RegisterRequest,
        models::user::LoginRequest,
        models::user::RefreshTokenRequest,
        models::user::UpdateProfileRequest,
        models::user::RequestPasswordResetRequest,
        models::user::ResetPasswordRequest,
        models::user::PublicUser,
        models::advertisement::Advertisement,
        models::advertisement::CreateAdvertisementRequest,
        models::advertisement::UpdateAdvertisementRequest,
        models::review::Review,
        models::review::CreateReviewRequest,
        models::review::UpdateReviewRequest,
        handlers::auth::AuthResponse,
        auth_core::jwt::TokenPair,
        auth_core::UserRole,
    )),
    tags(
        (name = "Auth", description = "Registration, login, tokens, password reset"),
        (name = "Users", description = "Profile management"),
        (name = "Advertisements", description = "Listing CRUD"),
        (name = "Reviews", description = "Reviews attached to advertisements")
    )
)]
pub struct ApiDoc;

/// Serve the OpenAPI document as JSON
pub async fn serve_openapi() -> HttpResponse {
    HttpResponse::Ok().json(ApiDoc::openapi())
}
