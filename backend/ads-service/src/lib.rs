/// Ads service library
///
/// CRUD backend for a classifieds marketplace: users post advertisements,
/// other users review them. Writes pass through a blocked-term content
/// filter, and mutation is restricted to the author or an administrator.
use actix_web::{web, HttpResponse};
use sqlx::PgPool;

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod openapi;
pub mod pagination;
pub mod permissions;
pub mod security;
pub mod services;

use services::content_filter::ContentFilter;
use services::email::EmailService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub email: EmailService,
    pub content_filter: ContentFilter,
}

/// Health check endpoint
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "ads-service"
    }))
}

/// Route table
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check)).service(
        web::scope("/api/v1")
            .route("/openapi.json", web::get().to(openapi::serve_openapi))
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(handlers::auth::register))
                    .route("/login", web::post().to(handlers::auth::login))
                    .route("/refresh", web::post().to(handlers::auth::refresh))
                    .route(
                        "/password-reset/request",
                        web::post().to(handlers::auth::request_password_reset),
                    )
                    .route(
                        "/password-reset/confirm",
                        web::post().to(handlers::auth::confirm_password_reset),
                    ),
            )
            .service(
                web::scope("/users")
                    .route("/me", web::get().to(handlers::users::get_me))
                    .route("/me", web::patch().to(handlers::users::update_me)),
            )
            .service(
                web::scope("/ads")
                    .route("", web::get().to(handlers::ads::list_ads))
                    .route("", web::post().to(handlers::ads::create_ad))
                    .route("/{id}", web::get().to(handlers::ads::get_ad))
                    .route("/{id}", web::patch().to(handlers::ads::update_ad))
                    .route("/{id}", web::delete().to(handlers::ads::delete_ad))
                    .route(
                        "/{ad_id}/reviews",
                        web::get().to(handlers::reviews::list_reviews),
                    )
                    .route(
                        "/{ad_id}/reviews",
                        web::post().to(handlers::reviews::create_review),
                    ),
            )
            .service(
                web::scope("/reviews")
                    .route("/{id}", web::get().to(handlers::reviews::get_review))
                    .route("/{id}", web::patch().to(handlers::reviews::update_review))
                    .route(
                        "/{id}",
                        web::delete().to(handlers::reviews::delete_review),
                    ),
            ),
    );
}
