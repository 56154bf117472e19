/// Authentication handlers: registration, login, token refresh, password reset
use actix_web::{web, HttpResponse};
use auth_core::jwt;
use serde::Serialize;
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    db,
    error::AppError,
    models::user::{
        LoginRequest, NewUser, PublicUser, RefreshTokenRequest, RegisterRequest,
        RequestPasswordResetRequest, ResetPasswordRequest,
    },
    security::password,
    AppState,
};

/// Registration/login response carrying the profile and a token pair
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub user: PublicUser,
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

impl AuthResponse {
    fn new(user: PublicUser, tokens: jwt::TokenPair) -> Self {
        AuthResponse {
            user,
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            token_type: tokens.token_type,
            expires_in: tokens.expires_in,
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    tag = "Auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = AuthResponse),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn register(
    state: web::Data<AppState>,
    payload: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    if db::users::find_by_email(&state.db, &payload.email)
        .await?
        .is_some()
    {
        return Err(AppError::EmailAlreadyExists);
    }

    let password_hash = password::hash_password(&payload.password)?;
    let user = db::users::insert(
        &state.db,
        &NewUser {
            email: payload.email.clone(),
            password_hash,
            first_name: payload.first_name.clone(),
            last_name: payload.last_name.clone(),
            phone: payload.phone.clone(),
            role: auth_core::UserRole::User,
        },
    )
    .await?;

    let tokens = jwt::generate_token_pair(user.id, &user.email, user.role)?;
    tracing::info!(user_id = %user.id, "user registered");

    Ok(HttpResponse::Created().json(AuthResponse::new(user.into(), tokens)))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated", body = AuthResponse),
        (status = 401, description = "Invalid email or password")
    )
)]
pub async fn login(
    state: web::Data<AppState>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let user = db::users::find_by_email(&state.db, &payload.email)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    if !password::verify_password(&payload.password, &user.password_hash)? {
        return Err(AppError::InvalidCredentials);
    }

    let tokens = jwt::generate_token_pair(user.id, &user.email, user.role)?;

    Ok(HttpResponse::Ok().json(AuthResponse::new(user.into(), tokens)))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/refresh",
    tag = "Auth",
    request_body = RefreshTokenRequest,
    responses(
        (status = 200, description = "New token pair", body = jwt::TokenPair),
        (status = 401, description = "Invalid or expired refresh token")
    )
)]
pub async fn refresh(
    state: web::Data<AppState>,
    payload: web::Json<RefreshTokenRequest>,
) -> Result<HttpResponse, AppError> {
    let invalid = || AppError::Unauthorized("Invalid or expired refresh token".to_string());

    let token_data = jwt::validate_token(&payload.refresh_token).map_err(|_| invalid())?;

    if token_data.claims.token_type != "refresh" {
        return Err(invalid());
    }

    let user_id = Uuid::parse_str(&token_data.claims.sub).map_err(|_| invalid())?;

    // The account must still exist; role may have changed since issuance
    let user = db::users::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(invalid)?;

    let tokens = jwt::generate_token_pair(user.id, &user.email, user.role)?;

    Ok(HttpResponse::Ok().json(tokens))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/password-reset/request",
    tag = "Auth",
    request_body = RequestPasswordResetRequest,
    responses(
        (status = 202, description = "Reset request accepted")
    )
)]
pub async fn request_password_reset(
    state: web::Data<AppState>,
    payload: web::Json<RequestPasswordResetRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    // Always 202 so the endpoint never discloses whether an email exists
    if let Some(user) = db::users::find_by_email(&state.db, &payload.email).await? {
        let created = db::password_resets::create_reset_token(&state.db, user.id).await?;
        if let Err(e) = state
            .email
            .send_password_reset_email(&user.email, &created.token)
            .await
        {
            tracing::error!(user_id = %user.id, "failed to send reset email: {}", e);
        }
    }

    Ok(HttpResponse::Accepted().json(json!({ "status": "accepted" })))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/password-reset/confirm",
    tag = "Auth",
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, description = "Password updated"),
        (status = 400, description = "Invalid or expired token")
    )
)]
pub async fn confirm_password_reset(
    state: web::Data<AppState>,
    payload: web::Json<ResetPasswordRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let user_id = db::password_resets::validate_reset_token(&state.db, &payload.token)
        .await?
        .ok_or(AppError::InvalidToken)?;

    let password_hash = password::hash_password(&payload.new_password)?;
    if !db::users::update_password(&state.db, user_id, &password_hash).await? {
        return Err(AppError::InvalidToken);
    }
    db::password_resets::mark_token_used(&state.db, &payload.token).await?;

    tracing::info!(user_id = %user_id, "password reset completed");

    Ok(HttpResponse::Ok().json(json!({ "status": "OK" })))
}
