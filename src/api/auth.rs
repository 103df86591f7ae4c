//! Credential authentication handlers.

use actix_web::{HttpResponse, web};
use tracing::info;

use super::{created, ok};
use crate::auth::{self, MIN_PASSWORD_LENGTH, SessionAuth};
use crate::config::Config;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{
    AuthResponse, LoginRequest, SignupRequest, UpdateProfileRequest, User, UserResponse,
    non_blank, require_str,
};

fn issue(user: User, config: &Config) -> AppResult<AuthResponse> {
    let (token, expires_at) = auth::create_session_token(
        &user.id,
        &user.email,
        &config.auth.jwt_secret,
        config.auth.session_ttl_hours,
    )?;
    Ok(AuthResponse {
        user: user.into(),
        token,
        expires_at,
    })
}

/// Create an account with email and password.
#[utoipa::path(
    post,
    path = "/api/auth/signup",
    tag = "Auth",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
        (status = 409, description = "Email already registered", body = crate::error::ErrorResponse),
    )
)]
pub async fn signup(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    body: web::Json<SignupRequest>,
) -> AppResult<HttpResponse> {
    let body = body.into_inner();
    let email = require_str(body.email, "email")?;
    let password = body
        .password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::InvalidInput("password is required".to_string()))?;

    if !email.contains('@') {
        return Err(AppError::InvalidInput("email is not valid".to_string()));
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AppError::InvalidInput(format!(
            "password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        )));
    }

    let cost = config.auth.bcrypt_cost;
    let hash = web::block(move || auth::hash_password(&password, cost))
        .await
        .map_err(|e| AppError::Internal(format!("Password hashing task failed: {}", e)))??;

    let user = pool.create_user(&email, &hash, non_blank(body.name)).await?;
    info!(user_id = %user.id, "User signed up");

    Ok(created(issue(user, &config)?))
}

/// Log in with email and password.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = AuthResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
        (status = 401, description = "Invalid credentials", body = crate::error::ErrorResponse),
    )
)]
pub async fn login(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let body = body.into_inner();
    let email = require_str(body.email, "email")?;
    let password = body
        .password
        .ok_or_else(|| AppError::InvalidInput("password is required".to_string()))?;

    let invalid = || AppError::Unauthorized("Invalid email or password".to_string());

    let user = pool.find_user_by_email(&email).await?.ok_or_else(invalid)?;
    let hash = user.password_hash.clone().ok_or_else(invalid)?;

    let matches = web::block(move || auth::verify_password(&password, &hash))
        .await
        .map_err(|e| AppError::Internal(format!("Password check task failed: {}", e)))?;
    if !matches {
        return Err(invalid());
    }

    let user = pool.touch_user_login(&user.id).await?;
    info!(user_id = %user.id, "User logged in");

    Ok(ok(issue(user, &config)?))
}

/// Current user profile.
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "Auth",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Missing or invalid token", body = crate::error::ErrorResponse),
        (status = 404, description = "User no longer exists", body = crate::error::ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn me(auth: SessionAuth, pool: web::Data<DbPool>) -> AppResult<HttpResponse> {
    let user = pool
        .find_user_by_id(&auth.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User".to_string()))?;

    Ok(ok(UserResponse::from(user)))
}

/// Update the current user's profile.
#[utoipa::path(
    put,
    path = "/api/auth/me",
    tag = "Auth",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated profile", body = UserResponse),
        (status = 401, description = "Missing or invalid token", body = crate::error::ErrorResponse),
        (status = 404, description = "User no longer exists", body = crate::error::ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn update_me(
    auth: SessionAuth,
    pool: web::Data<DbPool>,
    body: web::Json<UpdateProfileRequest>,
) -> AppResult<HttpResponse> {
    let body = body.into_inner();
    let user = pool
        .update_user_profile(&auth.user_id, non_blank(body.name), non_blank(body.avatar_url))
        .await?;

    Ok(ok(UserResponse::from(user)))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/auth/signup").route(web::post().to(signup)))
        .service(web::resource("/auth/login").route(web::post().to(login)))
        .service(
            web::resource("/auth/me")
                .route(web::get().to(me))
                .route(web::put().to(update_me)),
        );
}
