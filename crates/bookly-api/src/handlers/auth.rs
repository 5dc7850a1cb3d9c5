//! Auth handlers — signup, email verification, login, refresh, me, logout,
//! and password reset.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use validator::Validate;

use bookly_auth::rbac;
use bookly_core::error::AppError;
use bookly_entity::user::UserRole;
use bookly_service::auth::SignupData;

use crate::dto::request::{
    LoginRequest, PasswordResetConfirmRequest, PasswordResetRequest, RefreshRequest, SignupRequest,
};
use crate::dto::response::{
    LoginResponse, LoginUser, MessageResponse, RefreshResponse, SignupResponse,
    UserProfileResponse, UserResponse,
};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// Roles admitted to the authenticated self-service endpoints.
const MEMBER_ROLES: &[UserRole] = &[UserRole::Admin, UserRole::User];

/// POST /api/auth/signup
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>), ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let user = state
        .auth_service
        .signup(SignupData {
            username: req.username,
            email: req.email,
            password: req.password,
            first_name: req.first_name,
            last_name: req.last_name,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            message: "Account created. Check your email to verify it.".to_string(),
            user: UserResponse::from(user),
        }),
    ))
}

/// GET /api/auth/verify/{token}
pub async fn verify_email(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.auth_service.verify_email(&token).await?;

    Ok(Json(MessageResponse {
        message: "Email verified successfully.".to_string(),
    }))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let outcome = state.auth_service.login(&req.email, &req.password).await?;

    Ok(Json(LoginResponse {
        message: "Login successful.".to_string(),
        access_token: outcome.access_token,
        refresh_token: outcome.refresh_token,
        user: LoginUser {
            email: outcome.user.email,
            id: outcome.user.id,
        },
    }))
}

/// POST /api/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<RefreshResponse>, ApiError> {
    let access_token = state.auth_service.refresh(&req.refresh_token).await?;

    Ok(Json(RefreshResponse { access_token }))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<UserProfileResponse>, ApiError> {
    rbac::require_any(&auth.role, MEMBER_ROLES)?;

    let user = state
        .user_repo
        .find_by_id(auth.user_id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    let books = state.book_service.user_books(auth.user_id).await?;
    let reviews = state.review_service.user_reviews(auth.user_id).await?;

    Ok(Json(UserProfileResponse {
        user: UserResponse::from(user),
        books,
        reviews,
    }))
}

/// POST /api/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<MessageResponse>, ApiError> {
    state.auth_service.logout(auth.jti).await?;

    Ok(Json(MessageResponse {
        message: "Logged out successfully!".to_string(),
    }))
}

/// POST /api/auth/password-reset-request
pub async fn password_reset_request(
    State(state): State<AppState>,
    Json(req): Json<PasswordResetRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    state.auth_service.request_password_reset(&req.email).await?;

    Ok(Json(MessageResponse {
        message: "If the account exists, a reset link has been sent.".to_string(),
    }))
}

/// POST /api/auth/password-reset-confirm/{token}
pub async fn password_reset_confirm(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Json(req): Json<PasswordResetConfirmRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    state
        .auth_service
        .confirm_password_reset(&token, &req.new_password, &req.confirm_new_password)
        .await?;

    Ok(Json(MessageResponse {
        message: "Password updated successfully.".to_string(),
    }))
}
