//! 사용자 핸들러

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use blog_core::auth::{self, Claims};
use blog_core::model::{User, UserProfile};

use super::non_blank;
use crate::error::{ApiError, Result};
use crate::extract::ApiJson;
use crate::middleware::{AdminUser, CurrentUser};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub message: &'static str,
    pub user: UserProfile,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    pub access: String,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub message: &'static str,
    pub user: Claims,
}

#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub message: &'static str,
    pub users: Vec<UserProfile>,
}

/// 비밀번호 해시는 CPU를 오래 쓰므로 blocking 풀에서 실행
async fn blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> blog_core::Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::internal(format!("blocking task failed: {}", e)))?
        .map_err(ApiError::from)
}

/// POST /users/register
pub async fn register(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>)> {
    let (Some(email), Some(username), Some(password)) = (
        non_blank(request.email),
        non_blank(request.username),
        request.password.filter(|p| !p.is_empty()),
    ) else {
        return Err(blog_core::Error::validation("email, username, and password are required").into());
    };

    if state.store.find_user_by_email(&email).await?.is_some() {
        return Err(blog_core::Error::Conflict {
            message: "email already registered".to_string(),
        }
        .into());
    }

    let password_hash = blocking(move || auth::hash_password(&password)).await?;
    let user = User::register(email, username, password_hash);
    state.store.insert_user(&user).await?;

    tracing::info!(user_id = %user.id, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(UserResponse {
            message: "User registered successfully",
            user: user.profile(),
        }),
    ))
}

/// POST /users/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let (Some(email), Some(password)) = (
        non_blank(request.email),
        request.password.filter(|p| !p.is_empty()),
    ) else {
        return Err(blog_core::Error::validation("email and password are required").into());
    };

    let invalid = || blog_core::Error::unauthenticated("invalid email or password");

    let user = state
        .store
        .find_user_by_email(&email)
        .await?
        .ok_or_else(invalid)?;

    let stored_hash = user.password_hash.clone();
    let matched = blocking(move || auth::verify_password(&password, &stored_hash)).await?;
    if !matched {
        tracing::debug!(user_id = %user.id, "password mismatch");
        return Err(invalid().into());
    }

    let access = state.tokens.issue(&user)?;
    Ok(Json(LoginResponse {
        message: "Login successful",
        access,
    }))
}

/// GET /users/me
///
/// 헤더가 없는 요청은 `require_authenticated`에서 401로 끝납니다.
pub async fn profile(caller: Option<CurrentUser>) -> Result<Json<ProfileResponse>> {
    let claims = auth::require_authenticated(caller.as_ref().map(|CurrentUser(claims)| claims))?;
    Ok(Json(ProfileResponse {
        message: "User profile",
        user: claims.clone(),
    }))
}

/// GET /users/all (관리자 전용)
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    AdminUser(_admin): AdminUser,
) -> Result<Json<UserListResponse>> {
    let users = state.store.list_users().await?;
    Ok(Json(UserListResponse {
        message: "All users retrieved successfully",
        users: users.iter().map(User::profile).collect(),
    }))
}
