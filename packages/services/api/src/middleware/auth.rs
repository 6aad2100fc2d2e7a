//! 인증 extractor
//!
//! 핸들러 인자로 선언하면 `Authorization` 헤더를 검증하고 호출자 Claims를 제공합니다.
//! 검증에 실패하면 핸들러는 실행되지 않습니다.

use std::sync::Arc;

use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use blog_core::auth::{self, Claims};

use crate::error::ApiError;
use crate::state::AppState;

/// 인증된 호출자
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Claims);

/// 인증된 관리자
#[derive(Debug, Clone)]
pub struct AdminUser(pub Claims);

impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        // 같은 요청에서 이미 검증했으면 재사용
        if let Some(claims) = parts.extensions.get::<Claims>() {
            return Ok(CurrentUser(claims.clone()));
        }

        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok());

        let claims = auth::authenticate(&state.tokens, header)?;
        parts.extensions.insert(claims.clone());
        Ok(CurrentUser(claims))
    }
}

/// `Option<CurrentUser>`: 헤더가 없으면 `None`, 있으면 검증 (실패 시 거부)
impl OptionalFromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Option<Self>, Self::Rejection> {
        if !parts.headers.contains_key(AUTHORIZATION) {
            return Ok(None);
        }
        <CurrentUser as FromRequestParts<_>>::from_request_parts(parts, state)
            .await
            .map(Some)
    }
}

impl FromRequestParts<Arc<AppState>> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let CurrentUser(claims) =
            <CurrentUser as FromRequestParts<_>>::from_request_parts(parts, state).await?;
        auth::require_admin(Some(&claims))?;
        Ok(AdminUser(claims))
    }
}
