//! 인증 게이트
//!
//! 요청 헤더에서 토큰을 꺼내 검증하고 호출자를 확정합니다.
//! HTTP 서비스의 extractor가 이 함수들을 그대로 사용합니다.

use super::claims::Claims;
use super::token::TokenService;
use crate::error::{Error, Result};

/// `Authorization` 헤더에서 Bearer 토큰 추출
///
/// 정확히 `Bearer <token>` 형식이어야 하며, 토큰이 비어 있으면 `None`입니다.
pub fn bearer_token(auth_header: Option<&str>) -> Option<&str> {
    let token = auth_header?.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

/// 헤더 검증 후 Claims 반환
///
/// # 실패
/// - 헤더 없음 / 형식 오류 → `Unauthenticated("no token provided")`
/// - 토큰 검증 실패 → `Unauthenticated` (원인 포함)
pub fn authenticate(tokens: &TokenService, auth_header: Option<&str>) -> Result<Claims> {
    let token = bearer_token(auth_header).ok_or_else(|| {
        tracing::debug!("request without bearer token");
        Error::unauthenticated("no token provided")
    })?;

    tokens.verify(token).map_err(|e| {
        tracing::debug!(error = %e, "token verification failed");
        Error::unauthenticated(format!("invalid or expired token ({})", e))
    })
}

/// 관리자 확인
///
/// `authenticate` 이후에만 의미가 있으며, 호출자 정보가 없으면 `Forbidden`입니다.
pub fn require_admin(identity: Option<&Claims>) -> Result<&Claims> {
    match identity {
        Some(claims) if claims.is_admin => Ok(claims),
        _ => Err(Error::forbidden("action forbidden: admin only")),
    }
}

/// 인증 여부만 확인
pub fn require_authenticated(identity: Option<&Claims>) -> Result<&Claims> {
    identity.ok_or_else(|| Error::unauthenticated("not authenticated"))
}
