//! 토큰 Claims
//!
//! Access Token의 페이로드 구조입니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::EntityId;
use crate::model::User;

/// Access Token 유효 기간 (3시간)
pub const TOKEN_TTL_SECONDS: i64 = 3 * 60 * 60;

/// Access Token Claims (JWT 페이로드)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// 사용자 ID
    pub id: String,

    pub email: String,

    pub username: String,

    /// 관리자 여부 (발급 시점 기준)
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,

    /// 발급 시각 (unix seconds)
    pub iat: i64,

    /// 만료 시각 (unix seconds)
    pub exp: i64,
}

impl Claims {
    /// 사용자 정보로 claims 생성
    pub fn for_user(user: &User, issued_at: DateTime<Utc>) -> Self {
        let iat = issued_at.timestamp();
        Self {
            id: user.id.to_string(),
            email: user.email.clone(),
            username: user.username.clone(),
            is_admin: user.is_admin,
            iat,
            exp: iat + TOKEN_TTL_SECONDS,
        }
    }

    /// 정규화된 사용자 ID
    pub fn subject(&self) -> EntityId {
        EntityId::new(&self.id)
    }

    /// 특정 리소스 소유자와 같은 사용자인지 확인
    pub fn is_same_user(&self, owner: &EntityId) -> bool {
        owner.matches(&self.id)
    }
}
