//! 사용자

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::EntityId;

/// 저장소에 보관되는 사용자
///
/// 비밀번호 해시를 포함하므로 직렬화하지 않습니다.
/// 외부로 내보낼 때는 항상 [`UserProfile`]로 변환합니다.
#[derive(Debug, Clone)]
pub struct User {
    pub id: EntityId,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// 신규 가입 사용자 생성
    ///
    /// 관리자 권한은 가입 경로로 부여되지 않습니다.
    pub fn register(email: String, username: String, password_hash: String) -> Self {
        Self {
            id: EntityId::generate(),
            email,
            username,
            password_hash,
            is_admin: false,
            created_at: Utc::now(),
        }
    }

    pub fn profile(&self) -> UserProfile {
        UserProfile::from(self)
    }
}

/// 외부 응답용 사용자 (비밀번호 해시 제외)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: EntityId,
    pub email: String,
    pub username: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            username: user.username.clone(),
            is_admin: user.is_admin,
            created_at: user.created_at,
        }
    }
}
