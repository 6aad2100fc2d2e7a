//! HTTP 핸들러
//!
//! - `users`: 가입, 로그인, 프로필, 사용자 목록
//! - `blogs`: Blog CRUD
//! - `comments`: 내장 댓글 추가/수정/삭제
//! - `health`: 헬스 체크

pub mod blogs;
pub mod comments;
pub mod health;
pub mod users;

use serde::Serialize;

/// 메시지만 담는 응답
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// 앞뒤 공백을 제거한 뒤 비어 있지 않은 값만 남김
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
