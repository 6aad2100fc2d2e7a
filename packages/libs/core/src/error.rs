//! 공통 에러 타입
//!
//! Blog API 전체에서 사용되는 에러 타입을 정의합니다.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Blog API 공통 에러
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────────────────────
    // Input Errors
    // ─────────────────────────────────────────────────────────────────────────────
    #[error("validation error: {message}")]
    Validation { message: String },

    #[error("conflict: {message}")]
    Conflict { message: String },

    #[error("{resource} not found")]
    NotFound { resource: &'static str },

    // ─────────────────────────────────────────────────────────────────────────────
    // Auth Errors
    // ─────────────────────────────────────────────────────────────────────────────
    #[error("unauthenticated: {reason}")]
    Unauthenticated { reason: String },

    #[error("invalid token: {reason}")]
    InvalidToken { reason: String },

    #[error("forbidden: {reason}")]
    Forbidden { reason: String },

    // ─────────────────────────────────────────────────────────────────────────────
    // Internal Errors
    // ─────────────────────────────────────────────────────────────────────────────
    #[error("token signing error: {message}")]
    TokenSigning { message: String },

    #[error("password hash error: {message}")]
    PasswordHash { message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation {
            message: message.into(),
        }
    }

    pub fn forbidden(reason: impl Into<String>) -> Self {
        Error::Forbidden {
            reason: reason.into(),
        }
    }

    pub fn unauthenticated(reason: impl Into<String>) -> Self {
        Error::Unauthenticated {
            reason: reason.into(),
        }
    }

    /// HTTP 상태 코드로 변환
    pub fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request
            Error::Validation { .. } => 400,

            // 401 Unauthorized
            Error::Unauthenticated { .. } | Error::InvalidToken { .. } => 401,

            // 403 Forbidden
            Error::Forbidden { .. } => 403,

            // 404 Not Found
            Error::NotFound { .. } => 404,

            // 409 Conflict
            Error::Conflict { .. } => 409,

            // 500 Internal Server Error
            Error::TokenSigning { .. } | Error::PasswordHash { .. } | Error::Json(_) => 500,
        }
    }

    /// 내부 에러 여부 (클라이언트에 상세 내용을 노출하지 않음)
    pub fn is_internal(&self) -> bool {
        self.status_code() >= 500
    }

    /// 에러 코드 (클라이언트용)
    pub fn code(&self) -> &'static str {
        match self {
            Error::Validation { .. } => "VALIDATION_ERROR",
            Error::Conflict { .. } => "CONFLICT",
            Error::NotFound { .. } => "NOT_FOUND",
            Error::Unauthenticated { .. } => "UNAUTHENTICATED",
            Error::InvalidToken { .. } => "INVALID_TOKEN",
            Error::Forbidden { .. } => "FORBIDDEN",
            Error::TokenSigning { .. } => "TOKEN_SIGNING_ERROR",
            Error::PasswordHash { .. } => "PASSWORD_HASH_ERROR",
            Error::Json(_) => "JSON_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(Error::validation("missing title").status_code(), 400);
        assert_eq!(Error::unauthenticated("no token").status_code(), 401);
        assert_eq!(
            Error::InvalidToken {
                reason: "expired".to_string()
            }
            .status_code(),
            401
        );
        assert_eq!(Error::forbidden("not owner").status_code(), 403);
        assert_eq!(Error::NotFound { resource: "blog" }.status_code(), 404);
        assert_eq!(
            Error::Conflict {
                message: "email taken".to_string()
            }
            .status_code(),
            409
        );
    }

    #[test]
    fn test_internal_errors() {
        let err = Error::PasswordHash {
            message: "bad salt".to_string(),
        };
        assert!(err.is_internal());
        assert_eq!(err.code(), "PASSWORD_HASH_ERROR");
        assert!(!Error::forbidden("nope").is_internal());
    }

    #[test]
    fn test_not_found_message() {
        let err = Error::NotFound { resource: "comment" };
        assert_eq!(err.to_string(), "comment not found");
    }
}
