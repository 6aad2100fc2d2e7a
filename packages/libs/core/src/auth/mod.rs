//! 인증 관련 타입 및 로직
//!
//! # 개요
//!
//! - 로그인 시 비밀번호 해시를 검증하고 (`password`)
//! - 사용자 정보로 서명된 Access Token을 발급하며 (`token`)
//! - 요청의 `Authorization: Bearer ...` 헤더를 검증해 호출자를 확정합니다 (`gate`).
//!
//! Access Token은 HS256 JWT이며 발급 후 3시간 동안 유효합니다.
//! Claims는 발급 시점의 사용자 정보를 그대로 신뢰하므로, 이후 권한 변경은
//! 재로그인 전까지 반영되지 않습니다.

mod claims;
mod gate;
mod password;
mod token;

pub use claims::{Claims, TOKEN_TTL_SECONDS};
pub use gate::{authenticate, bearer_token, require_admin, require_authenticated};
pub use password::{hash_password, verify_password};
pub use token::TokenService;
