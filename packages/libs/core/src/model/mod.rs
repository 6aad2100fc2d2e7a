//! 도메인 모델
//!
//! - `user`: 가입된 사용자와 외부용 프로필
//! - `blog`: Blog aggregate (내장 댓글 포함)와 작성자 참조

mod blog;
mod user;

pub use blog::{AuthorRef, Blog, Comment};
pub use user::{User, UserProfile};
