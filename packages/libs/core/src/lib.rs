//! blog-core: Blog API 공통 핵심 라이브러리
//!
//! HTTP 서비스(`blog-api`)가 사용하는 도메인 타입과 인증/인가 로직을 제공합니다.
//! 이 크레이트는 HTTP나 저장소에 의존하지 않습니다.
//!
//! # 모듈 구조
//!
//! - `model`: User / Blog / Comment 도메인 타입
//! - `auth`: 토큰 발급·검증, 비밀번호 해시, 인증 게이트
//! - `permissions`: 블로그/댓글 수정·삭제 권한 판단
//! - `projection`: 외부 응답용 블로그 표현 생성
//! - `error`: 공통 에러 타입
//! - `id`: ID 생성 및 정규화

pub mod auth;
pub mod error;
pub mod id;
pub mod model;
pub mod permissions;
pub mod projection;

pub use error::{Error, Result};
