//! 요청 본문 extractor
//!
//! `axum::Json`과 같지만, 본문 오류를 `ApiError`(400 `VALIDATION_ERROR`)로 돌려줍니다.

use axum::extract::FromRequest;

use crate::error::ApiError;

#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);
