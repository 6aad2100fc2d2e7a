//! 댓글 핸들러
//!
//! 댓글은 부모 Blog aggregate를 읽고, 수정하고, 통째로 다시 저장합니다.
//! 같은 Blog에 대한 동시 변경은 직렬화되지 않습니다.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use blog_core::id::EntityId;
use blog_core::model::{Blog, Comment};
use blog_core::permissions;
use blog_core::projection::{Project, PublicComment};

use super::blogs::load_blog;
use super::{non_blank, MessageResponse};
use crate::error::Result;
use crate::extract::ApiJson;
use crate::middleware::CurrentUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    pub comment: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentListResponse {
    pub message: &'static str,
    pub blog_id: EntityId,
    pub comments: Vec<PublicComment>,
}

#[derive(Debug, Serialize)]
pub struct CommentResponse {
    pub message: &'static str,
    pub comment: PublicComment,
}

fn comment_text(request: CommentRequest) -> Result<String> {
    non_blank(request.comment)
        .ok_or_else(|| blog_core::Error::validation("comment text is required").into())
}

fn find_comment<'a>(blog: &'a Blog, comment_id: &EntityId) -> Result<&'a Comment> {
    blog.comment(comment_id)
        .ok_or_else(|| blog_core::Error::NotFound { resource: "comment" }.into())
}

/// POST /blogs/{blog_id}/comments
pub async fn add_comment(
    State(state): State<Arc<AppState>>,
    CurrentUser(claims): CurrentUser,
    Path(blog_id): Path<String>,
    ApiJson(request): ApiJson<CommentRequest>,
) -> Result<(StatusCode, Json<CommentListResponse>)> {
    let text = comment_text(request)?;
    let mut blog = load_blog(&state, &blog_id).await?;

    blog.add_comment(Comment::new(claims.subject(), text));
    state.store.save_blog(&mut blog).await?;
    state.store.populate(&mut blog).await?;

    tracing::info!(blog_id = %blog.id, author_id = %claims.id, "comment added");

    Ok((
        StatusCode::CREATED,
        Json(CommentListResponse {
            message: "Comment added",
            blog_id: blog.id.clone(),
            comments: blog.project().comments,
        }),
    ))
}

/// PATCH /blogs/{blog_id}/comments/{comment_id}/edit (관리자 전용)
pub async fn update_comment(
    State(state): State<Arc<AppState>>,
    CurrentUser(claims): CurrentUser,
    Path((blog_id, comment_id)): Path<(String, String)>,
    ApiJson(request): ApiJson<CommentRequest>,
) -> Result<Json<CommentResponse>> {
    let mut blog = load_blog(&state, &blog_id).await?;
    let comment_id = EntityId::new(comment_id);
    find_comment(&blog, &comment_id)?;
    permissions::authorize_comment_update(&claims).into_result()?;

    let text = comment_text(request)?;
    blog.update_comment(&comment_id, text);
    state.store.save_blog(&mut blog).await?;
    state.store.populate(&mut blog).await?;

    tracing::info!(blog_id = %blog.id, comment_id = %comment_id, "comment updated");

    let comment = find_comment(&blog, &comment_id)?;
    Ok(Json(CommentResponse {
        message: "Comment updated",
        comment: PublicComment::from(comment),
    }))
}

/// DELETE /blogs/{blog_id}/comments/{comment_id}/remove
pub async fn delete_comment(
    State(state): State<Arc<AppState>>,
    CurrentUser(claims): CurrentUser,
    Path((blog_id, comment_id)): Path<(String, String)>,
) -> Result<Json<MessageResponse>> {
    let mut blog = load_blog(&state, &blog_id).await?;
    let comment_id = EntityId::new(comment_id);
    let comment = find_comment(&blog, &comment_id)?;
    permissions::authorize_comment_delete(&claims, &blog, comment).into_result()?;

    blog.remove_comment(&comment_id);
    state.store.save_blog(&mut blog).await?;

    tracing::info!(blog_id = %blog.id, comment_id = %comment_id, "comment deleted");

    Ok(Json(MessageResponse {
        message: "Comment deleted",
    }))
}
