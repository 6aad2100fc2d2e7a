//! Blog 핸들러

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use blog_core::id::EntityId;
use blog_core::model::Blog;
use blog_core::permissions::{self, BlogAction};
use blog_core::projection::{Project, PublicBlog};

use super::{non_blank, MessageResponse};
use crate::error::Result;
use crate::extract::ApiJson;
use crate::middleware::CurrentUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateBlogRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// 수정 가능한 필드만 받습니다. 작성자나 댓글은 이 경로로 바꿀 수 없습니다.
#[derive(Debug, Deserialize)]
pub struct UpdateBlogRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BlogResponse {
    pub message: &'static str,
    pub blog: PublicBlog,
}

/// Blog 조회 (없으면 `NotFound`)
pub(crate) async fn load_blog(state: &AppState, blog_id: &str) -> Result<Blog> {
    state
        .store
        .find_blog(&EntityId::new(blog_id))
        .await?
        .ok_or_else(|| blog_core::Error::NotFound { resource: "blog" }.into())
}

/// POST /blogs
pub async fn create_blog(
    State(state): State<Arc<AppState>>,
    CurrentUser(claims): CurrentUser,
    ApiJson(request): ApiJson<CreateBlogRequest>,
) -> Result<(StatusCode, Json<BlogResponse>)> {
    let (Some(title), Some(content)) = (non_blank(request.title), non_blank(request.content))
    else {
        return Err(blog_core::Error::validation("title and content are required").into());
    };

    let mut blog = Blog::new(claims.subject(), title, content);
    state.store.insert_blog(&blog).await?;
    state.store.populate(&mut blog).await?;

    tracing::info!(blog_id = %blog.id, author_id = %blog.author_id(), "blog created");

    Ok((
        StatusCode::CREATED,
        Json(BlogResponse {
            message: "Blog created successfully",
            blog: blog.project(),
        }),
    ))
}

/// GET /blogs
pub async fn list_blogs(State(state): State<Arc<AppState>>) -> Result<Json<Vec<PublicBlog>>> {
    let mut blogs = state.store.list_blogs().await?;
    state.store.populate_all(&mut blogs).await?;
    Ok(Json(blogs.iter().map(Project::project).collect()))
}

/// GET /blogs/{blog_id}
pub async fn get_blog(
    State(state): State<Arc<AppState>>,
    Path(blog_id): Path<String>,
) -> Result<Json<PublicBlog>> {
    let mut blog = load_blog(&state, &blog_id).await?;
    state.store.populate(&mut blog).await?;
    Ok(Json(blog.project()))
}

/// PATCH /blogs/{blog_id}/edit
pub async fn update_blog(
    State(state): State<Arc<AppState>>,
    CurrentUser(claims): CurrentUser,
    Path(blog_id): Path<String>,
    ApiJson(request): ApiJson<UpdateBlogRequest>,
) -> Result<Json<BlogResponse>> {
    let mut blog = load_blog(&state, &blog_id).await?;
    permissions::authorize_blog(&claims, &blog, BlogAction::Update).into_result()?;

    if request.title.is_none() && request.content.is_none() {
        return Err(blog_core::Error::validation("title or content is required").into());
    }
    let title = request.title.map(|t| non_blank(Some(t)));
    let content = request.content.map(|c| non_blank(Some(c)));
    if matches!(title, Some(None)) || matches!(content, Some(None)) {
        return Err(blog_core::Error::validation("title and content must not be empty").into());
    }

    blog.edit(title.flatten(), content.flatten());
    state.store.save_blog(&mut blog).await?;
    state.store.populate(&mut blog).await?;

    tracing::info!(blog_id = %blog.id, editor = %claims.id, "blog updated");

    Ok(Json(BlogResponse {
        message: "Blog updated",
        blog: blog.project(),
    }))
}

/// DELETE /blogs/{blog_id}/remove
pub async fn delete_blog(
    State(state): State<Arc<AppState>>,
    CurrentUser(claims): CurrentUser,
    Path(blog_id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let blog = load_blog(&state, &blog_id).await?;
    permissions::authorize_blog(&claims, &blog, BlogAction::Delete).into_result()?;

    if !state.store.delete_blog(&blog.id).await? {
        return Err(blog_core::Error::NotFound { resource: "blog" }.into());
    }

    tracing::info!(blog_id = %blog.id, editor = %claims.id, "blog deleted");

    Ok(Json(MessageResponse {
        message: "Blog deleted",
    }))
}
