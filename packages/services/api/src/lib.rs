//! Blog API
//!
//! 사용자 가입/로그인, Blog CRUD, 내장 댓글을 제공하는 HTTP 서비스입니다.

use std::sync::Arc;

use axum::routing::{delete, get, patch, post};
use axum::{middleware::from_fn, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod state;

use handlers::{blogs, comments, health, users};
use state::AppState;

/// 라우터 생성
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Users
        .route("/users/register", post(users::register))
        .route("/users/login", post(users::login))
        .route("/users/me", get(users::profile))
        .route("/users/all", get(users::list_users))
        // Blogs
        .route("/blogs", post(blogs::create_blog).get(blogs::list_blogs))
        .route("/blogs/{blog_id}", get(blogs::get_blog))
        .route("/blogs/{blog_id}/edit", patch(blogs::update_blog))
        .route("/blogs/{blog_id}/remove", delete(blogs::delete_blog))
        // Comments
        .route("/blogs/{blog_id}/comments", post(comments::add_comment))
        .route(
            "/blogs/{blog_id}/comments/{comment_id}/edit",
            patch(comments::update_comment),
        )
        .route(
            "/blogs/{blog_id}/comments/{comment_id}/remove",
            delete(comments::delete_comment),
        )
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(from_fn(middleware::request_id))
        // State
        .with_state(state)
}
