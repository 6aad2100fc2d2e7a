//! 저장소 (SQLite)
//!
//! 사용자는 `users` 테이블에, Blog aggregate는 `blogs` 테이블에 저장합니다.
//! 댓글은 부모 Blog 행의 `comments_json` 컬럼에 내장되며, 변경 시 aggregate 전체를
//! 다시 저장합니다.

use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};

use blog_core::id::EntityId;
use blog_core::model::{AuthorRef, Blog, Comment, User};

use crate::error::{ApiError, Result};

/// `usernames` 조회 한 번에 바인딩하는 최대 ID 수
const USERNAME_LOOKUP_CHUNK: usize = 500;

#[derive(Clone)]
pub struct Store {
    pool: SqlitePool,
}

/// `comments_json`에 저장되는 댓글 형태
#[derive(Debug, Serialize, Deserialize)]
struct CommentRecord {
    id: EntityId,
    author_id: EntityId,
    comment: String,
    created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    updated_at: Option<DateTime<Utc>>,
}

impl From<&Comment> for CommentRecord {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id.clone(),
            author_id: comment.author.id().clone(),
            comment: comment.text.clone(),
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}

impl From<CommentRecord> for Comment {
    fn from(record: CommentRecord) -> Self {
        Self {
            id: record.id,
            author: AuthorRef::unresolved(record.author_id),
            text: record.comment,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

impl Store {
    /// URL로 접속 후 스키마 초기화
    pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            if let Some(parent) = Path::new(path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(8)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.init().await?;
        Ok(store)
    }

    /// 메모리 DB (테스트용)
    ///
    /// 메모리 DB는 커넥션마다 분리되므로 커넥션 하나만 유지합니다.
    pub async fn in_memory() -> anyhow::Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;

        let store = Self { pool };
        store.init().await?;
        Ok(store)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn init(&self) -> anyhow::Result<()> {
        let queries = [
            r#"CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                email TEXT NOT NULL UNIQUE,
                username TEXT NOT NULL,
                password_hash TEXT NOT NULL,
                is_admin INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL
            );"#,
            r#"CREATE TABLE IF NOT EXISTS blogs (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                content TEXT NOT NULL,
                author_id TEXT NOT NULL,
                comments_json TEXT NOT NULL,
                version INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );"#,
        ];

        for query in queries {
            sqlx::query(query).execute(&self.pool).await?;
        }
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Users
    // ─────────────────────────────────────────────────────────────────────────────

    /// 사용자 저장 (이메일 중복 시 `Conflict`)
    pub async fn insert_user(&self, user: &User) -> Result<()> {
        let result = sqlx::query(
            "INSERT INTO users (id, email, username, password_hash, is_admin, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(user.id.as_str())
        .bind(&user.email)
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(user.is_admin)
        .bind(user.created_at.to_rfc3339())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(blog_core::Error::Conflict {
                    message: "email already registered".to_string(),
                }
                .into())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let row = sqlx::query(
            "SELECT id, email, username, password_hash, is_admin, created_at FROM users WHERE email = ?1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| user_from_row(&r)).transpose()
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        let rows = sqlx::query(
            "SELECT id, email, username, password_hash, is_admin, created_at FROM users ORDER BY created_at, id",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(user_from_row).collect()
    }

    /// 사용자 ID → 이름 맵
    ///
    /// SQLite 바인딩 변수 한도를 넘지 않도록 `USERNAME_LOOKUP_CHUNK`개씩 나눠 조회합니다.
    pub async fn usernames(&self, ids: &[EntityId]) -> Result<HashMap<EntityId, String>> {
        let mut names = HashMap::with_capacity(ids.len());

        for chunk in ids.chunks(USERNAME_LOOKUP_CHUNK) {
            let mut builder =
                QueryBuilder::<Sqlite>::new("SELECT id, username FROM users WHERE id IN (");
            let mut separated = builder.separated(", ");
            for id in chunk {
                separated.push_bind(id.as_str().to_string());
            }
            separated.push_unseparated(")");

            let rows = builder.build().fetch_all(&self.pool).await?;
            for row in rows {
                let id: String = row.try_get("id")?;
                let username: String = row.try_get("username")?;
                names.insert(EntityId::new(id), username);
            }
        }
        Ok(names)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Blogs
    // ─────────────────────────────────────────────────────────────────────────────

    pub async fn insert_blog(&self, blog: &Blog) -> Result<()> {
        sqlx::query(
            "INSERT INTO blogs (id, title, content, author_id, comments_json, version, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )
        .bind(blog.id.as_str())
        .bind(&blog.title)
        .bind(&blog.content)
        .bind(blog.author_id().as_str())
        .bind(comments_json(&blog.comments)?)
        .bind(blog.version)
        .bind(blog.created_at.to_rfc3339())
        .bind(blog.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn find_blog(&self, id: &EntityId) -> Result<Option<Blog>> {
        let row = sqlx::query(
            "SELECT id, title, content, author_id, comments_json, version, created_at, updated_at FROM blogs WHERE id = ?1",
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| blog_from_row(&r)).transpose()
    }

    pub async fn list_blogs(&self) -> Result<Vec<Blog>> {
        let rows = sqlx::query(
            "SELECT id, title, content, author_id, comments_json, version, created_at, updated_at FROM blogs ORDER BY created_at, id",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(blog_from_row).collect()
    }

    /// aggregate 전체 저장
    ///
    /// revision은 증가시키지만 비교하지 않으므로 동시 수정은 마지막 저장이 이깁니다.
    /// 그 사이 삭제된 Blog라면 `NotFound`입니다.
    pub async fn save_blog(&self, blog: &mut Blog) -> Result<()> {
        let result = sqlx::query(
            "UPDATE blogs SET title = ?1, content = ?2, comments_json = ?3, version = ?4, updated_at = ?5 WHERE id = ?6",
        )
        .bind(&blog.title)
        .bind(&blog.content)
        .bind(comments_json(&blog.comments)?)
        .bind(blog.version + 1)
        .bind(blog.updated_at.to_rfc3339())
        .bind(blog.id.as_str())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            tracing::debug!(blog_id = %blog.id, "save on missing blog");
            return Err(blog_core::Error::NotFound { resource: "blog" }.into());
        }

        blog.version += 1;
        Ok(())
    }

    /// 삭제 (삭제된 행이 있으면 true)
    pub async fn delete_blog(&self, id: &EntityId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM blogs WHERE id = ?1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// 소유자/댓글 작성자 참조 해석
    pub async fn populate(&self, blog: &mut Blog) -> Result<()> {
        let names = self.usernames(&blog.referenced_user_ids()).await?;
        blog.resolve_authors(&names);
        Ok(())
    }

    /// 여러 Blog의 참조를 한 번의 조회로 해석
    pub async fn populate_all(&self, blogs: &mut [Blog]) -> Result<()> {
        let mut ids: Vec<EntityId> = Vec::new();
        for blog in blogs.iter() {
            for id in blog.referenced_user_ids() {
                if !ids.contains(&id) {
                    ids.push(id);
                }
            }
        }

        let names = self.usernames(&ids).await?;
        for blog in blogs.iter_mut() {
            blog.resolve_authors(&names);
        }
        Ok(())
    }
}

fn comments_json(comments: &[Comment]) -> Result<String> {
    let records: Vec<CommentRecord> = comments.iter().map(CommentRecord::from).collect();
    serde_json::to_string(&records).map_err(|e| blog_core::Error::from(e).into())
}

fn parse_time(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| ApiError::internal(format!("invalid stored timestamp '{}': {}", raw, e)))
}

fn user_from_row(row: &SqliteRow) -> Result<User> {
    let id: String = row.try_get("id")?;
    let created_at: String = row.try_get("created_at")?;

    Ok(User {
        id: EntityId::new(id),
        email: row.try_get("email")?,
        username: row.try_get("username")?,
        password_hash: row.try_get("password_hash")?,
        is_admin: row.try_get("is_admin")?,
        created_at: parse_time(&created_at)?,
    })
}

fn blog_from_row(row: &SqliteRow) -> Result<Blog> {
    let id: String = row.try_get("id")?;
    let author_id: String = row.try_get("author_id")?;
    let comments_raw: String = row.try_get("comments_json")?;
    let created_at: String = row.try_get("created_at")?;
    let updated_at: String = row.try_get("updated_at")?;

    let records: Vec<CommentRecord> =
        serde_json::from_str(&comments_raw).map_err(blog_core::Error::from)?;

    Ok(Blog {
        id: EntityId::new(id),
        title: row.try_get("title")?,
        content: row.try_get("content")?,
        author: AuthorRef::unresolved(EntityId::new(author_id)),
        comments: records.into_iter().map(Comment::from).collect(),
        version: row.try_get("version")?,
        created_at: parse_time(&created_at)?,
        updated_at: parse_time(&updated_at)?,
    })
}
