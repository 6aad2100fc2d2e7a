//! Blog aggregate
//!
//! Blog는 내장 댓글 목록과 함께 하나의 단위로 저장/수정됩니다.
//! 댓글은 부모 Blog 밖에서 독립적으로 다뤄지지 않습니다.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::id::EntityId;

/// 작성자 참조
///
/// 저장소에서 막 읽은 상태는 `Unresolved`이며,
/// users 조회로 이름이 채워지면 `Resolved`가 됩니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorRef {
    Unresolved { id: EntityId },
    Resolved { id: EntityId, username: String },
}

impl AuthorRef {
    pub fn unresolved(id: EntityId) -> Self {
        AuthorRef::Unresolved { id }
    }

    /// 작성자 ID
    pub fn id(&self) -> &EntityId {
        match self {
            AuthorRef::Unresolved { id } | AuthorRef::Resolved { id, .. } => id,
        }
    }

    /// 해석된 경우 사용자 이름
    pub fn username(&self) -> Option<&str> {
        match self {
            AuthorRef::Unresolved { .. } => None,
            AuthorRef::Resolved { username, .. } => Some(username),
        }
    }

    /// 사용자 이름 맵으로 참조 해석
    ///
    /// 맵에 없는 사용자(삭제 등)는 `Unresolved`로 남습니다.
    pub fn resolve(&mut self, usernames: &HashMap<EntityId, String>) {
        if let Some(username) = usernames.get(self.id()) {
            *self = AuthorRef::Resolved {
                id: self.id().clone(),
                username: username.clone(),
            };
        }
    }
}

/// 내장 댓글
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub id: EntityId,
    pub author: AuthorRef,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Comment {
    pub fn new(author_id: EntityId, text: String) -> Self {
        Self {
            id: EntityId::generate(),
            author: AuthorRef::unresolved(author_id),
            text,
            created_at: Utc::now(),
            updated_at: None,
        }
    }
}

/// Blog aggregate
#[derive(Debug, Clone, PartialEq)]
pub struct Blog {
    pub id: EntityId,
    pub title: String,
    pub content: String,

    /// 소유자 (생성 시 고정)
    pub author: AuthorRef,

    /// 작성 순서대로 정렬된 댓글
    pub comments: Vec<Comment>,

    /// 저장 시마다 증가하는 내부 revision (외부로 노출되지 않음)
    pub version: i64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Blog {
    pub fn new(author_id: EntityId, title: String, content: String) -> Self {
        let now = Utc::now();
        Self {
            id: EntityId::generate(),
            title,
            content,
            author: AuthorRef::unresolved(author_id),
            comments: Vec::new(),
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn author_id(&self) -> &EntityId {
        self.author.id()
    }

    /// 참조되는 모든 사용자 ID (소유자 + 댓글 작성자, 중복 제거)
    pub fn referenced_user_ids(&self) -> Vec<EntityId> {
        let mut ids = vec![self.author.id().clone()];
        for comment in &self.comments {
            if !ids.contains(comment.author.id()) {
                ids.push(comment.author.id().clone());
            }
        }
        ids
    }

    /// 소유자와 댓글 작성자 참조 해석
    pub fn resolve_authors(&mut self, usernames: &HashMap<EntityId, String>) {
        self.author.resolve(usernames);
        for comment in &mut self.comments {
            comment.author.resolve(usernames);
        }
    }

    pub fn comment(&self, comment_id: &EntityId) -> Option<&Comment> {
        self.comments.iter().find(|c| &c.id == comment_id)
    }

    pub fn add_comment(&mut self, comment: Comment) {
        self.comments.push(comment);
        self.updated_at = Utc::now();
    }

    /// 댓글 본문 수정 (수정된 댓글 반환)
    pub fn update_comment(&mut self, comment_id: &EntityId, text: String) -> Option<&Comment> {
        let now = Utc::now();
        let comment = self.comments.iter_mut().find(|c| &c.id == comment_id)?;
        comment.text = text;
        comment.updated_at = Some(now);
        self.updated_at = now;
        self.comment(comment_id)
    }

    /// 댓글 제거 (제거된 댓글 반환)
    pub fn remove_comment(&mut self, comment_id: &EntityId) -> Option<Comment> {
        let index = self.comments.iter().position(|c| &c.id == comment_id)?;
        self.updated_at = Utc::now();
        Some(self.comments.remove(index))
    }

    /// 제목/본문 수정
    ///
    /// 소유자와 댓글은 이 경로로 바뀌지 않습니다.
    pub fn edit(&mut self, title: Option<String>, content: Option<String>) {
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(content) = content {
            self.content = content;
        }
        self.updated_at = Utc::now();
    }
}
