//! 외부 응답용 Blog 표현
//!
//! 저장된 aggregate에서 내부 필드(`version`)를 제거하고, 작성자 참조를
//! `{id, username}`만 가진 `author` 객체로 바꿉니다. 해석되지 않은 참조는
//! `author` 필드 자체가 생략됩니다 (null이 아님).
//!
//! 이미 투영된 값을 다시 투영해도 결과는 같습니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::EntityId;
use crate::model::{AuthorRef, Blog, Comment};

/// 작성자 요약
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicAuthor {
    pub id: EntityId,
    pub username: String,
}

impl PublicAuthor {
    fn from_ref(author: &AuthorRef) -> Option<Self> {
        match author {
            AuthorRef::Resolved { id, username } => Some(Self {
                id: id.clone(),
                username: username.clone(),
            }),
            AuthorRef::Unresolved { .. } => None,
        }
    }
}

/// 외부 응답용 댓글
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicComment {
    pub id: EntityId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<PublicAuthor>,

    pub comment: String,

    pub created_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&Comment> for PublicComment {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id.clone(),
            author: PublicAuthor::from_ref(&comment.author),
            comment: comment.text.clone(),
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}

/// 외부 응답용 Blog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicBlog {
    pub id: EntityId,
    pub title: String,
    pub content: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<PublicAuthor>,

    pub comments: Vec<PublicComment>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 외부 표현으로 투영
pub trait Project {
    fn project(&self) -> PublicBlog;
}

impl Project for Blog {
    fn project(&self) -> PublicBlog {
        PublicBlog {
            id: self.id.clone(),
            title: self.title.clone(),
            content: self.content.clone(),
            author: PublicAuthor::from_ref(&self.author),
            comments: self.comments.iter().map(PublicComment::from).collect(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl Project for PublicBlog {
    fn project(&self) -> PublicBlog {
        self.clone()
    }
}
