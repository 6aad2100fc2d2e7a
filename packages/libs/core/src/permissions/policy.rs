//! 권한 정책

use crate::auth::Claims;
use crate::error::{Error, Result};
use crate::model::{Blog, Comment};

/// Blog 변경 작업
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlogAction {
    Update,
    Delete,
}

impl BlogAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlogAction::Update => "update",
            BlogAction::Delete => "delete",
        }
    }
}

/// 권한 판단 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    /// 허용 여부
    pub allowed: bool,

    /// 거부 사유 (allowed=false인 경우)
    pub reason: Option<String>,
}

impl Decision {
    pub fn allow() -> Self {
        Self {
            allowed: true,
            reason: None,
        }
    }

    pub fn deny(reason: impl Into<String>) -> Self {
        Self {
            allowed: false,
            reason: Some(reason.into()),
        }
    }

    fn from_check(allowed: bool, reason: impl FnOnce() -> String) -> Self {
        if allowed {
            Self::allow()
        } else {
            Self::deny(reason())
        }
    }

    /// 거부 시 `Forbidden` 에러로 변환
    pub fn into_result(self) -> Result<()> {
        if self.allowed {
            Ok(())
        } else {
            Err(Error::forbidden(
                self.reason.unwrap_or_else(|| "access denied".to_string()),
            ))
        }
    }
}

/// 관리자이거나 블로그 작성자
pub fn can_mutate_blog(identity: &Claims, blog: &Blog) -> bool {
    identity.is_admin || identity.is_same_user(blog.author_id())
}

/// 관리자, 블로그 작성자, 댓글 작성자 중 하나
pub fn can_delete_comment(identity: &Claims, blog: &Blog, comment: &Comment) -> bool {
    identity.is_admin
        || identity.is_same_user(blog.author_id())
        || identity.is_same_user(comment.author.id())
}

/// 관리자만
///
/// 삭제보다 엄격합니다. 댓글 작성자도 자신의 댓글을 수정할 수 없습니다.
pub fn can_update_comment(identity: &Claims) -> bool {
    identity.is_admin
}

pub fn authorize_blog(identity: &Claims, blog: &Blog, action: BlogAction) -> Decision {
    Decision::from_check(can_mutate_blog(identity, blog), || {
        format!(
            "only the blog author or an admin can {} this blog",
            action.as_str()
        )
    })
}

pub fn authorize_comment_delete(identity: &Claims, blog: &Blog, comment: &Comment) -> Decision {
    Decision::from_check(can_delete_comment(identity, blog, comment), || {
        "only an admin, the blog author, or the comment author can delete this comment".to_string()
    })
}

pub fn authorize_comment_update(identity: &Claims) -> Decision {
    Decision::from_check(can_update_comment(identity), || {
        "only an admin can update comments".to_string()
    })
}
