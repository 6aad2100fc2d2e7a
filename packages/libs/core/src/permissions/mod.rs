//! 블로그/댓글 권한 판단
//!
//! # 개요
//!
//! 호출자(`Claims`)와 호출 측에서 이미 읽어 온 리소스만으로 허용/거부를 결정합니다.
//! 저장소 접근이나 부수 효과는 없습니다. 리소스가 없는 경우는 호출 측에서 먼저
//! `NotFound`로 처리하며, 여기서는 판단하지 않습니다.
//!
//! | 작업 | 허용 조건 |
//! |---|---|
//! | Blog 수정/삭제 | 관리자 OR 블로그 작성자 |
//! | 댓글 삭제 | 관리자 OR 블로그 작성자 OR 댓글 작성자 |
//! | 댓글 수정 | 관리자 |

mod policy;

pub use policy::{
    authorize_blog, authorize_comment_delete, authorize_comment_update, can_delete_comment,
    can_mutate_blog, can_update_comment, BlogAction, Decision,
};
