use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Comment on a review.
///
/// Threads are one level deep. `parent_id` is `None` for a top-level comment and
/// otherwise points at the group head every reply in the thread shares.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Comment {
    pub id: i64,
    pub review_id: i64,
    pub user_id: i64,
    pub author_account_id: String,
    pub author_nickname: String,
    pub content: String,
    pub parent_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    /// The comment this one is grouped under; itself when top-level.
    pub fn group_id(&self) -> i64 {
        self.parent_id.unwrap_or(self.id)
    }

    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.user_id == user_id
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewComment {
    pub review_id: i64,
    pub user_id: i64,
    pub content: String,
    pub parent_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CommentResponse {
    pub id: i64,
    pub review_id: i64,
    pub user_id: i64,
    pub account_id: String,
    pub nickname: String,
    pub content: String,
    pub comment_group_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Comment> for CommentResponse {
    fn from(c: Comment) -> Self {
        let comment_group_id = c.group_id();
        Self {
            id: c.id,
            review_id: c.review_id,
            user_id: c.user_id,
            account_id: c.author_account_id,
            nickname: c.author_nickname,
            content: c.content,
            comment_group_id,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}
