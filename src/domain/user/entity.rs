use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Registered account. Never serialized directly: it carries the password hash.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub account_id: String,
    pub password_hash: String,
    pub nickname: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub account_id: String,
    pub password_hash: String,
    pub nickname: String,
}

/// Principal resolved from the bearer token and handed to every manager call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: i64,
    pub account_id: String,
}

impl AuthenticatedUser {
    pub fn new(id: i64, account_id: impl Into<String>) -> Self {
        Self {
            id,
            account_id: account_id.into(),
        }
    }
}

/// Public view of an account, used in follow lists and `/auth/me`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UserSummary {
    pub id: i64,
    pub account_id: String,
    pub nickname: String,
    pub profile_image: Option<String>,
}

impl UserSummary {
    pub fn from_user(user: &User, profile_image: Option<String>) -> Self {
        Self {
            id: user.id,
            account_id: user.account_id.clone(),
            nickname: user.nickname.clone(),
            profile_image,
        }
    }
}
