use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Directed edge `user_id -> target_user_id`.
///
/// `follow_back_flag` is true exactly when the reverse edge also exists; both
/// edges are written in the same transaction whenever it changes.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Follow {
    pub id: i64,
    pub user_id: i64,
    pub target_user_id: i64,
    pub follow_back_flag: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FollowResponse {
    pub target_account_id: String,
    pub follow_back: bool,
}
