use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A shopping-mall site registered by a user. Reviews written through the
/// site belong to the project, and only the project owner may classify them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, sqlx::FromRow)]
#[ts(export)]
pub struct Project {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub uri: String,
    pub description: Option<String>,
    /// Number of reviews attached to this project (cached)
    pub review_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.user_id == user_id
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewProject {
    pub user_id: i64,
    pub name: String,
    pub uri: String,
    pub description: Option<String>,
}
