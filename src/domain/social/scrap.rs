use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct ReviewScrap {
    pub id: i64,
    pub user_id: i64,
    pub review_id: i64,
    pub created_at: DateTime<Utc>,
}
