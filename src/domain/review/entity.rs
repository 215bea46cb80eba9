use crate::domain::shared::errors::DomainError;
use crate::domain::shared::pagination::SortDirection;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use ts_rs::TS;

/// Core aggregate: a user's review of a product.
///
/// # Lifecycle
/// 1. **Pending** - written, awaiting the project owner's decision
/// 2. **Approved** / **Rejected** - classified by the project owner
/// 3. **Deleted** - classified away by the project owner
///
/// Independently of `status`, the author can soft-delete a review, which clears
/// `exist_flag` and hides it from every read path without removing the row.
///
/// # Invariants
/// - `comment_count` equals the number of comment rows for this review
/// - `reaction_count` equals the number of reaction rows for this review
/// - `review_image_count` equals the number of files stored for this review
/// - `score` is within 0..=5
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Review {
    pub id: i64,

    /// Author of the review
    pub user_id: i64,
    pub author_account_id: String,
    pub author_nickname: String,

    /// Shopping-mall project the review was written through, if any
    pub project_id: Option<i64>,

    pub content: String,
    pub product_url: String,
    pub product_name: String,
    pub score: i32,
    pub status: ReviewStatus,

    pub comment_count: i32,
    pub reaction_count: i32,
    pub review_image_count: i32,

    /// False once the author soft-deleted the review
    pub exist_flag: bool,
    pub certification_flag: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Review {
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.user_id == user_id
    }

    pub fn is_live(&self) -> bool {
        self.exist_flag
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewReview {
    pub user_id: i64,
    pub project_id: Option<i64>,
    pub content: String,
    pub product_url: String,
    pub product_name: String,
    pub score: i32,
}

/// Author-editable columns of a review. `None` leaves the stored value as is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewEdit {
    pub content: Option<String>,
    pub score: Option<i32>,
    pub product_name: Option<String>,
    pub review_image_count: Option<i32>,
}

impl ReviewEdit {
    pub fn image_count(count: i32) -> Self {
        Self {
            review_image_count: Some(count),
            ..Self::default()
        }
    }
}

/// Narrowing of a project's review listing. Dates bound the creation day
/// inclusively; the keyword matches product name or content.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectReviewFilter {
    pub status: Option<ReviewStatus>,
    pub keyword: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub sort: SortDirection,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS, sqlx::Type,
)]
#[sqlx(type_name = "text", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum ReviewStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    Deleted,
}

impl ReviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewStatus::Pending => "PENDING",
            ReviewStatus::Approved => "APPROVED",
            ReviewStatus::Rejected => "REJECTED",
            ReviewStatus::Deleted => "DELETED",
        }
    }
}

impl FromStr for ReviewStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Ok(ReviewStatus::Pending),
            "APPROVED" => Ok(ReviewStatus::Approved),
            "REJECTED" => Ok(ReviewStatus::Rejected),
            "DELETED" => Ok(ReviewStatus::Deleted),
            other => Err(DomainError::ValidationError(format!(
                "unknown review status: {}",
                other
            ))),
        }
    }
}
