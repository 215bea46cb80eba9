use crate::{
    domain::{
        review::entity::{Review, ReviewStatus},
        social::reaction::ReactionResponse,
    },
    infrastructure::storage::traits::UploadedFile,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Fields of a new review, parsed from a multipart form.
#[derive(Debug, Clone, Default)]
pub struct CreateReviewRequest {
    pub content: String,
    pub product_url: String,
    pub product_name: String,
    pub score: i32,
    pub images: Vec<UploadedFile>,
}

/// Partial update: `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateReviewRequest {
    pub content: Option<String>,
    pub product_name: Option<String>,
    pub score: Option<i32>,
    pub new_images: Vec<UploadedFile>,
    pub delete_file_names: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ClassifyReviewRequest {
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SearchReviewsQuery {
    pub keyword: String,
    pub size: Option<i64>,
}

/// Query string of the project management listing. Dates are `YYYY-MM-DD`
/// and bound the creation day inclusively; `sort` is `asc` or `desc`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProjectReviewsQuery {
    pub status: Option<String>,
    pub review_id: Option<i64>,
    pub size: Option<i64>,
    pub sort: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub keyword: Option<String>,
}

/// A review as shown to a particular viewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReviewResponse {
    pub id: i64,
    pub user_id: i64,
    pub account_id: String,
    pub nickname: String,
    pub project_id: Option<i64>,
    pub content: String,
    pub product_url: String,
    pub product_name: String,
    pub score: i32,
    pub status: ReviewStatus,
    pub comment_count: i32,
    pub reaction_count: i32,
    pub review_image_count: i32,
    pub certification_flag: bool,
    pub image_names: Vec<String>,
    pub reactions: Vec<ReactionResponse>,
    pub is_scrapped: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ReviewResponse {
    pub fn new(
        review: Review,
        image_names: Vec<String>,
        reactions: Vec<ReactionResponse>,
        is_scrapped: bool,
    ) -> Self {
        Self {
            id: review.id,
            user_id: review.user_id,
            account_id: review.author_account_id,
            nickname: review.author_nickname,
            project_id: review.project_id,
            content: review.content,
            product_url: review.product_url,
            product_name: review.product_name,
            score: review.score,
            status: review.status,
            comment_count: review.comment_count,
            reaction_count: review.reaction_count,
            review_image_count: review.review_image_count,
            certification_flag: review.certification_flag,
            image_names,
            reactions,
            is_scrapped,
            created_at: review.created_at,
            updated_at: review.updated_at,
        }
    }
}

/// One page of a keyset-paginated feed. `next_cursor` is the id to pass as
/// `review_id` for the following page; absent on the last page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReviewPage {
    pub reviews: Vec<ReviewResponse>,
    pub next_cursor: Option<i64>,
}

impl ReviewPage {
    pub fn new(reviews: Vec<ReviewResponse>, size: i64) -> Self {
        let next_cursor = if reviews.len() as i64 == size {
            reviews.last().map(|r| r.id)
        } else {
            None
        };
        Self {
            reviews,
            next_cursor,
        }
    }
}
