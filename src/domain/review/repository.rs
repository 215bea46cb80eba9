use super::entity::{NewReview, ProjectReviewFilter, Review, ReviewEdit, ReviewStatus};
use crate::domain::shared::errors::DomainError;
use async_trait::async_trait;

/// Persistence seam for the review aggregate.
///
/// Paged finders return live reviews only, ordered by id descending, with ids
/// strictly below `cursor` when one is given. The project finder follows the
/// filter's sort direction instead.
///
/// `update_fields` and `set_status` touch only the columns they name and only
/// while the review is live, failing with `NotFound` otherwise.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Inserts the review; a project review also bumps the project's review count
    /// in the same transaction.
    async fn create(&self, review: NewReview) -> Result<Review, DomainError>;
    /// Returns the row regardless of `exist_flag`.
    async fn find_by_id(&self, id: i64) -> Result<Option<Review>, DomainError>;
    /// Writes the fields set in `edit`.
    async fn update_fields(&self, id: i64, edit: &ReviewEdit) -> Result<Review, DomainError>;
    async fn set_status(&self, id: i64, status: ReviewStatus) -> Result<Review, DomainError>;
    /// Clears `exist_flag`. Returns false when the review was already gone.
    async fn soft_delete(&self, id: i64) -> Result<bool, DomainError>;
    async fn find_page(&self, cursor: Option<i64>, size: i64) -> Result<Vec<Review>, DomainError>;
    async fn find_page_by_user(
        &self,
        user_id: i64,
        cursor: Option<i64>,
        size: i64,
    ) -> Result<Vec<Review>, DomainError>;
    async fn find_page_by_project(
        &self,
        project_id: i64,
        filter: &ProjectReviewFilter,
        cursor: Option<i64>,
        size: i64,
    ) -> Result<Vec<Review>, DomainError>;
    /// Case-insensitive match on product name or content, excluding DELETED status.
    async fn search(&self, keyword: &str, size: i64) -> Result<Vec<Review>, DomainError>;
}
