use super::{
    assembler::ReviewAssembler,
    dto::{
        CreateReviewRequest, ProjectReviewsQuery, ReviewPage, ReviewResponse,
        UpdateReviewRequest,
    },
};
use crate::{
    domain::{
        project::repository::ProjectRepository,
        review::{
            entity::{NewReview, ProjectReviewFilter, Review, ReviewEdit, ReviewStatus},
            repository::ReviewRepository,
            value_objects::{ProductName, ProductUrl, ReviewContent, Score},
        },
        shared::{
            errors::DomainError,
            pagination::{CursorRequest, DEFAULT_PAGE_SIZE, SortDirection},
        },
        user::{entity::AuthenticatedUser, repository::UserRepository},
    },
    infrastructure::storage::{
        traits::{FileOwnerType, FileStorage, UploadedFile},
        validation::ensure_images,
    },
};
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Owns the review lifecycle: creation with images, owner edits, soft delete,
/// classification by the project owner and every feed built from reviews.
pub struct ReviewUseCase {
    reviews: Arc<dyn ReviewRepository>,
    projects: Arc<dyn ProjectRepository>,
    users: Arc<dyn UserRepository>,
    storage: Arc<dyn FileStorage>,
    assembler: ReviewAssembler,
}

impl ReviewUseCase {
    pub fn new(
        reviews: Arc<dyn ReviewRepository>,
        projects: Arc<dyn ProjectRepository>,
        users: Arc<dyn UserRepository>,
        storage: Arc<dyn FileStorage>,
        assembler: ReviewAssembler,
    ) -> Self {
        info!("Initializing ReviewUseCase");
        Self {
            reviews,
            projects,
            users,
            storage,
            assembler,
        }
    }

    /// Loads a review that has not been soft-deleted.
    async fn find_live(&self, review_id: i64) -> Result<Review, DomainError> {
        self.reviews
            .find_by_id(review_id)
            .await?
            .filter(Review::is_live)
            .ok_or_else(|| DomainError::NotFound(format!("review {}", review_id)))
    }

    /// Writes a personal review (not attached to any project).
    #[instrument(skip(self, author, request), fields(user_id = author.id))]
    pub async fn create(
        &self,
        author: &AuthenticatedUser,
        request: CreateReviewRequest,
    ) -> Result<ReviewResponse, DomainError> {
        self.create_review(author, None, request).await
    }

    /// Writes a review through a registered shopping-mall project.
    #[instrument(skip(self, author, request), fields(user_id = author.id))]
    pub async fn create_for_project(
        &self,
        author: &AuthenticatedUser,
        project_id: i64,
        request: CreateReviewRequest,
    ) -> Result<ReviewResponse, DomainError> {
        self.projects
            .find_by_id(project_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("project {}", project_id)))?;
        self.create_review(author, Some(project_id), request).await
    }

    async fn create_review(
        &self,
        author: &AuthenticatedUser,
        project_id: Option<i64>,
        request: CreateReviewRequest,
    ) -> Result<ReviewResponse, DomainError> {
        let score = Score::new(request.score)?;
        let content = ReviewContent::new(request.content)?;
        let product_url = ProductUrl::new(request.product_url)?;
        let product_name = ProductName::new(request.product_name)?;
        ensure_images(&request.images)?;

        let mut review = self
            .reviews
            .create(NewReview {
                user_id: author.id,
                project_id,
                content: content.value,
                product_url: product_url.value,
                product_name: product_name.value,
                score: score.value,
            })
            .await?;

        if !request.images.is_empty() {
            let stored = self
                .storage
                .store_files(request.images, review.id, FileOwnerType::Review)
                .await?;
            review = self
                .reviews
                .update_fields(review.id, &ReviewEdit::image_count(stored.len() as i32))
                .await?;
        }

        info!(
            "Review {} created with {} image(s)",
            review.id, review.review_image_count
        );
        self.assembler.assemble(Some(author), review).await
    }

    /// Owner edit. Only provided fields change; images are appended and removed
    /// by stored name, and the image count is recomputed from storage.
    #[instrument(skip(self, requester, request), fields(user_id = requester.id))]
    pub async fn update(
        &self,
        requester: &AuthenticatedUser,
        review_id: i64,
        request: UpdateReviewRequest,
    ) -> Result<ReviewResponse, DomainError> {
        let review = self.find_live(review_id).await?;
        if !review.is_owned_by(requester.id) {
            return Err(DomainError::Unauthorized(
                "only the author can edit this review".to_string(),
            ));
        }

        let mut edit = ReviewEdit {
            content: request
                .content
                .map(|c| ReviewContent::new(c).map(|c| c.value))
                .transpose()?,
            score: request
                .score
                .map(|s| Score::new(s).map(|s| s.value))
                .transpose()?,
            product_name: request
                .product_name
                .map(|n| ProductName::new(n).map(|n| n.value))
                .transpose()?,
            review_image_count: None,
        };
        ensure_images(&request.new_images)?;

        if !request.delete_file_names.is_empty() {
            let existing = self
                .storage
                .list_file_names(FileOwnerType::Review, review.id)
                .await?;
            if let Some(foreign) = request
                .delete_file_names
                .iter()
                .find(|name| !existing.contains(name))
            {
                return Err(DomainError::ValidationError(format!(
                    "file {} does not belong to review {}",
                    foreign, review.id
                )));
            }
        }

        if !request.delete_file_names.is_empty() || !request.new_images.is_empty() {
            let replaced = self
                .replace_images(review.id, request.new_images, request.delete_file_names)
                .await;
            let count = self
                .storage
                .list_file_names(FileOwnerType::Review, review.id)
                .await?
                .len() as i32;
            if let Err(e) = replaced {
                warn!("Image change on review {} failed: {}", review.id, e);
                self.reviews
                    .update_fields(review.id, &ReviewEdit::image_count(count))
                    .await?;
                return Err(e);
            }
            edit.review_image_count = Some(count);
        }

        let review = self.reviews.update_fields(review.id, &edit).await?;
        self.assembler.assemble(Some(requester), review).await
    }

    /// Stores new images before removing old ones.
    async fn replace_images(
        &self,
        review_id: i64,
        new_images: Vec<UploadedFile>,
        delete_file_names: Vec<String>,
    ) -> Result<(), DomainError> {
        if !new_images.is_empty() {
            self.storage
                .store_files(new_images, review_id, FileOwnerType::Review)
                .await?;
        }
        if !delete_file_names.is_empty() {
            let removed = self
                .storage
                .delete_named(FileOwnerType::Review, review_id, delete_file_names)
                .await?;
            debug!("Removed {} image(s) from review {}", removed, review_id);
        }
        Ok(())
    }

    /// Clears `exist_flag`. Comments, reactions and scraps stay in place.
    /// Deleting an already deleted review is a no-op.
    #[instrument(skip(self, requester), fields(user_id = requester.id))]
    pub async fn soft_delete(
        &self,
        requester: &AuthenticatedUser,
        review_id: i64,
    ) -> Result<(), DomainError> {
        let review = self
            .reviews
            .find_by_id(review_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("review {}", review_id)))?;

        if !review.is_owned_by(requester.id) {
            return Err(DomainError::Unauthorized(
                "only the author can delete this review".to_string(),
            ));
        }

        if !review.is_live() || !self.reviews.soft_delete(review_id).await? {
            info!("Review {} already deleted, nothing to do", review_id);
            return Ok(());
        }
        info!("Review {} soft-deleted", review_id);
        Ok(())
    }

    /// Sets the status of a project review. Only the owner of the review's
    /// project may do this.
    #[instrument(skip(self, requester), fields(user_id = requester.id))]
    pub async fn classify(
        &self,
        requester: &AuthenticatedUser,
        review_id: i64,
        status: &str,
    ) -> Result<ReviewResponse, DomainError> {
        let status: ReviewStatus = status.parse()?;
        let review = self.find_live(review_id).await?;

        let project_id = review.project_id.ok_or_else(|| {
            DomainError::Unauthorized("review does not belong to a project".to_string())
        })?;
        let owns_project = self
            .projects
            .find_by_id(project_id)
            .await?
            .is_some_and(|p| p.is_owned_by(requester.id));
        if !owns_project {
            warn!(
                "User {} tried to classify review {} of project {}",
                requester.id, review_id, project_id
            );
            return Err(DomainError::Unauthorized(
                "only the project owner can classify this review".to_string(),
            ));
        }

        let review = self.reviews.set_status(review.id, status).await?;
        info!("Review {} classified as {}", review.id, status.as_str());
        self.assembler.assemble(Some(requester), review).await
    }

    pub async fn get(
        &self,
        viewer: Option<&AuthenticatedUser>,
        review_id: i64,
    ) -> Result<ReviewResponse, DomainError> {
        let review = self.find_live(review_id).await?;
        self.assembler.assemble(viewer, review).await
    }

    /// Main feed: live reviews, newest first.
    pub async fn list(
        &self,
        viewer: Option<&AuthenticatedUser>,
        cursor: CursorRequest,
    ) -> Result<ReviewPage, DomainError> {
        let size = cursor.safe_size();
        let reviews = self.reviews.find_page(cursor.review_id, size).await?;
        let responses = self.assembler.assemble_all(viewer, reviews).await?;
        Ok(ReviewPage::new(responses, size))
    }

    pub async fn list_by_user(
        &self,
        viewer: Option<&AuthenticatedUser>,
        account_id: &str,
        cursor: CursorRequest,
    ) -> Result<ReviewPage, DomainError> {
        let author = self
            .users
            .find_by_account_id(account_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("user {}", account_id)))?;

        let size = cursor.safe_size();
        let reviews = self
            .reviews
            .find_page_by_user(author.id, cursor.review_id, size)
            .await?;
        let responses = self.assembler.assemble_all(viewer, reviews).await?;
        Ok(ReviewPage::new(responses, size))
    }

    pub async fn search(
        &self,
        viewer: Option<&AuthenticatedUser>,
        keyword: &str,
        size: Option<i64>,
    ) -> Result<Vec<ReviewResponse>, DomainError> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(DomainError::ValidationError(
                "search keyword is required".to_string(),
            ));
        }
        let size = CursorRequest::new(None, size.unwrap_or(DEFAULT_PAGE_SIZE)).safe_size();
        let reviews = self.reviews.search(keyword, size).await?;
        debug!("Search '{}' matched {} review(s)", keyword, reviews.len());
        self.assembler.assemble_all(viewer, reviews).await
    }

    /// Management view of a project's reviews, narrowed by status, keyword and
    /// creation day, in the requested id order.
    pub async fn list_for_project(
        &self,
        requester: &AuthenticatedUser,
        project_id: i64,
        query: ProjectReviewsQuery,
    ) -> Result<ReviewPage, DomainError> {
        let cursor = CursorRequest::new(query.review_id, query.size.unwrap_or(DEFAULT_PAGE_SIZE));
        let filter = project_filter(query)?;
        let project = self
            .projects
            .find_by_id(project_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("project {}", project_id)))?;
        if !project.is_owned_by(requester.id) {
            return Err(DomainError::Unauthorized(
                "only the project owner can manage its reviews".to_string(),
            ));
        }

        let size = cursor.safe_size();
        let reviews = self
            .reviews
            .find_page_by_project(project_id, &filter, cursor.review_id, size)
            .await?;
        let responses = self.assembler.assemble_all(Some(requester), reviews).await?;
        Ok(ReviewPage::new(responses, size))
    }
}

fn project_filter(query: ProjectReviewsQuery) -> Result<ProjectReviewFilter, DomainError> {
    let filter = ProjectReviewFilter {
        status: non_blank(query.status)
            .map(|s| s.parse::<ReviewStatus>())
            .transpose()?,
        keyword: non_blank(query.keyword),
        start_date: non_blank(query.start_date).map(|d| parse_day(&d)).transpose()?,
        end_date: non_blank(query.end_date).map(|d| parse_day(&d)).transpose()?,
        sort: non_blank(query.sort)
            .map(|s| s.parse::<SortDirection>())
            .transpose()?
            .unwrap_or_default(),
    };
    if let (Some(start), Some(end)) = (filter.start_date, filter.end_date) {
        if start > end {
            return Err(DomainError::ValidationError(format!(
                "start_date {} is after end_date {}",
                start, end
            )));
        }
    }
    Ok(filter)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_day(value: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        DomainError::ValidationError(format!("expected a YYYY-MM-DD date, got {}", value))
    })
}
