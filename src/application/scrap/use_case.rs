use super::dto::ScrapResponse;
use crate::{
    application::review::{assembler::ReviewAssembler, dto::ReviewResponse},
    domain::{
        review::{entity::Review, repository::ReviewRepository},
        shared::errors::{ConflictKind, DomainError},
        social::repository::ScrapRepository,
        user::entity::AuthenticatedUser,
    },
};
use std::sync::Arc;
use tracing::{info, instrument};

pub struct ScrapUseCase {
    scraps: Arc<dyn ScrapRepository>,
    reviews: Arc<dyn ReviewRepository>,
    assembler: ReviewAssembler,
}

impl ScrapUseCase {
    pub fn new(
        scraps: Arc<dyn ScrapRepository>,
        reviews: Arc<dyn ReviewRepository>,
        assembler: ReviewAssembler,
    ) -> Self {
        Self {
            scraps,
            reviews,
            assembler,
        }
    }

    async fn ensure_review(&self, review_id: i64) -> Result<Review, DomainError> {
        self.reviews
            .find_by_id(review_id)
            .await?
            .filter(Review::is_live)
            .ok_or_else(|| DomainError::NotFound(format!("review {}", review_id)))
    }

    #[instrument(skip(self, user), fields(user_id = user.id))]
    pub async fn add_scrap(
        &self,
        user: &AuthenticatedUser,
        review_id: i64,
    ) -> Result<ScrapResponse, DomainError> {
        self.ensure_review(review_id).await?;
        if self.scraps.exists(user.id, review_id).await? {
            return Err(DomainError::Conflict(ConflictKind::AlreadyScrapped));
        }
        self.scraps.insert(user.id, review_id).await?;
        info!("User {} scrapped review {}", user.id, review_id);
        Ok(ScrapResponse {
            review_id,
            is_scrapped: true,
        })
    }

    #[instrument(skip(self, user), fields(user_id = user.id))]
    pub async fn remove_scrap(
        &self,
        user: &AuthenticatedUser,
        review_id: i64,
    ) -> Result<ScrapResponse, DomainError> {
        self.ensure_review(review_id).await?;
        let scrap = self
            .scraps
            .find(user.id, review_id)
            .await?
            .ok_or(DomainError::Conflict(ConflictKind::NotYetScrapped))?;
        self.scraps.delete(&scrap).await?;
        info!("User {} removed scrap of review {}", user.id, review_id);
        Ok(ScrapResponse {
            review_id,
            is_scrapped: false,
        })
    }

    /// Reviews the user scrapped, most recent scrap first.
    pub async fn list_user_scraps(
        &self,
        user: &AuthenticatedUser,
    ) -> Result<Vec<ReviewResponse>, DomainError> {
        let reviews = self.scraps.find_scrapped_reviews(user.id).await?;
        let mut responses = self.assembler.assemble_all(Some(user), reviews).await?;
        for response in &mut responses {
            response.is_scrapped = true;
        }
        Ok(responses)
    }
}
