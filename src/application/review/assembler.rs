use super::dto::ReviewResponse;
use crate::{
    domain::{
        review::entity::Review,
        shared::errors::DomainError,
        social::{
            reaction::classify_reaction_responses,
            repository::{ReactionRepository, ScrapRepository},
        },
        user::entity::AuthenticatedUser,
    },
    infrastructure::storage::traits::{FileOwnerType, FileStorage},
};
use std::sync::Arc;

/// Enriches reviews with their image names, the reactions classified for the
/// viewer and whether the viewer scrapped them.
#[derive(Clone)]
pub struct ReviewAssembler {
    reactions: Arc<dyn ReactionRepository>,
    scraps: Arc<dyn ScrapRepository>,
    storage: Arc<dyn FileStorage>,
}

impl ReviewAssembler {
    pub fn new(
        reactions: Arc<dyn ReactionRepository>,
        scraps: Arc<dyn ScrapRepository>,
        storage: Arc<dyn FileStorage>,
    ) -> Self {
        Self {
            reactions,
            scraps,
            storage,
        }
    }

    pub async fn assemble(
        &self,
        viewer: Option<&AuthenticatedUser>,
        review: Review,
    ) -> Result<ReviewResponse, DomainError> {
        let image_names = self
            .storage
            .list_file_names(FileOwnerType::Review, review.id)
            .await?;
        let reactions = self.reactions.find_by_review(review.id).await?;
        let classified = classify_reaction_responses(viewer.map(|v| v.id), &reactions);
        let is_scrapped = match viewer {
            Some(v) => self.scraps.exists(v.id, review.id).await?,
            None => false,
        };
        Ok(ReviewResponse::new(review, image_names, classified, is_scrapped))
    }

    pub async fn assemble_all(
        &self,
        viewer: Option<&AuthenticatedUser>,
        reviews: Vec<Review>,
    ) -> Result<Vec<ReviewResponse>, DomainError> {
        let mut out = Vec::with_capacity(reviews.len());
        for review in reviews {
            out.push(self.assemble(viewer, review).await?);
        }
        Ok(out)
    }
}
