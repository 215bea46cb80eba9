use crate::domain::{
    review::{entity::Review, repository::ReviewRepository},
    shared::errors::DomainError,
    social::{
        reaction::{ReactionKind, ReactionResponse, classify_reaction_responses},
        repository::ReactionRepository,
    },
    user::entity::AuthenticatedUser,
};
use std::sync::Arc;
use tracing::{info, instrument};

pub struct ReactionUseCase {
    reactions: Arc<dyn ReactionRepository>,
    reviews: Arc<dyn ReviewRepository>,
}

impl ReactionUseCase {
    pub fn new(reactions: Arc<dyn ReactionRepository>, reviews: Arc<dyn ReviewRepository>) -> Self {
        Self { reactions, reviews }
    }

    async fn ensure_review(&self, review_id: i64) -> Result<Review, DomainError> {
        self.reviews
            .find_by_id(review_id)
            .await?
            .filter(Review::is_live)
            .ok_or_else(|| DomainError::NotFound(format!("review {}", review_id)))
    }

    /// Records the user's reaction, replacing a previous kind, and returns the
    /// review's reactions classified for that user.
    #[instrument(skip(self, user), fields(user_id = user.id))]
    pub async fn add_reaction(
        &self,
        user: &AuthenticatedUser,
        review_id: i64,
        kind: &str,
    ) -> Result<Vec<ReactionResponse>, DomainError> {
        self.ensure_review(review_id).await?;
        let kind: ReactionKind = kind.parse()?;

        let reaction = self.reactions.upsert(user.id, review_id, kind).await?;
        info!(
            "User {} reacted {} to review {}",
            user.id,
            reaction.kind.as_str(),
            review_id
        );

        let all = self.reactions.find_by_review(review_id).await?;
        Ok(classify_reaction_responses(Some(user.id), &all))
    }

    #[instrument(skip(self, user), fields(user_id = user.id))]
    pub async fn remove_reaction(
        &self,
        user: &AuthenticatedUser,
        review_id: i64,
    ) -> Result<(), DomainError> {
        self.ensure_review(review_id).await?;
        let reaction = self
            .reactions
            .find_by_user_and_review(user.id, review_id)
            .await?
            .ok_or_else(|| DomainError::NotFound("reaction not found".to_string()))?;
        self.reactions.delete_with_count(&reaction).await?;
        info!("User {} removed reaction from review {}", user.id, review_id);
        Ok(())
    }

    pub async fn get_reactions(
        &self,
        viewer: Option<&AuthenticatedUser>,
        review_id: i64,
    ) -> Result<Vec<ReactionResponse>, DomainError> {
        self.ensure_review(review_id).await?;
        let all = self.reactions.find_by_review(review_id).await?;
        Ok(classify_reaction_responses(viewer.map(|v| v.id), &all))
    }
}
