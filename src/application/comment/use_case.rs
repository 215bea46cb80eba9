use super::dto::{AddCommentRequest, EditCommentRequest};
use crate::domain::{
    review::{entity::Review, repository::ReviewRepository},
    shared::errors::DomainError,
    social::{
        comment::{Comment, CommentResponse, NewComment},
        repository::CommentRepository,
    },
    user::entity::AuthenticatedUser,
};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use validator::Validate;

pub struct CommentUseCase {
    comments: Arc<dyn CommentRepository>,
    reviews: Arc<dyn ReviewRepository>,
}

impl CommentUseCase {
    pub fn new(comments: Arc<dyn CommentRepository>, reviews: Arc<dyn ReviewRepository>) -> Self {
        Self { comments, reviews }
    }

    async fn ensure_review(&self, review_id: i64) -> Result<Review, DomainError> {
        self.reviews
            .find_by_id(review_id)
            .await?
            .filter(Review::is_live)
            .ok_or_else(|| DomainError::NotFound(format!("review {}", review_id)))
    }

    async fn owned_comment(
        &self,
        user: &AuthenticatedUser,
        comment_id: i64,
    ) -> Result<Comment, DomainError> {
        let comment = self
            .comments
            .find_by_id(comment_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("comment {}", comment_id)))?;
        if !comment.is_owned_by(user.id) {
            warn!(
                "User {} tried to modify comment {} owned by {}",
                user.id, comment.id, comment.user_id
            );
            return Err(DomainError::Unauthorized(
                "only the author can modify this comment".to_string(),
            ));
        }
        Ok(comment)
    }

    /// Adds a comment. Replies are attached to the group head of the comment
    /// they answer, so threads never nest deeper than one level. A parent that
    /// is unknown or belongs to another review starts a new thread.
    #[instrument(skip(self, user, request), fields(user_id = user.id))]
    pub async fn add_comment(
        &self,
        user: &AuthenticatedUser,
        review_id: i64,
        request: AddCommentRequest,
    ) -> Result<CommentResponse, DomainError> {
        request.validate()?;
        self.ensure_review(review_id).await?;

        let parent_id = if request.parent_id > 0 {
            self.comments
                .find_by_id(request.parent_id)
                .await?
                .filter(|parent| parent.review_id == review_id)
                .map(|parent| parent.group_id())
        } else {
            None
        };

        let comment = self
            .comments
            .insert_with_count(NewComment {
                review_id,
                user_id: user.id,
                content: request.content,
                parent_id,
            })
            .await?;
        info!(
            "Comment {} added to review {} (group {})",
            comment.id,
            review_id,
            comment.group_id()
        );
        Ok(comment.into())
    }

    #[instrument(skip(self, user), fields(user_id = user.id))]
    pub async fn delete_comment(
        &self,
        user: &AuthenticatedUser,
        comment_id: i64,
    ) -> Result<(), DomainError> {
        let comment = self.owned_comment(user, comment_id).await?;
        self.comments.delete_with_count(&comment).await?;
        info!("Comment {} deleted", comment_id);
        Ok(())
    }

    #[instrument(skip(self, user, request), fields(user_id = user.id))]
    pub async fn edit_comment(
        &self,
        user: &AuthenticatedUser,
        comment_id: i64,
        request: EditCommentRequest,
    ) -> Result<CommentResponse, DomainError> {
        request.validate()?;
        let comment = self.owned_comment(user, comment_id).await?;
        let updated = self
            .comments
            .update_content(comment.id, &request.content)
            .await?;
        Ok(updated.into())
    }

    pub async fn get_comments(&self, review_id: i64) -> Result<Vec<CommentResponse>, DomainError> {
        self.ensure_review(review_id).await?;
        let comments = self.comments.find_by_review(review_id).await?;
        Ok(comments.into_iter().map(CommentResponse::from).collect())
    }
}
