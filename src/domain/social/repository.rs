use super::{
    comment::{Comment, NewComment},
    follow::Follow,
    reaction::{Reaction, ReactionKind},
    scrap::ReviewScrap,
};
use crate::domain::{review::entity::Review, shared::errors::DomainError, user::entity::User};
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Comment>, DomainError>;
    /// All comments of a review in insertion order.
    async fn find_by_review(&self, review_id: i64) -> Result<Vec<Comment>, DomainError>;
    /// Inserts the comment and increments the review's comment count atomically.
    async fn insert_with_count(&self, comment: NewComment) -> Result<Comment, DomainError>;
    /// Deletes the comment and decrements the review's comment count atomically.
    async fn delete_with_count(&self, comment: &Comment) -> Result<(), DomainError>;
    async fn update_content(&self, id: i64, content: &str) -> Result<Comment, DomainError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReactionRepository: Send + Sync {
    /// Writes the user's reaction, replacing the kind of an existing one. The
    /// review's reaction count grows only when a new row was inserted.
    async fn upsert(
        &self,
        user_id: i64,
        review_id: i64,
        kind: ReactionKind,
    ) -> Result<Reaction, DomainError>;
    async fn find_by_user_and_review(
        &self,
        user_id: i64,
        review_id: i64,
    ) -> Result<Option<Reaction>, DomainError>;
    async fn find_by_review(&self, review_id: i64) -> Result<Vec<Reaction>, DomainError>;
    /// Deletes the reaction and decrements the review's reaction count atomically.
    async fn delete_with_count(&self, reaction: &Reaction) -> Result<(), DomainError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScrapRepository: Send + Sync {
    async fn find(&self, user_id: i64, review_id: i64) -> Result<Option<ReviewScrap>, DomainError>;
    async fn exists(&self, user_id: i64, review_id: i64) -> Result<bool, DomainError>;
    /// Fails with `Conflict(AlreadyScrapped)` when the pair already exists.
    async fn insert(&self, user_id: i64, review_id: i64) -> Result<ReviewScrap, DomainError>;
    async fn delete(&self, scrap: &ReviewScrap) -> Result<(), DomainError>;
    /// Live reviews the user scrapped, most recent scrap first.
    async fn find_scrapped_reviews(&self, user_id: i64) -> Result<Vec<Review>, DomainError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FollowRepository: Send + Sync {
    async fn find(&self, user_id: i64, target_user_id: i64) -> Result<Option<Follow>, DomainError>;
    /// Inserts the edge. Its flag is set, and the reverse edge's flag raised, when
    /// the reverse edge exists at write time. Fails with `Conflict(AlreadyFollowing)`
    /// when the edge already exists.
    async fn create(&self, user_id: i64, target_user_id: i64) -> Result<Follow, DomainError>;
    /// Deletes the edge and clears the reverse edge's flag, if that edge exists,
    /// in the same transaction.
    async fn delete(&self, follow: &Follow) -> Result<(), DomainError>;
    /// Users following `user_id`, in edge order.
    async fn find_followers(&self, user_id: i64) -> Result<Vec<User>, DomainError>;
    /// Users `user_id` follows, in edge order.
    async fn find_followings(&self, user_id: i64) -> Result<Vec<User>, DomainError>;
}
