use crate::{
    domain::{
        shared::errors::{ConflictKind, DomainError},
        social::{follow::FollowResponse, repository::FollowRepository},
        user::{
            entity::{AuthenticatedUser, User, UserSummary},
            repository::UserRepository,
        },
    },
    infrastructure::storage::traits::{FileOwnerType, FileStorage},
};
use std::sync::Arc;
use tracing::{info, instrument};

/// Directed follow edges between accounts. The back-follow flag of both edges
/// of a mutual pair is kept in sync by the repository transaction.
pub struct FollowUseCase {
    follows: Arc<dyn FollowRepository>,
    users: Arc<dyn UserRepository>,
    storage: Arc<dyn FileStorage>,
}

impl FollowUseCase {
    pub fn new(
        follows: Arc<dyn FollowRepository>,
        users: Arc<dyn UserRepository>,
        storage: Arc<dyn FileStorage>,
    ) -> Self {
        Self {
            follows,
            users,
            storage,
        }
    }

    async fn find_account(&self, account_id: &str) -> Result<User, DomainError> {
        self.users
            .find_by_account_id(account_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("user {}", account_id)))
    }

    #[instrument(skip(self, user), fields(user_id = user.id))]
    pub async fn follow(
        &self,
        user: &AuthenticatedUser,
        target_account_id: &str,
    ) -> Result<FollowResponse, DomainError> {
        let target = self.find_account(target_account_id).await?;
        if target.id == user.id {
            return Err(DomainError::ValidationError(
                "cannot follow yourself".to_string(),
            ));
        }
        if self.follows.find(user.id, target.id).await?.is_some() {
            return Err(DomainError::Conflict(ConflictKind::AlreadyFollowing));
        }

        let follow = self.follows.create(user.id, target.id).await?;
        info!(
            "User {} now follows {} (follow back: {})",
            user.id, target.id, follow.follow_back_flag
        );
        Ok(FollowResponse {
            target_account_id: target.account_id,
            follow_back: follow.follow_back_flag,
        })
    }

    /// Removes the forward edge only; the reverse edge survives with its
    /// back-follow flag cleared.
    #[instrument(skip(self, user), fields(user_id = user.id))]
    pub async fn unfollow(
        &self,
        user: &AuthenticatedUser,
        target_account_id: &str,
    ) -> Result<(), DomainError> {
        let target = self.find_account(target_account_id).await?;
        let follow = self
            .follows
            .find(user.id, target.id)
            .await?
            .ok_or(DomainError::Conflict(ConflictKind::NotFollowing))?;
        self.follows.delete(&follow).await?;
        info!("User {} unfollowed {}", user.id, target.id);
        Ok(())
    }

    pub async fn list_followers(&self, account_id: &str) -> Result<Vec<UserSummary>, DomainError> {
        let user = self.find_account(account_id).await?;
        let followers = self.follows.find_followers(user.id).await?;
        self.summarize(followers).await
    }

    pub async fn list_following(&self, account_id: &str) -> Result<Vec<UserSummary>, DomainError> {
        let user = self.find_account(account_id).await?;
        let followings = self.follows.find_followings(user.id).await?;
        self.summarize(followings).await
    }

    async fn summarize(&self, users: Vec<User>) -> Result<Vec<UserSummary>, DomainError> {
        let mut summaries = Vec::with_capacity(users.len());
        for user in &users {
            let profile_image = self
                .storage
                .list_file_names(FileOwnerType::User, user.id)
                .await?
                .pop();
            summaries.push(UserSummary::from_user(user, profile_image));
        }
        Ok(summaries)
    }
}
