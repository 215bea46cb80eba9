use super::dto::{LoginRequest, RegisterRequest};
use crate::{
    domain::{
        shared::errors::DomainError,
        user::{
            entity::{AuthenticatedUser, NewUser, User, UserSummary},
            repository::UserRepository,
        },
    },
    infrastructure::storage::{
        traits::{FileOwnerType, FileStorage, UploadedFile},
        validation::ensure_images,
    },
};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use validator::Validate;

/// Account registration, credential checks and the profile image.
pub struct UserUseCase {
    users: Arc<dyn UserRepository>,
    storage: Arc<dyn FileStorage>,
    bcrypt_cost: u32,
}

impl UserUseCase {
    pub fn new(
        users: Arc<dyn UserRepository>,
        storage: Arc<dyn FileStorage>,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            users,
            storage,
            bcrypt_cost,
        }
    }

    async fn summary(&self, user: &User) -> Result<UserSummary, DomainError> {
        let profile_image = self
            .storage
            .list_file_names(FileOwnerType::User, user.id)
            .await?
            .pop();
        Ok(UserSummary::from_user(user, profile_image))
    }

    #[instrument(skip(self, request), fields(account_id = %request.account_id))]
    pub async fn register(&self, request: RegisterRequest) -> Result<UserSummary, DomainError> {
        let request = RegisterRequest {
            account_id: request.account_id.trim().to_lowercase(),
            nickname: request.nickname.trim().to_string(),
            password: request.password,
        };
        request.validate()?;

        let password_hash = bcrypt::hash(&request.password, self.bcrypt_cost)
            .map_err(|e| DomainError::InfrastructureError(format!("password hashing failed: {}", e)))?;

        let user = self
            .users
            .create(NewUser {
                account_id: request.account_id,
                password_hash,
                nickname: request.nickname,
            })
            .await?;
        info!("Registered user {}", user.id);
        Ok(UserSummary::from_user(&user, None))
    }

    /// Checks the credentials. Unknown accounts and wrong passwords are
    /// reported identically.
    #[instrument(skip(self, request), fields(account_id = %request.account_id))]
    pub async fn login(&self, request: LoginRequest) -> Result<UserSummary, DomainError> {
        let invalid = || DomainError::Unauthorized("invalid credentials".to_string());
        let account_id = request.account_id.trim().to_lowercase();

        let user = self
            .users
            .find_by_account_id(&account_id)
            .await?
            .ok_or_else(invalid)?;

        let valid = bcrypt::verify(&request.password, &user.password_hash)
            .map_err(|e| DomainError::InfrastructureError(format!("password check failed: {}", e)))?;
        if !valid {
            warn!("Failed login for user {}", user.id);
            return Err(invalid());
        }

        self.summary(&user).await
    }

    pub async fn me(&self, user: &AuthenticatedUser) -> Result<UserSummary, DomainError> {
        let user = self
            .users
            .find_by_id(user.id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("user {}", user.account_id)))?;
        self.summary(&user).await
    }

    /// Stores the new profile image and drops the previous ones.
    #[instrument(skip(self, user, image), fields(user_id = user.id))]
    pub async fn update_profile_image(
        &self,
        user: &AuthenticatedUser,
        image: UploadedFile,
    ) -> Result<UserSummary, DomainError> {
        ensure_images(std::slice::from_ref(&image))?;
        let previous = self
            .storage
            .list_file_names(FileOwnerType::User, user.id)
            .await?;

        self.storage
            .store_files(vec![image], user.id, FileOwnerType::User)
            .await?;
        if !previous.is_empty() {
            self.storage
                .delete_named(FileOwnerType::User, user.id, previous)
                .await?;
        }

        self.me(user).await
    }
}
