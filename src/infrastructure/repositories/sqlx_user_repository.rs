use super::{USER_COLUMNS, conflict_on_unique, db_error};
use crate::domain::{
    shared::errors::{ConflictKind, DomainError},
    user::{
        entity::{NewUser, User},
        repository::UserRepository,
    },
};
use async_trait::async_trait;
use sqlx::PgPool;

pub struct SqlxUserRepository {
    pub pool: PgPool,
}

impl SqlxUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for SqlxUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (account_id, password_hash, nickname)
             VALUES ($1, $2, $3)
             RETURNING id, account_id, password_hash, nickname, created_at",
        )
        .bind(&user.account_id)
        .bind(&user.password_hash)
        .bind(&user.nickname)
        .fetch_one(&self.pool)
        .await
        .map_err(conflict_on_unique(ConflictKind::AccountIdAlreadyExists))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users u WHERE u.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)
    }

    async fn find_by_account_id(&self, account_id: &str) -> Result<Option<User>, DomainError> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users u WHERE u.account_id = $1"
        ))
        .bind(account_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)
    }
}
