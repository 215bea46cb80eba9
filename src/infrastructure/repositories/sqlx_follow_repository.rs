use super::{USER_COLUMNS, conflict_on_unique, db_error};
use crate::domain::{
    shared::errors::{ConflictKind, DomainError},
    social::{follow::Follow, repository::FollowRepository},
    user::entity::User,
};
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{debug, instrument};

pub struct SqlxFollowRepository {
    pub pool: PgPool,
}

impl SqlxFollowRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Serializes writers on both directions of a user pair until the
    /// transaction ends.
    async fn lock_pair(
        tx: &mut Transaction<'_, Postgres>,
        a: i64,
        b: i64,
    ) -> Result<(), DomainError> {
        sqlx::query("SELECT pg_advisory_xact_lock(hashtextextended($1, 0))")
            .bind(format!("follow:{}:{}", a.min(b), a.max(b)))
            .execute(&mut **tx)
            .await
            .map_err(db_error)?;
        Ok(())
    }
}

#[async_trait]
impl FollowRepository for SqlxFollowRepository {
    async fn find(&self, user_id: i64, target_user_id: i64) -> Result<Option<Follow>, DomainError> {
        sqlx::query_as::<_, Follow>(
            "SELECT id, user_id, target_user_id, follow_back_flag, created_at
             FROM follows WHERE user_id = $1 AND target_user_id = $2",
        )
        .bind(user_id)
        .bind(target_user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)
    }

    #[instrument(skip(self))]
    async fn create(&self, user_id: i64, target_user_id: i64) -> Result<Follow, DomainError> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;
        Self::lock_pair(&mut tx, user_id, target_user_id).await?;

        // The reverse edge is read and raised under the pair lock, so the new
        // edge's flag matches what is stored.
        let follow_back = sqlx::query(
            "UPDATE follows SET follow_back_flag = TRUE
             WHERE user_id = $1 AND target_user_id = $2",
        )
        .bind(target_user_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await
        .map_err(db_error)?
        .rows_affected()
            > 0;

        let follow = sqlx::query_as::<_, Follow>(
            "INSERT INTO follows (user_id, target_user_id, follow_back_flag)
             VALUES ($1, $2, $3)
             RETURNING id, user_id, target_user_id, follow_back_flag, created_at",
        )
        .bind(user_id)
        .bind(target_user_id)
        .bind(follow_back)
        .fetch_one(&mut *tx)
        .await
        .map_err(conflict_on_unique(ConflictKind::AlreadyFollowing))?;

        tx.commit().await.map_err(db_error)?;
        debug!("Follow edge {} created", follow.id);
        Ok(follow)
    }

    #[instrument(skip(self, follow), fields(user_id = follow.user_id, target_user_id = follow.target_user_id))]
    async fn delete(&self, follow: &Follow) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;
        Self::lock_pair(&mut tx, follow.user_id, follow.target_user_id).await?;

        sqlx::query("DELETE FROM follows WHERE id = $1")
            .bind(follow.id)
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;

        sqlx::query(
            "UPDATE follows SET follow_back_flag = FALSE
             WHERE user_id = $1 AND target_user_id = $2",
        )
        .bind(follow.target_user_id)
        .bind(follow.user_id)
        .execute(&mut *tx)
        .await
        .map_err(db_error)?;

        tx.commit().await.map_err(db_error)?;
        Ok(())
    }

    async fn find_followers(&self, user_id: i64) -> Result<Vec<User>, DomainError> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS}
             FROM follows f JOIN users u ON u.id = f.user_id
             WHERE f.target_user_id = $1
             ORDER BY f.id"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)
    }

    async fn find_followings(&self, user_id: i64) -> Result<Vec<User>, DomainError> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS}
             FROM follows f JOIN users u ON u.id = f.target_user_id
             WHERE f.user_id = $1
             ORDER BY f.id"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)
    }
}
