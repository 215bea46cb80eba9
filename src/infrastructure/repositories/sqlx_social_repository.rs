use super::{REVIEW_COLUMNS, conflict_on_unique, db_error};
use crate::domain::{
    review::entity::Review,
    shared::errors::{ConflictKind, DomainError},
    social::{
        comment::{Comment, NewComment},
        reaction::{Reaction, ReactionKind},
        repository::{CommentRepository, ReactionRepository, ScrapRepository},
        scrap::ReviewScrap,
    },
};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

const COMMENT_SELECT: &str = "SELECT c.id, c.review_id, c.user_id, \
        u.account_id AS author_account_id, u.nickname AS author_nickname, \
        c.content, c.parent_id, c.created_at, c.updated_at \
     FROM comments c \
     JOIN users u ON u.id = c.user_id";

const REACTION_COLUMNS: &str = "id, review_id, user_id, reaction_type, created_at";

/// Comments, reactions and scraps on reviews. Every write that touches a
/// review counter runs in one transaction with the counter update.
pub struct SqlxSocialRepository {
    pub pool: PgPool,
}

impl SqlxSocialRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UpsertedReaction {
    #[sqlx(flatten)]
    reaction: Reaction,
    inserted: bool,
}

#[async_trait]
impl CommentRepository for SqlxSocialRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Comment>, DomainError> {
        sqlx::query_as::<_, Comment>(&format!("{COMMENT_SELECT} WHERE c.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)
    }

    async fn find_by_review(&self, review_id: i64) -> Result<Vec<Comment>, DomainError> {
        sqlx::query_as::<_, Comment>(&format!(
            "{COMMENT_SELECT} WHERE c.review_id = $1 ORDER BY c.id"
        ))
        .bind(review_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)
    }

    #[instrument(skip(self, comment), fields(review_id = comment.review_id, user_id = comment.user_id))]
    async fn insert_with_count(&self, comment: NewComment) -> Result<Comment, DomainError> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO comments (review_id, user_id, content, parent_id)
             VALUES ($1, $2, $3, $4)
             RETURNING id",
        )
        .bind(comment.review_id)
        .bind(comment.user_id)
        .bind(&comment.content)
        .bind(comment.parent_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(db_error)?;

        sqlx::query("UPDATE reviews SET comment_count = comment_count + 1 WHERE id = $1")
            .bind(comment.review_id)
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;

        let created = sqlx::query_as::<_, Comment>(&format!("{COMMENT_SELECT} WHERE c.id = $1"))
            .bind(id)
            .fetch_one(&mut *tx)
            .await
            .map_err(db_error)?;

        tx.commit().await.map_err(db_error)?;
        debug!("Inserted comment {} (group {})", created.id, created.group_id());
        Ok(created)
    }

    #[instrument(skip(self, comment), fields(comment_id = comment.id))]
    async fn delete_with_count(&self, comment: &Comment) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        let deleted = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(comment.id)
            .execute(&mut *tx)
            .await
            .map_err(db_error)?
            .rows_affected();

        if deleted > 0 {
            sqlx::query(
                "UPDATE reviews SET comment_count = GREATEST(0, comment_count - 1) WHERE id = $1",
            )
            .bind(comment.review_id)
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;
        }

        tx.commit().await.map_err(db_error)?;
        Ok(())
    }

    async fn update_content(&self, id: i64, content: &str) -> Result<Comment, DomainError> {
        let affected = sqlx::query(
            "UPDATE comments SET content = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(content)
        .execute(&self.pool)
        .await
        .map_err(db_error)?
        .rows_affected();

        if affected == 0 {
            return Err(DomainError::NotFound(format!("comment {}", id)));
        }

        CommentRepository::find_by_id(self, id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("comment {}", id)))
    }
}

#[async_trait]
impl ReactionRepository for SqlxSocialRepository {
    #[instrument(skip(self), fields(kind = kind.as_str()))]
    async fn upsert(
        &self,
        user_id: i64,
        review_id: i64,
        kind: ReactionKind,
    ) -> Result<Reaction, DomainError> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        // xmax is zero only for a freshly inserted tuple.
        let row = sqlx::query_as::<_, UpsertedReaction>(&format!(
            "INSERT INTO reactions (user_id, review_id, reaction_type)
             VALUES ($1, $2, $3)
             ON CONFLICT (user_id, review_id)
             DO UPDATE SET reaction_type = EXCLUDED.reaction_type
             RETURNING {REACTION_COLUMNS}, (xmax = 0) AS inserted"
        ))
        .bind(user_id)
        .bind(review_id)
        .bind(kind)
        .fetch_one(&mut *tx)
        .await
        .map_err(db_error)?;

        if row.inserted {
            sqlx::query("UPDATE reviews SET reaction_count = reaction_count + 1 WHERE id = $1")
                .bind(review_id)
                .execute(&mut *tx)
                .await
                .map_err(db_error)?;
        }

        tx.commit().await.map_err(db_error)?;
        debug!("Reaction {} stored (inserted: {})", row.reaction.id, row.inserted);
        Ok(row.reaction)
    }

    async fn find_by_user_and_review(
        &self,
        user_id: i64,
        review_id: i64,
    ) -> Result<Option<Reaction>, DomainError> {
        sqlx::query_as::<_, Reaction>(&format!(
            "SELECT {REACTION_COLUMNS} FROM reactions WHERE user_id = $1 AND review_id = $2"
        ))
        .bind(user_id)
        .bind(review_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)
    }

    async fn find_by_review(&self, review_id: i64) -> Result<Vec<Reaction>, DomainError> {
        sqlx::query_as::<_, Reaction>(&format!(
            "SELECT {REACTION_COLUMNS} FROM reactions WHERE review_id = $1 ORDER BY id"
        ))
        .bind(review_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)
    }

    #[instrument(skip(self, reaction), fields(reaction_id = reaction.id))]
    async fn delete_with_count(&self, reaction: &Reaction) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        let deleted = sqlx::query("DELETE FROM reactions WHERE id = $1")
            .bind(reaction.id)
            .execute(&mut *tx)
            .await
            .map_err(db_error)?
            .rows_affected();

        if deleted > 0 {
            sqlx::query(
                "UPDATE reviews SET reaction_count = GREATEST(0, reaction_count - 1) WHERE id = $1",
            )
            .bind(reaction.review_id)
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;
        }

        tx.commit().await.map_err(db_error)?;
        Ok(())
    }
}

#[async_trait]
impl ScrapRepository for SqlxSocialRepository {
    async fn find(&self, user_id: i64, review_id: i64) -> Result<Option<ReviewScrap>, DomainError> {
        sqlx::query_as::<_, ReviewScrap>(
            "SELECT id, user_id, review_id, created_at
             FROM review_scraps WHERE user_id = $1 AND review_id = $2",
        )
        .bind(user_id)
        .bind(review_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)
    }

    async fn exists(&self, user_id: i64, review_id: i64) -> Result<bool, DomainError> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM review_scraps WHERE user_id = $1 AND review_id = $2)",
        )
        .bind(user_id)
        .bind(review_id)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error)
    }

    async fn insert(&self, user_id: i64, review_id: i64) -> Result<ReviewScrap, DomainError> {
        sqlx::query_as::<_, ReviewScrap>(
            "INSERT INTO review_scraps (user_id, review_id)
             VALUES ($1, $2)
             RETURNING id, user_id, review_id, created_at",
        )
        .bind(user_id)
        .bind(review_id)
        .fetch_one(&self.pool)
        .await
        .map_err(conflict_on_unique(ConflictKind::AlreadyScrapped))
    }

    async fn delete(&self, scrap: &ReviewScrap) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM review_scraps WHERE id = $1")
            .bind(scrap.id)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(())
    }

    async fn find_scrapped_reviews(&self, user_id: i64) -> Result<Vec<Review>, DomainError> {
        sqlx::query_as::<_, Review>(&format!(
            "SELECT {REVIEW_COLUMNS}
             FROM review_scraps s
             JOIN reviews r ON r.id = s.review_id
             JOIN users u ON u.id = r.user_id
             WHERE s.user_id = $1 AND r.exist_flag
             ORDER BY s.id DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)
    }
}
