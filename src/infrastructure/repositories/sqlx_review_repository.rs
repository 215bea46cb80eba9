use super::{REVIEW_COLUMNS, db_error};
use crate::domain::{
    review::{
        entity::{NewReview, ProjectReviewFilter, Review, ReviewEdit, ReviewStatus},
        repository::ReviewRepository,
    },
    shared::{errors::DomainError, pagination::SortDirection},
};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, info, instrument};

pub struct SqlxReviewRepository {
    pub pool: PgPool,
}

impl SqlxReviewRepository {
    /// Creates a new instance of the repository with the provided database pool.
    pub fn new(pool: PgPool) -> Self {
        info!("Initializing SqlxReviewRepository with connection pool");
        Self { pool }
    }

    async fn fetch(&self, id: i64) -> Result<Option<Review>, DomainError> {
        sqlx::query_as::<_, Review>(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews r JOIN users u ON u.id = r.user_id WHERE r.id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)
    }

    fn escape_like(keyword: &str) -> String {
        let escaped = keyword
            .replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_");
        format!("%{}%", escaped)
    }
}

#[async_trait]
impl ReviewRepository for SqlxReviewRepository {
    #[instrument(skip(self, review), fields(user_id = review.user_id, project_id = ?review.project_id))]
    async fn create(&self, review: NewReview) -> Result<Review, DomainError> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO reviews (user_id, project_id, content, product_url, product_name, score)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id",
        )
        .bind(review.user_id)
        .bind(review.project_id)
        .bind(&review.content)
        .bind(&review.product_url)
        .bind(&review.product_name)
        .bind(review.score)
        .fetch_one(&mut *tx)
        .await
        .map_err(db_error)?;

        if let Some(project_id) = review.project_id {
            sqlx::query("UPDATE projects SET review_count = review_count + 1 WHERE id = $1")
                .bind(project_id)
                .execute(&mut *tx)
                .await
                .map_err(db_error)?;
        }

        tx.commit().await.map_err(db_error)?;
        debug!("Created review {}", id);

        self.fetch(id)
            .await?
            .ok_or_else(|| DomainError::InfrastructureError(format!("review {} vanished", id)))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Review>, DomainError> {
        self.fetch(id).await
    }

    #[instrument(skip(self, edit))]
    async fn update_fields(&self, id: i64, edit: &ReviewEdit) -> Result<Review, DomainError> {
        sqlx::query_as::<_, Review>(&format!(
            "WITH r AS (
                 UPDATE reviews
                 SET content = COALESCE($2, content),
                     score = COALESCE($3, score),
                     product_name = COALESCE($4, product_name),
                     review_image_count = COALESCE($5, review_image_count),
                     updated_at = NOW()
                 WHERE id = $1 AND exist_flag
                 RETURNING *
             )
             SELECT {REVIEW_COLUMNS} FROM r JOIN users u ON u.id = r.user_id"
        ))
        .bind(id)
        .bind(edit.content.as_deref())
        .bind(edit.score)
        .bind(edit.product_name.as_deref())
        .bind(edit.review_image_count)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?
        .ok_or_else(|| DomainError::NotFound(format!("review {}", id)))
    }

    #[instrument(skip(self))]
    async fn set_status(&self, id: i64, status: ReviewStatus) -> Result<Review, DomainError> {
        sqlx::query_as::<_, Review>(&format!(
            "WITH r AS (
                 UPDATE reviews SET status = $2, updated_at = NOW()
                 WHERE id = $1 AND exist_flag
                 RETURNING *
             )
             SELECT {REVIEW_COLUMNS} FROM r JOIN users u ON u.id = r.user_id"
        ))
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?
        .ok_or_else(|| DomainError::NotFound(format!("review {}", id)))
    }

    #[instrument(skip(self))]
    async fn soft_delete(&self, id: i64) -> Result<bool, DomainError> {
        let affected = sqlx::query(
            "UPDATE reviews SET exist_flag = FALSE, updated_at = NOW()
             WHERE id = $1 AND exist_flag",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(db_error)?
        .rows_affected();
        debug!("Soft delete of review {} affected {} row(s)", id, affected);
        Ok(affected > 0)
    }

    async fn find_page(&self, cursor: Option<i64>, size: i64) -> Result<Vec<Review>, DomainError> {
        sqlx::query_as::<_, Review>(&format!(
            "SELECT {REVIEW_COLUMNS}
             FROM reviews r JOIN users u ON u.id = r.user_id
             WHERE r.exist_flag AND ($1::BIGINT IS NULL OR r.id < $1)
             ORDER BY r.id DESC
             LIMIT $2"
        ))
        .bind(cursor)
        .bind(size)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)
    }

    async fn find_page_by_user(
        &self,
        user_id: i64,
        cursor: Option<i64>,
        size: i64,
    ) -> Result<Vec<Review>, DomainError> {
        sqlx::query_as::<_, Review>(&format!(
            "SELECT {REVIEW_COLUMNS}
             FROM reviews r JOIN users u ON u.id = r.user_id
             WHERE r.exist_flag AND r.user_id = $1 AND ($2::BIGINT IS NULL OR r.id < $2)
             ORDER BY r.id DESC
             LIMIT $3"
        ))
        .bind(user_id)
        .bind(cursor)
        .bind(size)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)
    }

    async fn find_page_by_project(
        &self,
        project_id: i64,
        filter: &ProjectReviewFilter,
        cursor: Option<i64>,
        size: i64,
    ) -> Result<Vec<Review>, DomainError> {
        let past_cursor = match filter.sort {
            SortDirection::Asc => "r.id > $6",
            SortDirection::Desc => "r.id < $6",
        };
        sqlx::query_as::<_, Review>(&format!(
            "SELECT {REVIEW_COLUMNS}
             FROM reviews r JOIN users u ON u.id = r.user_id
             WHERE r.exist_flag AND r.project_id = $1
               AND ($2::TEXT IS NULL OR r.status = $2)
               AND ($3::TEXT IS NULL OR r.product_name ILIKE $3 OR r.content ILIKE $3)
               AND ($4::DATE IS NULL OR (r.created_at AT TIME ZONE 'UTC')::DATE >= $4)
               AND ($5::DATE IS NULL OR (r.created_at AT TIME ZONE 'UTC')::DATE <= $5)
               AND ($6::BIGINT IS NULL OR {past_cursor})
             ORDER BY r.id {}
             LIMIT $7",
            filter.sort.as_sql()
        ))
        .bind(project_id)
        .bind(filter.status.map(|s| s.as_str()))
        .bind(filter.keyword.as_deref().map(Self::escape_like))
        .bind(filter.start_date)
        .bind(filter.end_date)
        .bind(cursor)
        .bind(size)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)
    }

    async fn search(&self, keyword: &str, size: i64) -> Result<Vec<Review>, DomainError> {
        sqlx::query_as::<_, Review>(&format!(
            "SELECT {REVIEW_COLUMNS}
             FROM reviews r JOIN users u ON u.id = r.user_id
             WHERE r.exist_flag AND r.status <> 'DELETED'
               AND (r.product_name ILIKE $1 OR r.content ILIKE $1)
             ORDER BY r.id DESC
             LIMIT $2"
        ))
        .bind(Self::escape_like(keyword))
        .bind(size)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)
    }
}
