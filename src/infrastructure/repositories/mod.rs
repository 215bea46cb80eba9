pub mod sqlx_follow_repository;
pub mod sqlx_project_repository;
pub mod sqlx_review_repository;
pub mod sqlx_social_repository;
pub mod sqlx_user_repository;

use crate::domain::shared::errors::{ConflictKind, DomainError};

const UNIQUE_VIOLATION: &str = "23505";

pub(crate) fn db_error(e: sqlx::Error) -> DomainError {
    DomainError::InfrastructureError(e.to_string())
}

/// Maps a unique-index violation to the given conflict, anything else to an
/// infrastructure error.
pub(crate) fn conflict_on_unique(kind: ConflictKind) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| match &e {
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) => {
            DomainError::Conflict(kind)
        }
        _ => db_error(e),
    }
}

/// Columns of `Review` when selecting `reviews r JOIN users u ON u.id = r.user_id`.
pub(crate) const REVIEW_COLUMNS: &str = "r.id, r.user_id, u.account_id AS author_account_id, \
     u.nickname AS author_nickname, r.project_id, r.content, r.product_url, r.product_name, \
     r.score, r.status, r.comment_count, r.reaction_count, r.review_image_count, \
     r.exist_flag, r.certification_flag, r.created_at, r.updated_at";

pub(crate) const USER_COLUMNS: &str = "u.id, u.account_id, u.password_hash, u.nickname, u.created_at";
