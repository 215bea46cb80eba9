use super::db_error;
use crate::domain::{
    project::{
        entity::{NewProject, Project},
        repository::ProjectRepository,
    },
    shared::errors::DomainError,
};
use async_trait::async_trait;
use sqlx::PgPool;

const PROJECT_COLUMNS: &str =
    "id, user_id, name, uri, description, review_count, created_at, updated_at";

pub struct SqlxProjectRepository {
    pub pool: PgPool,
}

impl SqlxProjectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectRepository for SqlxProjectRepository {
    async fn create(&self, project: NewProject) -> Result<Project, DomainError> {
        sqlx::query_as::<_, Project>(&format!(
            "INSERT INTO projects (user_id, name, uri, description)
             VALUES ($1, $2, $3, $4)
             RETURNING {PROJECT_COLUMNS}"
        ))
        .bind(project.user_id)
        .bind(&project.name)
        .bind(&project.uri)
        .bind(&project.description)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Project>, DomainError> {
        sqlx::query_as::<_, Project>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)
    }

    async fn find_by_user(&self, user_id: i64) -> Result<Vec<Project>, DomainError> {
        sqlx::query_as::<_, Project>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE user_id = $1 ORDER BY id"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)
    }

    async fn update(&self, project: &Project) -> Result<Project, DomainError> {
        sqlx::query_as::<_, Project>(&format!(
            "UPDATE projects SET name = $2, uri = $3, description = $4, updated_at = NOW()
             WHERE id = $1
             RETURNING {PROJECT_COLUMNS}"
        ))
        .bind(project.id)
        .bind(&project.name)
        .bind(&project.uri)
        .bind(&project.description)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?
        .ok_or_else(|| DomainError::NotFound(format!("project {}", project.id)))
    }
}
