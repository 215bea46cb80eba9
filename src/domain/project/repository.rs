use super::entity::{NewProject, Project};
use crate::domain::shared::errors::DomainError;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn create(&self, project: NewProject) -> Result<Project, DomainError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Project>, DomainError>;
    async fn find_by_user(&self, user_id: i64) -> Result<Vec<Project>, DomainError>;
    async fn update(&self, project: &Project) -> Result<Project, DomainError>;
}
