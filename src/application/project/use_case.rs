use super::dto::{RegisterProjectRequest, UpdateProjectRequest};
use crate::domain::{
    project::{
        entity::{NewProject, Project},
        repository::ProjectRepository,
    },
    shared::errors::DomainError,
    user::entity::AuthenticatedUser,
};
use std::sync::Arc;
use tracing::{info, instrument};
use validator::Validate;

pub struct ProjectUseCase {
    projects: Arc<dyn ProjectRepository>,
}

impl ProjectUseCase {
    pub fn new(projects: Arc<dyn ProjectRepository>) -> Self {
        Self { projects }
    }

    #[instrument(skip(self, owner, request), fields(user_id = owner.id))]
    pub async fn register(
        &self,
        owner: &AuthenticatedUser,
        request: RegisterProjectRequest,
    ) -> Result<Project, DomainError> {
        request.validate()?;
        let project = self
            .projects
            .create(NewProject {
                user_id: owner.id,
                name: request.name,
                uri: request.uri,
                description: request.description,
            })
            .await?;
        info!("Project {} registered", project.id);
        Ok(project)
    }

    pub async fn list_mine(&self, owner: &AuthenticatedUser) -> Result<Vec<Project>, DomainError> {
        self.projects.find_by_user(owner.id).await
    }

    #[instrument(skip(self, requester, request), fields(user_id = requester.id))]
    pub async fn update(
        &self,
        requester: &AuthenticatedUser,
        project_id: i64,
        request: UpdateProjectRequest,
    ) -> Result<Project, DomainError> {
        request.validate()?;
        let mut project = self
            .projects
            .find_by_id(project_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("project {}", project_id)))?;
        if !project.is_owned_by(requester.id) {
            return Err(DomainError::Unauthorized(
                "only the owner can edit this project".to_string(),
            ));
        }

        if let Some(name) = request.name {
            project.name = name;
        }
        if let Some(uri) = request.uri {
            project.uri = uri;
        }
        if request.description.is_some() {
            project.description = request.description;
        }
        self.projects.update(&project).await
    }
}
