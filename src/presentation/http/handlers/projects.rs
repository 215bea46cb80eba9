use crate::{
    application::project::dto::{RegisterProjectRequest, UpdateProjectRequest},
    domain::project::entity::Project,
    presentation::http::{errors::AppError, middleware::user::required_user, state::AppState},
};
use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
};

pub async fn register_project(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<RegisterProjectRequest>,
) -> Result<(StatusCode, Json<Project>), AppError> {
    let user = required_user(&headers, &state.config.jwt_secret)?;
    let project = state.projects.register(&user, body).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

pub async fn list_my_projects(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Project>>, AppError> {
    let user = required_user(&headers, &state.config.jwt_secret)?;
    Ok(Json(state.projects.list_mine(&user).await?))
}

pub async fn update_project(
    State(state): State<AppState>,
    Path(project_id): Path<i64>,
    headers: HeaderMap,
    Json(body): Json<UpdateProjectRequest>,
) -> Result<Json<Project>, AppError> {
    let user = required_user(&headers, &state.config.jwt_secret)?;
    Ok(Json(state.projects.update(&user, project_id, body).await?))
}
