use super::forms::ReviewForm;
use crate::{
    application::review::dto::{
        ClassifyReviewRequest, ProjectReviewsQuery, ReviewPage, ReviewResponse, SearchReviewsQuery,
    },
    domain::shared::pagination::CursorRequest,
    presentation::http::{
        errors::AppError,
        middleware::user::{optional_user, required_user},
        state::AppState,
    },
};
use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
    http::{HeaderMap, StatusCode},
};
use tracing::instrument;

pub async fn list_reviews(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(cursor): Query<CursorRequest>,
) -> Result<Json<ReviewPage>, AppError> {
    let viewer = optional_user(&headers, &state.config.jwt_secret);
    Ok(Json(state.reviews.list(viewer.as_ref(), cursor).await?))
}

#[instrument(skip(state, headers, multipart))]
pub async fn create_review(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ReviewResponse>), AppError> {
    let user = required_user(&headers, &state.config.jwt_secret)?;
    let request = ReviewForm::read(multipart).await?.into_create()?;
    let review = state.reviews.create(&user, request).await?;
    Ok((StatusCode::CREATED, Json(review)))
}

#[instrument(skip(state, headers, multipart))]
pub async fn create_project_review(
    State(state): State<AppState>,
    Path(project_id): Path<i64>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ReviewResponse>), AppError> {
    let user = required_user(&headers, &state.config.jwt_secret)?;
    let request = ReviewForm::read(multipart).await?.into_create()?;
    let review = state
        .reviews
        .create_for_project(&user, project_id, request)
        .await?;
    Ok((StatusCode::CREATED, Json(review)))
}

pub async fn search_reviews(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<SearchReviewsQuery>,
) -> Result<Json<Vec<ReviewResponse>>, AppError> {
    let viewer = optional_user(&headers, &state.config.jwt_secret);
    let reviews = state
        .reviews
        .search(viewer.as_ref(), &query.keyword, query.size)
        .await?;
    Ok(Json(reviews))
}

pub async fn get_review(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<ReviewResponse>, AppError> {
    let viewer = optional_user(&headers, &state.config.jwt_secret);
    Ok(Json(state.reviews.get(viewer.as_ref(), id).await?))
}

#[instrument(skip(state, headers, multipart))]
pub async fn update_review(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<Json<ReviewResponse>, AppError> {
    let user = required_user(&headers, &state.config.jwt_secret)?;
    let request = ReviewForm::read(multipart).await?.into_update();
    Ok(Json(state.reviews.update(&user, id, request).await?))
}

pub async fn delete_review(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<StatusCode, AppError> {
    let user = required_user(&headers, &state.config.jwt_secret)?;
    state.reviews.soft_delete(&user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn classify_review(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(body): Json<ClassifyReviewRequest>,
) -> Result<Json<ReviewResponse>, AppError> {
    let user = required_user(&headers, &state.config.jwt_secret)?;
    Ok(Json(state.reviews.classify(&user, id, &body.status).await?))
}

pub async fn list_user_reviews(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
    headers: HeaderMap,
    Query(cursor): Query<CursorRequest>,
) -> Result<Json<ReviewPage>, AppError> {
    let viewer = optional_user(&headers, &state.config.jwt_secret);
    let page = state
        .reviews
        .list_by_user(viewer.as_ref(), &account_id, cursor)
        .await?;
    Ok(Json(page))
}

pub async fn list_project_reviews(
    State(state): State<AppState>,
    Path(project_id): Path<i64>,
    headers: HeaderMap,
    Query(query): Query<ProjectReviewsQuery>,
) -> Result<Json<ReviewPage>, AppError> {
    let user = required_user(&headers, &state.config.jwt_secret)?;
    let page = state
        .reviews
        .list_for_project(&user, project_id, query)
        .await?;
    Ok(Json(page))
}
