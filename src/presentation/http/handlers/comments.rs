use crate::{
    application::comment::dto::{AddCommentRequest, EditCommentRequest},
    domain::social::comment::CommentResponse,
    presentation::http::{errors::AppError, middleware::user::required_user, state::AppState},
};
use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
};

pub async fn get_comments(
    State(state): State<AppState>,
    Path(review_id): Path<i64>,
) -> Result<Json<Vec<CommentResponse>>, AppError> {
    Ok(Json(state.comments.get_comments(review_id).await?))
}

pub async fn add_comment(
    State(state): State<AppState>,
    Path(review_id): Path<i64>,
    headers: HeaderMap,
    Json(body): Json<AddCommentRequest>,
) -> Result<(StatusCode, Json<CommentResponse>), AppError> {
    let user = required_user(&headers, &state.config.jwt_secret)?;
    let comment = state.comments.add_comment(&user, review_id, body).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

pub async fn edit_comment(
    State(state): State<AppState>,
    Path(comment_id): Path<i64>,
    headers: HeaderMap,
    Json(body): Json<EditCommentRequest>,
) -> Result<Json<CommentResponse>, AppError> {
    let user = required_user(&headers, &state.config.jwt_secret)?;
    Ok(Json(state.comments.edit_comment(&user, comment_id, body).await?))
}

pub async fn delete_comment(
    State(state): State<AppState>,
    Path(comment_id): Path<i64>,
    headers: HeaderMap,
) -> Result<StatusCode, AppError> {
    let user = required_user(&headers, &state.config.jwt_secret)?;
    state.comments.delete_comment(&user, comment_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
